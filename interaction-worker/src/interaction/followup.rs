use crate::requester::RequesterClient;
use crate::Error;
use chrono::{DateTime, Utc};
use model::channel::FollowupMessage;
use model::Snowflake;
use std::fmt;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use tracing::{debug, warn};

/// Capability to send follow-up messages for an acknowledged interaction. Clones share the same
/// token and follow-up counter.
#[derive(Clone)]
pub struct Followups {
    application_id: Snowflake,
    token: Arc<str>,
    expires_at: DateTime<Utc>,
    requester: Arc<RequesterClient>,
    sent: Arc<AtomicUsize>,
}

impl Followups {
    pub(crate) fn new(
        application_id: Snowflake,
        token: Arc<str>,
        expires_at: DateTime<Utc>,
        requester: Arc<RequesterClient>,
    ) -> Followups {
        Followups {
            application_id,
            token,
            expires_at,
            requester,
            sent: Arc::new(AtomicUsize::new(0)),
        }
    }

    pub fn expires_at(&self) -> DateTime<Utc> {
        self.expires_at
    }

    pub fn is_expired(&self) -> bool {
        Utc::now() >= self.expires_at
    }

    /// Number of follow-ups successfully sent so far.
    pub fn sent(&self) -> usize {
        self.sent.load(Ordering::Relaxed)
    }

    pub fn requester(&self) -> &RequesterClient {
        &self.requester
    }

    /// Sends a follow-up. Expired tokens fail immediately and are never retried.
    pub async fn send(&self, message: FollowupMessage) -> Result<(), Error> {
        if self.is_expired() {
            warn!(application_id = %self.application_id, expires_at = %self.expires_at, "Follow-up attempted after token expiry");
            return Err(Error::InteractionTokenExpired);
        }

        self.requester
            .create_followup(self.application_id, &self.token, &message)
            .await?;

        let sent = self.sent.fetch_add(1, Ordering::Relaxed) + 1;
        debug!(application_id = %self.application_id, sent, "Sent follow-up");

        Ok(())
    }
}

impl fmt::Debug for Followups {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Followups")
            .field("application_id", &self.application_id)
            .field("expires_at", &self.expires_at)
            .field("sent", &self.sent())
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_util::{requester, MockRequester};
    use chrono::Duration;

    fn followups(expires_at: DateTime<Utc>) -> Followups {
        Followups::new(Snowflake(1), Arc::from("secret-token"), expires_at, requester())
    }

    #[tokio::test]
    async fn test_expired_token_is_rejected_without_request() {
        let followups = followups(Utc::now() - Duration::seconds(1));

        assert!(followups.is_expired());
        assert!(matches!(
            followups.send(FollowupMessage::new("too late")).await,
            Err(Error::InteractionTokenExpired)
        ));
        assert_eq!(followups.sent(), 0);
    }

    #[tokio::test]
    async fn test_send_counts_followups() {
        let mock = MockRequester::start(200, "{}").await;
        let followups = Followups::new(
            Snowflake(1),
            Arc::from("secret-token"),
            Utc::now() + Duration::minutes(15),
            mock.client(),
        );

        followups.send(FollowupMessage::new("one")).await.unwrap();
        followups.clone().send(FollowupMessage::new("two")).await.unwrap();

        assert_eq!(followups.sent(), 2);
        assert_eq!(mock.requests().len(), 2);
        assert_eq!(mock.requests()[0].path, "/api/webhooks/1/secret-token");
    }

    #[tokio::test]
    async fn test_failed_send_is_not_counted() {
        let mock = MockRequester::start(500, "boom").await;
        let followups = Followups::new(
            Snowflake(1),
            Arc::from("secret-token"),
            Utc::now() + Duration::minutes(15),
            mock.client(),
        );

        assert!(matches!(
            followups.send(FollowupMessage::new("one")).await,
            Err(Error::RequesterStatus(..))
        ));
        assert_eq!(followups.sent(), 0);
    }

    #[test]
    fn test_debug_hides_token() {
        let followups = followups(Utc::now());
        assert!(!format!("{:?}", followups).contains("secret-token"));
    }
}
