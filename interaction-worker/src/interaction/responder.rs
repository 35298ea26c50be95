use crate::interaction::Followups;
use crate::requester::RequesterClient;
use crate::Error;
use chrono::{DateTime, Duration as ChronoDuration, Utc};
use model::interaction::{Interaction, InteractionResponse, InteractionResponseType, InteractionType};
use model::Snowflake;
use std::sync::Arc;
use std::time::{Duration, Instant};

/// The platform drops interactions that are not acknowledged within this window.
pub const ACKNOWLEDGEMENT_DEADLINE: Duration = Duration::from_millis(3000);

/// How long after creation an interaction token accepts follow-ups.
pub const TOKEN_VALIDITY_MINUTES: i64 = 15;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Acknowledgement {
    Pong,
    Immediate,
    Deferred,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResponseState {
    Received,
    Acknowledged(Acknowledgement),
}

/// Tracks the response lifecycle of a single interaction: exactly one acknowledgement, issued
/// before the deadline, followed by any number of follow-ups while the token is valid.
#[derive(Debug)]
pub struct InteractionResponder {
    interaction_type: InteractionType,
    received_at: Instant,
    state: ResponseState,
    response: Option<InteractionResponse>,
    continuation: Option<Continuation>,
}

#[derive(Debug)]
struct Continuation {
    application_id: Snowflake,
    token: Arc<str>,
    expires_at: DateTime<Utc>,
}

impl InteractionResponder {
    pub fn new(interaction: &Interaction, received_at: Instant) -> InteractionResponder {
        let continuation = match interaction {
            Interaction::Ping(_) => None,
            Interaction::ApplicationCommand(data) => {
                Some(Continuation::new(data.id, data.application_id, &data.token))
            }
            Interaction::MessageComponent(data) => {
                Some(Continuation::new(data.id, data.application_id, &data.token))
            }
            Interaction::ModalSubmit(data) => {
                Some(Continuation::new(data.id, data.application_id, &data.token))
            }
        };

        InteractionResponder {
            interaction_type: interaction.r#type(),
            received_at,
            state: ResponseState::Received,
            response: None,
            continuation,
        }
    }

    pub fn state(&self) -> ResponseState {
        self.state
    }

    pub fn elapsed(&self) -> Duration {
        self.received_at.elapsed()
    }

    /// When the continuation token stops accepting follow-ups, if the interaction has one.
    pub fn expires_at(&self) -> Option<DateTime<Utc>> {
        self.continuation.as_ref().map(|c| c.expires_at)
    }

    pub fn acknowledge(&mut self, response: InteractionResponse) -> Result<(), Error> {
        if let ResponseState::Acknowledged(previous) = self.state {
            return Err(Error::AlreadyAcknowledged(previous));
        }

        let acknowledgement = match (self.interaction_type, response.r#type()) {
            (InteractionType::Ping, InteractionResponseType::Pong) => Acknowledgement::Pong,
            (InteractionType::Ping, _) | (_, InteractionResponseType::Pong) => {
                return Err(Error::InvalidAcknowledgement {
                    interaction: self.interaction_type,
                    response: response.r#type(),
                })
            }
            (_, InteractionResponseType::ChannelMessageWithSource) => Acknowledgement::Immediate,
            (_, InteractionResponseType::DeferredChannelMessageWithSource) => {
                Acknowledgement::Deferred
            }
            (InteractionType::MessageComponent, InteractionResponseType::DeferredMessageUpdate) => {
                Acknowledgement::Deferred
            }
            (interaction, response) => {
                return Err(Error::InvalidAcknowledgement {
                    interaction,
                    response,
                })
            }
        };

        let elapsed = self.elapsed();
        if elapsed > ACKNOWLEDGEMENT_DEADLINE {
            return Err(Error::AcknowledgementDeadlineExceeded(elapsed));
        }

        self.state = ResponseState::Acknowledged(acknowledgement);
        self.response = Some(response);
        Ok(())
    }

    /// Hands out the capability to send follow-ups. Only available once the interaction has been
    /// acknowledged with a message or a deferral.
    pub fn followups(&self, requester: Arc<RequesterClient>) -> Result<Followups, Error> {
        if !matches!(
            self.state,
            ResponseState::Acknowledged(Acknowledgement::Immediate | Acknowledgement::Deferred)
        ) {
            return Err(Error::FollowupBeforeAcknowledgement);
        }

        let continuation = self
            .continuation
            .as_ref()
            .ok_or(Error::FollowupBeforeAcknowledgement)?;

        Ok(Followups::new(
            continuation.application_id,
            Arc::clone(&continuation.token),
            continuation.expires_at,
            requester,
        ))
    }

    pub fn into_response(self) -> Result<InteractionResponse, Error> {
        self.response.ok_or(Error::NotAcknowledged)
    }
}

impl Continuation {
    fn new(interaction_id: Snowflake, application_id: Snowflake, token: &str) -> Continuation {
        let created_at = interaction_id.timestamp().unwrap_or_else(Utc::now);

        Continuation {
            application_id,
            token: Arc::from(token),
            expires_at: created_at + ChronoDuration::minutes(TOKEN_VALIDITY_MINUTES),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_util::{command_json, fresh_snowflake, requester};

    fn ping() -> Interaction {
        serde_json::from_str(r#"{"type":1}"#).unwrap()
    }

    fn command() -> Interaction {
        serde_json::from_str(&command_json(fresh_snowflake(), "ping")).unwrap()
    }

    #[test]
    fn test_ping_yields_single_pong() {
        let mut responder = InteractionResponder::new(&ping(), Instant::now());

        responder.acknowledge(InteractionResponse::new_pong()).unwrap();
        assert_eq!(
            responder.state(),
            ResponseState::Acknowledged(Acknowledgement::Pong)
        );
        assert!(matches!(
            responder.followups(requester()),
            Err(Error::FollowupBeforeAcknowledgement)
        ));

        let json = serde_json::to_string(&responder.into_response().unwrap()).unwrap();
        assert_eq!(json, r#"{"type":1}"#);
    }

    #[test]
    fn test_second_acknowledgement_is_rejected() {
        let mut responder = InteractionResponder::new(&command(), Instant::now());

        responder
            .acknowledge(InteractionResponse::new_message("first", false))
            .unwrap();

        let err = responder
            .acknowledge(InteractionResponse::new_deferred_message_with_source(false))
            .unwrap_err();
        assert!(matches!(
            err,
            Error::AlreadyAcknowledged(Acknowledgement::Immediate)
        ));

        // The original acknowledgement is the one that gets sent
        let response = responder.into_response().unwrap();
        assert_eq!(response.content(), Some("first"));
    }

    #[test]
    fn test_pong_only_for_ping() {
        let mut responder = InteractionResponder::new(&command(), Instant::now());
        assert!(matches!(
            responder.acknowledge(InteractionResponse::new_pong()),
            Err(Error::InvalidAcknowledgement { .. })
        ));
        assert_eq!(responder.state(), ResponseState::Received);

        let mut responder = InteractionResponder::new(&ping(), Instant::now());
        assert!(responder
            .acknowledge(InteractionResponse::new_message("hi", false))
            .is_err());
    }

    #[test]
    fn test_deadline_exceeded() {
        let received_at = Instant::now() - Duration::from_secs(4);
        let mut responder = InteractionResponder::new(&command(), received_at);

        assert!(matches!(
            responder.acknowledge(InteractionResponse::new_message("late", false)),
            Err(Error::AcknowledgementDeadlineExceeded(_))
        ));
    }

    #[test]
    fn test_followups_after_deferral() {
        let mut responder = InteractionResponder::new(&command(), Instant::now());
        assert!(responder.followups(requester()).is_err());

        responder
            .acknowledge(InteractionResponse::new_deferred_message_with_source(true))
            .unwrap();

        let followups = responder.followups(requester()).unwrap();
        assert!(!followups.is_expired());
    }

    #[test]
    fn test_unacknowledged_has_no_response() {
        let responder = InteractionResponder::new(&command(), Instant::now());
        assert!(matches!(
            responder.into_response(),
            Err(Error::NotAcknowledged)
        ));
    }

    #[test]
    fn test_token_expiry_from_snowflake() {
        // 2016-04-30T11:18:25.796Z
        let interaction: Interaction =
            serde_json::from_str(&command_json(Snowflake(175928847299117063), "ping")).unwrap();
        let responder = InteractionResponder::new(&interaction, Instant::now());

        assert_eq!(
            responder.expires_at().unwrap().timestamp_millis(),
            1462015105796 + 15 * 60 * 1000
        );
    }
}
