use crate::Error;
use model::channel::{CreateMessage, FollowupMessage};
use model::Snowflake;
use reqwest::header::AUTHORIZATION;
use reqwest::Method;
use serde::Serialize;
use std::time::Duration;
use tracing::debug;
use warp::hyper::body::Bytes;

/// Client for the bot-requester proxy, which forwards calls to the platform API with the bot's
/// credentials and rate limits applied.
pub struct RequesterClient {
    base_url: Box<str>,
    authorization: Box<str>,
    http_client: reqwest::Client,
}

impl RequesterClient {
    pub fn new(base_url: &str, bot_token: &str) -> RequesterClient {
        RequesterClient {
            base_url: Box::from(base_url.trim_end_matches('/')),
            authorization: format!("Bot {}", bot_token).into_boxed_str(),
            http_client: Self::build_http_client(),
        }
    }

    pub async fn create_message(
        &self,
        channel_id: Snowflake,
        message: &CreateMessage,
    ) -> Result<Bytes, Error> {
        let path = format!("channels/{}/messages", channel_id);
        self.request(Method::POST, "CreateMessage", &path, message).await
    }

    pub async fn create_followup(
        &self,
        application_id: Snowflake,
        token: &str,
        message: &FollowupMessage,
    ) -> Result<Bytes, Error> {
        let path = format!("webhooks/{}/{}", application_id, token);
        self.request(Method::POST, "CreateFollowupMessage", &path, message)
            .await
    }

    // Paths may embed interaction tokens, so only the route name is logged
    async fn request<T: Serialize>(
        &self,
        method: Method,
        route: &str,
        path: &str,
        body: &T,
    ) -> Result<Bytes, Error> {
        let url = format!("{}/api/{}", self.base_url, path);

        debug!(%method, route, "Sending request to requester");

        let res = self
            .http_client
            .request(method, url)
            .header(AUTHORIZATION, &*self.authorization)
            .json(body)
            .send()
            .await
            .map_err(|e| Error::ReqwestError(e.without_url()))?;

        let status = res.status();
        let body = res
            .bytes()
            .await
            .map_err(|e| Error::ReqwestError(e.without_url()))?;

        if !status.is_success() {
            return Err(Error::RequesterStatus(
                status,
                String::from_utf8_lossy(&body).into_owned(),
            ));
        }

        debug!(route, %status, "Requester responded");
        Ok(body)
    }

    fn build_http_client() -> reqwest::Client {
        reqwest::Client::builder()
            .connect_timeout(Duration::from_secs(3))
            .timeout(Duration::from_secs(10))
            .gzip(true)
            .build()
            .unwrap_or_default()
    }
}
