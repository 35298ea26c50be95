use crate::commands::CommandRegistry;
use super::error_reply;
use crate::requester::RequesterClient;
use crate::verify::SignatureVerifier;
use crate::{Config, Error};
use std::net::SocketAddr;
use std::sync::Arc;
use tracing::{error, info};
use warp::{Filter, Rejection};

const MAX_BODY_SIZE: u64 = 64 * 1024;

pub struct Server {
    pub config: Config,
    pub verifier: SignatureVerifier,
    pub commands: CommandRegistry,
    pub requester: Arc<RequesterClient>,
}

impl Server {
    pub fn new(config: Config) -> Result<Server, Error> {
        Server::with_commands(config, CommandRegistry::default())
    }

    pub fn with_commands(config: Config, commands: CommandRegistry) -> Result<Server, Error> {
        let verifier = SignatureVerifier::new(config.read_public_key()?);
        let requester = Arc::new(RequesterClient::new(
            &config.requester_url,
            &config.bot_token,
        ));

        Ok(Server {
            config,
            verifier,
            commands,
            requester,
        })
    }

    pub async fn start(self) -> Result<(), Error> {
        let address: SocketAddr = self.config.server_addr.parse()?;

        let filter = Arc::new(self).filter();

        info!(%address, "Starting interaction worker");
        warp::serve(filter).run(address).await;

        Ok(())
    }

    pub fn filter(
        self: Arc<Self>,
    ) -> impl Filter<Extract = impl warp::Reply, Error = Rejection> + Clone {
        let probe = warp::get()
            .and(warp::path("probe"))
            .and(warp::path::end())
            .map(|| "Interaction worker is running!\n");

        let interactions = warp::post()
            .and(warp::path("interactions"))
            .and(warp::path::end())
            .and(warp::any().map(move || Arc::clone(&self)))
            .and(warp::header::optional::<String>("x-signature-ed25519"))
            .and(warp::header::optional::<String>("x-signature-timestamp"))
            .and(warp::body::content_length_limit(MAX_BODY_SIZE))
            .and(warp::body::bytes())
            .and_then(super::handle);

        probe
            .or(interactions)
            .with(warp::log("interaction_worker"))
            .recover(|error: Rejection| async move {
                if let Some(err) = error.find::<Error>() {
                    if err.status_code().is_server_error() {
                        error!(error = %err, "Failed to handle interaction");
                    }

                    Ok(error_reply(err))
                } else {
                    Err(error)
                }
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use warp::http::StatusCode;
    use crate::test_util::{command_json, fresh_snowflake, keypair, sign};
    use serde_json::Value;
    use warp::hyper::body::Bytes;
    use warp::test::request;

    const TIMESTAMP: &str = "1700000000";

    fn server() -> Arc<Server> {
        let config = Config {
            server_addr: "127.0.0.1:0".to_owned(),
            public_key: hex::encode(keypair().public.as_bytes()),
            requester_url: "http://127.0.0.1:9".to_owned(),
            bot_token: "token".to_owned(),
        };

        Arc::new(Server::new(config).unwrap())
    }

    async fn post(body: &str, signature: Option<String>) -> (StatusCode, Bytes) {
        let mut req = request()
            .method("POST")
            .path("/interactions")
            .header("x-signature-timestamp", TIMESTAMP)
            .body(body.to_owned());

        if let Some(signature) = signature {
            req = req.header("x-signature-ed25519", signature);
        }

        let res = req.reply(&server().filter()).await;
        (res.status(), res.into_body())
    }

    async fn post_signed(body: &str) -> (StatusCode, Bytes) {
        let signature = sign(&keypair(), TIMESTAMP, body.as_bytes());
        post(body, Some(signature)).await
    }

    #[tokio::test]
    async fn test_ping_scenario() {
        let (status, body) = post_signed(r#"{"type":1}"#).await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(&body[..], br#"{"type":1}"#);
    }

    #[tokio::test]
    async fn test_bad_signature() {
        let signature = sign(&keypair(), TIMESTAMP, br#"{"type":2}"#);
        let (status, _) = post(r#"{"type":1}"#, Some(signature)).await;
        assert_eq!(status, StatusCode::UNAUTHORIZED);

        let (status, _) = post(r#"{"type":1}"#, None).await;
        assert_eq!(status, StatusCode::UNAUTHORIZED);

        let (status, _) = post(r#"{"type":1}"#, Some("abcd".to_owned())).await;
        assert_eq!(status, StatusCode::UNAUTHORIZED);
    }

    #[tokio::test]
    async fn test_malformed_body() {
        let (status, body) = post_signed(r#"{"id":"1"}"#).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);

        let json: Value = serde_json::from_slice(&body).unwrap();
        assert!(json["error"].as_str().unwrap().contains("type"));

        let (status, _) = post_signed("not json").await;
        assert_eq!(status, StatusCode::BAD_REQUEST);

        let (status, _) = post_signed(r#"{"type":4}"#).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_unknown_command_is_acknowledged() {
        let body = command_json(fresh_snowflake(), "doesnotexist");
        let (status, body) = post_signed(&body).await;

        assert_eq!(status, StatusCode::OK);

        let json: Value = serde_json::from_slice(&body).unwrap();
        assert_eq!(json["type"], 4);
        assert_eq!(json["data"]["flags"], 64);
        assert_eq!(json["data"]["content"], "Unhandled command: doesnotexist");
    }

    #[tokio::test]
    async fn test_component_is_acknowledged() {
        let body = format!(
            r#"{{"type":3,"id":"{}","application_id":"2","token":"t",
                "data":{{"custom_id":"close","component_type":2}}}}"#,
            fresh_snowflake()
        );
        let (status, body) = post_signed(&body).await;

        assert_eq!(status, StatusCode::OK);

        let json: Value = serde_json::from_slice(&body).unwrap();
        assert_eq!(json["data"]["flags"], 64);
    }

    #[tokio::test]
    async fn test_probe() {
        let res = request()
            .method("GET")
            .path("/probe")
            .reply(&server().filter())
            .await;

        assert_eq!(res.status(), StatusCode::OK);
    }
}
