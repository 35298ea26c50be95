use crate::requester::RequesterClient;
use chrono::Utc;
use ed25519_dalek::{Keypair, PublicKey, SecretKey, Signer};
use model::{Snowflake, PLATFORM_EPOCH_MILLIS};
use std::net::SocketAddr;
use std::sync::{Arc, Mutex};
use warp::http::{HeaderMap, Response};
use warp::hyper::body::Bytes;
use warp::hyper::Body;
use warp::path::FullPath;
use warp::Filter;

pub fn keypair() -> Keypair {
    let secret = SecretKey::from_bytes(&[7u8; 32]).unwrap();
    let public = PublicKey::from(&secret);
    Keypair { secret, public }
}

pub fn sign(keypair: &Keypair, timestamp: &str, body: &[u8]) -> String {
    let mut message = timestamp.as_bytes().to_vec();
    message.extend_from_slice(body);
    hex::encode(keypair.sign(&message).to_bytes())
}

/// A snowflake minted now, so its interaction token is still valid.
pub fn fresh_snowflake() -> Snowflake {
    let millis = (Utc::now().timestamp_millis() - PLATFORM_EPOCH_MILLIS) as u64;
    Snowflake(millis << 22)
}

pub fn command_json(id: Snowflake, name: &str) -> String {
    command_json_with_options(id, name, "[]")
}

pub fn command_json_with_options(id: Snowflake, name: &str, options: &str) -> String {
    format!(
        r#"{{"type":2,"id":"{}","application_id":"508391840525975553","token":"tok",
            "channel_id":"508392876359680001","data":{{"id":"1","name":"{}","options":{}}}}}"#,
        id, name, options
    )
}

/// A requester pointed at a port nothing listens on.
pub fn requester() -> Arc<RequesterClient> {
    Arc::new(RequesterClient::new("http://127.0.0.1:9", "token"))
}

#[derive(Debug, Clone)]
pub struct RecordedRequest {
    pub path: String,
    pub headers: HeaderMap,
    pub body: Bytes,
}

/// Bot-requester stand-in that answers every request with `status` and
/// `body`, recording what it receives.
pub struct MockRequester {
    pub url: String,
    requests: Arc<Mutex<Vec<RecordedRequest>>>,
}

impl MockRequester {
    pub async fn start(status: u16, body: &'static str) -> MockRequester {
        let requests = Arc::new(Mutex::new(Vec::new()));

        let filter = {
            let requests = Arc::clone(&requests);

            warp::post()
                .and(warp::path::full())
                .and(warp::header::headers_cloned())
                .and(warp::body::bytes())
                .map(move |path: FullPath, headers: HeaderMap, bytes: Bytes| {
                    requests.lock().unwrap().push(RecordedRequest {
                        path: path.as_str().to_owned(),
                        headers,
                        body: bytes,
                    });

                    Response::builder()
                        .status(status)
                        .body(Body::from(body))
                        .unwrap()
                })
        };

        let (addr, server): (SocketAddr, _) =
            warp::serve(filter).bind_ephemeral(([127, 0, 0, 1], 0));
        tokio::spawn(server);

        MockRequester {
            url: format!("http://{}", addr),
            requests,
        }
    }

    pub fn client(&self) -> Arc<RequesterClient> {
        Arc::new(RequesterClient::new(&self.url, "token"))
    }

    pub fn requests(&self) -> Vec<RecordedRequest> {
        self.requests.lock().unwrap().clone()
    }
}
