use std::net::SocketAddr;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use warp::http::{HeaderMap, Method, Response};
use warp::hyper::body::Bytes;
use warp::hyper::Body;
use warp::path::FullPath;
use warp::Filter;

#[derive(Debug, Clone)]
pub struct RecordedRequest {
    pub method: Method,
    pub path: String,
    pub query: String,
    pub headers: HeaderMap,
    pub body: Bytes,
}

#[derive(Debug, Clone)]
pub struct MockResponse {
    pub status: u16,
    pub headers: Vec<(&'static str, &'static str)>,
    pub body: &'static str,
}

impl MockResponse {
    pub fn new(status: u16, body: &'static str) -> MockResponse {
        MockResponse {
            status,
            headers: Vec::new(),
            body,
        }
    }

    pub fn header(mut self, name: &'static str, value: &'static str) -> MockResponse {
        self.headers.push((name, value));
        self
    }
}

/// Upstream stand-in that replays `responses` in order, repeating the last
/// one, and records every request it receives.
pub struct MockUpstream {
    pub url: String,
    hits: Arc<AtomicUsize>,
    requests: Arc<Mutex<Vec<RecordedRequest>>>,
}

impl MockUpstream {
    pub async fn start(responses: Vec<MockResponse>) -> MockUpstream {
        let hits = Arc::new(AtomicUsize::new(0));
        let requests = Arc::new(Mutex::new(Vec::new()));
        let responses = Arc::new(responses);

        let filter = {
            let hits = Arc::clone(&hits);
            let requests = Arc::clone(&requests);

            warp::any()
                .and(warp::method())
                .and(warp::path::full())
                .and(warp::query::raw().or(warp::any().map(String::new)).unify())
                .and(warp::header::headers_cloned())
                .and(warp::body::bytes())
                .map(
                    move |method: Method,
                          path: FullPath,
                          query: String,
                          headers: HeaderMap,
                          body: Bytes| {
                        let hit = hits.fetch_add(1, Ordering::SeqCst);
                        requests.lock().unwrap().push(RecordedRequest {
                            method,
                            path: path.as_str().to_owned(),
                            query,
                            headers,
                            body,
                        });

                        let mock = &responses[hit.min(responses.len() - 1)];
                        let mut builder = Response::builder().status(mock.status);
                        for (name, value) in &mock.headers {
                            builder = builder.header(*name, *value);
                        }

                        builder.body(Body::from(mock.body)).unwrap()
                    },
                )
        };

        let (addr, server): (SocketAddr, _) =
            warp::serve(filter).bind_ephemeral(([127, 0, 0, 1], 0));
        tokio::spawn(server);

        MockUpstream {
            url: format!("http://{}/api/v10", addr),
            hits,
            requests,
        }
    }

    pub fn hits(&self) -> usize {
        self.hits.load(Ordering::SeqCst)
    }

    pub fn requests(&self) -> Vec<RecordedRequest> {
        self.requests.lock().unwrap().clone()
    }
}
