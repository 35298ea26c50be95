use crate::routes::Route;
use serde::Serializer;
use std::time::Duration;
use warp::http::{Method, StatusCode};
use warp::reject::Reject;

#[derive(thiserror::Error, Debug)]
pub enum Error {
    #[error("missing or invalid authorization header")]
    Unauthorized,

    #[error("no route matches {method} {path}")]
    RouteNotFound { method: Method, path: String },

    #[error("route {0} is not present in the resolver table")]
    UnresolvableRoute(Route),

    #[error("route {route} is missing path parameter {param}")]
    MissingRouteParameter { route: Route, param: &'static str },

    #[error("request body exceeds {0} bytes")]
    PayloadTooLarge(u64),

    #[error("error while reading request body: {0}")]
    BodyError(#[source] warp::Error),

    #[error("upstream ratelimit retry budget exhausted, retry after {0:?}")]
    RateLimited(Duration),

    #[error("upstream request timed out")]
    UpstreamTimeout,

    #[error("error while performing upstream request: {0}")]
    ReqwestError(#[source] reqwest::Error),

    #[error("error while building response: {0}")]
    ResponseError(#[from] warp::http::Error),

    #[error("bot token is not a valid header value")]
    InvalidBotToken,

    #[error("GLOBAL_REQUESTS_PER_SECOND must be greater than 0")]
    InvalidGlobalRatelimit,

    #[error("error while loading config: {0}")]
    ConfigError(#[from] envy::Error),

    #[error("invalid server address: {0}")]
    InvalidServerAddr(#[from] std::net::AddrParseError),
}

impl Error {
    pub fn status_code(&self) -> StatusCode {
        match self {
            Error::Unauthorized => StatusCode::UNAUTHORIZED,
            Error::RouteNotFound { .. } => StatusCode::NOT_FOUND,
            Error::PayloadTooLarge(..) => StatusCode::PAYLOAD_TOO_LARGE,
            Error::BodyError(..) => StatusCode::BAD_REQUEST,
            Error::RateLimited(..) => StatusCode::TOO_MANY_REQUESTS,
            Error::ReqwestError(..) => StatusCode::BAD_GATEWAY,
            Error::UpstreamTimeout => StatusCode::GATEWAY_TIMEOUT,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl From<reqwest::Error> for Error {
    fn from(e: reqwest::Error) -> Self {
        if e.is_timeout() {
            Error::UpstreamTimeout
        } else {
            // upstream URLs embed interaction tokens
            Error::ReqwestError(e.without_url())
        }
    }
}

impl Reject for Error {}

impl serde::Serialize for Error {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&format!("{}", self)[..])
    }
}
