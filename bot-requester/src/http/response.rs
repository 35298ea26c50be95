use crate::forward::ForwardResult;
use crate::ratelimit::RatelimitHeaders;
use crate::Error;
use serde::Serialize;
use warp::http::header::{HeaderValue, CONTENT_TYPE, RETRY_AFTER};
use warp::http::Response as HttpResponse;
use warp::hyper::Body;
use warp::reply::Response;
use warp::Reply;

pub const PROXY_ERROR: &str = "x-proxy-error";

#[derive(Serialize, Debug)]
pub struct ErrorResponse<'a> {
    pub error: &'a Error,
}

impl<'a> From<&'a Error> for ErrorResponse<'a> {
    fn from(error: &'a Error) -> Self {
        ErrorResponse { error }
    }
}

/// Reply for a request that failed inside the proxy rather than upstream.
pub fn error_reply(err: &Error) -> Response {
    let json = warp::reply::json(&ErrorResponse::from(err));
    let mut res = warp::reply::with_status(json, err.status_code()).into_response();

    if let Ok(value) = HeaderValue::from_str(&err.to_string()) {
        res.headers_mut().insert(PROXY_ERROR, value);
    }

    if let Error::RateLimited(retry_after) = err {
        let seconds = retry_after.as_secs() + u64::from(retry_after.subsec_nanos() > 0);
        res.headers_mut().insert(RETRY_AFTER, HeaderValue::from(seconds));
    }

    res
}

/// Relays an upstream response: status and body untouched, ratelimit
/// headers copied over.
///
/// Successful responses are labelled with the caller's content type, errors
/// keep whatever the upstream sent.
pub fn relay(result: ForwardResult, request_content_type: &str) -> Result<Response, Error> {
    let mut builder = HttpResponse::builder().status(result.status);

    let upstream_content_type = result.headers.get(CONTENT_TYPE);
    match upstream_content_type {
        Some(content_type) if !result.status.is_success() => {
            builder = builder.header(CONTENT_TYPE, content_type)
        }
        _ => builder = builder.header(CONTENT_TYPE, request_content_type),
    }

    for (name, value) in &result.headers {
        if RatelimitHeaders::is_ratelimit_header(name.as_str()) {
            builder = builder.header(name, value);
        }
    }

    Ok(builder.body(Body::from(result.body))?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;
    use warp::http::{HeaderMap, StatusCode};
    use warp::hyper::body::Bytes;

    fn result(status: StatusCode, headers: &[(&'static str, &'static str)]) -> ForwardResult {
        let mut header_map = HeaderMap::new();
        for (name, value) in headers {
            header_map.insert(*name, HeaderValue::from_static(*value));
        }

        ForwardResult {
            status,
            headers: header_map,
            body: Bytes::from_static(b"{}"),
        }
    }

    #[test]
    fn test_relay_success() {
        let res = relay(
            result(
                StatusCode::OK,
                &[
                    ("content-type", "text/plain"),
                    ("x-ratelimit-bucket", "abc"),
                    ("set-cookie", "a=b"),
                ],
            ),
            "application/json",
        )
        .unwrap();

        assert_eq!(res.status(), StatusCode::OK);
        assert_eq!(res.headers()["content-type"], "application/json");
        assert_eq!(res.headers()["x-ratelimit-bucket"], "abc");
        assert!(res.headers().get("set-cookie").is_none());
    }

    #[test]
    fn test_relay_error_keeps_upstream_content_type() {
        let res = relay(
            result(StatusCode::NOT_FOUND, &[("content-type", "text/html")]),
            "application/json",
        )
        .unwrap();

        assert_eq!(res.status(), StatusCode::NOT_FOUND);
        assert_eq!(res.headers()["content-type"], "text/html");
    }

    #[test]
    fn test_error_reply() {
        let res = error_reply(&Error::RateLimited(Duration::from_millis(1500)));

        assert_eq!(res.status(), StatusCode::TOO_MANY_REQUESTS);
        assert_eq!(res.headers()["retry-after"], "2");
        assert!(res.headers().contains_key(PROXY_ERROR));
    }
}
