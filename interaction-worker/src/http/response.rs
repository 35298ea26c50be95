use crate::Error;
use serde::Serialize;
use warp::reply::{Reply, Response};

#[derive(Serialize, Debug)]
pub struct ErrorResponse<'a> {
    pub error: &'a Error,
}

impl<'a> From<&'a Error> for ErrorResponse<'a> {
    fn from(error: &'a Error) -> Self {
        ErrorResponse { error }
    }
}

/// JSON `{"error": ...}` body with the status the error maps to.
pub fn error_reply(err: &Error) -> Response {
    let json = warp::reply::json(&ErrorResponse::from(err));
    warp::reply::with_status(json, err.status_code()).into_response()
}

#[cfg(test)]
mod tests {
    use super::*;
    use warp::http::StatusCode;
    use warp::hyper::body::to_bytes;

    #[tokio::test]
    async fn test_error_reply() {
        let res = error_reply(&Error::MissingSignature);
        assert_eq!(res.status(), StatusCode::UNAUTHORIZED);

        let body = to_bytes(res.into_body()).await.unwrap();
        let json: serde_json::Value = serde_json::from_slice(&body).unwrap();
        assert_eq!(json["error"], "missing ed25519 signature header");
    }
}
