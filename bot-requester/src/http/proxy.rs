use super::{relay, Server};
use crate::forward::{ForwardRequest, AUDIT_LOG_REASON, DEFAULT_CONTENT_TYPE};
use crate::Error;
use futures::{Stream, TryStreamExt};
use std::sync::Arc;
use subtle::ConstantTimeEq;
use tracing::{debug, warn};
use warp::http::header::{AUTHORIZATION, CONTENT_TYPE};
use warp::http::{HeaderMap, Method};
use warp::hyper::body::{Buf, Bytes};
use warp::path::FullPath;
use warp::reply::Response;
use warp::Rejection;

pub async fn proxy(
    server: Arc<Server>,
    method: Method,
    path: FullPath,
    query: Option<String>,
    headers: HeaderMap,
    body: Bytes,
) -> Result<Response, Rejection> {
    let path = match path.as_str().strip_prefix(server.base_prefix()) {
        Some(path) => path,
        None => return Err(warp::reject::not_found()),
    };

    authorize(&server.config.bot_token, &headers)?;

    let route_match = server
        .catalog
        .find(&method, path)
        .ok_or_else(|| Error::RouteNotFound {
            method: method.clone(),
            path: path.to_owned(),
        })?;

    let resolved = server
        .resolver
        .resolve(route_match.route, &route_match.params)?;

    let content_type = header_text(&headers, CONTENT_TYPE.as_str())
        .unwrap_or(DEFAULT_CONTENT_TYPE)
        .to_owned();

    let request = ForwardRequest {
        method,
        path: resolved.path,
        query: query.filter(|query| !query.is_empty()),
        content_type,
        audit_log_reason: header_text(&headers, AUDIT_LOG_REASON).map(str::to_owned),
        body,
    };

    debug!(route = %route_match.route, method = %request.method, "Forwarding request");

    let result = server.forwarder.forward(&request, &resolved.bucket).await?;
    Ok(relay(result, &request.content_type)?)
}

fn authorize(bot_token: &str, headers: &HeaderMap) -> Result<(), Error> {
    let provided = header_text(headers, AUTHORIZATION.as_str()).ok_or(Error::Unauthorized)?;
    let provided = provided.strip_prefix("Bot ").unwrap_or(provided);

    if bool::from(provided.as_bytes().ct_eq(bot_token.as_bytes())) {
        Ok(())
    } else {
        warn!("Rejected request with mismatched authorization");
        Err(Error::Unauthorized)
    }
}

/// Buffers the request body, giving up as soon as it grows past `limit`.
/// Bodies without a `Content-Length` are accepted.
pub async fn read_body<S, B>(limit: u64, body: S) -> Result<Bytes, Rejection>
where
    S: Stream<Item = Result<B, warp::Error>>,
    B: Buf,
{
    futures::pin_mut!(body);

    let mut bytes = Vec::new();
    while let Some(mut chunk) = body.try_next().await.map_err(Error::BodyError)? {
        if (bytes.len() + chunk.remaining()) as u64 > limit {
            return Err(Error::PayloadTooLarge(limit).into());
        }

        while chunk.has_remaining() {
            let part = chunk.chunk();
            bytes.extend_from_slice(part);
            let read = part.len();
            chunk.advance(read);
        }
    }

    Ok(Bytes::from(bytes))
}

/// Header value as text; values that are not valid UTF-8 count as absent.
fn header_text<'a>(headers: &'a HeaderMap, name: &str) -> Option<&'a str> {
    headers.get(name)?.to_str().ok()
}
