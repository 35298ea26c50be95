use crate::ratelimit::{RatelimitHeaders, Ratelimiter};
use crate::resolver::BucketKey;
use crate::{Config, Error};
use backoff::backoff::Backoff;
use backoff::ExponentialBackoff;
use serde::Deserialize;
use std::time::Duration;
use tracing::{debug, warn};
use warp::http::header::{HeaderName, HeaderValue, AUTHORIZATION, CONTENT_TYPE};
use warp::http::{HeaderMap, Method, StatusCode};
use warp::hyper::body::Bytes;

pub const DEFAULT_CONTENT_TYPE: &str = "application/json";
pub const AUDIT_LOG_REASON: &str = "x-audit-log-reason";

const DEFAULT_RETRY_AFTER: Duration = Duration::from_secs(1);
const CONNECT_TIMEOUT: Duration = Duration::from_secs(3);

/// An inbound request after routing, ready to be sent upstream.
#[derive(Debug, Clone)]
pub struct ForwardRequest {
    pub method: Method,
    /// Resolved upstream path, relative to the upstream base URL.
    pub path: String,
    pub query: Option<String>,
    pub content_type: String,
    pub audit_log_reason: Option<String>,
    pub body: Bytes,
}

#[derive(Debug)]
pub struct ForwardResult {
    pub status: StatusCode,
    pub headers: HeaderMap,
    pub body: Bytes,
}

#[derive(Deserialize)]
struct RatelimitedBody {
    retry_after: f64,
    #[serde(default)]
    global: bool,
}

pub struct Forwarder {
    http_client: reqwest::Client,
    upstream_url: String,
    authorization: HeaderValue,
    ratelimiter: Ratelimiter,
    max_retries: u32,
}

impl Forwarder {
    pub fn new(config: &Config, ratelimiter: Ratelimiter) -> Result<Forwarder, Error> {
        let mut authorization = HeaderValue::from_str(&format!("Bot {}", config.bot_token))
            .map_err(|_| Error::InvalidBotToken)?;
        authorization.set_sensitive(true);

        let http_client = reqwest::Client::builder()
            .connect_timeout(CONNECT_TIMEOUT)
            .timeout(config.request_timeout())
            .gzip(true)
            .build()?;

        Ok(Forwarder {
            http_client,
            upstream_url: config.upstream_url.trim_end_matches('/').to_owned(),
            authorization,
            ratelimiter,
            max_retries: config.max_retries,
        })
    }

    pub fn ratelimiter(&self) -> &Ratelimiter {
        &self.ratelimiter
    }

    /// Sends `request` upstream under the throttling discipline of `bucket`.
    ///
    /// 429s are retried after the upstream supplied delay until the retry
    /// budget runs out. Gateway errors are retried the same way for
    /// idempotent methods. Any other response is returned as is.
    pub async fn forward(
        &self,
        request: &ForwardRequest,
        bucket: &BucketKey,
    ) -> Result<ForwardResult, Error> {
        let mut attempt = 0;
        let mut server_error_backoff = ExponentialBackoff {
            current_interval: Duration::from_millis(250),
            initial_interval: Duration::from_millis(250),
            max_interval: Duration::from_secs(2),
            max_elapsed_time: None,
            ..Default::default()
        };

        loop {
            let (status, headers, body, ratelimit) = {
                let mut ticket = self.ratelimiter.acquire(bucket).await;

                let res = self.send(request).await?;
                let ratelimit = RatelimitHeaders::from_headers(res.headers());
                ticket.update(&ratelimit);

                debug!(
                    route = %bucket.route,
                    status = res.status().as_u16(),
                    remaining = ?ticket.state().remaining(),
                    "Received upstream response"
                );

                let status = res.status();
                let headers = res.headers().clone();
                let body = res.bytes().await?;

                (status, headers, body, ratelimit)
            };

            if status == StatusCode::TOO_MANY_REQUESTS {
                let ratelimited_body = serde_json::from_slice::<RatelimitedBody>(&body).ok();

                let retry_after = ratelimit
                    .retry_after
                    .or_else(|| {
                        ratelimited_body
                            .as_ref()
                            .and_then(|body| crate::ratelimit::seconds(body.retry_after))
                    })
                    .unwrap_or(DEFAULT_RETRY_AFTER);

                let global = ratelimit.global
                    || ratelimited_body.map_or(false, |body| body.global);
                if global {
                    self.ratelimiter.lock_globally(retry_after);
                }

                if attempt >= self.max_retries {
                    warn!(route = %bucket.route, attempt, ?retry_after, global, "Ratelimit retry budget exhausted");
                    return Err(Error::RateLimited(retry_after));
                }

                attempt += 1;
                warn!(route = %bucket.route, attempt, ?retry_after, global, "Ratelimited by upstream, retrying");
                tokio::time::sleep(retry_after).await;
                continue;
            }

            if is_gateway_error(status) && is_idempotent(&request.method) && attempt < self.max_retries {
                let delay = server_error_backoff
                    .next_backoff()
                    .unwrap_or(DEFAULT_RETRY_AFTER);

                attempt += 1;
                warn!(route = %bucket.route, attempt, status = status.as_u16(), ?delay, "Upstream unavailable, retrying");
                tokio::time::sleep(delay).await;
                continue;
            }

            return Ok(ForwardResult {
                status,
                headers,
                body,
            });
        }
    }

    async fn send(&self, request: &ForwardRequest) -> Result<reqwest::Response, Error> {
        let mut url = format!("{}/{}", self.upstream_url, request.path);
        if let Some(query) = &request.query {
            url.push('?');
            url.push_str(query);
        }

        let mut builder = self
            .http_client
            .request(request.method.clone(), url)
            .header(AUTHORIZATION, self.authorization.clone())
            .header(CONTENT_TYPE, request.content_type.as_str());

        if let Some(reason) = &request.audit_log_reason {
            builder = builder.header(HeaderName::from_static(AUDIT_LOG_REASON), reason.as_str());
        }

        if !request.body.is_empty() {
            builder = builder.body(request.body.clone());
        }

        Ok(builder.send().await?)
    }
}

fn is_idempotent(method: &Method) -> bool {
    matches!(
        *method,
        Method::GET | Method::HEAD | Method::PUT | Method::DELETE | Method::OPTIONS
    )
}

fn is_gateway_error(status: StatusCode) -> bool {
    matches!(
        status,
        StatusCode::BAD_GATEWAY | StatusCode::SERVICE_UNAVAILABLE | StatusCode::GATEWAY_TIMEOUT
    )
}
