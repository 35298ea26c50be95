use std::time::Duration;
use warp::http::HeaderMap;

pub const LIMIT: &str = "x-ratelimit-limit";
pub const REMAINING: &str = "x-ratelimit-remaining";
pub const RESET_AFTER: &str = "x-ratelimit-reset-after";
pub const GLOBAL: &str = "x-ratelimit-global";
pub const RETRY_AFTER: &str = "retry-after";

/// Ratelimit information reported by the upstream on a response.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RatelimitHeaders {
    pub limit: Option<u64>,
    pub remaining: Option<u64>,
    pub reset_after: Option<Duration>,
    pub global: bool,
    pub retry_after: Option<Duration>,
}

impl RatelimitHeaders {
    pub fn from_headers(headers: &HeaderMap) -> RatelimitHeaders {
        RatelimitHeaders {
            limit: parse(headers, LIMIT),
            remaining: parse(headers, REMAINING),
            reset_after: parse(headers, RESET_AFTER).and_then(seconds),
            global: parse::<bool>(headers, GLOBAL).unwrap_or(false),
            retry_after: parse(headers, RETRY_AFTER).and_then(seconds),
        }
    }

    pub fn is_ratelimit_header(name: &str) -> bool {
        name.starts_with("x-ratelimit-") || name == RETRY_AFTER
    }
}

fn parse<T: std::str::FromStr>(headers: &HeaderMap, name: &str) -> Option<T> {
    headers.get(name)?.to_str().ok()?.trim().parse().ok()
}

/// Upstream delays are given in (possibly fractional) seconds.
pub(crate) fn seconds(value: f64) -> Option<Duration> {
    if value.is_finite() && value >= 0.0 {
        Some(Duration::from_secs_f64(value))
    } else {
        None
    }
}
