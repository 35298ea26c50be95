use super::RatelimitHeaders;
use std::time::Duration;
use tokio::time::Instant;

/// Last known state of one upstream bucket.
#[derive(Debug, Default)]
pub struct BucketState {
    limit: Option<u64>,
    remaining: Option<u64>,
    reset_at: Option<Instant>,
}

impl BucketState {
    pub fn limit(&self) -> Option<u64> {
        self.limit
    }

    pub fn remaining(&self) -> Option<u64> {
        self.remaining
    }

    /// How long a request has to wait before the bucket has capacity again.
    pub fn wait_time(&self, now: Instant) -> Option<Duration> {
        match (self.remaining, self.reset_at) {
            (Some(0), Some(reset_at)) if reset_at > now => Some(reset_at - now),
            _ => None,
        }
    }

    /// Whether the bucket holds nothing a future request would need to wait on.
    pub fn is_idle(&self, now: Instant) -> bool {
        self.reset_at.map_or(true, |reset_at| reset_at <= now)
    }

    /// Records that a request is about to be sent.
    pub fn consume(&mut self, now: Instant) {
        if let Some(reset_at) = self.reset_at {
            if reset_at <= now {
                self.remaining = self.limit;
                self.reset_at = None;
            }
        }

        if let Some(remaining) = self.remaining.as_mut() {
            *remaining = remaining.saturating_sub(1);
        }
    }

    pub fn update(&mut self, headers: &RatelimitHeaders, now: Instant) {
        if let Some(limit) = headers.limit {
            self.limit = Some(limit);
        }

        if let Some(remaining) = headers.remaining {
            self.remaining = Some(remaining);
        }

        if let Some(reset_after) = headers.reset_after {
            self.reset_at = Some(now + reset_after);
        }
    }
}
