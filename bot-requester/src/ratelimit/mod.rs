mod bucket;
pub use bucket::BucketState;

mod global;
pub use global::{GlobalRateLimiter, GovernorRateLimiter};

mod headers;
pub use headers::RatelimitHeaders;
pub(crate) use headers::seconds;

use crate::resolver::BucketKey;
use dashmap::DashMap;
use parking_lot::Mutex;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::{Mutex as AsyncMutex, OwnedMutexGuard};
use tokio::time::{sleep_until, Instant};
use tracing::debug;

/// Serialises requests per [`BucketKey`] while different buckets proceed
/// independently.
pub struct Ratelimiter {
    buckets: DashMap<BucketKey, Arc<AsyncMutex<BucketState>>>,
    global: Box<dyn GlobalRateLimiter>,
    global_reset: Mutex<Option<Instant>>,
}

/// Exclusive hold on a bucket for the duration of one upstream request.
pub struct BucketTicket {
    state: OwnedMutexGuard<BucketState>,
}

impl Ratelimiter {
    pub fn new(global: Box<dyn GlobalRateLimiter>) -> Ratelimiter {
        Ratelimiter {
            buckets: DashMap::new(),
            global,
            global_reset: Mutex::new(None),
        }
    }

    /// Waits until a request may be sent on `key`. The bucket stays locked
    /// until the returned ticket is dropped.
    pub async fn acquire(&self, key: &BucketKey) -> BucketTicket {
        // clone the Arc out so the map shard isn't held across the await
        let bucket = Arc::clone(self.buckets.entry(key.clone()).or_default().value());
        let mut state = bucket.lock_owned().await;

        if let Some(wait) = state.wait_time(Instant::now()) {
            debug!(route = %key.route, ?wait, "Bucket depleted, waiting for reset");
            tokio::time::sleep(wait).await;
        }

        self.wait_global().await;
        state.consume(Instant::now());

        BucketTicket { state }
    }

    /// Blocks every bucket until `retry_after` has elapsed.
    pub fn lock_globally(&self, retry_after: Duration) {
        let reset_at = Instant::now() + retry_after;

        let mut global_reset = self.global_reset.lock();
        if global_reset.map_or(true, |current| current < reset_at) {
            *global_reset = Some(reset_at);
        }
    }

    /// Drops buckets that nobody is holding or waiting on and whose reset has
    /// passed. Returns how many were removed.
    pub fn evict_idle(&self) -> usize {
        let now = Instant::now();
        let before = self.buckets.len();

        // acquire clones the Arc under the shard lock, so a count of 1 here
        // means no request can be holding or queued on the bucket
        self.buckets.retain(|_, bucket| {
            Arc::strong_count(bucket) > 1
                || bucket.try_lock().map_or(true, |state| !state.is_idle(now))
        });

        before.saturating_sub(self.buckets.len())
    }

    pub fn bucket_count(&self) -> usize {
        self.buckets.len()
    }

    async fn wait_global(&self) {
        let reset_at = *self.global_reset.lock();

        if let Some(reset_at) = reset_at {
            if reset_at > Instant::now() {
                debug!(wait = ?(reset_at - Instant::now()), "Globally ratelimited, waiting");
                sleep_until(reset_at).await;
            }
        }

        self.global.wait().await;
    }
}

impl BucketTicket {
    pub fn update(&mut self, headers: &RatelimitHeaders) {
        self.state.update(headers, Instant::now());
    }

    pub fn state(&self) -> &BucketState {
        &self.state
    }
}
