use async_trait::async_trait;
use governor::{
    clock,
    middleware::NoOpMiddleware,
    state::{InMemoryState, NotKeyed},
    Quota,
};
use std::num::NonZeroU32;

/// Process wide cap on upstream throughput, shared by every bucket.
#[async_trait]
pub trait GlobalRateLimiter: Send + Sync {
    async fn wait(&self);
}

pub struct GovernorRateLimiter {
    ratelimiter: governor::RateLimiter<NotKeyed, InMemoryState, clock::DefaultClock, NoOpMiddleware>,
}

impl GovernorRateLimiter {
    pub fn new(per_second: NonZeroU32) -> Self {
        let ratelimiter = governor::RateLimiter::direct(Quota::per_second(per_second));

        Self { ratelimiter }
    }
}

#[async_trait]
impl GlobalRateLimiter for GovernorRateLimiter {
    async fn wait(&self) {
        self.ratelimiter.until_ready().await;
    }
}
