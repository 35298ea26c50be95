use super::error_reply;
use crate::forward::Forwarder;
use crate::ratelimit::{GovernorRateLimiter, Ratelimiter};
use crate::resolver::RouteResolver;
use crate::routes::RouteCatalog;
use crate::{Config, Error};
use std::net::SocketAddr;
use std::num::NonZeroU32;
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, error, info};
use warp::{Filter, Rejection};

const BUCKET_EVICTION_INTERVAL: Duration = Duration::from_secs(60);

pub struct Server {
    pub config: Config,
    pub catalog: RouteCatalog,
    pub resolver: RouteResolver,
    pub forwarder: Forwarder,
    base_prefix: String,
}

impl Server {
    pub fn new(config: Config) -> Result<Server, Error> {
        let per_second = NonZeroU32::new(config.global_requests_per_second)
            .ok_or(Error::InvalidGlobalRatelimit)?;
        let ratelimiter = Ratelimiter::new(Box::new(GovernorRateLimiter::new(per_second)));
        let forwarder = Forwarder::new(&config, ratelimiter)?;

        Ok(Server {
            base_prefix: config.base_prefix(),
            config,
            catalog: RouteCatalog::default(),
            resolver: RouteResolver::default(),
            forwarder,
        })
    }

    pub fn base_prefix(&self) -> &str {
        &self.base_prefix
    }

    pub async fn start(self) -> Result<(), Error> {
        let address: SocketAddr = self.config.server_addr.parse()?;

        let server = Arc::new(self);
        tokio::spawn(evict_idle_buckets(Arc::clone(&server)));

        let filter = server.filter();

        info!(%address, "Starting bot requester");
        warp::serve(filter).run(address).await;

        Ok(())
    }

    pub fn filter(
        self: Arc<Self>,
    ) -> impl Filter<Extract = impl warp::Reply, Error = Rejection> + Clone {
        let probe = warp::get()
            .and(warp::path("probe"))
            .and(warp::path::end())
            .map(|| "Bot requester is running!\n");

        let max_body_size = self.config.max_body_size;
        let body = warp::any()
            .map(move || max_body_size)
            .and(warp::body::stream())
            .and_then(super::read_body);

        let proxy = warp::any()
            .map(move || Arc::clone(&self))
            .and(warp::method())
            .and(warp::path::full())
            .and(
                warp::query::raw()
                    .map(Some)
                    .or(warp::any().map(|| None::<String>))
                    .unify(),
            )
            .and(warp::header::headers_cloned())
            .and(body)
            .and_then(super::proxy);

        probe
            .or(proxy)
            .with(warp::log("bot_requester"))
            .recover(|rejection: Rejection| async move {
                if let Some(err) = rejection.find::<Error>() {
                    if err.status_code().is_server_error() {
                        error!(error = %err, "Failed to proxy request");
                    }

                    Ok(error_reply(err))
                } else {
                    Err(rejection)
                }
            })
    }
}

async fn evict_idle_buckets(server: Arc<Server>) {
    let mut interval = tokio::time::interval(BUCKET_EVICTION_INTERVAL);

    loop {
        interval.tick().await;

        let ratelimiter = server.forwarder.ratelimiter();
        let evicted = ratelimiter.evict_idle();
        if evicted > 0 {
            debug!(evicted, remaining = ratelimiter.bucket_count(), "Evicted idle buckets");
        }
    }
}
