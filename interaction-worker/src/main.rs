use interaction_worker::http::Server;
use interaction_worker::{Config, Error};
use common::observability::{self, ObservabilityConfig};
use tracing::error;

#[tokio::main]
async fn main() -> Result<(), Error> {
    let observability_config = ObservabilityConfig::from_envvar()?;
    let _guard = observability::configure(&observability_config);

    let config = Config::from_envvar().map_err(|e| {
        error!(error = %e, "Failed to load config");
        e
    })?;

    let server = Server::new(config)?;
    server.start().await
}
