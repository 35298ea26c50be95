use bot_requester::http::Server;
use bot_requester::{Config, Error};
use common::observability::{self, ObservabilityConfig};
use tracing::{error, info};

#[tokio::main]
async fn main() -> Result<(), Error> {
    let observability_config = ObservabilityConfig::from_envvar()?;
    let _guard = observability::configure(&observability_config);

    let config = Config::from_envvar().map_err(|e| {
        error!(error = %e, "Failed to load config");
        e
    })?;

    info!(?config, "Loaded config");

    let server = Server::new(config)?;
    server.start().await
}
