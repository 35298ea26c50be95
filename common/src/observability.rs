use sentry::types::Dsn;
use sentry_tracing::EventFilter;
use serde::Deserialize;
use std::str::FromStr;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::EnvFilter;

#[derive(Deserialize, Debug, Clone, Default)]
pub struct ObservabilityConfig {
    #[serde(default)]
    pub json_log: bool,
    #[serde(default)]
    pub sentry_dsn: Option<String>,
    #[serde(default)]
    pub debug_mode: bool,
}

/// Installs the global tracing subscriber. Warnings and errors are also reported to sentry when a
/// DSN is configured. The returned guard must be held until the process exits.
pub fn configure(config: &ObservabilityConfig) -> sentry::ClientInitGuard {
    let dsn = config
        .sentry_dsn
        .as_deref()
        .filter(|dsn| !dsn.is_empty())
        .map(Dsn::from_str)
        .transpose();

    let (dsn, dsn_error) = match dsn {
        Ok(dsn) => (dsn, None),
        Err(e) => (None, Some(e)),
    };

    let guard = sentry::init(sentry::ClientOptions {
        dsn,
        debug: config.debug_mode,
        release: sentry::release_name!(),
        ..Default::default()
    });

    let sentry_layer = sentry_tracing::layer().event_filter(|meta| match *meta.level() {
        tracing::Level::ERROR | tracing::Level::WARN => EventFilter::Exception,
        _ => EventFilter::Ignore,
    });

    let registry = tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with(sentry_layer);

    if config.json_log {
        registry
            .with(tracing_subscriber::fmt::layer().json())
            .init();
    } else {
        registry.with(tracing_subscriber::fmt::layer()).init();
    }

    if let Some(e) = dsn_error {
        tracing::warn!(error = %e, "Ignoring invalid sentry DSN");
    }

    guard
}

impl ObservabilityConfig {
    pub fn from_envvar() -> Result<ObservabilityConfig, envy::Error> {
        envy::from_env()
    }
}
