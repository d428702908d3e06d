use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{fmt, EnvFilter};

use super::TracingConfig;

const DEFAULT_FILTER: &str = "info,yaad=debug,tower_http=debug";

/// Installs the global tracing subscriber. `RUST_LOG` overrides the default
/// filter; JSON output is meant for deployed environments, the plain format
/// for local work.
pub fn init_tracing(config: TracingConfig, port: u16) {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER));

    let registry = tracing_subscriber::registry().with(filter);

    if config.json_format {
        registry
            .with(fmt::layer().json().with_target(true))
            .init();
    } else {
        registry
            .with(fmt::layer().compact().with_target(true))
            .init();
    }

    tracing::info!(
        environment = %config.environment,
        port,
        json = config.json_format,
        "Tracing initialized"
    );
}
