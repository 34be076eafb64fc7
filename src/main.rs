//! `daylist` server entry point.

use daylist::config::Config;
use daylist::server;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    // Startup failures are fatal: no degraded mode.
    let config = match Config::load() {
        Ok(config) => config,
        Err(e) => {
            tracing::error!("failed to load configuration: {e}");
            std::process::exit(1);
        }
    };

    if let Err(e) = server::serve(config).await {
        tracing::error!("server error: {e}");
        std::process::exit(1);
    }
}
