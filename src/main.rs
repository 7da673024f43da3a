//! Stonks Signal Server
//!
//! Runs the multi-timeframe polling loop and the health/dashboard server
//! side by side until ctrl-c.

use dotenvy::dotenv;
use std::sync::Arc;
use std::time::Duration;
use stonks_signals::config::{get_environment, Config, Secrets};
use stonks_signals::core::http::{start_server, AppState};
use stonks_signals::core::runtime::{supervise, SignalRuntime};
use stonks_signals::logging;
use stonks_signals::metrics::Metrics;
use stonks_signals::services::{
    BinanceMarketDataProvider, DiscordNotifier, MarketDataProvider, Notifier, NotifierSet,
    TelegramNotifier,
};
use tokio::signal;
use tracing::{error, info};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Load environment variables from .env if present
    dotenv().ok();
    logging::init_logging();

    let config = Config::load().map_err(|e| {
        error!(error = %e, "Invalid configuration, refusing to start");
        e
    })?;
    let secrets = Secrets::from_env();
    let timeout = Duration::from_secs(config.request_timeout_secs);

    info!("Starting Stonks Signal Server");
    info!(environment = %get_environment(), "Environment");
    info!(port = secrets.port, "HTTP Server: http://0.0.0.0:{}", secrets.port);

    let metrics = Arc::new(Metrics::new()?);

    let provider: Arc<dyn MarketDataProvider> = Arc::new(BinanceMarketDataProvider::new(
        config.market_data.base_url.clone(),
        timeout,
    )?);

    let notifiers = NotifierSet::new()
        .with_metrics(metrics.clone())
        .with_optional(
            TelegramNotifier::from_secrets(&secrets, timeout).map(|n| Arc::new(n) as Arc<dyn Notifier>),
        )
        .with_optional(
            DiscordNotifier::from_secrets(&secrets, timeout).map(|n| Arc::new(n) as Arc<dyn Notifier>),
        );
    info!(channels = notifiers.len(), "Notification channels ready");

    let runtime = SignalRuntime::new(config, provider, notifiers).with_metrics(metrics.clone());
    let state = AppState::new(metrics, runtime.snapshot());

    let port = secrets.port;
    let server = async move {
        if let Err(e) = start_server(port, state).await {
            error!(error = %e, "HTTP server error");
        }
    };
    let shutdown = async {
        if let Err(e) = signal::ctrl_c().await {
            error!(error = %e, "Failed to listen for ctrl-c");
            std::future::pending::<()>().await;
        }
    };

    supervise(runtime, server, shutdown).await?;
    info!("Stopped");

    Ok(())
}
