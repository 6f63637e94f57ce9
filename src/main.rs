use std::sync::Arc;
use std::time::Duration;

use liqroute::arbitrage::ArbitrageMonitor;
use liqroute::collector::MetricsCollector;
use liqroute::config::Config;
use tokio::signal;
use tracing::info;

#[tokio::main]
async fn main() {
    let _ = dotenvy::dotenv();

    let config = match Config::load("config.toml") {
        Ok(c) => c,
        Err(e) => {
            eprintln!("Failed to load config: {e}");
            std::process::exit(1);
        }
    };

    config.init_logging();
    info!("liqroute starting");

    let registry = match config.build_registry() {
        Ok(r) => Arc::new(r),
        Err(e) => {
            eprintln!("Failed to wire venues: {e}");
            std::process::exit(1);
        }
    };
    info!(venues = registry.len(), "venue registry built");

    let collector = MetricsCollector::new(registry.clone(), config.collector_config());

    let monitor = ArbitrageMonitor::new(
        collector,
        config.analyzer(),
        config.market.symbol.clone(),
        Duration::from_secs(config.arbitrage.scan_interval_secs),
    );

    tokio::select! {
        _ = monitor.run() => {}
        _ = signal::ctrl_c() => {
            info!("Shutdown signal received");
        }
    }

    info!("liqroute stopped");
}
