use bitcoin_tracker::api::CoinGeckoClient;
use bitcoin_tracker::config::Config;
use bitcoin_tracker::error::Result;
use bitcoin_tracker::tracker::PriceTracker;
use dotenv::dotenv;
use std::sync::Arc;
use tracing::{error, info};

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize logging
    tracing_subscriber::fmt::init();

    // Load environment variables
    dotenv().ok();

    // Load configuration
    let config = Config::from_env()?;

    let client = CoinGeckoClient::new(config.clone());
    let mut tracker = PriceTracker::new(Arc::new(client), config);

    let output = tracker.render();
    info!("{}", output.heading);
    info!("{}", output.body);

    tracker.activate();

    if let Err(e) = tokio::signal::ctrl_c().await {
        error!("Failed to listen for shutdown signal: {}", e);
    }

    tracker.deactivate();
    Ok(())
}
