mod coingecko;

pub use coingecko::CoinGeckoClient;

use crate::error::Result;
use async_trait::async_trait;

/// Seam between the tracker and whatever serves prices. The production
/// implementation is [`CoinGeckoClient`]; tests substitute scripted sources.
#[async_trait]
pub trait PriceSource: Send + Sync {
    async fn fetch_price(&self) -> Result<f64>;
}
