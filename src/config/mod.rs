use crate::error::{Result, TrackerError};
use std::env;

#[derive(Debug, Clone)]
pub struct Config {
    pub poll_interval_ms: u64,
    pub coingecko_base_url: String,
    pub asset_id: String,
    pub vs_currency: String,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        let poll_interval_ms = env::var("POLL_INTERVAL_MS")
            .unwrap_or_else(|_| "60000".to_string())
            .parse::<u64>()
            .map_err(|_| TrackerError::ConfigError("Invalid POLL_INTERVAL_MS".to_string()))?;

        if poll_interval_ms == 0 {
            return Err(TrackerError::ConfigError(
                "POLL_INTERVAL_MS must be greater than zero".to_string(),
            ));
        }

        Ok(Self {
            poll_interval_ms,
            coingecko_base_url: env::var("COINGECKO_BASE_URL")
                .unwrap_or_else(|_| "https://api.coingecko.com/api/v3".to_string()),
            asset_id: env::var("ASSET_ID").unwrap_or_else(|_| "bitcoin".to_string()),
            vs_currency: env::var("VS_CURRENCY").unwrap_or_else(|_| "usd".to_string()),
        })
    }
}
