use crate::api::PriceSource;
use crate::config::Config;
use crate::error::{Result, TrackerError};
use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use std::collections::HashMap;
use tracing::debug;

/// Response shape of the CoinGecko simple-price endpoint:
/// `{"bitcoin":{"usd":67123.0}}`, keyed by asset id then quote currency.
#[derive(Debug, Deserialize)]
struct SimplePriceResponse(HashMap<String, HashMap<String, f64>>);

#[derive(Clone)]
pub struct CoinGeckoClient {
    client: Client,
    config: Config,
}

impl CoinGeckoClient {
    pub fn new(config: Config) -> Self {
        Self {
            client: Client::new(),
            config,
        }
    }

    pub async fn fetch_simple_price(&self) -> Result<f64> {
        let url = format!(
            "{}/simple/price?ids={}&vs_currencies={}",
            self.config.coingecko_base_url, self.config.asset_id, self.config.vs_currency
        );

        debug!("Fetching {} price from CoinGecko: {}", self.config.asset_id, url);

        let response = self.client.get(&url).send().await?;

        if !response.status().is_success() {
            return Err(TrackerError::ApiError {
                status: response.status().as_u16(),
                message: format!("CoinGecko API returned status: {}", response.status()),
            });
        }

        let text = response.text().await?;
        parse_simple_price(&text, &self.config.asset_id, &self.config.vs_currency)
    }
}

fn parse_simple_price(text: &str, asset_id: &str, vs_currency: &str) -> Result<f64> {
    let prices: SimplePriceResponse = serde_json::from_str(text)?;

    prices
        .0
        .get(asset_id)
        .and_then(|quotes| quotes.get(vs_currency))
        .copied()
        .ok_or_else(|| TrackerError::InvalidPriceData {
            message: format!("response missing {}.{} field", asset_id, vs_currency),
        })
}

#[async_trait]
impl PriceSource for CoinGeckoClient {
    async fn fetch_price(&self) -> Result<f64> {
        self.fetch_simple_price().await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_expected_response_shape() {
        let price = parse_simple_price(r#"{"bitcoin":{"usd":12345.6}}"#, "bitcoin", "usd");
        assert_eq!(price.unwrap(), 12345.6);
    }

    #[test]
    fn rejects_response_missing_asset() {
        let err = parse_simple_price(r#"{"ethereum":{"usd":3100.0}}"#, "bitcoin", "usd");
        assert!(matches!(err, Err(TrackerError::InvalidPriceData { .. })));
    }

    #[test]
    fn rejects_response_missing_currency() {
        let err = parse_simple_price(r#"{"bitcoin":{"eur":61000.0}}"#, "bitcoin", "usd");
        assert!(matches!(err, Err(TrackerError::InvalidPriceData { .. })));
    }

    #[test]
    fn rejects_malformed_payload() {
        let err = parse_simple_price(r#"{"bitcoin":"not-an-object"}"#, "bitcoin", "usd");
        assert!(matches!(err, Err(TrackerError::JsonError(_))));
    }
}
