//! Binance spot klines client

use async_trait::async_trait;
use serde_json::Value;
use std::time::Duration;
use tracing::debug;

use crate::services::market_data::{MarketDataError, MarketDataProvider};

const KLINES_PATH: &str = "/api/v3/klines";
const CLOSE_INDEX: usize = 4;

pub struct BinanceMarketDataProvider {
    base_url: String,
    client: reqwest::Client,
}

impl BinanceMarketDataProvider {
    pub fn new(base_url: impl Into<String>, timeout: Duration) -> Result<Self, MarketDataError> {
        let client = reqwest::Client::builder().timeout(timeout).build()?;
        Ok(Self::with_client(base_url, client))
    }

    pub fn with_client(base_url: impl Into<String>, client: reqwest::Client) -> Self {
        Self {
            base_url: base_url.into().trim_end_matches('/').to_string(),
            client,
        }
    }

    fn klines_url(&self) -> String {
        format!("{}{}", self.base_url, KLINES_PATH)
    }
}

/// Extract close prices from a klines payload: an array of arrays where
/// index 4 holds the close, encoded as a string.
pub fn parse_closes(payload: &Value) -> Result<Vec<f64>, MarketDataError> {
    let rows = payload
        .as_array()
        .ok_or_else(|| MarketDataError::Malformed("expected an array of klines".into()))?;

    rows.iter()
        .enumerate()
        .map(|(i, row)| {
            let close = row
                .as_array()
                .and_then(|fields| fields.get(CLOSE_INDEX))
                .ok_or_else(|| MarketDataError::Malformed(format!("kline {} has no close", i)))?;

            let value = match close {
                Value::String(s) => s.parse::<f64>().ok(),
                Value::Number(n) => n.as_f64(),
                _ => None,
            };

            value
                .filter(|v| v.is_finite())
                .ok_or_else(|| MarketDataError::Malformed(format!("kline {} close is not a number", i)))
        })
        .collect()
}

#[async_trait]
impl MarketDataProvider for BinanceMarketDataProvider {
    async fn fetch_closes(
        &self,
        symbol: &str,
        interval: &str,
        limit: usize,
    ) -> Result<Vec<f64>, MarketDataError> {
        let limit = limit.to_string();
        let response = self
            .client
            .get(self.klines_url())
            .query(&[("symbol", symbol), ("interval", interval), ("limit", limit.as_str())])
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(MarketDataError::Status {
                status: status.as_u16(),
                body,
            });
        }

        let payload: Value = response.json().await?;
        let closes = parse_closes(&payload)?;

        debug!(
            symbol = %symbol,
            interval = %interval,
            count = closes.len(),
            "Fetched {} closes for {} {}",
            closes.len(),
            symbol,
            interval
        );

        Ok(closes)
    }
}
