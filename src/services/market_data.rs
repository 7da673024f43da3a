//! Market data provider interface.

use async_trait::async_trait;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum MarketDataError {
    #[error("market data request failed: {0}")]
    Http(#[from] reqwest::Error),
    #[error("market data request returned status {status}: {body}")]
    Status { status: u16, body: String },
    #[error("malformed market data payload: {0}")]
    Malformed(String),
}

#[async_trait]
pub trait MarketDataProvider: Send + Sync {
    /// Closing prices for `symbol` on `interval`, oldest first.
    ///
    /// The last element may belong to a candle that has not closed yet.
    async fn fetch_closes(
        &self,
        symbol: &str,
        interval: &str,
        limit: usize,
    ) -> Result<Vec<f64>, MarketDataError>;

    /// Latest close on `interval`.
    async fn latest_price(&self, symbol: &str, interval: &str) -> Result<f64, MarketDataError> {
        let closes = self.fetch_closes(symbol, interval, 1).await?;
        closes
            .last()
            .copied()
            .ok_or_else(|| MarketDataError::Malformed(format!("no candles for {}", symbol)))
    }
}
