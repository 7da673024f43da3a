use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct EmaIndicator {
    pub value: f64,
    pub period: u32,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RsiIndicator {
    pub value: f64,
    pub period: u32,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BollingerBandsIndicator {
    pub upper: f64,
    pub middle: f64,
    pub lower: f64,
    pub period: u32,
    pub std_dev: f64,
}

/// Indicator values for one (symbol, timeframe) pair at one point in time.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IndicatorSet {
    pub timeframe: String,
    /// Last close of the series.
    pub price: f64,
    pub ema_fast: EmaIndicator,
    pub ema_slow: EmaIndicator,
    pub rsi: RsiIndicator,
    pub bollinger: BollingerBandsIndicator,
    pub timestamp: DateTime<Utc>,
}

impl IndicatorSet {
    pub fn ema9(&self) -> f64 {
        self.ema_fast.value
    }

    pub fn ema21(&self) -> f64 {
        self.ema_slow.value
    }

    pub fn bollinger_mid(&self) -> f64 {
        self.bollinger.middle
    }
}
