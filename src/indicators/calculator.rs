//! Computes the full indicator set for one timeframe series.

use chrono::Utc;
use serde::{Deserialize, Serialize};

use crate::indicators::error::IndicatorError;
use crate::indicators::momentum::rsi::calculate_rsi;
use crate::indicators::trend::ema::calculate_ema;
use crate::indicators::volatility::bollinger::calculate_bollinger_bands;
use crate::models::indicators::IndicatorSet;

/// Lookback periods used for every timeframe.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct IndicatorParams {
    pub ema_fast: u32,
    pub ema_slow: u32,
    pub rsi_period: u32,
    pub bollinger_period: u32,
    pub bollinger_std_dev: f64,
}

impl Default for IndicatorParams {
    fn default() -> Self {
        Self {
            ema_fast: 9,
            ema_slow: 21,
            rsi_period: 14,
            bollinger_period: 20,
            bollinger_std_dev: 2.0,
        }
    }
}

impl IndicatorParams {
    /// Minimum series length that satisfies every lookback.
    pub fn min_closes(&self) -> usize {
        [
            self.ema_fast as usize,
            self.ema_slow as usize,
            self.rsi_period as usize + 1,
            self.bollinger_period as usize,
        ]
        .into_iter()
        .max()
        .unwrap_or(0)
    }
}

pub fn compute_indicator_set(
    timeframe: &str,
    closes: &[f64],
    params: &IndicatorParams,
) -> Result<IndicatorSet, IndicatorError> {
    let ema_fast = calculate_ema(closes, params.ema_fast)?;
    let ema_slow = calculate_ema(closes, params.ema_slow)?;
    let rsi = calculate_rsi(closes, params.rsi_period)?;
    let bollinger =
        calculate_bollinger_bands(closes, params.bollinger_period, params.bollinger_std_dev)?;

    // Non-empty here: every calculation above needs at least one close.
    let price = closes[closes.len() - 1];

    Ok(IndicatorSet {
        timeframe: timeframe.to_string(),
        price,
        ema_fast,
        ema_slow,
        rsi,
        bollinger,
        timestamp: Utc::now(),
    })
}
