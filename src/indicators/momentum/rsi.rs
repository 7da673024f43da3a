//! RSI (Relative Strength Index) indicator

use crate::common::math;
use crate::indicators::error::IndicatorError;
use crate::models::indicators::RsiIndicator;

pub const DEFAULT_RSI_PERIOD: u32 = 14;

/// Calculate RSI indicator
///
/// RSI = 100 - (100 / (1 + RS))
/// RS = Average Gain / Average Loss, both averaged over the last `period` deltas
pub fn calculate_rsi(closes: &[f64], period: u32) -> Result<RsiIndicator, IndicatorError> {
    let window = period as usize;
    if window == 0 || closes.len() < window + 1 {
        return Err(IndicatorError::insufficient("rsi", window + 1, closes.len()));
    }

    let deltas = math::deltas(closes);
    let recent = &deltas[deltas.len() - window..];

    let avg_gain = recent.iter().map(|d| d.max(0.0)).sum::<f64>() / window as f64;
    let avg_loss = recent.iter().map(|d| (-d).max(0.0)).sum::<f64>() / window as f64;

    if avg_loss == 0.0 {
        return Ok(RsiIndicator {
            value: 100.0,
            period,
        });
    }

    let rs = avg_gain / avg_loss;
    let rsi = 100.0 - (100.0 / (1.0 + rs));

    Ok(RsiIndicator { value: rsi, period })
}

/// Calculate RSI with default period (14)
pub fn calculate_rsi_default(closes: &[f64]) -> Result<RsiIndicator, IndicatorError> {
    calculate_rsi(closes, DEFAULT_RSI_PERIOD)
}
