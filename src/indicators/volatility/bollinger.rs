//! Bollinger Bands indicator

use crate::common::math;
use crate::indicators::error::IndicatorError;
use crate::models::indicators::BollingerBandsIndicator;

pub const DEFAULT_BOLLINGER_PERIOD: u32 = 20;
pub const DEFAULT_BOLLINGER_STD_DEV: f64 = 2.0;

/// Middle band only: simple mean of the last `period` closes.
pub fn calculate_bollinger_mid(closes: &[f64], period: u32) -> Result<f64, IndicatorError> {
    math::sma(closes, period as usize)
        .ok_or_else(|| IndicatorError::insufficient("bollinger", (period as usize).max(1), closes.len()))
}

/// Calculate Bollinger Bands
///
/// Middle Band = SMA(period)
/// Upper Band = Middle + (std_dev * standard deviation)
/// Lower Band = Middle - (std_dev * standard deviation)
pub fn calculate_bollinger_bands(
    closes: &[f64],
    period: u32,
    std_dev: f64,
) -> Result<BollingerBandsIndicator, IndicatorError> {
    let middle = calculate_bollinger_mid(closes, period)?;
    let std = math::standard_deviation(closes, period as usize)
        .ok_or_else(|| IndicatorError::insufficient("bollinger", period as usize, closes.len()))?;

    Ok(BollingerBandsIndicator {
        upper: middle + (std_dev * std),
        middle,
        lower: middle - (std_dev * std),
        period,
        std_dev,
    })
}

/// Calculate Bollinger Bands with default parameters (20 SMA, 2σ)
pub fn calculate_bollinger_bands_default(
    closes: &[f64],
) -> Result<BollingerBandsIndicator, IndicatorError> {
    calculate_bollinger_bands(closes, DEFAULT_BOLLINGER_PERIOD, DEFAULT_BOLLINGER_STD_DEV)
}
