//! EMA (Exponential Moving Average) indicator

use crate::common::math;
use crate::indicators::error::IndicatorError;
use crate::models::indicators::EmaIndicator;

/// Full EMA series in valid mode: `closes.len() - period + 1` values.
///
/// Weights come from `exp(linspace(-1, 0, period))` normalized to 1 and are
/// applied as a convolution over each window.
pub fn ema_series(closes: &[f64], period: u32) -> Result<Vec<f64>, IndicatorError> {
    let period = period as usize;
    let kernel = math::decay_kernel(period);
    math::convolve_valid(closes, &kernel)
        .ok_or_else(|| IndicatorError::insufficient("ema", period.max(1), closes.len()))
}

/// Calculate EMA for a specific period (last value of the series)
pub fn calculate_ema(closes: &[f64], period: u32) -> Result<EmaIndicator, IndicatorError> {
    let series = ema_series(closes, period)?;
    let value = series
        .last()
        .copied()
        .ok_or_else(|| IndicatorError::insufficient("ema", period as usize, closes.len()))?;

    Ok(EmaIndicator { value, period })
}

/// Check fast/slow EMA alignment: 1 bullish, -1 bearish, 0 flat.
pub fn check_ema_cross(closes: &[f64], fast_period: u32, slow_period: u32) -> Result<i32, IndicatorError> {
    let fast_ema = calculate_ema(closes, fast_period)?;
    let slow_ema = calculate_ema(closes, slow_period)?;

    if fast_ema.value > slow_ema.value {
        Ok(1)
    } else if fast_ema.value < slow_ema.value {
        Ok(-1)
    } else {
        Ok(0)
    }
}
