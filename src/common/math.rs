//! Window math over close-price slices.
//!
//! Every function here reads the tail of the slice and returns `None` when
//! the slice is shorter than the requested window.

/// Normalized decay kernel: `exp(linspace(-1, 0, period))` scaled to sum 1.
pub fn decay_kernel(period: usize) -> Vec<f64> {
    if period == 0 {
        return Vec::new();
    }
    if period == 1 {
        return vec![1.0];
    }

    let step = 1.0 / (period - 1) as f64;
    let raw: Vec<f64> = (0..period)
        .map(|i| (-1.0 + i as f64 * step).exp())
        .collect();
    let total: f64 = raw.iter().sum();
    raw.into_iter().map(|w| w / total).collect()
}

/// Valid-mode discrete convolution of `values` with `kernel`.
///
/// Output length is `values.len() - kernel.len() + 1`; the kernel is
/// reversed over each window, so `kernel[0]` lands on the newest value.
pub fn convolve_valid(values: &[f64], kernel: &[f64]) -> Option<Vec<f64>> {
    let k = kernel.len();
    if k == 0 || values.len() < k {
        return None;
    }

    let out = values
        .windows(k)
        .map(|window| {
            kernel
                .iter()
                .enumerate()
                .map(|(j, w)| w * window[k - 1 - j])
                .sum::<f64>()
        })
        .collect();
    Some(out)
}

/// Simple mean of the last `period` values.
pub fn sma(values: &[f64], period: usize) -> Option<f64> {
    if period == 0 || values.len() < period {
        return None;
    }
    let window = &values[values.len() - period..];
    Some(window.iter().sum::<f64>() / period as f64)
}

/// Population standard deviation of the last `period` values.
pub fn standard_deviation(values: &[f64], period: usize) -> Option<f64> {
    let mean = sma(values, period)?;
    let window = &values[values.len() - period..];
    let variance = window.iter().map(|v| (v - mean).powi(2)).sum::<f64>() / period as f64;
    Some(variance.sqrt())
}

/// Successive differences `values[i] - values[i - 1]`.
pub fn deltas(values: &[f64]) -> Vec<f64> {
    values.windows(2).map(|w| w[1] - w[0]).collect()
}

/// Round to `decimals` places.
pub fn round_to(value: f64, decimals: u32) -> f64 {
    let factor = 10f64.powi(decimals as i32);
    (value * factor).round() / factor
}
