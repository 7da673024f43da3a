use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum IndicatorError {
    #[error("insufficient data: {indicator} needs {required} closes, got {available}")]
    InsufficientData {
        indicator: &'static str,
        required: usize,
        available: usize,
    },
}

impl IndicatorError {
    pub(crate) fn insufficient(indicator: &'static str, required: usize, available: usize) -> Self {
        Self::InsufficientData {
            indicator,
            required,
            available,
        }
    }
}
