pub mod calculator;
pub mod error;

pub mod momentum;
pub mod trend;
pub mod volatility;

pub use calculator::*;
pub use error::IndicatorError;
