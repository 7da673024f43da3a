//! Shared data models spanning the engine layers.

pub mod dashboard;
pub mod indicators;
pub mod signal;
pub mod trade;

pub use dashboard::DashboardSnapshot;
pub use indicators::{BollingerBandsIndicator, EmaIndicator, IndicatorSet, RsiIndicator};
pub use signal::{Direction, ScoredSymbol, Signal};
pub use trade::{Trade, TradeOutcome, TradeResult};
