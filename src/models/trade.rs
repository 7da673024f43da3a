//! Paper-trade records.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::models::signal::Direction;

/// A simulated open position. At most one exists per symbol.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Trade {
    pub symbol: String,
    pub direction: Direction,
    pub entry_price: f64,
    pub stop_price: f64,
    pub take_price: f64,
    pub opened_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum TradeOutcome {
    Stop,
    Take,
}

impl fmt::Display for TradeOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TradeOutcome::Stop => f.write_str("STOP"),
            TradeOutcome::Take => f.write_str("TAKE"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TradeResult {
    pub symbol: String,
    pub direction: Direction,
    pub outcome: TradeOutcome,
    pub entry_price: f64,
    pub exit_price: f64,
    pub pnl_percent: f64,
    pub closed_at: DateTime<Utc>,
}
