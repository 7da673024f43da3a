//! Paper-trade state machine: one simulated position per symbol.

use chrono::{DateTime, Utc};
use std::collections::HashMap;
use thiserror::Error;

use crate::config::TradingConfig;
use crate::models::signal::{Direction, Signal};
use crate::models::trade::{Trade, TradeOutcome, TradeResult};

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TradeError {
    #[error("a trade is already open for {0}")]
    AlreadyOpen(String),
    #[error("cannot open a trade for {0} without a direction")]
    NeutralDirection(String),
}

/// Stop and take levels for an entry.
pub fn exit_levels(direction: Direction, entry: f64, stop_pct: f64, take_pct: f64) -> (f64, f64) {
    match direction {
        Direction::Short => (entry * (1.0 + stop_pct), entry * (1.0 - take_pct)),
        _ => (entry * (1.0 - stop_pct), entry * (1.0 + take_pct)),
    }
}

/// Signed percent move from entry to exit in the trade's favour.
pub fn pnl_percent(direction: Direction, entry: f64, exit: f64) -> f64 {
    match direction {
        Direction::Short => (entry - exit) / entry * 100.0,
        _ => (exit - entry) / entry * 100.0,
    }
}

/// Outcome triggered by `price`, if any. Stop is checked first.
pub fn check_exit(trade: &Trade, price: f64) -> Option<TradeOutcome> {
    match trade.direction {
        Direction::Long => {
            if price <= trade.stop_price {
                Some(TradeOutcome::Stop)
            } else if price >= trade.take_price {
                Some(TradeOutcome::Take)
            } else {
                None
            }
        }
        Direction::Short => {
            if price >= trade.stop_price {
                Some(TradeOutcome::Stop)
            } else if price <= trade.take_price {
                Some(TradeOutcome::Take)
            } else {
                None
            }
        }
        Direction::Neutral => None,
    }
}

#[derive(Debug)]
pub struct TradeLifecycleManager {
    stop_pct: f64,
    take_pct: f64,
    open_trades: HashMap<String, Trade>,
}

impl TradeLifecycleManager {
    pub fn new(stop_pct: f64, take_pct: f64) -> Self {
        Self {
            stop_pct,
            take_pct,
            open_trades: HashMap::new(),
        }
    }

    pub fn is_open(&self, symbol: &str) -> bool {
        self.open_trades.contains_key(symbol)
    }

    pub fn open_trade(&self, symbol: &str) -> Option<&Trade> {
        self.open_trades.get(symbol)
    }

    /// Open trades sorted by symbol.
    pub fn open_trades(&self) -> Vec<Trade> {
        let mut trades: Vec<Trade> = self.open_trades.values().cloned().collect();
        trades.sort_by(|a, b| a.symbol.cmp(&b.symbol));
        trades
    }

    pub fn open_count(&self) -> usize {
        self.open_trades.len()
    }

    /// CLOSED -> OPEN at the signal price.
    pub fn open(&mut self, signal: &Signal, now: DateTime<Utc>) -> Result<Trade, TradeError> {
        if !signal.direction.is_directional() {
            return Err(TradeError::NeutralDirection(signal.symbol.clone()));
        }
        if self.is_open(&signal.symbol) {
            return Err(TradeError::AlreadyOpen(signal.symbol.clone()));
        }

        let (stop_price, take_price) =
            exit_levels(signal.direction, signal.price, self.stop_pct, self.take_pct);
        let trade = Trade {
            symbol: signal.symbol.clone(),
            direction: signal.direction,
            entry_price: signal.price,
            stop_price,
            take_price,
            opened_at: now,
        };

        self.open_trades.insert(trade.symbol.clone(), trade.clone());
        Ok(trade)
    }

    /// OPEN -> OPEN while price stays between the levels, OPEN -> CLOSED once
    /// it crosses one. No-op for a symbol without a trade.
    pub fn monitor(&mut self, symbol: &str, price: f64, now: DateTime<Utc>) -> Option<TradeResult> {
        let outcome = check_exit(self.open_trades.get(symbol)?, price)?;
        let trade = self.open_trades.remove(symbol)?;

        Some(TradeResult {
            symbol: trade.symbol,
            direction: trade.direction,
            outcome,
            entry_price: trade.entry_price,
            exit_price: price,
            pnl_percent: pnl_percent(trade.direction, trade.entry_price, price),
            closed_at: now,
        })
    }
}

impl From<&TradingConfig> for TradeLifecycleManager {
    fn from(config: &TradingConfig) -> Self {
        Self::new(config.stop_pct, config.take_pct)
    }
}
