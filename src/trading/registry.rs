//! Owner of the per-symbol signal and trade state.

use chrono::{DateTime, Utc};

use crate::models::signal::{Direction, Signal};
use crate::models::trade::{Trade, TradeResult};
use crate::signals::dedup::SignalDeduplicator;
use crate::trading::lifecycle::{TradeError, TradeLifecycleManager};

/// What happened to a confirmed signal.
#[derive(Debug, Clone, PartialEq)]
pub enum Confirmation {
    /// Same direction as the last alert for the symbol.
    Suppressed,
    /// New alert, no paper trade.
    Emitted,
    /// New alert and a freshly opened paper trade.
    Opened(Trade),
}

/// Holds the last-signal map and the open-trades map; the polling loop is
/// its only writer.
#[derive(Debug)]
pub struct TradeRegistry {
    dedup: SignalDeduplicator,
    trades: TradeLifecycleManager,
    paper_trading: bool,
}

impl TradeRegistry {
    pub fn new(trades: TradeLifecycleManager, paper_trading: bool) -> Self {
        Self {
            dedup: SignalDeduplicator::new(),
            trades,
            paper_trading,
        }
    }

    pub fn paper_trading(&self) -> bool {
        self.paper_trading
    }

    pub fn is_open(&self, symbol: &str) -> bool {
        self.trades.is_open(symbol)
    }

    pub fn last_signal(&self, symbol: &str) -> Option<Direction> {
        self.dedup.last(symbol)
    }

    pub fn open_trades(&self) -> Vec<Trade> {
        self.trades.open_trades()
    }

    pub fn open_count(&self) -> usize {
        self.trades.open_count()
    }

    /// Run a confirmed signal through deduplication and, when paper trading,
    /// open a position.
    ///
    /// A symbol with an open trade is rejected before the deduplicator sees
    /// the signal, so its record is left as it was.
    pub fn confirm(&mut self, signal: &Signal, now: DateTime<Utc>) -> Result<Confirmation, TradeError> {
        if self.paper_trading && self.trades.is_open(&signal.symbol) {
            return Err(TradeError::AlreadyOpen(signal.symbol.clone()));
        }
        if !signal.direction.is_directional() {
            return Err(TradeError::NeutralDirection(signal.symbol.clone()));
        }
        if !self.dedup.should_emit(&signal.symbol, signal.direction) {
            return Ok(Confirmation::Suppressed);
        }
        if !self.paper_trading {
            return Ok(Confirmation::Emitted);
        }

        let trade = self.trades.open(signal, now)?;
        Ok(Confirmation::Opened(trade))
    }

    pub fn monitor(&mut self, symbol: &str, price: f64, now: DateTime<Utc>) -> Option<TradeResult> {
        self.trades.monitor(symbol, price, now)
    }
}
