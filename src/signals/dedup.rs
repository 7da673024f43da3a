//! Suppresses repeated alerts for an unchanged direction.

use std::collections::HashMap;

use crate::models::signal::Direction;

/// Last emitted direction per symbol, kept for the process lifetime.
#[derive(Debug, Default)]
pub struct SignalDeduplicator {
    last_signal: HashMap<String, Direction>,
}

impl SignalDeduplicator {
    pub fn new() -> Self {
        Self::default()
    }

    /// True when `direction` differs from the last emitted one; records it.
    ///
    /// NEUTRAL is never emitted and leaves the record untouched.
    pub fn should_emit(&mut self, symbol: &str, direction: Direction) -> bool {
        if !direction.is_directional() {
            return false;
        }
        if self.last_signal.get(symbol) == Some(&direction) {
            return false;
        }
        self.last_signal.insert(symbol.to_string(), direction);
        true
    }

    pub fn last(&self, symbol: &str) -> Option<Direction> {
        self.last_signal.get(symbol).copied()
    }
}
