use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Direction {
    Long,
    Short,
    Neutral,
}

impl Direction {
    pub fn is_directional(self) -> bool {
        !matches!(self, Direction::Neutral)
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Direction::Long => "LONG",
            Direction::Short => "SHORT",
            Direction::Neutral => "NEUTRAL",
        }
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A confirmed directional bias for one symbol.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Signal {
    pub symbol: String,
    pub direction: Direction,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub score: Option<f64>,
    pub price: f64,
    pub timestamp: DateTime<Utc>,
}

impl Signal {
    pub fn new(symbol: impl Into<String>, direction: Direction, price: f64) -> Self {
        Self {
            symbol: symbol.into(),
            direction,
            score: None,
            price,
            timestamp: Utc::now(),
        }
    }

    pub fn with_score(mut self, score: f64) -> Self {
        self.score = Some(score);
        self
    }
}

/// Composite score for one symbol, the unit ranked each cycle.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoredSymbol {
    pub symbol: String,
    pub score: f64,
    pub direction: Direction,
    pub price: f64,
}

impl ScoredSymbol {
    pub fn to_signal(&self) -> Signal {
        Signal::new(self.symbol.clone(), self.direction, self.price).with_score(self.score)
    }
}
