use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::models::signal::ScoredSymbol;
use crate::models::trade::Trade;

/// Read-only view published by the polling loop once per cycle.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DashboardSnapshot {
    pub status: String,
    pub cycle: u64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<DateTime<Utc>>,
    pub ranking: Vec<ScoredSymbol>,
    pub trades: Vec<Trade>,
}

impl Default for DashboardSnapshot {
    fn default() -> Self {
        Self {
            status: "starting".to_string(),
            cycle: 0,
            updated_at: None,
            ranking: Vec::new(),
            trades: Vec::new(),
        }
    }
}
