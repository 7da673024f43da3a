//! Top-K selection over scored symbols.

use std::cmp::Ordering;

use crate::config::RankingConfig;
use crate::models::signal::ScoredSymbol;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RankingSelector {
    top_k: usize,
    min_score: f64,
}

impl RankingSelector {
    pub fn new(top_k: usize, min_score: f64) -> Self {
        Self { top_k, min_score }
    }

    /// Descending by score; equal scores keep their input order.
    pub fn rank(&self, mut scored: Vec<ScoredSymbol>) -> Vec<ScoredSymbol> {
        // sort_by is stable
        scored.sort_by(|a, b| b.score.partial_cmp(&a.score).unwrap_or(Ordering::Equal));
        scored
    }

    /// Top K of the ranking, then drop low scores and neutral entries.
    pub fn select(&self, scored: Vec<ScoredSymbol>) -> Vec<ScoredSymbol> {
        self.rank(scored)
            .into_iter()
            .take(self.top_k)
            .filter(|s| s.score >= self.min_score && s.direction.is_directional())
            .collect()
    }
}

impl From<&RankingConfig> for RankingSelector {
    fn from(config: &RankingConfig) -> Self {
        Self::new(config.top_k, config.min_score)
    }
}
