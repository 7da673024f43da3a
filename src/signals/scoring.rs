//! Composite 0-100 score over trend, momentum, volatility and confluence.

use crate::common::math::round_to;
use crate::config::StrategyConfig;
use crate::models::signal::{Direction, ScoredSymbol};
use crate::signals::categories::{ComponentWeights, ScoreComponent};
use crate::signals::confluence::{confluence, ClassificationRules, ConfluenceReport, TimeframeReading};

/// Per-component counts behind a score.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScoreBreakdown {
    pub timeframes: usize,
    pub trend: usize,
    pub momentum: usize,
    pub volatility: usize,
    pub confluence: Direction,
    pub score: f64,
}

impl ScoreBreakdown {
    /// Points earned by one component.
    pub fn component(&self, component: ScoreComponent) -> f64 {
        let t = self.timeframes.max(1) as f64;
        let weight = ComponentWeights::get(component);
        match component {
            ScoreComponent::Trend => self.trend as f64 / t * weight,
            ScoreComponent::Momentum => self.momentum as f64 / t * weight,
            ScoreComponent::Volatility => self.volatility as f64 / t * weight,
            ScoreComponent::Confluence => {
                if self.confluence.is_directional() {
                    weight
                } else {
                    0.0
                }
            }
        }
    }
}

#[derive(Debug, Clone, Copy)]
pub struct ScoringEngine {
    rules: ClassificationRules,
    volatility_threshold: f64,
}

impl ScoringEngine {
    pub fn new(rules: ClassificationRules, volatility_threshold: f64) -> Self {
        Self {
            rules,
            volatility_threshold,
        }
    }

    pub fn from_strategy(strategy: &StrategyConfig) -> Self {
        Self::new(ClassificationRules::from(strategy), strategy.volatility_threshold)
    }

    pub fn breakdown(&self, readings: &[TimeframeReading]) -> ScoreBreakdown {
        let mut trend = 0;
        let mut momentum = 0;
        let mut volatility = 0;

        for reading in readings {
            let set = &reading.indicators;
            if set.ema9() > set.ema21() {
                trend += 1;
            }
            if self.rules.rsi_in_band(set.rsi.value) {
                momentum += 1;
            }
            if set.price > 0.0
                && (set.price - set.bollinger_mid()).abs() / set.price < self.volatility_threshold
            {
                volatility += 1;
            }
        }

        let mut breakdown = ScoreBreakdown {
            timeframes: readings.len(),
            trend,
            momentum,
            volatility,
            confluence: confluence(readings.iter().map(|r| r.direction)),
            score: 0.0,
        };

        if !readings.is_empty() {
            let raw: f64 = [
                ScoreComponent::Trend,
                ScoreComponent::Momentum,
                ScoreComponent::Volatility,
                ScoreComponent::Confluence,
            ]
            .into_iter()
            .map(|c| breakdown.component(c))
            .sum();
            breakdown.score = round_to(raw.clamp(0.0, 100.0), 2);
        }

        breakdown
    }

    pub fn score(&self, report: &ConfluenceReport) -> ScoredSymbol {
        let breakdown = self.breakdown(&report.readings);
        ScoredSymbol {
            symbol: report.symbol.clone(),
            score: breakdown.score,
            direction: breakdown.confluence,
            price: report.price,
        }
    }
}
