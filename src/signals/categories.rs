//! Score components and their weights

/// Parts of the composite score.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ScoreComponent {
    Trend,
    Momentum,
    Volatility,
    Confluence,
}

/// Points each component contributes at full credit.
pub struct ComponentWeights;

impl ComponentWeights {
    pub const TREND: f64 = 30.0;
    pub const MOMENTUM: f64 = 30.0;
    pub const VOLATILITY: f64 = 20.0;
    pub const CONFLUENCE: f64 = 20.0;

    pub fn get(component: ScoreComponent) -> f64 {
        match component {
            ScoreComponent::Trend => Self::TREND,
            ScoreComponent::Momentum => Self::MOMENTUM,
            ScoreComponent::Volatility => Self::VOLATILITY,
            ScoreComponent::Confluence => Self::CONFLUENCE,
        }
    }

    /// Verify weights sum to 100 points
    pub fn verify() -> bool {
        (Self::TREND + Self::MOMENTUM + Self::VOLATILITY + Self::CONFLUENCE - 100.0).abs() < 0.001
    }
}
