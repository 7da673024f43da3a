//! Per-timeframe direction classification and strict cross-timeframe agreement.

use std::sync::Arc;
use thiserror::Error;
use tracing::debug;

use crate::config::{Config, StrategyConfig};
use crate::indicators::{compute_indicator_set, IndicatorError, IndicatorParams};
use crate::models::indicators::IndicatorSet;
use crate::models::signal::Direction;
use crate::services::market_data::{MarketDataError, MarketDataProvider};

#[derive(Debug, Error)]
pub enum AnalysisError {
    #[error("{symbol} {timeframe}: {source}")]
    DataFetch {
        symbol: String,
        timeframe: String,
        #[source]
        source: MarketDataError,
    },
    #[error("{symbol} {timeframe}: {source}")]
    InsufficientData {
        symbol: String,
        timeframe: String,
        #[source]
        source: IndicatorError,
    },
}

/// Thresholds applied to a single timeframe.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ClassificationRules {
    pub rsi_min: f64,
    pub rsi_max: f64,
    pub strict_bollinger: bool,
}

impl Default for ClassificationRules {
    fn default() -> Self {
        Self {
            rsi_min: 40.0,
            rsi_max: 60.0,
            strict_bollinger: false,
        }
    }
}

impl From<&StrategyConfig> for ClassificationRules {
    fn from(strategy: &StrategyConfig) -> Self {
        Self {
            rsi_min: strategy.rsi_min,
            rsi_max: strategy.rsi_max,
            strict_bollinger: strategy.strict_bollinger,
        }
    }
}

impl ClassificationRules {
    pub fn rsi_in_band(&self, rsi: f64) -> bool {
        self.rsi_min <= rsi && rsi <= self.rsi_max
    }
}

/// Classify one timeframe.
///
/// LONG: price above EMA21, EMA9 above EMA21, RSI inside the band.
/// SHORT: the mirror. Strict mode also checks the Bollinger mid.
pub fn classify(set: &IndicatorSet, rules: &ClassificationRules) -> Direction {
    if !rules.rsi_in_band(set.rsi.value) {
        return Direction::Neutral;
    }

    let price = set.price;
    let (ema9, ema21, mid) = (set.ema9(), set.ema21(), set.bollinger_mid());

    let long = price > ema21 && ema9 > ema21 && (!rules.strict_bollinger || price >= mid);
    if long {
        return Direction::Long;
    }

    let short = price < ema21 && ema9 < ema21 && (!rules.strict_bollinger || price <= mid);
    if short {
        return Direction::Short;
    }

    Direction::Neutral
}

/// The shared direction when every entry is the same non-neutral value.
pub fn confluence<I>(directions: I) -> Direction
where
    I: IntoIterator<Item = Direction>,
{
    let mut iter = directions.into_iter();
    let first = match iter.next() {
        Some(d) if d.is_directional() => d,
        _ => return Direction::Neutral,
    };

    if iter.all(|d| d == first) {
        first
    } else {
        Direction::Neutral
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct TimeframeReading {
    pub indicators: IndicatorSet,
    pub direction: Direction,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ConfluenceReport {
    pub symbol: String,
    pub direction: Direction,
    /// Last close of the first configured timeframe.
    pub price: f64,
    pub readings: Vec<TimeframeReading>,
}

impl ConfluenceReport {
    fn from_readings(symbol: &str, readings: Vec<TimeframeReading>) -> Self {
        let direction = confluence(readings.iter().map(|r| r.direction));
        let price = readings.first().map(|r| r.indicators.price).unwrap_or(0.0);
        Self {
            symbol: symbol.to_string(),
            direction,
            price,
            readings,
        }
    }
}

pub struct ConfluenceAnalyzer {
    provider: Arc<dyn MarketDataProvider>,
    timeframes: Vec<String>,
    candle_limit: usize,
    params: IndicatorParams,
    rules: ClassificationRules,
}

impl ConfluenceAnalyzer {
    pub fn new(provider: Arc<dyn MarketDataProvider>, config: &Config) -> Self {
        Self {
            provider,
            timeframes: config.timeframes.clone(),
            candle_limit: config.candle_limit,
            params: config.strategy.indicators,
            rules: ClassificationRules::from(&config.strategy),
        }
    }

    async fn reading(&self, symbol: &str, timeframe: &str) -> Result<TimeframeReading, AnalysisError> {
        let closes = self
            .provider
            .fetch_closes(symbol, timeframe, self.candle_limit)
            .await
            .map_err(|source| AnalysisError::DataFetch {
                symbol: symbol.to_string(),
                timeframe: timeframe.to_string(),
                source,
            })?;

        let indicators = compute_indicator_set(timeframe, &closes, &self.params).map_err(|source| {
            AnalysisError::InsufficientData {
                symbol: symbol.to_string(),
                timeframe: timeframe.to_string(),
                source,
            }
        })?;

        let direction = classify(&indicators, &self.rules);
        debug!(
            symbol = %symbol,
            timeframe = %timeframe,
            price = indicators.price,
            ema9 = indicators.ema9(),
            ema21 = indicators.ema21(),
            rsi = indicators.rsi.value,
            direction = %direction,
            "Classified timeframe"
        );

        Ok(TimeframeReading {
            indicators,
            direction,
        })
    }

    /// Strict confluence over every configured timeframe.
    ///
    /// The first timeframe without a direction vetoes the symbol; the
    /// remaining timeframes are not fetched.
    pub async fn analyze(&self, symbol: &str) -> Result<ConfluenceReport, AnalysisError> {
        let mut readings = Vec::with_capacity(self.timeframes.len());

        for timeframe in &self.timeframes {
            let reading = self.reading(symbol, timeframe).await?;
            let vetoed = !reading.direction.is_directional();
            readings.push(reading);

            if vetoed {
                debug!(symbol = %symbol, timeframe = %timeframe, "Timeframe vetoed symbol");
                let price = readings[0].indicators.price;
                return Ok(ConfluenceReport {
                    symbol: symbol.to_string(),
                    direction: Direction::Neutral,
                    price,
                    readings,
                });
            }
        }

        Ok(ConfluenceReport::from_readings(symbol, readings))
    }

    /// Read every timeframe without short-circuiting, for scoring.
    pub async fn snapshot_all(&self, symbol: &str) -> Result<ConfluenceReport, AnalysisError> {
        let mut readings = Vec::with_capacity(self.timeframes.len());
        for timeframe in &self.timeframes {
            readings.push(self.reading(symbol, timeframe).await?);
        }
        Ok(ConfluenceReport::from_readings(symbol, readings))
    }
}
