//! Static configuration loaded once at startup.
//!
//! The TOML file carries the strategy knobs; secrets and the listen port come
//! from the environment (optionally via `.env`). A missing file falls back to
//! defaults, an unreadable or invalid one aborts startup.

use serde::{Deserialize, Serialize};
use std::env;
use std::path::{Path, PathBuf};
use thiserror::Error;

use crate::indicators::IndicatorParams;

pub const DEFAULT_CONFIG_PATH: &str = "config/signals.toml";
pub const CONFIG_PATH_ENV: &str = "SIGNALS_CONFIG";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config file {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to parse config: {0}")]
    Parse(#[from] toml::de::Error),
    #[error("invalid config: {0}")]
    Invalid(String),
}

/// Get the current runtime environment (`ENVIRONMENT`, default "sandbox").
pub fn get_environment() -> String {
    env::var("ENVIRONMENT")
        .map(|e| e.to_lowercase())
        .unwrap_or_else(|_| "sandbox".to_string())
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StrategyMode {
    /// Strict all-timeframe agreement, no scoring.
    Confluence,
    /// Composite score, ranking and top-K selection.
    Scored,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct StrategyConfig {
    pub mode: StrategyMode,
    pub rsi_min: f64,
    pub rsi_max: f64,
    /// Also require price on the right side of the Bollinger mid.
    pub strict_bollinger: bool,
    /// Relative distance to the Bollinger mid counted as "tight".
    pub volatility_threshold: f64,
    pub indicators: IndicatorParams,
}

impl Default for StrategyConfig {
    fn default() -> Self {
        Self {
            mode: StrategyMode::Confluence,
            rsi_min: 40.0,
            rsi_max: 60.0,
            strict_bollinger: false,
            volatility_threshold: 0.01,
            indicators: IndicatorParams::default(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RankingConfig {
    pub top_k: usize,
    pub min_score: f64,
}

impl Default for RankingConfig {
    fn default() -> Self {
        Self {
            top_k: 3,
            min_score: 60.0,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TradingConfig {
    /// Paper trading on confirmed signals; alerts only when false.
    pub enabled: bool,
    pub stop_pct: f64,
    pub take_pct: f64,
}

impl Default for TradingConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            stop_pct: 0.01,
            take_pct: 0.02,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MarketDataConfig {
    pub base_url: String,
}

impl Default for MarketDataConfig {
    fn default() -> Self {
        Self {
            base_url: "https://api.binance.com".to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub symbols: Vec<String>,
    pub timeframes: Vec<String>,
    pub candle_limit: usize,
    pub poll_interval_secs: u64,
    pub post_signal_pause_secs: u64,
    pub request_timeout_secs: u64,
    pub strategy: StrategyConfig,
    pub ranking: RankingConfig,
    pub trading: TradingConfig,
    pub market_data: MarketDataConfig,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            symbols: vec![
                "BTCUSDT".to_string(),
                "ETHUSDT".to_string(),
                "BNBUSDT".to_string(),
            ],
            timeframes: vec!["15m".to_string(), "1h".to_string(), "12h".to_string()],
            candle_limit: 100,
            poll_interval_secs: 30,
            post_signal_pause_secs: 60,
            request_timeout_secs: 10,
            strategy: StrategyConfig::default(),
            ranking: RankingConfig::default(),
            trading: TradingConfig::default(),
            market_data: MarketDataConfig::default(),
        }
    }
}

impl Config {
    pub fn from_toml_str(raw: &str) -> Result<Self, ConfigError> {
        let config: Config = toml::from_str(raw)?;
        config.validate()?;
        Ok(config)
    }

    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let raw = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml_str(&raw)
    }

    /// Load from `SIGNALS_CONFIG` or the default path; defaults when absent.
    pub fn load() -> Result<Self, ConfigError> {
        let explicit = env::var(CONFIG_PATH_ENV).ok();
        let path = PathBuf::from(explicit.as_deref().unwrap_or(DEFAULT_CONFIG_PATH));

        if explicit.is_none() && !path.exists() {
            tracing::info!(path = %path.display(), "No config file found, using defaults");
            let config = Config::default();
            config.validate()?;
            return Ok(config);
        }

        tracing::info!(path = %path.display(), "Loading config file");
        Self::from_file(&path)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.symbols.is_empty() {
            return Err(ConfigError::Invalid("symbols must not be empty".into()));
        }
        if self.timeframes.is_empty() {
            return Err(ConfigError::Invalid("timeframes must not be empty".into()));
        }
        let min_closes = self.strategy.indicators.min_closes();
        if self.candle_limit < min_closes {
            return Err(ConfigError::Invalid(format!(
                "candle_limit {} is below the longest indicator lookback {}",
                self.candle_limit, min_closes
            )));
        }
        let params = &self.strategy.indicators;
        for (name, period) in [
            ("ema_fast", params.ema_fast),
            ("ema_slow", params.ema_slow),
            ("rsi_period", params.rsi_period),
            ("bollinger_period", params.bollinger_period),
        ] {
            if period == 0 {
                return Err(ConfigError::Invalid(format!(
                    "strategy.indicators.{} must be >= 1",
                    name
                )));
            }
        }
        for (name, value) in [
            ("trading.stop_pct", self.trading.stop_pct),
            ("trading.take_pct", self.trading.take_pct),
            ("strategy.rsi_min", self.strategy.rsi_min),
            ("strategy.rsi_max", self.strategy.rsi_max),
            ("strategy.volatility_threshold", self.strategy.volatility_threshold),
            ("strategy.indicators.bollinger_std_dev", params.bollinger_std_dev),
            ("ranking.min_score", self.ranking.min_score),
        ] {
            if !value.is_finite() {
                return Err(ConfigError::Invalid(format!("{} must be a finite number", name)));
            }
        }
        if self.poll_interval_secs == 0 {
            return Err(ConfigError::Invalid("poll_interval_secs must be > 0".into()));
        }
        if !(self.trading.stop_pct > 0.0 && self.trading.stop_pct < 1.0) {
            return Err(ConfigError::Invalid("trading.stop_pct must be in (0, 1)".into()));
        }
        if self.trading.take_pct <= 0.0 {
            return Err(ConfigError::Invalid("trading.take_pct must be > 0".into()));
        }
        if self.strategy.rsi_min > self.strategy.rsi_max {
            return Err(ConfigError::Invalid("strategy.rsi_min must be <= rsi_max".into()));
        }
        if self.strategy.volatility_threshold <= 0.0 {
            return Err(ConfigError::Invalid(
                "strategy.volatility_threshold must be > 0".into(),
            ));
        }
        if self.ranking.top_k == 0 {
            return Err(ConfigError::Invalid("ranking.top_k must be >= 1".into()));
        }
        Ok(())
    }

    /// First configured timeframe. Its last close is the reference price
    /// for signals and open trades.
    pub fn primary_timeframe(&self) -> &str {
        self.timeframes.first().map(String::as_str).unwrap_or("15m")
    }
}

/// Secrets and process settings taken from the environment.
#[derive(Debug, Clone, Default)]
pub struct Secrets {
    pub telegram_bot_token: Option<String>,
    pub telegram_chat_id: Option<String>,
    pub discord_webhook_url: Option<String>,
    pub port: u16,
}

impl Secrets {
    pub fn from_env() -> Self {
        Self {
            telegram_bot_token: non_empty_var("TELEGRAM_BOT_TOKEN"),
            telegram_chat_id: non_empty_var("TELEGRAM_CHAT_ID"),
            discord_webhook_url: non_empty_var("DISCORD_WEBHOOK_URL"),
            port: env::var("PORT")
                .ok()
                .and_then(|p| p.parse().ok())
                .unwrap_or(8080),
        }
    }
}

fn non_empty_var(key: &str) -> Option<String> {
    env::var(key).ok().filter(|v| !v.trim().is_empty())
}
