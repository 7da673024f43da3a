//! Unit tests for configuration loading

use std::io::Write;
use stonks_signals::config::{Config, ConfigError, StrategyMode};

#[test]
fn test_default_config_is_valid() {
    let config = Config::default();
    assert!(config.validate().is_ok());
    assert_eq!(config.timeframes, vec!["15m", "1h", "12h"]);
    assert_eq!(config.primary_timeframe(), "15m");
    assert_eq!(config.strategy.mode, StrategyMode::Confluence);
    assert_eq!(config.trading.stop_pct, 0.01);
    assert_eq!(config.trading.take_pct, 0.02);
    assert_eq!(config.ranking.top_k, 3);
}

#[test]
fn test_partial_toml_keeps_defaults() {
    let config = Config::from_toml_str(
        r#"
        symbols = ["SOLUSDT"]
        poll_interval_secs = 45

        [strategy]
        mode = "scored"
        strict_bollinger = true

        [ranking]
        min_score = 75.0
        "#,
    )
    .unwrap();

    assert_eq!(config.symbols, vec!["SOLUSDT"]);
    assert_eq!(config.poll_interval_secs, 45);
    assert_eq!(config.strategy.mode, StrategyMode::Scored);
    assert!(config.strategy.strict_bollinger);
    assert_eq!(config.strategy.rsi_min, 40.0);
    assert_eq!(config.strategy.indicators.ema_slow, 21);
    assert_eq!(config.ranking.min_score, 75.0);
    assert_eq!(config.ranking.top_k, 3);
    assert!(config.trading.enabled);
}

#[test]
fn test_invalid_values_are_rejected() {
    let cases = [
        "symbols = []",
        "timeframes = []",
        "candle_limit = 20",
        "poll_interval_secs = 0",
        "[trading]\nstop_pct = 1.5",
        "[trading]\ntake_pct = 0.0",
        "[strategy]\nrsi_min = 70.0\nrsi_max = 30.0",
        "[ranking]\ntop_k = 0",
    ];
    for raw in cases {
        assert!(
            matches!(Config::from_toml_str(raw), Err(ConfigError::Invalid(_))),
            "expected {:?} to be rejected",
            raw
        );
    }
}

#[test]
fn test_non_finite_numbers_are_rejected() {
    let cases = [
        "[trading]\nstop_pct = nan",
        "[trading]\ntake_pct = nan",
        "[trading]\ntake_pct = inf",
        "[strategy]\nrsi_min = nan",
        "[strategy]\nrsi_max = nan",
        "[strategy]\nvolatility_threshold = nan",
        "[strategy.indicators]\nbollinger_std_dev = nan",
        "[ranking]\nmin_score = nan",
    ];
    for raw in cases {
        assert!(
            matches!(Config::from_toml_str(raw), Err(ConfigError::Invalid(_))),
            "expected {:?} to be rejected",
            raw
        );
    }
}

#[test]
fn test_zero_periods_and_threshold_are_rejected() {
    let cases = [
        "[strategy.indicators]\nema_fast = 0",
        "[strategy.indicators]\nema_slow = 0",
        "[strategy.indicators]\nrsi_period = 0",
        "[strategy.indicators]\nbollinger_period = 0",
        "[strategy]\nvolatility_threshold = 0.0",
        "[strategy]\nvolatility_threshold = -0.5",
    ];
    for raw in cases {
        assert!(
            matches!(Config::from_toml_str(raw), Err(ConfigError::Invalid(_))),
            "expected {:?} to be rejected",
            raw
        );
    }
}

#[test]
fn test_malformed_toml_is_a_parse_error() {
    assert!(matches!(
        Config::from_toml_str("symbols = [\"BTC\""),
        Err(ConfigError::Parse(_))
    ));
    assert!(matches!(
        Config::from_toml_str("[strategy]\nmode = \"majority\""),
        Err(ConfigError::Parse(_))
    ));
}

#[test]
fn test_from_file() {
    let path = std::env::temp_dir().join(format!("stonks-signals-{}.toml", std::process::id()));
    let mut file = std::fs::File::create(&path).unwrap();
    writeln!(file, "timeframes = [\"5m\", \"4h\"]").unwrap();
    drop(file);

    let config = Config::from_file(&path).unwrap();
    std::fs::remove_file(&path).unwrap();
    assert_eq!(config.timeframes, vec!["5m", "4h"]);
}

#[test]
fn test_missing_file_is_a_read_error() {
    let result = Config::from_file("/nonexistent/stonks-signals.toml");
    assert!(matches!(result, Err(ConfigError::Read { .. })));
}
