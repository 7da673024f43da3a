//! Shared fakes for integration tests

#![allow(dead_code)]

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use stonks_signals::config::Config;
use stonks_signals::services::{MarketDataError, MarketDataProvider, NotificationError, Notifier};

pub const TIMEFRAMES: [&str; 3] = ["15m", "1h", "12h"];

/// Last close 129, EMA9 > EMA21, RSI 50, price above the Bollinger mid.
pub fn bullish_series() -> Vec<f64> {
    let mut closes: Vec<f64> = (0..30).map(|i| 100.0 + i as f64).collect();
    for i in 0..14 {
        let last = closes[closes.len() - 1];
        closes.push(if i % 2 == 0 { last + 1.0 } else { last - 1.0 });
    }
    closes
}

pub fn bearish_series() -> Vec<f64> {
    bullish_series().into_iter().map(|c| 200.0 - c).collect()
}

pub fn test_config(symbols: &[&str]) -> Config {
    Config {
        symbols: symbols.iter().map(|s| s.to_string()).collect(),
        timeframes: TIMEFRAMES.iter().map(|s| s.to_string()).collect(),
        poll_interval_secs: 1,
        post_signal_pause_secs: 0,
        ..Config::default()
    }
}

/// Market data whose series can be swapped between cycles.
#[derive(Default)]
pub struct ScriptedMarketData {
    series: Mutex<HashMap<(String, String), Vec<f64>>>,
}

impl ScriptedMarketData {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    pub fn set(&self, symbol: &str, interval: &str, closes: Vec<f64>) {
        self.series
            .lock()
            .unwrap()
            .insert((symbol.to_string(), interval.to_string()), closes);
    }

    pub fn set_all(&self, symbol: &str, closes: Vec<f64>) {
        for interval in TIMEFRAMES {
            self.set(symbol, interval, closes.clone());
        }
    }

    /// Append a close to every timeframe of `symbol`.
    pub fn push_close(&self, symbol: &str, close: f64) {
        let mut series = self.series.lock().unwrap();
        for ((s, _), closes) in series.iter_mut() {
            if s == symbol {
                closes.push(close);
            }
        }
    }

    pub fn remove(&self, symbol: &str) {
        self.series.lock().unwrap().retain(|(s, _), _| s != symbol);
    }
}

#[async_trait]
impl MarketDataProvider for ScriptedMarketData {
    async fn fetch_closes(
        &self,
        symbol: &str,
        interval: &str,
        limit: usize,
    ) -> Result<Vec<f64>, MarketDataError> {
        let series = self.series.lock().unwrap();
        let closes = series
            .get(&(symbol.to_string(), interval.to_string()))
            .ok_or_else(|| MarketDataError::Malformed(format!("no data for {}", symbol)))?;
        let start = closes.len().saturating_sub(limit);
        Ok(closes[start..].to_vec())
    }
}

/// Market data that brings the polling task down on first use.
pub struct PanickingMarketData;

#[async_trait]
impl MarketDataProvider for PanickingMarketData {
    async fn fetch_closes(
        &self,
        _symbol: &str,
        _interval: &str,
        _limit: usize,
    ) -> Result<Vec<f64>, MarketDataError> {
        panic!("market data backend crashed");
    }
}

/// Notifier that keeps every message it was asked to send.
#[derive(Default)]
pub struct RecordingNotifier {
    pub messages: Mutex<Vec<String>>,
    pub fail: bool,
}

impl RecordingNotifier {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    pub fn failing() -> Arc<Self> {
        Arc::new(Self {
            messages: Mutex::new(Vec::new()),
            fail: true,
        })
    }

    pub fn sent(&self) -> Vec<String> {
        self.messages.lock().unwrap().clone()
    }
}

#[async_trait]
impl Notifier for RecordingNotifier {
    fn name(&self) -> &'static str {
        "recording"
    }

    async fn send(&self, text: &str) -> Result<(), NotificationError> {
        if self.fail {
            return Err(NotificationError::Status {
                channel: "recording",
                status: 500,
            });
        }
        self.messages.lock().unwrap().push(text.to_string());
        Ok(())
    }
}
