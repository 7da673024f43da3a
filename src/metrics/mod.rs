//! Prometheus metrics for the polling loop and the HTTP surface.

use prometheus::{Encoder, Histogram, HistogramOpts, IntCounter, IntGauge, Registry, TextEncoder};

pub struct Metrics {
    registry: Registry,
    pub signal_cycles_total: IntCounter,
    pub signals_emitted_total: IntCounter,
    pub signals_suppressed_total: IntCounter,
    pub trades_opened_total: IntCounter,
    pub trades_closed_total: IntCounter,
    pub market_data_errors_total: IntCounter,
    pub insufficient_data_total: IntCounter,
    pub notification_errors_total: IntCounter,
    pub open_trades: IntGauge,
    pub signal_cycle_duration_seconds: Histogram,
    pub http_requests_total: IntCounter,
}

impl Metrics {
    pub fn new() -> Result<Self, prometheus::Error> {
        let registry = Registry::new();

        let signal_cycles_total =
            IntCounter::new("signal_cycles_total", "Completed polling cycles")?;
        let signals_emitted_total =
            IntCounter::new("signals_emitted_total", "Signals that passed deduplication")?;
        let signals_suppressed_total = IntCounter::new(
            "signals_suppressed_total",
            "Signals dropped because the direction did not change",
        )?;
        let trades_opened_total =
            IntCounter::new("trades_opened_total", "Paper trades opened")?;
        let trades_closed_total =
            IntCounter::new("trades_closed_total", "Paper trades closed on stop or take")?;
        let market_data_errors_total = IntCounter::new(
            "market_data_errors_total",
            "Symbols skipped because market data could not be fetched or parsed",
        )?;
        let insufficient_data_total = IntCounter::new(
            "insufficient_data_total",
            "Symbols skipped because a series was shorter than an indicator lookback",
        )?;
        let notification_errors_total =
            IntCounter::new("notification_errors_total", "Failed alert deliveries")?;
        let open_trades = IntGauge::new("open_trades", "Currently open paper trades")?;
        let signal_cycle_duration_seconds = Histogram::with_opts(
            HistogramOpts::new(
                "signal_cycle_duration_seconds",
                "Wall time of one pass over all symbols",
            )
            .buckets(vec![0.1, 0.5, 1.0, 2.5, 5.0, 10.0, 30.0, 60.0]),
        )?;
        let http_requests_total =
            IntCounter::new("http_requests_total", "HTTP requests served")?;

        registry.register(Box::new(signal_cycles_total.clone()))?;
        registry.register(Box::new(signals_emitted_total.clone()))?;
        registry.register(Box::new(signals_suppressed_total.clone()))?;
        registry.register(Box::new(trades_opened_total.clone()))?;
        registry.register(Box::new(trades_closed_total.clone()))?;
        registry.register(Box::new(market_data_errors_total.clone()))?;
        registry.register(Box::new(insufficient_data_total.clone()))?;
        registry.register(Box::new(notification_errors_total.clone()))?;
        registry.register(Box::new(open_trades.clone()))?;
        registry.register(Box::new(signal_cycle_duration_seconds.clone()))?;
        registry.register(Box::new(http_requests_total.clone()))?;

        Ok(Self {
            registry,
            signal_cycles_total,
            signals_emitted_total,
            signals_suppressed_total,
            trades_opened_total,
            trades_closed_total,
            market_data_errors_total,
            insufficient_data_total,
            notification_errors_total,
            open_trades,
            signal_cycle_duration_seconds,
            http_requests_total,
        })
    }

    /// Prometheus text exposition of every registered metric.
    pub fn export(&self) -> Result<String, prometheus::Error> {
        let encoder = TextEncoder::new();
        let mut buffer = Vec::new();
        encoder.encode(&self.registry.gather(), &mut buffer)?;
        String::from_utf8(buffer).map_err(|e| prometheus::Error::Msg(e.to_string()))
    }
}
