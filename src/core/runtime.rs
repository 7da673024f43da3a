//! The polling loop: one sequential pass over all symbols per cycle.

use chrono::Utc;
use std::future::Future;
use std::sync::Arc;
use std::time::{Duration, Instant};
use thiserror::Error;
use tokio::sync::RwLock;
use tokio::task::JoinError;
use tokio_util::sync::CancellationToken;
use tracing::{debug, error, info, warn};

use crate::config::{Config, StrategyMode};
use crate::metrics::Metrics;
use crate::models::dashboard::DashboardSnapshot;
use crate::models::signal::{ScoredSymbol, Signal};
use crate::models::trade::{Trade, TradeResult};
use crate::services::market_data::MarketDataProvider;
use crate::services::messages;
use crate::services::notifier::NotifierSet;
use crate::signals::confluence::{AnalysisError, ConfluenceAnalyzer};
use crate::signals::ranking::RankingSelector;
use crate::signals::scoring::ScoringEngine;
use crate::trading::lifecycle::TradeLifecycleManager;
use crate::trading::registry::{Confirmation, TradeRegistry};

/// Latest dashboard view, written by the loop and read by the HTTP server.
pub type SharedSnapshot = Arc<RwLock<DashboardSnapshot>>;

/// Why the service stopped without being asked to.
#[derive(Debug, Error)]
pub enum ServiceError {
    #[error("signal runtime stopped before shutdown was requested")]
    RuntimeStopped,
    #[error("signal runtime task failed: {0}")]
    RuntimeFailed(#[from] JoinError),
    #[error("HTTP server stopped before shutdown was requested")]
    ServerStopped,
}

/// Outcome of one pass over the symbol universe.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CycleReport {
    pub cycle: u64,
    pub signals: Vec<Signal>,
    pub suppressed: usize,
    pub opened: Vec<Trade>,
    pub closed: Vec<TradeResult>,
    pub skipped: Vec<String>,
    pub ranking: Vec<ScoredSymbol>,
}

pub struct SignalRuntime {
    config: Config,
    provider: Arc<dyn MarketDataProvider>,
    analyzer: ConfluenceAnalyzer,
    scoring: ScoringEngine,
    ranking: RankingSelector,
    registry: TradeRegistry,
    notifiers: NotifierSet,
    snapshot: SharedSnapshot,
    metrics: Option<Arc<Metrics>>,
    cycle: u64,
}

impl SignalRuntime {
    pub fn new(config: Config, provider: Arc<dyn MarketDataProvider>, notifiers: NotifierSet) -> Self {
        let analyzer = ConfluenceAnalyzer::new(provider.clone(), &config);
        let scoring = ScoringEngine::from_strategy(&config.strategy);
        let ranking = RankingSelector::from(&config.ranking);
        let registry = TradeRegistry::new(
            TradeLifecycleManager::from(&config.trading),
            config.trading.enabled,
        );

        Self {
            config,
            provider,
            analyzer,
            scoring,
            ranking,
            registry,
            notifiers,
            snapshot: Arc::new(RwLock::new(DashboardSnapshot::default())),
            metrics: None,
            cycle: 0,
        }
    }

    pub fn with_metrics(mut self, metrics: Arc<Metrics>) -> Self {
        self.metrics = Some(metrics);
        self
    }

    pub fn snapshot(&self) -> SharedSnapshot {
        self.snapshot.clone()
    }

    pub fn registry(&self) -> &TradeRegistry {
        &self.registry
    }

    /// Alert that monitoring has started.
    pub async fn announce(&self) {
        let text = messages::startup_message(&self.config.symbols, &self.config.timeframes);
        self.notifiers.broadcast(&text).await;
    }

    /// One sequential pass over every configured symbol.
    ///
    /// A symbol with an open trade only gets its stop/take check; every
    /// other symbol is analyzed. Per-symbol failures are logged and skipped.
    pub async fn run_cycle(&mut self) -> CycleReport {
        let started = Instant::now();
        self.cycle += 1;
        let mut report = CycleReport {
            cycle: self.cycle,
            ..CycleReport::default()
        };

        let symbols = self.config.symbols.clone();
        let mut scored = Vec::new();

        for symbol in &symbols {
            if self.registry.is_open(symbol) {
                self.monitor_symbol(symbol, &mut report).await;
                continue;
            }

            match self.config.strategy.mode {
                StrategyMode::Confluence => match self.analyzer.analyze(symbol).await {
                    Ok(confluence) if confluence.direction.is_directional() => {
                        let signal = Signal::new(symbol.clone(), confluence.direction, confluence.price);
                        self.confirm_signal(signal, &mut report).await;
                    }
                    Ok(_) => debug!(symbol = %symbol, "No confluence this cycle"),
                    Err(e) => self.skip_analysis(symbol, &e, &mut report),
                },
                StrategyMode::Scored => match self.analyzer.snapshot_all(symbol).await {
                    Ok(confluence) => {
                        let entry = self.scoring.score(&confluence);
                        debug!(
                            symbol = %symbol,
                            score = entry.score,
                            direction = %entry.direction,
                            "Scored symbol"
                        );
                        scored.push(entry);
                    }
                    Err(e) => self.skip_analysis(symbol, &e, &mut report),
                },
            }
        }

        if self.config.strategy.mode == StrategyMode::Scored {
            report.ranking = self.ranking.rank(scored.clone());
            for entry in self.ranking.select(scored) {
                self.confirm_signal(entry.to_signal(), &mut report).await;
            }
        }

        self.publish(&report).await;

        if let Some(metrics) = &self.metrics {
            metrics.signal_cycles_total.inc();
            metrics.open_trades.set(self.registry.open_count() as i64);
            metrics
                .signal_cycle_duration_seconds
                .observe(started.elapsed().as_secs_f64());
        }

        info!(
            cycle = report.cycle,
            signals = report.signals.len(),
            opened = report.opened.len(),
            closed = report.closed.len(),
            skipped = report.skipped.len(),
            "Cycle complete"
        );

        report
    }

    /// Run cycles until `cancel` fires, sleeping `poll_interval_secs` after
    /// each pass and `post_signal_pause_secs` more when a signal went out.
    ///
    /// The pause is added once per cycle however many signals the cycle
    /// emitted, so a cycle with three signals waits one pause, not three.
    pub async fn run(mut self, cancel: CancellationToken) {
        info!(
            symbols = ?self.config.symbols,
            timeframes = ?self.config.timeframes,
            interval = self.config.poll_interval_secs,
            mode = ?self.config.strategy.mode,
            paper_trading = self.registry.paper_trading(),
            "SignalRuntime: starting"
        );
        self.announce().await;

        let interval = Duration::from_secs(self.config.poll_interval_secs);
        let pause = Duration::from_secs(self.config.post_signal_pause_secs);

        loop {
            if cancel.is_cancelled() {
                break;
            }

            let report = self.run_cycle().await;
            let wait = if report.signals.is_empty() {
                interval
            } else {
                interval + pause
            };

            tokio::select! {
                _ = cancel.cancelled() => break,
                _ = tokio::time::sleep(wait) => {}
            }
        }

        info!(cycles = self.cycle, "SignalRuntime: stopped");
    }

    async fn monitor_symbol(&mut self, symbol: &str, report: &mut CycleReport) {
        let price = match self
            .provider
            .latest_price(symbol, self.config.primary_timeframe())
            .await
        {
            Ok(price) => price,
            Err(e) => {
                if let Some(metrics) = &self.metrics {
                    metrics.market_data_errors_total.inc();
                }
                self.skip(symbol, &e, report);
                return;
            }
        };

        match self.registry.monitor(symbol, price, Utc::now()) {
            Some(result) => {
                info!(
                    symbol = %symbol,
                    direction = %result.direction,
                    outcome = %result.outcome,
                    pnl = result.pnl_percent,
                    "Paper trade closed"
                );
                if let Some(metrics) = &self.metrics {
                    metrics.trades_closed_total.inc();
                }
                self.notifiers
                    .broadcast(&messages::trade_closed_message(&result))
                    .await;
                report.closed.push(result);
            }
            None => debug!(symbol = %symbol, price = price, "Trade still open"),
        }
    }

    async fn confirm_signal(&mut self, signal: Signal, report: &mut CycleReport) {
        match self.registry.confirm(&signal, Utc::now()) {
            Ok(Confirmation::Suppressed) => {
                debug!(symbol = %signal.symbol, direction = %signal.direction, "Duplicate signal suppressed");
                if let Some(metrics) = &self.metrics {
                    metrics.signals_suppressed_total.inc();
                }
                report.suppressed += 1;
            }
            Ok(confirmation) => {
                info!(
                    symbol = %signal.symbol,
                    direction = %signal.direction,
                    price = signal.price,
                    score = ?signal.score,
                    "Signal confirmed"
                );
                if let Some(metrics) = &self.metrics {
                    metrics.signals_emitted_total.inc();
                }

                let text = messages::signal_message(
                    &signal,
                    &self.config.timeframes,
                    self.config.trading.stop_pct,
                    self.config.trading.take_pct,
                );
                self.notifiers.broadcast(&text).await;

                if let Confirmation::Opened(trade) = confirmation {
                    if let Some(metrics) = &self.metrics {
                        metrics.trades_opened_total.inc();
                    }
                    self.notifiers
                        .broadcast(&messages::trade_opened_message(&trade))
                        .await;
                    report.opened.push(trade);
                }
                report.signals.push(signal);
            }
            Err(e) => warn!(symbol = %signal.symbol, error = %e, "Signal not confirmed"),
        }
    }

    /// Fetch failures and short histories are counted separately.
    fn skip_analysis(&self, symbol: &str, error: &AnalysisError, report: &mut CycleReport) {
        if let Some(metrics) = &self.metrics {
            match error {
                AnalysisError::DataFetch { .. } => metrics.market_data_errors_total.inc(),
                AnalysisError::InsufficientData { .. } => metrics.insufficient_data_total.inc(),
            }
        }
        self.skip(symbol, error, report);
    }

    fn skip(&self, symbol: &str, error: &dyn std::error::Error, report: &mut CycleReport) {
        warn!(symbol = %symbol, error = %error, "Skipping symbol this cycle");
        report.skipped.push(symbol.to_string());
    }

    async fn publish(&self, report: &CycleReport) {
        let next = DashboardSnapshot {
            status: "running".to_string(),
            cycle: report.cycle,
            updated_at: Some(Utc::now()),
            ranking: report.ranking.clone(),
            trades: self.registry.open_trades(),
        };
        *self.snapshot.write().await = next;
    }
}

/// Run the loop and the HTTP server side by side until `shutdown` resolves.
///
/// A clean shutdown cancels the loop and waits for it. The loop or the
/// server finishing first is an error, so the process exits non-zero.
pub async fn supervise<S, F>(runtime: SignalRuntime, server: S, shutdown: F) -> Result<(), ServiceError>
where
    S: Future<Output = ()> + Send + 'static,
    F: Future<Output = ()>,
{
    let cancel = CancellationToken::new();
    let mut runtime_handle = tokio::spawn(runtime.run(cancel.clone()));
    let server_handle = tokio::spawn(server);

    let outcome = tokio::select! {
        _ = shutdown => {
            info!("Shutting down...");
            Ok(())
        }
        _ = server_handle => {
            error!("HTTP server stopped");
            Err(ServiceError::ServerStopped)
        }
        result = &mut runtime_handle => {
            // run() only returns after cancellation, which has not happened yet.
            return match result {
                Ok(()) => Err(ServiceError::RuntimeStopped),
                Err(e) => {
                    error!(error = %e, "Signal runtime task failed");
                    Err(ServiceError::RuntimeFailed(e))
                }
            };
        }
    };

    cancel.cancel();
    runtime_handle.await?;
    outcome
}
