//! Alert delivery channels.

use async_trait::async_trait;
use std::sync::Arc;
use thiserror::Error;
use tracing::{debug, warn};

use crate::metrics::Metrics;

#[derive(Debug, Error)]
pub enum NotificationError {
    #[error("notification request failed: {0}")]
    Http(#[from] reqwest::Error),
    #[error("{channel} returned status {status}")]
    Status { channel: &'static str, status: u16 },
    #[error("{channel} disabled: {variable} is not set")]
    ConfigMissing {
        channel: &'static str,
        variable: &'static str,
    },
}

#[async_trait]
pub trait Notifier: Send + Sync {
    fn name(&self) -> &'static str;

    async fn send(&self, text: &str) -> Result<(), NotificationError>;
}

/// Fan-out over every configured channel.
///
/// Delivery is best effort: a failing channel is logged and never retried,
/// and the remaining channels still get the message.
#[derive(Clone, Default)]
pub struct NotifierSet {
    channels: Vec<Arc<dyn Notifier>>,
    metrics: Option<Arc<Metrics>>,
}

impl NotifierSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_channel(mut self, channel: Arc<dyn Notifier>) -> Self {
        self.channels.push(channel);
        self
    }

    /// Add a channel built from the environment, or log why it is disabled.
    pub fn with_optional(self, channel: Result<Arc<dyn Notifier>, NotificationError>) -> Self {
        match channel {
            Ok(channel) => self.with_channel(channel),
            Err(e) => {
                warn!(error = %e, "Notification channel disabled");
                self
            }
        }
    }

    pub fn with_metrics(mut self, metrics: Arc<Metrics>) -> Self {
        self.metrics = Some(metrics);
        self
    }

    pub fn is_empty(&self) -> bool {
        self.channels.is_empty()
    }

    pub fn len(&self) -> usize {
        self.channels.len()
    }

    /// Send `text` on every channel; returns how many deliveries succeeded.
    pub async fn broadcast(&self, text: &str) -> usize {
        if self.channels.is_empty() {
            debug!("No notification channels configured, alert only logged");
            return 0;
        }

        let mut delivered = 0;
        for channel in &self.channels {
            match channel.send(text).await {
                Ok(()) => delivered += 1,
                Err(e) => {
                    warn!(channel = channel.name(), error = %e, "Failed to deliver alert");
                    if let Some(metrics) = &self.metrics {
                        metrics.notification_errors_total.inc();
                    }
                }
            }
        }
        delivered
    }
}
