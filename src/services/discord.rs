//! Discord webhook channel

use async_trait::async_trait;
use serde_json::json;
use std::time::Duration;

use crate::config::Secrets;
use crate::services::notifier::{NotificationError, Notifier};

pub struct DiscordNotifier {
    webhook_url: String,
    client: reqwest::Client,
}

impl DiscordNotifier {
    pub fn new(webhook_url: impl Into<String>, client: reqwest::Client) -> Self {
        Self {
            webhook_url: webhook_url.into(),
            client,
        }
    }

    pub fn from_secrets(secrets: &Secrets, timeout: Duration) -> Result<Self, NotificationError> {
        let webhook_url =
            secrets
                .discord_webhook_url
                .clone()
                .ok_or(NotificationError::ConfigMissing {
                    channel: "discord",
                    variable: "DISCORD_WEBHOOK_URL",
                })?;
        let client = reqwest::Client::builder().timeout(timeout).build()?;
        Ok(Self::new(webhook_url, client))
    }
}

#[async_trait]
impl Notifier for DiscordNotifier {
    fn name(&self) -> &'static str {
        "discord"
    }

    async fn send(&self, text: &str) -> Result<(), NotificationError> {
        let response = self
            .client
            .post(&self.webhook_url)
            .json(&json!({ "content": text }))
            .send()
            .await?;

        // Webhooks answer 204 on success.
        if !response.status().is_success() {
            return Err(NotificationError::Status {
                channel: "discord",
                status: response.status().as_u16(),
            });
        }
        Ok(())
    }
}
