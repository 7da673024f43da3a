//! Telegram Bot API channel

use async_trait::async_trait;
use serde_json::json;
use std::time::Duration;

use crate::config::Secrets;
use crate::services::notifier::{NotificationError, Notifier};

pub const TELEGRAM_API: &str = "https://api.telegram.org";

pub struct TelegramNotifier {
    base_url: String,
    token: String,
    chat_id: String,
    client: reqwest::Client,
}

impl TelegramNotifier {
    pub fn new(
        base_url: impl Into<String>,
        token: impl Into<String>,
        chat_id: impl Into<String>,
        client: reqwest::Client,
    ) -> Self {
        Self {
            base_url: base_url.into().trim_end_matches('/').to_string(),
            token: token.into(),
            chat_id: chat_id.into(),
            client,
        }
    }

    /// Build from `TELEGRAM_BOT_TOKEN` / `TELEGRAM_CHAT_ID`.
    pub fn from_secrets(secrets: &Secrets, timeout: Duration) -> Result<Self, NotificationError> {
        let token = secrets
            .telegram_bot_token
            .clone()
            .ok_or(NotificationError::ConfigMissing {
                channel: "telegram",
                variable: "TELEGRAM_BOT_TOKEN",
            })?;
        let chat_id = secrets
            .telegram_chat_id
            .clone()
            .ok_or(NotificationError::ConfigMissing {
                channel: "telegram",
                variable: "TELEGRAM_CHAT_ID",
            })?;
        let client = reqwest::Client::builder().timeout(timeout).build()?;
        Ok(Self::new(TELEGRAM_API, token, chat_id, client))
    }
}

#[async_trait]
impl Notifier for TelegramNotifier {
    fn name(&self) -> &'static str {
        "telegram"
    }

    async fn send(&self, text: &str) -> Result<(), NotificationError> {
        let url = format!("{}/bot{}/sendMessage", self.base_url, self.token);
        let response = self
            .client
            .post(url)
            .json(&json!({ "chat_id": self.chat_id, "text": text }))
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(NotificationError::Status {
                channel: "telegram",
                status: response.status().as_u16(),
            });
        }
        Ok(())
    }
}
