//! Telegram Bot API notification client

use std::sync::Arc;

use async_trait::async_trait;
use serde::Deserialize;

use crate::io::HttpClient;
use crate::notifier::Notifier;
use crate::HomeworkBotError;

/// Subset of the Bot API response envelope
#[derive(Debug, Deserialize)]
struct TelegramResponse {
    ok: bool,
    #[serde(default)]
    description: Option<String>,
}

/// Sends messages to one fixed chat through a bot
pub struct TelegramNotifier {
    send_message_url: String,
    chat_id: String,
    http: Arc<dyn HttpClient>,
}

impl std::fmt::Debug for TelegramNotifier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TelegramNotifier")
            .field("chat_id", &self.chat_id)
            .finish()
    }
}

impl TelegramNotifier {
    pub fn new(api_url: &str, bot_token: &str, chat_id: &str, http: Arc<dyn HttpClient>) -> Self {
        tracing::debug!("Created TelegramNotifier for chat {}", chat_id);

        Self {
            send_message_url: format!(
                "{}/bot{}/sendMessage",
                api_url.trim_end_matches('/'),
                bot_token
            ),
            chat_id: chat_id.to_string(),
            http,
        }
    }
}

#[async_trait]
impl Notifier for TelegramNotifier {
    fn type_name(&self) -> &str {
        "telegram"
    }

    async fn notify(&self, message: &str) -> crate::Result<()> {
        let params = [("chat_id", self.chat_id.as_str()), ("text", message)];

        tracing::debug!("Sending Telegram message to chat {}", self.chat_id);

        let response = self
            .http
            .post_form(&self.send_message_url, &params)
            .await
            .map_err(|e| HomeworkBotError::Delivery(e.to_string()))?;

        if response.status != 200 {
            return Err(HomeworkBotError::Delivery(format!(
                "Telegram API вернул статус {}: {}",
                response.status, response.body
            )));
        }

        let parsed: TelegramResponse = serde_json::from_str(&response.body).map_err(|e| {
            HomeworkBotError::Delivery(format!("Некорректный ответ Telegram API: {}", e))
        })?;
        if !parsed.ok {
            return Err(HomeworkBotError::Delivery(
                parsed
                    .description
                    .unwrap_or_else(|| "Telegram API отклонил сообщение".to_string()),
            ));
        }

        tracing::debug!("Telegram message sent successfully");
        Ok(())
    }
}
