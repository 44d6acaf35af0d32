//! `sendMessage` delivery and the Notifier trait implementation.

use super::types::{TgResponse, TgSentMessage};
use super::{TelegramNotifier, MAX_MESSAGE_LEN};
use async_trait::async_trait;
use hwbot_core::{
    error::BotError,
    traits::{DeliveryReceipt, Notifier},
};
use tracing::{debug, info};

impl TelegramNotifier {
    pub(crate) fn build_send_request(&self, text: &str) -> Result<reqwest::Request, BotError> {
        let body = serde_json::json!({
            "chat_id": &self.chat_id,
            "text": text,
        });
        self.client
            .post(format!("{}/sendMessage", self.base_url))
            .json(&body)
            .timeout(self.timeout)
            .build()
            .map_err(|e| BotError::Delivery(format!("telegram request build failed: {}", e.without_url())))
    }

    /// Send one chunk (already within the length limit).
    async fn send_chunk(&self, text: &str) -> Result<DeliveryReceipt, BotError> {
        let request = self.build_send_request(text)?;

        // `without_url` keeps the bot token out of error messages.
        let resp = self
            .client
            .execute(request)
            .await
            .map_err(|e| BotError::Delivery(format!("telegram send failed: {}", e.without_url())))?;

        let status = resp.status();
        let body = resp
            .text()
            .await
            .map_err(|e| BotError::Delivery(format!("telegram read failed: {}", e.without_url())))?;

        parse_send_response(status, &body)
    }
}

/// Interpret a `sendMessage` response.
pub(crate) fn parse_send_response(
    status: reqwest::StatusCode,
    body: &str,
) -> Result<DeliveryReceipt, BotError> {
    let parsed: Option<TgResponse<TgSentMessage>> = serde_json::from_str(body).ok();

    match parsed {
        Some(TgResponse {
            ok: true,
            result: Some(message),
            ..
        }) if status.is_success() => Ok(DeliveryReceipt {
            message_id: message.message_id,
            chat_id: message.chat.id,
        }),
        Some(resp) => Err(BotError::Delivery(format!(
            "telegram sendMessage returned {status}: {}",
            resp.description.unwrap_or_default()
        ))),
        None => Err(BotError::Delivery(format!(
            "telegram sendMessage returned {status} with unreadable body"
        ))),
    }
}

#[async_trait]
impl Notifier for TelegramNotifier {
    fn name(&self) -> &str {
        "telegram"
    }

    async fn notify(&self, text: &str) -> Result<DeliveryReceipt, BotError> {
        if text.trim().is_empty() {
            return Err(BotError::Delivery("refusing to send an empty message".into()));
        }

        info!("sending message to telegram chat {}", self.chat_id);

        let chunks = split_message(text, MAX_MESSAGE_LEN);
        let mut receipt = None;
        for chunk in &chunks {
            receipt = Some(self.send_chunk(chunk).await?);
        }
        debug!("telegram: delivered {} chunk(s)", chunks.len());

        receipt.ok_or_else(|| BotError::Delivery("nothing was sent".into()))
    }
}

/// Split a long message into chunks of at most `max_chars` characters,
/// preferring to break after a newline.
pub(crate) fn split_message(text: &str, max_chars: usize) -> Vec<&str> {
    if text.chars().count() <= max_chars {
        return vec![text];
    }

    let mut chunks = Vec::new();
    let mut rest = text;

    while !rest.is_empty() {
        let end = rest
            .char_indices()
            .nth(max_chars)
            .map(|(i, _)| i)
            .unwrap_or(rest.len());
        let break_at = if end < rest.len() {
            rest[..end].rfind('\n').map(|i| i + 1).unwrap_or(end)
        } else {
            end
        };
        chunks.push(&rest[..break_at]);
        rest = &rest[break_at..];
    }

    chunks
}
