//! Telegram Bot API deserialization types.

use serde::Deserialize;

#[derive(Debug, Deserialize)]
pub(crate) struct TgResponse<T> {
    pub ok: bool,
    pub result: Option<T>,
    pub description: Option<String>,
}

/// The `Message` object returned by `sendMessage`, trimmed to what we use.
#[derive(Debug, Deserialize)]
pub(crate) struct TgSentMessage {
    pub message_id: i64,
    pub chat: TgChat,
}

#[derive(Debug, Deserialize)]
pub(crate) struct TgChat {
    pub id: i64,
}
