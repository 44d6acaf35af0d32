//! Telegram Bot API notifier.
//!
//! Sends plain-text messages to a single chat via `sendMessage`.
//! Docs: <https://core.telegram.org/bots/api#sendmessage>

mod send;
pub(crate) mod types;

#[cfg(test)]
mod tests;

use hwbot_core::{
    config::{Credentials, TelegramConfig},
    error::BotError,
};
use serde::Serialize;
use std::fmt;
use std::time::Duration;

/// Telegram's per-message text limit.
pub const MAX_MESSAGE_LEN: usize = 4096;

/// Target chat as the Bot API accepts it: a numeric id, or `@username` of a
/// public channel. Serialized untagged so it goes out as a JSON number or string.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum ChatId {
    Id(i64),
    Username(String),
}

impl ChatId {
    /// Integers become [`ChatId::Id`]; anything else non-empty is passed
    /// through unchanged for Telegram to resolve.
    pub fn parse(raw: &str) -> Result<Self, BotError> {
        let raw = raw.trim();
        if raw.is_empty() {
            return Err(BotError::Config("telegram chat_id is empty".into()));
        }
        Ok(raw
            .parse()
            .map(Self::Id)
            .unwrap_or_else(|_| Self::Username(raw.to_string())))
    }
}

impl fmt::Display for ChatId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Id(id) => write!(f, "{id}"),
            Self::Username(name) => f.write_str(name),
        }
    }
}

/// Delivers notifications to one preconfigured Telegram chat.
pub struct TelegramNotifier {
    client: reqwest::Client,
    /// `<api_base>/bot<token>`; contains the bot token, never log it.
    base_url: String,
    chat_id: ChatId,
    timeout: Duration,
}

impl fmt::Debug for TelegramNotifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TelegramNotifier")
            .field("base_url", &"<redacted>")
            .field("chat_id", &self.chat_id)
            .finish()
    }
}

impl TelegramNotifier {
    /// Create a notifier for `chat_id` (numeric id or `@channelusername`).
    pub fn new(
        api_base: &str,
        bot_token: &str,
        chat_id: &str,
        timeout: Duration,
    ) -> Result<Self, BotError> {
        let chat_id = ChatId::parse(chat_id)?;
        Ok(Self {
            client: reqwest::Client::new(),
            base_url: format!("{}/bot{}", api_base.trim_end_matches('/'), bot_token),
            chat_id,
            timeout,
        })
    }

    /// Create from config values.
    pub fn from_config(
        config: &TelegramConfig,
        credentials: &Credentials,
    ) -> Result<Self, BotError> {
        Self::new(
            &config.api_base,
            &credentials.telegram_token,
            &credentials.chat_id,
            Duration::from_secs(config.request_timeout_secs),
        )
    }

    pub fn chat_id(&self) -> &ChatId {
        &self.chat_id
    }
}
