use std::fmt;

use crate::error::BotError;

pub const PRACTICUM_TOKEN_VAR: &str = "PRAKTIKUM_TOKEN";
pub const TELEGRAM_TOKEN_VAR: &str = "TELEGRAM_TOKEN";
pub const TELEGRAM_CHAT_ID_VAR: &str = "TELEGRAM_CHAT_ID";

/// The three secrets the bot needs. Loaded once at startup and never logged.
#[derive(Clone, PartialEq, Eq)]
pub struct Credentials {
    pub practicum_token: String,
    pub telegram_token: String,
    pub chat_id: String,
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("practicum_token", &"<redacted>")
            .field("telegram_token", &"<redacted>")
            .field("chat_id", &"<redacted>")
            .finish()
    }
}

impl Credentials {
    /// Load from the process environment, reading `.env` first if present.
    pub fn from_env() -> Result<Self, BotError> {
        if let Err(e) = dotenvy::dotenv() {
            if !e.not_found() {
                tracing::warn!("failed to read .env: {e}");
            }
        }
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Load through an arbitrary key lookup. Empty values count as missing.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, BotError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let require = |key: &str| {
            lookup(key)
                .map(|v| v.trim().to_string())
                .filter(|v| !v.is_empty())
                .ok_or_else(|| BotError::Config(format!("{key} not set")))
        };

        Ok(Self {
            practicum_token: require(PRACTICUM_TOKEN_VAR)?,
            telegram_token: require(TELEGRAM_TOKEN_VAR)?,
            chat_id: require(TELEGRAM_CHAT_ID_VAR)?,
        })
    }
}
