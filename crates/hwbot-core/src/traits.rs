use crate::{error::BotError, homework::HomeworkStatuses};
use async_trait::async_trait;
use std::time::Duration;

/// Confirmation that a message reached the chat.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DeliveryReceipt {
    pub message_id: i64,
    pub chat_id: i64,
}

/// Source of homework review state.
///
/// Implementations perform exactly one request per call and never retry;
/// retrying is the poll loop's job.
#[async_trait]
pub trait ReviewSource: Send + Sync {
    /// Human-readable source name.
    fn name(&self) -> &str;

    /// Fetch review records changed since `since` (Unix seconds).
    /// `None` means "since now".
    async fn fetch_homeworks(&self, since: Option<i64>) -> Result<HomeworkStatuses, BotError>;
}

/// Delivers text to the single configured chat.
#[async_trait]
pub trait Notifier: Send + Sync {
    /// Human-readable channel name.
    fn name(&self) -> &str;

    /// Send a text message.
    async fn notify(&self, text: &str) -> Result<DeliveryReceipt, BotError>;
}

/// Wall clock plus sleeping, so the poll loop can be driven without real delays.
#[async_trait]
pub trait Clock: Send + Sync {
    /// Current Unix time in seconds.
    fn now(&self) -> i64;

    async fn sleep(&self, duration: Duration);
}
