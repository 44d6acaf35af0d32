use thiserror::Error;

/// Top-level error type for hwbot.
///
/// Variants are chosen by where the failure happened; see [`BotError::recovery`].
#[derive(Debug, Error)]
pub enum BotError {
    /// Transport failure while talking to the review API.
    #[error("network error: {0}")]
    Network(String),

    /// The review API answered with a non-200 status.
    #[error("review API returned HTTP {status}: {body}")]
    HttpStatus { status: u16, body: String },

    /// The review API answered 200 with a body we could not decode.
    #[error("decode error: {0}")]
    Decode(String),

    /// Error from the messaging channel.
    #[error("delivery error: {0}")]
    Delivery(String),

    /// Configuration error.
    #[error("config error: {0}")]
    Config(String),

    /// I/O error.
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}

/// What the poll loop does after an iteration fails.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Recovery {
    /// Tell the chat about the failure, then retry after the short delay.
    ReportAndRetry,
    /// Retry after the short delay without touching the chat.
    RetryQuietly,
    /// Retrying cannot help. Stop the loop and surface the error.
    Stop,
}

impl BotError {
    /// Recovery policy for a failure raised inside the poll loop.
    ///
    /// Delivery failures are not reported through the chat, since the chat
    /// is the component that just failed. Config and io errors are startup
    /// failures; if one shows up mid-loop it would repeat on every attempt.
    pub fn recovery(&self) -> Recovery {
        match self {
            Self::Delivery(_) => Recovery::RetryQuietly,
            Self::Network(_) | Self::HttpStatus { .. } | Self::Decode(_) => {
                Recovery::ReportAndRetry
            }
            Self::Config(_) | Self::Io(_) => Recovery::Stop,
        }
    }
}
