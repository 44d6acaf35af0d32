mod credentials;
mod defaults;


pub use credentials::*;

use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;

use crate::error::BotError;
use defaults::*;

/// Top-level hwbot configuration (tunables only; secrets live in [`Credentials`]).
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub api: ApiConfig,
    #[serde(default)]
    pub telegram: TelegramConfig,
    #[serde(default)]
    pub poll: PollConfig,
    #[serde(default)]
    pub log: LogConfig,
}

/// Review API endpoint settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiConfig {
    #[serde(default = "default_api_url")]
    pub url: String,
    /// Per-request timeout. Without one a stalled connection blocks the loop forever.
    #[serde(default = "default_request_timeout")]
    pub request_timeout_secs: u64,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            url: default_api_url(),
            request_timeout_secs: default_request_timeout(),
        }
    }
}

impl ApiConfig {
    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }
}

/// Telegram Bot API settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TelegramConfig {
    #[serde(default = "default_telegram_api_base")]
    pub api_base: String,
    #[serde(default = "default_request_timeout")]
    pub request_timeout_secs: u64,
}

impl Default for TelegramConfig {
    fn default() -> Self {
        Self {
            api_base: default_telegram_api_base(),
            request_timeout_secs: default_request_timeout(),
        }
    }
}

/// Poll loop pacing.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PollConfig {
    /// Sleep after a successful iteration.
    #[serde(default = "default_poll_interval")]
    pub interval_secs: u64,
    /// Sleep after a failed iteration.
    #[serde(default = "default_retry_interval")]
    pub retry_secs: u64,
}

impl Default for PollConfig {
    fn default() -> Self {
        Self {
            interval_secs: default_poll_interval(),
            retry_secs: default_retry_interval(),
        }
    }
}

impl PollConfig {
    pub fn interval(&self) -> Duration {
        Duration::from_secs(self.interval_secs)
    }

    pub fn retry(&self) -> Duration {
        Duration::from_secs(self.retry_secs)
    }
}

/// How often the log file rolls over.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogRotation {
    Minutely,
    Hourly,
    #[default]
    Daily,
    Never,
}

/// Log file settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LogConfig {
    /// Filter used when `RUST_LOG` is not set.
    #[serde(default = "default_log_level")]
    pub level: String,
    #[serde(default = "default_log_dir")]
    pub dir: String,
    /// File name prefix; files are named `<prefix>.<date>.log`.
    #[serde(default = "default_log_prefix")]
    pub file_prefix: String,
    #[serde(default)]
    pub rotation: LogRotation,
    /// Rotated files kept on disk, the active one included.
    #[serde(default = "default_max_log_files")]
    pub max_files: usize,
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            dir: default_log_dir(),
            file_prefix: default_log_prefix(),
            rotation: LogRotation::default(),
            max_files: default_max_log_files(),
        }
    }
}

/// Where a loaded [`Config`] came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfigSource {
    File,
    /// The file did not exist.
    Defaults,
}

/// Load configuration from a TOML file.
///
/// Falls back to defaults if the file does not exist. Nothing is logged
/// here since this runs before the subscriber is installed; callers report
/// the returned [`ConfigSource`] once logging is up.
pub fn load(path: &str) -> Result<(Config, ConfigSource), BotError> {
    let path = Path::new(path);
    if !path.exists() {
        return Ok((Config::default(), ConfigSource::Defaults));
    }

    let content = std::fs::read_to_string(path)
        .map_err(|e| BotError::Config(format!("failed to read {}: {}", path.display(), e)))?;

    let config: Config = toml::from_str(&content)
        .map_err(|e| BotError::Config(format!("failed to parse config: {}", e)))?;

    Ok((config, ConfigSource::File))
}
