//! Default value functions used by serde for config deserialization.

pub fn default_api_url() -> String {
    "https://practicum.yandex.ru/api/user_api/homework_statuses/".to_string()
}

pub fn default_request_timeout() -> u64 {
    30
}

pub fn default_telegram_api_base() -> String {
    "https://api.telegram.org".to_string()
}

pub fn default_poll_interval() -> u64 {
    300
}

pub fn default_retry_interval() -> u64 {
    5
}

/// Debug for hwbot's own crates only; dependencies stay at info.
pub fn default_log_level() -> String {
    "info,hwbot=debug,hwbot_core=debug,hwbot_practicum=debug,hwbot_channels=debug".to_string()
}

pub fn default_log_dir() -> String {
    ".".to_string()
}

pub fn default_log_prefix() -> String {
    "homework".to_string()
}

pub fn default_max_log_files() -> usize {
    5
}
