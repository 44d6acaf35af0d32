//! Authenticated fetch of homework review statuses.
//!
//! One `GET` per call with `Authorization: OAuth <token>` and a `from_date`
//! query parameter. Failures are classified but never retried here.

use async_trait::async_trait;
use hwbot_core::{
    config::{ApiConfig, Credentials},
    error::BotError,
    homework::HomeworkStatuses,
    traits::ReviewSource,
};
use reqwest::{
    header::{HeaderValue, AUTHORIZATION},
    StatusCode, Url,
};
use std::time::Duration;
use tracing::debug;

/// Maximum characters of an error body kept in [`BotError::HttpStatus`].
const ERROR_BODY_LIMIT: usize = 200;

/// Practicum homework status client.
pub struct PracticumClient {
    client: reqwest::Client,
    url: Url,
    auth: HeaderValue,
    timeout: Duration,
}

impl PracticumClient {
    /// Validates the endpoint and token up front, so a bad setting fails at
    /// startup instead of on every poll.
    pub fn new(url: &str, token: &str, timeout: Duration) -> Result<Self, BotError> {
        let url = Url::parse(url)
            .map_err(|e| BotError::Config(format!("invalid review API url {url:?}: {e}")))?;
        if !matches!(url.scheme(), "http" | "https") {
            return Err(BotError::Config(format!(
                "review API url must be http or https, got {}",
                url.scheme()
            )));
        }

        let mut auth = HeaderValue::from_str(&format!("OAuth {token}")).map_err(|_| {
            BotError::Config("practicum token contains invalid header characters".into())
        })?;
        auth.set_sensitive(true);

        Ok(Self {
            client: reqwest::Client::new(),
            url,
            auth,
            timeout,
        })
    }

    /// Create from config values.
    pub fn from_config(api: &ApiConfig, credentials: &Credentials) -> Result<Self, BotError> {
        Self::new(
            &api.url,
            &credentials.practicum_token,
            api.request_timeout(),
        )
    }

    fn build_request(&self, since: i64) -> Result<reqwest::Request, BotError> {
        self.client
            .get(self.url.clone())
            .header(AUTHORIZATION, self.auth.clone())
            .query(&[("from_date", since)])
            .timeout(self.timeout)
            .build()
            .map_err(|e| BotError::Config(format!("invalid review API request: {e}")))
    }
}

/// Map a response status and body to the decoded statuses or a typed error.
fn parse_response(status: StatusCode, body: &str) -> Result<HomeworkStatuses, BotError> {
    if status != StatusCode::OK {
        return Err(BotError::HttpStatus {
            status: status.as_u16(),
            body: body.chars().take(ERROR_BODY_LIMIT).collect(),
        });
    }
    serde_json::from_str(body)
        .map_err(|e| BotError::Decode(format!("homework_statuses body: {e}")))
}

#[async_trait]
impl ReviewSource for PracticumClient {
    fn name(&self) -> &str {
        "practicum"
    }

    async fn fetch_homeworks(&self, since: Option<i64>) -> Result<HomeworkStatuses, BotError> {
        let since = since.unwrap_or_else(|| chrono::Utc::now().timestamp());
        let request = self.build_request(since)?;
        debug!("practicum: GET {} from_date={since}", self.url);

        let resp = self
            .client
            .execute(request)
            .await
            .map_err(|e| BotError::Network(format!("practicum request failed: {e}")))?;

        let status = resp.status();
        let body = resp
            .text()
            .await
            .map_err(|e| BotError::Network(format!("practicum body read failed: {e}")))?;

        let statuses = parse_response(status, &body)?;
        debug!(
            "practicum: {} homework(s), current_date={:?}",
            statuses.homeworks.len(),
            statuses.current_date
        );
        Ok(statuses)
    }
}
