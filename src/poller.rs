//! The polling-and-notify loop.
//!
//! Each iteration fetches review state since the watermark, notifies about the
//! first returned record, and advances the watermark. Failures are logged and
//! handled per [`Recovery`] policy: usually the loop retries after a short
//! delay with the watermark untouched, but errors no retry can fix end it.


use hwbot_core::{
    config::PollConfig,
    error::{BotError, Recovery},
    homework::format_status,
    traits::{Clock, DeliveryReceipt, Notifier, ReviewSource},
};
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, error, info, warn};

/// Result of one successful iteration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TickOutcome {
    /// A status message was delivered.
    Notified {
        receipt: DeliveryReceipt,
        watermark: i64,
    },
    /// Nothing new since the watermark.
    NoChanges { watermark: i64 },
}

pub struct Poller {
    source: Arc<dyn ReviewSource>,
    notifier: Arc<dyn Notifier>,
    clock: Arc<dyn Clock>,
    config: PollConfig,
    /// Only homework checks newer than this are requested.
    watermark: i64,
}

impl Poller {
    /// Build a poller whose watermark starts at the clock's current time.
    pub fn new(
        source: Arc<dyn ReviewSource>,
        notifier: Arc<dyn Notifier>,
        clock: Arc<dyn Clock>,
        config: PollConfig,
    ) -> Self {
        let watermark = clock.now();
        Self {
            source,
            notifier,
            clock,
            config,
            watermark,
        }
    }

    pub fn watermark(&self) -> i64 {
        self.watermark
    }

    /// Fetch, notify about the first record if any, advance the watermark.
    ///
    /// On error the watermark is left as it was, so the same window is
    /// fetched again on the next attempt.
    pub async fn tick(&mut self) -> Result<TickOutcome, BotError> {
        let statuses = self.source.fetch_homeworks(Some(self.watermark)).await?;

        // The API is assumed to list the newest check first; only that one is reported.
        let receipt = match statuses.latest() {
            Some(check) => {
                let message = format_status(check);
                Some(self.notifier.notify(&message).await?)
            }
            None => None,
        };

        if let Some(current_date) = statuses.current_date {
            self.watermark = current_date;
        }

        Ok(match receipt {
            Some(receipt) => TickOutcome::Notified {
                receipt,
                watermark: self.watermark,
            },
            None => TickOutcome::NoChanges {
                watermark: self.watermark,
            },
        })
    }

    /// Run one iteration including error recovery. Returns how long to sleep
    /// before the next one, or the error if it calls for [`Recovery::Stop`].
    pub async fn run_once(&mut self) -> Result<Duration, BotError> {
        let delay = match self.tick().await {
            Ok(TickOutcome::Notified { receipt, watermark }) => {
                info!(
                    "status update delivered (message {}), watermark={watermark}",
                    receipt.message_id
                );
                self.config.interval()
            }
            Ok(TickOutcome::NoChanges { watermark }) => {
                debug!("no homework updates, watermark={watermark}");
                self.config.interval()
            }
            Err(e) if e.recovery() == Recovery::Stop => {
                error!("bot cannot continue: {e} (source={})", self.source.name());
                return Err(e);
            }
            Err(e) => {
                self.recover(&e).await;
                self.config.retry()
            }
        };
        Ok(delay)
    }

    async fn recover(&self, err: &BotError) {
        error!(
            "bot failed with error: {err} (source={}, watermark={})",
            self.source.name(),
            self.watermark
        );

        match err.recovery() {
            Recovery::ReportAndRetry => {
                // Best effort: a failing chat must not take the loop down.
                if let Err(e) = self.notifier.notify(&format!("Bot failure: {err}")).await {
                    error!("failed to report error via {}: {e}", self.notifier.name());
                }
            }
            Recovery::RetryQuietly => {
                warn!(
                    "{} delivery failed, retrying in {}s",
                    self.notifier.name(),
                    self.config.retry_secs
                );
            }
            Recovery::Stop => {}
        }
    }

    /// Loop until an iteration fails with an error retrying cannot fix.
    pub async fn run(mut self) -> Result<(), BotError> {
        info!(
            "polling {} every {}s (retry after {}s), watermark={}",
            self.source.name(),
            self.config.interval_secs,
            self.config.retry_secs,
            self.watermark()
        );
        loop {
            let delay = self.run_once().await?;
            self.clock.sleep(delay).await;
        }
    }
}
