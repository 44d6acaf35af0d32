//! Real-time [`Clock`] backed by chrono and the tokio timer.

use crate::traits::Clock;
use async_trait::async_trait;
use std::time::Duration;

#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

#[async_trait]
impl Clock for SystemClock {
    fn now(&self) -> i64 {
        chrono::Utc::now().timestamp()
    }

    async fn sleep(&self, duration: Duration) {
        tokio::time::sleep(duration).await;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_system_clock_now_is_recent() {
        // 2023-11-14, well before any machine running these tests.
        assert!(SystemClock.now() > 1_700_000_000);
    }

    #[tokio::test]
    async fn test_system_clock_sleep_zero_returns() {
        SystemClock.sleep(Duration::ZERO).await;
    }
}
