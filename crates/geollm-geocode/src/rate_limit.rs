//! Minimum-interval gate for outbound geocoder calls.

use std::time::Duration;
use tokio::sync::Mutex;
use tokio::time::Instant;

/// Enforces a minimum gap between consecutive dispatches.
///
/// One instance is shared (behind an `Arc`) by every caller that talks to the
/// same backend. The lock is held while waiting, so concurrent callers are
/// released one at a time, each at least `min_interval` after the previous.
#[derive(Debug)]
pub struct RateLimiter {
    min_interval: Duration,
    last_dispatch: Mutex<Option<Instant>>,
}

impl RateLimiter {
    pub fn new(min_interval: Duration) -> Self {
        Self { min_interval, last_dispatch: Mutex::new(None) }
    }

    /// Wait until a call may be dispatched, then record the dispatch time
    pub async fn acquire(&self) {
        let mut last = self.last_dispatch.lock().await;
        if let Some(previous) = *last {
            let ready_at = previous + self.min_interval;
            let now = Instant::now();
            if ready_at > now {
                tracing::debug!(wait_ms = (ready_at - now).as_millis() as u64, "Throttling geocoder call");
                tokio::time::sleep_until(ready_at).await;
            }
        }
        *last = Some(Instant::now());
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    #[tokio::test]
    async fn test_first_call_is_immediate() {
        let limiter = RateLimiter::new(Duration::from_secs(5));
        let start = std::time::Instant::now();
        limiter.acquire().await;
        assert!(start.elapsed() < Duration::from_secs(1));
    }

    #[tokio::test]
    async fn test_sequential_calls_are_spaced() {
        let interval = Duration::from_millis(50);
        let limiter = RateLimiter::new(interval);
        let start = std::time::Instant::now();
        for _ in 0..4 {
            limiter.acquire().await;
        }
        assert!(start.elapsed() >= interval * 3);
    }

    #[tokio::test]
    async fn test_concurrent_callers_share_the_gate() {
        let interval = Duration::from_millis(50);
        let limiter = Arc::new(RateLimiter::new(interval));
        let start = std::time::Instant::now();

        let handles: Vec<_> = (0..4)
            .map(|_| {
                let limiter = Arc::clone(&limiter);
                tokio::spawn(async move { limiter.acquire().await })
            })
            .collect();
        for handle in handles {
            handle.await.unwrap();
        }

        assert!(start.elapsed() >= interval * 3);
    }
}
