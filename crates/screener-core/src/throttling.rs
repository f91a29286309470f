use std::num::NonZeroU32;
use std::sync::Arc;
use std::time::Duration;

use governor::clock::DefaultClock;
use governor::state::direct::NotKeyed;
use governor::state::InMemoryState;
use governor::{Quota, RateLimiter};

/// Client-side request quota shared by every call an adapter makes.
///
/// Unlike a rejecting limiter, callers wait for budget: a throttled request
/// is late, never failed.
#[derive(Clone)]
pub struct RequestQuota {
    limiter: Arc<DirectRateLimiter>,
    per_minute: u32,
}

type DirectRateLimiter = RateLimiter<NotKeyed, InMemoryState, DefaultClock>;

impl RequestQuota {
    pub fn per_minute(limit: NonZeroU32) -> Self {
        Self {
            limiter: Arc::new(RateLimiter::direct(quota_from_window(
                Duration::from_secs(60),
                limit,
            ))),
            per_minute: limit.get(),
        }
    }

    /// Builds a quota from an optional configured limit; `None` or zero disables it.
    pub fn from_limit(limit: Option<u32>) -> Option<Self> {
        limit.and_then(NonZeroU32::new).map(Self::per_minute)
    }

    /// Waits until one request worth of budget is available.
    pub async fn acquire(&self) {
        self.limiter.until_ready().await;
    }

    /// Takes budget without waiting; `false` when the quota is exhausted.
    pub fn try_acquire(&self) -> bool {
        self.limiter.check().is_ok()
    }

    pub fn limit(&self) -> u32 {
        self.per_minute
    }
}

impl std::fmt::Debug for RequestQuota {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RequestQuota")
            .field("per_minute", &self.per_minute)
            .finish()
    }
}

fn quota_from_window(quota_window: Duration, limit: NonZeroU32) -> Quota {
    let seconds_per_cell = (quota_window.as_secs_f64() / f64::from(limit.get())).max(0.001);
    let period = Duration::from_secs_f64(seconds_per_cell);

    match Quota::with_period(period) {
        Some(quota) => quota.allow_burst(limit),
        None => Quota::per_minute(limit),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn burst_is_limited_to_configured_quota() {
        let quota = RequestQuota::from_limit(Some(2)).expect("quota enabled");

        assert!(quota.try_acquire());
        assert!(quota.try_acquire());
        assert!(!quota.try_acquire(), "third request exceeds the burst");
        assert_eq!(quota.limit(), 2);
    }

    #[test]
    fn missing_or_zero_limit_disables_quota() {
        assert!(RequestQuota::from_limit(None).is_none());
        assert!(RequestQuota::from_limit(Some(0)).is_none());
    }

    #[tokio::test]
    async fn acquire_returns_immediately_while_budget_remains() {
        let quota = RequestQuota::from_limit(Some(5)).expect("quota enabled");
        for _ in 0..5 {
            quota.acquire().await;
        }
        assert!(!quota.try_acquire());
    }
}
