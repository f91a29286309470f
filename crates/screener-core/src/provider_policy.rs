use std::time::Duration;

use crate::ValidationError;

/// Pacing and timeout knobs for one data provider.
///
/// `batch_size` and `inter_batch_delay` are the primary throttle: a batch is
/// fetched concurrently, then the fetcher sleeps before the next one.
/// `requests_per_minute` is an optional hard ceiling on top of that.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProviderPolicy {
    pub batch_size: usize,
    pub inter_batch_delay: Duration,
    pub request_timeout: Duration,
    pub segment_timeout: Duration,
    pub requests_per_minute: Option<u32>,
}

impl ProviderPolicy {
    /// Defaults tuned for Finnhub's free tier.
    pub fn finnhub_default() -> Self {
        Self {
            batch_size: 100,
            inter_batch_delay: Duration::from_secs(1),
            request_timeout: Duration::from_secs(5),
            segment_timeout: Duration::from_secs(10),
            requests_per_minute: None,
        }
    }

    pub fn with_batch_size(mut self, batch_size: usize) -> Self {
        self.batch_size = batch_size;
        self
    }

    pub fn with_inter_batch_delay(mut self, delay: Duration) -> Self {
        self.inter_batch_delay = delay;
        self
    }

    pub fn with_requests_per_minute(mut self, limit: Option<u32>) -> Self {
        self.requests_per_minute = limit;
        self
    }

    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.batch_size == 0 {
            return Err(ValidationError::ZeroBatchSize);
        }
        if self.requests_per_minute == Some(0) {
            return Err(ValidationError::ZeroRequestQuota);
        }
        Ok(())
    }

    pub(crate) fn request_timeout_ms(&self) -> u64 {
        self.request_timeout.as_millis().min(u128::from(u64::MAX)) as u64
    }
}

impl Default for ProviderPolicy {
    fn default() -> Self {
        Self::finnhub_default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn finnhub_policy_matches_free_tier() {
        let policy = ProviderPolicy::finnhub_default();

        assert_eq!(policy.batch_size, 100);
        assert_eq!(policy.inter_batch_delay, Duration::from_secs(1));
        assert_eq!(policy.requests_per_minute, None);
        assert!(policy.validate().is_ok());
    }

    #[test]
    fn zero_batch_size_is_rejected() {
        let policy = ProviderPolicy::finnhub_default().with_batch_size(0);
        assert_eq!(policy.validate(), Err(ValidationError::ZeroBatchSize));
    }

    #[test]
    fn zero_quota_is_rejected_but_none_is_fine() {
        let policy = ProviderPolicy::finnhub_default().with_requests_per_minute(Some(0));
        assert_eq!(policy.validate(), Err(ValidationError::ZeroRequestQuota));

        let policy = policy.with_requests_per_minute(None);
        assert!(policy.validate().is_ok());
    }
}
