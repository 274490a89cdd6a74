use std::time::Duration;
use crate::config::constants;

/// Exponential backoff policy shared by the analysis and validation call
/// paths. The retryable-error predicate lives on `ScannerError::is_retryable`.
#[derive(Debug, Clone, Copy)]
pub struct RetryPolicy {
    pub max_attempts: u32,
    pub base_delay: Duration,
    pub max_delay: Duration,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            max_attempts: constants::DEFAULT_RETRY_ATTEMPTS,
            base_delay: Duration::from_secs(constants::DEFAULT_RETRY_BASE_DELAY_SECS),
            max_delay: Duration::from_secs(constants::DEFAULT_RETRY_MAX_DELAY_SECS),
        }
    }
}

impl RetryPolicy {
    /// Delay before the retry following the given 1-based attempt. Doubles
    /// from the floor and is clamped at the cap.
    pub fn backoff_delay(&self, attempt: u32) -> Duration {
        let exponent = attempt.saturating_sub(1).min(16);
        let delay = self.base_delay.saturating_mul(2u32.saturating_pow(exponent));
        delay.min(self.max_delay)
    }

    pub fn is_exhausted(&self, attempt: u32) -> bool {
        attempt >= self.max_attempts
    }
}
