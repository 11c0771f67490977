//! Rate-limit retry policy.

use std::time::Duration;

use rand::Rng;

/// Default number of rate-limit retries per call.
pub const DEFAULT_MAX_RETRIES: u32 = 5;

/// How the pipeline reacts to `429 RateLimitExceeded` responses that carry
/// an `X-Contentful-RateLimit-Reset` header.
///
/// The pipeline waits for the reset interval (plus up to `jitter`) and
/// resends the same request, at most `max_retries` times per call. With
/// [`RetryPolicy::unbounded`] it keeps retrying until the API accepts the
/// request or the call's [`Context`](crate::Context) ends.
///
/// # Example
///
/// ```rust
/// use std::time::Duration;
/// use contentful::RetryPolicy;
///
/// let policy = RetryPolicy::new(2).with_jitter(Duration::from_millis(250));
/// assert_eq!(policy.max_retries(), Some(2));
/// assert!(policy.allows_retry(1));
/// assert!(!policy.allows_retry(2));
///
/// assert!(RetryPolicy::unbounded().allows_retry(u32::MAX));
/// ```
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct RetryPolicy {
    max_retries: Option<u32>,
    jitter: Option<Duration>,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self::new(DEFAULT_MAX_RETRIES)
    }
}

impl RetryPolicy {
    /// Retries at most `max_retries` times. `0` disables retrying.
    #[must_use]
    pub const fn new(max_retries: u32) -> Self {
        Self {
            max_retries: Some(max_retries),
            jitter: None,
        }
    }

    /// Retries without limit.
    #[must_use]
    pub const fn unbounded() -> Self {
        Self {
            max_retries: None,
            jitter: None,
        }
    }

    /// Adds a random delay of up to `jitter` to every pause.
    #[must_use]
    pub const fn with_jitter(mut self, jitter: Duration) -> Self {
        self.jitter = Some(jitter);
        self
    }

    /// Returns the retry cap, or `None` when unbounded.
    #[must_use]
    pub const fn max_retries(&self) -> Option<u32> {
        self.max_retries
    }

    /// Returns the maximum jitter, if any.
    #[must_use]
    pub const fn jitter(&self) -> Option<Duration> {
        self.jitter
    }

    /// Returns `true` if another retry is allowed after `retries_done` retries.
    #[must_use]
    pub const fn allows_retry(&self, retries_done: u32) -> bool {
        match self.max_retries {
            Some(max) => retries_done < max,
            None => true,
        }
    }

    /// Returns the pause before the next attempt for a reset of `reset_secs`.
    #[must_use]
    pub fn delay_for(&self, reset_secs: u64) -> Duration {
        let base = Duration::from_secs(reset_secs);
        match self.jitter {
            Some(jitter) if !jitter.is_zero() => {
                let max_ms = u64::try_from(jitter.as_millis()).unwrap_or(u64::MAX);
                base + Duration::from_millis(rand::thread_rng().gen_range(0..=max_ms))
            }
            _ => base,
        }
    }
}
