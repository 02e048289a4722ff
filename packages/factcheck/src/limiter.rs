//! Rate limiting and backoff for the model-provider calls.
//!
//! The limiter is an injected instance, one per external service, holding the
//! only state shared across calls: the pacing clock and the cooldown
//! deadline. Pacing uses the governor crate (check-then-wait-then-call before
//! every attempt); retries apply only to rate-limit-class failures, with
//! exponential backoff and jitter, honoring a provider-supplied
//! "retry after N seconds" hint when one appears in the error text.

use std::future::Future;
use std::num::NonZeroU32;
use std::sync::{Mutex, OnceLock};
use std::time::{Duration, Instant};

use governor::clock::DefaultClock;
use governor::state::{InMemoryState, NotKeyed};
use governor::Quota;
use nonzero_ext::nonzero;
use regex::Regex;
use tracing::{debug, warn};

use crate::error::{OracleError, OracleResult};

type DirectLimiter = governor::RateLimiter<NotKeyed, InMemoryState, DefaultClock>;

/// Retry and pacing policy.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LimiterConfig {
    /// Minimum spacing between calls to the service.
    pub base_delay: Duration,

    /// Retries after the first failed attempt.
    pub max_retries: u32,

    /// Ceiling on a single computed backoff.
    pub max_backoff: Duration,
}

impl Default for LimiterConfig {
    fn default() -> Self {
        Self {
            base_delay: Duration::from_secs(1),
            max_retries: 3,
            max_backoff: Duration::from_secs(60),
        }
    }
}

/// Call counters, readable for diagnostics.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CallStats {
    pub attempts: u64,
    pub successes: u64,
    pub failures: u64,
    pub retries: u64,
}

/// Paced, retrying wrapper around calls to one external service.
pub struct RateLimiter {
    name: String,
    pacer: DirectLimiter,
    config: LimiterConfig,
    cooldown_until: Mutex<Option<Instant>>,
    stats: Mutex<CallStats>,
}

impl RateLimiter {
    /// Create a limiter named after the service it guards.
    pub fn new(name: impl Into<String>, config: LimiterConfig) -> Self {
        let quota = Quota::with_period(config.base_delay)
            .unwrap_or_else(|| Quota::per_second(nonzero!(1u32)))
            .allow_burst(NonZeroU32::new(1).expect("burst of 1 is nonzero"));

        Self {
            name: name.into(),
            pacer: governor::RateLimiter::direct(quota),
            config,
            cooldown_until: Mutex::new(None),
            stats: Mutex::new(CallStats::default()),
        }
    }

    /// Current call counters.
    pub fn stats(&self) -> CallStats {
        *self.stats.lock().expect("limiter stats poisoned")
    }

    /// Run an operation with pacing and rate-limit retries.
    ///
    /// Non-rate-limit failures propagate immediately; rate-limit-class
    /// failures are retried up to the configured count, then surface as
    /// [`OracleError::RateLimitExhausted`].
    pub async fn call_with_backoff<T, F, Fut>(&self, op: F) -> OracleResult<T>
    where
        F: Fn() -> Fut,
        Fut: Future<Output = OracleResult<T>>,
    {
        let mut attempt: u32 = 0;

        loop {
            self.wait_for_cooldown().await;
            self.pacer.until_ready().await;

            {
                let mut stats = self.stats.lock().expect("limiter stats poisoned");
                stats.attempts += 1;
            }

            match op().await {
                Ok(value) => {
                    let mut stats = self.stats.lock().expect("limiter stats poisoned");
                    stats.successes += 1;
                    return Ok(value);
                }
                Err(err) => {
                    {
                        let mut stats = self.stats.lock().expect("limiter stats poisoned");
                        stats.failures += 1;
                    }

                    let message = err.to_string();
                    if !is_rate_limit_error(&message) {
                        return Err(err);
                    }

                    attempt += 1;
                    if attempt > self.config.max_retries {
                        warn!(
                            service = %self.name,
                            attempts = attempt,
                            "rate limit retries exhausted"
                        );
                        return Err(OracleError::RateLimitExhausted { attempts: attempt });
                    }

                    let delay = match extract_retry_after(&message) {
                        // Provider told us when to come back; add a small
                        // buffer on top of the hint.
                        Some(hint) => hint + Duration::from_secs(2),
                        None => self.backoff_delay(attempt),
                    };

                    self.set_cooldown(delay);
                    {
                        let mut stats = self.stats.lock().expect("limiter stats poisoned");
                        stats.retries += 1;
                    }

                    warn!(
                        service = %self.name,
                        attempt,
                        max = self.config.max_retries,
                        delay_ms = delay.as_millis() as u64,
                        "rate limited, backing off"
                    );
                    tokio::time::sleep(delay).await;
                }
            }
        }
    }

    /// Exponential backoff with 10% jitter, capped at `max_backoff`.
    fn backoff_delay(&self, attempt: u32) -> Duration {
        let exp = (self.config.base_delay.as_secs_f64() * 2f64.powi(attempt as i32))
            .min(self.config.max_backoff.as_secs_f64());
        let jitter = fastrand::f64() * 0.1 * exp;
        Duration::from_secs_f64(exp + jitter)
    }

    async fn wait_for_cooldown(&self) {
        let deadline = {
            let guard = self.cooldown_until.lock().expect("cooldown state poisoned");
            *guard
        };

        if let Some(deadline) = deadline {
            let now = Instant::now();
            if deadline > now {
                let wait = deadline - now;
                debug!(service = %self.name, wait_ms = wait.as_millis() as u64, "in cooldown");
                tokio::time::sleep(wait).await;
            }
            let mut guard = self.cooldown_until.lock().expect("cooldown state poisoned");
            if guard.map(|d| d <= Instant::now()).unwrap_or(false) {
                *guard = None;
            }
        }
    }

    fn set_cooldown(&self, duration: Duration) {
        let mut guard = self.cooldown_until.lock().expect("cooldown state poisoned");
        *guard = Some(Instant::now() + duration);
    }
}

/// Whether an error message describes a rate-limit or quota failure.
fn is_rate_limit_error(message: &str) -> bool {
    let lower = message.to_lowercase();
    ["429", "quota", "rate limit", "exceeded", "capacity"]
        .iter()
        .any(|term| lower.contains(term))
}

/// Pull a provider-supplied retry delay out of an error message.
///
/// Understands the Google `retry_delay { seconds: N }` block, HTTP
/// `retry-after: N` headers echoed into messages, and a bare `seconds: N`.
fn extract_retry_after(message: &str) -> Option<Duration> {
    static PATTERNS: OnceLock<Vec<Regex>> = OnceLock::new();

    let patterns = PATTERNS.get_or_init(|| {
        vec![
            Regex::new(r"retry_delay\s*\{\s*seconds:\s*(\d+)").expect("valid regex"),
            Regex::new(r"(?i)retry-after:\s*(\d+)").expect("valid regex"),
            Regex::new(r"seconds:\s*(\d+)").expect("valid regex"),
        ]
    });

    for pattern in patterns {
        if let Some(caps) = pattern.captures(message) {
            if let Ok(secs) = caps[1].parse::<u64>() {
                return Some(Duration::from_secs(secs));
            }
        }
    }

    None
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicU32, Ordering};

    fn fast_config() -> LimiterConfig {
        LimiterConfig {
            base_delay: Duration::from_millis(1),
            max_retries: 2,
            max_backoff: Duration::from_millis(10),
        }
    }

    #[test]
    fn classifies_rate_limit_errors() {
        assert!(is_rate_limit_error("HTTP 429 Too Many Requests"));
        assert!(is_rate_limit_error("Daily quota exceeded"));
        assert!(is_rate_limit_error("Rate limit hit, slow down"));
        assert!(!is_rate_limit_error("connection refused"));
    }

    #[test]
    fn extracts_retry_hints() {
        assert_eq!(
            extract_retry_after("error: retry_delay { seconds: 30 }"),
            Some(Duration::from_secs(30))
        );
        assert_eq!(
            extract_retry_after("Retry-After: 12"),
            Some(Duration::from_secs(12))
        );
        assert_eq!(extract_retry_after("boom"), None);
    }

    #[tokio::test]
    async fn retries_rate_limit_then_succeeds() {
        let limiter = RateLimiter::new("test", fast_config());
        let calls = AtomicU32::new(0);

        let result = limiter
            .call_with_backoff(|| {
                let n = calls.fetch_add(1, Ordering::SeqCst);
                async move {
                    if n == 0 {
                        Err(OracleError::Provider("429 too many requests".into()))
                    } else {
                        Ok("done")
                    }
                }
            })
            .await;

        assert_eq!(result.unwrap(), "done");
        assert_eq!(calls.load(Ordering::SeqCst), 2);
        let stats = limiter.stats();
        assert_eq!(stats.successes, 1);
        assert_eq!(stats.retries, 1);
    }

    #[tokio::test]
    async fn non_rate_limit_errors_propagate_immediately() {
        let limiter = RateLimiter::new("test", fast_config());
        let calls = AtomicU32::new(0);

        let result: OracleResult<()> = limiter
            .call_with_backoff(|| {
                calls.fetch_add(1, Ordering::SeqCst);
                async { Err(OracleError::EmptyResponse) }
            })
            .await;

        assert!(matches!(result, Err(OracleError::EmptyResponse)));
        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn exhausted_retries_surface_as_hard_failure() {
        let limiter = RateLimiter::new("test", fast_config());

        let result: OracleResult<()> = limiter
            .call_with_backoff(|| async {
                Err(OracleError::Provider("quota exceeded".into()))
            })
            .await;

        assert!(matches!(
            result,
            Err(OracleError::RateLimitExhausted { attempts: 3 })
        ));
    }
}
