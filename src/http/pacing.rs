//! Request pacing against the account's per-minute ceiling
//!
//! The remote service publishes a requests-per-minute limit. Instead of a
//! token bucket, requests are spaced by a fixed interval of
//! `60 / max_requests` seconds measured from the moment the previous request
//! completed.
//!
//! [`Pacer`] is a plain `Copy` value. The owner replaces it after every
//! request with the value returned by [`Pacer::after_request`], so the
//! next-allowed time is always explicit state rather than a hidden mutation.

use crate::types::JsonValue;
use std::time::Duration;
use tokio::time::Instant;

/// Account-level rate limit as reported by the remote service
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct RateLimit {
    /// Whether the service enforces a ceiling for this account
    pub enabled: bool,
    /// Maximum requests per minute
    pub max_requests: u32,
}

impl RateLimit {
    /// A rate limit that never paces
    pub fn disabled() -> Self {
        Self::default()
    }

    /// An enabled rate limit of `max_requests` per minute
    pub fn per_minute(max_requests: u32) -> Self {
        Self {
            enabled: true,
            max_requests,
        }
    }

    /// Read the `{enabled, max_requests}` object from a response payload.
    ///
    /// Missing or mistyped fields fall back to a disabled limit.
    pub fn from_payload(data: &JsonValue) -> Self {
        let enabled = data
            .get("enabled")
            .and_then(JsonValue::as_bool)
            .unwrap_or(false);
        let max_requests = data
            .get("max_requests")
            .and_then(JsonValue::as_u64)
            .map_or(0, |n| u32::try_from(n).unwrap_or(u32::MAX));

        Self {
            enabled,
            max_requests,
        }
    }

    /// Spacing between consecutive requests, or `None` when no pacing applies
    pub fn interval(&self) -> Option<Duration> {
        if !self.enabled || self.max_requests == 0 {
            return None;
        }
        Some(Duration::from_secs(60) / self.max_requests)
    }
}

/// Next-allowed-request bookkeeping
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Pacer {
    interval: Option<Duration>,
    next_request: Option<Instant>,
}

impl Pacer {
    /// Create a pacer for the given rate limit
    pub fn new(limit: RateLimit) -> Self {
        Self {
            interval: limit.interval(),
            next_request: None,
        }
    }

    /// A pacer that never waits
    pub fn unpaced() -> Self {
        Self::default()
    }

    /// Spacing between requests
    pub fn interval(&self) -> Option<Duration> {
        self.interval
    }

    /// Earliest instant the next request may be sent
    pub fn next_request(&self) -> Option<Instant> {
        self.next_request
    }

    /// Whether any pacing is applied
    pub fn is_enabled(&self) -> bool {
        self.interval.is_some()
    }

    /// Pacer state after a request that finished at `now`.
    ///
    /// The next-allowed time never moves backwards.
    #[must_use]
    pub fn after_request(self, now: Instant) -> Self {
        let Some(interval) = self.interval else {
            return self;
        };

        let candidate = now + interval;
        let next_request = match self.next_request {
            Some(previous) if previous > candidate => previous,
            _ => candidate,
        };

        Self {
            interval: self.interval,
            next_request: Some(next_request),
        }
    }

    /// How long a request issued at `now` has to wait
    pub fn delay_from(&self, now: Instant) -> Duration {
        self.next_request
            .map_or(Duration::ZERO, |next| next.saturating_duration_since(now))
    }

    /// Wait until the next request is allowed
    pub async fn wait(&self) {
        if let Some(next) = self.next_request {
            tokio::time::sleep_until(next).await;
        }
    }
}

#[cfg(test)]
mod pacing_tests {
    use super::*;
    use serde_json::json;
    use test_case::test_case;

    #[test_case(60, 1_000 ; "sixty per minute")]
    #[test_case(30, 2_000 ; "thirty per minute")]
    #[test_case(120, 500 ; "one hundred twenty per minute")]
    #[test_case(600, 100 ; "six hundred per minute")]
    fn test_rate_limit_interval(max_requests: u32, expected_ms: u64) {
        let limit = RateLimit::per_minute(max_requests);
        assert_eq!(limit.interval(), Some(Duration::from_millis(expected_ms)));
    }

    #[test]
    fn test_rate_limit_disabled_has_no_interval() {
        let limit = RateLimit {
            enabled: false,
            max_requests: 60,
        };
        assert_eq!(limit.interval(), None);
        assert_eq!(RateLimit::per_minute(0).interval(), None);
    }

    #[test]
    fn test_rate_limit_from_payload() {
        let limit = RateLimit::from_payload(&json!({"enabled": true, "max_requests": 60}));
        assert_eq!(limit, RateLimit::per_minute(60));

        let limit = RateLimit::from_payload(&json!({"enabled": false, "max_requests": 60}));
        assert!(!limit.enabled);
        assert_eq!(limit.interval(), None);
    }

    #[test]
    fn test_rate_limit_from_malformed_payload() {
        assert_eq!(RateLimit::from_payload(&json!({})), RateLimit::disabled());
        assert_eq!(RateLimit::from_payload(&json!(null)), RateLimit::disabled());
        assert_eq!(
            RateLimit::from_payload(&json!({"enabled": "yes", "max_requests": "60"})),
            RateLimit::disabled()
        );
    }

    #[test]
    fn test_pacer_records_next_request() {
        let now = Instant::now();
        let pacer = Pacer::new(RateLimit::per_minute(60)).after_request(now);

        assert_eq!(pacer.next_request(), Some(now + Duration::from_secs(1)));
        assert_eq!(pacer.delay_from(now), Duration::from_secs(1));
        assert_eq!(
            pacer.delay_from(now + Duration::from_millis(400)),
            Duration::from_millis(600)
        );
        assert_eq!(pacer.delay_from(now + Duration::from_secs(5)), Duration::ZERO);
    }

    #[test]
    fn test_pacer_without_limit_never_waits() {
        let now = Instant::now();
        let pacer = Pacer::new(RateLimit {
            enabled: false,
            max_requests: 1,
        })
        .after_request(now)
        .after_request(now);

        assert!(!pacer.is_enabled());
        assert_eq!(pacer.next_request(), None);
        assert_eq!(pacer.delay_from(now), Duration::ZERO);
    }

    #[test]
    fn test_pacer_next_request_is_monotonic() {
        let now = Instant::now();
        let mut pacer = Pacer::new(RateLimit::per_minute(6));
        let mut previous = None;

        for offset in [0u64, 3, 1, 20, 15] {
            pacer = pacer.after_request(now + Duration::from_secs(offset));
            let next = pacer.next_request();
            assert!(next >= previous);
            previous = next;
        }
    }

    #[tokio::test(start_paused = true)]
    async fn test_pacer_wait_sleeps_until_next_request() {
        let start = Instant::now();
        let pacer = Pacer::new(RateLimit::per_minute(60)).after_request(start);

        pacer.wait().await;

        assert!(Instant::now() >= start + Duration::from_secs(1));
    }

    #[tokio::test(start_paused = true)]
    async fn test_unpaced_wait_returns_immediately() {
        let start = Instant::now();
        Pacer::unpaced().wait().await;
        assert_eq!(Instant::now(), start);
    }
}
