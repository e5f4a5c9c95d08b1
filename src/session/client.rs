//! Session client implementation

use crate::auth::{Authenticator, Credentials, Session};
use crate::engine::DayFetcher;
use crate::error::Result;
use crate::http::{HttpClient, HttpClientConfig, Pacer, RateLimit, RequestConfig};
use crate::partition::DayWindow;
use crate::reports::Report;
use crate::types::RawRecord;
use async_trait::async_trait;
use serde_json::Value;
use tokio::time::Instant;
use tracing::{debug, info, warn};

/// Rate limit status endpoint path
pub const RATE_LIMIT_PATH: &str = "/api/1/users/rate_limit_status";

/// Client holding an authenticated session against the remote API
#[derive(Debug)]
pub struct SessionClient {
    http: HttpClient,
    authenticator: Authenticator,
    session: Session,
    rate_limit: RateLimit,
    pacer: Pacer,
    requests_made: u64,
}

impl SessionClient {
    /// Log in and discover the account's rate limit
    pub async fn connect(config: HttpClientConfig, credentials: Credentials) -> Result<Self> {
        let http = HttpClient::with_config(config)?;
        let authenticator = Authenticator::new(http.clone(), credentials);
        let session = authenticator.login().await?;

        let mut client = Self {
            http,
            authenticator,
            session,
            rate_limit: RateLimit::disabled(),
            pacer: Pacer::unpaced(),
            requests_made: 0,
        };

        let rate_limit = client.discover_rate_limit().await?;
        client.rate_limit = rate_limit;
        client.pacer = Pacer::new(rate_limit);

        Ok(client)
    }

    /// Fetch the account's rate limit with the current session.
    ///
    /// A disabled limit turns pacing off for the rest of the run.
    pub async fn discover_rate_limit(&self) -> Result<RateLimit> {
        let body: Value = self
            .http
            .get_json_with_config(RATE_LIMIT_PATH, self.session_request())
            .await?;

        let limit = RateLimit::from_payload(body.get("data").unwrap_or(&Value::Null));
        match limit.interval() {
            Some(interval) => info!(
                "Requests per minute limit: {} ({:?} between requests)",
                limit.max_requests, interval
            ),
            None => info!("Rate limiting disabled for this account"),
        }
        Ok(limit)
    }

    /// Wait until the next request is allowed
    pub async fn pace(&self) {
        let delay = self.pacer.delay_from(Instant::now());
        if !delay.is_zero() {
            debug!("Sleeping {:?} before next request", delay);
        }
        self.pacer.wait().await;
    }

    /// Fetch the raw rows of `report` for one day window.
    ///
    /// Returns the `data` array of the response, or nothing when it is
    /// absent. Every attempt is paced, retries included, and the pacer is
    /// advanced after each one whatever its outcome. Transient failures are
    /// retried up to `max_retries` times with backoff on top of pacing.
    pub async fn fetch_day(
        &mut self,
        report: &Report,
        window: &DayWindow,
    ) -> Result<Vec<RawRecord>> {
        let max_retries = self.http.config().max_retries;
        let mut reauthenticated = false;
        let mut attempt = 0;

        loop {
            self.pace().await;
            let result = self.request_day(report, window).await;
            self.pacer = self.pacer.after_request(Instant::now());
            self.requests_made += 1;

            match result {
                Err(e) if e.is_session_expired() && !reauthenticated => {
                    warn!(
                        "Session from {} rejected while fetching {window}, logging in again",
                        self.session.established_at()
                    );
                    self.session = self.authenticator.login().await?;
                    reauthenticated = true;
                }
                Err(e) if e.is_retryable() && attempt < max_retries => {
                    let delay = self.http.calculate_backoff(attempt);
                    warn!(
                        "Fetching {} for {} failed ({}), attempt {}/{}, retrying in {:?}",
                        report.name,
                        window,
                        e,
                        attempt + 1,
                        max_retries + 1,
                        delay
                    );
                    tokio::time::sleep(delay).await;
                    attempt += 1;
                }
                other => return other,
            }
        }
    }

    async fn request_day(&self, report: &Report, window: &DayWindow) -> Result<Vec<RawRecord>> {
        let config = self
            .session_request()
            .query("since", window.since().to_string())
            .query("until", window.until().to_string())
            .retries(0);

        let mut body: Value = self.http.get_json_with_config(report.endpoint, config).await?;

        let rows = match body.get_mut("data").map(Value::take) {
            Some(Value::Array(rows)) => rows,
            Some(Value::Null) | None => Vec::new(),
            Some(other) => {
                warn!(
                    "Expected 'data' to be an array for {} on {}, got {}; treating as empty",
                    report.name,
                    window,
                    json_type(&other)
                );
                Vec::new()
            }
        };

        debug!("Fetched {} rows of {} for {}", rows.len(), report.name, window);
        Ok(rows)
    }

    fn session_request(&self) -> RequestConfig {
        RequestConfig::new().header("Cookie", self.session.cookie())
    }

    /// The current session
    pub fn session(&self) -> &Session {
        &self.session
    }

    /// The discovered rate limit
    pub fn rate_limit(&self) -> RateLimit {
        self.rate_limit
    }

    /// Current pacing state
    pub fn pacer(&self) -> Pacer {
        self.pacer
    }

    /// Data requests issued so far, retries after re-login included
    pub fn requests_made(&self) -> u64 {
        self.requests_made
    }
}

#[async_trait]
impl DayFetcher for SessionClient {
    async fn fetch_day(&mut self, report: &Report, window: &DayWindow) -> Result<Vec<RawRecord>> {
        SessionClient::fetch_day(self, report, window).await
    }
}

fn json_type(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}
