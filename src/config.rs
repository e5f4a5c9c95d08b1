//! Tap configuration
//!
//! The configuration is a flat JSON object. `username`, `password` and
//! `start_date` are required for a sync; everything else has a default.

use crate::auth::Credentials;
use crate::error::{Error, Result};
use crate::http::HttpClientConfig;
use crate::partition::parse_start_date;
use crate::types::{BackoffType, OptionStringExt};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::path::Path;
use std::time::Duration;

/// Production API host
pub const DEFAULT_BASE_URL: &str = "https://in.coosto.com";

/// Keys that must be present for a sync
pub const REQUIRED_CONFIG_KEYS: [&str; 3] = ["username", "password", "start_date"];

/// Tap configuration
#[derive(Clone, Serialize, Deserialize)]
pub struct TapConfig {
    /// Account username
    #[serde(default)]
    pub username: Option<String>,

    /// Account password
    #[serde(default)]
    pub password: Option<String>,

    /// First day to sync (inclusive)
    #[serde(default)]
    pub start_date: Option<String>,

    /// API host
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// Transport timeout per request, in seconds
    #[serde(default = "default_timeout_secs")]
    pub request_timeout_secs: u64,

    /// Retries for transient transport failures
    #[serde(default = "default_max_retries")]
    pub max_retries: u32,

    /// How the delay between retries grows
    #[serde(default)]
    pub backoff_type: BackoffType,

    /// First retry delay, in milliseconds
    #[serde(default = "default_initial_backoff_ms")]
    pub initial_backoff_ms: u64,

    /// Override for the User-Agent header
    #[serde(default)]
    pub user_agent: Option<String>,
}

fn default_base_url() -> String {
    DEFAULT_BASE_URL.to_string()
}

fn default_timeout_secs() -> u64 {
    30
}

fn default_max_retries() -> u32 {
    3
}

fn default_initial_backoff_ms() -> u64 {
    1000
}

/// Upper bound on a single retry delay
const MAX_BACKOFF: Duration = Duration::from_secs(60);

impl Default for TapConfig {
    fn default() -> Self {
        Self {
            username: None,
            password: None,
            start_date: None,
            base_url: default_base_url(),
            request_timeout_secs: default_timeout_secs(),
            max_retries: default_max_retries(),
            backoff_type: BackoffType::default(),
            initial_backoff_ms: default_initial_backoff_ms(),
            user_agent: None,
        }
    }
}

impl TapConfig {
    /// Parse a configuration from a JSON value
    pub fn from_value(value: Value) -> Result<Self> {
        serde_json::from_value(value).map_err(|e| Error::config(format!("Invalid config: {e}")))
    }

    /// Parse a configuration from a JSON string
    pub fn from_json(json: &str) -> Result<Self> {
        serde_json::from_str(json).map_err(|e| Error::config(format!("Invalid config JSON: {e}")))
    }

    /// Load a configuration file
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|e| {
            Error::config(format!("Failed to read config file {}: {e}", path.display()))
        })?;
        Self::from_json(&content)
    }

    /// Validate everything a sync needs, without touching the network
    pub fn validate(&self) -> Result<()> {
        self.credentials()?;
        self.start_date()?;
        self.validate_transport()
    }

    /// Validate what a connection check needs
    pub fn validate_connection(&self) -> Result<()> {
        self.credentials()?;
        self.validate_transport()
    }

    fn validate_transport(&self) -> Result<()> {
        let url = url::Url::parse(&self.base_url)?;
        if !matches!(url.scheme(), "http" | "https") {
            return Err(Error::invalid_value(
                "base_url",
                format!("unsupported scheme '{}'", url.scheme()),
            ));
        }
        if self.request_timeout_secs == 0 {
            return Err(Error::invalid_value(
                "request_timeout_secs",
                "must be greater than zero",
            ));
        }
        Ok(())
    }

    /// Account credentials
    pub fn credentials(&self) -> Result<Credentials> {
        let username = self
            .username
            .clone()
            .none_if_empty()
            .ok_or_else(|| Error::missing_field("username"))?;
        let password = self
            .password
            .clone()
            .none_if_empty()
            .ok_or_else(|| Error::missing_field("password"))?;
        Ok(Credentials::new(username, password))
    }

    /// The configured start date
    pub fn start_date(&self) -> Result<NaiveDate> {
        let raw = self
            .start_date
            .clone()
            .none_if_empty()
            .ok_or_else(|| Error::missing_field("start_date"))?;
        parse_start_date(&raw)
    }

    /// HTTP client settings derived from this configuration
    pub fn http_client_config(&self) -> HttpClientConfig {
        let mut builder = HttpClientConfig::builder()
            .base_url(self.base_url.clone())
            .timeout(Duration::from_secs(self.request_timeout_secs))
            .max_retries(self.max_retries)
            .backoff(
                self.backoff_type,
                Duration::from_millis(self.initial_backoff_ms),
                MAX_BACKOFF,
            );

        if let Some(agent) = self.user_agent.clone().none_if_empty() {
            builder = builder.user_agent(agent);
        }

        builder.build()
    }
}

impl std::fmt::Debug for TapConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TapConfig")
            .field("username", &self.username)
            .field("password", &self.password.as_ref().map(|_| "***"))
            .field("start_date", &self.start_date)
            .field("base_url", &self.base_url)
            .field("request_timeout_secs", &self.request_timeout_secs)
            .field("max_retries", &self.max_retries)
            .field("backoff_type", &self.backoff_type)
            .field("initial_backoff_ms", &self.initial_backoff_ms)
            .field("user_agent", &self.user_agent)
            .finish()
    }
}
