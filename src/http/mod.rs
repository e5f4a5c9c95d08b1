//! HTTP transport module
//!
//! Provides the HTTP client and the request pacing used against the remote API.
//!
//! # Features
//!
//! - **Automatic Retries**: Bounded retries with backoff for transient failures
//! - **Timeouts**: Every request carries a transport-level timeout
//! - **Pacing**: Fixed spacing between requests derived from the account's
//!   requests-per-minute ceiling

mod client;
mod pacing;

pub use client::{HttpClient, HttpClientConfig, HttpClientConfigBuilder, RequestConfig};
pub use pacing::{Pacer, RateLimit};
