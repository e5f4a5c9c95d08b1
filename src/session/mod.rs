//! Authenticated session client
//!
//! Owns the session, the account's rate limit and the pacing state, and
//! fetches one day window of a report at a time.
//!
//! # Lifecycle
//!
//! 1. `SessionClient::connect` logs in and discovers the rate limit once.
//! 2. Every `fetch_day` waits for the pacer, issues one GET, then replaces
//!    the pacer with its successor.
//! 3. A `401` on a data request triggers one re-login and one retry.

mod client;

pub use client::{SessionClient, RATE_LIMIT_PATH};
