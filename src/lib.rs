// Allow common clippy pedantic lints that aren't critical for this codebase
#![allow(clippy::cast_possible_truncation)]
#![allow(clippy::cast_sign_loss)]
#![allow(clippy::cast_lossless)]
#![allow(clippy::too_many_lines)]
#![allow(clippy::unused_self)]
#![allow(clippy::must_use_candidate)]
#![allow(clippy::items_after_statements)]
#![allow(clippy::unnecessary_wraps)]
#![allow(clippy::match_same_arms)]
#![allow(clippy::needless_pass_by_value)]

//! # tap-coosto
//!
//! A Singer tap extracting the intervention details report from the Coosto
//! analytics API, one UTC calendar day at a time.
//!
//! ## Features
//!
//! - **Session Auth**: form login, session cookie, one re-login on expiry
//! - **Rate Limit Pacing**: requests spaced by the account's per-minute limit
//! - **Day Windows**: every day from `start_date` through today, in order
//! - **Cleaned Records**: every report row normalized by its registered cleaner
//! - **Resumable**: a bookmark is checkpointed after each completed day
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use tap_coosto::{Catalog, JsonLinesSink, StateManager, SyncEngine, TapConfig};
//!
//! #[tokio::main]
//! async fn main() -> tap_coosto::Result<()> {
//!     let config = TapConfig::from_file("config.json")?;
//!     let state = StateManager::from_file("state.json")?;
//!     let mut sink = JsonLinesSink::stdout(false);
//!
//!     let stats = SyncEngine::new(config)
//!         .run(&Catalog::discover(), &state, &mut sink)
//!         .await?;
//!     eprintln!("{} records", stats.records_synced);
//!     Ok(())
//! }
//! ```
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────┐
//! │                        CLI (check / discover / read)            │
//! └─────────────────────────────────────────────────────────────────┘
//!                                │
//! ┌──────────────────────────────┴──────────────────────────────────┐
//! │  SyncEngine: config → catalog → state → produce → sink          │
//! └─────────────────────────────────────────────────────────────────┘
//!                                │
//! ┌──────────┬───────────┬───────┴───────┬───────────┬─────────────┐
//! │   Auth   │   HTTP    │    Session    │ Partition │   Reports   │
//! ├──────────┼───────────┼───────────────┼───────────┼─────────────┤
//! │ Login    │ GET/POST  │ Rate limit    │ DayWindow │ Registry    │
//! │ Cookie   │ Retry     │ Pacing        │ DayWindows│ Cleaners    │
//! │          │ Backoff   │ fetch_day     │           │ Schemas     │
//! └──────────┴───────────┴───────────────┴───────────┴─────────────┘
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::missing_panics_doc)]
#![allow(clippy::doc_markdown)]

// ============================================================================
// Module declarations
// ============================================================================

/// Error types for the tap
pub mod error;

/// Common types and type aliases
pub mod types;

/// Login and session types
pub mod auth;

/// HTTP client with retry and request pacing
pub mod http;

/// Calendar day windows
pub mod partition;

/// Report registry and record cleaners
pub mod reports;

/// Authenticated session client
pub mod session;

/// Record producer and sync engine
pub mod engine;

/// State management and checkpointing
pub mod state;

/// JSON lines output
pub mod output;

/// Stream catalog
pub mod catalog;

/// Tap configuration
pub mod config;

/// Command-line interface
pub mod cli;

// ============================================================================
// Re-exports
// ============================================================================

pub use error::{Error, Result};
pub use types::*;

// Re-export commonly used types
pub use catalog::Catalog;
pub use config::TapConfig;
pub use engine::{report_records, SyncEngine, SyncStats};
pub use output::{JsonLinesSink, RecordSink};
pub use session::SessionClient;
pub use state::StateManager;

/// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Crate name
pub const NAME: &str = env!("CARGO_PKG_NAME");
