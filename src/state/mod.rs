//! State management module
//!
//! Tracks the last completed day per stream so an interrupted run can
//! resume instead of starting over from `start_date`.
//!
//! # Overview
//!
//! The state module provides:
//! - `State` - bookmarks keyed by stream name, in the
//!   `{"bookmarks": {"<stream>": {"day": "YYYY-MM-DD"}}}` layout
//! - `StateManager` - file-backed or in-memory persistence with atomic writes

mod manager;
mod types;

pub use manager::StateManager;
pub use types::{Bookmark, State};
