//! State types for tracking sync progress
//!
//! These types are serialized to JSON and persisted between runs.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Complete state for the tap
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct State {
    /// Per-stream bookmarks
    #[serde(default)]
    pub bookmarks: BTreeMap<String, Bookmark>,
}

impl State {
    /// Create a new empty state
    pub fn new() -> Self {
        Self::default()
    }

    /// Last completed day of a stream
    pub fn bookmark(&self, stream: &str) -> Option<NaiveDate> {
        self.bookmarks.get(stream).map(|b| b.day)
    }

    /// Record `day` as the last completed day of a stream
    pub fn set_bookmark(&mut self, stream: &str, day: NaiveDate) {
        self.bookmarks.insert(stream.to_string(), Bookmark { day });
    }
}

/// Progress of a single stream
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Bookmark {
    /// Last day whose records were all emitted
    pub day: NaiveDate,
}
