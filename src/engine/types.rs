//! Engine types
//!
//! Producer items, the fetch seam, and sync statistics.

use crate::error::Result;
use crate::partition::DayWindow;
use crate::reports::Report;
use crate::types::{CleanedRecord, RawRecord};
use async_trait::async_trait;

/// Source of one day's raw rows for a report
#[async_trait]
pub trait DayFetcher: Send {
    /// Fetch every raw row of `report` inside `window`
    async fn fetch_day(&mut self, report: &Report, window: &DayWindow) -> Result<Vec<RawRecord>>;
}

/// An item produced while walking the day windows
#[derive(Debug, Clone, PartialEq)]
pub enum Produced {
    /// A cleaned record
    Record(CleanedRecord),
    /// All records of a day window have been produced
    DayCompleted {
        /// The finished window
        window: DayWindow,
        /// Number of records it contained
        records: usize,
    },
}

impl Produced {
    /// The record, if this item is one
    pub fn into_record(self) -> Option<CleanedRecord> {
        match self {
            Produced::Record(record) => Some(record),
            Produced::DayCompleted { .. } => None,
        }
    }
}

/// Statistics from a sync operation
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SyncStats {
    /// Total records emitted
    pub records_synced: usize,
    /// Day windows fully processed
    pub days_synced: usize,
    /// Reports synced
    pub streams_synced: usize,
    /// Duration in milliseconds
    pub duration_ms: u64,
}

impl SyncStats {
    /// Add records
    pub fn add_records(&mut self, count: usize) {
        self.records_synced += count;
    }

    /// Add a completed day
    pub fn add_day(&mut self) {
        self.days_synced += 1;
    }

    /// Add a stream
    pub fn add_stream(&mut self) {
        self.streams_synced += 1;
    }

    /// Set duration
    pub fn set_duration(&mut self, ms: u64) {
        self.duration_ms = ms;
    }
}
