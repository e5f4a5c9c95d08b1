//! Execution engine module
//!
//! Main read loop and stream orchestration.
//!
//! # Overview
//!
//! The engine module provides:
//! - `produce` / `report_records` - the date-windowed record producer
//! - `SyncEngine` - validates config, connects once, and drives every selected
//!   report through the producer into a record sink, checkpointing state after
//!   each completed day
//! - `DayFetcher` - the seam between the producer and the session client

mod producer;
mod types;

pub use producer::{produce, report_records};
pub use types::{DayFetcher, Produced, SyncStats};

use crate::catalog::Catalog;
use crate::config::TapConfig;
use crate::error::Result;
use crate::output::RecordSink;
use crate::partition::DayWindows;
use crate::reports::Report;
use crate::session::SessionClient;
use crate::state::StateManager;
use chrono::{DateTime, NaiveDate, Utc};
use futures::TryStreamExt;
use std::pin::pin;
use std::time::Instant;
use tracing::{debug, info, warn};

/// Sync engine for orchestrating data extraction
pub struct SyncEngine {
    /// Tap configuration
    config: TapConfig,
    /// Fixed "now" for deterministic runs
    now: Option<DateTime<Utc>>,
    /// Statistics
    stats: SyncStats,
}

impl SyncEngine {
    /// Create a new sync engine
    pub fn new(config: TapConfig) -> Self {
        Self {
            config,
            now: None,
            stats: SyncStats::default(),
        }
    }

    /// Treat `now` as the current moment when enumerating days
    #[must_use]
    pub fn as_of(mut self, now: DateTime<Utc>) -> Self {
        self.now = Some(now);
        self
    }

    /// Get statistics
    pub fn stats(&self) -> &SyncStats {
        &self.stats
    }

    fn now(&self) -> DateTime<Utc> {
        self.now.unwrap_or_else(Utc::now)
    }

    /// Sync every report selected in `catalog`.
    ///
    /// Configuration is validated before any request is made. The session is
    /// established once and shared by all reports.
    pub async fn run<S>(
        &mut self,
        catalog: &Catalog,
        state: &StateManager,
        sink: &mut S,
    ) -> Result<SyncStats>
    where
        S: RecordSink + ?Sized,
    {
        let started = Instant::now();

        self.config.validate()?;
        let start_date = self.config.start_date()?;
        let reports = catalog.selected_reports()?;

        if reports.is_empty() {
            warn!("No streams selected in catalog, nothing to sync");
            return Ok(self.stats.clone());
        }

        let mut client =
            SessionClient::connect(self.config.http_client_config(), self.config.credentials()?)
                .await?;

        for report in reports {
            self.sync_report(&mut client, report, start_date, state, sink)
                .await?;
        }

        self.stats.set_duration(started.elapsed().as_millis() as u64);
        info!(
            "Sync completed: {} records over {} days in {}ms",
            self.stats.records_synced, self.stats.days_synced, self.stats.duration_ms
        );

        Ok(self.stats.clone())
    }

    /// Sync one report through `fetcher`.
    ///
    /// Emits the schema first, then records, and a state message after every
    /// completed day. Starts at the bookmarked day when it is later than
    /// `start_date`.
    pub async fn sync_report<F, S>(
        &mut self,
        fetcher: &mut F,
        report: &Report,
        start_date: NaiveDate,
        state: &StateManager,
        sink: &mut S,
    ) -> Result<()>
    where
        F: DayFetcher + ?Sized,
        S: RecordSink + ?Sized,
    {
        sink.write_schema(report)?;

        let bookmark = state.bookmark(report.name).await;
        let start = resume_from(start_date, bookmark);
        if start != start_date {
            info!("Resuming {} from bookmark {}", report.name, start);
        }

        let windows = DayWindows::between(start, self.now());
        if windows.len() == 0 {
            warn!(
                "Start date {} is after today, nothing to sync for {}",
                start, report.name
            );
        } else {
            info!(
                "Syncing {} from {} ({} days)",
                report.name,
                start,
                windows.len()
            );
        }

        let mut items = pin!(produce(fetcher, report, windows));
        while let Some(item) = items.try_next().await? {
            match item {
                Produced::Record(record) => {
                    sink.write_record(report.name, &record)?;
                    self.stats.add_records(1);
                }
                Produced::DayCompleted { window, records } => {
                    state.set_bookmark(report.name, window.day()).await?;
                    sink.write_state(&state.snapshot().await)?;
                    self.stats.add_day();
                    debug!(
                        "Completed {} for {} with {} records",
                        window, report.name, records
                    );
                }
            }
        }

        self.stats.add_stream();
        Ok(())
    }
}

/// First day to fetch given the configured start date and a prior bookmark.
///
/// The bookmarked day itself is fetched again since it may have been
/// incomplete when it was recorded.
pub fn resume_from(start_date: NaiveDate, bookmark: Option<NaiveDate>) -> NaiveDate {
    bookmark.map_or(start_date, |day| day.max(start_date))
}
