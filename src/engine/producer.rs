//! Date-windowed record producer
//!
//! Walks day windows in ascending order, fetching one page per day and
//! cleaning its rows lazily. Only the current day's page is held in memory.
//! The stream is single-pass; the first error ends it.

use super::types::{DayFetcher, Produced};
use crate::error::{Error, Result};
use crate::partition::{parse_start_date, DayWindow, DayWindows};
use crate::reports::{self, Report};
use crate::types::{CleanedRecord, RawRecord};
use chrono::{DateTime, Utc};
use futures::future;
use futures::stream::{self, Stream, TryStreamExt};
use tracing::info;

struct ProducerState<'a, F: ?Sized> {
    fetcher: &'a mut F,
    report: &'a Report,
    windows: DayWindows,
    page: std::vec::IntoIter<RawRecord>,
    current: Option<(DayWindow, usize)>,
}

/// Produce cleaned records and day-completion markers for `report`
pub fn produce<'a, F>(
    fetcher: &'a mut F,
    report: &'a Report,
    windows: DayWindows,
) -> impl Stream<Item = Result<Produced>> + 'a
where
    F: DayFetcher + ?Sized + 'a,
{
    let state = ProducerState {
        fetcher,
        report,
        windows,
        page: Vec::new().into_iter(),
        current: None,
    };

    stream::try_unfold(state, advance)
}

async fn advance<'a, F>(
    mut state: ProducerState<'a, F>,
) -> Result<Option<(Produced, ProducerState<'a, F>)>>
where
    F: DayFetcher + ?Sized + 'a,
{
    loop {
        if let Some(raw) = state.page.next() {
            let record = state.report.clean(&raw);
            return Ok(Some((Produced::Record(record), state)));
        }

        if let Some((window, records)) = state.current.take() {
            return Ok(Some((Produced::DayCompleted { window, records }, state)));
        }

        let Some(window) = state.windows.next() else {
            return Ok(None);
        };

        info!("Receiving {} from {}", state.report.name, window);
        let rows = state.fetcher.fetch_day(state.report, &window).await?;
        state.current = Some((window, rows.len()));
        state.page = rows.into_iter();
    }
}

/// Cleaned records of a named report from `start_date` through the day containing `now`.
///
/// The report name and start date are checked before the stream is built,
/// so a missing or malformed start date fails without any request.
pub fn report_records<'a, F>(
    fetcher: &'a mut F,
    report_type: &str,
    start_date: Option<&str>,
    now: DateTime<Utc>,
) -> Result<impl Stream<Item = Result<CleanedRecord>> + 'a>
where
    F: DayFetcher + ?Sized + 'a,
{
    let start_date = start_date
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .ok_or_else(|| Error::missing_field("start_date"))?;
    let start = parse_start_date(start_date)?;
    let report = reports::lookup(report_type)?;

    Ok(produce(fetcher, report, DayWindows::between(start, now))
        .try_filter_map(|item| future::ready(Ok(item.into_record()))))
}
