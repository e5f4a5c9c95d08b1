//! Fixed registry of extractable reports

use super::fields::{schema_for, Field};
use super::intervention_details;
use crate::error::{Error, Result};
use crate::types::{CleanedRecord, JsonValue, RawRecord};

/// Pure transform from a raw API row to a cleaned record
pub type Cleaner = fn(&RawRecord) -> CleanedRecord;

/// A report the tap knows how to extract
#[derive(Debug, Clone, Copy)]
pub struct Report {
    /// Stream name, also the registry key
    pub name: &'static str,
    /// Endpoint path queried once per day window
    pub endpoint: &'static str,
    /// Primary key properties of cleaned records
    pub key_properties: &'static [&'static str],
    /// Output fields
    pub fields: &'static [Field],
    cleaner: Cleaner,
}

impl Report {
    /// Clean one raw row
    pub fn clean(&self, raw: &RawRecord) -> CleanedRecord {
        (self.cleaner)(raw)
    }

    /// JSON schema of cleaned records
    pub fn schema(&self) -> JsonValue {
        schema_for(self.fields)
    }
}

/// The intervention details report
pub static INTERVENTION_DETAILS: Report = Report {
    name: intervention_details::NAME,
    endpoint: intervention_details::ENDPOINT,
    key_properties: intervention_details::KEY_PROPERTIES,
    fields: intervention_details::FIELDS,
    cleaner: intervention_details::clean,
};

static REPORTS: [&Report; 1] = [&INTERVENTION_DETAILS];

/// Every registered report
pub fn all() -> impl Iterator<Item = &'static Report> {
    REPORTS.iter().copied()
}

/// Look up a report by stream name.
///
/// Unregistered names fail with [`Error::UnknownReport`] instead of falling
/// back to a pass-through transform.
pub fn lookup(name: &str) -> Result<&'static Report> {
    all()
        .find(|report| report.name == name)
        .ok_or_else(|| Error::unknown_report(name))
}
