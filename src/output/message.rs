//! Output message types

use crate::reports::Report;
use crate::state::State;
use crate::types::{CleanedRecord, JsonValue};
use chrono::{DateTime, SecondsFormat, Utc};
use serde::Serialize;

/// A message written to stdout
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Message {
    /// Describes the records of a stream; always precedes them
    Schema {
        /// Stream name
        stream: String,
        /// JSON schema of the records
        schema: JsonValue,
        /// Primary key properties
        key_properties: Vec<String>,
    },
    /// One cleaned record
    Record {
        /// Stream name
        stream: String,
        /// The record
        record: CleanedRecord,
        /// When the record was extracted (RFC 3339)
        time_extracted: String,
    },
    /// Progress to persist for the next run
    State {
        /// The full state
        value: State,
    },
    /// Result of a connection check
    ConnectionStatus {
        /// Outcome
        #[serde(rename = "connectionStatus")]
        connection_status: ConnectionStatus,
    },
}

/// Connection check outcome
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ConnectionStatus {
    /// Succeeded or failed
    pub status: Status,
    /// Human-readable detail
    pub message: String,
}

/// Connection check status
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Status {
    /// The tap logged in and read the rate limit
    Succeeded,
    /// The check failed
    Failed,
}

impl Message {
    /// Create a schema message for a report
    pub fn schema(report: &Report) -> Self {
        Self::Schema {
            stream: report.name.to_string(),
            schema: report.schema(),
            key_properties: report
                .key_properties
                .iter()
                .map(ToString::to_string)
                .collect(),
        }
    }

    /// Create a record message
    pub fn record(
        stream: impl Into<String>,
        record: CleanedRecord,
        extracted_at: DateTime<Utc>,
    ) -> Self {
        Self::Record {
            stream: stream.into(),
            record,
            time_extracted: extracted_at.to_rfc3339_opts(SecondsFormat::Secs, true),
        }
    }

    /// Create a state message
    pub fn state(value: State) -> Self {
        Self::State { value }
    }

    /// Create a successful connection status
    pub fn connection_succeeded(message: impl Into<String>) -> Self {
        Self::ConnectionStatus {
            connection_status: ConnectionStatus {
                status: Status::Succeeded,
                message: message.into(),
            },
        }
    }

    /// Create a failed connection status
    pub fn connection_failed(message: impl Into<String>) -> Self {
        Self::ConnectionStatus {
            connection_status: ConnectionStatus {
                status: Status::Failed,
                message: message.into(),
            },
        }
    }
}
