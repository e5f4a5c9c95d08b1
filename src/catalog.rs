//! Stream catalog
//!
//! `discover` advertises every registered report. A catalog handed back to
//! `read` selects which reports to sync.

use crate::error::{Error, Result};
use crate::reports::{self, Report};
use crate::types::{JsonValue, ReplicationMethod};
use serde::{Deserialize, Serialize};
use serde_json::json;
use std::path::Path;

/// Catalog of streams
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Catalog {
    /// Stream entries
    pub streams: Vec<CatalogEntry>,
}

/// One stream in the catalog
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CatalogEntry {
    /// Stable stream id
    pub tap_stream_id: String,
    /// Stream name
    pub stream: String,
    /// JSON schema of the records
    pub schema: JsonValue,
    /// Primary key properties
    #[serde(default)]
    pub key_properties: Vec<String>,
    /// Selection and replication metadata
    #[serde(default)]
    pub metadata: Vec<MetadataEntry>,
}

/// Metadata attached to a breadcrumb (empty for the stream itself)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MetadataEntry {
    /// Path into the schema
    #[serde(default)]
    pub breadcrumb: Vec<String>,
    /// Metadata values
    #[serde(default)]
    pub metadata: serde_json::Map<String, JsonValue>,
}

impl Catalog {
    /// Catalog listing every registered report, all selected
    pub fn discover() -> Self {
        Self {
            streams: reports::all().map(CatalogEntry::for_report).collect(),
        }
    }

    /// Parse a catalog from a JSON string
    pub fn from_json(json: &str) -> Result<Self> {
        serde_json::from_str(json).map_err(|e| Error::config(format!("Invalid catalog: {e}")))
    }

    /// Load a catalog file
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|e| {
            Error::config(format!("Failed to read catalog {}: {e}", path.display()))
        })?;
        Self::from_json(&content)
    }

    /// Reports of every selected stream, in catalog order.
    ///
    /// A selected stream the tap does not know is a configuration error.
    pub fn selected_reports(&self) -> Result<Vec<&'static Report>> {
        self.streams
            .iter()
            .filter(|entry| entry.is_selected())
            .map(|entry| reports::lookup(&entry.tap_stream_id))
            .collect()
    }
}

impl CatalogEntry {
    /// Entry describing `report`
    pub fn for_report(report: &Report) -> Self {
        let replication = serde_json::to_value(ReplicationMethod::Incremental)
            .unwrap_or_else(|_| JsonValue::from("INCREMENTAL"));

        let mut metadata = vec![MetadataEntry {
            breadcrumb: Vec::new(),
            metadata: object(json!({
                "selected": true,
                "inclusion": "available",
                "forced-replication-method": replication,
                "table-key-properties": report.key_properties,
                "valid-replication-keys": ["day"],
            })),
        }];

        metadata.extend(report.fields.iter().map(|field| {
            let inclusion = if report.key_properties.contains(&field.name) {
                "automatic"
            } else {
                "available"
            };
            MetadataEntry {
                breadcrumb: vec!["properties".to_string(), field.name.to_string()],
                metadata: object(json!({ "inclusion": inclusion })),
            }
        }));

        Self {
            tap_stream_id: report.name.to_string(),
            stream: report.name.to_string(),
            schema: report.schema(),
            key_properties: report.key_properties.iter().map(ToString::to_string).collect(),
            metadata,
        }
    }

    /// Whether the stream-level metadata marks this entry selected
    pub fn is_selected(&self) -> bool {
        self.metadata
            .iter()
            .find(|entry| entry.breadcrumb.is_empty())
            .and_then(|entry| entry.metadata.get("selected"))
            .and_then(JsonValue::as_bool)
            .unwrap_or(false)
    }
}

fn object(value: JsonValue) -> serde_json::Map<String, JsonValue> {
    match value {
        JsonValue::Object(map) => map,
        _ => serde_json::Map::new(),
    }
}
