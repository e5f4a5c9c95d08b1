//! Field tables and value coercion

use crate::types::{CleanedRecord, JsonObject, JsonValue, RawRecord};
use chrono::{DateTime, SecondsFormat, Utc};
use serde_json::json;

/// Target type of a cleaned field
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldKind {
    /// Free text; numbers and booleans are stringified
    String,
    /// Whole number; numeric strings are parsed
    Integer,
    /// Floating point number; numeric strings are parsed
    Number,
    /// `true`/`false`, also from `0`/`1` and their string forms
    Boolean,
    /// Epoch seconds rendered as an RFC 3339 UTC string
    Timestamp,
    /// Array of strings
    StringList,
}

impl FieldKind {
    /// Coerce a raw value, returning `null` when it is absent or unusable
    pub fn coerce(self, value: Option<&JsonValue>) -> JsonValue {
        let Some(value) = value.filter(|v| !v.is_null()) else {
            return JsonValue::Null;
        };

        let coerced = match self {
            FieldKind::String => as_string(value).map(JsonValue::String),
            FieldKind::Integer => as_integer(value).map(JsonValue::from),
            FieldKind::Number => as_number(value).map(JsonValue::from),
            FieldKind::Boolean => as_boolean(value).map(JsonValue::Bool),
            FieldKind::Timestamp => as_timestamp(value).map(JsonValue::String),
            FieldKind::StringList => value.as_array().map(|items| {
                items
                    .iter()
                    .filter_map(as_string)
                    .map(JsonValue::String)
                    .collect()
            }),
        };

        coerced.unwrap_or(JsonValue::Null)
    }

    /// JSON schema fragment for this kind (always nullable)
    pub fn json_schema(self) -> JsonValue {
        match self {
            FieldKind::String => json!({"type": ["null", "string"]}),
            FieldKind::Integer => json!({"type": ["null", "integer"]}),
            FieldKind::Number => json!({"type": ["null", "number"]}),
            FieldKind::Boolean => json!({"type": ["null", "boolean"]}),
            FieldKind::Timestamp => json!({"type": ["null", "string"], "format": "date-time"}),
            FieldKind::StringList => {
                json!({"type": ["null", "array"], "items": {"type": "string"}})
            }
        }
    }
}

/// One output field and where it comes from in the raw row
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Field {
    /// Output property name
    pub name: &'static str,
    /// Key in the raw API row
    pub source: &'static str,
    /// Target type
    pub kind: FieldKind,
}

impl Field {
    /// Field whose output name differs from its raw key
    pub const fn renamed(name: &'static str, source: &'static str, kind: FieldKind) -> Self {
        Self { name, source, kind }
    }

    /// Field kept under its raw key
    pub const fn same(name: &'static str, kind: FieldKind) -> Self {
        Self {
            name,
            source: name,
            kind,
        }
    }
}

/// Apply a field table to a raw row.
///
/// Every field in the table is present in the output, coerced to its kind.
/// Raw keys the table does not read are carried over unchanged. A raw value
/// that is not an object yields all nulls.
pub fn clean_with(fields: &[Field], raw: &RawRecord) -> CleanedRecord {
    let mut cleaned: CleanedRecord = raw
        .as_object()
        .into_iter()
        .flatten()
        .filter(|(key, _)| !fields.iter().any(|field| field.source == key.as_str()))
        .map(|(key, value)| (key.clone(), value.clone()))
        .collect();

    for field in fields {
        cleaned.insert(
            field.name.to_string(),
            field.kind.coerce(raw.get(field.source)),
        );
    }

    cleaned
}

/// JSON schema describing the output of [`clean_with`] for `fields`.
///
/// Only table fields are declared; carried-over raw keys are left open.
pub fn schema_for(fields: &[Field]) -> JsonValue {
    let properties: JsonObject = fields
        .iter()
        .map(|field| (field.name.to_string(), field.kind.json_schema()))
        .collect();

    json!({
        "type": "object",
        "properties": properties,
    })
}

fn as_string(value: &JsonValue) -> Option<String> {
    match value {
        JsonValue::String(s) => Some(s.clone()),
        JsonValue::Number(n) => Some(n.to_string()),
        JsonValue::Bool(b) => Some(b.to_string()),
        _ => None,
    }
}

fn as_integer(value: &JsonValue) -> Option<i64> {
    match value {
        JsonValue::Number(n) => n.as_i64().or_else(|| {
            n.as_f64()
                .filter(|f| f.is_finite() && f.fract() == 0.0)
                .map(|f| f as i64)
        }),
        JsonValue::String(s) => s.trim().parse().ok(),
        _ => None,
    }
}

fn as_number(value: &JsonValue) -> Option<f64> {
    match value {
        JsonValue::Number(n) => n.as_f64(),
        JsonValue::String(s) => s.trim().parse::<f64>().ok().filter(|f| f.is_finite()),
        _ => None,
    }
}

fn as_boolean(value: &JsonValue) -> Option<bool> {
    match value {
        JsonValue::Bool(b) => Some(*b),
        JsonValue::Number(n) => match n.as_i64() {
            Some(0) => Some(false),
            Some(1) => Some(true),
            _ => None,
        },
        JsonValue::String(s) => match s.trim().to_ascii_lowercase().as_str() {
            "true" | "1" => Some(true),
            "false" | "0" => Some(false),
            _ => None,
        },
        _ => None,
    }
}

fn as_timestamp(value: &JsonValue) -> Option<String> {
    let seconds = match value {
        JsonValue::String(s) => {
            if let Ok(dt) = DateTime::parse_from_rfc3339(s.trim()) {
                return Some(
                    dt.with_timezone(&Utc)
                        .to_rfc3339_opts(SecondsFormat::Secs, true),
                );
            }
            as_integer(value)?
        }
        _ => as_integer(value)?,
    };

    DateTime::<Utc>::from_timestamp(seconds, 0)
        .map(|dt| dt.to_rfc3339_opts(SecondsFormat::Secs, true))
}
