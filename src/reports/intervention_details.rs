//! Intervention details: the work support agents did on social messages

use super::fields::{clean_with, Field, FieldKind};
use crate::types::{CleanedRecord, RawRecord};

/// Stream name
pub(super) const NAME: &str = "intervention_details";

/// Endpoint path, queried with `since`/`until` epoch seconds
pub(super) const ENDPOINT: &str = "/api/1/engagementstats/get_intervention_details";

/// Primary key
pub(super) const KEY_PROPERTIES: &[&str] = &["id"];

pub(super) const FIELDS: &[Field] = &[
    Field::same("id", FieldKind::String),
    Field::same("message_id", FieldKind::String),
    Field::same("conversation_id", FieldKind::String),
    Field::same("user_id", FieldKind::String),
    Field::renamed("user_name", "username", FieldKind::String),
    Field::same("team", FieldKind::String),
    Field::same("action", FieldKind::String),
    Field::same("status", FieldKind::String),
    Field::renamed("channel", "medium", FieldKind::String),
    Field::same("url", FieldKind::String),
    Field::renamed("created_at", "date", FieldKind::Timestamp),
    Field::renamed("handled_at", "handled", FieldKind::Timestamp),
    Field::same("response_time", FieldKind::Integer),
    Field::same("handling_time", FieldKind::Integer),
    Field::same("sentiment", FieldKind::Number),
    Field::same("is_reply", FieldKind::Boolean),
    Field::same("tags", FieldKind::StringList),
];

pub(super) fn clean(raw: &RawRecord) -> CleanedRecord {
    clean_with(FIELDS, raw)
}
