//! Tests for the report registry and cleaners

use super::*;
use crate::types::JsonValue;
use pretty_assertions::assert_eq;
use serde_json::json;
use test_case::test_case;

fn raw_intervention() -> JsonValue {
    json!({
        "id": 981_273,
        "message_id": "tw-1214",
        "conversation_id": "c-77",
        "user_id": 42,
        "username": "support.anna",
        "team": "Webcare",
        "action": "reply",
        "status": "closed",
        "medium": "twitter",
        "url": "https://twitter.com/x/status/1214",
        "date": 1_577_836_800,
        "handled": "1577840400",
        "response_time": "3600",
        "handling_time": 95.0,
        "sentiment": "-0.25",
        "is_reply": 1,
        "tags": ["complaint", 7, null],
        "internal_score": 12
    })
}

// ============================================================================
// Registry Tests
// ============================================================================

#[test]
fn test_lookup_registered_report() {
    let report = lookup("intervention_details").unwrap();
    assert_eq!(report.name, "intervention_details");
    assert_eq!(
        report.endpoint,
        "/api/1/engagementstats/get_intervention_details"
    );
    assert_eq!(report.key_properties, &["id"]);
}

#[test]
fn test_lookup_unknown_report_fails() {
    let err = lookup("saved_queries").unwrap_err();
    assert!(err.is_configuration());
    assert_eq!(err.to_string(), "Unknown report type: saved_queries");
}

#[test]
fn test_all_reports() {
    let names: Vec<&str> = all().map(|r| r.name).collect();
    assert_eq!(names, vec!["intervention_details"]);
}

// ============================================================================
// Intervention Details Cleaner Tests
// ============================================================================

#[test]
fn test_clean_intervention_details() {
    let cleaned = INTERVENTION_DETAILS.clean(&raw_intervention());

    assert_eq!(
        JsonValue::Object(cleaned),
        json!({
            "id": "981273",
            "message_id": "tw-1214",
            "conversation_id": "c-77",
            "user_id": "42",
            "user_name": "support.anna",
            "team": "Webcare",
            "action": "reply",
            "status": "closed",
            "channel": "twitter",
            "url": "https://twitter.com/x/status/1214",
            "created_at": "2020-01-01T00:00:00Z",
            "handled_at": "2020-01-01T01:00:00Z",
            "response_time": 3600,
            "handling_time": 95,
            "sentiment": -0.25,
            "is_reply": true,
            "tags": ["complaint", "7"],
            "internal_score": 12
        })
    );
}

#[test]
fn test_clean_carries_unknown_keys_unchanged() {
    let cleaned = INTERVENTION_DETAILS.clean(&json!({
        "id": 1,
        "internal_score": "12",
        "routing": {"queue": "vip", "priority": [1, 2]},
        "archived": null
    }));

    assert_eq!(cleaned["internal_score"], json!("12"));
    assert_eq!(cleaned["routing"], json!({"queue": "vip", "priority": [1, 2]}));
    assert_eq!(cleaned["archived"], JsonValue::Null);
    assert_eq!(cleaned.len(), INTERVENTION_DETAILS.fields.len() + 3);
}

#[test]
fn test_clean_drops_renamed_source_keys() {
    let cleaned = INTERVENTION_DETAILS.clean(&json!({
        "username": "support.anna",
        "medium": "twitter",
        "date": 0
    }));

    assert_eq!(cleaned["user_name"], "support.anna");
    assert_eq!(cleaned["channel"], "twitter");
    assert_eq!(cleaned["created_at"], "1970-01-01T00:00:00Z");
    assert!(!cleaned.contains_key("username"));
    assert!(!cleaned.contains_key("medium"));
    assert!(!cleaned.contains_key("date"));
}

#[test]
fn test_table_field_wins_over_raw_key_with_same_name() {
    let cleaned = INTERVENTION_DETAILS.clean(&json!({
        "username": "support.anna",
        "user_name": "stale"
    }));

    assert_eq!(cleaned["user_name"], "support.anna");
}

#[test]
fn test_clean_is_idempotent() {
    let raw = raw_intervention();
    assert_eq!(INTERVENTION_DETAILS.clean(&raw), INTERVENTION_DETAILS.clean(&raw));
}

#[test]
fn test_clean_empty_record_yields_nulls() {
    let cleaned = INTERVENTION_DETAILS.clean(&json!({}));

    assert_eq!(cleaned.len(), INTERVENTION_DETAILS.fields.len());
    assert!(cleaned.values().all(JsonValue::is_null));
}

#[test_case(json!(null) ; "null")]
#[test_case(json!([1, 2, 3]) ; "array")]
#[test_case(json!("row") ; "string")]
fn test_clean_non_object_yields_nulls(raw: JsonValue) {
    let cleaned = INTERVENTION_DETAILS.clean(&raw);
    assert!(cleaned.values().all(JsonValue::is_null));
}

#[test]
fn test_clean_uncoercible_values_become_null() {
    let cleaned = INTERVENTION_DETAILS.clean(&json!({
        "id": {"nested": true},
        "date": "last tuesday",
        "response_time": "fast",
        "is_reply": "maybe",
        "tags": "complaint"
    }));

    assert_eq!(cleaned["id"], JsonValue::Null);
    assert_eq!(cleaned["created_at"], JsonValue::Null);
    assert_eq!(cleaned["response_time"], JsonValue::Null);
    assert_eq!(cleaned["is_reply"], JsonValue::Null);
    assert_eq!(cleaned["tags"], JsonValue::Null);
}

// ============================================================================
// Field Coercion Tests
// ============================================================================

#[test_case(FieldKind::String, json!("abc"), json!("abc") ; "string passthrough")]
#[test_case(FieldKind::String, json!(12), json!("12") ; "string from number")]
#[test_case(FieldKind::String, json!(false), json!("false") ; "string from bool")]
#[test_case(FieldKind::Integer, json!(" 17 "), json!(17) ; "integer from padded string")]
#[test_case(FieldKind::Integer, json!(2.5), json!(null) ; "integer rejects fraction")]
#[test_case(FieldKind::Number, json!("1.5"), json!(1.5) ; "number from string")]
#[test_case(FieldKind::Number, json!("NaN"), json!(null) ; "number rejects nan")]
#[test_case(FieldKind::Boolean, json!("TRUE"), json!(true) ; "boolean from string")]
#[test_case(FieldKind::Boolean, json!(0), json!(false) ; "boolean from zero")]
#[test_case(FieldKind::Boolean, json!(2), json!(null) ; "boolean rejects two")]
#[test_case(FieldKind::Timestamp, json!(0), json!("1970-01-01T00:00:00Z") ; "timestamp epoch zero")]
#[test_case(FieldKind::Timestamp, json!("2020-01-01T02:00:00+02:00"), json!("2020-01-01T00:00:00Z") ; "timestamp normalizes rfc3339")]
#[test_case(FieldKind::Timestamp, json!(i64::MAX), json!(null) ; "timestamp out of range")]
#[test_case(FieldKind::StringList, json!([]), json!([]) ; "empty list")]
fn test_field_coercion(kind: FieldKind, raw: JsonValue, expected: JsonValue) {
    assert_eq!(kind.coerce(Some(&raw)), expected);
}

#[test]
fn test_absent_and_null_coerce_to_null() {
    for field in INTERVENTION_DETAILS.fields {
        assert_eq!(field.kind.coerce(None), JsonValue::Null);
        assert_eq!(field.kind.coerce(Some(&JsonValue::Null)), JsonValue::Null);
    }
}

// ============================================================================
// Schema Tests
// ============================================================================

#[test]
fn test_schema_matches_cleaned_fields() {
    let schema = INTERVENTION_DETAILS.schema();
    let properties = schema["properties"].as_object().unwrap();
    let cleaned = INTERVENTION_DETAILS.clean(&json!({}));

    assert_eq!(schema["type"], "object");
    assert!(schema.get("additionalProperties").is_none());
    let mut schema_keys: Vec<&String> = properties.keys().collect();
    let mut record_keys: Vec<&String> = cleaned.keys().collect();
    schema_keys.sort();
    record_keys.sort();
    assert_eq!(schema_keys, record_keys);
}

#[test]
fn test_schema_types() {
    let schema = INTERVENTION_DETAILS.schema();

    assert_eq!(
        schema["properties"]["created_at"],
        json!({"type": ["null", "string"], "format": "date-time"})
    );
    assert_eq!(
        schema["properties"]["response_time"],
        json!({"type": ["null", "integer"]})
    );
    assert_eq!(
        schema["properties"]["tags"],
        json!({"type": ["null", "array"], "items": {"type": "string"}})
    );
}

#[test]
fn test_key_properties_exist_in_schema() {
    for report in all() {
        let schema = report.schema();
        for key in report.key_properties {
            assert!(schema["properties"].get(*key).is_some(), "{key} missing");
        }
    }
}
