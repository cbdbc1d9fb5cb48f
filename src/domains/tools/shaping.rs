//! Helpers for reading loosely-typed upstream JSON and building tool results.
//!
//! Upstream payloads are never deserialized into fixed structs: every field
//! may be absent or null, so access goes through functions returning
//! `Option` and shaping decides what an absent value means.

use rmcp::model::{CallToolResult, Content};
use serde::Serialize;
use serde_json::Value;

use super::error::ToolError;

/// Follow a dotted path (`"company.name"`) through nested objects.
///
/// Returns `None` as soon as a segment is missing or the current value is
/// not an object. An empty path returns the value itself.
pub fn lookup<'a>(value: &'a Value, path: &str) -> Option<&'a Value> {
    if path.is_empty() {
        return Some(value);
    }
    path.split('.')
        .try_fold(value, |current, segment| current.as_object()?.get(segment))
}

/// String value at `path`, if present and a string.
pub fn lookup_str<'a>(value: &'a Value, path: &str) -> Option<&'a str> {
    lookup(value, path).and_then(Value::as_str)
}

/// First element of an array, the value itself otherwise. Null and empty
/// arrays mean "no record".
pub fn first_or_self(value: &Value) -> Option<&Value> {
    match value {
        Value::Null => None,
        Value::Array(items) => items.first().filter(|item| !item.is_null()),
        other => Some(other),
    }
}

/// The record array stored under `key` in an object body.
///
/// A missing or null `key` is an empty list. A body that is not an object,
/// or a `key` holding something other than an array, is malformed.
pub fn records<'a>(tool: &str, body: &'a Value, key: &str) -> Result<&'a [Value], ToolError> {
    let object = body.as_object().ok_or_else(|| {
        ToolError::malformed(tool, format!("expected a JSON object with '{key}'"))
    })?;
    match object.get(key) {
        None | Some(Value::Null) => Ok(&[][..]),
        Some(Value::Array(items)) => Ok(items.as_slice()),
        Some(_) => Err(ToolError::malformed(
            tool,
            format!("expected '{key}' to be an array"),
        )),
    }
}

/// The single record a lookup endpoint answered with.
///
/// An array body yields its first element. An object body yields the first
/// element of the array under `key` (or the value under `key` itself when it
/// is not an array); without `key` there is no record. Scalars are malformed.
pub fn single_record<'a>(
    tool: &str,
    body: &'a Value,
    key: &str,
) -> Result<Option<&'a Value>, ToolError> {
    match body {
        Value::Null => Ok(None),
        Value::Array(_) => Ok(first_or_self(body)),
        Value::Object(object) => Ok(object.get(key).and_then(first_or_self)),
        _ => Err(ToolError::malformed(
            tool,
            format!("expected a JSON object or array, got {body}"),
        )),
    }
}

/// Pretty-printed JSON text. `None` renders as `null`.
pub fn pretty_json<T: Serialize + ?Sized>(tool: &str, value: &T) -> Result<String, ToolError> {
    serde_json::to_string_pretty(value)
        .map_err(|e| ToolError::internal(format!("{tool}: failed to serialize result: {e}")))
}

/// Wrap text into a successful tool result.
pub fn text_result(text: String) -> CallToolResult {
    CallToolResult::success(vec![Content::text(text)])
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_lookup_nested() {
        let record = json!({ "company": { "name": "Acme" }, "tags": ["a"] });
        assert_eq!(lookup_str(&record, "company.name"), Some("Acme"));
        assert_eq!(lookup(&record, "company.city"), None);
        assert_eq!(lookup(&record, "tags.0"), None);
        assert_eq!(lookup(&record, "missing.deeper"), None);
        assert_eq!(lookup(&record, ""), Some(&record));
    }

    #[test]
    fn test_lookup_through_null() {
        let record = json!({ "company": null });
        assert_eq!(lookup(&record, "company.name"), None);
    }

    #[test]
    fn test_first_or_self() {
        assert_eq!(first_or_self(&json!([1, 2])), Some(&json!(1)));
        assert_eq!(first_or_self(&json!([])), None);
        assert_eq!(first_or_self(&json!([null])), None);
        assert_eq!(first_or_self(&Value::Null), None);
        assert_eq!(first_or_self(&json!({ "id": 1 })), Some(&json!({ "id": 1 })));
    }

    #[test]
    fn test_records_tolerates_missing_key() {
        assert!(records("t", &json!({}), "users").unwrap().is_empty());
        assert!(records("t", &json!({ "users": null }), "users").unwrap().is_empty());
        assert_eq!(records("t", &json!({ "users": [1] }), "users").unwrap().len(), 1);
    }

    #[test]
    fn test_records_rejects_wrong_shape() {
        assert!(matches!(
            records("t", &json!([1, 2]), "users"),
            Err(ToolError::MalformedResponse { .. })
        ));
        assert!(matches!(
            records("t", &json!({ "users": "nope" }), "users"),
            Err(ToolError::MalformedResponse { .. })
        ));
    }

    #[test]
    fn test_single_record() {
        let body = json!({ "users": [{ "id": 1 }, { "id": 2 }] });
        assert_eq!(single_record("t", &body, "users").unwrap(), Some(&json!({ "id": 1 })));
        assert_eq!(single_record("t", &json!({ "users": [] }), "users").unwrap(), None);
        assert_eq!(single_record("t", &json!({ "total": 0 }), "users").unwrap(), None);
        assert_eq!(
            single_record("t", &json!({ "users": { "id": 3 } }), "users").unwrap(),
            Some(&json!({ "id": 3 }))
        );
        assert_eq!(single_record("t", &json!([{ "id": 4 }]), "users").unwrap(), Some(&json!({ "id": 4 })));
        assert_eq!(single_record("t", &Value::Null, "users").unwrap(), None);
        assert!(matches!(
            single_record("t", &json!("oops"), "users"),
            Err(ToolError::MalformedResponse { .. })
        ));
    }

    #[test]
    fn test_pretty_json_null() {
        let absent: Option<&Value> = None;
        assert_eq!(pretty_json("t", &absent).unwrap(), "null");
        assert_eq!(pretty_json("t", &json!([])).unwrap(), "[]");
        let records: &[Value] = &[];
        assert_eq!(pretty_json("t", records).unwrap(), "[]");
    }
}
