//! Argument validation against a tool's input schema.
//!
//! Input schemas are generated from each tool's params struct, so the schema
//! advertised in `tools/list` is the one enforced here. Only the subset of
//! JSON Schema those structs produce is checked: `required`, `type`,
//! `minLength`/`maxLength` and `minimum`/`maximum`.

use rmcp::model::JsonObject;
use serde_json::Value;
use tracing::debug;

use super::error::ToolError;

/// Check raw arguments against an input schema.
///
/// Values are never coerced: a number sent as a string is rejected.
/// Arguments the schema does not declare are ignored.
pub fn validate_arguments(schema: &JsonObject, arguments: &JsonObject) -> Result<(), ToolError> {
    let empty = JsonObject::new();
    let properties = schema
        .get("properties")
        .and_then(Value::as_object)
        .unwrap_or(&empty);

    if let Some(required) = schema.get("required").and_then(Value::as_array) {
        for name in required.iter().filter_map(Value::as_str) {
            match arguments.get(name) {
                None | Some(Value::Null) => {
                    return Err(ToolError::validation(name, "is required"));
                }
                Some(_) => {}
            }
        }
    }

    for (name, value) in arguments {
        match properties.get(name).and_then(Value::as_object) {
            Some(property) => validate_value(name, property, value)?,
            None => debug!("Ignoring undeclared argument '{}'", name),
        }
    }

    Ok(())
}

fn validate_value(name: &str, property: &JsonObject, value: &Value) -> Result<(), ToolError> {
    let allowed = declared_types(property);
    if !allowed.is_empty() && !allowed.iter().any(|ty| matches_type(ty, value)) {
        return Err(ToolError::validation(
            name,
            format!(
                "expected {}, got {}",
                allowed.join(" or "),
                json_type_name(value)
            ),
        ));
    }

    if let Some(text) = value.as_str() {
        let length = text.chars().count() as u64;
        if let Some(min) = property.get("minLength").and_then(Value::as_u64) {
            if length < min {
                return Err(ToolError::validation(
                    name,
                    format!("must be at least {min} characters"),
                ));
            }
        }
        if let Some(max) = property.get("maxLength").and_then(Value::as_u64) {
            if length > max {
                return Err(ToolError::validation(
                    name,
                    format!("must be at most {max} characters"),
                ));
            }
        }
    }

    if let Some(number) = value.as_f64() {
        if let Some(min) = property.get("minimum").and_then(Value::as_f64) {
            if number < min {
                return Err(ToolError::validation(name, format!("must be >= {min}")));
            }
        }
        if let Some(max) = property.get("maximum").and_then(Value::as_f64) {
            if number > max {
                return Err(ToolError::validation(name, format!("must be <= {max}")));
            }
        }
    }

    Ok(())
}

fn declared_types(property: &JsonObject) -> Vec<&str> {
    match property.get("type") {
        Some(Value::String(ty)) => vec![ty.as_str()],
        Some(Value::Array(types)) => types.iter().filter_map(Value::as_str).collect(),
        _ => Vec::new(),
    }
}

fn matches_type(ty: &str, value: &Value) -> bool {
    match ty {
        "string" => value.is_string(),
        "integer" => value.is_i64() || value.is_u64(),
        "number" => value.is_number(),
        "boolean" => value.is_boolean(),
        "object" => value.is_object(),
        "array" => value.is_array(),
        "null" => value.is_null(),
        _ => true,
    }
}

fn json_type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(n) if n.is_f64() => "number",
        Value::Number(_) => "integer",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn object(value: Value) -> JsonObject {
        match value {
            Value::Object(map) => map,
            other => panic!("expected object, got {other}"),
        }
    }

    fn name_schema() -> JsonObject {
        object(json!({
            "type": "object",
            "properties": {
                "firstName": { "type": "string", "minLength": 2, "maxLength": 100 }
            },
            "required": ["firstName"]
        }))
    }

    fn id_schema() -> JsonObject {
        object(json!({
            "type": "object",
            "properties": {
                "id": { "type": "integer", "format": "int64", "minimum": 1 }
            },
            "required": ["id"]
        }))
    }

    fn assert_rejects(schema: &JsonObject, args: Value, parameter: &str, needle: &str) {
        match validate_arguments(schema, &object(args)) {
            Err(ToolError::Validation {
                parameter: p,
                constraint,
            }) => {
                assert_eq!(p, parameter);
                assert!(
                    constraint.contains(needle),
                    "constraint '{constraint}' should mention '{needle}'"
                );
            }
            other => panic!("expected validation error, got {other:?}"),
        }
    }

    #[test]
    fn test_missing_required_parameter() {
        assert_rejects(&name_schema(), json!({}), "firstName", "required");
        assert_rejects(&name_schema(), json!({ "firstName": null }), "firstName", "required");
    }

    #[test]
    fn test_string_shorter_than_min() {
        assert_rejects(&name_schema(), json!({ "firstName": "J" }), "firstName", "at least 2");
    }

    #[test]
    fn test_string_longer_than_max() {
        let long = "a".repeat(101);
        assert_rejects(&name_schema(), json!({ "firstName": long }), "firstName", "at most 100");
    }

    #[test]
    fn test_string_bounds_are_inclusive() {
        let schema = name_schema();
        assert!(validate_arguments(&schema, &object(json!({ "firstName": "Jo" }))).is_ok());
        let max = "a".repeat(100);
        assert!(validate_arguments(&schema, &object(json!({ "firstName": max }))).is_ok());
    }

    #[test]
    fn test_length_counts_characters() {
        // Two characters, four bytes.
        assert!(validate_arguments(&name_schema(), &object(json!({ "firstName": "Éé" }))).is_ok());
    }

    #[test]
    fn test_no_coercion_from_string() {
        assert_rejects(&id_schema(), json!({ "id": "5" }), "id", "expected integer");
    }

    #[test]
    fn test_integer_rejects_fraction() {
        assert_rejects(&id_schema(), json!({ "id": 1.5 }), "id", "got number");
    }

    #[test]
    fn test_number_minimum() {
        assert_rejects(&id_schema(), json!({ "id": 0 }), "id", ">= 1");
        assert!(validate_arguments(&id_schema(), &object(json!({ "id": 7 }))).is_ok());
    }

    #[test]
    fn test_wrong_type_for_string() {
        assert_rejects(&name_schema(), json!({ "firstName": 42 }), "firstName", "expected string");
    }

    #[test]
    fn test_undeclared_arguments_ignored() {
        let args = object(json!({ "firstName": "Emily", "verbose": true }));
        assert!(validate_arguments(&name_schema(), &args).is_ok());
    }

    #[test]
    fn test_nullable_type_list() {
        let schema = object(json!({
            "type": "object",
            "properties": { "note": { "type": ["string", "null"] } }
        }));
        assert!(validate_arguments(&schema, &object(json!({ "note": null }))).is_ok());
        assert!(validate_arguments(&schema, &object(json!({}))).is_ok());
    }

    #[test]
    fn test_empty_schema_accepts_empty_arguments() {
        let schema = object(json!({ "type": "object", "properties": {} }));
        assert!(validate_arguments(&schema, &JsonObject::new()).is_ok());
    }
}
