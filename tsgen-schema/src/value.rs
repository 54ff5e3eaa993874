use serde_json::Value;

/// Short type name used in "Expected X. Received Y." messages.
pub(crate) fn describe(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "list",
        Value::Object(_) => "object",
    }
}

pub(crate) fn type_mismatch(expected: &str, received: &Value) -> String {
    format!("Expected {expected}. Received {}.", describe(received))
}
