//! Placeholder values for primitive schemas.

use serde_json::{json, Value};

/// Value generated for a schema with no structural information.
pub const UNTYPED_EXAMPLE: &str = "untyped";

/// Example string for a `format`, or `"string"`.
pub fn string_example(format: Option<&str>) -> &'static str {
    match format {
        Some("byte") => "Ynl0ZQ==",
        Some("date") => "1970-01-01",
        Some("date-time") => "1970-01-01T00:00:00Z",
        Some("email") => "email@example.com",
        Some("password") => "secret",
        Some("uuid") => "f81d4fae-7dec-11d0-a765-00a0c91e6bf6",
        _ => "string",
    }
}

/// Example for a declared primitive `type` (`None` = untyped).
///
/// Unknown type names are echoed back as strings.
pub fn primitive_example(kind: Option<&str>, format: Option<&str>) -> Value {
    match kind {
        None | Some("untyped") => Value::String(UNTYPED_EXAMPLE.to_string()),
        Some("string") => Value::String(string_example(format).to_string()),
        Some("integer") => json!(0),
        Some("number") => json!(0.0),
        Some("boolean") => Value::Bool(true),
        Some("object") => json!({}),
        Some(other) => Value::String(other.to_string()),
    }
}

/// Converts a textual example (e.g. a `x-example` written as a string) to
/// the declared type. Unparseable text is kept as a string.
pub fn convert_example(value: &str, kind: Option<&str>) -> Value {
    let converted = match kind {
        Some("integer") => value.trim().parse::<i64>().ok().map(Value::from),
        Some("number") => value.trim().parse::<f64>().ok().map(Value::from),
        Some("boolean") => value.trim().parse::<bool>().ok().map(Value::Bool),
        _ => return Value::String(value.to_string()),
    };
    converted.unwrap_or_else(|| {
        log::warn!("Example '{}' cannot be converted to {:?}", value, kind);
        Value::String(value.to_string())
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_string_formats() {
        assert_eq!(string_example(Some("uuid")), "f81d4fae-7dec-11d0-a765-00a0c91e6bf6");
        assert_eq!(string_example(Some("date-time")), "1970-01-01T00:00:00Z");
        assert_eq!(string_example(Some("byte")), "Ynl0ZQ==");
        assert_eq!(string_example(Some("hostname")), "string");
        assert_eq!(string_example(None), "string");
    }

    #[test]
    fn test_primitive_examples() {
        assert_eq!(primitive_example(Some("integer"), Some("int64")), json!(0));
        assert_eq!(primitive_example(Some("number"), None), json!(0.0));
        assert_eq!(primitive_example(Some("boolean"), None), json!(true));
        assert_eq!(primitive_example(None, None), json!("untyped"));
        assert_eq!(primitive_example(Some("file"), None), json!("file"));
    }

    #[test]
    fn test_convert_example() {
        assert_eq!(convert_example("42", Some("integer")), json!(42));
        assert_eq!(convert_example("1.5", Some("number")), json!(1.5));
        assert_eq!(convert_example("true", Some("boolean")), json!(true));
        assert_eq!(convert_example("abc", Some("integer")), json!("abc"));
        assert_eq!(convert_example("abc", Some("string")), json!("abc"));
    }
}
