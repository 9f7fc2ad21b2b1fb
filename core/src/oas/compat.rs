#![deny(missing_docs)]

//! # Document Compatibility
//!
//! Rewrites applied to the raw JSON tree before typed deserialization so that
//! Swagger 2.0, OpenAPI 3.0 and 3.1 documents reach the converters in one shape.
//!
//! - boolean schemas become object schemas
//! - `const` becomes a single-value `enum`
//! - Swagger 2.0 non-body parameters get their inline keywords moved under `schema`
//! - Swagger 2.0 responses get their `schema`/`examples` moved under `content`

use serde_json::{json, Map, Value};

/// Keywords a Swagger 2.0 non-body parameter carries inline instead of in `schema`.
const SWAGGER2_PARAMETER_SCHEMA_KEYS: &[&str] = &[
    "type",
    "format",
    "items",
    "enum",
    "default",
    "minimum",
    "maximum",
    "exclusiveMinimum",
    "exclusiveMaximum",
    "minLength",
    "maxLength",
    "pattern",
    "minItems",
    "maxItems",
];

/// Media type used when a Swagger 2.0 response declares no example mime type.
const SWAGGER2_DEFAULT_MEDIA_TYPE: &str = "*/*";

/// Applies every rewrite in this module.
pub(crate) fn normalize_document(value: &mut Value) {
    normalize_boolean_schemas(value);
    normalize_const_schemas(value);
    lift_swagger2_parameters(value);
    lift_swagger2_responses(value);
}

/// Normalizes boolean schemas (`true` / `false`) into object schemas.
///
/// - `true` becomes `{}` (untyped)
/// - `false` becomes an object that admits no properties
pub(crate) fn normalize_boolean_schemas(value: &mut Value) {
    if let Some(schemas) = value
        .get_mut("components")
        .and_then(|c| c.get_mut("schemas"))
        .and_then(|s| s.as_object_mut())
    {
        for schema in schemas.values_mut() {
            normalize_schema_node(schema);
        }
    }
    if let Some(definitions) = value.get_mut("definitions").and_then(|d| d.as_object_mut()) {
        for schema in definitions.values_mut() {
            normalize_schema_node(schema);
        }
    }

    normalize_schema_fields(value);
}

/// Normalizes `const` into a single-value `enum`, inferring `type` when absent.
pub(crate) fn normalize_const_schemas(value: &mut Value) {
    match value {
        Value::Object(map) => {
            if let Some(const_val) = map.remove("const") {
                if !map.contains_key("type") {
                    if let Some(type_name) = infer_schema_type(&const_val) {
                        map.insert("type".to_string(), Value::String(type_name.to_string()));
                    }
                }
                if !map.contains_key("enum") {
                    map.insert("enum".to_string(), Value::Array(vec![const_val]));
                }
            }

            for (key, v) in map.iter_mut() {
                if matches!(key.as_str(), "example" | "examples" | "default" | "enum") {
                    continue;
                }
                normalize_const_schemas(v);
            }
        }
        Value::Array(items) => {
            for v in items.iter_mut() {
                normalize_const_schemas(v);
            }
        }
        _ => {}
    }
}

/// Moves inline type keywords of Swagger 2.0 non-body parameters under `schema`.
///
/// `collectionFormat` stays on the parameter; it is read by the parameter typer.
pub(crate) fn lift_swagger2_parameters(value: &mut Value) {
    if let Some(parameters) = value.get_mut("parameters").and_then(|p| p.as_object_mut()) {
        for parameter in parameters.values_mut() {
            lift_parameter(parameter);
        }
    }
    if let Some(parameters) = value
        .get_mut("components")
        .and_then(|c| c.get_mut("parameters"))
        .and_then(|p| p.as_object_mut())
    {
        for parameter in parameters.values_mut() {
            lift_parameter(parameter);
        }
    }

    let Some(paths) = value.get_mut("paths").and_then(|p| p.as_object_mut()) else {
        return;
    };
    for path_item in paths.values_mut() {
        let Some(path_item) = path_item.as_object_mut() else {
            continue;
        };
        for (key, entry) in path_item.iter_mut() {
            if key == "parameters" {
                lift_parameter_list(entry);
            } else if let Some(list) = entry.get_mut("parameters") {
                lift_parameter_list(list);
            }
        }
    }
}

/// Wraps Swagger 2.0 response `schema`/`examples` into an OAS 3 `content` map.
pub(crate) fn lift_swagger2_responses(value: &mut Value) {
    if let Some(responses) = value.get_mut("responses").and_then(|r| r.as_object_mut()) {
        for response in responses.values_mut() {
            lift_response(response);
        }
    }

    let Some(paths) = value.get_mut("paths").and_then(|p| p.as_object_mut()) else {
        return;
    };
    for path_item in paths.values_mut() {
        let Some(path_item) = path_item.as_object_mut() else {
            continue;
        };
        for operation in path_item.values_mut() {
            if let Some(responses) = operation
                .get_mut("responses")
                .and_then(|r| r.as_object_mut())
            {
                for response in responses.values_mut() {
                    lift_response(response);
                }
            }
        }
    }
}

fn lift_parameter_list(list: &mut Value) {
    if let Some(items) = list.as_array_mut() {
        for parameter in items.iter_mut() {
            lift_parameter(parameter);
        }
    }
}

fn lift_parameter(parameter: &mut Value) {
    let Some(map) = parameter.as_object_mut() else {
        return;
    };
    if map.contains_key("schema") || map.contains_key("$ref") {
        return;
    }
    if map.get("in").and_then(Value::as_str) == Some("body") {
        return;
    }

    let mut schema = Map::new();
    for key in SWAGGER2_PARAMETER_SCHEMA_KEYS {
        if let Some(v) = map.remove(*key) {
            schema.insert((*key).to_string(), v);
        }
    }
    if !schema.is_empty() {
        map.insert("schema".to_string(), Value::Object(schema));
    }
}

fn lift_response(response: &mut Value) {
    let Some(map) = response.as_object_mut() else {
        return;
    };
    if map.contains_key("content") || map.contains_key("$ref") {
        return;
    }
    let schema = map.remove("schema");
    let examples = map.remove("examples");
    if schema.is_none() && examples.is_none() {
        return;
    }

    // 1. One media type per authored example; the schema is shared.
    let mut content = Map::new();
    if let Some(Value::Object(by_mime)) = examples {
        for (mime, example) in by_mime {
            let mut media = Map::new();
            if let Some(s) = &schema {
                media.insert("schema".to_string(), s.clone());
            }
            media.insert("example".to_string(), example);
            content.insert(mime, Value::Object(media));
        }
    }

    // 2. Schema without examples.
    if content.is_empty() {
        if let Some(s) = schema {
            content.insert(
                SWAGGER2_DEFAULT_MEDIA_TYPE.to_string(),
                json!({ "schema": s }),
            );
        }
    }

    map.insert("content".to_string(), Value::Object(content));
}

fn infer_schema_type(value: &Value) -> Option<&'static str> {
    match value {
        Value::String(_) => Some("string"),
        Value::Bool(_) => Some("boolean"),
        Value::Number(num) if num.is_i64() || num.is_u64() => Some("integer"),
        Value::Number(_) => Some("number"),
        Value::Array(_) => Some("array"),
        Value::Object(_) => Some("object"),
        Value::Null => None,
    }
}

fn normalize_schema_fields(value: &mut Value) {
    match value {
        Value::Object(map) => {
            for (key, v) in map.iter_mut() {
                match key.as_str() {
                    "schema" => normalize_schema_node(v),
                    _ => normalize_schema_fields(v),
                }
            }
        }
        Value::Array(items) => {
            for v in items.iter_mut() {
                normalize_schema_fields(v);
            }
        }
        _ => {}
    }
}

fn normalize_schema_node(value: &mut Value) {
    match value {
        Value::Bool(flag) => {
            *value = bool_schema_replacement(*flag);
        }
        Value::Object(map) => {
            if let Some(props) = map.get_mut("properties").and_then(|v| v.as_object_mut()) {
                for v in props.values_mut() {
                    normalize_schema_node(v);
                }
            }
            if let Some(items) = map.get_mut("items") {
                normalize_schema_node(items);
            }
            if let Some(all_of) = map.get_mut("allOf").and_then(|v| v.as_array_mut()) {
                for v in all_of.iter_mut() {
                    normalize_schema_node(v);
                }
            }
            if let Some(additional) = map.get_mut("additionalProperties") {
                if !additional.is_boolean() {
                    normalize_schema_node(additional);
                }
            }
        }
        _ => {}
    }
}

fn bool_schema_replacement(flag: bool) -> Value {
    if flag {
        Value::Object(Map::new())
    } else {
        json!({
            "type": "object",
            "additionalProperties": false
        })
    }
}
