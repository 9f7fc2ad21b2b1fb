#![deny(missing_docs)]

//! # Operations
//!
//! Shim structures for Operation, Parameter, Request Body and Response objects,
//! plus the `PathOperation` triple (method, path, operation) handed to the
//! resolvers and example generator.

use crate::oas::node::SchemaNode;
use indexmap::IndexMap;
use serde::{Deserialize, Deserializer};
use serde_json::Value;
use std::fmt;

/// Name given to the synthetic parameter carrying a request body.
pub const BODY_PARAMETER_NAME: &str = "Body";

/// HTTP methods an operation can be bound to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum HttpMethod {
    /// GET
    Get,
    /// PUT
    Put,
    /// POST
    Post,
    /// DELETE
    Delete,
    /// OPTIONS
    Options,
    /// HEAD
    Head,
    /// PATCH
    Patch,
    /// TRACE
    Trace,
}

impl HttpMethod {
    /// All methods, in the order path items list them.
    pub const ALL: [HttpMethod; 8] = [
        HttpMethod::Get,
        HttpMethod::Put,
        HttpMethod::Post,
        HttpMethod::Delete,
        HttpMethod::Options,
        HttpMethod::Head,
        HttpMethod::Patch,
        HttpMethod::Trace,
    ];

    /// The path item key (lowercase).
    pub fn as_key(&self) -> &'static str {
        match self {
            HttpMethod::Get => "get",
            HttpMethod::Put => "put",
            HttpMethod::Post => "post",
            HttpMethod::Delete => "delete",
            HttpMethod::Options => "options",
            HttpMethod::Head => "head",
            HttpMethod::Patch => "patch",
            HttpMethod::Trace => "trace",
        }
    }
}

impl fmt::Display for HttpMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_key().to_uppercase())
    }
}

/// The `in` field of a parameter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ParameterLocation {
    /// Query string.
    Query,
    /// Request header.
    Header,
    /// Path template variable.
    Path,
    /// Cookie.
    Cookie,
    /// Request body (Swagger 2.0, or a converted OAS 3 request body).
    Body,
    /// Form field (Swagger 2.0).
    FormData,
    /// Anything else.
    #[serde(other)]
    Other,
}

impl ParameterLocation {
    /// The location as written in the document; also the request example key.
    pub fn as_str(&self) -> &'static str {
        match self {
            ParameterLocation::Query => "query",
            ParameterLocation::Header => "header",
            ParameterLocation::Path => "path",
            ParameterLocation::Cookie => "cookie",
            ParameterLocation::Body => "body",
            ParameterLocation::FormData => "formData",
            ParameterLocation::Other => "other",
        }
    }
}

/// Parameter Object.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ParameterNode {
    /// `$ref` to a reusable parameter; cleared once resolved.
    #[serde(rename = "$ref")]
    pub reference: Option<String>,
    /// Parameter name.
    #[serde(default)]
    pub name: String,
    /// Location.
    #[serde(rename = "in")]
    pub location: Option<ParameterLocation>,
    /// Description.
    pub description: Option<String>,
    /// Whether the parameter must be supplied.
    #[serde(default)]
    pub required: bool,
    /// Value schema.
    pub schema: Option<SchemaNode>,
    /// OAS 3 serialization style.
    pub style: Option<String>,
    /// OAS 3 explode flag.
    pub explode: Option<bool>,
    /// Swagger 2.0 array serialization.
    pub collection_format: Option<String>,
    /// Authored example.
    pub example: Option<Value>,
    /// Authored named examples.
    pub examples: Option<Value>,
    /// Remaining keywords, including vendor extensions.
    #[serde(flatten)]
    pub extra: IndexMap<String, Value>,
}

impl ParameterNode {
    /// Location, defaulting to `query` when absent.
    pub fn location(&self) -> ParameterLocation {
        self.location.unwrap_or(ParameterLocation::Query)
    }

    /// A vendor extension value.
    pub fn extension(&self, key: &str) -> Option<&Value> {
        if !key.starts_with("x-") {
            return None;
        }
        self.extra.get(key)
    }

    /// True for the synthetic request-body parameter and Swagger 2.0 body parameters.
    pub fn is_body(&self) -> bool {
        self.location() == ParameterLocation::Body
    }
}

/// Media Type Object.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct MediaTypeNode {
    /// Payload schema.
    pub schema: Option<SchemaNode>,
    /// Authored example.
    pub example: Option<Value>,
    /// Authored named examples (Example Objects).
    pub examples: Option<IndexMap<String, Value>>,
}

impl MediaTypeNode {
    /// The authored example: the first named example's `value`, or `example`.
    pub fn authored_example(&self) -> Option<Value> {
        if let Some((_, first)) = self.examples.as_ref().and_then(|e| e.first()) {
            return Some(first.get("value").cloned().unwrap_or_else(|| first.clone()));
        }
        self.example.clone()
    }
}

/// Request Body Object.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct RequestBodyNode {
    /// `$ref` to a reusable request body.
    #[serde(rename = "$ref")]
    pub reference: Option<String>,
    /// Description.
    pub description: Option<String>,
    /// Media type -> payload.
    #[serde(default)]
    pub content: IndexMap<String, MediaTypeNode>,
    /// Whether a body must be sent.
    #[serde(default)]
    pub required: bool,
    /// Remaining keywords, including vendor extensions.
    #[serde(flatten)]
    pub extra: IndexMap<String, Value>,
}

impl RequestBodyNode {
    /// Converts the body into the `Body` parameter of its operation, using the
    /// first media type.
    pub fn to_parameter(&self) -> ParameterNode {
        let media = self.content.values().next();
        ParameterNode {
            reference: self.reference.clone(),
            name: BODY_PARAMETER_NAME.to_string(),
            location: Some(ParameterLocation::Body),
            description: self.description.clone(),
            required: self.required,
            schema: media.and_then(|m| m.schema.clone()),
            example: media.and_then(MediaTypeNode::authored_example),
            extra: self.extra.clone(),
            ..Default::default()
        }
    }
}

/// Response Object.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct ResponseNode {
    /// `$ref` to a reusable response.
    #[serde(rename = "$ref")]
    pub reference: Option<String>,
    /// Description.
    #[serde(default)]
    pub description: String,
    /// Media type -> payload.
    #[serde(default)]
    pub content: IndexMap<String, MediaTypeNode>,
}

impl ResponseNode {
    /// The first declared media type.
    pub fn first_media(&self) -> Option<&MediaTypeNode> {
        self.content.values().next()
    }
}

/// Operation Object.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OperationNode {
    /// Unique operation id.
    pub operation_id: Option<String>,
    /// Short summary.
    pub summary: Option<String>,
    /// Long description.
    pub description: Option<String>,
    /// Tags.
    #[serde(default)]
    pub tags: Vec<String>,
    /// Parameters. After loading this holds the merged, resolved list with
    /// the request body appended as the `Body` parameter.
    #[serde(default)]
    pub parameters: Vec<ParameterNode>,
    /// OAS 3 request body.
    pub request_body: Option<RequestBodyNode>,
    /// Status code (or `default`) -> response.
    #[serde(default, deserialize_with = "deserialize_responses")]
    pub responses: IndexMap<String, ResponseNode>,
    /// Deprecation flag.
    #[serde(default)]
    pub deprecated: bool,
}

/// Skips `x-` keys of the Responses Object.
fn deserialize_responses<'de, D>(deserializer: D) -> Result<IndexMap<String, ResponseNode>, D::Error>
where
    D: Deserializer<'de>,
{
    use serde::de::Error as DeError;

    let raw = Option::<IndexMap<String, Value>>::deserialize(deserializer)?.unwrap_or_default();
    let mut responses = IndexMap::new();
    for (code, value) in raw {
        if code.starts_with("x-") {
            continue;
        }
        let response = serde_json::from_value::<ResponseNode>(value).map_err(|e| {
            DeError::custom(format!("Failed to parse response '{}': {}", code, e))
        })?;
        responses.insert(code, response);
    }
    Ok(responses)
}

/// An operation bound to its method and path template.
#[derive(Debug, Clone, PartialEq)]
pub struct PathOperation {
    /// HTTP method.
    pub method: HttpMethod,
    /// Path template, e.g. `/pets/{petId}`.
    pub path: String,
    /// The operation.
    pub operation: OperationNode,
}

impl PathOperation {
    /// Binds an operation.
    pub fn new(method: HttpMethod, path: impl Into<String>, operation: OperationNode) -> Self {
        Self {
            method,
            path: path.into(),
            operation,
        }
    }

    /// The operation id, or `"<path> <method>"` when none is declared.
    pub fn id(&self) -> String {
        match &self.operation.operation_id {
            Some(id) => id.clone(),
            None => format!("{} {}", self.path, self.method.as_key()),
        }
    }

    /// Display title: summary, else the id.
    pub fn title(&self) -> String {
        self.operation.summary.clone().unwrap_or_else(|| self.id())
    }

    /// Parameters in declaration order (request body last).
    pub fn parameters(&self) -> &[ParameterNode] {
        &self.operation.parameters
    }

    /// Responses in declaration order.
    pub fn responses(&self) -> &IndexMap<String, ResponseNode> {
        &self.operation.responses
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_operation_id_fallback() {
        let op = PathOperation::new(HttpMethod::Get, "/test", OperationNode::default());
        assert_eq!(op.id(), "/test get");

        let named = PathOperation::new(
            HttpMethod::Post,
            "/pets",
            OperationNode {
                operation_id: Some("addPet".to_string()),
                ..Default::default()
            },
        );
        assert_eq!(named.id(), "addPet");
        assert_eq!(named.method.to_string(), "POST");
    }

    #[test]
    fn test_parameter_shapes() {
        let param: ParameterNode = serde_json::from_value(json!({
            "name": "petId",
            "in": "path",
            "required": true,
            "schema": { "type": "integer", "format": "int64" },
            "x-example": 42
        }))
        .unwrap();
        assert_eq!(param.location(), ParameterLocation::Path);
        assert!(param.required);
        assert_eq!(param.extension("x-example"), Some(&json!(42)));

        let form: ParameterNode =
            serde_json::from_value(json!({ "name": "file", "in": "formData" })).unwrap();
        assert_eq!(form.location().as_str(), "formData");
    }

    #[test]
    fn test_request_body_to_parameter() {
        let body: RequestBodyNode = serde_json::from_value(json!({
            "description": "Pet to add",
            "required": true,
            "content": {
                "application/json": {
                    "schema": { "$ref": "#/components/schemas/Pet" },
                    "examples": { "doggie": { "value": { "name": "doggie" } } }
                },
                "application/xml": { "schema": { "type": "string" } }
            }
        }))
        .unwrap();

        let param = body.to_parameter();
        assert_eq!(param.name, "Body");
        assert!(param.is_body());
        assert!(param.required);
        assert_eq!(
            param.schema.unwrap().reference.as_deref(),
            Some("#/components/schemas/Pet")
        );
        assert_eq!(param.example, Some(json!({ "name": "doggie" })));
    }

    #[test]
    fn test_responses_skip_extensions() {
        let op: OperationNode = serde_json::from_value(json!({
            "responses": {
                "200": { "description": "ok" },
                "x-internal": true,
                "default": { "description": "error" }
            }
        }))
        .unwrap();
        assert_eq!(
            op.responses.keys().collect::<Vec<_>>(),
            vec!["200", "default"]
        );
    }
}
