#![deny(missing_docs)]

//! # Schema Nodes
//!
//! Loosely-typed deserialization layer for Schema Objects.
//!
//! A node may carry any combination of keywords; nothing here decides what the
//! node *is*. Classification happens once, in `crate::model::normalizer`.
//! Both Swagger 2.0 and OpenAPI 3.x spellings are accepted.

use indexmap::IndexMap;
use serde::{Deserialize, Deserializer};
use serde_json::Value;

/// A raw Schema Object.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SchemaNode {
    /// The `$ref` pointer, verbatim.
    #[serde(rename = "$ref")]
    pub reference: Option<String>,
    /// Structural kind (`type`).
    #[serde(rename = "type")]
    pub schema_type: Option<SchemaTypeDecl>,
    /// The `format` modifier.
    pub format: Option<String>,
    /// Display title.
    pub title: Option<String>,
    /// Description (may contain markup).
    pub description: Option<String>,
    /// Declared properties, in document order.
    pub properties: Option<IndexMap<String, SchemaNode>>,
    /// `additionalProperties`, either a flag or a value schema.
    pub additional_properties: Option<AdditionalProperties>,
    /// Array item schema.
    pub items: Option<Box<SchemaNode>>,
    /// Enumerated values.
    #[serde(rename = "enum")]
    pub enum_values: Option<Vec<Value>>,
    /// Composition branches.
    pub all_of: Option<Vec<SchemaNode>>,
    /// Discriminator declaration.
    pub discriminator: Option<Discriminator>,
    /// Names of required properties.
    #[serde(default, deserialize_with = "deserialize_required")]
    pub required: Vec<String>,
    /// Default value.
    pub default: Option<Value>,
    /// Authored example.
    pub example: Option<Value>,
    /// Inclusive (or exclusive, see below) lower bound.
    pub minimum: Option<f64>,
    /// Inclusive (or exclusive, see below) upper bound.
    pub maximum: Option<f64>,
    /// `exclusiveMinimum`: a flag (OAS 3.0) or the bound itself (OAS 3.1).
    pub exclusive_minimum: Option<ExclusiveBound>,
    /// `exclusiveMaximum`: a flag (OAS 3.0) or the bound itself (OAS 3.1).
    pub exclusive_maximum: Option<ExclusiveBound>,
    /// Minimum string length.
    pub min_length: Option<u64>,
    /// Maximum string length.
    pub max_length: Option<u64>,
    /// Minimum array length.
    pub min_items: Option<u64>,
    /// Maximum array length.
    pub max_items: Option<u64>,
    /// Regular expression constraint.
    pub pattern: Option<String>,
    /// Read-only flag.
    pub read_only: Option<bool>,
    /// Remaining keywords, including vendor extensions (`x-...`).
    #[serde(flatten)]
    pub extra: IndexMap<String, Value>,
}

/// The `type` keyword: a single name, or a list (OAS 3.1).
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum SchemaTypeDecl {
    /// `type: string`
    Single(String),
    /// `type: [string, "null"]`
    Multiple(Vec<String>),
}

/// `additionalProperties`.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum AdditionalProperties {
    /// `additionalProperties: true|false`
    Flag(bool),
    /// `additionalProperties: { ...schema }`
    Schema(Box<SchemaNode>),
}

/// `exclusiveMinimum` / `exclusiveMaximum`.
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum ExclusiveBound {
    /// OAS 3.0: modifies `minimum`/`maximum`.
    Flag(bool),
    /// OAS 3.1: the bound itself.
    Value(f64),
}

/// Discriminator declaration.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum Discriminator {
    /// Swagger 2.0: the property name.
    Name(String),
    /// OpenAPI 3.x: a Discriminator Object.
    Object {
        /// Name of the discriminating property.
        #[serde(rename = "propertyName")]
        property_name: String,
        /// Discriminator value -> schema reference.
        #[serde(default)]
        mapping: IndexMap<String, String>,
    },
}

impl Discriminator {
    /// The discriminating property name.
    pub fn property_name(&self) -> &str {
        match self {
            Discriminator::Name(name) => name,
            Discriminator::Object { property_name, .. } => property_name,
        }
    }
}

/// Accepts a list of names, or tolerates a stray boolean (`required: true`
/// written on a property) by treating it as "no list".
fn deserialize_required<'de, D>(deserializer: D) -> Result<Vec<String>, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum RequiredDecl {
        Names(Vec<String>),
        Flag(bool),
    }

    Ok(match Option::<RequiredDecl>::deserialize(deserializer)? {
        Some(RequiredDecl::Names(names)) => names,
        Some(RequiredDecl::Flag(_)) | None => Vec::new(),
    })
}

impl SchemaNode {
    /// The structural kind, ignoring a `"null"` member of a type list.
    pub fn kind(&self) -> Option<&str> {
        match self.schema_type.as_ref()? {
            SchemaTypeDecl::Single(name) => Some(name.as_str()),
            SchemaTypeDecl::Multiple(names) => names
                .iter()
                .map(String::as_str)
                .find(|name| *name != "null"),
        }
    }

    /// True if the kind is `array`.
    pub fn is_array(&self) -> bool {
        self.kind() == Some("array")
    }

    /// The value schema of a map, if `additionalProperties` is a schema.
    pub fn additional_schema(&self) -> Option<&SchemaNode> {
        match self.additional_properties.as_ref()? {
            AdditionalProperties::Schema(schema) => Some(schema),
            AdditionalProperties::Flag(_) => None,
        }
    }

    /// True when the node has map semantics: a value schema and no properties.
    pub fn is_map(&self) -> bool {
        self.properties.is_none() && self.additional_schema().is_some()
    }

    /// The declared discriminator property, if any.
    pub fn discriminator_name(&self) -> Option<&str> {
        self.discriminator.as_ref().map(Discriminator::property_name)
    }

    /// True if `property` is listed in this node's `required` list.
    pub fn requires(&self, property: &str) -> bool {
        self.required.iter().any(|name| name == property)
    }

    /// A vendor extension value (key including the `x-` prefix).
    pub fn extension(&self, key: &str) -> Option<&Value> {
        if !key.starts_with("x-") {
            return None;
        }
        self.extra.get(key)
    }

    /// Whether the lower bound is exclusive.
    pub fn is_exclusive_minimum(&self) -> bool {
        matches!(
            self.exclusive_minimum,
            Some(ExclusiveBound::Flag(true)) | Some(ExclusiveBound::Value(_))
        )
    }

    /// Whether the upper bound is exclusive.
    pub fn is_exclusive_maximum(&self) -> bool {
        matches!(
            self.exclusive_maximum,
            Some(ExclusiveBound::Flag(true)) | Some(ExclusiveBound::Value(_))
        )
    }

    /// Effective lower bound (OAS 3.1 exclusive bound wins over `minimum`).
    pub fn lower_bound(&self) -> Option<f64> {
        match self.exclusive_minimum {
            Some(ExclusiveBound::Value(v)) => Some(v),
            _ => self.minimum,
        }
    }

    /// Effective upper bound (OAS 3.1 exclusive bound wins over `maximum`).
    pub fn upper_bound(&self) -> Option<f64> {
        match self.exclusive_maximum {
            Some(ExclusiveBound::Value(v)) => Some(v),
            _ => self.maximum,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn node(value: Value) -> SchemaNode {
        serde_json::from_value(value).unwrap()
    }

    #[test]
    fn test_kind_single_and_list() {
        assert_eq!(node(json!({"type": "string"})).kind(), Some("string"));
        assert_eq!(
            node(json!({"type": ["null", "integer"]})).kind(),
            Some("integer")
        );
        assert_eq!(node(json!({})).kind(), None);
    }

    #[test]
    fn test_additional_properties_flag_is_not_a_map() {
        let flagged = node(json!({"type": "object", "additionalProperties": true}));
        assert!(!flagged.is_map());

        let map = node(json!({"additionalProperties": {"type": "integer"}}));
        assert!(map.is_map());
        assert_eq!(map.additional_schema().unwrap().kind(), Some("integer"));
    }

    #[test]
    fn test_discriminator_both_spellings() {
        let v2 = node(json!({"discriminator": "petType"}));
        assert_eq!(v2.discriminator_name(), Some("petType"));

        let v3 = node(json!({
            "discriminator": {"propertyName": "kind", "mapping": {"cat": "#/components/schemas/Cat"}}
        }));
        assert_eq!(v3.discriminator_name(), Some("kind"));
    }

    #[test]
    fn test_required_tolerates_boolean() {
        let stray = node(json!({"type": "string", "required": true}));
        assert!(stray.required.is_empty());

        let listed = node(json!({"required": ["id"]}));
        assert!(listed.requires("id"));
        assert!(!listed.requires("name"));
    }

    #[test]
    fn test_properties_keep_document_order() {
        let n = node(json!({
            "properties": {"zeta": {"type": "string"}, "alpha": {"type": "string"}}
        }));
        let keys: Vec<_> = n.properties.unwrap().keys().cloned().collect();
        assert_eq!(keys, vec!["zeta", "alpha"]);
    }

    #[test]
    fn test_extensions_and_bounds() {
        let n = node(json!({
            "type": "number",
            "minimum": 1.5,
            "exclusiveMaximum": 10,
            "x-internal": true,
            "oneOf": []
        }));
        assert_eq!(n.extension("x-internal"), Some(&json!(true)));
        assert!(n.extension("oneOf").is_none());
        assert_eq!(n.lower_bound(), Some(1.5));
        assert!(!n.is_exclusive_minimum());
        assert_eq!(n.upper_bound(), Some(10.0));
        assert!(n.is_exclusive_maximum());
    }
}
