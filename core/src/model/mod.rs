#![deny(missing_docs)]

//! # Normalized Models
//!
//! A closed classification of raw schema nodes. Each variant keeps only the
//! fields its kind needs plus [`ModelMeta`].
//!
//! - **normalizer**: raw [`SchemaNode`] -> [`Model`].

pub mod normalizer;

use crate::oas::node::SchemaNode;
use crate::types::PrimitiveKind;
use indexmap::IndexMap;
use serde_json::Value;

pub use normalizer::{normalize, normalize_definition};

/// Metadata shared by every model kind.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ModelMeta {
    /// Display title.
    pub title: Option<String>,
    /// Description.
    pub description: Option<String>,
    /// Authored example.
    pub example: Option<Value>,
    /// Default value.
    pub default: Option<Value>,
    /// Required property names.
    pub required: Vec<String>,
    /// Discriminator property name.
    pub discriminator: Option<String>,
}

/// A primitive schema.
#[derive(Debug, Clone, PartialEq)]
pub struct PrimitiveModel {
    /// Shared metadata.
    pub meta: ModelMeta,
    /// Kind.
    pub kind: PrimitiveKind,
    /// Format modifier.
    pub format: Option<String>,
}

/// An array schema.
#[derive(Debug, Clone, PartialEq)]
pub struct ArrayModel {
    /// Shared metadata.
    pub meta: ModelMeta,
    /// Item model; `None` when `items` is absent.
    pub items: Option<Box<Model>>,
}

/// An `allOf` schema.
#[derive(Debug, Clone, PartialEq)]
pub struct ComposedModel {
    /// Shared metadata.
    pub meta: ModelMeta,
    /// Branches, in order.
    pub branches: Vec<Model>,
}

/// A `$ref` schema.
#[derive(Debug, Clone, PartialEq)]
pub struct ReferenceModel {
    /// Shared metadata.
    pub meta: ModelMeta,
    /// Definition name the reference designates.
    pub name: String,
    /// The raw `$ref` string.
    pub reference: String,
}

/// An enumeration.
#[derive(Debug, Clone, PartialEq)]
pub struct EnumModel {
    /// Shared metadata.
    pub meta: ModelMeta,
    /// Declared kind of the values.
    pub kind: PrimitiveKind,
    /// Allowed values, in source order.
    pub values: Vec<Value>,
}

/// A string-keyed map.
#[derive(Debug, Clone, PartialEq)]
pub struct MapModel {
    /// Shared metadata.
    pub meta: ModelMeta,
    /// Value model.
    pub value: Box<Model>,
}

/// An object with declared properties.
#[derive(Debug, Clone, PartialEq)]
pub struct ObjectModel {
    /// Shared metadata.
    pub meta: ModelMeta,
    /// Properties, in declaration order.
    pub properties: IndexMap<String, SchemaNode>,
}

/// A classified schema.
#[derive(Debug, Clone, PartialEq)]
pub enum Model {
    /// Primitive.
    Primitive(PrimitiveModel),
    /// Array.
    Array(ArrayModel),
    /// `allOf`.
    Composed(ComposedModel),
    /// `$ref`.
    Reference(ReferenceModel),
    /// Enumeration.
    Enum(EnumModel),
    /// Map.
    Map(MapModel),
    /// Object.
    Object(ObjectModel),
    /// No structural information.
    Untyped(ModelMeta),
}

impl Model {
    /// Shared metadata.
    pub fn meta(&self) -> &ModelMeta {
        match self {
            Model::Primitive(m) => &m.meta,
            Model::Array(m) => &m.meta,
            Model::Composed(m) => &m.meta,
            Model::Reference(m) => &m.meta,
            Model::Enum(m) => &m.meta,
            Model::Map(m) => &m.meta,
            Model::Object(m) => &m.meta,
            Model::Untyped(meta) => meta,
        }
    }

    /// Display title.
    pub fn title(&self) -> Option<&str> {
        self.meta().title.as_deref()
    }
}
