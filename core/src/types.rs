#![deny(missing_docs)]

//! # Type Model
//!
//! The resolved, renderer-facing shape of a schema.
//!
//! Every variant carries a display `name` (absent for anonymous types) and a
//! `unique_name` identity key that defaults to the name. References and
//! hoisted inline types override the unique name.

use crate::oas::node::SchemaNode;
use indexmap::IndexMap;
use std::fmt;

/// Primitive kinds of a [`BasicType`].
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum PrimitiveKind {
    /// `string`
    String,
    /// `integer`
    Integer,
    /// `number`
    Number,
    /// `boolean`
    Boolean,
    /// `object` declared without properties.
    Object,
    /// `file` (Swagger 2.0 form uploads).
    File,
    /// `null`
    Null,
    /// No structural information at all.
    Untyped,
    /// Any other declared type name, kept verbatim.
    Other(String),
}

impl PrimitiveKind {
    /// Maps a declared `type` value to a kind.
    pub fn from_type_name(name: &str) -> Self {
        match name {
            "string" => PrimitiveKind::String,
            "integer" => PrimitiveKind::Integer,
            "number" => PrimitiveKind::Number,
            "boolean" => PrimitiveKind::Boolean,
            "object" => PrimitiveKind::Object,
            "file" => PrimitiveKind::File,
            "null" => PrimitiveKind::Null,
            other => PrimitiveKind::Other(other.to_string()),
        }
    }

    /// The kind as written in a document (`untyped` for the sentinel).
    pub fn as_str(&self) -> &str {
        match self {
            PrimitiveKind::String => "string",
            PrimitiveKind::Integer => "integer",
            PrimitiveKind::Number => "number",
            PrimitiveKind::Boolean => "boolean",
            PrimitiveKind::Object => "object",
            PrimitiveKind::File => "file",
            PrimitiveKind::Null => "null",
            PrimitiveKind::Untyped => "untyped",
            PrimitiveKind::Other(name) => name,
        }
    }
}

impl fmt::Display for PrimitiveKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// How an array parameter is serialized.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CollectionFormat {
    /// Comma separated.
    Csv,
    /// Space separated.
    Space,
    /// Tab separated.
    Tsv,
    /// Pipe separated.
    Pipe,
    /// Repeated `key=value` pairs.
    Multi,
}

impl CollectionFormat {
    /// Derives the format from OAS 3 `style`/`explode`.
    ///
    /// `explode` defaults to true for `form` and false otherwise.
    pub fn from_style(style: &str, explode: Option<bool>) -> Option<Self> {
        match style {
            "form" if explode.unwrap_or(true) => Some(CollectionFormat::Multi),
            "form" | "simple" => Some(CollectionFormat::Csv),
            "pipeDelimited" => Some(CollectionFormat::Pipe),
            "spaceDelimited" => Some(CollectionFormat::Space),
            _ => None,
        }
    }

    /// Parses a Swagger 2.0 `collectionFormat`.
    pub fn from_swagger2(format: &str) -> Option<Self> {
        match format {
            "csv" => Some(CollectionFormat::Csv),
            "ssv" => Some(CollectionFormat::Space),
            "tsv" => Some(CollectionFormat::Tsv),
            "pipes" => Some(CollectionFormat::Pipe),
            "multi" => Some(CollectionFormat::Multi),
            _ => None,
        }
    }

    /// Display label.
    pub fn as_str(&self) -> &'static str {
        match self {
            CollectionFormat::Csv => "csv",
            CollectionFormat::Space => "space",
            CollectionFormat::Tsv => "tsv",
            CollectionFormat::Pipe => "pipe",
            CollectionFormat::Multi => "multi",
        }
    }
}

/// Polymorphism nature of an object type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Nature {
    /// Plain object.
    #[default]
    None,
    /// Built from several `allOf` branches.
    Composition,
    /// A composed branch declares a discriminator.
    Inheritance,
}

/// Polymorphism of an object type.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Polymorphism {
    /// The nature.
    pub nature: Nature,
    /// Discriminator property name, if any.
    pub discriminator: Option<String>,
}

impl Polymorphism {
    /// `NONE`, optionally recording a directly declared discriminator.
    pub fn none(discriminator: Option<String>) -> Self {
        Self {
            nature: Nature::None,
            discriminator,
        }
    }
}

/// A primitive.
#[derive(Debug, Clone, PartialEq)]
pub struct BasicType {
    /// Display name.
    pub name: Option<String>,
    /// Identity override.
    pub unique_name: Option<String>,
    /// Primitive kind.
    pub kind: PrimitiveKind,
    /// `format` modifier.
    pub format: Option<String>,
}

/// An array.
#[derive(Debug, Clone, PartialEq)]
pub struct ArrayType {
    /// Display name.
    pub name: Option<String>,
    /// Identity override.
    pub unique_name: Option<String>,
    /// Element type.
    pub element: Box<Type>,
    /// Parameter serialization.
    pub collection_format: Option<CollectionFormat>,
}

/// A string-keyed map.
#[derive(Debug, Clone, PartialEq)]
pub struct MapType {
    /// Display name.
    pub name: Option<String>,
    /// Identity override.
    pub unique_name: Option<String>,
    /// Value type.
    pub value: Box<Type>,
}

/// An enumeration. Values are stringified, in source order.
#[derive(Debug, Clone, PartialEq)]
pub struct EnumType {
    /// Display name.
    pub name: Option<String>,
    /// Identity override.
    pub unique_name: Option<String>,
    /// Declared kind of the values, used to read a label back as a value.
    pub kind: PrimitiveKind,
    /// Allowed values.
    pub values: Vec<String>,
}

/// An object with named properties.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct ObjectType {
    /// Display name.
    pub name: Option<String>,
    /// Identity override.
    pub unique_name: Option<String>,
    /// Properties in declaration (or merge) order.
    pub properties: IndexMap<String, SchemaNode>,
    /// Polymorphism.
    pub polymorphism: Polymorphism,
}

impl ObjectType {
    /// A named object without properties.
    pub fn named(name: impl Into<String>) -> Self {
        let name = name.into();
        Self {
            name: Some(name.clone()),
            unique_name: Some(name),
            ..Default::default()
        }
    }

    /// Identity key: the unique name, else the name.
    pub fn unique_name(&self) -> Option<&str> {
        self.unique_name.as_deref().or(self.name.as_deref())
    }
}

/// A link to another type.
#[derive(Debug, Clone, PartialEq)]
pub struct RefType {
    /// Display name (the reference name).
    pub name: Option<String>,
    /// Identity override.
    pub unique_name: Option<String>,
    /// Document holding the target; `None` means the current document.
    pub link_target: Option<String>,
    /// The referenced type.
    pub target: Box<Type>,
}

impl RefType {
    /// Wraps `target`, taking over its names.
    pub fn new(link_target: Option<String>, target: Type) -> Self {
        Self {
            name: target.name().map(str::to_string),
            unique_name: target.unique_name().map(str::to_string),
            link_target,
            target: Box::new(target),
        }
    }
}

/// A resolved type.
#[derive(Debug, Clone, PartialEq)]
pub enum Type {
    /// Primitive.
    Basic(BasicType),
    /// Array.
    Array(ArrayType),
    /// Map.
    Map(MapType),
    /// Enumeration.
    Enum(EnumType),
    /// Object.
    Object(ObjectType),
    /// Reference.
    Ref(RefType),
}

impl Type {
    /// A nameless primitive.
    pub fn basic(kind: PrimitiveKind, format: Option<String>) -> Self {
        Type::Basic(BasicType {
            name: None,
            unique_name: None,
            kind,
            format,
        })
    }

    /// Display name.
    pub fn name(&self) -> Option<&str> {
        match self {
            Type::Basic(t) => t.name.as_deref(),
            Type::Array(t) => t.name.as_deref(),
            Type::Map(t) => t.name.as_deref(),
            Type::Enum(t) => t.name.as_deref(),
            Type::Object(t) => t.name.as_deref(),
            Type::Ref(t) => t.name.as_deref(),
        }
    }

    /// Identity key: the unique name, else the name.
    pub fn unique_name(&self) -> Option<&str> {
        let unique = match self {
            Type::Basic(t) => t.unique_name.as_deref(),
            Type::Array(t) => t.unique_name.as_deref(),
            Type::Map(t) => t.unique_name.as_deref(),
            Type::Enum(t) => t.unique_name.as_deref(),
            Type::Object(t) => t.unique_name.as_deref(),
            Type::Ref(t) => t.unique_name.as_deref(),
        };
        unique.or_else(|| self.name())
    }

    /// Sets the display name.
    pub fn set_name(&mut self, name: Option<String>) {
        match self {
            Type::Basic(t) => t.name = name,
            Type::Array(t) => t.name = name,
            Type::Map(t) => t.name = name,
            Type::Enum(t) => t.name = name,
            Type::Object(t) => t.name = name,
            Type::Ref(t) => t.name = name,
        }
    }

    /// Sets the identity key.
    pub fn set_unique_name(&mut self, unique_name: Option<String>) {
        match self {
            Type::Basic(t) => t.unique_name = unique_name,
            Type::Array(t) => t.unique_name = unique_name,
            Type::Map(t) => t.unique_name = unique_name,
            Type::Enum(t) => t.unique_name = unique_name,
            Type::Object(t) => t.unique_name = unique_name,
            Type::Ref(t) => t.unique_name = unique_name,
        }
    }

    /// Follows `Ref` wrappers down to the concrete shape.
    pub fn resolve_ref(&self) -> &Type {
        let mut current = self;
        while let Type::Ref(r) = current {
            current = &r.target;
        }
        current
    }

    /// Owned variant of [`Type::resolve_ref`].
    pub fn into_resolved(self) -> Type {
        let mut current = self;
        while let Type::Ref(r) = current {
            current = *r.target;
        }
        current
    }

    /// The concrete object behind any `Ref` wrappers.
    pub fn as_object(&self) -> Option<&ObjectType> {
        match self.resolve_ref() {
            Type::Object(o) => Some(o),
            _ => None,
        }
    }

    /// Renderer-agnostic schema label, e.g. `< Pet > array (csv)`.
    pub fn schema_label(&self) -> String {
        match self {
            Type::Basic(t) => match &t.format {
                Some(format) => format!("{} ({})", t.kind, format),
                None => t.kind.to_string(),
            },
            Type::Array(t) => {
                let mut label = format!("< {} > array", t.element.schema_label());
                if let Some(cf) = t.collection_format {
                    label.push_str(&format!(" ({})", cf.as_str()));
                }
                label
            }
            Type::Map(t) => format!("< string, {} > map", t.value.schema_label()),
            Type::Enum(t) => format!("enum ({})", t.values.join(", ")),
            Type::Object(_) => "object".to_string(),
            Type::Ref(t) => t
                .name
                .clone()
                .unwrap_or_else(|| t.target.schema_label()),
        }
    }
}

impl From<ObjectType> for Type {
    fn from(value: ObjectType) -> Self {
        Type::Object(value)
    }
}
