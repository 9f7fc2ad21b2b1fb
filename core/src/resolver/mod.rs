#![deny(missing_docs)]

//! # Type Resolver
//!
//! Turns normalized [`Model`]s into renderer-facing [`Type`] trees.
//!
//! - **composition**: `allOf` polymorphism classification and required-flag
//!   reconciliation.
//! - **inline**: hoisting of anonymous object types into named definitions.
//! - **params**: parameter, response and definition typing.
//! - **properties**: property rows of an object type.
//!
//! Reference targets are expanded at most once per resolution chain; a
//! reference that re-enters a definition already being expanded becomes a
//! `RefType` around a named stub object.

pub mod composition;
pub mod inline;
pub mod params;
pub mod properties;

use crate::model::{normalize, Model};
use crate::oas::definitions::DefinitionTable;
use crate::oas::node::SchemaNode;
use crate::types::{
    ArrayType, BasicType, EnumType, MapType, ObjectType, Polymorphism, PrimitiveKind, RefType,
    Type,
};
use crate::xref::DocumentResolver;
use serde_json::Value;

pub use composition::{distribute_required, PropertyRequirement};
pub use inline::{hoist_inline_type, Resolved};
pub use properties::PropertyRow;

/// Resolves models against a definition table.
#[derive(Clone, Copy)]
pub struct TypeResolver<'a> {
    definitions: &'a DefinitionTable,
    links: &'a dyn DocumentResolver,
}

impl<'a> TypeResolver<'a> {
    /// Creates a resolver. `links` maps definition names to link targets.
    pub fn new(definitions: &'a DefinitionTable, links: &'a dyn DocumentResolver) -> Self {
        Self { definitions, links }
    }

    /// The definition table.
    pub fn definitions(&self) -> &'a DefinitionTable {
        self.definitions
    }

    /// Resolves a normalized model.
    pub fn resolve(&self, model: &Model) -> Type {
        self.resolve_in(model, &mut Vec::new())
    }

    /// Normalizes and resolves a raw node.
    pub fn resolve_schema(&self, node: &SchemaNode) -> Type {
        self.resolve(&normalize(node, self.definitions))
    }

    /// Resolves a reference to the named definition.
    pub fn resolve_reference(&self, name: &str) -> Type {
        self.reference_type(name, &mut Vec::new())
    }

    /// `chain` holds the definitions currently being expanded.
    pub(crate) fn resolve_in(&self, model: &Model, chain: &mut Vec<String>) -> Type {
        match model {
            Model::Primitive(p) => Type::Basic(BasicType {
                name: p.meta.title.clone(),
                unique_name: None,
                kind: p.kind.clone(),
                format: p.format.clone(),
            }),
            Model::Untyped(meta) => Type::Basic(BasicType {
                name: meta.title.clone(),
                unique_name: None,
                kind: PrimitiveKind::Untyped,
                format: None,
            }),
            Model::Enum(e) => Type::Enum(EnumType {
                name: e.meta.title.clone(),
                unique_name: None,
                kind: e.kind.clone(),
                values: e.values.iter().map(enum_value_label).collect(),
            }),
            Model::Array(a) => Type::Array(ArrayType {
                name: a.meta.title.clone(),
                unique_name: None,
                element: Box::new(match a.items.as_deref() {
                    Some(items) => self.resolve_in(items, chain),
                    None => Type::Object(ObjectType::default()),
                }),
                collection_format: None,
            }),
            Model::Map(m) => Type::Map(MapType {
                name: m.meta.title.clone(),
                unique_name: None,
                value: Box::new(self.resolve_in(&m.value, chain)),
            }),
            Model::Object(o) => Type::Object(ObjectType {
                name: o.meta.title.clone(),
                unique_name: None,
                properties: o.properties.clone(),
                polymorphism: Polymorphism::none(o.meta.discriminator.clone()),
            }),
            Model::Composed(c) => Type::Object(self.compose(c, chain)),
            Model::Reference(r) => self.reference_type(&r.name, chain),
        }
    }

    fn reference_type(&self, name: &str, chain: &mut Vec<String>) -> Type {
        let link = self.links.resolve(name);

        let Some(node) = self.definitions.get(name) else {
            log::warn!("Unresolved reference to definition '{}'", name);
            return Type::Ref(RefType::new(link, ObjectType::named(name).into()));
        };

        if chain.iter().any(|n| n == name) {
            log::debug!("Definition '{}' re-entered while expanding, using a stub", name);
            return Type::Ref(RefType::new(link, ObjectType::named(name).into()));
        }

        chain.push(name.to_string());
        let mut inner = self.resolve_in(&normalize(node, self.definitions), chain);
        chain.pop();

        inner.set_name(Some(name.to_string()));
        inner.set_unique_name(Some(name.to_string()));
        Type::Ref(RefType::new(link, inner))
    }
}

/// Stringifies an enum value: strings verbatim, everything else as JSON.
fn enum_value_label(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}
