#![deny(missing_docs)]

//! # Polymorphism Classification
//!
//! Merges `allOf` branches into one [`ObjectType`] and decides its
//! [`Nature`]:
//!
//! - `INHERITANCE` when any object branch declares a discriminator
//! - `COMPOSITION` once a second object branch has been merged
//! - `NONE` otherwise
//!
//! Properties are merged in branch order; on a name collision the later
//! branch's schema wins while the key keeps its first position.

use crate::model::ComposedModel;
use crate::oas::node::SchemaNode;
use crate::resolver::TypeResolver;
use crate::types::{Nature, ObjectType, Polymorphism, Type};
use indexmap::IndexMap;

impl TypeResolver<'_> {
    pub(crate) fn compose(&self, model: &ComposedModel, chain: &mut Vec<String>) -> ObjectType {
        let mut name = model.meta.title.clone();
        let mut properties: IndexMap<String, SchemaNode> = IndexMap::new();
        let mut branch_discriminator: Option<String> = None;
        let mut merged = 0usize;

        for branch in &model.branches {
            let resolved = self.resolve_in(branch, chain).into_resolved();
            if let Some(branch_name) = resolved.name() {
                name = Some(branch_name.to_string());
            }

            let Type::Object(object) = resolved else {
                log::debug!("Skipping non-object allOf branch");
                continue;
            };
            merged += 1;
            if let Some(discriminator) = object.polymorphism.discriminator {
                branch_discriminator = Some(discriminator);
            }
            for (key, schema) in object.properties {
                properties.insert(key, schema);
            }
        }

        let polymorphism = match branch_discriminator {
            Some(discriminator) => Polymorphism {
                nature: Nature::Inheritance,
                discriminator: Some(discriminator),
            },
            None if merged >= 2 => Polymorphism {
                nature: Nature::Composition,
                discriminator: model.meta.discriminator.clone(),
            },
            None => Polymorphism::none(model.meta.discriminator.clone()),
        };

        ObjectType {
            name,
            unique_name: None,
            properties,
            polymorphism,
        }
    }
}

/// A property with its reconciled required flag.
#[derive(Debug, Clone, PartialEq)]
pub struct PropertyRequirement {
    /// Property name.
    pub name: String,
    /// Property schema; its own `required` list is cleared when the parent
    /// lists the property.
    pub schema: SchemaNode,
    /// Listed in the parent's `required` list.
    pub required: bool,
}

/// Flags each property of `object` with membership in `required` (the owning
/// schema's list). A flagged property loses its own nested `required` list so
/// a renderer never shows a second required marker for it.
pub fn distribute_required(object: &ObjectType, required: &[String]) -> Vec<PropertyRequirement> {
    object
        .properties
        .iter()
        .map(|(name, schema)| {
            let is_required = required.iter().any(|r| r == name);
            let mut schema = schema.clone();
            if is_required {
                schema.required.clear();
            }
            PropertyRequirement {
                name: name.clone(),
                schema,
                required: is_required,
            }
        })
        .collect()
}
