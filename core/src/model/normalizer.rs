#![deny(missing_docs)]

//! # Schema Normalizer
//!
//! Classifies a raw node into exactly one [`Model`] variant. Precedence, first
//! match wins:
//!
//! 1. `allOf` -> `Composed`
//! 2. `$ref` -> `Reference`
//! 3. kind `array` -> `Array`
//! 4. `additionalProperties` schema without `properties` -> `Map`
//! 5. `enum` -> `Enum`
//! 6. `properties` (even empty) -> `Object`
//! 7. declared kind -> `Primitive`, else `Untyped`
//!
//! References are not followed here, so normalization is a finite walk over
//! the node tree.

use crate::model::{
    ArrayModel, ComposedModel, EnumModel, MapModel, Model, ModelMeta, ObjectModel,
    PrimitiveModel, ReferenceModel,
};
use crate::oas::definitions::DefinitionTable;
use crate::oas::node::SchemaNode;
use crate::types::PrimitiveKind;

/// Classifies `node`. `definitions` is used only to reduce `$ref` strings to
/// definition names.
pub fn normalize(node: &SchemaNode, definitions: &DefinitionTable) -> Model {
    let meta = meta_of(node);

    if let Some(branches) = &node.all_of {
        return Model::Composed(ComposedModel {
            meta,
            branches: branches
                .iter()
                .map(|b| normalize(b, definitions))
                .collect(),
        });
    }

    if let Some(reference) = &node.reference {
        return Model::Reference(ReferenceModel {
            meta,
            name: definitions.reference_name(reference),
            reference: reference.clone(),
        });
    }

    if node.is_array() {
        return Model::Array(ArrayModel {
            meta,
            items: node
                .items
                .as_deref()
                .map(|items| Box::new(normalize(items, definitions))),
        });
    }

    if node.is_map() {
        if let Some(value) = node.additional_schema() {
            return Model::Map(MapModel {
                meta,
                value: Box::new(normalize(value, definitions)),
            });
        }
    }

    if let Some(values) = &node.enum_values {
        return Model::Enum(EnumModel {
            meta,
            kind: node
                .kind()
                .map(PrimitiveKind::from_type_name)
                .unwrap_or(PrimitiveKind::String),
            values: values.clone(),
        });
    }

    if let Some(properties) = &node.properties {
        return Model::Object(ObjectModel {
            meta,
            properties: properties.clone(),
        });
    }

    match node.kind() {
        Some(kind) => Model::Primitive(PrimitiveModel {
            meta,
            kind: PrimitiveKind::from_type_name(kind),
            format: node.format.clone(),
        }),
        None => Model::Untyped(meta),
    }
}

/// Classifies the named definition, if present.
pub fn normalize_definition(name: &str, definitions: &DefinitionTable) -> Option<Model> {
    definitions.get(name).map(|node| normalize(node, definitions))
}

fn meta_of(node: &SchemaNode) -> ModelMeta {
    ModelMeta {
        title: node.title.clone(),
        description: node.description.clone(),
        example: node.example.clone(),
        default: node.default.clone(),
        required: node.required.clone(),
        discriminator: node.discriminator_name().map(str::to_string),
    }
}
