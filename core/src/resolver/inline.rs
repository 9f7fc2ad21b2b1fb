#![deny(missing_docs)]

//! # Inline Schema Extraction
//!
//! Replaces anonymous object types by references to named inline definitions
//! so renderers can document them in their own table.

use crate::types::{ObjectType, RefType, Type};

/// A resolution result together with the inline definitions it hoisted.
#[derive(Debug, Clone, PartialEq)]
pub struct Resolved<T> {
    /// The resolved value.
    pub value: T,
    /// Hoisted inline definitions, in discovery order.
    pub inline_definitions: Vec<ObjectType>,
}

impl<T> Resolved<T> {
    /// A value that hoisted nothing.
    pub fn plain(value: T) -> Self {
        Self {
            value,
            inline_definitions: Vec::new(),
        }
    }

    /// Maps the value, keeping the hoisted definitions.
    pub fn map<U>(self, f: impl FnOnce(T) -> U) -> Resolved<U> {
        Resolved {
            value: f(self.value),
            inline_definitions: self.inline_definitions,
        }
    }
}

/// Hoists `ty` under `name` / `unique_name`.
///
/// - an object with at least one property is named (if anonymous), recorded
///   and replaced by a same-document `RefType`
/// - arrays recurse into their element type
/// - maps recurse into an object value type
/// - anything else is returned unchanged
pub fn hoist_inline_type(ty: Type, name: &str, unique_name: &str) -> Resolved<Type> {
    let mut hoisted = Vec::new();
    let value = hoist_into(ty, name, unique_name, &mut hoisted);
    Resolved {
        value,
        inline_definitions: hoisted,
    }
}

fn hoist_into(ty: Type, name: &str, unique_name: &str, hoisted: &mut Vec<ObjectType>) -> Type {
    match ty {
        Type::Object(mut object) if !object.properties.is_empty() => {
            if object.name.is_none() {
                object.name = Some(name.to_string());
                object.unique_name = Some(unique_name.to_string());
            }
            log::debug!(
                "Hoisting inline object '{}'",
                object.unique_name().unwrap_or(name)
            );
            hoisted.push(object.clone());
            Type::Ref(RefType::new(None, Type::Object(object)))
        }
        Type::Array(mut array) => {
            let element = *array.element;
            array.element = Box::new(hoist_into(element, name, unique_name, hoisted));
            Type::Array(array)
        }
        Type::Map(mut map) if matches!(map.value.as_ref(), Type::Object(_)) => {
            let value = *map.value;
            map.value = Box::new(hoist_into(value, name, unique_name, hoisted));
            Type::Map(map)
        }
        other => other,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::oas::node::SchemaNode;
    use crate::types::{ArrayType, MapType, PrimitiveKind};

    fn anonymous_object() -> ObjectType {
        let mut object = ObjectType::default();
        object
            .properties
            .insert("street".into(), SchemaNode::default());
        object
    }

    #[test]
    fn test_anonymous_object_is_hoisted() {
        let result = hoist_inline_type(Type::Object(anonymous_object()), "address", "Order address");

        assert_eq!(result.inline_definitions.len(), 1);
        let hoisted = &result.inline_definitions[0];
        assert_eq!(hoisted.name.as_deref(), Some("address"));
        assert_eq!(hoisted.unique_name(), Some("Order address"));

        let Type::Ref(r) = &result.value else {
            panic!("expected a reference")
        };
        assert_eq!(r.link_target, None);
        assert_eq!(result.value.unique_name(), Some("Order address"));
    }

    #[test]
    fn test_named_object_keeps_name_but_is_recorded() {
        let mut object = anonymous_object();
        object.name = Some("Address".into());
        let result = hoist_inline_type(Type::Object(object), "address", "Order address");
        assert_eq!(result.inline_definitions[0].name.as_deref(), Some("Address"));
        assert_eq!(result.value.name(), Some("Address"));
    }

    #[test]
    fn test_empty_object_and_primitives_pass_through() {
        let empty = hoist_inline_type(Type::Object(ObjectType::default()), "a", "b");
        assert!(empty.inline_definitions.is_empty());
        assert!(matches!(empty.value, Type::Object(_)));

        let basic = hoist_inline_type(Type::basic(PrimitiveKind::String, None), "a", "b");
        assert!(basic.inline_definitions.is_empty());
    }

    #[test]
    fn test_array_and_map_recurse() {
        let array = Type::Array(ArrayType {
            name: None,
            unique_name: None,
            element: Box::new(Type::Object(anonymous_object())),
            collection_format: None,
        });
        let result = hoist_inline_type(array, "items", "List items");
        assert_eq!(result.inline_definitions.len(), 1);
        assert_eq!(result.value.schema_label(), "< items > array");

        let map = Type::Map(MapType {
            name: None,
            unique_name: None,
            value: Box::new(Type::Object(anonymous_object())),
        });
        let result = hoist_inline_type(map, "entry", "Index entry");
        assert_eq!(result.inline_definitions.len(), 1);
        assert_eq!(result.value.schema_label(), "< string, entry > map");
    }
}
