#![deny(missing_docs)]

//! # Example Generation
//!
//! Synthesizes JSON examples from schemas and resolved types.
//!
//! Authored examples always win. Generated examples are built structurally:
//! primitives from a format table, arrays with one element, maps with a single
//! `"string"` key, objects property by property.
//!
//! Cyclic schemas are handled with a per-reference visit counter ([`RefStack`])
//! copied into every child call. Once a reference has been entered more often
//! than the [`RecursionLimit`] allows, the sentinel `"..."` is emitted instead.
//!
//! - **primitives**: placeholder values per type/format.
//! - **request**: request and response example maps of an operation.

pub mod primitives;
pub mod request;

use crate::config::ConversionConfig;
use crate::oas::definitions::DefinitionTable;
use crate::oas::node::SchemaNode;
use crate::resolver::TypeResolver;
use crate::types::{PrimitiveKind, Type};
use crate::xref::SameDocument;
use indexmap::IndexMap;
use serde_json::{Map, Value};
use std::collections::HashMap;
use std::num::NonZeroU8;

use primitives::{convert_example, primitive_example, string_example, UNTYPED_EXAMPLE};

/// Emitted in place of a reference expanded too often.
pub const TRUNCATION_SENTINEL: &str = "...";

/// Key used for the single entry of a generated map example.
pub const MAP_EXAMPLE_KEY: &str = "string";

const DEFAULT_LIMIT: NonZeroU8 = match NonZeroU8::new(2) {
    Some(limit) => limit,
    None => panic!("recursion limit must be non-zero"),
};

/// How often one reference may be expanded within a single generation call.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RecursionLimit(NonZeroU8);

impl RecursionLimit {
    /// Replaces the default bound of 2.
    pub fn explicit_override(limit: NonZeroU8) -> Self {
        Self(limit)
    }

    /// The bound.
    pub fn get(&self) -> u8 {
        self.0.get()
    }
}

impl Default for RecursionLimit {
    fn default() -> Self {
        Self(DEFAULT_LIMIT)
    }
}

/// Per-reference visit counts of one generation call.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RefStack {
    visits: HashMap<String, u8>,
}

impl RefStack {
    /// An empty stack.
    pub fn new() -> Self {
        Self::default()
    }

    /// How often `name` has been entered on this path.
    pub fn visits(&self, name: &str) -> u8 {
        self.visits.get(name).copied().unwrap_or(0)
    }

    /// The stack for a child call entering `name`, or `None` once `limit`
    /// is exceeded. `self` is left untouched so siblings are not penalized.
    pub fn enter(&self, name: &str, limit: RecursionLimit) -> Option<RefStack> {
        let count = self.visits(name).saturating_add(1);
        if count > limit.get() {
            return None;
        }
        let mut child = self.clone();
        child.visits.insert(name.to_string(), count);
        Some(child)
    }
}

/// Switches of the generator.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ExampleOptions {
    /// Generate examples where none is authored.
    pub generate_missing: bool,
    /// Keep properties missing from `required` in object examples.
    pub include_optional_properties: bool,
    /// Append optional query parameters to request paths.
    pub include_optional_query_parameters: bool,
    /// Reference expansion bound.
    pub recursion_limit: RecursionLimit,
}

impl Default for ExampleOptions {
    fn default() -> Self {
        Self {
            generate_missing: false,
            include_optional_properties: true,
            include_optional_query_parameters: false,
            recursion_limit: RecursionLimit::default(),
        }
    }
}

impl From<&ConversionConfig> for ExampleOptions {
    fn from(config: &ConversionConfig) -> Self {
        Self {
            generate_missing: config.generated_examples_enabled,
            include_optional_properties: config.generated_optional_property_example_enabled,
            include_optional_query_parameters: config
                .generated_optional_query_parameter_example_enabled,
            recursion_limit: RecursionLimit::default(),
        }
    }
}

/// Generates examples against a definition table.
#[derive(Debug, Clone, Copy)]
pub struct ExampleGenerator<'a> {
    definitions: &'a DefinitionTable,
    options: ExampleOptions,
}

impl<'a> ExampleGenerator<'a> {
    /// Creates a generator.
    pub fn new(definitions: &'a DefinitionTable, options: ExampleOptions) -> Self {
        Self {
            definitions,
            options,
        }
    }

    /// Creates a generator configured from `config`.
    pub fn from_config(definitions: &'a DefinitionTable, config: &ConversionConfig) -> Self {
        Self::new(definitions, ExampleOptions::from(config))
    }

    /// Active options.
    pub fn options(&self) -> &ExampleOptions {
        &self.options
    }

    /// The authored example of `node`, or of the definition it references.
    pub fn authored_example(&self, node: &SchemaNode) -> Option<Value> {
        if let Some(example) = &node.example {
            return Some(example.clone());
        }
        node.reference
            .as_deref()
            .and_then(|r| self.definitions.lookup_reference(r))
            .and_then(|target| target.example.clone())
    }

    /// The authored example, else a generated one when generation is enabled.
    pub fn schema_example(&self, node: &SchemaNode) -> Option<Value> {
        if let Some(example) = self.authored_example(node) {
            return Some(example);
        }
        if self.options.generate_missing {
            return Some(self.generate_schema_example(node));
        }
        None
    }

    /// A generated example, regardless of the generation switch.
    pub fn generate_schema_example(&self, node: &SchemaNode) -> Value {
        self.node_example(node, &RefStack::new())
    }

    /// Example of a named definition: authored, else generated when enabled.
    /// `None` for unknown names.
    pub fn definition_example(&self, name: &str) -> Option<Value> {
        let target = self.definitions.get(name)?;
        if let Some(example) = &target.example {
            return Some(example.clone());
        }
        if !self.options.generate_missing {
            return None;
        }
        Some(self.reference_example(name, &RefStack::new()))
    }

    /// A generated example for a resolved type.
    pub fn type_example(&self, ty: &Type) -> Value {
        self.type_example_in(ty, &RefStack::new())
    }

    pub(crate) fn node_example(&self, node: &SchemaNode, stack: &RefStack) -> Value {
        if let Some(example) = &node.example {
            return example.clone();
        }

        if node.all_of.is_some() {
            return self.composed_example(node, stack);
        }

        if let Some(reference) = &node.reference {
            let name = self.definitions.reference_name(reference);
            return self.reference_example(&name, stack);
        }

        if node.is_array() {
            let item = match node.items.as_deref() {
                Some(items) => self.node_example(items, stack),
                None => Value::Object(Map::new()),
            };
            return Value::Array(vec![item]);
        }

        if node.is_map() {
            if let Some(value) = node.additional_schema() {
                return map_example(self.node_example(value, stack));
            }
        }

        if let Some(first) = node.enum_values.as_ref().and_then(|v| v.first()) {
            return first.clone();
        }

        if let Some(properties) = &node.properties {
            return self.object_example(properties, &node.required, stack);
        }

        if let Some(default) = &node.default {
            return default.clone();
        }
        primitive_example(node.kind(), node.format.as_deref())
    }

    fn reference_example(&self, name: &str, stack: &RefStack) -> Value {
        let Some(target) = self.definitions.get(name) else {
            log::warn!("Example for unresolved reference '{}'", name);
            return Value::String(name.to_string());
        };
        if let Some(example) = &target.example {
            return example.clone();
        }
        match stack.enter(name, self.options.recursion_limit) {
            Some(child) => self.node_example(target, &child),
            None => {
                log::debug!("Recursion bound reached for '{}'", name);
                Value::String(TRUNCATION_SENTINEL.to_string())
            }
        }
    }

    fn composed_example(&self, node: &SchemaNode, stack: &RefStack) -> Value {
        let resolver = TypeResolver::new(self.definitions, &SameDocument);
        let merged = resolver.resolve_schema(node);
        let properties = merged
            .as_object()
            .map(|o| o.properties.clone())
            .unwrap_or_default();
        let required = self.definitions.required_properties(node);
        self.object_example(&properties, &required, stack)
    }

    fn object_example(
        &self,
        properties: &IndexMap<String, SchemaNode>,
        required: &[String],
        stack: &RefStack,
    ) -> Value {
        let mut example = Map::new();
        for (name, schema) in properties {
            if !self.options.include_optional_properties && !required.contains(name) {
                continue;
            }
            example.insert(name.clone(), self.node_example(schema, stack));
        }
        Value::Object(example)
    }

    fn type_example_in(&self, ty: &Type, stack: &RefStack) -> Value {
        match ty {
            Type::Basic(basic) => match &basic.kind {
                PrimitiveKind::Untyped => Value::String(UNTYPED_EXAMPLE.to_string()),
                PrimitiveKind::String => {
                    Value::String(string_example(basic.format.as_deref()).to_string())
                }
                kind => primitive_example(Some(kind.as_str()), basic.format.as_deref()),
            },
            Type::Enum(e) => e
                .values
                .first()
                .map(|v| convert_example(v, Some(e.kind.as_str())))
                .unwrap_or(Value::Null),
            Type::Array(array) => Value::Array(vec![self.type_example_in(&array.element, stack)]),
            Type::Map(map) => map_example(self.type_example_in(&map.value, stack)),
            Type::Object(object) => {
                let required = object
                    .unique_name()
                    .and_then(|name| self.definitions.get(name))
                    .map(|definition| self.definitions.required_properties(definition))
                    .unwrap_or_default();
                self.object_example(&object.properties, &required, stack)
            }
            Type::Ref(reference) => match reference.unique_name.as_deref() {
                Some(name) if self.definitions.contains(name) => {
                    self.reference_example(name, stack)
                }
                _ => self.type_example_in(&reference.target, stack),
            },
        }
    }
}

fn map_example(value: Value) -> Value {
    let mut map = Map::new();
    map.insert(MAP_EXAMPLE_KEY.to_string(), value);
    Value::Object(map)
}
