#![deny(missing_docs)]

//! # Definition Table
//!
//! Named schema lookup used by every reference resolution in the crate.

use crate::oas::node::SchemaNode;
use crate::oas::ref_utils::definition_name;
use indexmap::IndexMap;
use std::collections::HashSet;

/// Definition name -> schema node, in document order.
///
/// Lookups are case-sensitive and exact.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DefinitionTable {
    schemas: IndexMap<String, SchemaNode>,
    self_uri: Option<String>,
}

impl DefinitionTable {
    /// Creates an empty table.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the document's `$self` URI used to localize absolute references.
    pub fn with_self_uri(mut self, self_uri: impl Into<String>) -> Self {
        self.self_uri = Some(self_uri.into());
        self
    }

    /// The document's `$self` URI, if declared.
    pub fn self_uri(&self) -> Option<&str> {
        self.self_uri.as_deref()
    }

    /// Adds or replaces a definition.
    pub fn insert(&mut self, name: impl Into<String>, schema: SchemaNode) {
        self.schemas.insert(name.into(), schema);
    }

    /// Looks a definition up by exact name.
    pub fn get(&self, name: &str) -> Option<&SchemaNode> {
        self.schemas.get(name)
    }

    /// True if a definition with this exact name exists.
    pub fn contains(&self, name: &str) -> bool {
        self.schemas.contains_key(name)
    }

    /// Definition names, in document order.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.schemas.keys().map(String::as_str)
    }

    /// Iterates `(name, schema)` pairs in document order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &SchemaNode)> {
        self.schemas.iter().map(|(k, v)| (k.as_str(), v))
    }

    /// Number of definitions.
    pub fn len(&self) -> usize {
        self.schemas.len()
    }

    /// True if there are no definitions.
    pub fn is_empty(&self) -> bool {
        self.schemas.is_empty()
    }

    /// The definition name a `$ref` string designates.
    pub fn reference_name(&self, reference: &str) -> String {
        definition_name(reference, self.self_uri())
    }

    /// Follows a `$ref` to its target schema.
    pub fn lookup_reference(&self, reference: &str) -> Option<&SchemaNode> {
        self.get(&self.reference_name(reference))
    }

    /// The `required` list of `node` extended with those of its `allOf`
    /// branches, following references once each.
    pub fn required_properties(&self, node: &SchemaNode) -> Vec<String> {
        self.collect_required(node, &mut HashSet::new())
    }

    fn collect_required(&self, node: &SchemaNode, visited: &mut HashSet<String>) -> Vec<String> {
        let mut required = node.required.clone();
        for branch in node.all_of.iter().flatten() {
            let target = match &branch.reference {
                Some(reference) => {
                    let name = self.reference_name(reference);
                    if !visited.insert(name.clone()) {
                        continue;
                    }
                    match self.get(&name) {
                        Some(target) => target,
                        None => continue,
                    }
                }
                None => branch,
            };
            for name in self.collect_required(target, visited) {
                if !required.contains(&name) {
                    required.push(name);
                }
            }
        }
        required
    }
}

impl FromIterator<(String, SchemaNode)> for DefinitionTable {
    fn from_iter<I: IntoIterator<Item = (String, SchemaNode)>>(iter: I) -> Self {
        Self {
            schemas: iter.into_iter().collect(),
            self_uri: None,
        }
    }
}
