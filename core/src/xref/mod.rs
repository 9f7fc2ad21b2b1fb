#![deny(missing_docs)]

//! # Cross-Reference Resolution
//!
//! Maps a definition name (or operation) to the output document holding it,
//! relative to the document currently being written.
//!
//! Every resolver returns `None` while inter-document cross references are
//! disabled or before the output path is known. `None` means "same document"
//! to a renderer.

pub mod naming;

use crate::config::ConversionContext;
use crate::oas::operation::PathOperation;
use naming::{definition_document_name, join_path, normalize_name, operation_document_name};

/// Maps a definition name to a link target.
pub trait DocumentResolver {
    /// The document holding `name`, or `None` for the current document.
    fn resolve(&self, name: &str) -> Option<String>;
}

impl<F> DocumentResolver for F
where
    F: Fn(&str) -> Option<String>,
{
    fn resolve(&self, name: &str) -> Option<String> {
        self(name)
    }
}

/// Resolver that never links out of the current document.
#[derive(Debug, Clone, Copy, Default)]
pub struct SameDocument;

impl DocumentResolver for SameDocument {
    fn resolve(&self, _name: &str) -> Option<String> {
        None
    }
}

/// Where the link is written from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CallSite {
    /// Overview or any document at the output root.
    #[default]
    Root,
    /// An operation document.
    Operation,
    /// A definition document.
    Definition,
}

/// Links to definitions.
#[derive(Debug, Clone, Copy)]
pub struct DefinitionDocumentResolver<'a> {
    context: &'a ConversionContext,
    site: CallSite,
}

impl<'a> DefinitionDocumentResolver<'a> {
    /// Resolver for links written from `site`.
    pub fn new(context: &'a ConversionContext, site: CallSite) -> Self {
        Self { context, site }
    }

    /// Links written from a root-level document.
    pub fn from_root(context: &'a ConversionContext) -> Self {
        Self::new(context, CallSite::Root)
    }

    /// Links written from an operation.
    pub fn from_operation(context: &'a ConversionContext) -> Self {
        Self::new(context, CallSite::Operation)
    }

    /// Links written from a definition.
    pub fn from_definition(context: &'a ConversionContext) -> Self {
        Self::new(context, CallSite::Definition)
    }

    fn root_target(&self, name: &str) -> String {
        let config = self.context.config();
        format!(
            "{}{}",
            config.cross_reference_prefix(),
            definition_document_name(config, name)
        )
    }
}

impl DocumentResolver for DefinitionDocumentResolver<'_> {
    fn resolve(&self, name: &str) -> Option<String> {
        let config = self.context.config();
        if !config.inter_document_cross_references_enabled || self.context.output_path().is_none()
        {
            return None;
        }

        match self.site {
            CallSite::Operation if config.separated_operations_enabled => {
                Some(join_path("..", &self.root_target(name)))
            }
            CallSite::Definition if config.separated_definitions_enabled => Some(format!(
                "{}{}",
                config.cross_reference_prefix(),
                config
                    .markup_language
                    .add_file_extension(&normalize_name(name))
            )),
            _ => Some(self.root_target(name)),
        }
    }
}

/// Links to security schemes.
#[derive(Debug, Clone, Copy)]
pub struct SecurityDocumentResolver<'a> {
    context: &'a ConversionContext,
}

impl<'a> SecurityDocumentResolver<'a> {
    /// Creates the resolver.
    pub fn new(context: &'a ConversionContext) -> Self {
        Self { context }
    }
}

impl DocumentResolver for SecurityDocumentResolver<'_> {
    fn resolve(&self, _name: &str) -> Option<String> {
        let config = self.context.config();
        if !config.inter_document_cross_references_enabled || self.context.output_path().is_none()
        {
            return None;
        }
        Some(format!(
            "{}{}",
            config.cross_reference_prefix(),
            config
                .markup_language
                .add_file_extension(&config.security_document)
        ))
    }
}

/// Links to operations, written from a root-level document.
#[derive(Debug, Clone, Copy)]
pub struct OperationDocumentResolver<'a> {
    context: &'a ConversionContext,
}

impl<'a> OperationDocumentResolver<'a> {
    /// Creates the resolver.
    pub fn new(context: &'a ConversionContext) -> Self {
        Self { context }
    }

    /// The document holding `operation`.
    pub fn resolve(&self, operation: &PathOperation) -> Option<String> {
        let config = self.context.config();
        if !config.inter_document_cross_references_enabled || self.context.output_path().is_none()
        {
            return None;
        }
        Some(format!(
            "{}{}",
            config.cross_reference_prefix(),
            operation_document_name(config, operation)
        ))
    }
}
