#![deny(missing_docs)]

//! # Conversion Configuration
//!
//! Switches consumed by the type resolver, the example generator and the
//! cross-reference resolvers.
//!
//! All keys are optional in YAML and use camelCase, e.g.
//!
//! ```yaml
//! markupLanguage: markdown
//! separatedDefinitionsEnabled: true
//! interDocumentCrossReferencesEnabled: true
//! interDocumentCrossReferencesPrefix: "api_"
//! ```

use crate::error::{AppError, AppResult};
use serde::Deserialize;
use std::path::{Path, PathBuf};

/// Markup language of the rendered output. Only used to pick file extensions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MarkupLanguage {
    /// AsciiDoc (`.adoc`).
    #[default]
    #[serde(alias = "ASCIIDOC")]
    Asciidoc,
    /// Markdown (`.md`).
    #[serde(alias = "MARKDOWN")]
    Markdown,
    /// Confluence wiki markup (`.txt`).
    #[serde(alias = "CONFLUENCE_MARKUP", alias = "confluence_markup")]
    Confluence,
}

impl MarkupLanguage {
    /// File extension including the leading dot.
    pub fn file_extension(&self) -> &'static str {
        match self {
            MarkupLanguage::Asciidoc => ".adoc",
            MarkupLanguage::Markdown => ".md",
            MarkupLanguage::Confluence => ".txt",
        }
    }

    /// Appends the extension to a document base name.
    pub fn add_file_extension(&self, name: &str) -> String {
        format!("{}{}", name, self.file_extension())
    }
}

/// Conversion settings.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ConversionConfig {
    /// Output markup language.
    pub markup_language: MarkupLanguage,
    /// Generate examples where the document has none.
    pub generated_examples_enabled: bool,
    /// Include optional query parameters in generated request paths.
    pub generated_optional_query_parameter_example_enabled: bool,
    /// Include properties missing from `required` in generated object examples.
    pub generated_optional_property_example_enabled: bool,
    /// Hoist anonymous object schemas into named inline definitions.
    pub inline_schema_enabled: bool,
    /// Keep an object-typed body parameter flat instead of hoisting it.
    pub flat_body_enabled: bool,
    /// One output file per definition.
    pub separated_definitions_enabled: bool,
    /// One output file per operation.
    pub separated_operations_enabled: bool,
    /// Emit links between output documents.
    pub inter_document_cross_references_enabled: bool,
    /// Prefix prepended to every inter-document link target.
    pub inter_document_cross_references_prefix: Option<String>,
    /// Base name of the definitions document.
    pub definitions_document: String,
    /// Base name of the paths document.
    pub paths_document: String,
    /// Base name of the security document.
    pub security_document: String,
    /// Folder receiving separated definition documents.
    pub separated_definitions_folder: String,
    /// Folder receiving separated operation documents.
    pub separated_operations_folder: String,
}

impl Default for ConversionConfig {
    fn default() -> Self {
        Self {
            markup_language: MarkupLanguage::default(),
            generated_examples_enabled: false,
            generated_optional_query_parameter_example_enabled: false,
            generated_optional_property_example_enabled: true,
            inline_schema_enabled: true,
            flat_body_enabled: false,
            separated_definitions_enabled: false,
            separated_operations_enabled: false,
            inter_document_cross_references_enabled: false,
            inter_document_cross_references_prefix: None,
            definitions_document: "definitions".to_string(),
            paths_document: "paths".to_string(),
            security_document: "security".to_string(),
            separated_definitions_folder: "definitions".to_string(),
            separated_operations_folder: "operations".to_string(),
        }
    }
}

impl ConversionConfig {
    /// Parses a YAML configuration. Missing keys keep their defaults.
    pub fn from_yaml_str(yaml: &str) -> AppResult<Self> {
        if yaml.trim().is_empty() {
            return Ok(Self::default());
        }
        serde_yaml::from_str(yaml)
            .map_err(|e| AppError::Config(format!("Failed to parse config YAML: {}", e)))
    }

    /// Sets the output markup language.
    pub fn with_markup_language(mut self, language: MarkupLanguage) -> Self {
        self.markup_language = language;
        self
    }

    /// Enables example generation.
    pub fn with_generated_examples(mut self) -> Self {
        self.generated_examples_enabled = true;
        self
    }

    /// Includes optional query parameters in request examples.
    pub fn with_generated_optional_query_parameter_examples(mut self) -> Self {
        self.generated_optional_query_parameter_example_enabled = true;
        self
    }

    /// Omits optional properties from generated object examples.
    pub fn without_optional_property_examples(mut self) -> Self {
        self.generated_optional_property_example_enabled = false;
        self
    }

    /// Disables inline schema hoisting.
    pub fn without_inline_schema(mut self) -> Self {
        self.inline_schema_enabled = false;
        self
    }

    /// Keeps object body parameters flat.
    pub fn with_flat_body(mut self) -> Self {
        self.flat_body_enabled = true;
        self
    }

    /// One document per definition.
    pub fn with_separated_definitions(mut self) -> Self {
        self.separated_definitions_enabled = true;
        self
    }

    /// One document per operation.
    pub fn with_separated_operations(mut self) -> Self {
        self.separated_operations_enabled = true;
        self
    }

    /// Enables inter-document cross references without a prefix.
    pub fn with_inter_document_cross_references(mut self) -> Self {
        self.inter_document_cross_references_enabled = true;
        self
    }

    /// Enables inter-document cross references with a link prefix.
    pub fn with_inter_document_cross_references_prefix(mut self, prefix: &str) -> Self {
        self.inter_document_cross_references_enabled = true;
        self.inter_document_cross_references_prefix = Some(prefix.to_string());
        self
    }

    /// The configured link prefix, or an empty string.
    pub fn cross_reference_prefix(&self) -> &str {
        self.inter_document_cross_references_prefix
            .as_deref()
            .unwrap_or("")
    }
}

/// Per-run conversion state shared with the resolvers.
///
/// The output path is assigned by the external session once the target
/// directory is known; until then cross references resolve to nothing.
#[derive(Debug, Clone, Default)]
pub struct ConversionContext {
    config: ConversionConfig,
    output_path: Option<PathBuf>,
}

impl ConversionContext {
    /// Creates a context without an output path.
    pub fn new(config: ConversionConfig) -> Self {
        Self {
            config,
            output_path: None,
        }
    }

    /// The active configuration.
    pub fn config(&self) -> &ConversionConfig {
        &self.config
    }

    /// The output directory, once assigned.
    pub fn output_path(&self) -> Option<&Path> {
        self.output_path.as_deref()
    }

    /// Assigns the output directory.
    pub fn set_output_path(&mut self, path: impl Into<PathBuf>) {
        self.output_path = Some(path.into());
    }

    /// Builder variant of [`ConversionContext::set_output_path`].
    pub fn with_output_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.set_output_path(path);
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = ConversionConfig::default();
        assert_eq!(config.markup_language, MarkupLanguage::Asciidoc);
        assert!(config.inline_schema_enabled);
        assert!(config.generated_optional_property_example_enabled);
        assert!(!config.generated_examples_enabled);
        assert_eq!(config.definitions_document, "definitions");
        assert_eq!(config.cross_reference_prefix(), "");
    }

    #[test]
    fn test_from_yaml_partial() {
        let yaml = r#"
markupLanguage: markdown
separatedDefinitionsEnabled: true
interDocumentCrossReferencesEnabled: true
interDocumentCrossReferencesPrefix: "api_"
"#;
        let config = ConversionConfig::from_yaml_str(yaml).unwrap();
        assert_eq!(config.markup_language, MarkupLanguage::Markdown);
        assert!(config.separated_definitions_enabled);
        assert_eq!(config.cross_reference_prefix(), "api_");
        // untouched keys keep defaults
        assert_eq!(config.paths_document, "paths");
        assert!(config.inline_schema_enabled);
    }

    #[test]
    fn test_from_yaml_empty_is_default() {
        assert_eq!(
            ConversionConfig::from_yaml_str("  ").unwrap(),
            ConversionConfig::default()
        );
    }

    #[test]
    fn test_from_yaml_invalid() {
        let err = ConversionConfig::from_yaml_str("markupLanguage: [oops").unwrap_err();
        assert!(matches!(err, AppError::Config(_)));
    }

    #[test]
    fn test_file_extensions() {
        assert_eq!(MarkupLanguage::Asciidoc.add_file_extension("paths"), "paths.adoc");
        assert_eq!(MarkupLanguage::Markdown.add_file_extension("paths"), "paths.md");
        assert_eq!(MarkupLanguage::Confluence.add_file_extension("paths"), "paths.txt");
    }

    #[test]
    fn test_context_output_path() {
        let mut ctx = ConversionContext::new(ConversionConfig::default());
        assert!(ctx.output_path().is_none());
        ctx.set_output_path("/tmp");
        assert_eq!(ctx.output_path(), Some(Path::new("/tmp")));
    }
}
