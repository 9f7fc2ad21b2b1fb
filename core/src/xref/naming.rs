#![deny(missing_docs)]

//! # Naming Utilities
//!
//! Helper functions deriving output file names from definition names and
//! operation ids.

use crate::config::ConversionConfig;
use crate::oas::operation::PathOperation;
use regex::Regex;
use std::path::Path;
use std::sync::OnceLock;

fn forbidden_characters() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"[^0-9A-Za-z\-_]+").expect("Invalid regex"))
}

fn repeated_separators() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"([\-_])[\-_]+").expect("Invalid regex"))
}

/// Makes a name safe for use as a file name.
///
/// e.g. `/pets/{petId} get` -> `pets_petId_get`
pub fn normalize_name(name: &str) -> String {
    let replaced = forbidden_characters().replace_all(name, "_");
    let collapsed = repeated_separators().replace_all(&replaced, "$1");
    collapsed.trim_matches(|c| c == '_' || c == '-').to_string()
}

/// Joins path segments with the platform separator.
pub(crate) fn join_path(parent: &str, child: &str) -> String {
    Path::new(parent).join(child).to_string_lossy().into_owned()
}

/// File name of the document holding `definition_name`, relative to the
/// output directory.
pub fn definition_document_name(config: &ConversionConfig, definition_name: &str) -> String {
    let lang = config.markup_language;
    if config.separated_definitions_enabled {
        join_path(
            &config.separated_definitions_folder,
            &lang.add_file_extension(&normalize_name(definition_name)),
        )
    } else {
        lang.add_file_extension(&config.definitions_document)
    }
}

/// File name of the document holding `operation`, relative to the output
/// directory.
pub fn operation_document_name(config: &ConversionConfig, operation: &PathOperation) -> String {
    let lang = config.markup_language;
    if config.separated_operations_enabled {
        join_path(
            &config.separated_operations_folder,
            &lang.add_file_extension(&normalize_name(&operation.id())),
        )
    } else {
        lang.add_file_extension(&config.paths_document)
    }
}
