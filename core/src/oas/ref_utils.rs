#![deny(missing_docs)]

//! # Reference Utilities
//!
//! Helpers turning `$ref` strings into definition names.
//!
//! External documents are never fetched. A reference whose document part matches
//! the current document's `$self` URI is treated as local.

use percent_encoding::percent_decode_str;
use std::path::Path;
use url::Url;

/// The JSON Pointer part of a `$ref` that stays inside the current document.
///
/// A reference with a document part is local only when that part designates
/// the `$self` URI. `None` for external references.
pub(crate) fn normalize_ref_to_local(ref_str: &str, self_uri: Option<&str>) -> Option<String> {
    match ref_str.split_once('#') {
        Some(("", _)) => Some(ref_str.to_string()),
        Some((document, pointer)) if self_uri.is_some_and(|s| is_self_document(document, s)) => {
            Some(format!("#{}", pointer))
        }
        _ => None,
    }
}

/// Extracts a component name from a `$ref` if it points to `#/components/{section}/{name}`.
///
/// Swagger 2.0 top-level sections (`#/parameters/{name}`) are accepted as well.
pub(crate) fn extract_component_name(
    ref_str: &str,
    self_uri: Option<&str>,
    section: &str,
) -> Option<String> {
    let local = normalize_ref_to_local(ref_str, self_uri)?;
    let pointer = local.trim_start_matches('#').trim_start_matches('/');
    let segments: Vec<&str> = pointer.split('/').collect();

    let raw = match segments.as_slice() {
        ["components", s, name] if *s == section => *name,
        [s, name] if *s == section => *name,
        _ => return None,
    };

    let name = decode_pointer_segment(raw);
    if name.is_empty() {
        None
    } else {
        Some(name)
    }
}

/// Derives the definition name a schema `$ref` points at.
///
/// - `#/components/schemas/Pet` and `#/definitions/Pet` yield `Pet`
/// - a bare `Pet` (Swagger 1.x style shorthand) yields `Pet`
/// - anything else yields its last decoded path or pointer segment
pub fn definition_name(ref_str: &str, self_uri: Option<&str>) -> String {
    if !ref_str.contains('#') && !ref_str.contains('/') {
        return ref_str.to_string();
    }

    if let Some(name) = extract_component_name(ref_str, self_uri, "schemas")
        .or_else(|| extract_component_name(ref_str, self_uri, "definitions"))
    {
        return name;
    }

    let tail = ref_str
        .rsplit(['/', '#'])
        .find(|segment| !segment.is_empty())
        .unwrap_or(ref_str);
    let tail = tail
        .rsplit_once('.')
        .filter(|(stem, ext)| !stem.is_empty() && matches!(*ext, "json" | "yaml" | "yml"))
        .map(|(stem, _)| stem)
        .unwrap_or(tail);
    decode_pointer_segment(tail)
}

/// Decodes a JSON Pointer segment (handles `~1` and `~0`).
pub(crate) fn decode_pointer_segment(segment: &str) -> String {
    let decoded = segment.replace("~1", "/").replace("~0", "~");
    percent_decode_str(&decoded)
        .decode_utf8_lossy()
        .into_owned()
}

/// Compares the document part of a `$ref` with `$self`: by scheme, authority
/// and path for two URLs, by path when `$self` is an absolute path, and as
/// file paths when neither is a URL.
fn is_self_document(document: &str, self_uri: &str) -> bool {
    if document == self_uri {
        return true;
    }
    match (Url::parse(document), Url::parse(self_uri)) {
        (Ok(doc), Ok(own)) => doc.origin() == own.origin() && doc.path() == own.path(),
        (Ok(doc), Err(_)) => self_uri.starts_with('/') && doc.path() == self_uri,
        (Err(_), Err(_)) => Path::new(document) == Path::new(self_uri),
        (Err(_), Ok(_)) => false,
    }
}
