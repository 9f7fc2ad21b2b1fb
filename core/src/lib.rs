#![deny(missing_docs)]

//! # OAS2Markup Core
//!
//! Core library of the OpenAPI documentation converter: turns a Swagger 2.0 /
//! OpenAPI 3.x schema graph into a renderer-agnostic type model and example
//! payloads.

/// Shared error types.
pub mod error;

/// Conversion switches and output context.
pub mod config;

/// OpenAPI (OAS) input shims and document loading.
pub mod oas;

/// Normalized schema models.
pub mod model;

/// Resolved type model.
pub mod types;

/// Model to type resolution, polymorphism and inline hoisting.
pub mod resolver;

/// Cross-document link targets.
pub mod xref;

/// Example synthesis.
pub mod example;

pub use config::{ConversionConfig, ConversionContext, MarkupLanguage};
pub use error::{AppError, AppResult};
pub use example::{ExampleGenerator, ExampleOptions, RecursionLimit, RefStack, TRUNCATION_SENTINEL};
pub use model::{normalize, Model};
pub use oas::{ApiDocument, DefinitionTable, ParameterNode, PathOperation, SchemaNode};
pub use resolver::{
    distribute_required, hoist_inline_type, PropertyRequirement, PropertyRow, Resolved,
    TypeResolver,
};
pub use types::{
    ArrayType, BasicType, CollectionFormat, EnumType, MapType, Nature, ObjectType, Polymorphism,
    PrimitiveKind, RefType, Type,
};
pub use xref::{
    CallSite, DefinitionDocumentResolver, DocumentResolver, OperationDocumentResolver,
    SameDocument, SecurityDocumentResolver,
};
