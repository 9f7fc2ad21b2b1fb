#![deny(missing_docs)]

//! # OpenAPI Input Module
//!
//! - **node**: Raw Schema Object shim.
//! - **operation**: Operation, parameter, body and response shims.
//! - **definitions**: Named schema lookup table.
//! - **document**: Document loading (YAML, JSON, `utoipa`).
//! - **compat**: Swagger 2.0 / OAS 3.x shape unification.
//! - **ref_utils**: `$ref` to definition name.

pub(crate) mod compat;
pub mod definitions;
pub mod document;
pub mod node;
pub mod operation;
pub mod ref_utils;

pub use definitions::DefinitionTable;
pub use document::ApiDocument;
pub use node::{AdditionalProperties, Discriminator, ExclusiveBound, SchemaNode, SchemaTypeDecl};
pub use operation::{
    HttpMethod, MediaTypeNode, OperationNode, ParameterLocation, ParameterNode, PathOperation,
    RequestBodyNode, ResponseNode, BODY_PARAMETER_NAME,
};
pub use ref_utils::definition_name;
