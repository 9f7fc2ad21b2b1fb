#![deny(missing_docs)]

//! # Document Loading
//!
//! Reads an OpenAPI 3.x or Swagger 2.0 document into a [`DefinitionTable`]
//! plus the list of [`PathOperation`]s.
//!
//! Loading is the only fallible stage of the pipeline: a schema, parameter or
//! operation that does not deserialize aborts with [`AppError::Conversion`]
//! naming its location. Everything after this point degrades gracefully.

use crate::error::{AppError, AppResult};
use crate::oas::compat::normalize_document;
use crate::oas::definitions::DefinitionTable;
use crate::oas::node::SchemaNode;
use crate::oas::operation::{
    HttpMethod, OperationNode, ParameterNode, PathOperation, RequestBodyNode, ResponseNode,
};
use crate::oas::ref_utils::extract_component_name;
use indexmap::IndexMap;
use serde::de::DeserializeOwned;
use serde_json::Value;

/// A loaded API document.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ApiDocument {
    definitions: DefinitionTable,
    operations: Vec<PathOperation>,
}

/// Reusable components referenced from operations.
#[derive(Default)]
struct Reusables {
    parameters: IndexMap<String, ParameterNode>,
    request_bodies: IndexMap<String, RequestBodyNode>,
    responses: IndexMap<String, ResponseNode>,
}

impl ApiDocument {
    /// Parses a YAML (or JSON) document.
    pub fn from_yaml_str(content: &str) -> AppResult<Self> {
        let value: Value = serde_yaml::from_str(content)
            .map_err(|e| AppError::General(format!("Failed to parse OpenAPI YAML: {}", e)))?;
        Self::from_value(value)
    }

    /// Converts a `utoipa` document (e.g. one produced by `#[derive(OpenApi)]`).
    pub fn from_openapi(api: &utoipa::openapi::OpenApi) -> AppResult<Self> {
        let value = serde_json::to_value(api)
            .map_err(|e| AppError::General(format!("Failed to serialize OpenApi: {}", e)))?;
        Self::from_value(value)
    }

    /// Loads a document from its JSON tree.
    pub fn from_value(mut value: Value) -> AppResult<Self> {
        if !value.is_object() {
            return Err(AppError::General(
                "OpenAPI document root must be an object".into(),
            ));
        }

        // 1. Compatibility rewrites
        normalize_document(&mut value);

        // 2. Definitions
        let self_uri = value.get("$self").and_then(Value::as_str).map(str::to_string);
        let mut definitions = DefinitionTable::new();
        if let Some(uri) = &self_uri {
            definitions = definitions.with_self_uri(uri.clone());
        }
        for (section, location) in [
            (value.pointer("/components/schemas"), "components.schemas"),
            (value.get("definitions"), "definitions"),
        ] {
            if let Some(map) = section.and_then(Value::as_object) {
                for (name, raw) in map {
                    let node: SchemaNode = convert(raw, &format!("{}.{}", location, name))?;
                    definitions.insert(name.clone(), node);
                }
            }
        }

        // 3. Reusable operation parts
        let reusables = Reusables {
            parameters: collect_section(&value, &["/components/parameters", "/parameters"])?,
            request_bodies: collect_section(&value, &["/components/requestBodies"])?,
            responses: collect_section(&value, &["/components/responses", "/responses"])?,
        };

        // 4. Operations, in document order
        let mut operations = Vec::new();
        if let Some(paths) = value.get("paths").and_then(Value::as_object) {
            for (path, item) in paths {
                if path.starts_with("x-") {
                    continue;
                }
                let Some(item) = item.as_object() else {
                    continue;
                };
                let shared: Vec<ParameterNode> = match item.get("parameters") {
                    Some(raw) => convert(raw, &format!("paths.{}.parameters", path))?,
                    None => Vec::new(),
                };

                for method in HttpMethod::ALL {
                    let Some(raw) = item.get(method.as_key()) else {
                        continue;
                    };
                    let location = format!("paths.{}.{}", path, method.as_key());
                    let mut operation: OperationNode = convert(raw, &location)?;
                    prepare_operation(&mut operation, &shared, &reusables, self_uri.as_deref());
                    operations.push(PathOperation::new(method, path.clone(), operation));
                }
            }
        }

        log::debug!(
            "Loaded {} definitions and {} operations",
            definitions.len(),
            operations.len()
        );

        Ok(Self {
            definitions,
            operations,
        })
    }

    /// Named schema definitions.
    pub fn definitions(&self) -> &DefinitionTable {
        &self.definitions
    }

    /// Operations in document order.
    pub fn operations(&self) -> &[PathOperation] {
        &self.operations
    }

    /// Finds an operation by its id (see [`PathOperation::id`]).
    pub fn operation(&self, id: &str) -> Option<&PathOperation> {
        self.operations.iter().find(|op| op.id() == id)
    }
}

fn convert<T: DeserializeOwned>(raw: &Value, location: &str) -> AppResult<T> {
    T::deserialize(raw).map_err(|e| AppError::conversion(location, e))
}

fn collect_section<T: DeserializeOwned>(
    value: &Value,
    pointers: &[&str],
) -> AppResult<IndexMap<String, T>> {
    let mut out = IndexMap::new();
    for pointer in pointers {
        let Some(map) = value.pointer(pointer).and_then(Value::as_object) else {
            continue;
        };
        let section = pointer.trim_start_matches('/').replace('/', ".");
        for (name, raw) in map {
            let item: T = convert(raw, &format!("{}.{}", section, name))?;
            out.insert(name.clone(), item);
        }
    }
    Ok(out)
}

/// Resolves parameter, request body and response references, merges path-level
/// parameters and appends the request body as the `Body` parameter.
fn prepare_operation(
    operation: &mut OperationNode,
    shared: &[ParameterNode],
    reusables: &Reusables,
    self_uri: Option<&str>,
) {
    // 1. Resolve references
    let own: Vec<ParameterNode> = operation
        .parameters
        .iter()
        .map(|p| resolve_parameter(p, reusables, self_uri))
        .collect();
    let shared: Vec<ParameterNode> = shared
        .iter()
        .map(|p| resolve_parameter(p, reusables, self_uri))
        .collect();

    // 2. Path-level parameters the operation does not override come first
    let mut merged: Vec<ParameterNode> = shared
        .into_iter()
        .filter(|s| {
            !own
                .iter()
                .any(|o| o.name == s.name && o.location() == s.location())
        })
        .collect();
    merged.extend(own);

    // 3. Request body
    if let Some(body) = &operation.request_body {
        let body = match body.reference.as_deref() {
            Some(reference) => {
                match extract_component_name(reference, self_uri, "requestBodies")
                    .and_then(|name| reusables.request_bodies.get(&name))
                {
                    Some(found) => found.clone(),
                    None => {
                        log::warn!("Unresolved request body reference '{}'", reference);
                        body.clone()
                    }
                }
            }
            None => body.clone(),
        };
        if body.content.is_empty() {
            log::debug!("Request body without content ignored");
        } else {
            merged.push(body.to_parameter());
        }
    }
    operation.parameters = merged;

    // 4. Response references
    for (code, response) in operation.responses.iter_mut() {
        let Some(reference) = response.reference.clone() else {
            continue;
        };
        match extract_component_name(&reference, self_uri, "responses")
            .and_then(|name| reusables.responses.get(&name))
        {
            Some(found) => *response = found.clone(),
            None => log::warn!("Unresolved response reference '{}' for {}", reference, code),
        }
    }
}

fn resolve_parameter(
    parameter: &ParameterNode,
    reusables: &Reusables,
    self_uri: Option<&str>,
) -> ParameterNode {
    let Some(reference) = parameter.reference.as_deref() else {
        return parameter.clone();
    };
    match extract_component_name(reference, self_uri, "parameters")
        .and_then(|name| reusables.parameters.get(&name))
    {
        Some(found) => found.clone(),
        None => {
            log::warn!("Unresolved parameter reference '{}'", reference);
            parameter.clone()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const PETSTORE_V3: &str = r#"
openapi: 3.0.0
info: { title: Petstore, version: "1.0" }
paths:
  /pets/{petId}:
    parameters:
      - name: petId
        in: path
        required: true
        schema: { type: string }
      - $ref: '#/components/parameters/Trace'
    get:
      operationId: getPet
      parameters:
        - name: petId
          in: path
          required: true
          schema: { type: integer }
      responses:
        '200':
          $ref: '#/components/responses/PetResponse'
    put:
      requestBody:
        $ref: '#/components/requestBodies/PetBody'
      responses:
        default: { description: error }
components:
  parameters:
    Trace:
      name: X-Trace
      in: header
      schema: { type: string }
  requestBodies:
    PetBody:
      required: true
      content:
        application/json:
          schema: { $ref: '#/components/schemas/Pet' }
  responses:
    PetResponse:
      description: a pet
      content:
        application/json:
          schema: { $ref: '#/components/schemas/Pet' }
  schemas:
    Pet:
      type: object
      properties:
        id: { type: integer }
"#;

    #[test]
    fn test_load_v3_document() {
        let doc = ApiDocument::from_yaml_str(PETSTORE_V3).unwrap();
        assert!(doc.definitions().contains("Pet"));
        assert_eq!(doc.operations().len(), 2);

        let get = doc.operation("getPet").unwrap();
        let names: Vec<_> = get.parameters().iter().map(|p| p.name.as_str()).collect();
        // path-level X-Trace kept, petId overridden by the operation's own
        assert_eq!(names, vec!["X-Trace", "petId"]);
        assert_eq!(
            get.parameters()[1].schema.as_ref().unwrap().kind(),
            Some("integer")
        );
        assert_eq!(get.responses()["200"].description, "a pet");

        let put = doc.operation("/pets/{petId} put").unwrap();
        let body = put.parameters().last().unwrap();
        assert_eq!(body.name, "Body");
        assert!(body.required);
    }

    #[test]
    fn test_load_swagger2_document() {
        let yaml = r#"
swagger: "2.0"
info: { title: Petstore, version: "1.0" }
paths:
  /pets:
    get:
      parameters:
        - { name: limit, in: query, type: integer, format: int32 }
      responses:
        200:
          description: ok
          schema:
            type: array
            items: { $ref: '#/definitions/Pet' }
definitions:
  Pet:
    type: object
    properties:
      name: { type: string }
"#;
        let doc = ApiDocument::from_yaml_str(yaml).unwrap();
        let op = &doc.operations()[0];
        assert_eq!(op.id(), "/pets get");
        let limit = op.parameters()[0].schema.as_ref().unwrap();
        assert_eq!(limit.format.as_deref(), Some("int32"));
        let media = op.responses()["200"].first_media().unwrap();
        assert!(media.schema.as_ref().unwrap().is_array());
        assert!(doc.definitions().contains("Pet"));
    }

    #[test]
    fn test_conversion_error_names_location() {
        let yaml = r#"
openapi: 3.0.0
components:
  schemas:
    Broken:
      properties: [1, 2]
"#;
        let err = ApiDocument::from_yaml_str(yaml).unwrap_err();
        match err {
            AppError::Conversion { location, .. } => {
                assert_eq!(location, "components.schemas.Broken")
            }
            other => panic!("unexpected error: {}", other),
        }
    }

    #[test]
    fn test_rejects_non_object_root() {
        assert!(ApiDocument::from_yaml_str("- 1\n- 2\n").is_err());
    }

    #[test]
    fn test_from_utoipa_openapi() {
        use utoipa::openapi::schema::{ObjectBuilder, Type};
        use utoipa::openapi::{ComponentsBuilder, InfoBuilder, OpenApiBuilder};

        let api = OpenApiBuilder::new()
            .info(InfoBuilder::new().title("t").version("1").build())
            .components(Some(
                ComponentsBuilder::new()
                    .schema(
                        "Tag",
                        ObjectBuilder::new()
                            .property("name", ObjectBuilder::new().schema_type(Type::String)),
                    )
                    .build(),
            ))
            .build();

        let doc = ApiDocument::from_openapi(&api).unwrap();
        let tag = doc.definitions().get("Tag").unwrap();
        assert!(tag.properties.as_ref().unwrap().contains_key("name"));
    }
}
