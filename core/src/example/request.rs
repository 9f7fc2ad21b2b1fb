//! Request and response example maps of an operation.
//!
//! Request examples are keyed by parameter location (`path`, `query`,
//! `header`, `body`, ...). The `path` entry starts as the path template;
//! path parameters are substituted into it and query parameters appended to
//! it. Response examples are keyed by status code.

use super::primitives::{convert_example, UNTYPED_EXAMPLE};
use super::ExampleGenerator;
use crate::oas::node::SchemaNode;
use crate::oas::operation::{ParameterLocation, ParameterNode, PathOperation};
use indexmap::IndexMap;
use percent_encoding::{utf8_percent_encode, AsciiSet, NON_ALPHANUMERIC};
use serde_json::Value;

/// Form URL encoding: everything but alphanumerics and `. - * _` is escaped.
const FORM_URL_ENCODE: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'.')
    .remove(b'-')
    .remove(b'*')
    .remove(b'_');

/// Key of the request example holding the (expanded) path.
pub const PATH_EXAMPLE_KEY: &str = "path";

impl ExampleGenerator<'_> {
    /// Request examples of `operation`, keyed by parameter location.
    /// A later parameter in the same location replaces an earlier one.
    pub fn request_examples(&self, operation: &PathOperation) -> IndexMap<String, Value> {
        let mut examples = IndexMap::new();
        if self.options.generate_missing {
            examples.insert(
                PATH_EXAMPLE_KEY.to_string(),
                Value::String(operation.path.clone()),
            );
        }

        for parameter in operation.parameters() {
            if let Some(example) = self.parameter_example(parameter, &mut examples) {
                examples.insert(parameter.location().as_str().to_string(), example);
            }
        }
        examples
    }

    /// Response examples of `operation`, keyed by status code. Codes without
    /// an example are left out.
    pub fn response_examples(&self, operation: &PathOperation) -> IndexMap<String, Value> {
        let mut examples = IndexMap::new();
        for (code, response) in operation.responses() {
            let Some(media) = response.first_media() else {
                continue;
            };
            let example = media.authored_example().or_else(|| {
                let schema = media.schema.as_ref()?;
                self.response_schema_example(schema)
            });
            if let Some(example) = example {
                examples.insert(code.clone(), example);
            }
        }
        examples
    }

    fn response_schema_example(&self, schema: &SchemaNode) -> Option<Value> {
        if let Some(example) = &schema.example {
            return Some(example.clone());
        }
        if let Some(reference) = &schema.reference {
            return self.definition_example(&self.definitions.reference_name(reference));
        }
        self.options
            .generate_missing
            .then(|| self.generate_schema_example(schema))
    }

    /// Example of one parameter. Path and query parameters also rewrite the
    /// `path` entry of `examples`.
    fn parameter_example(
        &self,
        parameter: &ParameterNode,
        examples: &mut IndexMap<String, Value>,
    ) -> Option<Value> {
        if parameter.is_body() {
            return self.body_example(parameter);
        }

        if let Some(reference) = &parameter.reference {
            return self.definition_example(&self.definitions.reference_name(reference));
        }

        // 1. Only schema-bearing parameters get generated examples
        let schema = parameter.schema.as_ref()?;
        if !self.options.generate_missing {
            return None;
        }

        // 2. Authored value, else generated
        let value = self.simple_parameter_value(parameter, schema);

        // 3. Place it according to the location
        match parameter.location() {
            ParameterLocation::Header => Some(Value::String(format!(
                "{}:\"{}\"",
                parameter.name,
                schema.kind().unwrap_or(UNTYPED_EXAMPLE)
            ))),
            ParameterLocation::Path => {
                let path = path_example(examples);
                let placeholder = format!("{{{}}}", parameter.name);
                Some(Value::String(
                    path.replace(&placeholder, &encode_example_value(&value)),
                ))
            }
            ParameterLocation::Query => {
                if parameter.required || self.options.include_optional_query_parameters {
                    let path = path_example(examples);
                    let separator = if path.contains('?') { '&' } else { '?' };
                    let expanded = format!(
                        "{}{}{}={}",
                        path,
                        separator,
                        parameter.name,
                        encode_example_value(&value)
                    );
                    examples.insert(PATH_EXAMPLE_KEY.to_string(), Value::String(expanded));
                }
                None
            }
            _ => Some(value),
        }
    }

    fn body_example(&self, parameter: &ParameterNode) -> Option<Value> {
        let schema = parameter.schema.as_ref();
        let authored = parameter
            .example
            .clone()
            .or_else(|| parameter.examples.as_ref().map(first_named_example))
            .or_else(|| schema.and_then(|s| s.example.clone()))
            .or_else(|| parameter.extension("x-examples").cloned())
            .or_else(|| schema.and_then(|s| s.extension("x-examples")).cloned());
        if authored.is_some() {
            return authored;
        }

        let schema = schema?;
        if let Some(reference) = &schema.reference {
            return self.definition_example(&self.definitions.reference_name(reference));
        }
        self.options
            .generate_missing
            .then(|| self.generate_schema_example(schema))
    }

    fn simple_parameter_value(&self, parameter: &ParameterNode, schema: &SchemaNode) -> Value {
        let authored = parameter.example.clone().or_else(|| {
            parameter.extension("x-example").map(|value| match value {
                Value::String(text) => convert_example(text, schema.kind()),
                other => other.clone(),
            })
        });
        if let Some(value) = authored {
            return value;
        }

        if schema.is_array() {
            if let Some(items) = schema.items.as_deref() {
                return self
                    .authored_example(items)
                    .unwrap_or_else(|| self.generate_schema_example(items));
            }
        }
        self.generate_schema_example(schema)
    }
}

fn path_example(examples: &IndexMap<String, Value>) -> String {
    match examples.get(PATH_EXAMPLE_KEY) {
        Some(Value::String(path)) => path.clone(),
        _ => String::new(),
    }
}

/// `examples` of a parameter: the first Example Object's `value`, or the raw
/// value when it is not a map.
fn first_named_example(examples: &Value) -> Value {
    match examples {
        Value::Object(map) => match map.values().next() {
            Some(first) => first.get("value").cloned().unwrap_or_else(|| first.clone()),
            None => examples.clone(),
        },
        other => other.clone(),
    }
}

/// Form-URL-encodes an example value. Strings are encoded raw, anything else
/// as its JSON text.
pub fn encode_example_value(value: &Value) -> String {
    let text = match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    };
    utf8_percent_encode(&text, FORM_URL_ENCODE)
        .to_string()
        .replace("%20", "+")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::example::ExampleOptions;
    use crate::oas::document::ApiDocument;
    use serde_json::json;

    const API: &str = r#"
openapi: 3.0.0
paths:
  /pets/{petId}:
    get:
      operationId: getPet
      parameters:
        - name: petId
          in: path
          required: true
          schema: { type: integer, format: int64 }
        - name: fields
          in: query
          required: true
          schema: { type: string }
          example: name tag
        - name: limit
          in: query
          schema: { type: integer }
        - name: X-Trace
          in: header
          schema: { type: string }
      responses:
        '200':
          description: ok
          content:
            application/json:
              schema: { $ref: '#/components/schemas/Pet' }
        '404':
          description: missing
          content:
            application/json:
              examples:
                notFound:
                  value: { message: no such pet }
        '500':
          description: no body
  /pets:
    post:
      operationId: addPet
      requestBody:
        content:
          application/json:
            schema: { $ref: '#/components/schemas/Pet' }
      responses:
        '201':
          description: created
          content:
            application/json:
              schema:
                type: object
                properties:
                  id: { type: integer }
  /tagged:
    post:
      operationId: tag
      parameters:
        - name: tags
          in: query
          required: true
          schema:
            type: array
            items: { type: string, format: email }
        - name: page
          in: query
          required: true
          schema: { type: integer }
          x-example: '3'
      requestBody:
        content:
          application/json:
            schema: { type: object, properties: { id: { type: integer } } }
            example: { id: 5 }
      responses: {}
components:
  schemas:
    Pet:
      type: object
      required: [id, name]
      properties:
        id: { type: integer, format: int64 }
        name: { type: string }
        tag: { type: string }
"#;

    fn document() -> ApiDocument {
        ApiDocument::from_yaml_str(API).unwrap()
    }

    fn generating() -> ExampleOptions {
        ExampleOptions {
            generate_missing: true,
            ..Default::default()
        }
    }

    #[test]
    fn test_path_query_and_header_examples() {
        let doc = document();
        let generator = ExampleGenerator::new(doc.definitions(), generating());
        let examples = generator.request_examples(doc.operation("getPet").unwrap());

        assert_eq!(examples["path"], json!("/pets/0?fields=name+tag"));
        assert_eq!(examples["header"], json!("X-Trace:\"string\""));
        assert!(!examples.contains_key("query"));
    }

    #[test]
    fn test_optional_query_parameters_when_enabled() {
        let doc = document();
        let generator = ExampleGenerator::new(
            doc.definitions(),
            ExampleOptions {
                include_optional_query_parameters: true,
                ..generating()
            },
        );
        let examples = generator.request_examples(doc.operation("getPet").unwrap());
        assert_eq!(examples["path"], json!("/pets/0?fields=name+tag&limit=0"));
    }

    #[test]
    fn test_array_and_converted_query_values() {
        let doc = document();
        let generator = ExampleGenerator::new(doc.definitions(), generating());
        let examples = generator.request_examples(doc.operation("tag").unwrap());
        assert_eq!(
            examples["path"],
            json!("/tagged?tags=email%40example.com&page=3")
        );
        assert_eq!(examples["body"], json!({ "id": 5 }));
    }

    #[test]
    fn test_body_example_generated_from_reference() {
        let doc = document();
        let generator = ExampleGenerator::new(doc.definitions(), generating());
        let examples = generator.request_examples(doc.operation("addPet").unwrap());
        assert_eq!(
            examples["body"],
            json!({ "id": 0, "name": "string", "tag": "string" })
        );
    }

    #[test]
    fn test_nothing_generated_when_disabled() {
        let doc = document();
        let generator = ExampleGenerator::new(doc.definitions(), ExampleOptions::default());
        assert!(generator
            .request_examples(doc.operation("getPet").unwrap())
            .is_empty());
        // authored bodies are still reported
        let tagged = generator.request_examples(doc.operation("tag").unwrap());
        assert_eq!(tagged.len(), 1);
        assert_eq!(tagged["body"], json!({ "id": 5 }));
    }

    #[test]
    fn test_response_examples() {
        let doc = document();
        let generator = ExampleGenerator::new(doc.definitions(), generating());
        let examples = generator.response_examples(doc.operation("getPet").unwrap());

        assert_eq!(
            examples.keys().collect::<Vec<_>>(),
            vec!["200", "404"]
        );
        assert_eq!(
            examples["200"],
            json!({ "id": 0, "name": "string", "tag": "string" })
        );
        assert_eq!(examples["404"], json!({ "message": "no such pet" }));

        let created = generator.response_examples(doc.operation("addPet").unwrap());
        assert_eq!(created["201"], json!({ "id": 0 }));

        let quiet = ExampleGenerator::new(doc.definitions(), ExampleOptions::default());
        let authored_only = quiet.response_examples(doc.operation("getPet").unwrap());
        assert_eq!(authored_only.keys().collect::<Vec<_>>(), vec!["404"]);
    }

    #[test]
    fn test_encode_example_value() {
        assert_eq!(encode_example_value(&json!("a b/c")), "a+b%2Fc");
        assert_eq!(encode_example_value(&json!("x.y-z_*")), "x.y-z_*");
        assert_eq!(encode_example_value(&json!(12)), "12");
        assert_eq!(encode_example_value(&json!(true)), "true");
    }
}
