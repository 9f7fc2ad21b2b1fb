//! Property rows of an object type, as rendered in a properties table.

use crate::config::ConversionConfig;
use crate::example::ExampleGenerator;
use crate::oas::node::SchemaNode;
use crate::resolver::composition::distribute_required;
use crate::resolver::inline::{hoist_inline_type, Resolved};
use crate::resolver::TypeResolver;
use crate::types::{ObjectType, Type};
use serde_json::Value;

/// One property of an object type.
#[derive(Debug, Clone, PartialEq)]
pub struct PropertyRow {
    /// Property name.
    pub name: String,
    /// Resolved (and possibly hoisted) type.
    pub ty: Type,
    /// Listed in the owner's `required` list.
    pub required: bool,
    /// `readOnly` flag.
    pub read_only: bool,
    /// Own description, else the referenced definition's.
    pub description: Option<String>,
    /// Default value.
    pub default: Option<Value>,
    /// Authored example, or a generated one when generation is enabled.
    pub example: Option<Value>,
    /// `minLength`.
    pub min_length: Option<u64>,
    /// `maxLength`.
    pub max_length: Option<u64>,
    /// `pattern`.
    pub pattern: Option<String>,
    /// Lower bound.
    pub minimum: Option<f64>,
    /// Whether `minimum` is exclusive.
    pub exclusive_minimum: bool,
    /// Upper bound.
    pub maximum: Option<f64>,
    /// Whether `maximum` is exclusive.
    pub exclusive_maximum: bool,
}

impl TypeResolver<'_> {
    /// Rows for the properties of `object`, in declaration order.
    ///
    /// `parent` prefixes the unique name of hoisted property types
    /// (`"<parent> <property>"`); `required` is the owner's required list.
    pub fn property_rows(
        &self,
        parent: &str,
        object: &ObjectType,
        required: &[String],
        examples: &ExampleGenerator<'_>,
        config: &ConversionConfig,
    ) -> Resolved<Vec<PropertyRow>> {
        let mut inline_definitions = Vec::new();
        let mut rows = Vec::with_capacity(object.properties.len());

        for property in distribute_required(object, required) {
            let mut ty = self.resolve_schema(&property.schema);
            if config.inline_schema_enabled {
                let unique_name = format!("{} {}", parent, property.name);
                let hoisted = hoist_inline_type(ty, &property.name, &unique_name);
                inline_definitions.extend(hoisted.inline_definitions);
                ty = hoisted.value;
            }

            let schema = &property.schema;
            // examples keep the nested required list dropped from the row schema
            let source = object.properties.get(&property.name).unwrap_or(schema);
            rows.push(PropertyRow {
                ty,
                required: property.required,
                read_only: schema.read_only.unwrap_or(false),
                description: self.property_description(schema),
                default: schema.default.clone(),
                example: examples.schema_example(source),
                min_length: schema.min_length,
                max_length: schema.max_length,
                pattern: schema.pattern.clone(),
                minimum: schema.lower_bound(),
                exclusive_minimum: schema.is_exclusive_minimum(),
                maximum: schema.upper_bound(),
                exclusive_maximum: schema.is_exclusive_maximum(),
                name: property.name,
            });
        }

        Resolved {
            value: rows,
            inline_definitions,
        }
    }

    /// Rows of the named definition with its (composed) required list.
    /// `None` for unknown or non-object definitions.
    pub fn definition_rows(
        &self,
        name: &str,
        examples: &ExampleGenerator<'_>,
        config: &ConversionConfig,
    ) -> Option<Resolved<Vec<PropertyRow>>> {
        let node = self.definitions.get(name)?;
        let ty = self.resolve_reference(name);
        let object = ty.as_object()?;
        let required = self.definitions.required_properties(node);
        Some(self.property_rows(name, object, &required, examples, config))
    }

    fn property_description(&self, schema: &SchemaNode) -> Option<String> {
        if schema.description.is_some() {
            return schema.description.clone();
        }
        schema
            .reference
            .as_deref()
            .and_then(|r| self.definitions.lookup_reference(r))
            .and_then(|target| target.description.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::example::ExampleOptions;
    use crate::oas::document::ApiDocument;
    use crate::xref::SameDocument;
    use serde_json::json;

    const DEFS: &str = r#"
openapi: 3.0.0
components:
  schemas:
    Address:
      description: A postal address.
      type: object
      properties:
        street: { type: string }
    Order:
      type: object
      required: [id, shipTo]
      properties:
        id:
          type: integer
          readOnly: true
          minimum: 1
          exclusiveMaximum: 100
        code:
          type: string
          minLength: 2
          maxLength: 8
          pattern: '^[A-Z]+$'
          default: AB
        shipTo: { $ref: '#/components/schemas/Address' }
        meta:
          type: object
          required: [kind]
          properties:
            kind: { type: string, example: gift }
    Special:
      allOf:
        - $ref: '#/components/schemas/Order'
        - type: object
          required: [flag]
          properties:
            flag: { type: boolean }
    Parcel:
      type: object
      required: [meta]
      properties:
        meta:
          type: object
          required: [kind]
          properties:
            kind: { type: string }
            extra: { type: string }
"#;

    fn document() -> ApiDocument {
        ApiDocument::from_yaml_str(DEFS).unwrap()
    }

    fn row<'r>(rows: &'r [PropertyRow], name: &str) -> &'r PropertyRow {
        rows.iter().find(|r| r.name == name).unwrap()
    }

    #[test]
    fn test_definition_rows() {
        let doc = document();
        let resolver = TypeResolver::new(doc.definitions(), &SameDocument);
        let examples = ExampleGenerator::new(doc.definitions(), ExampleOptions::default());
        let config = ConversionConfig::default();

        let rows = resolver.definition_rows("Order", &examples, &config).unwrap();
        assert_eq!(
            rows.value.iter().map(|r| r.name.as_str()).collect::<Vec<_>>(),
            vec!["id", "code", "shipTo", "meta"]
        );

        let id = row(&rows.value, "id");
        assert!(id.required);
        assert!(id.read_only);
        assert_eq!(id.minimum, Some(1.0));
        assert!(!id.exclusive_minimum);
        assert_eq!(id.maximum, Some(100.0));
        assert!(id.exclusive_maximum);

        let code = row(&rows.value, "code");
        assert!(!code.required);
        assert_eq!(code.min_length, Some(2));
        assert_eq!(code.max_length, Some(8));
        assert_eq!(code.pattern.as_deref(), Some("^[A-Z]+$"));
        assert_eq!(code.default, Some(json!("AB")));
        assert_eq!(code.example, None);

        let ship_to = row(&rows.value, "shipTo");
        assert_eq!(ship_to.description.as_deref(), Some("A postal address."));
        assert_eq!(ship_to.ty.schema_label(), "Address");
    }

    #[test]
    fn test_inline_property_is_hoisted() {
        let doc = document();
        let resolver = TypeResolver::new(doc.definitions(), &SameDocument);
        let examples = ExampleGenerator::new(doc.definitions(), ExampleOptions::default());

        let rows = resolver
            .definition_rows("Order", &examples, &ConversionConfig::default())
            .unwrap();
        assert_eq!(rows.inline_definitions.len(), 1);
        assert_eq!(rows.inline_definitions[0].unique_name(), Some("Order meta"));
        assert_eq!(row(&rows.value, "meta").ty.schema_label(), "meta");

        let flat = resolver
            .definition_rows("Order", &examples, &ConversionConfig::default().without_inline_schema())
            .unwrap();
        assert!(flat.inline_definitions.is_empty());
        assert_eq!(row(&flat.value, "meta").ty.schema_label(), "object");
    }

    #[test]
    fn test_generated_examples_when_enabled() {
        let doc = document();
        let resolver = TypeResolver::new(doc.definitions(), &SameDocument);
        let examples = ExampleGenerator::new(
            doc.definitions(),
            ExampleOptions {
                generate_missing: true,
                ..Default::default()
            },
        );
        let rows = resolver
            .definition_rows("Order", &examples, &ConversionConfig::default())
            .unwrap();
        assert_eq!(row(&rows.value, "code").example, Some(json!("AB")));
        assert_eq!(
            row(&rows.value, "shipTo").example,
            Some(json!({ "street": "string" }))
        );
        assert_eq!(row(&rows.value, "meta").example, Some(json!({ "kind": "gift" })));
    }

    #[test]
    fn test_composed_rows_use_all_required_lists() {
        let doc = document();
        let resolver = TypeResolver::new(doc.definitions(), &SameDocument);
        let examples = ExampleGenerator::new(doc.definitions(), ExampleOptions::default());
        let rows = resolver
            .definition_rows("Special", &examples, &ConversionConfig::default())
            .unwrap();
        assert!(row(&rows.value, "id").required);
        assert!(row(&rows.value, "flag").required);
        assert!(!row(&rows.value, "code").required);
    }

    #[test]
    fn test_required_flag_follows_owner_list() {
        let doc = document();
        let resolver = TypeResolver::new(doc.definitions(), &SameDocument);
        let examples = ExampleGenerator::new(doc.definitions(), ExampleOptions::default());
        let order = resolver.resolve_reference("Order");
        let object = order.as_object().unwrap();

        let rows = resolver.property_rows(
            "Order",
            object,
            &["meta".to_string()],
            &examples,
            &ConversionConfig::default().without_inline_schema(),
        );
        let meta = row(&rows.value, "meta");
        assert!(meta.required);
        assert!(!row(&rows.value, "id").required);
    }

    #[test]
    fn test_required_object_example_keeps_nested_required() {
        let doc = document();
        let resolver = TypeResolver::new(doc.definitions(), &SameDocument);
        let examples = ExampleGenerator::new(
            doc.definitions(),
            ExampleOptions {
                generate_missing: true,
                include_optional_properties: false,
                ..Default::default()
            },
        );
        let rows = resolver
            .definition_rows("Parcel", &examples, &ConversionConfig::default())
            .unwrap();
        let meta = row(&rows.value, "meta");
        assert!(meta.required);
        assert_eq!(meta.example, Some(json!({ "kind": "string" })));
        assert_eq!(
            examples.definition_example("Parcel"),
            Some(json!({ "meta": { "kind": "string" } }))
        );
    }
}
