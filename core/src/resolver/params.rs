//! Parameter, response and definition typing.
//!
//! Each entry point returns the resolved type together with the inline
//! definitions hoisted out of it when inline schemas are enabled.

use crate::config::ConversionConfig;
use crate::oas::operation::{ParameterLocation, ParameterNode, PathOperation};
use crate::resolver::inline::{hoist_inline_type, Resolved};
use crate::resolver::TypeResolver;
use crate::types::{CollectionFormat, EnumType, ObjectType, PrimitiveKind, RefType, Type};

/// Label used in the display name of hoisted response types.
pub const RESPONSE_LABEL: &str = "Response";

/// Suffix of the unique name of hoisted non-object definitions.
pub const INLINE_SUFFIX: &str = "inline";

impl TypeResolver<'_> {
    /// Type of `parameter` of `operation`.
    ///
    /// Inline object types are hoisted under the parameter name with the
    /// unique name `"<operation id> <parameter name>"`. With flat bodies an
    /// object type is left in place.
    pub fn parameter_type(
        &self,
        operation: &PathOperation,
        parameter: &ParameterNode,
        config: &ConversionConfig,
    ) -> Resolved<Type> {
        let ty = self.bare_parameter_type(parameter);
        if !config.inline_schema_enabled {
            return Resolved::plain(ty);
        }
        if config.flat_body_enabled && matches!(ty, Type::Object(_)) {
            return Resolved::plain(ty);
        }
        let unique_name = format!("{} {}", operation.id(), parameter.name);
        hoist_inline_type(ty, &parameter.name, &unique_name)
    }

    fn bare_parameter_type(&self, parameter: &ParameterNode) -> Type {
        if let Some(reference) = &parameter.reference {
            let name = self.definitions.reference_name(reference);
            return Type::Ref(RefType::new(
                self.links.resolve(&name),
                ObjectType::named(name).into(),
            ));
        }

        let Some(schema) = &parameter.schema else {
            let kind = if parameter.is_body() {
                PrimitiveKind::String
            } else {
                PrimitiveKind::Untyped
            };
            let mut ty = Type::basic(kind, None);
            ty.set_name(Some(parameter.name.clone()));
            return ty;
        };

        if parameter.is_body() {
            return self.resolve_schema(schema);
        }

        match self.resolve_schema(schema) {
            Type::Enum(e) => Type::Enum(EnumType {
                name: Some(parameter.name.clone()),
                ..e
            }),
            Type::Array(mut array) => {
                array.collection_format = parameter_collection_format(parameter);
                Type::Array(array)
            }
            other => other,
        }
    }

    /// Type of the response `code` of `operation`, from its first media type.
    /// `None` when the response carries no schema.
    ///
    /// Inline objects are hoisted as `"Response <code>"` with the unique name
    /// `"<operation id> Response <code>"`.
    pub fn response_type(
        &self,
        operation: &PathOperation,
        code: &str,
        config: &ConversionConfig,
    ) -> Option<Resolved<Type>> {
        let response = operation.responses().get(code)?;
        let schema = response.first_media()?.schema.as_ref()?;
        let ty = self.resolve_schema(schema);
        if !config.inline_schema_enabled {
            return Some(Resolved::plain(ty));
        }
        let name = format!("{} {}", RESPONSE_LABEL, code);
        let unique_name = format!("{} {}", operation.id(), name);
        Some(hoist_inline_type(ty, &name, &unique_name))
    }

    /// Type of the named definition with references unwrapped.
    ///
    /// A non-object definition is hoisted under its own name with the unique
    /// name `"<definition> inline"`.
    pub fn definition_type(&self, name: &str, config: &ConversionConfig) -> Resolved<Type> {
        let ty = self.resolve_reference(name).into_resolved();
        if matches!(ty, Type::Object(_)) || !config.inline_schema_enabled {
            return Resolved::plain(ty);
        }
        hoist_inline_type(ty, name, &format!("{} {}", name, INLINE_SUFFIX))
    }
}

/// Swagger 2.0 `collectionFormat` when present, else derived from
/// `style`/`explode` with the location's default style.
fn parameter_collection_format(parameter: &ParameterNode) -> Option<CollectionFormat> {
    if let Some(format) = parameter
        .collection_format
        .as_deref()
        .and_then(CollectionFormat::from_swagger2)
    {
        return Some(format);
    }
    let style = match (&parameter.style, parameter.location()) {
        (Some(style), _) => style.as_str(),
        (None, ParameterLocation::Query | ParameterLocation::Cookie) => "form",
        (None, _) => "simple",
    };
    CollectionFormat::from_style(style, parameter.explode)
}
