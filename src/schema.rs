use indexmap::IndexMap;
use serde::{Deserialize, Deserializer};
use serde_json::Value;

use crate::error::{ConversionError, Result};
use crate::reference::Reference;

/// One node of the `components.schemas` graph.
#[derive(Debug, Clone, PartialEq)]
pub struct Schema {
    pub description: Option<String>,
    pub shape: SchemaShape,
}

/// `allOf` takes precedence over `type`, so a node is either a composition
/// or a directly typed schema, never both.
#[derive(Debug, Clone, PartialEq)]
pub enum SchemaShape {
    Composed(Vec<Reference>),
    Direct(SchemaKind),
}

#[derive(Debug, Clone, PartialEq)]
pub enum SchemaKind {
    Integer {
        format: Option<IntegerFormat>,
        enumeration: Option<Vec<Value>>,
    },
    Number,
    Boolean,
    String,
    Object {
        properties: IndexMap<String, Schema>,
    },
    Array {
        items: Box<Schema>,
    },
    Reference(Reference),
    /// Anything the converter has no rule for, kept verbatim for diagnostics.
    Unsupported(Value),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IntegerFormat {
    Int32,
    Int64,
}

impl IntegerFormat {
    pub fn parse(format: &str) -> Option<Self> {
        match format {
            "int32" => Some(Self::Int32),
            "int64" => Some(Self::Int64),
            _ => None,
        }
    }
}

impl Schema {
    pub fn new(kind: SchemaKind) -> Self {
        Self {
            description: None,
            shape: SchemaShape::Direct(kind),
        }
    }

    pub fn composed(members: Vec<Reference>) -> Self {
        Self {
            description: None,
            shape: SchemaShape::Composed(members),
        }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    pub fn is_object(&self) -> bool {
        matches!(self.shape, SchemaShape::Direct(SchemaKind::Object { .. }))
    }

    /// Build a schema node from raw JSON. Never fails: shapes without a
    /// mapping rule become [`SchemaKind::Unsupported`].
    pub fn from_value(value: &Value) -> Self {
        let Value::Object(map) = value else {
            return Self::new(SchemaKind::Unsupported(value.clone()));
        };

        let description = map
            .get("description")
            .and_then(Value::as_str)
            .map(str::to_owned);

        let shape = match map.get("allOf") {
            Some(all_of) => match composition_members(all_of) {
                Some(members) => SchemaShape::Composed(members),
                None => SchemaShape::Direct(SchemaKind::Unsupported(value.clone())),
            },
            None => SchemaShape::Direct(Self::kind_from_map(map, value)),
        };

        Self { description, shape }
    }

    fn kind_from_map(map: &serde_json::Map<String, Value>, value: &Value) -> SchemaKind {
        if let Some(pointer) = map.get("$ref").and_then(Value::as_str) {
            return SchemaKind::Reference(Reference::new(pointer));
        }

        match map.get("type").and_then(Value::as_str) {
            Some("integer") => SchemaKind::Integer {
                format: map
                    .get("format")
                    .and_then(Value::as_str)
                    .and_then(IntegerFormat::parse),
                enumeration: map.get("enum").and_then(Value::as_array).cloned(),
            },
            Some("number") => SchemaKind::Number,
            Some("boolean") => SchemaKind::Boolean,
            Some("string") => SchemaKind::String,
            Some("object") => SchemaKind::Object {
                properties: map
                    .get("properties")
                    .and_then(Value::as_object)
                    .map(|props| {
                        props
                            .iter()
                            .map(|(name, prop)| (name.clone(), Schema::from_value(prop)))
                            .collect()
                    })
                    .unwrap_or_default(),
            },
            Some("array") => match map.get("items") {
                Some(items) => SchemaKind::Array {
                    items: Box::new(Schema::from_value(items)),
                },
                None => SchemaKind::Unsupported(value.clone()),
            },
            _ => SchemaKind::Unsupported(value.clone()),
        }
    }
}

/// `allOf` members must all be `$ref` objects.
fn composition_members(all_of: &Value) -> Option<Vec<Reference>> {
    all_of
        .as_array()?
        .iter()
        .map(|member| member.get("$ref").and_then(Value::as_str).map(Reference::new))
        .collect()
}

impl<'de> Deserialize<'de> for Schema {
    fn deserialize<D>(deserializer: D) -> std::result::Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let value = Value::deserialize(deserializer)?;
        Ok(Schema::from_value(&value))
    }
}

/// The parts of an OpenAPI document the generator consumes.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct OpenApiDocument {
    pub schemas: IndexMap<String, Schema>,
}

impl OpenApiDocument {
    pub fn parse(source: &str) -> Result<Self> {
        let root: Value = serde_json::from_str(source)?;
        Self::from_value(&root)
    }

    pub fn from_value(root: &Value) -> Result<Self> {
        if root.get("openapi").is_none() {
            return Err(ConversionError::NotOpenApi);
        }

        let schemas = match root.pointer("/components/schemas") {
            None => IndexMap::new(),
            Some(entries @ Value::Object(_)) => IndexMap::<String, Schema>::deserialize(entries)?,
            Some(_) => return Err(ConversionError::InvalidSchemas),
        };

        Ok(Self { schemas })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn all_of_wins_over_type() {
        let schema = Schema::from_value(&json!({
            "type": "object",
            "allOf": [{ "$ref": "#/components/schemas/A" }],
            "properties": { "id": { "type": "integer" } }
        }));
        assert_eq!(
            schema.shape,
            SchemaShape::Composed(vec![Reference::new("#/components/schemas/A")])
        );
        assert!(!schema.is_object());
    }

    #[test]
    fn inline_all_of_member_is_unsupported() {
        let schema = Schema::from_value(&json!({ "allOf": [{ "type": "string" }] }));
        assert!(matches!(
            schema.shape,
            SchemaShape::Direct(SchemaKind::Unsupported(_))
        ));
    }

    #[test]
    fn properties_keep_source_order() {
        let schema: Schema = serde_json::from_str(
            r#"{"type":"object","properties":{"zeta":{"type":"string"},"alpha":{"type":"number"}}}"#,
        )
        .unwrap();
        let SchemaShape::Direct(SchemaKind::Object { properties }) = schema.shape else {
            panic!("expected object");
        };
        let names: Vec<_> = properties.keys().map(String::as_str).collect();
        assert_eq!(names, ["zeta", "alpha"]);
    }

    #[test]
    fn unknown_integer_format_is_ignored() {
        let schema = Schema::from_value(&json!({ "type": "integer", "format": "int16" }));
        assert_eq!(
            schema.shape,
            SchemaShape::Direct(SchemaKind::Integer {
                format: None,
                enumeration: None
            })
        );
    }

    #[test]
    fn array_without_items_is_unsupported() {
        let schema = Schema::from_value(&json!({ "type": "array" }));
        assert!(matches!(
            schema.shape,
            SchemaShape::Direct(SchemaKind::Unsupported(_))
        ));
    }

    #[test]
    fn document_schemas_keep_source_order() {
        let doc = OpenApiDocument::parse(
            r##"{"openapi":"3.0.0","components":{"schemas":{"Zebra":{"type":"string"},"Ant":{"$ref":"#/components/schemas/Zebra"}}}}"##,
        )
        .unwrap();
        let names: Vec<_> = doc.schemas.keys().map(String::as_str).collect();
        assert_eq!(names, ["Zebra", "Ant"]);
        assert_eq!(
            doc.schemas["Ant"].shape,
            SchemaShape::Direct(SchemaKind::Reference(Reference::new(
                "#/components/schemas/Zebra"
            )))
        );
    }

    #[test]
    fn document_requires_openapi_marker() {
        let err = OpenApiDocument::parse(r#"{"swagger":"2.0"}"#).unwrap_err();
        assert!(matches!(err, ConversionError::NotOpenApi));
    }

    #[test]
    fn document_without_components_is_empty() {
        let doc = OpenApiDocument::parse(r#"{"openapi":"3.0.0"}"#).unwrap();
        assert!(doc.schemas.is_empty());
    }

    #[test]
    fn document_rejects_non_object_schemas() {
        let err = OpenApiDocument::parse(r#"{"openapi":"3.0.0","components":{"schemas":[]}}"#)
            .unwrap_err();
        assert!(matches!(err, ConversionError::InvalidSchemas));
    }
}
