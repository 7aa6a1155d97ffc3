use indexmap::IndexMap;
use serde_json::Value;

use crate::error::Diagnostic;
use crate::reference::Reference;
use crate::schema::{IntegerFormat, Schema, SchemaKind, SchemaShape};

/// Rendered in place of any expression the converter could not produce.
pub const UNDEFINED: &str = "undefined";

/// Compiles schema nodes to TypeScript type expressions, collecting
/// diagnostics for shapes it cannot map.
#[derive(Debug, Clone, Default)]
pub struct SchemaConverter {
    diagnostics: Vec<Diagnostic>,
}

impl SchemaConverter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn diagnostics(&self) -> &[Diagnostic] {
        &self.diagnostics
    }

    pub fn into_diagnostics(self) -> Vec<Diagnostic> {
        self.diagnostics
    }

    pub fn compile(&mut self, schema: &Schema) -> String {
        self.compile_at(schema, "#")
    }

    /// Like [`compile`](Self::compile), with diagnostics located under `location`.
    pub fn compile_at(&mut self, schema: &Schema, location: &str) -> String {
        match &schema.shape {
            SchemaShape::Composed(members) => members
                .iter()
                .map(|member| self.resolve_ref(member, location))
                .collect::<Vec<_>>()
                .join(" & "),
            SchemaShape::Direct(kind) => self.compile_kind(kind, location),
        }
    }

    fn compile_kind(&mut self, kind: &SchemaKind, location: &str) -> String {
        match kind {
            SchemaKind::Integer {
                format,
                enumeration,
            } => Self::convert_integer(*format, enumeration.as_deref()),
            SchemaKind::Number => "number".to_string(),
            SchemaKind::Boolean => "boolean".to_string(),
            SchemaKind::String => "string".to_string(),
            SchemaKind::Object { properties } => self.convert_object(properties, location),
            SchemaKind::Array { items } => {
                let item_type = self.compile_at(items, &format!("{location}.items"));
                if needs_parens(items) {
                    format!("({item_type})[]")
                } else {
                    format!("{item_type}[]")
                }
            }
            SchemaKind::Reference(reference) => self.resolve_ref(reference, location),
            SchemaKind::Unsupported(value) => {
                self.diagnostics.push(Diagnostic::UnsupportedSchema {
                    location: location.to_string(),
                    schema: value.clone(),
                });
                UNDEFINED.to_string()
            }
        }
    }

    // int64 does not fit a JS number, so it travels as text.
    fn convert_integer(format: Option<IntegerFormat>, enumeration: Option<&[Value]>) -> String {
        match (format, enumeration) {
            (Some(IntegerFormat::Int64), _) => "string".to_string(),
            (_, Some([])) => "never".to_string(),
            (_, Some(values)) => values
                .iter()
                .map(Value::to_string)
                .collect::<Vec<_>>()
                .join(" | "),
            (_, None) => "number".to_string(),
        }
    }

    fn convert_object(&mut self, properties: &IndexMap<String, Schema>, location: &str) -> String {
        let mut output = String::from("{");

        for (name, prop_schema) in properties {
            let key = property_key(name);
            let prop_location = format!("{location}.properties.{key}");
            let prop_type = self.compile_at(prop_schema, &prop_location);

            if let Some(comment) = doc_comment(prop_schema) {
                output.push_str(&comment);
                output.push(' ');
            }
            output.push_str(&format!("{key}: {prop_type}; "));
        }

        output.push('}');
        output
    }

    fn resolve_ref(&mut self, reference: &Reference, location: &str) -> String {
        match reference.name() {
            Ok(name) => name.to_string(),
            Err(source) => {
                self.diagnostics.push(Diagnostic::MalformedReference {
                    location: location.to_string(),
                    source,
                });
                UNDEFINED.to_string()
            }
        }
    }
}

/// `/** description */` for a described schema, `None` otherwise.
pub fn doc_comment(schema: &Schema) -> Option<String> {
    schema
        .description
        .as_deref()
        .map(|desc| format!("/** {} */", desc.replace("*/", "*\\/")))
}

/// Identifiers are emitted bare, everything else as a quoted key.
fn property_key(name: &str) -> String {
    let mut chars = name.chars();
    let is_identifier = chars
        .next()
        .is_some_and(|first| first.is_alphabetic() || first == '_' || first == '$')
        && chars.all(|c| c.is_alphanumeric() || c == '_' || c == '$');

    if is_identifier {
        name.to_string()
    } else {
        Value::String(name.to_string()).to_string()
    }
}

/// Unions and intersections bind looser than the array suffix.
fn needs_parens(schema: &Schema) -> bool {
    match &schema.shape {
        SchemaShape::Composed(members) => members.len() > 1,
        SchemaShape::Direct(SchemaKind::Integer {
            format,
            enumeration: Some(values),
        }) => *format != Some(IntegerFormat::Int64) && values.len() > 1,
        SchemaShape::Direct(_) => false,
    }
}
