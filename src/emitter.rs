use indexmap::IndexMap;
use tracing::debug;

use crate::converter::{SchemaConverter, doc_comment};
use crate::error::Diagnostic;
use crate::schema::Schema;

/// Output of a generation run: the declarations text plus every non-fatal
/// diagnostic raised while producing it.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Generated {
    pub text: String,
    pub diagnostics: Vec<Diagnostic>,
}

/// Emit one declaration per named schema, in mapping order, separated by a
/// blank line.
pub fn emit(schemas: &IndexMap<String, Schema>) -> Generated {
    let mut converter = SchemaConverter::new();
    let declarations: Vec<String> = schemas
        .iter()
        .map(|(name, schema)| emit_declaration(&mut converter, name, schema))
        .collect();

    Generated {
        text: declarations.join("\n\n"),
        diagnostics: converter.into_diagnostics(),
    }
}

fn emit_declaration(converter: &mut SchemaConverter, name: &str, schema: &Schema) -> String {
    let body = converter.compile_at(schema, name);
    let declaration = if schema.is_object() {
        format!("export interface {name} {body}")
    } else {
        format!("export type {name} = {body}")
    };
    debug!(name, "emitted declaration");

    match doc_comment(schema) {
        Some(comment) => format!("{comment}\n{declaration}"),
        None => declaration,
    }
}
