pub mod converter;
pub mod emitter;
pub mod error;
pub mod output;
pub mod reference;
pub mod schema;
pub mod source;

pub use converter::SchemaConverter;
pub use emitter::{Generated, emit};
pub use error::{ConversionError, Diagnostic, MalformedReference, Result};
pub use reference::{Reference, resolve};
pub use schema::{IntegerFormat, OpenApiDocument, Schema, SchemaKind, SchemaShape};
pub use source::{Source, SourceOptions};

/// Convert an OpenAPI JSON document to TypeScript declarations
pub fn convert_document(openapi_json: &str) -> Result<Generated> {
    let document = OpenApiDocument::parse(openapi_json)?;
    Ok(emit(&document.schemas))
}
