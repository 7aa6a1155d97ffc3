use std::path::PathBuf;

use thiserror::Error;

pub type Result<T> = std::result::Result<T, ConversionError>;

#[derive(Error, Debug)]
pub enum ConversionError {
    #[error("Failed to read {}: {source}", .path.display())]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Failed to fetch {url}: {source}")]
    Fetch {
        url: String,
        source: Box<ureq::Error>,
    },

    #[error("Request to {url} failed with status code {status}")]
    HttpStatus { url: String, status: u16 },

    #[error("Failed to parse source JSON: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("Source must be an OpenAPI JSON document (missing `openapi` field)")]
    NotOpenApi,

    #[error("`components.schemas` must be an object")]
    InvalidSchemas,

    #[error("Failed to create directory {}: {source}", .path.display())]
    CreateDir {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Failed to write {}: {source}", .path.display())]
    Write {
        path: PathBuf,
        source: std::io::Error,
    },
}

/// Non-fatal problems found while compiling a schema. The affected expression
/// is rendered as `undefined` and generation continues.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum Diagnostic {
    #[error("Unsupported schema at {location}:\n{}", pretty(.schema))]
    UnsupportedSchema {
        location: String,
        schema: serde_json::Value,
    },

    #[error("Malformed reference at {location}: {source}")]
    MalformedReference {
        location: String,
        source: MalformedReference,
    },
}

impl Diagnostic {
    pub fn location(&self) -> &str {
        match self {
            Diagnostic::UnsupportedSchema { location, .. }
            | Diagnostic::MalformedReference { location, .. } => location,
        }
    }
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("`{reference}` does not point into #/components/schemas/")]
pub struct MalformedReference {
    pub reference: String,
}

fn pretty(value: &serde_json::Value) -> String {
    serde_json::to_string_pretty(value).unwrap_or_else(|_| value.to_string())
}
