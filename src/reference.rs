use crate::error::MalformedReference;

/// Prefix shared by every reference to a component schema.
pub const SCHEMA_REF_PREFIX: &str = "#/components/schemas/";

/// A `$ref` pointer as written in the source document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Reference(String);

impl Reference {
    pub fn new(pointer: impl Into<String>) -> Self {
        Self(pointer.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Local name of the referenced schema.
    pub fn name(&self) -> Result<&str, MalformedReference> {
        resolve(&self.0)
    }
}

/// Strip [`SCHEMA_REF_PREFIX`] from a reference, yielding the declared name.
pub fn resolve(reference: &str) -> Result<&str, MalformedReference> {
    match reference.strip_prefix(SCHEMA_REF_PREFIX) {
        Some(name) if !name.is_empty() => Ok(name),
        _ => Err(MalformedReference {
            reference: reference.to_string(),
        }),
    }
}
