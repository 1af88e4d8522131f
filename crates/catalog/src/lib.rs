//! Catalog wire/boundary support for ERA.
//!
//! This crate provides **wire models** and **format/translation helpers** for the two
//! externally supplied documents the matcher consumes:
//! - facility catalogs (candidate hospitals with their specialties)
//! - symptom taxonomies (which specialties each symptom requires)
//!
//! Both are YAML documents (JSON is accepted too, being a YAML subset). Parsing is strict:
//! unknown keys, wrong types, out-of-range coordinates and duplicate identifiers are rejected
//! here so that nothing loosely typed reaches the scorer.

pub mod facility;
pub mod taxonomy;

use serde::de::DeserializeOwned;

// Re-export facades
pub use facility::FacilityCatalog;
pub use taxonomy::Taxonomy;

// Re-export public domain-level types
pub use facility::Facility;
pub use taxonomy::SymptomDefinition;

/// Errors returned by the `catalog` boundary crate.
#[derive(Debug, thiserror::Error)]
pub enum CatalogError {
    #[error("invalid input: {0}")]
    InvalidInput(String),

    #[error("invalid YAML: {0}")]
    InvalidYaml(#[from] serde_yaml::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("translation error: {0}")]
    Translation(String),

    #[error("duplicate {kind} id: {id}")]
    DuplicateId { kind: &'static str, id: String },
}

/// Type alias for Results that can fail with a [`CatalogError`].
pub type CatalogResult<T> = Result<T, CatalogError>;

/// Deserialise `yaml_text` into a wire type, reporting the failing path on mismatch.
///
/// `what` names the document in the error message, e.g. `"Facility catalog"`.
pub(crate) fn deserialize_strict<T: DeserializeOwned>(
    yaml_text: &str,
    what: &str,
) -> CatalogResult<T> {
    let deserializer = serde_yaml::Deserializer::from_str(yaml_text);

    match serde_path_to_error::deserialize::<_, T>(deserializer) {
        Ok(parsed) => Ok(parsed),
        Err(err) => {
            let path = err.path().to_string();
            let source = err.into_inner();
            let path = if path.is_empty() || path == "." {
                "<root>"
            } else {
                path.as_str()
            };
            Err(CatalogError::Translation(format!(
                "{what} schema mismatch at {path}: {source}"
            )))
        }
    }
}
