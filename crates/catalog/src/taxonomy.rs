//! Symptom taxonomy wire models and translation helpers.
//!
//! A taxonomy document lists every symptom the caller may report, with its display label,
//! a coarse category and the specialties it requires:
//!
//! ```yaml
//! symptoms:
//!   - id: chest_pain
//!     label: Chest Pain
//!     category: cardiac
//!     specialties: [cardiology, emergency]
//! ```

use crate::{deserialize_strict, CatalogError, CatalogResult};
use era_types::{NonEmptyText, Specialty, Symptom};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeSet, HashSet};
use std::path::Path;

/// One entry of a symptom taxonomy.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SymptomDefinition {
    pub symptom: Symptom,
    pub label: NonEmptyText,
    pub category: NonEmptyText,
    /// Specialties this symptom requires. May be empty (e.g. `severe_pain`).
    pub specialties: BTreeSet<Specialty>,
}

/// Taxonomy document operations.
pub struct Taxonomy;

impl Taxonomy {
    /// Parse a symptom taxonomy from YAML (or JSON) text.
    ///
    /// Definitions are returned in document order.
    ///
    /// # Errors
    ///
    /// Returns [`CatalogError`] on schema mismatch or when a symptom id appears twice.
    pub fn parse(yaml_text: &str) -> CatalogResult<Vec<SymptomDefinition>> {
        let wire: TaxonomyWire = deserialize_strict(yaml_text, "Symptom taxonomy")?;

        let mut seen = HashSet::new();
        let mut definitions = Vec::with_capacity(wire.symptoms.len());
        for s in wire.symptoms {
            if !seen.insert(s.id.clone()) {
                return Err(CatalogError::DuplicateId {
                    kind: "symptom",
                    id: s.id.to_string(),
                });
            }
            definitions.push(SymptomDefinition {
                symptom: s.id,
                label: s.label,
                category: s.category,
                specialties: s.specialties.into_iter().collect(),
            });
        }

        Ok(definitions)
    }

    /// Render definitions as YAML text.
    ///
    /// # Errors
    ///
    /// Returns [`CatalogError::Translation`] if serialisation fails.
    pub fn render(definitions: &[SymptomDefinition]) -> CatalogResult<String> {
        let wire = TaxonomyWire {
            symptoms: definitions
                .iter()
                .map(|d| SymptomWire {
                    id: d.symptom.clone(),
                    label: d.label.clone(),
                    category: d.category.clone(),
                    specialties: d.specialties.iter().cloned().collect(),
                })
                .collect(),
        };
        serde_yaml::to_string(&wire).map_err(|e| {
            CatalogError::Translation(format!("Failed to serialize symptom taxonomy: {e}"))
        })
    }

    /// Read and parse a taxonomy file.
    ///
    /// # Errors
    ///
    /// Returns [`CatalogError::Io`] if the file cannot be read, otherwise as [`Self::parse`].
    pub fn load(path: &Path) -> CatalogResult<Vec<SymptomDefinition>> {
        let text = std::fs::read_to_string(path)?;
        Self::parse(&text)
    }
}

#[derive(Clone, Debug, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
struct TaxonomyWire {
    symptoms: Vec<SymptomWire>,
}

#[derive(Clone, Debug, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
struct SymptomWire {
    id: Symptom,
    label: NonEmptyText,
    category: NonEmptyText,
    #[serde(default)]
    specialties: Vec<Specialty>,
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = r#"symptoms:
  - id: chest_pain
    label: Chest Pain
    category: cardiac
    specialties: [cardiology, emergency]
  - id: severe_pain
    label: Severe Pain
    category: general
"#;

    #[test]
    fn parses_in_document_order() {
        let defs = Taxonomy::parse(SAMPLE).expect("parse taxonomy");
        assert_eq!(defs.len(), 2);
        assert_eq!(defs[0].symptom.as_str(), "chest_pain");
        assert_eq!(defs[0].specialties.len(), 2);
        assert_eq!(defs[1].symptom.as_str(), "severe_pain");
        assert!(defs[1].specialties.is_empty());
    }

    #[test]
    fn render_then_parse_preserves_definitions() {
        let defs = Taxonomy::parse(SAMPLE).expect("parse taxonomy");
        let rendered = Taxonomy::render(&defs).expect("render taxonomy");
        assert_eq!(Taxonomy::parse(&rendered).expect("reparse taxonomy"), defs);
    }

    #[test]
    fn rejects_duplicate_symptoms() {
        let input = SAMPLE.replace("id: severe_pain", "id: Chest Pain");
        match Taxonomy::parse(&input) {
            Err(CatalogError::DuplicateId { kind, id }) => {
                assert_eq!(kind, "symptom");
                assert_eq!(id, "chest_pain");
            }
            other => panic!("expected DuplicateId, got {other:?}"),
        }
    }

    #[test]
    fn rejects_malformed_symptom_id() {
        let input = SAMPLE.replace("id: chest_pain", "id: \"chest/pain\"");
        let err = Taxonomy::parse(&input).expect_err("should reject id");
        match err {
            CatalogError::Translation(msg) => assert!(msg.contains("symptoms[0].id"), "{msg}"),
            other => panic!("expected Translation error, got {other:?}"),
        }
    }

    #[test]
    fn missing_root_key_reports_root() {
        let err = Taxonomy::parse("facilities: []\n").expect_err("wrong document");
        assert!(matches!(err, CatalogError::Translation(_)));
    }
}
