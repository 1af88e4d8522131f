//! Symptom → specialty requirements.
//!
//! A [`SpecialtyTaxonomy`] is built once (from the built-in table or a taxonomy file) and then
//! shared read-only, typically behind an `Arc`, by every scorer in the process.

use crate::defaults::STANDARD_TAXONOMY_YAML;
use crate::error::{EraError, EraResult};
use catalog::{SymptomDefinition, Taxonomy};
use era_types::{Specialty, Symptom};
use std::collections::{BTreeSet, HashMap};
use std::path::Path;

static NO_SPECIALTIES: BTreeSet<Specialty> = BTreeSet::new();

/// Immutable lookup from symptom to the specialties it requires.
#[derive(Clone, Debug)]
pub struct SpecialtyTaxonomy {
    definitions: Vec<SymptomDefinition>,
    index: HashMap<Symptom, usize>,
}

impl SpecialtyTaxonomy {
    /// Build a taxonomy from definitions, keeping their order for display.
    ///
    /// # Errors
    ///
    /// Returns [`EraError::InvalidConfig`] if a symptom is defined twice.
    pub fn new(definitions: Vec<SymptomDefinition>) -> EraResult<Self> {
        let mut index = HashMap::with_capacity(definitions.len());
        for (i, def) in definitions.iter().enumerate() {
            if index.insert(def.symptom.clone(), i).is_some() {
                return Err(EraError::InvalidConfig(format!(
                    "symptom '{}' is defined more than once",
                    def.symptom
                )));
            }
        }
        Ok(Self { definitions, index })
    }

    /// The built-in taxonomy covering the ten standard emergency symptoms.
    ///
    /// # Errors
    ///
    /// Only fails if the built-in table itself is malformed.
    pub fn standard() -> EraResult<Self> {
        Self::new(Taxonomy::parse(STANDARD_TAXONOMY_YAML)?)
    }

    /// Load a taxonomy file (YAML or JSON).
    ///
    /// # Errors
    ///
    /// Returns [`EraError::Catalog`] if the file cannot be read or parsed.
    pub fn load(path: &Path) -> EraResult<Self> {
        let definitions = Taxonomy::load(path)?;
        tracing::info!(
            "loaded {} symptom definitions from {}",
            definitions.len(),
            path.display()
        );
        Self::new(definitions)
    }

    /// Specialties required by `symptom`. Unknown symptoms require nothing.
    pub fn required_specialties(&self, symptom: &Symptom) -> &BTreeSet<Specialty> {
        self.definition(symptom)
            .map(|d| &d.specialties)
            .unwrap_or(&NO_SPECIALTIES)
    }

    pub fn definition(&self, symptom: &Symptom) -> Option<&SymptomDefinition> {
        self.index.get(symptom).map(|&i| &self.definitions[i])
    }

    pub fn is_known(&self, symptom: &Symptom) -> bool {
        self.index.contains_key(symptom)
    }

    /// All definitions in their configured order.
    pub fn definitions(&self) -> &[SymptomDefinition] {
        &self.definitions
    }

    pub fn len(&self) -> usize {
        self.definitions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.definitions.is_empty()
    }
}
