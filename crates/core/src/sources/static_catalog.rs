use super::FacilitySource;
use crate::defaults::STANDARD_FACILITIES_YAML;
use crate::error::EraResult;
use catalog::{Facility, FacilityCatalog};
use era_types::Coordinates;
use std::path::Path;

/// A fixed list of facilities, returned as-is for every location.
#[derive(Clone, Debug)]
pub struct StaticFacilitySource {
    facilities: Vec<Facility>,
}

impl StaticFacilitySource {
    pub fn new(facilities: Vec<Facility>) -> Self {
        Self { facilities }
    }

    /// The three built-in facilities.
    ///
    /// # Errors
    ///
    /// Only fails if the built-in catalog itself is malformed.
    pub fn standard() -> EraResult<Self> {
        Ok(Self::new(FacilityCatalog::parse(STANDARD_FACILITIES_YAML)?))
    }

    /// # Errors
    ///
    /// Returns [`crate::EraError::Catalog`] if the file cannot be read or parsed.
    pub fn load(path: &Path) -> EraResult<Self> {
        let facilities = FacilityCatalog::load(path)?;
        tracing::info!(
            "loaded {} facilities from {}",
            facilities.len(),
            path.display()
        );
        Ok(Self::new(facilities))
    }
}

impl FacilitySource for StaticFacilitySource {
    fn facilities(&self, _origin: Option<Coordinates>) -> EraResult<Vec<Facility>> {
        Ok(self.facilities.clone())
    }
}
