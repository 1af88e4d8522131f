//! Facility sources.
//!
//! The matcher assumes its catalog is already in memory. A [`FacilitySource`] is how the
//! surrounding service gets it there, from a fixed catalog or generated around the caller.

pub mod nearby;
pub mod static_catalog;

pub use nearby::NearbyFacilitySource;
pub use static_catalog::StaticFacilitySource;

use crate::config::CoreConfig;
use crate::error::EraResult;
use catalog::Facility;
use era_types::Coordinates;

/// Supplies candidate facilities for a caller location.
pub trait FacilitySource: Send + Sync {
    /// Facilities relevant to `origin`. Sources that need a location fall back to their
    /// configured default when `origin` is `None`.
    fn facilities(&self, origin: Option<Coordinates>) -> EraResult<Vec<Facility>>;
}

/// Choose the facility source for `cfg`: the configured catalog file if there is one,
/// otherwise nearby generation around the caller.
///
/// # Errors
///
/// Returns an error if the configured catalog file cannot be loaded.
pub fn facility_source_for(cfg: &CoreConfig) -> EraResult<Box<dyn FacilitySource>> {
    match cfg.catalog_file() {
        Some(path) => Ok(Box::new(StaticFacilitySource::load(path)?)),
        None => Ok(Box::new(NearbyFacilitySource::new(
            cfg.default_location(),
            cfg.ambulance_speed_kmh(),
        ))),
    }
}
