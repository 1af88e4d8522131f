//! Core runtime configuration.
//!
//! This module defines configuration that should be resolved once at process startup and then
//! passed into core services. Binaries read environment variables and hand the raw values to
//! the parsing helpers here; request handling never touches the environment.

use crate::constants::{
    DEFAULT_AMBULANCE_SPEED_KMH, DEFAULT_LATITUDE, DEFAULT_LONGITUDE, DEFAULT_RANK_LIMIT,
};
use crate::error::{EraError, EraResult};
use crate::taxonomy::SpecialtyTaxonomy;
use era_types::Coordinates;
use std::path::{Path, PathBuf};
use std::sync::Arc;

/// Core configuration resolved at startup.
#[derive(Clone, Debug)]
pub struct CoreConfig {
    rank_limit: usize,
    taxonomy: Arc<SpecialtyTaxonomy>,
    default_location: Coordinates,
    ambulance_speed_kmh: f64,
    catalog_file: Option<PathBuf>,
}

impl CoreConfig {
    /// Create a new `CoreConfig`.
    ///
    /// # Errors
    ///
    /// Returns [`EraError::InvalidConfig`] if `rank_limit` is zero or the ambulance speed is not
    /// a positive, finite number.
    pub fn new(
        rank_limit: usize,
        taxonomy: Arc<SpecialtyTaxonomy>,
        default_location: Coordinates,
        ambulance_speed_kmh: f64,
        catalog_file: Option<PathBuf>,
    ) -> EraResult<Self> {
        if rank_limit == 0 {
            return Err(EraError::InvalidConfig(
                "rank_limit must be greater than zero".into(),
            ));
        }
        if !ambulance_speed_kmh.is_finite() || ambulance_speed_kmh <= 0.0 {
            return Err(EraError::InvalidConfig(format!(
                "ambulance speed must be a positive number of km/h, got {ambulance_speed_kmh}"
            )));
        }

        Ok(Self {
            rank_limit,
            taxonomy,
            default_location,
            ambulance_speed_kmh,
            catalog_file,
        })
    }

    /// Configuration with every default: standard taxonomy, no catalog file, San Francisco as
    /// the fallback location.
    ///
    /// # Errors
    ///
    /// Only fails if the built-in taxonomy is malformed.
    pub fn standard() -> EraResult<Self> {
        Self::new(
            DEFAULT_RANK_LIMIT,
            Arc::new(SpecialtyTaxonomy::standard()?),
            Coordinates::new(DEFAULT_LATITUDE, DEFAULT_LONGITUDE)?,
            DEFAULT_AMBULANCE_SPEED_KMH,
            None,
        )
    }

    pub fn rank_limit(&self) -> usize {
        self.rank_limit
    }

    pub fn taxonomy(&self) -> Arc<SpecialtyTaxonomy> {
        self.taxonomy.clone()
    }

    pub fn default_location(&self) -> Coordinates {
        self.default_location
    }

    pub fn ambulance_speed_kmh(&self) -> f64 {
        self.ambulance_speed_kmh
    }

    pub fn catalog_file(&self) -> Option<&Path> {
        self.catalog_file.as_deref()
    }
}

fn non_blank(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

/// Parse the rank limit from an optional string value.
///
/// If `value` is `None` or empty/whitespace, returns [`DEFAULT_RANK_LIMIT`].
///
/// # Errors
///
/// Returns [`EraError::InvalidConfig`] if the value is not a positive integer.
pub fn rank_limit_from_env_value(value: Option<String>) -> EraResult<usize> {
    match non_blank(value) {
        None => Ok(DEFAULT_RANK_LIMIT),
        Some(v) => match v.parse::<usize>() {
            Ok(0) | Err(_) => Err(EraError::InvalidConfig(format!(
                "rank limit must be a positive integer, got '{v}'"
            ))),
            Ok(limit) => Ok(limit),
        },
    }
}

/// Parse the ambulance speed in km/h, defaulting to [`DEFAULT_AMBULANCE_SPEED_KMH`].
///
/// # Errors
///
/// Returns [`EraError::InvalidConfig`] if the value is not a number. Range checks happen in
/// [`CoreConfig::new`].
pub fn ambulance_speed_from_env_value(value: Option<String>) -> EraResult<f64> {
    match non_blank(value) {
        None => Ok(DEFAULT_AMBULANCE_SPEED_KMH),
        Some(v) => v.parse::<f64>().map_err(|_| {
            EraError::InvalidConfig(format!("ambulance speed must be a number, got '{v}'"))
        }),
    }
}

/// Parse the fallback caller location.
///
/// Both values must be set together; with neither set the San Francisco default applies.
///
/// # Errors
///
/// Returns [`EraError::InvalidConfig`] if only one value is set or either does not parse, and
/// [`EraError::Geo`] if the coordinates are out of range.
pub fn default_location_from_env_values(
    latitude: Option<String>,
    longitude: Option<String>,
) -> EraResult<Coordinates> {
    let parse = |name: &str, v: String| {
        v.parse::<f64>()
            .map_err(|_| EraError::InvalidConfig(format!("{name} must be a number, got '{v}'")))
    };

    match (non_blank(latitude), non_blank(longitude)) {
        (None, None) => Ok(Coordinates::new(DEFAULT_LATITUDE, DEFAULT_LONGITUDE)?),
        (Some(lat), Some(lon)) => Ok(Coordinates::new(
            parse("latitude", lat)?,
            parse("longitude", lon)?,
        )?),
        _ => Err(EraError::InvalidConfig(
            "default latitude and longitude must be set together".into(),
        )),
    }
}

/// Resolve the taxonomy: the file at `override_file` if given, otherwise the standard table.
///
/// # Errors
///
/// Returns an error if the override file cannot be loaded.
pub fn resolve_taxonomy(override_file: Option<PathBuf>) -> EraResult<SpecialtyTaxonomy> {
    match override_file {
        Some(path) => SpecialtyTaxonomy::load(&path),
        None => SpecialtyTaxonomy::standard(),
    }
}

/// Check that an optional catalog file exists before the service starts.
///
/// # Errors
///
/// Returns [`EraError::InvalidConfig`] if the path is set but is not a file.
pub fn validate_catalog_file(path: Option<PathBuf>) -> EraResult<Option<PathBuf>> {
    match path {
        Some(p) if !p.is_file() => Err(EraError::InvalidConfig(format!(
            "catalog file does not exist: {}",
            p.display()
        ))),
        other => Ok(other),
    }
}
