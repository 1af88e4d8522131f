//! # ERA Core
//!
//! Core business logic for the ERA emergency response assistant.
//!
//! This crate contains the symptom-to-hospital matching pipeline:
//! - Specialty taxonomy: which specialties each reported symptom requires
//! - Match scoring and stable ranking of candidate facilities
//! - Dispatch notification for the facility the operator selects
//! - Facility sources (fixed catalog, or hospitals generated around the caller)
//!
//! Scoring and ranking are pure: no I/O, no shared mutable state, safe to call from any
//! number of request handlers at once.
//!
//! **No API concerns**: HTTP servers and request/response types belong in `api-rest` and
//! `api-shared`.

pub mod config;
pub mod constants;
pub mod defaults;
pub mod dispatch;
pub mod error;
pub mod matcher;
pub mod matching;
pub mod ranking;
pub mod selection;
pub mod sources;
pub mod taxonomy;

#[cfg(test)]
mod test_support;

pub use config::CoreConfig;
pub use constants::{DEFAULT_RANK_LIMIT, DEFAULT_REST_ADDR};
pub use dispatch::{
    dispatch, dispatch_message, DispatchNotifier, DispatchRecord, RecordingDispatchNotifier,
    TracingDispatchNotifier,
};
pub use error::{EraError, EraResult};
pub use matcher::HospitalMatcher;
pub use matching::{MatchScorer, ScoredFacility};
pub use ranking::{MatchOutcome, Ranker};
pub use selection::SymptomSelection;
pub use sources::{facility_source_for, FacilitySource, NearbyFacilitySource, StaticFacilitySource};
pub use taxonomy::SpecialtyTaxonomy;

// Boundary and value types used throughout the public API.
pub use catalog::{Facility, SymptomDefinition};
pub use era_types::{Coordinates, Distance, NonEmptyText, Specialty, Symptom};
