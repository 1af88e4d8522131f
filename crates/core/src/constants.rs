//! Constants used throughout the ERA core crate.

/// Number of ranked facilities returned when no limit is configured.
pub const DEFAULT_RANK_LIMIT: usize = 3;

/// Fallback caller latitude when no location is available (San Francisco).
pub const DEFAULT_LATITUDE: f64 = 37.7749;

/// Fallback caller longitude when no location is available (San Francisco).
pub const DEFAULT_LONGITUDE: f64 = -122.4194;

/// Average ambulance speed used to estimate arrival times.
pub const DEFAULT_AMBULANCE_SPEED_KMH: f64 = 40.0;

/// Emergency line attached to generated nearby facilities.
pub const DEFAULT_EMERGENCY_NUMBER: &str = "911";

/// Default REST listen address.
pub const DEFAULT_REST_ADDR: &str = "0.0.0.0:3000";
