//! Geographic primitives.

use std::cmp::Ordering;
use std::fmt;

/// Mean Earth radius used by the haversine formula.
pub const EARTH_RADIUS_KM: f64 = 6371.0;

#[derive(Debug, thiserror::Error, PartialEq)]
pub enum GeoError {
    #[error("latitude {0} is outside [-90, 90]")]
    LatitudeOutOfRange(f64),
    #[error("longitude {0} is outside [-180, 180]")]
    LongitudeOutOfRange(f64),
    #[error("distance {0} must be a finite, non-negative number of kilometres")]
    InvalidDistance(f64),
}

/// A point on the Earth's surface in decimal degrees.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Coordinates {
    latitude: f64,
    longitude: f64,
}

impl Coordinates {
    /// # Errors
    ///
    /// Returns [`GeoError`] if either component is non-finite or out of range.
    pub fn new(latitude: f64, longitude: f64) -> Result<Self, GeoError> {
        if !latitude.is_finite() || !(-90.0..=90.0).contains(&latitude) {
            return Err(GeoError::LatitudeOutOfRange(latitude));
        }
        if !longitude.is_finite() || !(-180.0..=180.0).contains(&longitude) {
            return Err(GeoError::LongitudeOutOfRange(longitude));
        }
        Ok(Self {
            latitude,
            longitude,
        })
    }

    pub fn latitude(&self) -> f64 {
        self.latitude
    }

    pub fn longitude(&self) -> f64 {
        self.longitude
    }

    /// Shifts the point by the given number of degrees, clamping latitude to the poles and
    /// wrapping longitude across the antimeridian.
    pub fn offset(&self, d_lat: f64, d_lon: f64) -> Self {
        let latitude = (self.latitude + d_lat).clamp(-90.0, 90.0);
        let mut longitude = self.longitude + d_lon;
        if longitude > 180.0 {
            longitude -= 360.0;
        } else if longitude < -180.0 {
            longitude += 360.0;
        }
        Self {
            latitude,
            longitude,
        }
    }

    /// Great-circle distance to `other` using the haversine formula.
    pub fn distance_to(&self, other: &Coordinates) -> Distance {
        let lat1 = self.latitude.to_radians();
        let lat2 = other.latitude.to_radians();
        let d_lat = (other.latitude - self.latitude).to_radians();
        let d_lon = (other.longitude - self.longitude).to_radians();

        let a = (d_lat / 2.0).sin().powi(2) + lat1.cos() * lat2.cos() * (d_lon / 2.0).sin().powi(2);
        let c = 2.0 * a.sqrt().atan2((1.0 - a).sqrt());

        Distance(EARTH_RADIUS_KM * c)
    }
}

impl fmt::Display for Coordinates {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:.6}, {:.6}", self.latitude, self.longitude)
    }
}

/// A non-negative, finite distance in kilometres.
///
/// Totally ordered, so it can be used directly as a sort key.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Distance(f64);

impl Distance {
    pub const ZERO: Distance = Distance(0.0);

    /// # Errors
    ///
    /// Returns [`GeoError::InvalidDistance`] for NaN, infinite or negative input.
    pub fn from_km(km: f64) -> Result<Self, GeoError> {
        if !km.is_finite() || km < 0.0 {
            return Err(GeoError::InvalidDistance(km));
        }
        // Normalise -0.0 so equal distances compare equal under total_cmp.
        Ok(Self(km + 0.0))
    }

    pub fn km(&self) -> f64 {
        self.0
    }
}

impl Eq for Distance {}

impl PartialOrd for Distance {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Distance {
    fn cmp(&self, other: &Self) -> Ordering {
        self.0.total_cmp(&other.0)
    }
}

impl fmt::Display for Distance {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:.1} km", self.0)
    }
}
