//! Nearby hospital generation.
//!
//! Produces a small set of named hospitals scattered around the caller, the way the hosted
//! hospital-locator endpoint does for development: each template is placed at a random offset
//! within its jitter window, given a random street number and phone number, and the result is
//! sorted nearest first. Distances are great-circle distances from the caller and arrival times
//! follow from the configured ambulance speed.
//!
//! The random stream is seeded from the caller's location (rounded to about ten metres) mixed
//! with an optional base seed, so repeated requests from the same place see the same hospitals
//! and a dispatch can be matched against the ranking the operator was shown.

use super::FacilitySource;
use crate::constants::DEFAULT_EMERGENCY_NUMBER;
use crate::error::EraResult;
use catalog::Facility;
use era_types::{Coordinates, Distance, NonEmptyText, Specialty};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::collections::BTreeSet;

struct HospitalTemplate {
    name: &'static str,
    street: &'static str,
    /// Width of the random offset window in degrees, centred on the caller.
    jitter_deg: f64,
    kind: &'static str,
    specialties: &'static [&'static str],
}

const TEMPLATES: [HospitalTemplate; 5] = [
    HospitalTemplate {
        name: "City General Hospital",
        street: "Main Street",
        jitter_deg: 0.01,
        kind: "General Hospital",
        specialties: &["emergency", "cardiology", "pulmonology", "orthopedics"],
    },
    HospitalTemplate {
        name: "Memorial Medical Center",
        street: "Oak Avenue",
        jitter_deg: 0.015,
        kind: "Medical Center",
        specialties: &["emergency", "neurology", "stroke_center", "cardiology"],
    },
    HospitalTemplate {
        name: "Regional Emergency Hospital",
        street: "Pine Street",
        jitter_deg: 0.02,
        kind: "Emergency Hospital",
        specialties: &["emergency", "trauma", "burn_unit", "toxicology"],
    },
    HospitalTemplate {
        name: "Community Health Center",
        street: "Elm Drive",
        jitter_deg: 0.025,
        kind: "Health Center",
        specialties: &["allergy", "pulmonology"],
    },
    HospitalTemplate {
        name: "St. Mary's Hospital",
        street: "Cedar Lane",
        jitter_deg: 0.03,
        kind: "Hospital",
        specialties: &["emergency", "trauma", "orthopedics", "neurology"],
    },
];

/// Generates hospitals around the caller's location.
#[derive(Clone, Debug)]
pub struct NearbyFacilitySource {
    default_location: Coordinates,
    ambulance_speed_kmh: f64,
    seed: u64,
}

impl NearbyFacilitySource {
    pub fn new(default_location: Coordinates, ambulance_speed_kmh: f64) -> Self {
        Self {
            default_location,
            ambulance_speed_kmh,
            seed: 0,
        }
    }

    /// Base seed mixed into every location's random stream.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }

    fn rng_for(&self, origin: Coordinates) -> StdRng {
        // Rounded to 1e-4 degrees; the casts cannot overflow for valid coordinates.
        let lat = (origin.latitude() * 1e4).round() as i64 as u64;
        let lon = (origin.longitude() * 1e4).round() as i64 as u64;
        StdRng::seed_from_u64(self.seed ^ lat.rotate_left(32) ^ lon)
    }

    /// Minutes to cover `distance` at the configured speed, at least one.
    fn estimated_arrival_minutes(&self, distance: Distance) -> u32 {
        let minutes = (distance.km() / self.ambulance_speed_kmh * 60.0).ceil();
        // Float to int casts saturate.
        (minutes as u32).max(1)
    }

    fn generate(&self, origin: Coordinates, rng: &mut StdRng) -> EraResult<Vec<Facility>> {
        let mut facilities = Vec::with_capacity(TEMPLATES.len());

        for (i, template) in TEMPLATES.iter().enumerate() {
            let d_lat = (rng.gen::<f64>() - 0.5) * template.jitter_deg;
            let d_lon = (rng.gen::<f64>() - 0.5) * template.jitter_deg;
            let coordinates = origin.offset(d_lat, d_lon);
            let distance = origin.distance_to(&coordinates);

            let street_number: u32 = rng.gen_range(0..9999);
            let phone_suffix: u32 = rng.gen_range(1000..10000);

            let specialties = template
                .specialties
                .iter()
                .map(Specialty::new)
                .collect::<Result<BTreeSet<_>, _>>()?;

            facilities.push(Facility {
                id: NonEmptyText::new(format!("hospital_{}", i + 1))?,
                name: NonEmptyText::new(template.name)?,
                address: NonEmptyText::new(format!(
                    "{street_number} {}, Local City",
                    template.street
                ))?,
                coordinates,
                phone: NonEmptyText::new(format!("+1-555-{phone_suffix}"))?,
                specialties,
                distance,
                estimated_arrival_minutes: self.estimated_arrival_minutes(distance),
                kind: Some(NonEmptyText::new(template.kind)?),
                emergency_number: Some(NonEmptyText::new(DEFAULT_EMERGENCY_NUMBER)?),
            });
        }

        facilities.sort_by(|a, b| a.distance.cmp(&b.distance));
        Ok(facilities)
    }
}

impl FacilitySource for NearbyFacilitySource {
    fn facilities(&self, origin: Option<Coordinates>) -> EraResult<Vec<Facility>> {
        let origin = origin.unwrap_or(self.default_location);
        tracing::info!("searching for hospitals near coordinates: {origin}");

        let mut rng = self.rng_for(origin);
        let facilities = self.generate(origin, &mut rng)?;

        tracing::info!("found {} hospitals near the location", facilities.len());
        Ok(facilities)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn origin() -> Coordinates {
        Coordinates::new(40.7128, -74.0060).unwrap()
    }

    fn source() -> NearbyFacilitySource {
        NearbyFacilitySource::new(Coordinates::new(37.7749, -122.4194).unwrap(), 40.0)
    }

    #[test]
    fn generates_five_hospitals_sorted_by_distance() {
        let facilities = source().with_seed(7).facilities(Some(origin())).unwrap();
        assert_eq!(facilities.len(), 5);
        for pair in facilities.windows(2) {
            assert!(pair[0].distance <= pair[1].distance);
        }
    }

    #[test]
    fn hospitals_stay_within_jitter_window() {
        let facilities = source().with_seed(11).facilities(Some(origin())).unwrap();
        for f in &facilities {
            assert!((f.coordinates.latitude() - origin().latitude()).abs() <= 0.015 + 1e-9);
            assert!((f.coordinates.longitude() - origin().longitude()).abs() <= 0.015 + 1e-9);
            let recomputed = origin().distance_to(&f.coordinates);
            assert_eq!(recomputed, f.distance);
        }
    }

    #[test]
    fn same_seed_same_hospitals() {
        let a = source().with_seed(42).facilities(Some(origin())).unwrap();
        let b = source().with_seed(42).facilities(Some(origin())).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn same_location_same_hospitals_without_seed() {
        let a = source().facilities(Some(origin())).unwrap();
        let b = source().facilities(Some(origin())).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn different_seeds_give_different_hospitals() {
        let a = source().with_seed(1).facilities(Some(origin())).unwrap();
        let b = source().with_seed(2).facilities(Some(origin())).unwrap();
        assert_ne!(a, b);
    }

    #[test]
    fn missing_origin_uses_default_location() {
        let default = Coordinates::new(37.7749, -122.4194).unwrap();
        let facilities = source().with_seed(3).facilities(None).unwrap();
        for f in &facilities {
            // All templates fall within ~2.5 km of the centre.
            assert!(default.distance_to(&f.coordinates).km() < 3.0);
        }
    }

    #[test]
    fn fields_follow_templates() {
        let facilities = source().with_seed(5).facilities(Some(origin())).unwrap();
        for f in &facilities {
            assert!(f.id.as_str().starts_with("hospital_"));
            assert!(f.address.as_str().ends_with(", Local City"));
            assert!(f.phone.as_str().starts_with("+1-555-"));
            assert_eq!(f.phone.as_str().len(), "+1-555-0000".len());
            assert_eq!(f.emergency_number.as_ref().map(|n| n.as_str()), Some("911"));
            assert!(f.kind.is_some());
            assert!(!f.specialties.is_empty());
            assert!(f.estimated_arrival_minutes >= 1);
        }
    }

    #[test]
    fn arrival_time_scales_with_speed() {
        let slow = NearbyFacilitySource::new(origin(), 10.0);
        let d = Distance::from_km(5.0).unwrap();
        assert_eq!(slow.estimated_arrival_minutes(d), 30);
        assert_eq!(slow.estimated_arrival_minutes(Distance::ZERO), 1);
    }
}
