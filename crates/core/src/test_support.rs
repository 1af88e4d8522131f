//! Builders shared by unit tests across the crate.

use crate::selection::SymptomSelection;
use catalog::Facility;
use era_types::{Coordinates, Distance, NonEmptyText, Specialty, Symptom};

pub(crate) fn facility(id: &str, specialties: &[&str], distance_km: f64) -> Facility {
    Facility {
        id: NonEmptyText::new(id).unwrap(),
        name: NonEmptyText::new(format!("{id} Hospital")).unwrap(),
        address: NonEmptyText::new("1 Test Street").unwrap(),
        coordinates: Coordinates::new(37.7749, -122.4194).unwrap(),
        phone: NonEmptyText::new("+1-555-0000").unwrap(),
        specialties: specialties
            .iter()
            .map(|s| Specialty::new(s).unwrap())
            .collect(),
        distance: Distance::from_km(distance_km).unwrap(),
        estimated_arrival_minutes: 10,
        kind: None,
        emergency_number: None,
    }
}

pub(crate) fn selection(ids: &[&str]) -> SymptomSelection {
    ids.iter().map(|s| Symptom::new(s).unwrap()).collect()
}
