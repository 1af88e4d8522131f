//! Facility catalog wire models and translation helpers.
//!
//! Responsibilities:
//! - Define the public domain-level [`Facility`] record
//! - Define a strict wire model for serialisation/deserialisation
//! - Validate coordinates, distances and identifier uniqueness at the boundary

use crate::{deserialize_strict, CatalogError, CatalogResult};
use era_types::{Coordinates, Distance, NonEmptyText, Specialty};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeSet, HashSet};
use std::path::Path;

// ============================================================================
// Public domain-level types
// ============================================================================

/// A candidate hospital or clinic.
///
/// Facilities are read-only inputs to matching: the scorer and ranker never mutate them.
#[derive(Clone, Debug, PartialEq)]
pub struct Facility {
    /// Identifier, unique within one catalog.
    pub id: NonEmptyText,

    /// Display name, e.g. "City Emergency Hospital".
    pub name: NonEmptyText,

    /// Postal address.
    pub address: NonEmptyText,

    /// Location of the facility.
    pub coordinates: Coordinates,

    /// Contact phone number.
    pub phone: NonEmptyText,

    /// Specialties the facility supports. Duplicates in the source collapse.
    pub specialties: BTreeSet<Specialty>,

    /// Distance from the caller.
    pub distance: Distance,

    /// Estimated ambulance arrival time in minutes.
    pub estimated_arrival_minutes: u32,

    /// Facility kind, e.g. "General Hospital".
    pub kind: Option<NonEmptyText>,

    /// Emergency line, e.g. "911".
    pub emergency_number: Option<NonEmptyText>,
}

// ============================================================================
// Public FacilityCatalog operations
// ============================================================================

/// Facility catalog operations.
///
/// This is a zero-sized type used for namespacing catalog-related operations.
pub struct FacilityCatalog;

impl FacilityCatalog {
    /// Parse a facility catalog from YAML (or JSON) text.
    ///
    /// # Errors
    ///
    /// Returns [`CatalogError`] if:
    /// - the document does not match the wire schema (unknown keys, wrong types, empty text),
    /// - any coordinate or distance is out of range,
    /// - two facilities share an id.
    pub fn parse(yaml_text: &str) -> CatalogResult<Vec<Facility>> {
        let wire: FacilityCatalogWire = deserialize_strict(yaml_text, "Facility catalog")?;
        wire_to_domain(wire)
    }

    /// Render facilities as YAML text.
    ///
    /// # Errors
    ///
    /// Returns [`CatalogError::Translation`] if serialisation fails.
    pub fn render(facilities: &[Facility]) -> CatalogResult<String> {
        let wire = domain_to_wire(facilities);
        serde_yaml::to_string(&wire).map_err(|e| {
            CatalogError::Translation(format!("Failed to serialize facility catalog: {e}"))
        })
    }

    /// Read and parse a catalog file.
    ///
    /// # Errors
    ///
    /// Returns [`CatalogError::Io`] if the file cannot be read, otherwise as [`Self::parse`].
    pub fn load(path: &Path) -> CatalogResult<Vec<Facility>> {
        let text = std::fs::read_to_string(path)?;
        Self::parse(&text)
    }
}

// ============================================================================
// Wire types (internal)
// ============================================================================

#[derive(Clone, Debug, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
struct FacilityCatalogWire {
    facilities: Vec<FacilityWire>,
}

#[derive(Clone, Debug, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
struct FacilityWire {
    id: NonEmptyText,
    name: NonEmptyText,
    address: NonEmptyText,
    latitude: f64,
    longitude: f64,
    distance_km: f64,
    phone: NonEmptyText,
    #[serde(default)]
    specialties: Vec<Specialty>,
    estimated_arrival_minutes: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    kind: Option<NonEmptyText>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    emergency_number: Option<NonEmptyText>,
}

// ============================================================================
// Helper functions (internal)
// ============================================================================

fn wire_to_domain(wire: FacilityCatalogWire) -> CatalogResult<Vec<Facility>> {
    let mut seen = HashSet::new();
    let mut facilities = Vec::with_capacity(wire.facilities.len());

    for f in wire.facilities {
        if !seen.insert(f.id.clone()) {
            return Err(CatalogError::DuplicateId {
                kind: "facility",
                id: f.id.to_string(),
            });
        }

        let coordinates = Coordinates::new(f.latitude, f.longitude)
            .map_err(|e| CatalogError::Translation(format!("facility '{}': {e}", f.id)))?;
        let distance = Distance::from_km(f.distance_km)
            .map_err(|e| CatalogError::Translation(format!("facility '{}': {e}", f.id)))?;

        facilities.push(Facility {
            id: f.id,
            name: f.name,
            address: f.address,
            coordinates,
            phone: f.phone,
            specialties: f.specialties.into_iter().collect(),
            distance,
            estimated_arrival_minutes: f.estimated_arrival_minutes,
            kind: f.kind,
            emergency_number: f.emergency_number,
        });
    }

    Ok(facilities)
}

fn domain_to_wire(facilities: &[Facility]) -> FacilityCatalogWire {
    FacilityCatalogWire {
        facilities: facilities
            .iter()
            .map(|f| FacilityWire {
                id: f.id.clone(),
                name: f.name.clone(),
                address: f.address.clone(),
                latitude: f.coordinates.latitude(),
                longitude: f.coordinates.longitude(),
                distance_km: f.distance.km(),
                phone: f.phone.clone(),
                specialties: f.specialties.iter().cloned().collect(),
                estimated_arrival_minutes: f.estimated_arrival_minutes,
                kind: f.kind.clone(),
                emergency_number: f.emergency_number.clone(),
            })
            .collect(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    const SAMPLE: &str = r#"facilities:
  - id: "1"
    name: City Emergency Hospital
    address: 123 Emergency Ave
    latitude: 37.7749
    longitude: -122.4194
    distance_km: 2.1
    phone: "+1-555-0101"
    specialties: [emergency, trauma, cardiology]
    estimated_arrival_minutes: 8
  - id: "2"
    name: Regional Medical Center
    address: 456 Medical Blvd
    latitude: 37.78
    longitude: -122.41
    distance_km: 3.5
    phone: "+1-555-0102"
    specialties: [neurology, Stroke Center, emergency, emergency]
    estimated_arrival_minutes: 12
    kind: Medical Center
    emergency_number: "911"
"#;

    #[test]
    fn parses_sample_catalog() {
        let facilities = FacilityCatalog::parse(SAMPLE).expect("parse catalog");
        assert_eq!(facilities.len(), 2);

        let first = &facilities[0];
        assert_eq!(first.name.as_str(), "City Emergency Hospital");
        assert_eq!(first.distance.km(), 2.1);
        assert!(first.kind.is_none());

        let second = &facilities[1];
        let specialties: Vec<&str> = second.specialties.iter().map(|s| s.as_str()).collect();
        assert_eq!(specialties, vec!["emergency", "neurology", "stroke_center"]);
        assert_eq!(second.emergency_number.as_ref().map(|n| n.as_str()), Some("911"));
    }

    #[test]
    fn render_then_parse_preserves_facilities() {
        let facilities = FacilityCatalog::parse(SAMPLE).expect("parse catalog");
        let rendered = FacilityCatalog::render(&facilities).expect("render catalog");
        let reparsed = FacilityCatalog::parse(&rendered).expect("reparse catalog");
        assert_eq!(facilities, reparsed);
    }

    #[test]
    fn accepts_json() {
        let json = r#"{"facilities": [{"id": "a", "name": "A", "address": "1 Road",
            "latitude": 0.0, "longitude": 0.0, "distance_km": 0.5, "phone": "555",
            "specialties": ["trauma"], "estimated_arrival_minutes": 3}]}"#;
        let facilities = FacilityCatalog::parse(json).expect("parse json catalog");
        assert_eq!(facilities[0].id.as_str(), "a");
    }

    #[test]
    fn strict_validation_rejects_unknown_keys() {
        let input = SAMPLE.replace("    kind: Medical Center\n", "    helipad: true\n");
        let err = FacilityCatalog::parse(&input).expect_err("should reject unknown key");
        match err {
            CatalogError::Translation(msg) => assert!(msg.contains("helipad"), "{msg}"),
            other => panic!("expected Translation error, got {other:?}"),
        }
    }

    #[test]
    fn strict_validation_rejects_wrong_types() {
        let input = SAMPLE.replace("estimated_arrival_minutes: 8", "estimated_arrival_minutes: soon");
        let err = FacilityCatalog::parse(&input).expect_err("should reject wrong type");
        match err {
            CatalogError::Translation(msg) => {
                assert!(msg.contains("estimated_arrival_minutes"), "{msg}")
            }
            other => panic!("expected Translation error, got {other:?}"),
        }
    }

    #[test]
    fn rejects_empty_name() {
        let input = SAMPLE.replace("name: City Emergency Hospital", "name: \"  \"");
        let err = FacilityCatalog::parse(&input).expect_err("should reject empty name");
        match err {
            CatalogError::Translation(msg) => assert!(msg.contains("name"), "{msg}"),
            other => panic!("expected Translation error, got {other:?}"),
        }
    }

    #[test]
    fn rejects_out_of_range_latitude() {
        let input = SAMPLE.replace("latitude: 37.7749", "latitude: 137.7749");
        let err = FacilityCatalog::parse(&input).expect_err("should reject latitude");
        match err {
            CatalogError::Translation(msg) => assert!(msg.contains("latitude"), "{msg}"),
            other => panic!("expected Translation error, got {other:?}"),
        }
    }

    #[test]
    fn rejects_negative_distance() {
        let input = SAMPLE.replace("distance_km: 2.1", "distance_km: -2.1");
        assert!(matches!(
            FacilityCatalog::parse(&input),
            Err(CatalogError::Translation(_))
        ));
    }

    #[test]
    fn rejects_duplicate_ids() {
        let input = SAMPLE.replace("id: \"2\"", "id: \"1\"");
        match FacilityCatalog::parse(&input) {
            Err(CatalogError::DuplicateId { kind, id }) => {
                assert_eq!(kind, "facility");
                assert_eq!(id, "1");
            }
            other => panic!("expected DuplicateId, got {other:?}"),
        }
    }

    #[test]
    fn empty_catalog_is_valid() {
        let facilities = FacilityCatalog::parse("facilities: []\n").expect("parse empty");
        assert!(facilities.is_empty());
    }

    #[test]
    fn load_reads_file() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("hospitals.yaml");
        fs::write(&path, SAMPLE).unwrap();

        let facilities = FacilityCatalog::load(&path).expect("load catalog");
        assert_eq!(facilities.len(), 2);
    }

    #[test]
    fn load_missing_file_is_io_error() {
        let temp = TempDir::new().unwrap();
        let err = FacilityCatalog::load(&temp.path().join("missing.yaml")).unwrap_err();
        assert!(matches!(err, CatalogError::Io(_)));
    }
}
