//! Built-in reference data.
//!
//! Kept as catalog documents rather than Rust literals so the defaults go through exactly the
//! same validation as operator-supplied files.

/// Symptom taxonomy used when no taxonomy file is configured.
pub const STANDARD_TAXONOMY_YAML: &str = r#"symptoms:
  - id: chest_pain
    label: Chest Pain
    category: cardiac
    specialties: [cardiology, emergency]
  - id: difficulty_breathing
    label: Difficulty Breathing
    category: respiratory
    specialties: [pulmonology, emergency]
  - id: severe_bleeding
    label: Severe Bleeding
    category: trauma
    specialties: [trauma, emergency]
  - id: unconscious
    label: Unconscious/Unresponsive
    category: neurological
    specialties: [neurology, emergency]
  - id: stroke_symptoms
    label: Stroke Symptoms
    category: neurological
    specialties: [neurology, stroke_center]
  - id: severe_pain
    label: Severe Pain
    category: general
    specialties: []
  - id: burns
    label: Burns
    category: trauma
    specialties: [burn_unit, trauma]
  - id: fractures
    label: Broken Bones/Fractures
    category: orthopedic
    specialties: [orthopedics, trauma]
  - id: allergic_reaction
    label: Allergic Reaction
    category: allergic
    specialties: [emergency, allergy]
  - id: poisoning
    label: Poisoning/Overdose
    category: toxicological
    specialties: [toxicology, emergency]
"#;

/// Fixed facility catalog used by [`crate::sources::StaticFacilitySource::standard`].
pub const STANDARD_FACILITIES_YAML: &str = r#"facilities:
  - id: "1"
    name: City Emergency Hospital
    address: 123 Emergency Ave
    latitude: 37.7890
    longitude: -122.4010
    distance_km: 2.1
    phone: "+1-555-0101"
    specialties: [emergency, trauma, cardiology]
    estimated_arrival_minutes: 8
  - id: "2"
    name: Regional Medical Center
    address: 456 Medical Blvd
    latitude: 37.7600
    longitude: -122.4580
    distance_km: 3.5
    phone: "+1-555-0102"
    specialties: [neurology, stroke_center, emergency]
    estimated_arrival_minutes: 12
  - id: "3"
    name: Specialized Trauma Center
    address: 789 Trauma St
    latitude: 37.7420
    longitude: -122.3830
    distance_km: 4.2
    phone: "+1-555-0103"
    specialties: [trauma, burn_unit, orthopedics]
    estimated_arrival_minutes: 15
"#;
