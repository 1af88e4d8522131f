//! Request and response bodies.
//!
//! These are plain wire structs: identifiers are strings and coordinates are raw numbers.
//! Validation into domain types happens in the API layer before anything reaches the matcher.

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct HealthRes {
    pub ok: bool,
    pub message: String,
}

/// One selectable symptom.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct SymptomRes {
    pub id: String,
    pub label: String,
    pub category: String,
    pub specialties: Vec<String>,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct ListSymptomsRes {
    pub symptoms: Vec<SymptomRes>,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct HospitalRes {
    pub id: String,
    pub name: String,
    pub address: String,
    pub latitude: f64,
    pub longitude: f64,
    pub distance_km: f64,
    pub phone: String,
    pub specialties: Vec<String>,
    pub estimated_arrival_minutes: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub kind: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub emergency_number: Option<String>,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct NearbyHospitalsReq {
    pub latitude: f64,
    pub longitude: f64,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct NearbyHospitalsRes {
    pub hospitals: Vec<HospitalRes>,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct RankHospitalsReq {
    #[serde(default)]
    pub symptoms: Vec<String>,
    #[serde(default)]
    pub latitude: Option<f64>,
    #[serde(default)]
    pub longitude: Option<f64>,
    /// Maximum number of hospitals to return. Must be positive; the server default applies
    /// when omitted.
    #[serde(default)]
    pub limit: Option<i64>,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct RankedHospitalRes {
    pub hospital: HospitalRes,
    pub match_score: u32,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct RankHospitalsRes {
    /// True when no symptoms were supplied; clients should prompt for symptoms.
    pub no_symptoms: bool,
    /// Supplied symptoms the server's taxonomy does not know. They score nothing.
    pub unknown_symptoms: Vec<String>,
    pub hospitals: Vec<RankedHospitalRes>,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct DispatchReq {
    /// Id of the hospital selected from the ranking.
    pub hospital_id: String,
    #[serde(default)]
    pub symptoms: Vec<String>,
    #[serde(default)]
    pub latitude: Option<f64>,
    #[serde(default)]
    pub longitude: Option<f64>,
    #[serde(default)]
    pub limit: Option<i64>,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct DispatchRes {
    pub dispatch_id: String,
    pub hospital: HospitalRes,
    pub message: String,
    pub dispatched_at: String,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct ListDispatchesRes {
    pub dispatches: Vec<DispatchRes>,
}
