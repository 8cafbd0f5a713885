//! Request payload for the day summary endpoint.
//!
//! Field names follow the existing frontend contract, which mixes
//! `patient_id` with camelCase `patientDetails` / `visitSummary`.

use serde::{Deserialize, Serialize};
use validator::Validate;

/// One scheduled encounter on the day being summarised.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct PatientVisit {
    /// Scheduled time, passed through as given (e.g. "09:30").
    #[validate(length(min = 1, message = "time is required"))]
    pub time: String,

    #[validate(length(min = 1, message = "patient_id is required"))]
    pub patient_id: String,

    pub doctor: String,

    pub department: String,

    pub reason: String,

    /// Absent for patients the clinic has never seen.
    #[serde(
        default,
        rename = "patientDetails",
        alias = "patient_details",
        skip_serializing_if = "Option::is_none"
    )]
    #[validate(nested)]
    pub patient_details: Option<PatientDetails>,
}

#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct PatientDetails {
    #[validate(length(min = 1, message = "name is required"))]
    pub name: String,

    #[validate(range(max = 150, message = "age must be at most 150"))]
    pub age: u32,

    pub gender: String,

    #[serde(default)]
    pub conditions: Vec<String>,

    #[serde(default)]
    pub medications: Vec<String>,

    #[serde(default)]
    pub allergies: Vec<String>,

    /// Chronological; the last entry is the most recent visit.
    #[serde(default)]
    pub visits: Vec<VisitDetails>,
}

impl PatientDetails {
    pub fn most_recent_visit(&self) -> Option<&VisitDetails> {
        self.visits.last()
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VisitDetails {
    pub date: String,
    pub doctor: String,
    pub department: String,
    pub reason: String,
    #[serde(default)]
    pub diagnoses: Vec<String>,
    #[serde(rename = "visitSummary", alias = "visit_summary")]
    pub visit_summary: String,
}
