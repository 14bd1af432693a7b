use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::medication::Medication;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Consultation {
    pub id: Uuid,
    pub patient_id: String,
    pub date: NaiveDate,
    pub specialty: String,
    pub doctor_name: String,
    pub summary: String,
    pub advice: Option<String>,
}

/// A single lab/diagnostic result row. `value` is free text; numeric
/// interpretation happens at the point of use.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Investigation {
    pub id: Uuid,
    pub patient_id: String,
    pub date: NaiveDate,
    pub test_name: String,
    pub value: String,
    pub unit: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProcedureRecord {
    pub id: Uuid,
    pub patient_id: String,
    pub date: NaiveDate,
    pub name: String,
    pub notes: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Visit {
    pub id: Uuid,
    pub patient_id: String,
    pub date: NaiveDate,
    pub doctor_name: String,
    pub diagnoses: Vec<String>,
    pub medications: Vec<Medication>,
    pub notes: Option<String>,
}

/// One hit from full-text search over clinical records.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ClinicalSearchHit {
    pub record_id: Uuid,
    /// Record family: "consultation", "investigation", "procedure", "visit".
    pub source: String,
    pub date: Option<NaiveDate>,
    pub snippet: String,
    pub rank: f64,
}
