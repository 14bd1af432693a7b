use std::collections::BTreeMap;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::medication::Medication;

/// A registered patient. `id` is the hospital's UHID string
/// (e.g. "UH230018"), not a surrogate key.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Patient {
    pub id: String,
    pub name: String,
    pub age: Option<u32>,
    pub gender: Option<String>,
    pub phone: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LabValue {
    pub value: f64,
    pub unit: String,
    pub date: Option<NaiveDate>,
}

/// Point-in-time clinical summary of one patient, computed and owned by the
/// record store. Validation and context assembly only read it.
///
/// `key_labs` is a BTreeMap so iteration order is stable; the context
/// builder renders these directly and the output must not depend on
/// insertion order.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PatientSnapshot {
    pub patient_id: String,
    pub allergies: Vec<String>,
    pub current_medications: Vec<Medication>,
    pub active_problems: Vec<String>,
    /// Keyed by test name, most recent result per test.
    pub key_labs: BTreeMap<String, LabValue>,
    pub on_anticoagulation: bool,
    pub anticoagulant: Option<String>,
}

impl PatientSnapshot {
    pub fn empty(patient_id: &str) -> Self {
        Self {
            patient_id: patient_id.into(),
            allergies: Vec::new(),
            current_medications: Vec::new(),
            active_problems: Vec::new(),
            key_labs: BTreeMap::new(),
            on_anticoagulation: false,
            anticoagulant: None,
        }
    }

    /// Case-insensitive lab lookup by test name.
    pub fn lab(&self, test_name: &str) -> Option<&LabValue> {
        self.key_labs
            .iter()
            .find(|(name, _)| name.eq_ignore_ascii_case(test_name))
            .map(|(_, value)| value)
    }

    pub fn egfr(&self) -> Option<f64> {
        self.lab("egfr").map(|l| l.value)
    }

    pub fn creatinine(&self) -> Option<f64> {
        self.lab("creatinine").map(|l| l.value)
    }
}
