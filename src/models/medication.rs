use serde::{Deserialize, Serialize};

/// One medication line on a prescription. All dosing fields are free text
/// exactly as entered by the prescriber; nothing here is guaranteed numeric.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Medication {
    pub drug_name: String,
    /// Per-unit strength, e.g. "500mg".
    pub strength: String,
    /// Units per administration, e.g. "1" (tablet) or "10ml".
    pub dose: String,
    /// Dosing cadence, e.g. "BD", "1-0-1", "twice daily".
    pub frequency: String,
    pub duration: String,
    pub instructions: Option<String>,
    pub form: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Prescription {
    pub diagnoses: Vec<String>,
    pub medications: Vec<Medication>,
}

impl Medication {
    pub fn new(drug_name: &str, strength: &str, dose: &str, frequency: &str) -> Self {
        Self {
            drug_name: drug_name.into(),
            strength: strength.into(),
            dose: dose.into(),
            frequency: frequency.into(),
            duration: String::new(),
            instructions: None,
            form: None,
        }
    }
}
