use serde::{Deserialize, Serialize};

/// Formulary entry for one drug (loaded from drug_reference.json).
/// Dose limits are in `unit` (milligrams throughout the bundled set).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DrugInfo {
    pub name: String,
    pub drug_class: String,
    pub max_single_dose: f64,
    pub max_daily_dose: f64,
    pub unit: String,
    /// eGFR threshold (mL/min) below which dosing needs adjustment.
    pub renal_adjustment_egfr: Option<f64>,
    pub hepatic_caution: bool,
    pub contraindicated_conditions: Vec<String>,
}

fn drug(
    name: &str,
    drug_class: &str,
    max_single_dose: f64,
    max_daily_dose: f64,
    renal_adjustment_egfr: Option<f64>,
    hepatic_caution: bool,
    contraindicated_conditions: &[&str],
) -> DrugInfo {
    DrugInfo {
        name: name.into(),
        drug_class: drug_class.into(),
        max_single_dose,
        max_daily_dose,
        unit: "mg".into(),
        renal_adjustment_egfr,
        hepatic_caution,
        contraindicated_conditions: contraindicated_conditions
            .iter()
            .map(|s| (*s).into())
            .collect(),
    }
}

/// Bundled formulary covering the clinic's common prescriptions.
pub(super) fn builtin_formulary() -> Vec<DrugInfo> {
    vec![
        drug("paracetamol", "analgesic", 1000.0, 4000.0, None, true, &["severe liver disease"]),
        drug("ibuprofen", "nsaid", 800.0, 3200.0, Some(30.0), false, &["peptic ulcer", "gi bleeding", "chronic kidney disease"]),
        drug("diclofenac", "nsaid", 75.0, 150.0, Some(30.0), false, &["peptic ulcer", "gi bleeding"]),
        drug("aspirin", "nsaid", 650.0, 4000.0, None, false, &["peptic ulcer", "bleeding disorder", "asthma"]),
        drug("amoxicillin", "penicillin", 1000.0, 3000.0, Some(30.0), false, &[]),
        drug("co-amoxiclav", "penicillin", 1000.0, 3000.0, Some(30.0), true, &[]),
        drug("ciprofloxacin", "fluoroquinolone", 750.0, 1500.0, Some(30.0), false, &["epilepsy"]),
        drug("azithromycin", "macrolide", 500.0, 500.0, None, true, &[]),
        drug("metformin", "biguanide", 1000.0, 2550.0, Some(30.0), false, &["heart failure"]),
        drug("glimepiride", "sulfonylurea", 4.0, 8.0, Some(30.0), false, &[]),
        drug("atorvastatin", "statin", 80.0, 80.0, None, true, &["active liver disease"]),
        drug("warfarin", "anticoagulant", 10.0, 10.0, None, true, &["active bleeding", "pregnancy"]),
        drug("amlodipine", "calcium channel blocker", 10.0, 10.0, None, false, &[]),
        drug("telmisartan", "angiotensin receptor blocker", 80.0, 80.0, None, false, &["pregnancy"]),
        drug("enalapril", "ace inhibitor", 20.0, 40.0, Some(30.0), false, &["pregnancy", "angioedema"]),
        drug("pantoprazole", "proton pump inhibitor", 40.0, 80.0, None, false, &[]),
        drug("cetirizine", "antihistamine", 10.0, 10.0, Some(30.0), false, &[]),
        drug("tramadol", "opioid", 100.0, 400.0, Some(30.0), false, &["epilepsy"]),
    ]
}
