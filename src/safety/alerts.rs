use serde::{Deserialize, Serialize};

use crate::models::enums::{AlertAction, AlertCategory, Severity};

// ---------------------------------------------------------------------------
// SafetyAlert
// ---------------------------------------------------------------------------

/// A single finding raised while validating a prescription.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SafetyAlert {
    pub severity: Severity,
    pub category: AlertCategory,
    pub action: AlertAction,
    /// Clinician-facing message, ready to display.
    pub message: String,
    pub detail: AlertDetail,
}

// ---------------------------------------------------------------------------
// AlertDetail variants
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum AlertDetail {
    Allergy(AllergyDetail),
    Dose(DoseDetail),
    Renal(RenalDetail),
    Hepatic(HepaticDetail),
    Contraindication(ContraindicationDetail),
    Interaction(InteractionDetail),
    Duplicate(DuplicateDetail),
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AllergyDetail {
    pub medication_name: String,
    /// The allergy as recorded on the patient, free text.
    pub allergen: String,
    pub via_cross_reactivity: bool,
    /// The cross-reactive drug that triggered the match, when indirect.
    pub matched_drug: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub enum DoseLimitKind {
    Single,
    Daily,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DoseDetail {
    pub medication_name: String,
    pub computed: f64,
    pub limit: f64,
    pub unit: String,
    pub limit_kind: DoseLimitKind,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RenalDetail {
    pub medication_name: String,
    pub egfr: Option<f64>,
    pub creatinine: Option<f64>,
    /// eGFR below this value calls for dose adjustment.
    pub threshold_egfr: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HepaticDetail {
    pub medication_name: String,
    pub test_name: String,
    pub value: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ContraindicationDetail {
    pub medication_name: String,
    /// The condition from the drug's contraindication list.
    pub condition: String,
    /// The patient's active problem that matched it.
    pub active_problem: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InteractionDetail {
    /// Drugs from the rule present in the combined regimen.
    pub matched_drugs: Vec<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DuplicateDetail {
    pub medication_name: String,
    pub existing_medication: String,
    /// Shared drug class when the overlap is therapeutic, not literal.
    pub drug_class: Option<String>,
}

// ---------------------------------------------------------------------------
// SafetyReport & AlertCounts
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SafetyReport {
    pub alerts: Vec<SafetyAlert>,
    pub counts: AlertCounts,
    pub processing_time_ms: u64,
}

impl SafetyReport {
    /// True when any alert demands the prescription be held back.
    pub fn has_blocking(&self) -> bool {
        self.alerts.iter().any(|a| a.action == AlertAction::Block)
    }

    pub fn highest_severity(&self) -> Option<Severity> {
        self.alerts.iter().map(|a| a.severity.clone()).max()
    }

    /// Alerts ordered most severe first, for display.
    pub fn sorted_by_severity(&self) -> Vec<SafetyAlert> {
        let mut sorted = self.alerts.clone();
        sorted.sort_by(|a, b| b.severity.cmp(&a.severity));
        sorted
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct AlertCounts {
    pub allergies: usize,
    pub doses: usize,
    pub renals: usize,
    pub hepatics: usize,
    pub contraindications: usize,
    pub interactions: usize,
    pub duplicates: usize,
}

impl AlertCounts {
    pub fn total(&self) -> usize {
        self.allergies
            + self.doses
            + self.renals
            + self.hepatics
            + self.contraindications
            + self.interactions
            + self.duplicates
    }
}
