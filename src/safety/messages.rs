/// Message template builder for prescription safety alerts.
/// Clinician-facing: factual, specific, no hedging. Every message names
/// the medication and the evidence so it can stand alone in an alert list.
pub struct MessageTemplates;

impl MessageTemplates {
    /// ALLERGY: recorded allergy matches the drug directly.
    pub fn allergy_direct(medication: &str, allergen: &str) -> String {
        format!(
            "{} matches a documented allergy ({}). Do not prescribe without \
             specialist review.",
            medication, allergen,
        )
    }

    /// ALLERGY: match via the cross-reactivity table.
    pub fn allergy_cross_reactive(medication: &str, allergen: &str, matched_drug: &str) -> String {
        format!(
            "{} is cross-reactive with the documented allergy to {} \
             (related drug: {}). Do not prescribe without specialist review.",
            medication, allergen, matched_drug,
        )
    }

    /// DOSE: single administration above the reference maximum.
    pub fn single_dose_exceeded(medication: &str, computed: f64, limit: f64, unit: &str) -> String {
        format!(
            "{} single dose of {}{} exceeds the maximum of {}{}.",
            medication, computed, unit, limit, unit,
        )
    }

    /// DOSE: cumulative daily total above the reference maximum.
    pub fn daily_dose_exceeded(medication: &str, computed: f64, limit: f64, unit: &str) -> String {
        format!(
            "{} daily total of {}{} exceeds the maximum of {}{}.",
            medication, computed, unit, limit, unit,
        )
    }

    /// RENAL: eGFR below the drug's adjustment threshold.
    pub fn renal_adjustment(medication: &str, egfr: f64, threshold: f64) -> String {
        format!(
            "{} needs dose adjustment: eGFR {} is below the threshold of {}.",
            medication, egfr, threshold,
        )
    }

    /// RENAL: no eGFR on file, elevated creatinine as proxy.
    pub fn renal_proxy(medication: &str, creatinine: f64) -> String {
        format!(
            "{} is renally cleared and creatinine is elevated at {}. \
             No eGFR on file; review renal function before prescribing.",
            medication, creatinine,
        )
    }

    /// HEPATIC: caution drug with deranged liver enzymes.
    pub fn hepatic_caution(medication: &str, test_name: &str, value: f64) -> String {
        format!(
            "{} carries hepatic caution and {} is elevated at {}. \
             Review liver function before prescribing.",
            medication, test_name, value,
        )
    }

    /// CONTRAINDICATION: active problem matches the drug's list.
    pub fn contraindicated(medication: &str, condition: &str, active_problem: &str) -> String {
        format!(
            "{} is contraindicated in {}. Patient has active problem: {}.",
            medication, condition, active_problem,
        )
    }

    /// DUPLICATE: same drug already in the active regimen.
    pub fn duplicate_drug(medication: &str, existing: &str) -> String {
        format!(
            "{} duplicates the active medication {}.",
            medication, existing,
        )
    }

    /// DUPLICATE: different drug, same therapeutic class.
    pub fn same_class(medication: &str, existing: &str, drug_class: &str) -> String {
        format!(
            "{} is in the same class ({}) as the active medication {}.",
            medication, drug_class, existing,
        )
    }
}
