use std::time::Instant;

use crate::models::enums::AlertAction;
use crate::models::{PatientSnapshot, Prescription};
use crate::reference::DrugReference;

use super::alerts::{AlertCounts, SafetyAlert, SafetyReport};
use super::checks::{
    check_allergies, check_contraindications, check_dose_limits, check_duplicates, check_hepatic,
    check_interactions, check_renal,
};

/// Run all seven checks and collect alerts in severity-significant order:
/// allergies first, duplicates last.
fn run_checks(
    prescription: &Prescription,
    snapshot: &PatientSnapshot,
    reference: &DrugReference,
) -> (Vec<SafetyAlert>, AlertCounts) {
    let allergies = check_allergies(prescription, snapshot, reference);
    let doses = check_dose_limits(prescription, reference);
    let renals = check_renal(prescription, snapshot, reference);
    let hepatics = check_hepatic(prescription, snapshot, reference);
    let contraindications = check_contraindications(prescription, snapshot, reference);
    let interactions = check_interactions(prescription, snapshot, reference);
    let duplicates = check_duplicates(prescription, snapshot, reference);

    let counts = AlertCounts {
        allergies: allergies.len(),
        doses: doses.len(),
        renals: renals.len(),
        hepatics: hepatics.len(),
        contraindications: contraindications.len(),
        interactions: interactions.len(),
        duplicates: duplicates.len(),
    };

    let alerts = allergies
        .into_iter()
        .chain(doses)
        .chain(renals)
        .chain(hepatics)
        .chain(contraindications)
        .chain(interactions)
        .chain(duplicates)
        .collect();

    (alerts, counts)
}

/// Validate a proposed prescription against the patient's clinical
/// snapshot and the reference tables. Pure CPU work over data already in
/// memory; always returns a report, never an error.
pub fn validate_prescription(
    prescription: &Prescription,
    snapshot: &PatientSnapshot,
    reference: &DrugReference,
) -> SafetyReport {
    let start = Instant::now();

    let (alerts, counts) = run_checks(prescription, snapshot, reference);

    let processing_time_ms = start.elapsed().as_millis() as u64;
    let blocking = alerts
        .iter()
        .filter(|a| a.action == AlertAction::Block)
        .count();

    tracing::info!(
        patient_id = %snapshot.patient_id,
        medications = prescription.medications.len(),
        total = counts.total(),
        blocking,
        processing_ms = processing_time_ms,
        "Prescription validation complete"
    );

    SafetyReport {
        alerts,
        counts,
        processing_time_ms,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::enums::Severity;
    use crate::models::Medication;

    fn make_snapshot() -> PatientSnapshot {
        PatientSnapshot::empty("UHID-1001")
    }

    #[test]
    fn clean_prescription_produces_empty_report() {
        let reference = DrugReference::builtin();
        let prescription = Prescription {
            diagnoses: vec!["Viral fever".to_string()],
            medications: vec![Medication::new("Paracetamol", "500mg", "1 tablet", "TDS")],
        };

        let report = validate_prescription(&prescription, &make_snapshot(), &reference);
        assert_eq!(report.counts.total(), 0);
        assert!(report.alerts.is_empty());
        assert!(!report.has_blocking());
        assert_eq!(report.highest_severity(), None);
    }

    #[test]
    fn penicillin_allergy_produces_blocking_report() {
        let reference = DrugReference::builtin();
        let mut snapshot = make_snapshot();
        snapshot.allergies.push("Penicillin".to_string());
        let prescription = Prescription {
            diagnoses: vec!["Acute pharyngitis".to_string()],
            medications: vec![Medication::new(
                "Amoxicillin 500mg",
                "500mg",
                "1 capsule",
                "TDS",
            )],
        };

        let report = validate_prescription(&prescription, &snapshot, &reference);
        assert_eq!(report.counts.allergies, 1);
        assert!(report.has_blocking());
        assert_eq!(report.highest_severity(), Some(Severity::Critical));
    }

    #[test]
    fn overdose_warns_without_blocking() {
        let reference = DrugReference::builtin();
        let prescription = Prescription {
            diagnoses: vec![],
            medications: vec![Medication::new(
                "Paracetamol",
                "500mg",
                "2 tablets",
                "5x/day",
            )],
        };

        let report = validate_prescription(&prescription, &make_snapshot(), &reference);
        assert_eq!(report.counts.doses, 1);
        assert!(!report.has_blocking());
        assert_eq!(report.highest_severity(), Some(Severity::High));
    }

    #[test]
    fn mixed_regimen_counts_by_category() {
        let reference = DrugReference::builtin();
        let mut snapshot = make_snapshot();
        snapshot
            .current_medications
            .push(Medication::new("Warfarin 5mg", "5mg", "1 tablet", "OD"));
        snapshot
            .active_problems
            .push("Peptic ulcer disease".to_string());
        let prescription = Prescription {
            diagnoses: vec![],
            medications: vec![Medication::new("Aspirin 75mg", "75mg", "1 tablet", "OD")],
        };

        let report = validate_prescription(&prescription, &snapshot, &reference);
        assert_eq!(report.counts.contraindications, 1);
        assert_eq!(report.counts.interactions, 1);
        assert_eq!(report.counts.total(), report.alerts.len());
        assert_eq!(report.highest_severity(), Some(Severity::High));
    }
}
