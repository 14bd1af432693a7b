use crate::models::enums::{AlertAction, AlertCategory, Severity};
use crate::models::{PatientSnapshot, Prescription};
use crate::reference::DrugReference;

use super::alerts::{
    AlertDetail, AllergyDetail, ContraindicationDetail, DoseDetail, DoseLimitKind, DuplicateDetail,
    HepaticDetail, InteractionDetail, RenalDetail, SafetyAlert,
};
use super::dose::{daily_dose, single_dose};
use super::messages::MessageTemplates;

/// Liver enzymes above this value put hepatic-caution drugs on alert.
const LIVER_ENZYME_LIMIT: f64 = 80.0;
/// Creatinine above this value stands in for a missing eGFR.
const CREATININE_LIMIT: f64 = 1.5;
/// Lab names checked for hepatic caution, in lookup order.
const LIVER_ENZYMES: &[&str] = &["ALT", "AST", "SGPT", "SGOT"];

/// Case-insensitive containment in either direction, the same loose
/// matching clinicians get away with in free-text fields. Empty strings
/// never match anything.
fn text_match(a: &str, b: &str) -> bool {
    let a = a.to_lowercase();
    let b = b.to_lowercase();
    !a.is_empty() && !b.is_empty() && (a.contains(&b) || b.contains(&a))
}

// ---------------------------------------------------------------------------
// [1] ALLERGY check
// ---------------------------------------------------------------------------

/// Match each proposed medication against documented allergies, directly
/// and through the cross-reactivity table. Every hit blocks.
pub fn check_allergies(
    prescription: &Prescription,
    snapshot: &PatientSnapshot,
    reference: &DrugReference,
) -> Vec<SafetyAlert> {
    let mut alerts = Vec::new();

    for med in &prescription.medications {
        for allergy in &snapshot.allergies {
            if text_match(&med.drug_name, allergy) {
                alerts.push(SafetyAlert {
                    severity: Severity::Critical,
                    category: AlertCategory::Allergy,
                    action: AlertAction::Block,
                    message: MessageTemplates::allergy_direct(&med.drug_name, allergy),
                    detail: AlertDetail::Allergy(AllergyDetail {
                        medication_name: med.drug_name.clone(),
                        allergen: allergy.clone(),
                        via_cross_reactivity: false,
                        matched_drug: None,
                    }),
                });
                continue;
            }

            let Some(entry) = reference.cross_reactive(allergy) else {
                continue;
            };
            if let Some(matched) = entry
                .cross_reactive
                .iter()
                .find(|drug| text_match(&med.drug_name, drug))
            {
                alerts.push(SafetyAlert {
                    severity: Severity::Critical,
                    category: AlertCategory::Allergy,
                    action: AlertAction::Block,
                    message: MessageTemplates::allergy_cross_reactive(
                        &med.drug_name,
                        allergy,
                        matched,
                    ),
                    detail: AlertDetail::Allergy(AllergyDetail {
                        medication_name: med.drug_name.clone(),
                        allergen: allergy.clone(),
                        via_cross_reactivity: true,
                        matched_drug: Some(matched.clone()),
                    }),
                });
            }
        }
    }

    alerts
}

// ---------------------------------------------------------------------------
// [2] DOSE check
// ---------------------------------------------------------------------------

/// Compare computed single and daily amounts against formulary maxima.
/// Values exactly at the limit pass; only strictly above raises.
pub fn check_dose_limits(
    prescription: &Prescription,
    reference: &DrugReference,
) -> Vec<SafetyAlert> {
    let mut alerts = Vec::new();

    for med in &prescription.medications {
        let Some(drug) = reference.find_drug(&med.drug_name) else {
            continue;
        };

        let single = single_dose(med);
        if drug.max_single_dose > 0.0 && single > drug.max_single_dose {
            alerts.push(SafetyAlert {
                severity: Severity::High,
                category: AlertCategory::Dose,
                action: AlertAction::Warn,
                message: MessageTemplates::single_dose_exceeded(
                    &med.drug_name,
                    single,
                    drug.max_single_dose,
                    &drug.unit,
                ),
                detail: AlertDetail::Dose(DoseDetail {
                    medication_name: med.drug_name.clone(),
                    computed: single,
                    limit: drug.max_single_dose,
                    unit: drug.unit.clone(),
                    limit_kind: DoseLimitKind::Single,
                }),
            });
        }

        let daily = daily_dose(med);
        if drug.max_daily_dose > 0.0 && daily > drug.max_daily_dose {
            alerts.push(SafetyAlert {
                severity: Severity::High,
                category: AlertCategory::Dose,
                action: AlertAction::Warn,
                message: MessageTemplates::daily_dose_exceeded(
                    &med.drug_name,
                    daily,
                    drug.max_daily_dose,
                    &drug.unit,
                ),
                detail: AlertDetail::Dose(DoseDetail {
                    medication_name: med.drug_name.clone(),
                    computed: daily,
                    limit: drug.max_daily_dose,
                    unit: drug.unit.clone(),
                    limit_kind: DoseLimitKind::Daily,
                }),
            });
        }
    }

    alerts
}

// ---------------------------------------------------------------------------
// [3] RENAL check
// ---------------------------------------------------------------------------

/// Flag renally cleared drugs when eGFR is below the drug's threshold.
/// Without an eGFR on file, elevated creatinine serves as a weaker proxy.
pub fn check_renal(
    prescription: &Prescription,
    snapshot: &PatientSnapshot,
    reference: &DrugReference,
) -> Vec<SafetyAlert> {
    let mut alerts = Vec::new();

    for med in &prescription.medications {
        let Some(drug) = reference.find_drug(&med.drug_name) else {
            continue;
        };
        let Some(threshold) = drug.renal_adjustment_egfr else {
            continue;
        };

        match snapshot.egfr() {
            Some(egfr) if egfr < threshold => {
                alerts.push(SafetyAlert {
                    severity: Severity::High,
                    category: AlertCategory::Renal,
                    action: AlertAction::Warn,
                    message: MessageTemplates::renal_adjustment(&med.drug_name, egfr, threshold),
                    detail: AlertDetail::Renal(RenalDetail {
                        medication_name: med.drug_name.clone(),
                        egfr: Some(egfr),
                        creatinine: snapshot.creatinine(),
                        threshold_egfr: threshold,
                    }),
                });
            }
            Some(_) => {}
            None => {
                if let Some(creatinine) = snapshot.creatinine() {
                    if creatinine > CREATININE_LIMIT {
                        alerts.push(SafetyAlert {
                            severity: Severity::Medium,
                            category: AlertCategory::Renal,
                            action: AlertAction::Warn,
                            message: MessageTemplates::renal_proxy(&med.drug_name, creatinine),
                            detail: AlertDetail::Renal(RenalDetail {
                                medication_name: med.drug_name.clone(),
                                egfr: None,
                                creatinine: Some(creatinine),
                                threshold_egfr: threshold,
                            }),
                        });
                    }
                }
            }
        }
    }

    alerts
}

// ---------------------------------------------------------------------------
// [4] HEPATIC check
// ---------------------------------------------------------------------------

/// Flag hepatic-caution drugs when any liver enzyme is deranged.
/// One alert per medication, on the first elevated enzyme found.
pub fn check_hepatic(
    prescription: &Prescription,
    snapshot: &PatientSnapshot,
    reference: &DrugReference,
) -> Vec<SafetyAlert> {
    let mut alerts = Vec::new();

    for med in &prescription.medications {
        let Some(drug) = reference.find_drug(&med.drug_name) else {
            continue;
        };
        if !drug.hepatic_caution {
            continue;
        }

        for test_name in LIVER_ENZYMES {
            let Some(lab) = snapshot.lab(test_name) else {
                continue;
            };
            if lab.value > LIVER_ENZYME_LIMIT {
                alerts.push(SafetyAlert {
                    severity: Severity::Medium,
                    category: AlertCategory::Hepatic,
                    action: AlertAction::Warn,
                    message: MessageTemplates::hepatic_caution(
                        &med.drug_name,
                        test_name,
                        lab.value,
                    ),
                    detail: AlertDetail::Hepatic(HepaticDetail {
                        medication_name: med.drug_name.clone(),
                        test_name: test_name.to_string(),
                        value: lab.value,
                    }),
                });
                break;
            }
        }
    }

    alerts
}

// ---------------------------------------------------------------------------
// [5] CONTRAINDICATION check
// ---------------------------------------------------------------------------

/// Match the drug's contraindicated conditions against active problems.
/// One alert per matching condition/problem pair.
pub fn check_contraindications(
    prescription: &Prescription,
    snapshot: &PatientSnapshot,
    reference: &DrugReference,
) -> Vec<SafetyAlert> {
    let mut alerts = Vec::new();

    for med in &prescription.medications {
        let Some(drug) = reference.find_drug(&med.drug_name) else {
            continue;
        };

        for condition in &drug.contraindicated_conditions {
            for problem in &snapshot.active_problems {
                if text_match(problem, condition) {
                    alerts.push(SafetyAlert {
                        severity: Severity::High,
                        category: AlertCategory::Contraindication,
                        action: AlertAction::Warn,
                        message: MessageTemplates::contraindicated(
                            &med.drug_name,
                            condition,
                            problem,
                        ),
                        detail: AlertDetail::Contraindication(ContraindicationDetail {
                            medication_name: med.drug_name.clone(),
                            condition: condition.clone(),
                            active_problem: problem.clone(),
                        }),
                    });
                }
            }
        }
    }

    alerts
}

// ---------------------------------------------------------------------------
// [6] INTERACTION check
// ---------------------------------------------------------------------------

/// Run every interaction rule against the union of proposed and currently
/// active medications. A rule fires when at least two of its drugs are
/// present, and carries its own severity, action and message.
pub fn check_interactions(
    prescription: &Prescription,
    snapshot: &PatientSnapshot,
    reference: &DrugReference,
) -> Vec<SafetyAlert> {
    let mut alerts = Vec::new();

    let mut regimen: Vec<&str> = prescription
        .medications
        .iter()
        .map(|m| m.drug_name.as_str())
        .collect();
    regimen.extend(
        snapshot
            .current_medications
            .iter()
            .map(|m| m.drug_name.as_str()),
    );

    for rule in &reference.interactions {
        let matched: Vec<String> = rule
            .drugs
            .iter()
            .filter(|rule_drug| regimen.iter().any(|name| text_match(name, rule_drug)))
            .cloned()
            .collect();

        if matched.len() >= 2 {
            alerts.push(SafetyAlert {
                severity: rule.severity.clone(),
                category: AlertCategory::Interaction,
                action: rule.action.clone(),
                message: rule.message.clone(),
                detail: AlertDetail::Interaction(InteractionDetail {
                    matched_drugs: matched,
                }),
            });
        }
    }

    alerts
}

// ---------------------------------------------------------------------------
// [7] DUPLICATE check
// ---------------------------------------------------------------------------

/// Catch re-prescription of an active drug, literally or through the
/// formulary (same entry, or two drugs sharing a therapeutic class).
pub fn check_duplicates(
    prescription: &Prescription,
    snapshot: &PatientSnapshot,
    reference: &DrugReference,
) -> Vec<SafetyAlert> {
    let mut alerts = Vec::new();

    for med in &prescription.medications {
        for existing in &snapshot.current_medications {
            if text_match(&med.drug_name, &existing.drug_name) {
                alerts.push(duplicate_alert(&med.drug_name, &existing.drug_name, None));
                continue;
            }

            let (Some(a), Some(b)) = (
                reference.find_drug(&med.drug_name),
                reference.find_drug(&existing.drug_name),
            ) else {
                continue;
            };

            if a.name == b.name {
                alerts.push(duplicate_alert(&med.drug_name, &existing.drug_name, None));
            } else if !a.drug_class.is_empty() && a.drug_class == b.drug_class {
                alerts.push(SafetyAlert {
                    severity: Severity::Low,
                    category: AlertCategory::Duplicate,
                    action: AlertAction::Info,
                    message: MessageTemplates::same_class(
                        &med.drug_name,
                        &existing.drug_name,
                        &a.drug_class,
                    ),
                    detail: AlertDetail::Duplicate(DuplicateDetail {
                        medication_name: med.drug_name.clone(),
                        existing_medication: existing.drug_name.clone(),
                        drug_class: Some(a.drug_class.clone()),
                    }),
                });
            }
        }
    }

    alerts
}

fn duplicate_alert(medication: &str, existing: &str, drug_class: Option<String>) -> SafetyAlert {
    SafetyAlert {
        severity: Severity::Medium,
        category: AlertCategory::Duplicate,
        action: AlertAction::Warn,
        message: MessageTemplates::duplicate_drug(medication, existing),
        detail: AlertDetail::Duplicate(DuplicateDetail {
            medication_name: medication.to_string(),
            existing_medication: existing.to_string(),
            drug_class,
        }),
    }
}
