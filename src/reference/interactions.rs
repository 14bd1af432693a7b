use serde::{Deserialize, Serialize};

use crate::models::enums::{AlertAction, Severity};

/// One drug-drug interaction rule (loaded from interaction_rules.json).
/// Fires when at least two of `drugs` appear across the proposed and
/// current medication lists.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InteractionRule {
    /// Lowercase drug identifiers, two or more.
    pub drugs: Vec<String>,
    pub severity: Severity,
    pub action: AlertAction,
    pub message: String,
}

fn rule(drugs: &[&str], severity: Severity, action: AlertAction, message: &str) -> InteractionRule {
    InteractionRule {
        drugs: drugs.iter().map(|s| (*s).into()).collect(),
        severity,
        action,
        message: message.into(),
    }
}

pub(super) fn builtin_interactions() -> Vec<InteractionRule> {
    vec![
        rule(
            &["warfarin", "aspirin"],
            Severity::High,
            AlertAction::Warn,
            "Concurrent warfarin and aspirin markedly increases bleeding risk; review the indication and monitor INR closely.",
        ),
        rule(
            &["warfarin", "ibuprofen"],
            Severity::High,
            AlertAction::Warn,
            "Ibuprofen potentiates warfarin and raises gastrointestinal bleeding risk.",
        ),
        rule(
            &["warfarin", "diclofenac"],
            Severity::High,
            AlertAction::Warn,
            "Diclofenac potentiates warfarin and raises gastrointestinal bleeding risk.",
        ),
        rule(
            &["warfarin", "ciprofloxacin"],
            Severity::High,
            AlertAction::Warn,
            "Ciprofloxacin inhibits warfarin metabolism; INR may rise sharply.",
        ),
        rule(
            &["ibuprofen", "diclofenac", "aspirin"],
            Severity::Medium,
            AlertAction::Warn,
            "Dual NSAID therapy adds no analgesic benefit and raises gastrointestinal bleeding risk.",
        ),
        rule(
            &["glimepiride", "aspirin"],
            Severity::Medium,
            AlertAction::Warn,
            "Salicylates potentiate sulfonylurea hypoglycemia; advise glucose monitoring.",
        ),
        rule(
            &["atorvastatin", "azithromycin"],
            Severity::Medium,
            AlertAction::Warn,
            "Macrolides can raise statin exposure; watch for unexplained muscle pain.",
        ),
        rule(
            &["enalapril", "telmisartan"],
            Severity::High,
            AlertAction::Warn,
            "Dual renin-angiotensin blockade risks hyperkalemia and acute renal injury.",
        ),
        rule(
            &["methotrexate", "trimethoprim"],
            Severity::High,
            AlertAction::Block,
            "Trimethoprim with methotrexate can precipitate severe marrow suppression.",
        ),
        rule(
            &["tramadol", "fluoxetine", "sertraline"],
            Severity::High,
            AlertAction::Warn,
            "Serotonergic combination; risk of serotonin syndrome.",
        ),
    ]
}
