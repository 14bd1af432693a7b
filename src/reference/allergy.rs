use serde::{Deserialize, Serialize};

/// Cross-reactivity mapping for one allergen class (loaded from
/// allergy_cross_reactivity.json). A recorded allergy that matches
/// `allergen_class` extends to every drug in `cross_reactive`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CrossReactivityEntry {
    pub allergen_class: String,
    pub cross_reactive: Vec<String>,
}

fn entry(allergen_class: &str, cross_reactive: &[&str]) -> CrossReactivityEntry {
    CrossReactivityEntry {
        allergen_class: allergen_class.into(),
        cross_reactive: cross_reactive.iter().map(|s| (*s).into()).collect(),
    }
}

pub(super) fn builtin_cross_reactivity() -> Vec<CrossReactivityEntry> {
    vec![
        entry(
            "penicillin",
            &[
                "amoxicillin",
                "ampicillin",
                "cloxacillin",
                "piperacillin",
                "co-amoxiclav",
                "cephalexin",
                "cefixime",
                "ceftriaxone",
            ],
        ),
        entry(
            "cephalosporin",
            &[
                "cephalexin",
                "cefixime",
                "ceftriaxone",
                "cefuroxime",
                "cefpodoxime",
                "amoxicillin",
                "ampicillin",
            ],
        ),
        entry(
            "sulfa",
            &[
                "sulfamethoxazole",
                "cotrimoxazole",
                "sulfasalazine",
                "sulfadiazine",
            ],
        ),
        entry(
            "nsaid",
            &[
                "ibuprofen",
                "diclofenac",
                "naproxen",
                "ketorolac",
                "indomethacin",
                "mefenamic acid",
            ],
        ),
        entry("aspirin", &["ibuprofen", "diclofenac", "naproxen", "ketorolac"]),
        entry("codeine", &["tramadol", "morphine", "hydrocodone"]),
    ]
}
