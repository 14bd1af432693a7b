pub mod allergy;
pub mod drugs;
pub mod interactions;

pub use allergy::CrossReactivityEntry;
pub use drugs::DrugInfo;
pub use interactions::InteractionRule;

use std::path::Path;

use serde::de::DeserializeOwned;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ReferenceError {
    #[error("Reference data load failed ({0}): {1}")]
    Load(String, String),

    #[error("Reference data parse failed ({0}): {1}")]
    Parse(String, String),
}

/// Static clinical reference tables. Constructed once at startup and shared
/// by reference; nothing mutates it afterwards.
///
/// `load_from_dir` expects three JSON files, each a flat array of the
/// corresponding entry type: `drug_reference.json`, `interaction_rules.json`
/// and `allergy_cross_reactivity.json`.
#[derive(Debug, Clone)]
pub struct DrugReference {
    pub drugs: Vec<DrugInfo>,
    pub interactions: Vec<InteractionRule>,
    pub cross_reactivity: Vec<CrossReactivityEntry>,
}

fn load_json<T: DeserializeOwned>(dir: &Path, file_name: &str) -> Result<Vec<T>, ReferenceError> {
    let path = dir.join(file_name);
    let json = std::fs::read_to_string(&path)
        .map_err(|e| ReferenceError::Load(path.display().to_string(), e.to_string()))?;
    serde_json::from_str(&json).map_err(|e| ReferenceError::Parse(file_name.into(), e.to_string()))
}

impl DrugReference {
    /// Load reference tables from a resources directory.
    pub fn load_from_dir(dir: &Path) -> Result<Self, ReferenceError> {
        Ok(Self {
            drugs: load_json(dir, "drug_reference.json")?,
            interactions: load_json(dir, "interaction_rules.json")?,
            cross_reactivity: load_json(dir, "allergy_cross_reactivity.json")?,
        })
    }

    /// Bundled tables; no file I/O.
    pub fn builtin() -> Self {
        Self {
            drugs: drugs::builtin_formulary(),
            interactions: interactions::builtin_interactions(),
            cross_reactivity: allergy::builtin_cross_reactivity(),
        }
    }

    /// Resolve a medication name to a formulary entry by case-insensitive
    /// substring match in either direction. When several entries match
    /// (e.g. a combination product), the longest drug name wins.
    pub fn find_drug(&self, medication_name: &str) -> Option<&DrugInfo> {
        let lower = medication_name.to_lowercase();
        self.drugs
            .iter()
            .filter(|d| lower.contains(&d.name) || d.name.contains(&lower))
            .max_by_key(|d| d.name.len())
    }

    /// Find the cross-reactivity entry for a recorded allergy string.
    pub fn cross_reactive(&self, allergen: &str) -> Option<&CrossReactivityEntry> {
        let lower = allergen.to_lowercase();
        self.cross_reactivity
            .iter()
            .find(|e| lower.contains(&e.allergen_class) || e.allergen_class.contains(&lower))
    }
}
