//! Prescription safety validation.
//!
//! Seven independent checks run over a proposed prescription, the
//! patient's clinical snapshot and the bundled reference tables:
//! allergy (direct and cross-reactive), dose limits, renal and hepatic
//! caution, contraindications, drug interactions and duplicate therapy.
//! All checks are pure functions; `validate_prescription` orchestrates
//! them into a single timed report.

pub mod alerts;
pub mod checks;
pub mod dose;
pub mod messages;
pub mod validator;

pub use alerts::{
    AlertCounts, AlertDetail, AllergyDetail, ContraindicationDetail, DoseDetail, DoseLimitKind,
    DuplicateDetail, HepaticDetail, InteractionDetail, RenalDetail, SafetyAlert, SafetyReport,
};
pub use validator::validate_prescription;
