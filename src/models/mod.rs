pub mod enums;
pub mod medication;
pub mod patient;
pub mod record;

pub use enums::{
    AlertAction, AlertCategory, MatchType, QueryCategory, QueryType, Severity, TimeFilter,
};
pub use medication::{Medication, Prescription};
pub use patient::{LabValue, Patient, PatientSnapshot};
pub use record::{ClinicalSearchHit, Consultation, Investigation, ProcedureRecord, Visit};

use thiserror::Error;

#[derive(Error, Debug)]
pub enum ModelError {
    #[error("Invalid enum value for {field}: {value}")]
    InvalidEnum { field: String, value: String },
}
