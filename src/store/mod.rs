//! External collaborator interfaces.
//!
//! This core never owns persistence. Patient rows, clinical records and
//! snapshots live behind the two traits below; the real application backs
//! them with its own storage engine. `InMemoryRecordStore` is a complete
//! in-process implementation used by this crate's tests and available to
//! downstream integration tests.
//!
//! Callers of the search and context engines must treat every `StoreError`
//! as a degraded read, never a fatal condition: the engines catch failures
//! at the call site and substitute placeholder output.

pub mod memory;

pub use memory::InMemoryRecordStore;

use thiserror::Error;

use crate::models::{
    ClinicalSearchHit, Consultation, Investigation, Patient, PatientSnapshot, ProcedureRecord,
    Visit,
};

#[derive(Error, Debug)]
pub enum StoreError {
    #[error("Record store unavailable: {0}")]
    Unavailable(String),

    #[error("Entity not found: {entity_type} with id {id}")]
    NotFound { entity_type: String, id: String },

    #[error("Store backend error: {0}")]
    Backend(String),
}

/// Read access to the clinic's patient records.
///
/// All methods are synchronous reads over already-persisted data; `Send +
/// Sync` so one implementation can serve any number of caller threads.
pub trait PatientRecordStore: Send + Sync {
    /// Look up one patient by UHID. `Ok(None)` when the id is unknown.
    fn get_patient(&self, id: &str) -> Result<Option<Patient>, StoreError>;

    /// Case-insensitive substring search over patient names.
    fn search_patients_basic(&self, text: &str) -> Result<Vec<Patient>, StoreError>;

    fn get_all_patients(&self) -> Result<Vec<Patient>, StoreError>;

    /// Full-text search over one patient's clinical records.
    fn fts_search_clinical(
        &self,
        keywords: &[String],
        patient_id: &str,
        limit: usize,
    ) -> Result<Vec<ClinicalSearchHit>, StoreError>;

    /// Full-text search over the patient registry.
    fn fts_search_patients(&self, text: &str, limit: usize) -> Result<Vec<Patient>, StoreError>;

    fn get_consultations_by_specialty(
        &self,
        patient_id: &str,
        specialty: &str,
        limit: usize,
    ) -> Result<Vec<Consultation>, StoreError>;

    fn get_all_patient_consultations(
        &self,
        patient_id: &str,
        limit: usize,
    ) -> Result<Vec<Consultation>, StoreError>;

    fn get_patient_investigations(&self, patient_id: &str)
        -> Result<Vec<Investigation>, StoreError>;

    fn get_patient_procedures(&self, patient_id: &str)
        -> Result<Vec<ProcedureRecord>, StoreError>;

    fn get_patient_visits(&self, patient_id: &str) -> Result<Vec<Visit>, StoreError>;
}

/// Access to a patient's point-in-time clinical summary.
pub trait PatientSnapshotProvider: Send + Sync {
    /// The cached snapshot, if the store holds one.
    fn get_snapshot(&self, patient_id: &str) -> Result<Option<PatientSnapshot>, StoreError>;

    /// Assemble a snapshot from the underlying records. Used as the
    /// fallback when no cached snapshot exists.
    fn compute_snapshot(&self, patient_id: &str) -> Result<PatientSnapshot, StoreError>;
}
