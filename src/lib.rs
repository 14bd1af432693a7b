//! Clinical intelligence core for an outpatient EMR.
//!
//! Four synchronous components over records the host application has
//! already fetched: prescription safety validation, phonetic name
//! matching tuned for Indian names in Latin script, multi-strategy
//! patient search, and question parsing with record context assembly.
//!
//! The crate performs no I/O of its own. Data access goes through the
//! [`store`] traits, reference tables are immutable after construction,
//! and nothing here panics on caller input: failures degrade to empty
//! results or placeholder text. Logging goes through `tracing`; the host
//! installs the subscriber.

pub mod engine;
pub mod models;
pub mod phonetics;
pub mod query;
pub mod reference;
pub mod safety;
pub mod search;
pub mod store;

pub use engine::ClinicalCore;
pub use models::{Medication, Patient, PatientSnapshot, Prescription};
pub use query::{build_context, parse_query, ParsedQuery};
pub use reference::DrugReference;
pub use safety::{validate_prescription, SafetyAlert, SafetyReport};
pub use search::{search_patients, PatientMatch};
pub use store::{InMemoryRecordStore, PatientRecordStore, PatientSnapshotProvider, StoreError};
