//! Crate facade.
//!
//! `ClinicalCore` owns the reference tables and the record store handle
//! and exposes the four operations the EMR calls: prescription
//! validation, patient search, question parsing and context assembly.
//! Everything is synchronous; a `ClinicalCore` behind an `Arc` serves any
//! number of threads.

use crate::models::{PatientSnapshot, Prescription};
use crate::query::{self, ParsedQuery};
use crate::reference::DrugReference;
use crate::safety::{self, SafetyReport};
use crate::search::{self, PatientMatch};
use crate::store::{PatientRecordStore, PatientSnapshotProvider};

pub struct ClinicalCore<S> {
    store: S,
    reference: DrugReference,
}

impl<S> ClinicalCore<S>
where
    S: PatientRecordStore + PatientSnapshotProvider,
{
    /// Build a core over `store` with the bundled reference tables.
    pub fn new(store: S) -> Self {
        Self {
            store,
            reference: DrugReference::builtin(),
        }
    }

    /// Build a core with site-specific reference tables, e.g. loaded via
    /// [`DrugReference::load_from_dir`].
    pub fn with_reference(store: S, reference: DrugReference) -> Self {
        Self { store, reference }
    }

    pub fn reference(&self) -> &DrugReference {
        &self.reference
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    /// Validate a prescription against an already-fetched snapshot.
    pub fn validate_prescription(
        &self,
        prescription: &Prescription,
        snapshot: &PatientSnapshot,
    ) -> SafetyReport {
        safety::validate_prescription(prescription, snapshot, &self.reference)
    }

    /// Validate a prescription for a patient by id, fetching the snapshot
    /// from the store.
    ///
    /// When neither a cached nor a computed snapshot can be read the
    /// validation still runs, against an empty snapshot: dose limits and
    /// intra-prescription checks hold, but allergy, renal, hepatic and
    /// regimen interaction checks have nothing to compare against.
    pub fn validate_for_patient(
        &self,
        patient_id: &str,
        prescription: &Prescription,
    ) -> SafetyReport {
        let snapshot = self.snapshot_or_empty(patient_id);
        self.validate_prescription(prescription, &snapshot)
    }

    pub fn search_patients(&self, query: &str, limit: usize) -> Vec<PatientMatch> {
        search::search_patients(&self.store, query, limit)
    }

    pub fn parse_query(&self, question: &str, patient_id: &str) -> ParsedQuery {
        query::parse_query(question, patient_id)
    }

    pub fn build_context(&self, patient_id: &str, question: &str) -> String {
        query::build_context(&self.store, &self.store, patient_id, question)
    }

    fn snapshot_or_empty(&self, patient_id: &str) -> PatientSnapshot {
        match self.store.get_snapshot(patient_id) {
            Ok(Some(snapshot)) => return snapshot,
            Ok(None) => {}
            Err(e) => {
                tracing::warn!(error = %e, "Snapshot read failed, recomputing");
            }
        }
        match self.store.compute_snapshot(patient_id) {
            Ok(snapshot) => snapshot,
            Err(e) => {
                tracing::warn!(
                    error = %e,
                    patient_id = %patient_id,
                    "Validating without patient history; manual allergy review required"
                );
                PatientSnapshot::empty(patient_id)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use chrono::NaiveDate;
    use uuid::Uuid;

    use crate::models::{AlertCategory, Medication, Patient, Severity, Visit};
    use crate::store::InMemoryRecordStore;

    use super::*;

    /// Make engine logs visible under RUST_LOG when a test fails.
    fn init_tracing() {
        let _ = tracing_subscriber::fmt()
            .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
            .with_test_writer()
            .try_init();
    }

    fn seeded_core() -> ClinicalCore<InMemoryRecordStore> {
        init_tracing();
        let mut store = InMemoryRecordStore::new();
        store.add_patient(Patient {
            id: "UH230018".into(),
            name: "Shailesh Kumar".into(),
            age: Some(58),
            gender: Some("M".into()),
            phone: None,
        });
        store.add_allergy("UH230018", "Penicillin");
        store.add_visit(Visit {
            id: Uuid::new_v4(),
            patient_id: "UH230018".into(),
            date: NaiveDate::from_ymd_opt(2024, 6, 1).unwrap(),
            doctor_name: "Dr. Rao".into(),
            diagnoses: vec!["Type 2 diabetes".into()],
            medications: vec![Medication::new("Metformin", "500mg", "1 tablet", "BD")],
            notes: None,
        });
        ClinicalCore::new(store)
    }

    #[test]
    fn validate_for_patient_uses_stored_allergies() {
        let core = seeded_core();
        let prescription = Prescription {
            diagnoses: vec!["Sore throat".into()],
            medications: vec![Medication::new("Amoxicillin", "500mg", "1 capsule", "TDS")],
        };

        let report = core.validate_for_patient("UH230018", &prescription);
        assert!(report.has_blocking());
        let allergy = report
            .alerts
            .iter()
            .find(|a| a.category == AlertCategory::Allergy)
            .expect("allergy alert");
        assert_eq!(allergy.severity, Severity::Critical);
        assert!(allergy.message.contains("Amoxicillin"));
        assert!(allergy.message.contains("Penicillin"));
    }

    #[test]
    fn validate_for_unknown_patient_still_runs_dose_checks() {
        let core = seeded_core();
        let prescription = Prescription {
            diagnoses: vec![],
            medications: vec![Medication::new("Paracetamol", "1000mg", "1 tablet", "5 times a day")],
        };

        let report = core.validate_for_patient("NO-SUCH-ID", &prescription);
        assert!(report
            .alerts
            .iter()
            .any(|a| a.category == AlertCategory::Dose));
    }

    #[test]
    fn facade_search_and_context_are_wired() {
        let core = seeded_core();

        let results = core.search_patients("Shailesh", 5);
        assert_eq!(results.len(), 1);
        assert_eq!(results[0].patient.id, "UH230018");

        let parsed = core.parse_query("What did nephrologist recommend?", "UH230018");
        assert_eq!(parsed.specialty.as_deref(), Some("nephrology"));

        let context = core.build_context("UH230018", "current medications");
        assert!(context.contains("<PATIENT SAFETY>"));
        assert!(context.contains("Metformin"));
    }
}
