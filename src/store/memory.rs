use std::collections::HashMap;

use chrono::NaiveDate;

use crate::models::{
    ClinicalSearchHit, Consultation, Investigation, LabValue, Patient, PatientSnapshot,
    ProcedureRecord, Visit,
};
use crate::safety::dose::leading_number;

use super::{PatientRecordStore, PatientSnapshotProvider, StoreError};

/// Drugs whose presence in the active regimen marks the patient as
/// anticoagulated, checked by name substring.
const ANTICOAGULANTS: &[&str] = &[
    "warfarin",
    "acenocoumarol",
    "dabigatran",
    "rivaroxaban",
    "apixaban",
    "heparin",
    "enoxaparin",
];

/// In-memory implementation of both store traits.
///
/// Used by this crate's tests and offered to downstream integration tests;
/// the FTS methods are naive token scans, good enough to exercise every
/// caller path without a search index.
pub struct InMemoryRecordStore {
    patients: Vec<Patient>,
    consultations: Vec<Consultation>,
    investigations: Vec<Investigation>,
    procedures: Vec<ProcedureRecord>,
    visits: Vec<Visit>,
    snapshots: HashMap<String, PatientSnapshot>,
    allergies: HashMap<String, Vec<String>>,
    problems: HashMap<String, Vec<String>>,
}

impl InMemoryRecordStore {
    pub fn new() -> Self {
        Self {
            patients: Vec::new(),
            consultations: Vec::new(),
            investigations: Vec::new(),
            procedures: Vec::new(),
            visits: Vec::new(),
            snapshots: HashMap::new(),
            allergies: HashMap::new(),
            problems: HashMap::new(),
        }
    }

    pub fn add_patient(&mut self, patient: Patient) {
        self.patients.push(patient);
    }

    pub fn add_consultation(&mut self, consultation: Consultation) {
        self.consultations.push(consultation);
    }

    pub fn add_investigation(&mut self, investigation: Investigation) {
        self.investigations.push(investigation);
    }

    pub fn add_procedure(&mut self, procedure: ProcedureRecord) {
        self.procedures.push(procedure);
    }

    pub fn add_visit(&mut self, visit: Visit) {
        self.visits.push(visit);
    }

    /// Register a precomputed snapshot, returned verbatim by
    /// `get_snapshot`.
    pub fn put_snapshot(&mut self, snapshot: PatientSnapshot) {
        self.snapshots
            .insert(snapshot.patient_id.clone(), snapshot);
    }

    pub fn add_allergy(&mut self, patient_id: &str, allergen: &str) {
        self.allergies
            .entry(patient_id.to_string())
            .or_default()
            .push(allergen.to_string());
    }

    pub fn add_problem(&mut self, patient_id: &str, problem: &str) {
        self.problems
            .entry(patient_id.to_string())
            .or_default()
            .push(problem.to_string());
    }

    fn newest_visit(&self, patient_id: &str) -> Option<&Visit> {
        self.visits
            .iter()
            .filter(|v| v.patient_id == patient_id)
            .max_by_key(|v| v.date)
    }
}

impl Default for InMemoryRecordStore {
    fn default() -> Self {
        Self::new()
    }
}

fn lowercase_tokens(text: &str) -> Vec<String> {
    text.split_whitespace()
        .map(|w| {
            w.trim_matches(|c: char| !c.is_alphanumeric())
                .to_lowercase()
        })
        .filter(|w| !w.is_empty())
        .collect()
}

/// Count how many distinct keywords appear in the haystack.
fn keyword_hits(haystack: &str, keywords: &[String]) -> usize {
    let lower = haystack.to_lowercase();
    keywords
        .iter()
        .filter(|k| !k.is_empty() && lower.contains(k.as_str()))
        .count()
}

impl PatientRecordStore for InMemoryRecordStore {
    fn get_patient(&self, id: &str) -> Result<Option<Patient>, StoreError> {
        Ok(self
            .patients
            .iter()
            .find(|p| p.id.eq_ignore_ascii_case(id))
            .cloned())
    }

    fn search_patients_basic(&self, text: &str) -> Result<Vec<Patient>, StoreError> {
        let needle = text.trim().to_lowercase();
        if needle.is_empty() {
            return Ok(Vec::new());
        }
        let mut found: Vec<Patient> = self
            .patients
            .iter()
            .filter(|p| p.name.to_lowercase().contains(&needle))
            .cloned()
            .collect();
        found.sort_by(|a, b| a.name.cmp(&b.name).then_with(|| a.id.cmp(&b.id)));
        Ok(found)
    }

    fn get_all_patients(&self) -> Result<Vec<Patient>, StoreError> {
        Ok(self.patients.clone())
    }

    fn fts_search_clinical(
        &self,
        keywords: &[String],
        patient_id: &str,
        limit: usize,
    ) -> Result<Vec<ClinicalSearchHit>, StoreError> {
        if keywords.is_empty() {
            return Ok(Vec::new());
        }
        let mut hits: Vec<ClinicalSearchHit> = Vec::new();

        for c in self.consultations.iter().filter(|c| c.patient_id == patient_id) {
            let haystack = format!(
                "{} {} {} {}",
                c.specialty,
                c.doctor_name,
                c.summary,
                c.advice.as_deref().unwrap_or("")
            );
            let rank = keyword_hits(&haystack, keywords);
            if rank > 0 {
                hits.push(ClinicalSearchHit {
                    record_id: c.id,
                    source: "consultation".into(),
                    date: Some(c.date),
                    snippet: format!("{} ({}): {}", c.specialty, c.doctor_name, c.summary),
                    rank: rank as f64,
                });
            }
        }

        for i in self.investigations.iter().filter(|i| i.patient_id == patient_id) {
            let haystack = format!("{} {}", i.test_name, i.value);
            let rank = keyword_hits(&haystack, keywords);
            if rank > 0 {
                hits.push(ClinicalSearchHit {
                    record_id: i.id,
                    source: "investigation".into(),
                    date: Some(i.date),
                    snippet: format!(
                        "{}: {} {}",
                        i.test_name,
                        i.value,
                        i.unit.as_deref().unwrap_or("")
                    ),
                    rank: rank as f64,
                });
            }
        }

        for p in self.procedures.iter().filter(|p| p.patient_id == patient_id) {
            let haystack = format!("{} {}", p.name, p.notes.as_deref().unwrap_or(""));
            let rank = keyword_hits(&haystack, keywords);
            if rank > 0 {
                hits.push(ClinicalSearchHit {
                    record_id: p.id,
                    source: "procedure".into(),
                    date: Some(p.date),
                    snippet: p.name.clone(),
                    rank: rank as f64,
                });
            }
        }

        for v in self.visits.iter().filter(|v| v.patient_id == patient_id) {
            let haystack = format!(
                "{} {} {}",
                v.doctor_name,
                v.diagnoses.join(" "),
                v.notes.as_deref().unwrap_or("")
            );
            let rank = keyword_hits(&haystack, keywords);
            if rank > 0 {
                hits.push(ClinicalSearchHit {
                    record_id: v.id,
                    source: "visit".into(),
                    date: Some(v.date),
                    snippet: format!("Visit ({}): {}", v.doctor_name, v.diagnoses.join(", ")),
                    rank: rank as f64,
                });
            }
        }

        hits.sort_by(|a, b| {
            b.rank
                .partial_cmp(&a.rank)
                .unwrap_or(std::cmp::Ordering::Equal)
                .then_with(|| b.date.cmp(&a.date))
                .then_with(|| a.source.cmp(&b.source))
                .then_with(|| a.record_id.cmp(&b.record_id))
        });
        hits.truncate(limit);
        Ok(hits)
    }

    fn fts_search_patients(&self, text: &str, limit: usize) -> Result<Vec<Patient>, StoreError> {
        let tokens = lowercase_tokens(text);
        if tokens.is_empty() {
            return Ok(Vec::new());
        }
        // Every token must appear somewhere in the name, FTS AND semantics.
        let mut found: Vec<Patient> = self
            .patients
            .iter()
            .filter(|p| {
                let name = p.name.to_lowercase();
                tokens.iter().all(|t| name.contains(t.as_str()))
            })
            .cloned()
            .collect();
        found.sort_by(|a, b| a.name.cmp(&b.name).then_with(|| a.id.cmp(&b.id)));
        found.truncate(limit);
        Ok(found)
    }

    fn get_consultations_by_specialty(
        &self,
        patient_id: &str,
        specialty: &str,
        limit: usize,
    ) -> Result<Vec<Consultation>, StoreError> {
        let needle = specialty.to_lowercase();
        let mut rows: Vec<Consultation> = self
            .consultations
            .iter()
            .filter(|c| c.patient_id == patient_id && c.specialty.to_lowercase().contains(&needle))
            .cloned()
            .collect();
        rows.sort_by(|a, b| b.date.cmp(&a.date));
        rows.truncate(limit);
        Ok(rows)
    }

    fn get_all_patient_consultations(
        &self,
        patient_id: &str,
        limit: usize,
    ) -> Result<Vec<Consultation>, StoreError> {
        let mut rows: Vec<Consultation> = self
            .consultations
            .iter()
            .filter(|c| c.patient_id == patient_id)
            .cloned()
            .collect();
        rows.sort_by(|a, b| b.date.cmp(&a.date));
        rows.truncate(limit);
        Ok(rows)
    }

    fn get_patient_investigations(
        &self,
        patient_id: &str,
    ) -> Result<Vec<Investigation>, StoreError> {
        let mut rows: Vec<Investigation> = self
            .investigations
            .iter()
            .filter(|i| i.patient_id == patient_id)
            .cloned()
            .collect();
        rows.sort_by(|a, b| b.date.cmp(&a.date));
        Ok(rows)
    }

    fn get_patient_procedures(
        &self,
        patient_id: &str,
    ) -> Result<Vec<ProcedureRecord>, StoreError> {
        let mut rows: Vec<ProcedureRecord> = self
            .procedures
            .iter()
            .filter(|p| p.patient_id == patient_id)
            .cloned()
            .collect();
        rows.sort_by(|a, b| b.date.cmp(&a.date));
        Ok(rows)
    }

    fn get_patient_visits(&self, patient_id: &str) -> Result<Vec<Visit>, StoreError> {
        let mut rows: Vec<Visit> = self
            .visits
            .iter()
            .filter(|v| v.patient_id == patient_id)
            .cloned()
            .collect();
        rows.sort_by(|a, b| b.date.cmp(&a.date));
        Ok(rows)
    }
}

impl PatientSnapshotProvider for InMemoryRecordStore {
    fn get_snapshot(&self, patient_id: &str) -> Result<Option<PatientSnapshot>, StoreError> {
        Ok(self.snapshots.get(patient_id).cloned())
    }

    /// Assemble a snapshot from the stored records: medications from the
    /// most recent visit, one lab value per test name (newest wins),
    /// registered allergies and problems plus visit diagnoses.
    fn compute_snapshot(&self, patient_id: &str) -> Result<PatientSnapshot, StoreError> {
        let mut snapshot = PatientSnapshot::empty(patient_id);

        if let Some(list) = self.allergies.get(patient_id) {
            snapshot.allergies = list.clone();
        }
        if let Some(list) = self.problems.get(patient_id) {
            snapshot.active_problems = list.clone();
        }
        for visit in self.visits.iter().filter(|v| v.patient_id == patient_id) {
            for diagnosis in &visit.diagnoses {
                let already = snapshot
                    .active_problems
                    .iter()
                    .any(|p| p.eq_ignore_ascii_case(diagnosis));
                if !already {
                    snapshot.active_problems.push(diagnosis.clone());
                }
            }
        }

        if let Some(visit) = self.newest_visit(patient_id) {
            snapshot.current_medications = visit.medications.clone();
        }

        let mut newest_dates: HashMap<String, NaiveDate> = HashMap::new();
        for inv in self
            .investigations
            .iter()
            .filter(|i| i.patient_id == patient_id)
        {
            let Some(value) = leading_number(&inv.value) else {
                continue;
            };
            let key = inv.test_name.to_lowercase();
            let newer = newest_dates.get(&key).map_or(true, |d| inv.date > *d);
            if newer {
                newest_dates.insert(key.clone(), inv.date);
                snapshot.key_labs.insert(
                    key,
                    LabValue {
                        value,
                        unit: inv.unit.clone().unwrap_or_default(),
                        date: Some(inv.date),
                    },
                );
            }
        }

        for med in &snapshot.current_medications {
            let name = med.drug_name.to_lowercase();
            if let Some(drug) = ANTICOAGULANTS.iter().find(|a| name.contains(*a)) {
                snapshot.on_anticoagulation = true;
                snapshot.anticoagulant = Some((*drug).to_string());
                break;
            }
        }

        Ok(snapshot)
    }
}

#[cfg(test)]
mod tests {
    use uuid::Uuid;

    use crate::models::Medication;

    use super::*;

    fn make_patient(id: &str, name: &str) -> Patient {
        Patient {
            id: id.to_string(),
            name: name.to_string(),
            age: None,
            gender: None,
            phone: None,
        }
    }

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn make_visit(patient_id: &str, on: NaiveDate, doctor: &str, meds: Vec<Medication>) -> Visit {
        Visit {
            id: Uuid::new_v4(),
            patient_id: patient_id.to_string(),
            date: on,
            doctor_name: doctor.to_string(),
            diagnoses: vec!["Type 2 diabetes".to_string()],
            medications: meds,
            notes: None,
        }
    }

    fn make_investigation(patient_id: &str, on: NaiveDate, test: &str, value: &str) -> Investigation {
        Investigation {
            id: Uuid::new_v4(),
            patient_id: patient_id.to_string(),
            date: on,
            test_name: test.to_string(),
            value: value.to_string(),
            unit: Some("mg/dL".to_string()),
        }
    }

    #[test]
    fn get_patient_is_case_insensitive_on_uhid() {
        let mut store = InMemoryRecordStore::new();
        store.add_patient(make_patient("UH230018", "Shailesh Kumar"));

        assert!(store.get_patient("uh230018").unwrap().is_some());
        assert!(store.get_patient("UH230018").unwrap().is_some());
        assert!(store.get_patient("UH999999").unwrap().is_none());
    }

    #[test]
    fn basic_search_is_substring_and_sorted() {
        let mut store = InMemoryRecordStore::new();
        store.add_patient(make_patient("P2", "Ram Kumar"));
        store.add_patient(make_patient("P1", "Kumari Devi"));
        store.add_patient(make_patient("P3", "Suresh Rao"));

        let found = store.search_patients_basic("kumar").unwrap();
        let names: Vec<&str> = found.iter().map(|p| p.name.as_str()).collect();
        assert_eq!(names, vec!["Kumari Devi", "Ram Kumar"]);
        assert!(store.search_patients_basic("   ").unwrap().is_empty());
    }

    #[test]
    fn fts_patients_requires_every_token() {
        let mut store = InMemoryRecordStore::new();
        store.add_patient(make_patient("P1", "Ram Kumar"));
        store.add_patient(make_patient("P2", "Ram Prasad"));

        let found = store.fts_search_patients("ram kumar", 10).unwrap();
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].id, "P1");
    }

    #[test]
    fn fts_clinical_ranks_by_hits_and_respects_limit() {
        let mut store = InMemoryRecordStore::new();
        store.add_consultation(Consultation {
            id: Uuid::new_v4(),
            patient_id: "P1".into(),
            date: date(2024, 3, 1),
            specialty: "nephrology".into(),
            doctor_name: "Dr. Rao".into(),
            summary: "Creatinine rising, advised dose review".into(),
            advice: Some("Repeat creatinine in 2 weeks".into()),
        });
        store.add_investigation(make_investigation("P1", date(2024, 3, 2), "Creatinine", "1.8"));
        store.add_investigation(make_investigation("P2", date(2024, 3, 2), "Creatinine", "1.1"));

        let keywords = vec!["creatinine".to_string(), "dose".to_string()];
        let hits = store.fts_search_clinical(&keywords, "P1", 10).unwrap();
        assert_eq!(hits.len(), 2, "other patients' rows must not leak in");
        // The consultation matches both keywords, the investigation one.
        assert_eq!(hits[0].source, "consultation");
        assert!(hits[0].rank > hits[1].rank);

        let capped = store.fts_search_clinical(&keywords, "P1", 1).unwrap();
        assert_eq!(capped.len(), 1);
    }

    #[test]
    fn consultations_filter_by_specialty_newest_first() {
        let mut store = InMemoryRecordStore::new();
        for (when, specialty) in [
            (date(2024, 1, 5), "cardiology"),
            (date(2024, 6, 5), "nephrology"),
            (date(2024, 3, 5), "nephrology"),
        ] {
            store.add_consultation(Consultation {
                id: Uuid::new_v4(),
                patient_id: "P1".into(),
                date: when,
                specialty: specialty.into(),
                doctor_name: "Dr. Rao".into(),
                summary: "Review".into(),
                advice: None,
            });
        }

        let rows = store
            .get_consultations_by_specialty("P1", "nephrology", 10)
            .unwrap();
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].date, date(2024, 6, 5));
    }

    #[test]
    fn computed_snapshot_uses_newest_visit_and_newest_labs() {
        let mut store = InMemoryRecordStore::new();
        store.add_patient(make_patient("P1", "Ram Kumar"));
        store.add_allergy("P1", "Penicillin");
        store.add_problem("P1", "Hypertension");
        store.add_visit(make_visit(
            "P1",
            date(2024, 1, 10),
            "Dr. Rao",
            vec![Medication::new("Metformin", "500mg", "1 tablet", "BD")],
        ));
        store.add_visit(make_visit(
            "P1",
            date(2024, 6, 10),
            "Dr. Rao",
            vec![
                Medication::new("Metformin", "1000mg", "1 tablet", "BD"),
                Medication::new("Warfarin", "5mg", "1 tablet", "OD"),
            ],
        ));
        store.add_investigation(make_investigation("P1", date(2024, 1, 12), "Creatinine", "1.2"));
        store.add_investigation(make_investigation("P1", date(2024, 6, 12), "Creatinine", "1.8"));

        let snapshot = store.compute_snapshot("P1").unwrap();
        assert_eq!(snapshot.allergies, vec!["Penicillin"]);
        assert!(snapshot
            .active_problems
            .iter()
            .any(|p| p == "Type 2 diabetes"));
        assert_eq!(snapshot.current_medications.len(), 2);
        assert_eq!(snapshot.current_medications[0].strength, "1000mg");
        assert_eq!(snapshot.creatinine(), Some(1.8));
        assert!(snapshot.on_anticoagulation);
        assert_eq!(snapshot.anticoagulant.as_deref(), Some("warfarin"));
    }

    #[test]
    fn computed_snapshot_for_unknown_patient_is_empty() {
        let store = InMemoryRecordStore::new();
        let snapshot = store.compute_snapshot("NOBODY").unwrap();
        assert!(snapshot.allergies.is_empty());
        assert!(snapshot.current_medications.is_empty());
        assert!(!snapshot.on_anticoagulation);
    }

    #[test]
    fn cached_snapshot_round_trips() {
        let mut store = InMemoryRecordStore::new();
        let mut snapshot = PatientSnapshot::empty("P1");
        snapshot.allergies.push("Sulfa".into());
        store.put_snapshot(snapshot);

        let cached = store.get_snapshot("P1").unwrap().unwrap();
        assert_eq!(cached.allergies, vec!["Sulfa"]);
        assert!(store.get_snapshot("P2").unwrap().is_none());
    }
}
