//! Multi-strategy patient lookup.
//!
//! Four strategies run in fixed precedence: exact UHID fetch, name
//! substring search, registry full-text search, then a phonetic sweep over
//! the remaining candidates. A patient found by an earlier strategy is
//! never re-scored by a later one; the merged list is sorted by score and
//! truncated to the caller's limit.
//!
//! Every store call degrades on error: the strategy contributes nothing
//! and the remaining strategies still run.

use std::cmp::Ordering;
use std::collections::{HashMap, HashSet};

use serde::Serialize;

use crate::models::{MatchType, Patient};
use crate::phonetics;
use crate::store::PatientRecordStore;

/// Minimum phonetic similarity for the fallback strategy.
const PHONETIC_THRESHOLD: f64 = 0.6;

#[derive(Debug, Clone, Serialize)]
pub struct PatientMatch {
    pub patient: Patient,
    pub score: f64,
    pub match_type: MatchType,
}

/// Rank patients against a free-form query, best match first.
///
/// An identifier-shaped query resolves by UHID alone. Anything else runs
/// the name, full-text and phonetic strategies in order; the phonetic
/// sweep is O(n) over the registry and only runs while the earlier
/// strategies returned fewer than `limit` hits.
pub fn search_patients(
    store: &dyn PatientRecordStore,
    query: &str,
    limit: usize,
) -> Vec<PatientMatch> {
    let query = query.trim();
    if query.is_empty() || limit == 0 {
        return Vec::new();
    }

    let mut results: Vec<PatientMatch> = Vec::new();
    let mut seen: HashSet<String> = HashSet::new();

    if looks_like_identifier(query) {
        match lookup_by_id(store, query) {
            Some(patient) => {
                tracing::debug!(patient_id = %patient.id, "Patient search: UHID hit");
                // A UHID names exactly one patient; the later strategies
                // could only re-find this row at a lower score, so the
                // merged result is the same either way.
                return vec![PatientMatch {
                    patient,
                    score: 1.0,
                    match_type: MatchType::IdExact,
                }];
            }
            None => {
                tracing::debug!(query_len = query.len(), "Patient search: no UHID hit");
            }
        }
    }

    let name_hits = match store.search_patients_basic(query) {
        Ok(found) => found,
        Err(e) => {
            tracing::warn!(error = %e, "Patient search: name search unavailable");
            Vec::new()
        }
    };
    let query_lower = query.to_lowercase();
    let named = name_hits.len();
    for patient in name_hits {
        if !seen.insert(patient.id.clone()) {
            continue;
        }
        let (score, match_type) = classify_name_match(&query_lower, &patient.name);
        results.push(PatientMatch {
            patient,
            score,
            match_type,
        });
    }

    let fts_hits = match store.fts_search_patients(query, limit) {
        Ok(found) => found,
        Err(e) => {
            tracing::warn!(error = %e, "Patient search: registry full-text unavailable");
            Vec::new()
        }
    };
    let mut from_fts = 0usize;
    for patient in fts_hits {
        if !seen.insert(patient.id.clone()) {
            continue;
        }
        from_fts += 1;
        results.push(PatientMatch {
            patient,
            score: 0.8,
            match_type: MatchType::FullText,
        });
    }

    let mut from_phonetic = 0usize;
    if results.len() < limit {
        let candidates: Vec<Patient> = match store.get_all_patients() {
            Ok(all) => all
                .into_iter()
                .filter(|p| !seen.contains(&p.id))
                .collect(),
            Err(e) => {
                tracing::warn!(error = %e, "Patient search: registry scan unavailable");
                Vec::new()
            }
        };
        let by_id: HashMap<&str, &Patient> =
            candidates.iter().map(|p| (p.id.as_str(), p)).collect();
        for found in phonetics::search_candidates(query, &candidates, PHONETIC_THRESHOLD) {
            let Some(patient) = by_id.get(found.id.as_str()) else {
                continue;
            };
            from_phonetic += 1;
            results.push(PatientMatch {
                patient: (*patient).clone(),
                score: found.score,
                match_type: MatchType::Phonetic,
            });
        }
    }

    results.sort_by(|a, b| {
        b.score
            .partial_cmp(&a.score)
            .unwrap_or(Ordering::Equal)
            .then_with(|| a.patient.name.cmp(&b.patient.name))
            .then_with(|| a.patient.id.cmp(&b.patient.id))
    });
    results.truncate(limit);

    tracing::debug!(
        query_len = query.len(),
        by_name = named,
        by_fulltext = from_fts,
        by_phonetic = from_phonetic,
        returned = results.len(),
        "Patient search complete"
    );
    results
}

/// A UHID is all digits, or a short site prefix (1 to 4 letters) followed
/// by digits, e.g. "230018" or "UH230018".
fn looks_like_identifier(query: &str) -> bool {
    if query.chars().all(|c| c.is_ascii_digit()) {
        return true;
    }
    let prefix_len = query.chars().take_while(|c| c.is_ascii_alphabetic()).count();
    if !(1..=4).contains(&prefix_len) {
        return false;
    }
    let digits = &query[prefix_len..];
    !digits.is_empty() && digits.chars().all(|c| c.is_ascii_digit())
}

fn lookup_by_id(store: &dyn PatientRecordStore, query: &str) -> Option<Patient> {
    match store.get_patient(query) {
        Ok(Some(patient)) => return Some(patient),
        Ok(None) => {}
        Err(e) => {
            tracing::warn!(error = %e, "Patient search: UHID lookup unavailable");
            return None;
        }
    }
    let upper = query.to_uppercase();
    if upper == query {
        return None;
    }
    match store.get_patient(&upper) {
        Ok(found) => found,
        Err(e) => {
            tracing::warn!(error = %e, "Patient search: UHID lookup unavailable");
            None
        }
    }
}

fn classify_name_match(query_lower: &str, name: &str) -> (f64, MatchType) {
    let name_lower = name.to_lowercase();
    if name_lower == *query_lower {
        (0.98, MatchType::NameExact)
    } else if name_lower.starts_with(query_lower) {
        (0.95, MatchType::NamePrefix)
    } else {
        (0.85, MatchType::NameSubstring)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{ClinicalSearchHit, Consultation, Investigation, ProcedureRecord, Visit};
    use crate::store::{InMemoryRecordStore, StoreError};

    fn make_patient(id: &str, name: &str) -> Patient {
        Patient {
            id: id.to_string(),
            name: name.to_string(),
            age: None,
            gender: None,
            phone: None,
        }
    }

    fn make_store(patients: &[(&str, &str)]) -> InMemoryRecordStore {
        let mut store = InMemoryRecordStore::new();
        for (id, name) in patients {
            store.add_patient(make_patient(id, name));
        }
        store
    }

    /// Registry whose full-text and whole-table reads are down. Name and
    /// UHID reads still work.
    struct DegradedStore {
        inner: InMemoryRecordStore,
    }

    impl PatientRecordStore for DegradedStore {
        fn get_patient(&self, id: &str) -> Result<Option<Patient>, StoreError> {
            self.inner.get_patient(id)
        }

        fn search_patients_basic(&self, text: &str) -> Result<Vec<Patient>, StoreError> {
            self.inner.search_patients_basic(text)
        }

        fn get_all_patients(&self) -> Result<Vec<Patient>, StoreError> {
            Err(StoreError::Unavailable("registry scan offline".into()))
        }

        fn fts_search_clinical(
            &self,
            _keywords: &[String],
            _patient_id: &str,
            _limit: usize,
        ) -> Result<Vec<ClinicalSearchHit>, StoreError> {
            Err(StoreError::Unavailable("index offline".into()))
        }

        fn fts_search_patients(
            &self,
            _text: &str,
            _limit: usize,
        ) -> Result<Vec<Patient>, StoreError> {
            Err(StoreError::Unavailable("index offline".into()))
        }

        fn get_consultations_by_specialty(
            &self,
            _patient_id: &str,
            _specialty: &str,
            _limit: usize,
        ) -> Result<Vec<Consultation>, StoreError> {
            Ok(Vec::new())
        }

        fn get_all_patient_consultations(
            &self,
            _patient_id: &str,
            _limit: usize,
        ) -> Result<Vec<Consultation>, StoreError> {
            Ok(Vec::new())
        }

        fn get_patient_investigations(
            &self,
            _patient_id: &str,
        ) -> Result<Vec<Investigation>, StoreError> {
            Ok(Vec::new())
        }

        fn get_patient_procedures(
            &self,
            _patient_id: &str,
        ) -> Result<Vec<ProcedureRecord>, StoreError> {
            Ok(Vec::new())
        }

        fn get_patient_visits(&self, _patient_id: &str) -> Result<Vec<Visit>, StoreError> {
            Ok(Vec::new())
        }
    }

    #[test]
    fn uhid_query_short_circuits_with_full_score() {
        let store = make_store(&[("UH230018", "Shailesh Kumar"), ("UH230019", "Ram Kumar")]);
        let results = search_patients(&store, "UH230018", 10);
        assert_eq!(results.len(), 1);
        assert_eq!(results[0].score, 1.0);
        assert_eq!(results[0].match_type, MatchType::IdExact);
        assert_eq!(results[0].patient.name, "Shailesh Kumar");
    }

    #[test]
    fn lowercase_uhid_still_resolves() {
        let store = make_store(&[("UH230018", "Shailesh Kumar")]);
        let results = search_patients(&store, "uh230018", 10);
        assert_eq!(results.len(), 1);
        assert_eq!(results[0].match_type, MatchType::IdExact);
    }

    #[test]
    fn all_digit_query_is_treated_as_identifier() {
        assert!(looks_like_identifier("230018"));
        assert!(looks_like_identifier("UH230018"));
        assert!(!looks_like_identifier("Ram"));
        assert!(!looks_like_identifier("Kumar230018"));
        assert!(!looks_like_identifier("UH2300A8"));
    }

    #[test]
    fn name_tiers_rank_exact_above_prefix_above_substring() {
        let store = make_store(&[("P1", "Ram"), ("P2", "Ramesh"), ("P3", "Sita Ram")]);
        let results = search_patients(&store, "ram", 10);
        assert_eq!(results[0].patient.name, "Ram");
        assert_eq!(results[0].match_type, MatchType::NameExact);
        assert_eq!(results[1].patient.name, "Ramesh");
        assert_eq!(results[1].match_type, MatchType::NamePrefix);
        assert_eq!(results[2].patient.name, "Sita Ram");
        assert_eq!(results[2].match_type, MatchType::NameSubstring);
        for pair in results.windows(2) {
            assert!(pair[0].score >= pair[1].score);
        }
    }

    #[test]
    fn no_duplicate_ids_across_strategies() {
        // Every strategy matches "kumar" for these rows.
        let store = make_store(&[("P1", "Kumar"), ("P2", "Ram Kumar"), ("P3", "Kumari Devi")]);
        let results = search_patients(&store, "kumar", 10);
        let mut ids: Vec<&str> = results.iter().map(|m| m.patient.id.as_str()).collect();
        ids.sort();
        ids.dedup();
        assert_eq!(ids.len(), results.len());
    }

    #[test]
    fn phonetic_fallback_finds_spelling_variant() {
        let store = make_store(&[("P1", "Shailesh Kumar"), ("P2", "Ram Prasad")]);
        let results = search_patients(&store, "Shylesh", 10);
        assert_eq!(results.len(), 1);
        assert_eq!(results[0].patient.id, "P1");
        assert_eq!(results[0].match_type, MatchType::Phonetic);
        assert!(results[0].score >= PHONETIC_THRESHOLD);
    }

    #[test]
    fn phonetic_is_skipped_once_limit_is_reached() {
        let store = make_store(&[("P1", "Ram"), ("P2", "Ramesh"), ("P3", "Rahim")]);
        let results = search_patients(&store, "ram", 2);
        assert_eq!(results.len(), 2);
        assert!(results.iter().all(|m| m.match_type != MatchType::Phonetic));
    }

    #[test]
    fn empty_query_returns_nothing() {
        let store = make_store(&[("P1", "Ram")]);
        assert!(search_patients(&store, "", 10).is_empty());
        assert!(search_patients(&store, "   ", 10).is_empty());
        assert!(search_patients(&store, "ram", 0).is_empty());
    }

    #[test]
    fn degraded_collaborators_still_yield_name_matches() {
        let store = DegradedStore {
            inner: make_store(&[("P1", "Ram Kumar"), ("P2", "Shailesh Kumar")]),
        };
        let results = search_patients(&store, "kumar", 10);
        assert_eq!(results.len(), 2);
        assert!(results
            .iter()
            .all(|m| m.match_type == MatchType::NameSubstring));
    }

    #[test]
    fn results_are_sorted_and_truncated() {
        let store = make_store(&[
            ("P1", "Anil Kumar"),
            ("P2", "Kumar"),
            ("P3", "Kumari Devi"),
            ("P4", "Ram Kumar"),
        ]);
        let results = search_patients(&store, "kumar", 2);
        assert_eq!(results.len(), 2);
        assert_eq!(results[0].patient.name, "Kumar");
        assert_eq!(results[1].patient.name, "Kumari Devi");
    }
}
