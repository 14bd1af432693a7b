use std::cmp::Ordering;

use crate::models::Patient;

use super::code::phonetic_code;

/// A candidate that scored at or above the caller's threshold.
#[derive(Debug, Clone)]
pub struct PhoneticMatch {
    pub id: String,
    pub name: String,
    pub score: f64,
}

/// Similarity between two names in [0.0, 1.0], computed on their phonetic
/// codes. Not symmetric: a query contained in a longer candidate scores
/// slightly higher than the reverse, so "Ram" finds "Ram Kumar" before
/// "Ram Kumar" finds "Ram". A name with no letters encodes to an empty
/// code and scores 0.0 against everything, itself included.
pub fn match_score(query_name: &str, candidate_name: &str) -> f64 {
    score_codes(&phonetic_code(query_name), &phonetic_code(candidate_name))
}

fn score_codes(query: &str, candidate: &str) -> f64 {
    if query.is_empty() || candidate.is_empty() {
        return 0.0;
    }
    if query == candidate {
        return 1.0;
    }
    if candidate.contains(query) {
        return 0.9;
    }
    if query.contains(candidate) {
        return 0.85;
    }
    let query_first = query.split(' ').next().unwrap_or("");
    let candidate_first = candidate.split(' ').next().unwrap_or("");
    if query_first.starts_with(candidate_first) || candidate_first.starts_with(query_first) {
        return 0.8;
    }
    for query_word in query.split(' ') {
        for candidate_word in candidate.split(' ') {
            if query_word.starts_with(candidate_word) || candidate_word.starts_with(query_word) {
                return 0.75;
            }
        }
    }
    // No structural overlap left; fall back to edit distance on the
    // space-stripped codes, scaled below the prefix tiers.
    let query_flat: String = query.chars().filter(|c| *c != ' ').collect();
    let candidate_flat: String = candidate.chars().filter(|c| *c != ' ').collect();
    let max_len = query_flat.chars().count().max(candidate_flat.chars().count());
    if max_len == 0 {
        return 0.0;
    }
    let distance = strsim::levenshtein(&query_flat, &candidate_flat);
    (1.0 - distance as f64 / max_len as f64).max(0.0) * 0.7
}

/// Score every candidate against the query name, keep those at or above
/// `threshold`, and return them best first. Ties sort by name then id so
/// repeated searches produce identical orderings.
pub fn search_candidates(
    query_name: &str,
    candidates: &[Patient],
    threshold: f64,
) -> Vec<PhoneticMatch> {
    let query_code = phonetic_code(query_name);
    let mut matches: Vec<PhoneticMatch> = candidates
        .iter()
        .filter_map(|patient| {
            let score = score_codes(&query_code, &phonetic_code(&patient.name));
            (score >= threshold).then(|| PhoneticMatch {
                id: patient.id.clone(),
                name: patient.name.clone(),
                score,
            })
        })
        .collect();
    matches.sort_by(|a, b| {
        b.score
            .partial_cmp(&a.score)
            .unwrap_or(Ordering::Equal)
            .then_with(|| a.name.cmp(&b.name))
            .then_with(|| a.id.cmp(&b.id))
    });
    matches
}
