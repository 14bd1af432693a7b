use std::collections::BTreeSet;
use std::sync::LazyLock;

use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::models::{QueryCategory, QueryType, TimeFilter};

use super::vocab::{
    HISTORY_WORDS, LAB_WORDS, MEDICATION_WORDS, PROCEDURE_WORDS, SPECIALTIES, STOPWORDS,
    TEST_NAMES, TIME_ALL, TIME_FIRST, TIME_RECENT, TREND_WORDS,
};

/// "Dr. Mehta", "Dr Mehta", "doctor Mehta". The capture keeps the original
/// casing for display and record filtering.
static RE_DOCTOR: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)\b(?:dr\.?|doctor)\s+(\w+)").unwrap());

/// Structured intent extracted from a free-form clinical question.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ParsedQuery {
    pub patient_id: String,
    pub query_type: QueryType,
    pub specialty: Option<String>,
    pub doctor_name: Option<String>,
    pub time_filter: Option<TimeFilter>,
    /// Non-exclusive: one question can ask about labs and medications at
    /// once. `BTreeSet` keeps section routing deterministic.
    pub categories: BTreeSet<QueryCategory>,
    /// Residual tokens for the full-text fallback, in question order.
    pub keywords: Vec<String>,
    pub test_name: Option<String>,
}

/// Classify a clinical question using keyword heuristics.
///
/// A specialty mention wins over a doctor mention; either may combine
/// with a time filter and any number of categories. A trend mention
/// overrides the query type last, so "creatinine trend from the
/// nephrologist" is treated as trend analysis.
pub fn parse_query(question: &str, patient_id: &str) -> ParsedQuery {
    let lower = question.to_lowercase();
    let toks = tokens(&lower);

    let mut query_type = QueryType::General;

    let mut specialty = None;
    for (stem, canonical) in SPECIALTIES {
        if lower.contains(stem) {
            specialty = Some((*canonical).to_string());
            query_type = QueryType::ConsultationLookup;
            break;
        }
    }

    let mut doctor_name = None;
    if specialty.is_none() {
        if let Some(caps) = RE_DOCTOR.captures(question) {
            doctor_name = Some(caps[1].to_string());
            query_type = QueryType::DoctorLookup;
        }
    }

    let time_filter = if has_any(&toks, TIME_RECENT) {
        Some(TimeFilter::Recent)
    } else if has_any(&toks, TIME_FIRST) {
        Some(TimeFilter::First)
    } else if has_any(&toks, TIME_ALL) {
        Some(TimeFilter::All)
    } else {
        None
    };

    let mut categories = BTreeSet::new();
    if has_any(&toks, LAB_WORDS) {
        categories.insert(QueryCategory::Lab);
    }
    if has_any(&toks, MEDICATION_WORDS) {
        categories.insert(QueryCategory::Medication);
    }
    if has_any(&toks, PROCEDURE_WORDS) {
        categories.insert(QueryCategory::Procedure);
    }
    if has_any(&toks, HISTORY_WORDS) {
        categories.insert(QueryCategory::History);
    }
    if has_any(&toks, TREND_WORDS) {
        categories.insert(QueryCategory::Trend);
        query_type = QueryType::TrendAnalysis;
    }
    if categories.is_empty() {
        categories.insert(QueryCategory::General);
    }

    let mut keywords: Vec<String> = Vec::new();
    for tok in &toks {
        if tok.len() > 2 && !STOPWORDS.contains(&tok.as_str()) && !keywords.contains(tok) {
            keywords.push(tok.clone());
        }
    }

    let mut test_name = None;
    if categories.contains(&QueryCategory::Lab) || categories.contains(&QueryCategory::Trend) {
        for name in TEST_NAMES {
            let hit = if name.contains(' ') {
                lower.contains(name)
            } else {
                toks.iter().any(|t| t == name)
            };
            if hit {
                test_name = Some((*name).to_string());
                break;
            }
        }
    }

    ParsedQuery {
        patient_id: patient_id.to_string(),
        query_type,
        specialty,
        doctor_name,
        time_filter,
        categories,
        keywords,
        test_name,
    }
}

fn tokens(lower: &str) -> Vec<String> {
    lower
        .split_whitespace()
        .map(|w| w.trim_matches(|c: char| !c.is_alphanumeric()).to_string())
        .filter(|w| !w.is_empty())
        .collect()
}

fn has_any(toks: &[String], vocab: &[&str]) -> bool {
    toks.iter().any(|t| vocab.contains(&t.as_str()))
}
