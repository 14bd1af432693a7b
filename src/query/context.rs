//! Clinical context assembly.
//!
//! `build_context` turns a patient question into a framed text block for
//! the answering layer: a safety header first, then one section per
//! detected intent, in a fixed order that does not depend on how the
//! underlying reads were scheduled. Every store failure degrades to an
//! explanatory placeholder line; this function never returns an error.

use std::collections::BTreeMap;

use chrono::NaiveDate;

use crate::models::{
    Consultation, Investigation, Medication, PatientSnapshot, ProcedureRecord, QueryCategory,
    TimeFilter, Visit,
};
use crate::safety::dose::leading_number;
use crate::store::{PatientRecordStore, PatientSnapshotProvider};

use super::parser::parse_query;

/// Below this many characters the assembled context is considered thin
/// and supplemented with a keyword full-text pass.
const FTS_SUPPLEMENT_THRESHOLD: usize = 500;
const FTS_SUPPLEMENT_LIMIT: usize = 5;
const CONSULTATION_LIMIT: usize = 10;
const VISIT_LIMIT: usize = 5;
const LAB_ROW_LIMIT: usize = 10;
const SUMMARY_ITEM_LIMIT: usize = 3;
/// Relative change below which an oldest-vs-newest lab pair is stable.
const TREND_THRESHOLD: f64 = 0.10;

/// Assemble the record context for answering `question` about one patient.
///
/// Always returns a non-empty string: the safety header is built even for
/// an unknown patient, and every missing or failing section is replaced
/// with a "no data" line.
pub fn build_context(
    records: &dyn PatientRecordStore,
    snapshots: &dyn PatientSnapshotProvider,
    patient_id: &str,
    question: &str,
) -> String {
    let parsed = parse_query(question, patient_id);
    let snapshot = fetch_snapshot(snapshots, patient_id);

    let mut sections: Vec<(&str, String)> = Vec::new();
    sections.push(("PATIENT SAFETY", safety_header(snapshot.as_ref())));

    if let Some(specialty) = &parsed.specialty {
        sections.push((
            "SPECIALIST CONSULTATIONS",
            consultation_section(records, patient_id, specialty),
        ));
    } else if let Some(doctor) = &parsed.doctor_name {
        sections.push(("DOCTOR RECORDS", doctor_section(records, patient_id, doctor)));
    }

    for category in &parsed.categories {
        match category {
            QueryCategory::Lab => sections.push((
                "LAB RESULTS",
                lab_section(records, patient_id, parsed.test_name.as_deref()),
            )),
            QueryCategory::Medication => sections.push((
                "CURRENT MEDICATIONS",
                medication_section(records, snapshot.as_ref(), patient_id),
            )),
            QueryCategory::Procedure => {
                sections.push(("PROCEDURES", procedure_section(records, patient_id)))
            }
            QueryCategory::History => sections.push((
                "VISIT HISTORY",
                visit_section(records, patient_id, parsed.time_filter.as_ref()),
            )),
            QueryCategory::Trend => sections.push((
                "LAB TRENDS",
                trend_section(records, patient_id, parsed.test_name.as_deref()),
            )),
            QueryCategory::General => {
                // The compact summary only stands in when nothing more
                // specific was asked for.
                if parsed.specialty.is_none() && parsed.doctor_name.is_none() {
                    sections.push((
                        "PATIENT SUMMARY",
                        summary_section(records, snapshot.as_ref(), patient_id),
                    ));
                }
            }
        }
    }

    let mut context = frame(&sections);
    if context.len() < FTS_SUPPLEMENT_THRESHOLD && !parsed.keywords.is_empty() {
        if let Some(extra) = fts_section(records, patient_id, &parsed.keywords) {
            sections.push(("ADDITIONAL RECORDS", extra));
            context = frame(&sections);
        }
    }

    tracing::info!(
        patient_id = %patient_id,
        query_type = parsed.query_type.as_str(),
        sections = sections.len(),
        context_chars = context.len(),
        "Clinical context assembled"
    );
    context
}

fn frame(sections: &[(&str, String)]) -> String {
    sections
        .iter()
        .map(|(label, content)| format!("<{label}>\n{content}\n</{label}>"))
        .collect::<Vec<_>>()
        .join("\n\n")
}

fn fetch_snapshot(
    provider: &dyn PatientSnapshotProvider,
    patient_id: &str,
) -> Option<PatientSnapshot> {
    match provider.get_snapshot(patient_id) {
        Ok(Some(snapshot)) => return Some(snapshot),
        Ok(None) => {}
        Err(e) => {
            tracing::warn!(error = %e, "Snapshot read failed, recomputing");
        }
    }
    match provider.compute_snapshot(patient_id) {
        Ok(snapshot) => Some(snapshot),
        Err(e) => {
            tracing::warn!(error = %e, "Snapshot computation failed");
            None
        }
    }
}

fn safety_header(snapshot: Option<&PatientSnapshot>) -> String {
    let Some(snapshot) = snapshot else {
        return "Patient snapshot unavailable; verify allergies and active problems manually."
            .to_string();
    };
    let mut lines = Vec::new();
    if snapshot.allergies.is_empty() {
        lines.push("Allergies: NKDA (no known drug allergies)".to_string());
    } else {
        lines.push(format!("Allergies: {}", snapshot.allergies.join(", ")));
    }
    if snapshot.active_problems.is_empty() {
        lines.push("Active problems: none on record".to_string());
    } else {
        lines.push(format!(
            "Active problems: {}",
            snapshot.active_problems.join(", ")
        ));
    }
    if snapshot.on_anticoagulation {
        let agent = snapshot
            .anticoagulant
            .as_deref()
            .unwrap_or("agent not recorded");
        lines.push(format!("On anticoagulation: {agent}"));
    }
    lines.join("\n")
}

fn consultation_section(
    records: &dyn PatientRecordStore,
    patient_id: &str,
    specialty: &str,
) -> String {
    let rows =
        match records.get_consultations_by_specialty(patient_id, specialty, CONSULTATION_LIMIT) {
            Ok(rows) => rows,
            Err(e) => {
                tracing::warn!(error = %e, specialty, "Consultation fetch failed");
                return "Consultation records are unavailable right now.".to_string();
            }
        };
    if rows.is_empty() {
        return format!("No {specialty} consultations on record.");
    }
    rows.iter()
        .map(format_consultation)
        .collect::<Vec<_>>()
        .join("\n")
}

fn doctor_section(records: &dyn PatientRecordStore, patient_id: &str, doctor: &str) -> String {
    let needle = doctor.to_lowercase();
    let mut lines: Vec<String> = Vec::new();

    match records.get_all_patient_consultations(patient_id, CONSULTATION_LIMIT) {
        Ok(rows) => lines.extend(
            rows.iter()
                .filter(|c| c.doctor_name.to_lowercase().contains(&needle))
                .map(format_consultation),
        ),
        Err(e) => {
            tracing::warn!(error = %e, "Consultation fetch failed");
            lines.push("Consultation records are unavailable right now.".to_string());
        }
    }

    match records.get_patient_visits(patient_id) {
        Ok(mut rows) => {
            rows.sort_by(|a, b| b.date.cmp(&a.date));
            lines.extend(
                rows.iter()
                    .filter(|v| v.doctor_name.to_lowercase().contains(&needle))
                    .take(VISIT_LIMIT)
                    .map(format_visit),
            );
        }
        Err(e) => {
            tracing::warn!(error = %e, "Visit fetch failed");
            lines.push("Visit records are unavailable right now.".to_string());
        }
    }

    if lines.is_empty() {
        return format!("No records from {doctor} found.");
    }
    lines.join("\n")
}

fn lab_section(
    records: &dyn PatientRecordStore,
    patient_id: &str,
    test_name: Option<&str>,
) -> String {
    let mut rows = match records.get_patient_investigations(patient_id) {
        Ok(rows) => rows,
        Err(e) => {
            tracing::warn!(error = %e, "Investigation fetch failed");
            return "Lab records are unavailable right now.".to_string();
        }
    };
    if let Some(test) = test_name {
        rows.retain(|r| r.test_name.to_lowercase().contains(test));
    }
    rows.sort_by(|a, b| b.date.cmp(&a.date));
    if rows.is_empty() {
        return match test_name {
            Some(test) => format!("No {test} results on record."),
            None => "No lab results on record.".to_string(),
        };
    }
    rows.iter()
        .take(LAB_ROW_LIMIT)
        .map(format_investigation)
        .collect::<Vec<_>>()
        .join("\n")
}

fn medication_section(
    records: &dyn PatientRecordStore,
    snapshot: Option<&PatientSnapshot>,
    patient_id: &str,
) -> String {
    if let Some(snapshot) = snapshot {
        if !snapshot.current_medications.is_empty() {
            return snapshot
                .current_medications
                .iter()
                .map(format_medication)
                .collect::<Vec<_>>()
                .join("\n");
        }
    }
    // Snapshot has nothing; fall back to the newest visit's prescription.
    match records.get_patient_visits(patient_id) {
        Ok(rows) => match rows.into_iter().max_by_key(|v| v.date) {
            Some(visit) if !visit.medications.is_empty() => visit
                .medications
                .iter()
                .map(format_medication)
                .collect::<Vec<_>>()
                .join("\n"),
            _ => "No current medications on record.".to_string(),
        },
        Err(e) => {
            tracing::warn!(error = %e, "Visit fetch failed");
            "Medication records are unavailable right now.".to_string()
        }
    }
}

fn procedure_section(records: &dyn PatientRecordStore, patient_id: &str) -> String {
    let mut rows = match records.get_patient_procedures(patient_id) {
        Ok(rows) => rows,
        Err(e) => {
            tracing::warn!(error = %e, "Procedure fetch failed");
            return "Procedure records are unavailable right now.".to_string();
        }
    };
    rows.sort_by(|a, b| b.date.cmp(&a.date));
    if rows.is_empty() {
        return "No procedures on record.".to_string();
    }
    rows.iter()
        .map(format_procedure)
        .collect::<Vec<_>>()
        .join("\n")
}

fn visit_section(
    records: &dyn PatientRecordStore,
    patient_id: &str,
    time_filter: Option<&TimeFilter>,
) -> String {
    let mut rows = match records.get_patient_visits(patient_id) {
        Ok(rows) => rows,
        Err(e) => {
            tracing::warn!(error = %e, "Visit fetch failed");
            return "Visit records are unavailable right now.".to_string();
        }
    };
    if rows.is_empty() {
        return "No visits on record.".to_string();
    }
    match time_filter {
        Some(TimeFilter::First) => {
            rows.sort_by(|a, b| a.date.cmp(&b.date));
            rows.truncate(VISIT_LIMIT);
        }
        Some(TimeFilter::Recent) => {
            rows.sort_by(|a, b| b.date.cmp(&a.date));
            rows.truncate(VISIT_LIMIT);
        }
        Some(TimeFilter::All) | None => {
            rows.sort_by(|a, b| b.date.cmp(&a.date));
        }
    }
    rows.iter().map(format_visit).collect::<Vec<_>>().join("\n")
}

fn trend_section(
    records: &dyn PatientRecordStore,
    patient_id: &str,
    test_name: Option<&str>,
) -> String {
    let rows = match records.get_patient_investigations(patient_id) {
        Ok(rows) => rows,
        Err(e) => {
            tracing::warn!(error = %e, "Investigation fetch failed");
            return "Lab records are unavailable right now.".to_string();
        }
    };

    let mut series: BTreeMap<String, Vec<(NaiveDate, f64, String)>> = BTreeMap::new();
    for row in &rows {
        if let Some(test) = test_name {
            if !row.test_name.to_lowercase().contains(test) {
                continue;
            }
        }
        let Some(value) = leading_number(&row.value) else {
            continue;
        };
        series.entry(row.test_name.to_lowercase()).or_default().push((
            row.date,
            value,
            row.unit.clone().unwrap_or_default(),
        ));
    }

    let mut lines = Vec::new();
    for (test, mut points) in series {
        if points.len() < 2 {
            continue;
        }
        points.sort_by_key(|(date, _, _)| *date);
        let oldest = points[0].1;
        let newest = points[points.len() - 1].1;
        let unit = points[points.len() - 1].2.clone();
        let direction = classify_trend(oldest, newest);
        let unit_suffix = if unit.is_empty() {
            String::new()
        } else {
            format!(" {unit}")
        };
        lines.push(format!(
            "- {test}: {oldest} -> {newest}{unit_suffix} ({direction})"
        ));
    }
    if lines.is_empty() {
        return "Not enough numeric results to compute trends.".to_string();
    }
    lines.join("\n")
}

fn classify_trend(oldest: f64, newest: f64) -> &'static str {
    if oldest == 0.0 {
        // Relative change is undefined; classify on the raw difference.
        if newest > 0.0 {
            return "increased";
        }
        if newest < 0.0 {
            return "decreased";
        }
        return "stable";
    }
    let change = (newest - oldest) / oldest;
    if change > TREND_THRESHOLD {
        "increased"
    } else if change < -TREND_THRESHOLD {
        "decreased"
    } else {
        "stable"
    }
}

fn summary_section(
    records: &dyn PatientRecordStore,
    snapshot: Option<&PatientSnapshot>,
    patient_id: &str,
) -> String {
    let mut lines: Vec<String> = Vec::new();

    match records.get_patient_visits(patient_id) {
        Ok(mut rows) => {
            rows.sort_by(|a, b| b.date.cmp(&a.date));
            lines.extend(rows.iter().take(SUMMARY_ITEM_LIMIT).map(format_visit));
        }
        Err(e) => {
            tracing::warn!(error = %e, "Visit fetch failed");
            lines.push("Visit records are unavailable right now.".to_string());
        }
    }

    if let Some(snapshot) = snapshot {
        for (test, lab) in &snapshot.key_labs {
            let unit = if lab.unit.is_empty() {
                String::new()
            } else {
                format!(" {}", lab.unit)
            };
            let date = lab.date.map(|d| format!(" on {d}")).unwrap_or_default();
            lines.push(format!("- {}: {}{}{}", test, lab.value, unit, date));
        }
    }

    match records.get_patient_procedures(patient_id) {
        Ok(mut rows) => {
            rows.sort_by(|a, b| b.date.cmp(&a.date));
            lines.extend(rows.iter().take(SUMMARY_ITEM_LIMIT).map(format_procedure));
        }
        Err(e) => {
            tracing::warn!(error = %e, "Procedure fetch failed");
            lines.push("Procedure records are unavailable right now.".to_string());
        }
    }

    if lines.is_empty() {
        return "No clinical records on file for this patient.".to_string();
    }
    lines.join("\n")
}

fn fts_section(
    records: &dyn PatientRecordStore,
    patient_id: &str,
    keywords: &[String],
) -> Option<String> {
    let hits = match records.fts_search_clinical(keywords, patient_id, FTS_SUPPLEMENT_LIMIT) {
        Ok(hits) => hits,
        Err(e) => {
            tracing::warn!(error = %e, "Keyword search failed");
            return None;
        }
    };
    if hits.is_empty() {
        return None;
    }
    let lines: Vec<String> = hits
        .iter()
        .map(|h| match h.date {
            Some(date) => format!("- [{}] {}: {}", date, h.source, h.snippet),
            None => format!("- {}: {}", h.source, h.snippet),
        })
        .collect();
    Some(lines.join("\n"))
}

fn format_consultation(c: &Consultation) -> String {
    let mut line = format!(
        "- [{}] {} ({}): {}",
        c.date, c.specialty, c.doctor_name, c.summary
    );
    if let Some(advice) = &c.advice {
        line.push_str(&format!(" Advice: {advice}"));
    }
    line
}

fn format_visit(v: &Visit) -> String {
    let diagnoses = if v.diagnoses.is_empty() {
        "no diagnosis recorded".to_string()
    } else {
        v.diagnoses.join(", ")
    };
    let mut line = format!("- [{}] {}: {}", v.date, v.doctor_name, diagnoses);
    if !v.medications.is_empty() {
        let meds: Vec<String> = v
            .medications
            .iter()
            .map(|m| format!("{} {}", m.drug_name, m.strength))
            .collect();
        line.push_str(&format!(" | Rx: {}", meds.join(", ")));
    }
    line
}

fn format_investigation(i: &Investigation) -> String {
    match &i.unit {
        Some(unit) => format!("- [{}] {}: {} {}", i.date, i.test_name, i.value, unit),
        None => format!("- [{}] {}: {}", i.date, i.test_name, i.value),
    }
}

fn format_medication(m: &Medication) -> String {
    let mut line = format!(
        "- {} {} {} {}",
        m.drug_name, m.strength, m.dose, m.frequency
    );
    if !m.duration.is_empty() {
        line.push_str(&format!(" ({})", m.duration));
    }
    line
}

fn format_procedure(p: &ProcedureRecord) -> String {
    match &p.notes {
        Some(notes) => format!("- [{}] {}: {}", p.date, p.name, notes),
        None => format!("- [{}] {}", p.date, p.name),
    }
}
