use std::sync::LazyLock;

use regex::Regex;

use crate::models::Medication;

/// Regex patterns for free-text dose fields (compiled once via LazyLock).
static RE_NUMBER: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"(\d+\.?\d*)").unwrap());
static RE_EVERY_HOURS: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?:every|q)\s*(\d+\.?\d*)\s*(?:hours?|hrs?|h)\b").unwrap());

/// First numeric value in a free-text field, if any.
pub fn leading_number(text: &str) -> Option<f64> {
    RE_NUMBER
        .captures(text)
        .and_then(|caps| caps.get(1))
        .and_then(|m| m.as_str().parse::<f64>().ok())
}

/// Units per administration from the dose field ("2 tablets" -> 2.0).
/// Defaults to 1.0 when nothing numeric is present.
pub fn dose_units(dose: &str) -> f64 {
    leading_number(dose).unwrap_or(1.0)
}

/// Strength per unit in the label's own unit ("500mg" -> 500.0).
/// Zero when the field carries no number.
pub fn strength_amount(strength: &str) -> f64 {
    leading_number(strength).unwrap_or(0.0)
}

/// Amount per administration. With a numeric strength this is
/// units x strength; without one the dose number stands alone, which
/// keeps prescriptions that write "650 mg" in the dose field working.
pub fn single_dose(med: &Medication) -> f64 {
    let units = dose_units(&med.dose);
    let strength = strength_amount(&med.strength);
    if strength > 0.0 {
        units * strength
    } else {
        units
    }
}

/// Administrations per day from a free-text frequency.
/// Handles: "OD", "BD", "TDS", "QID", "1-0-1", "5x/day", "q6h",
/// "every 8 hours", "once daily". Unrecognized input counts as once
/// daily so a garbled frequency never suppresses a dose check entirely.
pub fn frequency_per_day(frequency: &str) -> f64 {
    let normalized = frequency.trim().to_lowercase();
    if normalized.is_empty() {
        return 1.0;
    }
    match normalized.as_str() {
        "od" | "qd" | "once daily" | "once a day" | "daily" => return 1.0,
        "bd" | "bid" | "twice daily" | "twice a day" => return 2.0,
        "tds" | "tid" | "thrice daily" | "three times a day" | "three times daily" => return 3.0,
        "qid" | "four times a day" | "four times daily" => return 4.0,
        "hs" | "at bedtime" | "at night" => return 1.0,
        "sos" | "prn" | "as needed" | "when required" => return 0.5,
        "stat" => return 1.0,
        _ => {}
    }
    if let Some(caps) = RE_EVERY_HOURS.captures(&normalized) {
        if let Some(hours) = caps.get(1).and_then(|m| m.as_str().parse::<f64>().ok()) {
            if hours >= 1.0 {
                return 24.0 / hours;
            }
        }
    }
    // Morning-noon-night schedule notation: "1-0-1" is two doses a day.
    let parts: Vec<&str> = normalized.split('-').map(str::trim).collect();
    if parts.len() >= 2 {
        let numbers: Vec<f64> = parts
            .iter()
            .filter_map(|p| p.parse::<f64>().ok())
            .collect();
        if numbers.len() == parts.len() {
            return numbers.iter().sum();
        }
    }
    leading_number(&normalized).unwrap_or(1.0)
}

/// Cumulative amount over a day: per-administration dose times frequency.
pub fn daily_dose(med: &Medication) -> f64 {
    single_dose(med) * frequency_per_day(&med.frequency)
}
