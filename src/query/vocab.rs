//! Keyword vocabularies behind the intent parser.
//!
//! All tables are compile-time constants read concurrently without
//! synchronization. Specialty keywords are stems matched by substring;
//! everything else matches whole tokens so short words like "all" cannot
//! fire inside "allergy".

/// Specialty stems in scan order, each mapped to the canonical specialty
/// name used in consultation records. Order matters where one stem is a
/// substring of another: "neurologist" contains "urologist", so the
/// neurology entry must be tried first. Longer multi-word aliases sit
/// before the short stems they contain for the same reason.
pub(super) const SPECIALTIES: &[(&str, &str)] = &[
    ("cardiolog", "cardiology"),
    ("heart specialist", "cardiology"),
    ("nephrolog", "nephrology"),
    ("kidney specialist", "nephrology"),
    ("neurolog", "neurology"),
    ("urolog", "urology"),
    ("gastroenterolog", "gastroenterology"),
    ("gastro", "gastroenterology"),
    ("dermatolog", "dermatology"),
    ("skin specialist", "dermatology"),
    ("orthopaed", "orthopedics"),
    ("orthoped", "orthopedics"),
    ("endocrinolog", "endocrinology"),
    ("diabetolog", "diabetology"),
    ("oncolog", "oncology"),
    ("gynaecolog", "gynecology"),
    ("gynecolog", "gynecology"),
    ("ophthalmolog", "ophthalmology"),
    ("eye specialist", "ophthalmology"),
    ("psychiatr", "psychiatry"),
    ("pulmonolog", "pulmonology"),
    ("chest specialist", "pulmonology"),
    ("rheumatolog", "rheumatology"),
    // Bare "ent" would fire inside "patient" and "recent".
    ("ent specialist", "ent"),
    ("ent surgeon", "ent"),
    ("paediatric", "pediatrics"),
    ("pediatric", "pediatrics"),
    ("physiotherap", "physiotherapy"),
];

pub(super) const TIME_RECENT: &[&str] = &["recent", "latest", "current", "last"];

pub(super) const TIME_FIRST: &[&str] = &["first", "initial", "earliest", "baseline"];

pub(super) const TIME_ALL: &[&str] = &["all", "every", "complete", "entire", "history"];

pub(super) const LAB_WORDS: &[&str] = &[
    "lab",
    "labs",
    "test",
    "tests",
    "report",
    "reports",
    "result",
    "results",
    "investigation",
    "investigations",
    "blood",
    "sugar",
    "hba1c",
    "creatinine",
    "egfr",
    "hemoglobin",
    "haemoglobin",
    "cholesterol",
    "lipid",
    "tsh",
    "urea",
    "platelet",
    "platelets",
];

pub(super) const MEDICATION_WORDS: &[&str] = &[
    "medication",
    "medications",
    "medicine",
    "medicines",
    "drug",
    "drugs",
    "tablet",
    "tablets",
    "prescription",
    "prescriptions",
    "prescribed",
    "dose",
    "dosage",
    "taking",
];

pub(super) const PROCEDURE_WORDS: &[&str] = &[
    "procedure",
    "procedures",
    "surgery",
    "surgeries",
    "operation",
    "operations",
    "dialysis",
    "endoscopy",
    "colonoscopy",
    "biopsy",
    "angioplasty",
    "angiography",
    "transplant",
];

pub(super) const HISTORY_WORDS: &[&str] = &[
    "history",
    "visit",
    "visits",
    "consultation",
    "consultations",
    "past",
    "previous",
    "earlier",
    "background",
];

pub(super) const TREND_WORDS: &[&str] = &[
    "trend",
    "trends",
    "trending",
    "progression",
    "change",
    "changes",
    "changed",
    "changing",
    "improving",
    "worsening",
    "increasing",
    "decreasing",
    "compare",
    "compared",
];

/// Known test names for the lab filter. Single words match whole tokens;
/// names with spaces match by substring on the lowercased question.
pub(super) const TEST_NAMES: &[&str] = &[
    "hba1c",
    "creatinine",
    "egfr",
    "hemoglobin",
    "haemoglobin",
    "cholesterol",
    "triglycerides",
    "tsh",
    "platelet",
    "urea",
    "sodium",
    "potassium",
    "bilirubin",
    "albumin",
    "alt",
    "ast",
    "sgpt",
    "sgot",
    "esr",
    "crp",
    "vitamin d",
    "vitamin b12",
    "uric acid",
    "blood sugar",
    "fasting sugar",
];

/// Dropped before residual keywords are handed to full-text search.
pub(super) const STOPWORDS: &[&str] = &[
    "the", "and", "for", "was", "were", "what", "when", "where", "which", "who",
    "whom", "why", "how", "did", "does", "doing", "done", "has", "have", "had",
    "his", "her", "him", "she", "they", "them", "their", "this", "that", "these",
    "those", "with", "without", "about", "tell", "show", "give", "get", "any",
    "are", "you", "your", "yours", "please", "can", "could", "would", "should",
    "will", "shall", "may", "might", "been", "being", "not", "but", "from",
    "into", "onto", "over", "under", "out", "off", "per", "via", "recent",
    "latest", "current", "last", "first", "initial", "earliest", "all", "every",
    "complete", "entire", "history", "patient", "doctor", "doctors",
];
