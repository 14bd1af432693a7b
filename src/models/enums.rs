use serde::{Deserialize, Serialize};

use super::ModelError;

/// Macro to generate enum with as_str + std::str::FromStr pattern
macro_rules! str_enum {
    ($name:ident { $($variant:ident => $s:literal),+ $(,)? }) => {
        #[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
        pub enum $name {
            $($variant),+
        }

        impl $name {
            pub fn as_str(&self) -> &'static str {
                match self {
                    $(Self::$variant => $s),+
                }
            }
        }

        impl std::str::FromStr for $name {
            type Err = ModelError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                match s {
                    $($s => Ok(Self::$variant)),+,
                    _ => Err(ModelError::InvalidEnum {
                        field: stringify!($name).into(),
                        value: s.into(),
                    }),
                }
            }
        }
    };
}

str_enum!(AlertCategory {
    Allergy => "allergy",
    Dose => "dose",
    Renal => "renal",
    Hepatic => "hepatic",
    Contraindication => "contraindication",
    Interaction => "interaction",
    Duplicate => "duplicate",
});

str_enum!(AlertAction {
    Block => "BLOCK",
    Warn => "WARN",
    Info => "INFO",
});

str_enum!(MatchType {
    IdExact => "id_exact",
    NameExact => "name_exact",
    NamePrefix => "name_prefix",
    NameSubstring => "name_substring",
    FullText => "fulltext",
    Phonetic => "phonetic",
});

str_enum!(TimeFilter {
    Recent => "recent",
    First => "first",
    All => "all",
});

str_enum!(QueryType {
    General => "general",
    ConsultationLookup => "consultation_lookup",
    DoctorLookup => "doctor_lookup",
    TrendAnalysis => "trend_analysis",
});

str_enum!(QueryCategory {
    Lab => "lab",
    Medication => "medication",
    Procedure => "procedure",
    History => "history",
    Trend => "trend",
    General => "general",
});

// ---------------------------------------------------------------------------
// Severity
// ---------------------------------------------------------------------------

/// Alert severity. Variant order gives `Low < Medium < High < Critical`,
/// so `max()` over a report yields the worst finding.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, PartialOrd, Ord)]
pub enum Severity {
    Low,
    Medium,
    High,
    Critical,
}

impl Severity {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Low => "LOW",
            Self::Medium => "MEDIUM",
            Self::High => "HIGH",
            Self::Critical => "CRITICAL",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    #[test]
    fn alert_category_round_trip() {
        for (variant, s) in [
            (AlertCategory::Allergy, "allergy"),
            (AlertCategory::Dose, "dose"),
            (AlertCategory::Renal, "renal"),
            (AlertCategory::Hepatic, "hepatic"),
            (AlertCategory::Contraindication, "contraindication"),
            (AlertCategory::Interaction, "interaction"),
            (AlertCategory::Duplicate, "duplicate"),
        ] {
            assert_eq!(variant.as_str(), s);
            assert_eq!(AlertCategory::from_str(s).unwrap(), variant);
        }
    }

    #[test]
    fn alert_action_round_trip() {
        for (variant, s) in [
            (AlertAction::Block, "BLOCK"),
            (AlertAction::Warn, "WARN"),
            (AlertAction::Info, "INFO"),
        ] {
            assert_eq!(variant.as_str(), s);
            assert_eq!(AlertAction::from_str(s).unwrap(), variant);
        }
    }

    #[test]
    fn match_type_round_trip() {
        for (variant, s) in [
            (MatchType::IdExact, "id_exact"),
            (MatchType::NameExact, "name_exact"),
            (MatchType::NamePrefix, "name_prefix"),
            (MatchType::NameSubstring, "name_substring"),
            (MatchType::FullText, "fulltext"),
            (MatchType::Phonetic, "phonetic"),
        ] {
            assert_eq!(variant.as_str(), s);
            assert_eq!(MatchType::from_str(s).unwrap(), variant);
        }
    }

    #[test]
    fn query_type_round_trip() {
        for (variant, s) in [
            (QueryType::General, "general"),
            (QueryType::ConsultationLookup, "consultation_lookup"),
            (QueryType::DoctorLookup, "doctor_lookup"),
            (QueryType::TrendAnalysis, "trend_analysis"),
        ] {
            assert_eq!(variant.as_str(), s);
            assert_eq!(QueryType::from_str(s).unwrap(), variant);
        }
    }

    #[test]
    fn severity_ordering() {
        assert!(Severity::Low < Severity::Medium);
        assert!(Severity::Medium < Severity::High);
        assert!(Severity::High < Severity::Critical);
    }

    #[test]
    fn severity_strings_are_uppercase() {
        assert_eq!(Severity::Critical.as_str(), "CRITICAL");
        assert_eq!(Severity::High.as_str(), "HIGH");
        assert_eq!(Severity::Medium.as_str(), "MEDIUM");
        assert_eq!(Severity::Low.as_str(), "LOW");
    }

    #[test]
    fn invalid_enum_returns_error() {
        assert!(AlertCategory::from_str("invalid").is_err());
        assert!(MatchType::from_str("unknown").is_err());
        assert!(TimeFilter::from_str("").is_err());
    }
}
