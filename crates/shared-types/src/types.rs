use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// A label that does not name any known severity or strategy
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown {kind}: {label}")]
pub struct ParseLabelError {
    pub kind: &'static str,
    pub label: String,
}

/// Finding severity, ordered most severe first.
///
/// The derived `Ord` follows declaration order, so `Critical < Major < Minor < Info`
/// and a finding passes a threshold when `severity <= threshold`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase", try_from = "String")]
pub enum Severity {
    Critical,
    Major,
    Minor,
    Info,
}

impl Severity {
    pub const ALL: [Severity; 4] = [
        Severity::Critical,
        Severity::Major,
        Severity::Minor,
        Severity::Info,
    ];

    /// Numeric rank used for threshold filtering (critical = 0)
    pub fn rank(self) -> u8 {
        match self {
            Severity::Critical => 0,
            Severity::Major => 1,
            Severity::Minor => 2,
            Severity::Info => 3,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Severity::Critical => "critical",
            Severity::Major => "major",
            Severity::Minor => "minor",
            Severity::Info => "info",
        }
    }

    /// True if this severity is at least as severe as `threshold`
    pub fn meets(self, threshold: Severity) -> bool {
        self.rank() <= threshold.rank()
    }
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Severity {
    type Err = ParseLabelError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let label = s.trim().to_lowercase();
        Severity::ALL
            .into_iter()
            .find(|sev| sev.as_str() == label)
            .ok_or(ParseLabelError {
                kind: "severity",
                label: s.trim().to_string(),
            })
    }
}

impl TryFrom<String> for Severity {
    type Error = ParseLabelError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

/// The five mutation strategies, declared in catalog order
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Strategy {
    Contradiction,
    Ambiguity,
    Deletion,
    Inversion,
    Boundary,
}

impl Strategy {
    /// Fixed execution order; finding IDs depend on it
    pub const ALL: [Strategy; 5] = [
        Strategy::Contradiction,
        Strategy::Ambiguity,
        Strategy::Deletion,
        Strategy::Inversion,
        Strategy::Boundary,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            Strategy::Contradiction => "contradiction",
            Strategy::Ambiguity => "ambiguity",
            Strategy::Deletion => "deletion",
            Strategy::Inversion => "inversion",
            Strategy::Boundary => "boundary",
        }
    }

    /// Comma-separated catalog, as shown in validation errors
    pub fn catalog() -> String {
        Strategy::ALL
            .iter()
            .map(|s| s.as_str())
            .collect::<Vec<_>>()
            .join(", ")
    }
}

impl fmt::Display for Strategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Strategy {
    type Err = ParseLabelError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let label = s.trim().to_lowercase();
        Strategy::ALL
            .into_iter()
            .find(|strategy| strategy.as_str() == label)
            .ok_or(ParseLabelError {
                kind: "strategy",
                label,
            })
    }
}

/// Where a finding points in the source document
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Location {
    pub line: usize, // 1-indexed
    pub section: String,
}

/// A single proposed mutation against the document
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Mutation {
    pub id: String,
    pub strategy: Strategy,
    pub location: Location,
    pub original: String,
    pub mutated: String,
    pub severity: Severity,
    pub detected: bool,
}

impl Mutation {
    /// Create an unverified finding. The ID is assigned after filtering.
    pub fn new(
        strategy: Strategy,
        location: Location,
        original: impl Into<String>,
        mutated: impl Into<String>,
        severity: Severity,
    ) -> Self {
        Self {
            id: String::new(),
            strategy,
            location,
            original: original.into(),
            mutated: mutated.into(),
            severity,
            detected: false,
        }
    }

    /// Mark the finding as confirmed by a structural signal
    pub fn mark_detected(mut self) -> Self {
        self.detected = true;
        self
    }
}

/// Output view of a mutation that no verifier caught
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SurvivingMutation {
    pub id: String,
    pub strategy: Strategy,
    pub location: Location,
    pub original: String,
    pub mutated: String,
    pub severity: Severity,
}

impl From<&Mutation> for SurvivingMutation {
    fn from(m: &Mutation) -> Self {
        Self {
            id: m.id.clone(),
            strategy: m.strategy,
            location: m.location.clone(),
            original: m.original.clone(),
            mutated: m.mutated.clone(),
            severity: m.severity,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    #[test]
    fn test_severity_order_matches_rank() {
        assert!(Severity::Critical < Severity::Major);
        assert!(Severity::Major < Severity::Minor);
        assert!(Severity::Minor < Severity::Info);
        for pair in Severity::ALL.windows(2) {
            assert!(pair[0].rank() < pair[1].rank());
        }
    }

    #[test]
    fn test_severity_threshold() {
        assert!(Severity::Critical.meets(Severity::Minor));
        assert!(Severity::Minor.meets(Severity::Minor));
        assert!(!Severity::Info.meets(Severity::Minor));
        assert!(!Severity::Major.meets(Severity::Critical));
    }

    #[test]
    fn test_severity_parse_is_case_insensitive() {
        assert_eq!("Critical".parse::<Severity>(), Ok(Severity::Critical));
        assert_eq!(" MAJOR ".parse::<Severity>(), Ok(Severity::Major));
        assert!("high".parse::<Severity>().is_err());
    }

    #[test]
    fn test_severity_deserializes_from_any_case() {
        let sev: Severity = serde_json::from_value(json!("Minor")).unwrap();
        assert_eq!(sev, Severity::Minor);
        assert!(serde_json::from_value::<Severity>(json!("severe")).is_err());
        assert_eq!(serde_json::to_value(Severity::Info).unwrap(), json!("info"));
    }

    #[test]
    fn test_strategy_parse_and_catalog() {
        assert_eq!("Boundary".parse::<Strategy>(), Ok(Strategy::Boundary));
        let err = "contradicton".parse::<Strategy>().unwrap_err();
        assert_eq!(err.label, "contradicton");
        assert_eq!(
            Strategy::catalog(),
            "contradiction, ambiguity, deletion, inversion, boundary"
        );
    }

    #[test]
    fn test_mutation_serialization_shape() {
        let m = Mutation::new(
            Strategy::Deletion,
            Location {
                line: 3,
                section: "Scope".to_string(),
            },
            "Section 'Scope' (2 lines)",
            "Remove section 'Scope'",
            Severity::Minor,
        )
        .mark_detected();

        let value = serde_json::to_value(&m).unwrap();
        assert_eq!(value["strategy"], json!("deletion"));
        assert_eq!(value["location"], json!({"line": 3, "section": "Scope"}));
        assert_eq!(value["detected"], json!(true));

        let surviving = serde_json::to_value(SurvivingMutation::from(&m)).unwrap();
        assert!(surviving.get("detected").is_none());
        assert_eq!(surviving["severity"], json!("minor"));
    }
}
