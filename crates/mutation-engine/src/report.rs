//! Report assembly: overrides, threshold filtering, IDs, scoring and summaries

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use shared_types::{Mutation, Severity, Strategy, SurvivingMutation};

use crate::patterns::OBLIGATION_PATTERN;
use crate::preset::SeverityOverrides;

/// Complete result of one analysis
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MutationReport {
    pub mutations: Vec<Mutation>,
    pub kill_score: f64,
    pub surviving_mutations: Vec<SurvivingMutation>,
    pub summary: Summary,
    pub metadata: Metadata,
}

/// Counts over the filtered mutation set
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Summary {
    pub total: usize,
    pub killed: usize,
    pub survived: usize,
    pub by_strategy: BTreeMap<Strategy, usize>,
    pub by_severity: BTreeMap<Severity, usize>,
}

/// Echo of the request plus document statistics
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Metadata {
    pub target: String,
    pub strategies_applied: Vec<Strategy>,
    pub severity_threshold: Severity,
    pub preset: Option<String>,
    pub sections_analyzed: usize,
    pub lines_analyzed: usize,
    pub elapsed_seconds: f64,
}

impl MutationReport {
    /// Build the report from an already filtered, ID-assigned mutation list
    pub fn new(mutations: Vec<Mutation>, metadata: Metadata) -> Self {
        let summary = Summary::from_mutations(&mutations);
        let surviving_mutations = mutations
            .iter()
            .filter(|m| !m.detected)
            .map(SurvivingMutation::from)
            .collect();

        Self {
            kill_score: kill_score(summary.killed, summary.total),
            mutations,
            surviving_mutations,
            summary,
            metadata,
        }
    }
}

impl Summary {
    pub fn from_mutations(mutations: &[Mutation]) -> Self {
        mutations.iter().fold(Summary::default(), |mut summary, m| {
            summary.total += 1;
            if m.detected {
                summary.killed += 1;
            } else {
                summary.survived += 1;
            }
            *summary.by_strategy.entry(m.strategy).or_insert(0) += 1;
            *summary.by_severity.entry(m.severity).or_insert(0) += 1;
            summary
        })
    }
}

/// Percentage of killed mutations, rounded to one decimal with ties to even
/// (6.25 becomes 6.2). An empty set scores 100.
pub fn kill_score(killed: usize, total: usize) -> f64 {
    if total == 0 {
        return 100.0;
    }
    let percent = killed as f64 / total as f64 * 100.0;
    (percent * 10.0).round_ties_even() / 10.0
}

/// Re-grade findings according to a preset
pub fn apply_overrides(mutations: &mut [Mutation], overrides: &SeverityOverrides) {
    for m in mutations.iter_mut() {
        match m.strategy {
            Strategy::Ambiguity => {
                if let Some(severity) = overrides.ambiguity_in_obligation {
                    if OBLIGATION_PATTERN.is_match(&m.original) {
                        m.severity = severity;
                    }
                }
            }
            Strategy::Contradiction => {
                if let Some(severity) = overrides.contradictory_clauses {
                    m.severity = severity;
                }
            }
            _ => {}
        }
    }
}

/// Drop findings below the threshold and number the rest `M001`, `M002`, ...
pub fn filter_and_number(mutations: Vec<Mutation>, threshold: Severity) -> Vec<Mutation> {
    mutations
        .into_iter()
        .filter(|m| m.severity.meets(threshold))
        .enumerate()
        .map(|(i, mut m)| {
            m.id = format!("M{:03}", i + 1);
            m
        })
        .collect()
}
