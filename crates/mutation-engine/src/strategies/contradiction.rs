// Cross-section contradictions: conflicting numeric parameters and modal obligations
use std::collections::{BTreeMap, HashSet};

use shared_types::{Mutation, Severity, Strategy};

use crate::document::Document;
use crate::extractors::numeric::extract_numeric_params;
use crate::patterns::{affirmative_subjects, negated_subjects};

/// One "<value> <unit>" occurrence with its position
#[derive(Debug, Clone)]
struct Occurrence<'a> {
    value: String,
    line: usize,
    section: &'a str,
}

/// Detects contradictory values and obligations across the document
pub fn detect_contradictions(doc: &Document) -> Vec<Mutation> {
    let mut mutations = check_numeric_conflicts(doc);
    mutations.extend(check_modal_conflicts(doc));
    mutations
}

/// Same unit, different value, different section
fn check_numeric_conflicts(doc: &Document) -> Vec<Mutation> {
    let mut mutations = Vec::new();

    // Units keep first-seen order so findings come out in document order
    let mut unit_order: Vec<String> = Vec::new();
    let mut by_unit: BTreeMap<String, Vec<Occurrence<'_>>> = BTreeMap::new();
    for (line_num, line) in doc.numbered_lines() {
        for param in extract_numeric_params(line) {
            let unit = param.normalized_unit();
            if !by_unit.contains_key(&unit) {
                unit_order.push(unit.clone());
            }
            by_unit.entry(unit).or_default().push(Occurrence {
                value: param.value,
                line: line_num,
                section: doc.section_for(line_num),
            });
        }
    }

    let mut reported: HashSet<(String, String)> = HashSet::new();
    for unit in &unit_order {
        let occurrences = &by_unit[unit];
        for (i, a) in occurrences.iter().enumerate() {
            for b in &occurrences[i + 1..] {
                if a.value == b.value || a.section == b.section {
                    continue;
                }
                if !reported.insert(pair_key(&a.value, &b.value)) {
                    continue;
                }
                mutations.push(Mutation::new(
                    Strategy::Contradiction,
                    doc.location(a.line),
                    format!(
                        "{} {} (line {}) vs {} {} (line {})",
                        a.value, unit, a.line, b.value, unit, b.line
                    ),
                    format!("Conflicting values for '{}': {} vs {}", unit, a.value, b.value),
                    Severity::Major,
                ));
            }
        }
    }

    mutations
}

/// Order-independent key for a pair of conflicting values
fn pair_key(a: &str, b: &str) -> (String, String) {
    if a <= b {
        (a.to_string(), b.to_string())
    } else {
        (b.to_string(), a.to_string())
    }
}

/// Same subject both bound ("shall") and released ("shall not")
fn check_modal_conflicts(doc: &Document) -> Vec<Mutation> {
    let mut affirmative: Vec<(usize, String, &str)> = Vec::new();
    let mut negated: Vec<(usize, String)> = Vec::new();

    for (line_num, line) in doc.numbered_lines() {
        for subject in affirmative_subjects(line) {
            affirmative.push((line_num, subject, line.trim()));
        }
        for subject in negated_subjects(line) {
            negated.push((line_num, subject));
        }
    }

    let mut mutations = Vec::new();
    for (pos_line, pos_subject, pos_text) in &affirmative {
        for (neg_line, neg_subject) in &negated {
            if pos_subject != neg_subject || pos_line == neg_line {
                continue;
            }
            mutations.push(Mutation::new(
                Strategy::Contradiction,
                doc.location(*pos_line),
                *pos_text,
                format!(
                    "'{}' has both affirmative (line {}) and negative (line {}) obligations",
                    pos_subject, pos_line, neg_line
                ),
                Severity::Critical,
            ));
        }
    }

    mutations
}
