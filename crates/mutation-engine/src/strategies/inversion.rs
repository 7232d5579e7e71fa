// Unsupported claims whose logical inverse should be tested
use shared_types::{Mutation, Severity, Strategy};

use crate::document::Document;
use crate::patterns::{CLAIM_INDICATOR_PATTERNS, EVIDENCE_PATTERN, STRONG_OBLIGATION_PATTERN};

/// Lines on each side of a claim searched for supporting evidence
pub const EVIDENCE_RADIUS: usize = 3;

/// Flags claims with no evidence signal nearby
pub fn detect_inversions(doc: &Document) -> Vec<Mutation> {
    let mut mutations = Vec::new();

    for (indicator, pattern) in CLAIM_INDICATOR_PATTERNS.iter() {
        for (line_num, line) in doc.numbered_lines() {
            if !pattern.is_match(line) {
                continue;
            }
            let context = doc.context_window(line_num, EVIDENCE_RADIUS);
            if EVIDENCE_PATTERN.is_match(&context) {
                continue;
            }

            let severity = if STRONG_OBLIGATION_PATTERN.is_match(line) {
                Severity::Critical
            } else {
                Severity::Major
            };
            mutations.push(Mutation::new(
                Strategy::Inversion,
                doc.location(line_num),
                line.trim(),
                format!(
                    "Invert: if the opposite of '{}...' were true, does the document hold?",
                    indicator
                ),
                severity,
            ));
        }
    }

    mutations
}
