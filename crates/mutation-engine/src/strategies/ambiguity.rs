// Vague modifiers that leave obligations or scope open to interpretation
use shared_types::{Mutation, Severity, Strategy};

use crate::document::Document;
use crate::patterns::{OBLIGATION_PATTERN, SCOPE_PATTERN, VAGUE_MODIFIER_PATTERNS};

/// Emits one finding per (modifier, line) occurrence
pub fn detect_ambiguities(doc: &Document) -> Vec<Mutation> {
    let mut mutations = Vec::new();

    for (modifier, pattern) in VAGUE_MODIFIER_PATTERNS.iter() {
        for (line_num, line) in doc.numbered_lines() {
            if !pattern.is_match(line) {
                continue;
            }
            mutations.push(Mutation::new(
                Strategy::Ambiguity,
                doc.location(line_num),
                line.trim(),
                format!(
                    "'{}' → extreme test: replace with 'zero' or 'unlimited'",
                    modifier
                ),
                classify(line),
            ));
        }
    }

    mutations
}

/// Obligation context is critical, scope-definition context is major
fn classify(line: &str) -> Severity {
    if OBLIGATION_PATTERN.is_match(line) {
        Severity::Critical
    } else if SCOPE_PATTERN.is_match(line) {
        Severity::Major
    } else {
        Severity::Minor
    }
}
