//! Mutation strategies
//!
//! Each strategy is a pure function of the parsed document that returns its
//! findings in line order. IDs are left empty; the engine assigns them after
//! filtering.

pub mod ambiguity;
pub mod boundary;
pub mod contradiction;
pub mod deletion;
pub mod inversion;

use shared_types::{Mutation, Strategy};

use crate::document::Document;

/// Run a single strategy over the document
pub fn run(strategy: Strategy, doc: &Document) -> Vec<Mutation> {
    let mutations = match strategy {
        Strategy::Contradiction => contradiction::detect_contradictions(doc),
        Strategy::Ambiguity => ambiguity::detect_ambiguities(doc),
        Strategy::Deletion => deletion::detect_deletions(doc),
        Strategy::Inversion => inversion::detect_inversions(doc),
        Strategy::Boundary => boundary::detect_boundaries(doc),
    };
    tracing::debug!(strategy = %strategy, findings = mutations.len(), "strategy complete");
    mutations
}
