// Dead clauses and load-bearing sections, found by counting cross-references
use shared_types::{Location, Mutation, Severity, Strategy};

use crate::document::{Document, Section};

/// Minimum outside references for a section to count as a critical dependency
pub const DEPENDENCY_THRESHOLD: usize = 3;

/// Flags unreferenced sections (minor) and heavily referenced ones (major).
///
/// Findings are self-verifying: the reference count itself is the evidence,
/// so every deletion finding is marked detected. Sections referenced once or
/// twice produce nothing.
pub fn detect_deletions(doc: &Document) -> Vec<Mutation> {
    let mut mutations = Vec::new();

    for section in doc.sections() {
        let refs = count_outside_references(doc, section);
        let location = Location {
            line: section.start_line,
            section: section.name.clone(),
        };
        let original = format!("Section '{}' ({} lines)", section.name, section.line_count());

        if refs == 0 {
            mutations.push(
                Mutation::new(
                    Strategy::Deletion,
                    location,
                    original,
                    format!(
                        "Remove section '{}' and observe: zero structural impact",
                        section.name
                    ),
                    Severity::Minor,
                )
                .mark_detected(),
            );
        } else if refs >= DEPENDENCY_THRESHOLD {
            mutations.push(
                Mutation::new(
                    Strategy::Deletion,
                    location,
                    original,
                    format!(
                        "Remove section '{}': {} sections would lose a dependency",
                        section.name, refs
                    ),
                    Severity::Major,
                )
                .mark_detected(),
            );
        }
    }

    mutations
}

/// Case-insensitive occurrences of the section name outside its own lines
fn count_outside_references(doc: &Document, section: &Section) -> usize {
    let needle = section.name.to_lowercase();
    if needle.is_empty() {
        return 0;
    }
    let (before, after) = doc.text_outside(section);
    before.to_lowercase().matches(&needle).count() + after.to_lowercase().matches(&needle).count()
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_unreferenced_section_is_dead_clause() {
        let doc = Document::parse("# Intro\nWelcome.\n# Warranty\nNone given.");
        let mutations = detect_deletions(&doc);

        assert_eq!(mutations.len(), 2);
        for m in &mutations {
            assert_eq!(m.severity, Severity::Minor);
            assert!(m.detected);
        }
        assert_eq!(mutations[1].location.line, 3);
        assert_eq!(mutations[1].original, "Section 'Warranty' (2 lines)");
    }

    #[test]
    fn test_heavily_referenced_section_is_dependency() {
        let doc = Document::parse(
            "# Definitions\nTerms.\n# Fees\nSee definitions.\n# Term\nPer Definitions.\n# Exit\nDEFINITIONS apply.",
        );
        let mutations = detect_deletions(&doc);
        let definitions = mutations
            .iter()
            .find(|m| m.location.section == "Definitions")
            .unwrap();

        assert_eq!(definitions.severity, Severity::Major);
        assert!(definitions.detected);
        assert!(definitions.mutated.contains("3 sections"));
    }

    #[test]
    fn test_one_or_two_references_produce_nothing() {
        let doc = Document::parse("# Fees\nListed below.\n# Payment\nFees are due monthly.");
        let mutations = detect_deletions(&doc);

        assert!(mutations.iter().all(|m| m.location.section != "Fees"));
        // "Payment" is never mentioned outside itself
        assert!(mutations.iter().any(|m| m.location.section == "Payment"));
    }

    #[test]
    fn test_references_inside_section_do_not_count() {
        let doc = Document::parse("# Notes\nNotes here. More notes. Notes again.");
        let mutations = detect_deletions(&doc);
        assert_eq!(mutations.len(), 1);
        assert_eq!(mutations[0].severity, Severity::Minor);
    }

    #[test]
    fn test_no_sections_no_findings() {
        let doc = Document::parse("Plain text without headings.");
        assert!(detect_deletions(&doc).is_empty());
    }
}
