// Numeric parameters and ranges stress-tested at their boundaries
use shared_types::{Mutation, Severity, Strategy};

use crate::document::Document;
use crate::extractors::numeric::{
    extract_numeric_params, extract_ranges, format_compact, scale_variants,
};
use crate::patterns::{CRITICAL_BOUNDARY_PATTERN, MAJOR_BOUNDARY_PATTERN};

/// Proposes 10x / 0.1x variants for every parameter and probes every range
pub fn detect_boundaries(doc: &Document) -> Vec<Mutation> {
    let mut mutations = Vec::new();

    for (line_num, line) in doc.numbered_lines() {
        let severity = classify(line);

        for param in extract_numeric_params(line) {
            let Ok(value) = param.value.parse::<f64>() else {
                continue;
            };
            let (high, low) = scale_variants(value);
            mutations.push(Mutation::new(
                Strategy::Boundary,
                doc.location(line_num),
                format!("{} {}", param.value, param.unit),
                format!(
                    "Boundary test: 10x={} {}, 0.1x={} {}",
                    format_compact(high),
                    param.unit,
                    format_compact(low),
                    param.unit
                ),
                severity,
            ));
        }

        for (low, high) in extract_ranges(line) {
            mutations.push(Mutation::new(
                Strategy::Boundary,
                doc.location(line_num),
                format!("Range {} to {}", low, high),
                format!("Boundary: what if below {} or above {}?", low, high),
                Severity::Major,
            ));
        }
    }

    mutations
}

fn classify(line: &str) -> Severity {
    if CRITICAL_BOUNDARY_PATTERN.is_match(line) {
        Severity::Critical
    } else if MAJOR_BOUNDARY_PATTERN.is_match(line) {
        Severity::Major
    } else {
        Severity::Minor
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_parameter_variants() {
        let doc = Document::parse("# SLA\nUptime must be 99.9%.");
        let mutations = detect_boundaries(&doc);

        assert_eq!(mutations.len(), 1);
        let m = &mutations[0];
        assert_eq!(m.original, "99.9 %");
        assert_eq!(m.mutated, "Boundary test: 10x=999 %, 0.1x=9.99 %");
        assert_eq!(m.severity, Severity::Critical);
        assert_eq!(m.location.section, "SLA");
    }

    #[test]
    fn test_soft_keyword_is_major() {
        let doc = Document::parse("We target 200 hours of testing.");
        let mutations = detect_boundaries(&doc);
        assert_eq!(mutations[0].severity, Severity::Major);
    }

    #[test]
    fn test_plain_parameter_is_minor() {
        let doc = Document::parse("The meeting lasts 2 hours.");
        let mutations = detect_boundaries(&doc);
        assert_eq!(mutations[0].severity, Severity::Minor);
        assert_eq!(mutations[0].mutated, "Boundary test: 10x=20 hours, 0.1x=0.2 hours");
    }

    #[test]
    fn test_zero_stays_zero() {
        let doc = Document::parse("Allow 0 retries.");
        let mutations = detect_boundaries(&doc);
        assert_eq!(mutations[0].mutated, "Boundary test: 10x=0 retries, 0.1x=0 retries");
    }

    #[test]
    fn test_range_always_major() {
        let doc = Document::parse("Temperature between 10 and 40 is fine.");
        let mutations = detect_boundaries(&doc);
        assert_eq!(mutations.len(), 1);
        assert_eq!(mutations[0].severity, Severity::Major);
        assert_eq!(mutations[0].original, "Range 10 to 40");
        assert_eq!(mutations[0].mutated, "Boundary: what if below 10 or above 40?");
    }

    #[test]
    fn test_range_with_units_yields_both_kinds() {
        let doc = Document::parse("Retry from 3 to 5 times; the cap is 5 times.");
        let mutations = detect_boundaries(&doc);
        // "5 times" twice as parameters, then the range
        assert_eq!(mutations.len(), 3);
        assert!(mutations[..2].iter().all(|m| m.severity == Severity::Critical));
        assert_eq!(mutations[2].original, "Range 3 to 5");
        assert_eq!(mutations[2].severity, Severity::Major);
    }
}
