//! File-based analysis through the public engine API

use std::fs;
use std::path::PathBuf;

use mutation_engine::{MutateRequest, MutationEngine, PresetRegistry};
use pretty_assertions::assert_eq;
use serde_json::json;
use shared_types::{Severity, Strategy};
use tempfile::TempDir;

const VENDOR_TERMS: &str = "## Payment
The vendor shall pay within 30 days.
## Penalty
The vendor shall not pay before 30 days.
## Scope
Delivery must be appropriate.
";

fn write_doc(dir: &TempDir, name: &str, text: &str) -> PathBuf {
    let path = dir.path().join(name);
    fs::write(&path, text).unwrap();
    path
}

#[test]
fn test_vendor_terms_findings() {
    let dir = TempDir::new().unwrap();
    let path = write_doc(&dir, "terms.md", VENDOR_TERMS);

    let report = MutationEngine::new()
        .analyze(&MutateRequest::new(&path))
        .unwrap();

    let by_strategy = |s: Strategy| {
        report
            .mutations
            .iter()
            .filter(|m| m.strategy == s)
            .collect::<Vec<_>>()
    };

    let contradictions = by_strategy(Strategy::Contradiction);
    assert_eq!(contradictions.len(), 1);
    assert_eq!(contradictions[0].severity, Severity::Critical);
    assert!(contradictions[0].mutated.contains("'vendor'"));
    assert_eq!(contradictions[0].location.section, "Payment");

    let ambiguities = by_strategy(Strategy::Ambiguity);
    assert_eq!(ambiguities.len(), 1);
    assert_eq!(ambiguities[0].severity, Severity::Critical);
    assert_eq!(ambiguities[0].original, "Delivery must be appropriate.");

    let boundaries = by_strategy(Strategy::Boundary);
    let lines: Vec<_> = boundaries.iter().map(|m| m.location.line).collect();
    assert_eq!(lines, vec![2, 4]);
    assert!(boundaries.iter().all(|m| m.severity == Severity::Critical));
    assert!(boundaries.iter().all(|m| m.original == "30 days"));

    let deletions = by_strategy(Strategy::Deletion);
    assert_eq!(deletions.len(), 3);
    assert!(deletions
        .iter()
        .all(|m| m.severity == Severity::Minor && m.detected));

    assert!(by_strategy(Strategy::Inversion).is_empty());

    assert_eq!(report.summary.total, 7);
    assert_eq!(report.summary.killed, 3);
    assert_eq!(report.summary.survived, 4);
    assert_eq!(report.kill_score, 42.9);
    assert_eq!(report.surviving_mutations.len(), 4);
    assert_eq!(report.metadata.sections_analyzed, 3);
    assert_eq!(report.metadata.lines_analyzed, 7);
    assert_eq!(report.metadata.target, path.display().to_string());

    // Catalog order, numbered after filtering
    let ids: Vec<_> = report.mutations.iter().map(|m| m.id.as_str()).collect();
    assert_eq!(ids, vec!["M001", "M002", "M003", "M004", "M005", "M006", "M007"]);
    assert_eq!(report.mutations[0].strategy, Strategy::Contradiction);
    assert_eq!(report.mutations[6].strategy, Strategy::Boundary);
}

#[test]
fn test_contract_preset_limits_strategies() {
    let dir = TempDir::new().unwrap();
    let path = write_doc(
        &dir,
        "sla.md",
        "# Service\nThe supplier must respond promptly.\nReports arrive in a timely fashion.\nWe assume 5 days is fine.\n",
    );

    let report = MutationEngine::new()
        .analyze(
            &MutateRequest::new(&path)
                .with_strategies("ambiguity")
                .with_preset("contract"),
        )
        .unwrap();

    assert_eq!(report.metadata.strategies_applied, vec![Strategy::Ambiguity]);
    assert_eq!(report.metadata.preset.as_deref(), Some("contract"));
    assert!(report
        .mutations
        .iter()
        .all(|m| m.strategy == Strategy::Ambiguity));

    let severities: Vec<_> = report
        .mutations
        .iter()
        .map(|m| (m.original.as_str(), m.severity))
        .collect();
    assert_eq!(
        severities,
        vec![
            ("Reports arrive in a timely fashion.", Severity::Minor),
            ("The supplier must respond promptly.", Severity::Critical),
        ]
    );
}

#[test]
fn test_directory_preset_overrides_severity() {
    let presets = TempDir::new().unwrap();
    fs::write(
        presets.path().join("lenient.md"),
        "---\nname: lenient\nstrategies:\n  deletion: { enabled: false }\nseverity_overrides:\n  ambiguity_in_obligation: info\n  contradictory_clauses: minor\n---\n",
    )
    .unwrap();
    let dir = TempDir::new().unwrap();
    let path = write_doc(&dir, "terms.md", VENDOR_TERMS);
    let engine = MutationEngine::with_presets(PresetRegistry::with_directory(presets.path()));

    let report = engine
        .analyze(
            &MutateRequest::new(&path)
                .with_preset("lenient")
                .with_threshold("info"),
        )
        .unwrap();

    assert!(!report
        .metadata
        .strategies_applied
        .contains(&Strategy::Deletion));
    let contradiction = &report.mutations[0];
    assert_eq!(contradiction.strategy, Strategy::Contradiction);
    assert_eq!(contradiction.severity, Severity::Minor);
    let ambiguity = report
        .mutations
        .iter()
        .find(|m| m.strategy == Strategy::Ambiguity)
        .unwrap();
    assert_eq!(ambiguity.severity, Severity::Info);

    // The same overrides push both findings below a "major" threshold
    let strict = engine
        .analyze(
            &MutateRequest::new(&path)
                .with_preset("lenient")
                .with_threshold("major"),
        )
        .unwrap();
    assert!(strict
        .mutations
        .iter()
        .all(|m| m.strategy == Strategy::Boundary));
    assert_eq!(strict.kill_score, 0.0);
}

#[test]
fn test_unknown_strategy_error_json() {
    let dir = TempDir::new().unwrap();
    let path = write_doc(&dir, "terms.md", VENDOR_TERMS);

    let value = MutationEngine::new()
        .mutate_json(&MutateRequest::new(&path).with_strategies("contradicton"));

    assert_eq!(
        value,
        json!({"error": "Unknown strategies: contradicton. Valid: contradiction, ambiguity, deletion, inversion, boundary"})
    );
}

#[test]
fn test_missing_and_directory_targets() {
    let dir = TempDir::new().unwrap();
    let missing = dir.path().join("nope.md");
    let engine = MutationEngine::new();

    let value = engine.mutate_json(&MutateRequest::new(&missing));
    assert_eq!(
        value,
        json!({"error": format!("File not found: {}", missing.display())})
    );

    let value = engine.mutate_json(&MutateRequest::new(dir.path()));
    assert_eq!(
        value,
        json!({"error": format!("Not a file: {}", dir.path().display())})
    );
}

#[test]
fn test_unknown_preset_is_error() {
    let dir = TempDir::new().unwrap();
    let path = write_doc(&dir, "terms.md", VENDOR_TERMS);

    let value = MutationEngine::new().mutate_json(&MutateRequest::new(&path).with_preset("legal"));
    assert_eq!(value, json!({"error": "Preset not found: legal"}));
}

#[test]
fn test_unknown_threshold_keeps_everything() {
    let dir = TempDir::new().unwrap();
    let path = write_doc(&dir, "terms.md", VENDOR_TERMS);
    let engine = MutationEngine::new();

    let report = engine
        .analyze(&MutateRequest::new(&path).with_threshold("severe"))
        .unwrap();
    assert_eq!(report.summary.total, 7);
    assert_eq!(report.metadata.severity_threshold, Severity::Info);

    let value = engine.mutate_json(&MutateRequest::new(&path).with_threshold("severe"));
    assert!(value.get("error").is_none());
    assert_eq!(value["summary"]["total"], json!(7));
    assert_eq!(value["metadata"]["severity_threshold"], json!("info"));
}

#[test]
fn test_empty_document() {
    let dir = TempDir::new().unwrap();
    let path = write_doc(&dir, "empty.md", "");

    let value = MutationEngine::new().mutate_json(&MutateRequest::new(&path));

    assert_eq!(value["mutations"], json!([]));
    assert_eq!(value["kill_score"], json!(100.0));
    assert_eq!(value["summary"]["total"], json!(0));
    assert_eq!(value["summary"]["by_strategy"], json!({}));
    assert_eq!(value["metadata"]["sections_analyzed"], json!(0));
}

#[test]
fn test_threshold_narrows_findings() {
    let dir = TempDir::new().unwrap();
    let path = write_doc(&dir, "terms.md", VENDOR_TERMS);
    let engine = MutationEngine::new();

    let minor = engine.analyze(&MutateRequest::new(&path)).unwrap();
    let critical = engine
        .analyze(&MutateRequest::new(&path).with_threshold("critical"))
        .unwrap();

    assert_eq!(critical.summary.total, 4);
    assert!(critical
        .mutations
        .iter()
        .all(|m| m.severity == Severity::Critical));
    assert!(critical.summary.total < minor.summary.total);
    assert_eq!(critical.kill_score, 0.0);
    assert_eq!(critical.mutations.last().map(|m| m.id.as_str()), Some("M004"));
}

#[test]
fn test_report_json_shape() {
    let dir = TempDir::new().unwrap();
    let path = write_doc(&dir, "terms.md", VENDOR_TERMS);

    let value = MutationEngine::new()
        .mutate_json(&MutateRequest::new(&path).with_strategies("deletion"));

    let keys: Vec<_> = value.as_object().unwrap().keys().cloned().collect();
    let mut expected = vec![
        "kill_score",
        "metadata",
        "mutations",
        "summary",
        "surviving_mutations",
    ];
    expected.sort();
    let mut keys_sorted = keys.clone();
    keys_sorted.sort();
    assert_eq!(keys_sorted, expected);

    assert_eq!(value["kill_score"], json!(100.0));
    assert_eq!(value["metadata"]["strategies_applied"], json!(["deletion"]));
    assert_eq!(value["metadata"]["preset"], json!(null));
    assert_eq!(
        value["mutations"][0]["location"],
        json!({"line": 1, "section": "Payment"})
    );
    assert_eq!(value["summary"]["by_severity"], json!({"minor": 3}));
}
