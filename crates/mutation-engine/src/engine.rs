//! Analysis pipeline
//!
//! `MutationEngine` validates a request, runs the selected strategies over
//! the parsed document and assembles the report. The engine is stateless
//! apart from its preset registry, so it can be cloned into blocking tasks.

use std::path::{Path, PathBuf};
use std::time::Instant;

use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use shared_types::{Severity, Strategy};

use crate::document::Document;
use crate::error::MutateError;
use crate::preset::{PresetConfig, PresetRegistry};
use crate::report::{apply_overrides, filter_and_number, Metadata, MutationReport};
use crate::strategies;

/// A file analysis request, as received from a client
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MutateRequest {
    pub target_path: PathBuf,
    /// `"all"` or a comma-separated list of strategy names
    #[serde(default = "default_strategies")]
    pub strategies: String,
    #[serde(default = "default_threshold")]
    pub severity_threshold: String,
    #[serde(default)]
    pub preset: Option<String>,
}

fn default_strategies() -> String {
    "all".to_string()
}

fn default_threshold() -> String {
    "minor".to_string()
}

impl MutateRequest {
    pub fn new(target_path: impl Into<PathBuf>) -> Self {
        Self {
            target_path: target_path.into(),
            strategies: default_strategies(),
            severity_threshold: default_threshold(),
            preset: None,
        }
    }

    pub fn with_strategies(mut self, strategies: impl Into<String>) -> Self {
        self.strategies = strategies.into();
        self
    }

    pub fn with_threshold(mut self, threshold: impl Into<String>) -> Self {
        self.severity_threshold = threshold.into();
        self
    }

    pub fn with_preset(mut self, preset: impl Into<String>) -> Self {
        self.preset = Some(preset.into());
        self
    }

    /// Blank preset names count as no preset
    fn preset_name(&self) -> Option<&str> {
        self.preset.as_deref().map(str::trim).filter(|name| !name.is_empty())
    }
}

/// Validated analysis settings for in-memory text
#[derive(Debug, Clone)]
pub struct AnalysisOptions {
    /// Requested strategies in catalog order, without duplicates
    pub strategies: Vec<Strategy>,
    pub severity_threshold: Severity,
    pub preset: Option<PresetConfig>,
}

impl Default for AnalysisOptions {
    fn default() -> Self {
        Self {
            strategies: Strategy::ALL.to_vec(),
            severity_threshold: Severity::Minor,
            preset: None,
        }
    }
}

impl AnalysisOptions {
    /// Requested strategies minus those the preset disables
    pub fn active_strategies(&self) -> Vec<Strategy> {
        self.strategies
            .iter()
            .copied()
            .filter(|s| self.preset.as_ref().map_or(true, |p| p.is_enabled(*s)))
            .collect()
    }
}

/// Parse `"all"` or a comma list into catalog-ordered strategies
pub fn parse_strategies(input: &str) -> Result<Vec<Strategy>, MutateError> {
    let compact: String = input.chars().filter(|c| !c.is_whitespace()).collect();
    if compact.eq_ignore_ascii_case("all") {
        return Ok(Strategy::ALL.to_vec());
    }

    let mut selected = Vec::new();
    let mut unknown = Vec::new();
    for entry in input.split(',') {
        match entry.parse::<Strategy>() {
            Ok(strategy) => selected.push(strategy),
            Err(e) => unknown.push(e.label),
        }
    }

    if !unknown.is_empty() {
        return Err(MutateError::UnknownStrategies(unknown));
    }
    selected.sort();
    selected.dedup();
    Ok(selected)
}

/// Unrecognized thresholds keep everything
pub fn parse_threshold(input: &str) -> Severity {
    input.parse().unwrap_or_else(|_| {
        tracing::warn!(threshold = input, "unknown severity threshold, using info");
        Severity::Info
    })
}

/// `{"error": message}`, the failure shape every client sees
pub fn error_json(message: impl Into<String>) -> Value {
    json!({ "error": message.into() })
}

#[derive(Debug, Clone, Default)]
pub struct MutationEngine {
    presets: PresetRegistry,
}

impl MutationEngine {
    /// Engine with only the embedded presets
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_presets(presets: PresetRegistry) -> Self {
        Self { presets }
    }

    pub fn presets(&self) -> &PresetRegistry {
        &self.presets
    }

    /// Analyze a file on disk
    pub fn analyze(&self, request: &MutateRequest) -> Result<MutationReport, MutateError> {
        let started = Instant::now();

        let text = read_target(&request.target_path)?;
        let preset = request
            .preset_name()
            .map(|name| self.presets.resolve(name))
            .transpose()?;
        let options = AnalysisOptions {
            strategies: parse_strategies(&request.strategies)?,
            severity_threshold: parse_threshold(&request.severity_threshold),
            preset,
        };

        let mut report = self.analyze_text(&text, &options);
        report.metadata.target = request.target_path.display().to_string();
        report.metadata.preset = request.preset_name().map(str::to_string);
        report.metadata.elapsed_seconds = elapsed_seconds(started);

        tracing::info!(
            path = %report.metadata.target,
            total = report.summary.total,
            killed = report.summary.killed,
            kill_score = report.kill_score,
            elapsed = report.metadata.elapsed_seconds,
            "analysis complete"
        );
        Ok(report)
    }

    /// Analyze in-memory text. `metadata.target` is left empty.
    pub fn analyze_text(&self, text: &str, options: &AnalysisOptions) -> MutationReport {
        let started = Instant::now();
        let doc = Document::parse(text);
        let active = options.active_strategies();

        let mut mutations: Vec<_> = active
            .iter()
            .flat_map(|strategy| strategies::run(*strategy, &doc))
            .collect();
        if let Some(preset) = &options.preset {
            apply_overrides(&mut mutations, &preset.severity_overrides);
        }
        let mutations = filter_and_number(mutations, options.severity_threshold);

        let metadata = Metadata {
            target: String::new(),
            strategies_applied: active,
            severity_threshold: options.severity_threshold,
            preset: options.preset.as_ref().map(|p| p.name.clone()),
            sections_analyzed: doc.sections().len(),
            lines_analyzed: doc.line_count(),
            elapsed_seconds: elapsed_seconds(started),
        };
        MutationReport::new(mutations, metadata)
    }

    /// Analyze a file and render the result as JSON. Never fails: errors
    /// become `{"error": ...}`.
    pub fn mutate_json(&self, request: &MutateRequest) -> Value {
        let result = self
            .analyze(request)
            .map_err(|e| e.to_string())
            .and_then(|report| serde_json::to_value(&report).map_err(|e| e.to_string()));

        match result {
            Ok(value) => value,
            Err(message) => {
                tracing::warn!(
                    path = %request.target_path.display(),
                    error = %message,
                    "analysis rejected"
                );
                error_json(message)
            }
        }
    }
}

fn read_target(path: &Path) -> Result<String, MutateError> {
    if !path.exists() {
        return Err(MutateError::FileNotFound(path.to_path_buf()));
    }
    if !path.is_file() {
        return Err(MutateError::NotAFile(path.to_path_buf()));
    }
    std::fs::read_to_string(path).map_err(|source| MutateError::Io {
        path: path.to_path_buf(),
        source,
    })
}

fn elapsed_seconds(started: Instant) -> f64 {
    (started.elapsed().as_secs_f64() * 1000.0).round() / 1000.0
}
