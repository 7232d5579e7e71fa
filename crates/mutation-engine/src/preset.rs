//! Domain presets
//!
//! A preset is a markdown file whose YAML front matter tunes an analysis for
//! a document type: which strategies run and how certain findings are
//! re-graded. Four presets are embedded in the binary; a presets directory
//! can shadow them or add new ones.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Deserializer, Serialize};
use shared_types::{Severity, Strategy};

use crate::error::MutateError;

/// Contract preset - loaded from presets/contract.md
const CONTRACT_PRESET: &str = include_str!("../presets/contract.md");

/// API specification preset - loaded from presets/api_spec.md
const API_SPEC_PRESET: &str = include_str!("../presets/api_spec.md");

/// Academic paper preset - loaded from presets/academic_paper.md
const ACADEMIC_PAPER_PRESET: &str = include_str!("../presets/academic_paper.md");

/// Policy preset - loaded from presets/policy.md
const POLICY_PRESET: &str = include_str!("../presets/policy.md");

/// Names of the presets compiled into the binary
pub const BUILTIN_PRESETS: [&str; 4] = ["academic_paper", "api_spec", "contract", "policy"];

fn embedded_preset(name: &str) -> Option<&'static str> {
    match name {
        "contract" => Some(CONTRACT_PRESET),
        "api_spec" => Some(API_SPEC_PRESET),
        "academic_paper" => Some(ACADEMIC_PAPER_PRESET),
        "policy" => Some(POLICY_PRESET),
        _ => None,
    }
}

/// Per-strategy tuning inside a preset
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StrategyConfig {
    /// Relative weight (informational, not used in scoring)
    #[serde(default = "default_weight")]
    pub weight: f64,
    #[serde(default = "default_enabled")]
    pub enabled: bool,
}

impl Default for StrategyConfig {
    fn default() -> Self {
        Self {
            weight: default_weight(),
            enabled: default_enabled(),
        }
    }
}

fn default_weight() -> f64 {
    1.0
}

fn default_enabled() -> bool {
    true
}

/// Severity re-grading applied after detection, before threshold filtering
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SeverityOverrides {
    /// Applied to ambiguity findings whose line is an obligation
    #[serde(default)]
    pub ambiguity_in_obligation: Option<Severity>,
    /// Applied to every contradiction finding
    #[serde(default)]
    pub contradictory_clauses: Option<Severity>,
}

/// Parsed preset front matter. Unknown keys are ignored.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PresetConfig {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub default_persona: Option<String>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub strategies: BTreeMap<String, StrategyConfig>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub severity_overrides: SeverityOverrides,
}

/// An empty YAML key (`strategies:`) parses as null
fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

impl PresetConfig {
    /// Parse a preset document. `name` fills in a missing `name` key and
    /// labels errors.
    pub fn from_markdown(name: &str, source: &str) -> Result<Self, MutateError> {
        let invalid = |reason: String| MutateError::InvalidPreset {
            name: name.to_string(),
            reason,
        };

        let front_matter = extract_front_matter(source)
            .ok_or_else(|| invalid("missing YAML front matter".to_string()))?;
        let mut config: PresetConfig =
            serde_yaml::from_str(front_matter).map_err(|e| invalid(e.to_string()))?;

        if config.name.trim().is_empty() {
            config.name = name.to_string();
        }
        Ok(config)
    }

    /// Strategies not listed in the preset stay enabled
    pub fn is_enabled(&self, strategy: Strategy) -> bool {
        self.strategies
            .get(strategy.as_str())
            .map_or(true, |config| config.enabled)
    }

    pub fn weight(&self, strategy: Strategy) -> f64 {
        self.strategies
            .get(strategy.as_str())
            .map_or_else(default_weight, |config| config.weight)
    }
}

/// Text between the opening `---` line and the next `---` line
fn extract_front_matter(source: &str) -> Option<&str> {
    let rest = source.trim_start().strip_prefix("---")?;
    let rest = rest.strip_prefix('\r').unwrap_or(rest).strip_prefix('\n')?;

    let mut offset = 0;
    for line in rest.split_inclusive('\n') {
        if line.trim_end() == "---" {
            return Some(&rest[..offset]);
        }
        offset += line.len();
    }
    None
}

/// Preset names double as file stems, so only a safe alphabet is accepted
fn is_valid_name(name: &str) -> bool {
    !name.is_empty()
        && name
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '-')
}

/// Resolves preset names against an optional directory, then the built-ins
#[derive(Debug, Clone, Default)]
pub struct PresetRegistry {
    directory: Option<PathBuf>,
}

impl PresetRegistry {
    /// Registry with only the embedded presets
    pub fn builtin() -> Self {
        Self::default()
    }

    /// Registry that checks `<dir>/<name>.md` before the embedded presets
    pub fn with_directory(directory: impl Into<PathBuf>) -> Self {
        Self {
            directory: Some(directory.into()),
        }
    }

    pub fn directory(&self) -> Option<&Path> {
        self.directory.as_deref()
    }

    /// Raw markdown of a preset
    pub fn source(&self, name: &str) -> Result<String, MutateError> {
        if !is_valid_name(name) {
            return Err(MutateError::PresetNotFound(name.to_string()));
        }

        if let Some(dir) = &self.directory {
            let path = dir.join(format!("{}.md", name));
            if path.is_file() {
                tracing::debug!(
                    preset = name,
                    path = %path.display(),
                    "loading preset from directory"
                );
                return std::fs::read_to_string(&path)
                    .map_err(|source| MutateError::Io { path, source });
            }
        }

        embedded_preset(name)
            .map(str::to_string)
            .ok_or_else(|| MutateError::PresetNotFound(name.to_string()))
    }

    /// Load and parse a preset by name
    pub fn resolve(&self, name: &str) -> Result<PresetConfig, MutateError> {
        let source = self.source(name)?;
        PresetConfig::from_markdown(name, &source)
    }

    /// Every resolvable preset name, sorted
    pub fn list(&self) -> Vec<String> {
        let mut names: Vec<String> = BUILTIN_PRESETS.iter().map(|n| n.to_string()).collect();

        if let Some(dir) = &self.directory {
            match std::fs::read_dir(dir) {
                Ok(entries) => {
                    for entry in entries.flatten() {
                        let path = entry.path();
                        if path.extension().and_then(|e| e.to_str()) != Some("md") {
                            continue;
                        }
                        if let Some(stem) = path.file_stem().and_then(|s| s.to_str()) {
                            if is_valid_name(stem) {
                                names.push(stem.to_string());
                            }
                        }
                    }
                }
                Err(e) => {
                    tracing::warn!(
                        path = %dir.display(),
                        error = %e,
                        "cannot read presets directory"
                    );
                }
            }
        }

        names.sort();
        names.dedup();
        names
    }
}
