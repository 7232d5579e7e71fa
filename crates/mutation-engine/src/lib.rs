//! Mutation testing for prose documents
//!
//! The engine parses a markdown-ish document into lines and sections, runs
//! a set of heuristic mutation strategies over it, and reports which
//! findings a reviewer should look at.

pub mod document;
pub mod engine;
pub mod error;
pub mod extractors;
pub mod patterns;
pub mod preset;
pub mod report;
pub mod strategies;

pub use document::{Document, Section};
pub use engine::{
    error_json, parse_strategies, parse_threshold, AnalysisOptions, MutateRequest, MutationEngine,
};
pub use error::MutateError;
pub use preset::{PresetConfig, PresetRegistry, SeverityOverrides, StrategyConfig};
pub use report::{Metadata, MutationReport, Summary};
