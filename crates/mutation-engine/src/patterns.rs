//! Keyword catalogs and compiled patterns shared by the mutation strategies
//!
//! Every catalog is a static table compiled once per process. Strategies
//! iterate these tables instead of embedding literals in their control flow.

use lazy_static::lazy_static;
use regex::Regex;

/// Vague modifiers whose meaning is left to interpretation (Ambiguity)
pub const VAGUE_MODIFIERS: &[&str] = &[
    "appropriate",
    "reasonable",
    "sufficient",
    "timely",
    "adequate",
    "significant",
    "substantial",
    "promptly",
    "approximately",
    "generally",
    "normally",
    "typically",
    "usually",
    "fairly",
    "properly",
    "suitably",
    "as needed",
    "as appropriate",
    "where applicable",
    "to the extent possible",
    "best efforts",
    "commercially reasonable",
    "good faith",
    "material",
    "immaterial",
    "de minimis",
    "nominal",
    "undue",
    "excessive",
    "unreasonable",
    "satisfactory",
    "acceptable",
    "moderate",
    "suitable",
    "proper",
];

/// Phrases that introduce an assumption or claim (Inversion)
pub const CLAIM_INDICATORS: &[&str] = &[
    "we assume",
    "it is expected",
    "based on",
    "given that",
    "assuming",
    "in our view",
    "we believe",
    "it appears",
    "this suggests",
    "evidence indicates",
    "the data shows",
    "we hypothesize",
    "it is likely",
    "presumably",
];

/// Label used when a line precedes every heading
pub const WHOLE_DOCUMENT: &str = "Document";

lazy_static! {
    /// Markdown-style heading, levels 1 to 4
    pub static ref HEADING_PATTERN: Regex = Regex::new(r"^(#{1,4})\s+(.+)$").unwrap();

    /// Obligation signals; escalates ambiguity to critical
    pub static ref OBLIGATION_PATTERN: Regex = Regex::new(
        r"(?i)\b(?:shall|must|obligat\w*|required|entitled|rights?|deadlines?|within\s+\d+\s*days?)\b"
    )
    .unwrap();

    /// Scope-definition signals; escalates ambiguity to major
    pub static ref SCOPE_PATTERN: Regex =
        Regex::new(r"(?i)\b(?:scope|defin\w*|means|includ\w*|conditions?|criteria)\b").unwrap();

    /// Strong commitments; escalates an unsupported claim to critical
    pub static ref STRONG_OBLIGATION_PATTERN: Regex =
        Regex::new(r"(?i)\b(?:shall|must|certif\w*|warrant\w*|guarant\w*)\b").unwrap();

    /// Evidence near a claim means the claim is supported
    pub static ref EVIDENCE_PATTERN: Regex = Regex::new(
        r"(?i)\b(?:because|therefore|evidence|data shows|according to|based on|proven|demonstrated|research|study|analysis|since|due to)\b"
    )
    .unwrap();

    pub static ref CRITICAL_BOUNDARY_PATTERN: Regex = Regex::new(
        r"(?i)\b(?:shall|must|obligat\w*|required|SLA|uptime|deadlines?|penalt(?:y|ies)|liabilit(?:y|ies)|caps?|limits?|maximum|minimum)\b"
    )
    .unwrap();

    pub static ref MAJOR_BOUNDARY_PATTERN: Regex =
        Regex::new(r"(?i)\b(?:should|recommend\w*|targets?|goals?|expect\w*|estimat\w*)\b").unwrap();

    /// A number followed by a recognized unit
    pub static ref NUMERIC_PARAM_PATTERN: Regex = Regex::new(
        r"(?i)([0-9]+(?:\.[0-9]+)?)\s*(days?|hours?|minutes?|seconds?|percent|%|USD|\$|EUR|€|months?|years?|weeks?|business\s*days?|times?|attempts?|retr(?:y|ies))"
    )
    .unwrap();

    /// "between X and Y" / "from X to Y"
    pub static ref RANGE_PATTERN: Regex = Regex::new(
        r"(?i)(?:between|from)\s+([0-9]+(?:\.[0-9]+)?)\s*(?:and|to)\s+([0-9]+(?:\.[0-9]+)?)"
    )
    .unwrap();

    /// "<subject> shall"; a following "not" or "never" is rejected by the caller
    pub static ref SHALL_PATTERN: Regex = Regex::new(r"(?i)(\w+)\s+shall\b").unwrap();

    pub static ref NEGATION_FOLLOWS: Regex = Regex::new(r"(?i)^\s+(?:not|never)\b").unwrap();

    /// "<subject> shall not|shall never|must not"
    pub static ref SHALL_NOT_PATTERN: Regex =
        Regex::new(r"(?i)(\w+)\s+(?:shall\s+not|shall\s+never|must\s+not)\b").unwrap();

    /// Vague modifier catalog compiled to whole-phrase matchers
    pub static ref VAGUE_MODIFIER_PATTERNS: Vec<(&'static str, Regex)> =
        compile_phrases(VAGUE_MODIFIERS);

    /// Claim indicator catalog compiled to whole-phrase matchers
    pub static ref CLAIM_INDICATOR_PATTERNS: Vec<(&'static str, Regex)> =
        compile_phrases(CLAIM_INDICATORS);
}

/// Compile each phrase into a case-insensitive whole-word matcher
fn compile_phrases(phrases: &[&'static str]) -> Vec<(&'static str, Regex)> {
    phrases
        .iter()
        .map(|phrase| {
            let pattern = format!(r"(?i)\b{}\b", regex::escape(phrase));
            (*phrase, Regex::new(&pattern).unwrap())
        })
        .collect()
}

/// Find every affirmative "<subject> shall" in a line, returning lowercased subjects
pub fn affirmative_subjects(line: &str) -> Vec<String> {
    SHALL_PATTERN
        .captures_iter(line)
        .filter(|caps| {
            let end = caps.get(0).map(|m| m.end()).unwrap_or(line.len());
            !NEGATION_FOLLOWS.is_match(&line[end..])
        })
        .filter_map(|caps| caps.get(1).map(|m| m.as_str().to_lowercase()))
        .collect()
}

/// Find every negated "<subject> shall not" in a line, returning lowercased subjects
pub fn negated_subjects(line: &str) -> Vec<String> {
    SHALL_NOT_PATTERN
        .captures_iter(line)
        .filter_map(|caps| caps.get(1).map(|m| m.as_str().to_lowercase()))
        .collect()
}
