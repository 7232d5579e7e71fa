//! MCP Prompt definitions

use std::collections::HashMap;

use super::protocol::{Prompt, PromptArgument, PromptContent, PromptMessage};
use crate::error::ServerError;

/// Get all prompt definitions
pub fn get_prompt_definitions() -> Vec<Prompt> {
    vec![Prompt {
        name: "stress_test_document".to_string(),
        description: Some(
            "Stress-test a document for contradictions, vague language and fragile limits"
                .to_string(),
        ),
        arguments: Some(vec![
            PromptArgument {
                name: "target_path".to_string(),
                description: Some("Path of the document to analyze".to_string()),
                required: Some(true),
            },
            PromptArgument {
                name: "preset".to_string(),
                description: Some(
                    "Domain preset: contract, api_spec, academic_paper or policy".to_string(),
                ),
                required: Some(false),
            },
        ]),
    }]
}

/// Get a prompt by name with arguments
pub fn get_prompt(
    name: &str,
    arguments: HashMap<String, String>,
) -> Result<Vec<PromptMessage>, ServerError> {
    match name {
        "stress_test_document" => expand_stress_test_prompt(arguments),
        _ => Err(ServerError::PromptNotFound(name.to_string())),
    }
}

fn expand_stress_test_prompt(
    args: HashMap<String, String>,
) -> Result<Vec<PromptMessage>, ServerError> {
    let target = args
        .get("target_path")
        .map(|s| s.as_str())
        .unwrap_or("[path/to/document.md]");
    let preset_line = match args.get("preset").map(|s| s.trim()).filter(|s| !s.is_empty()) {
        Some(preset) => format!("- preset: \"{}\"\n", preset),
        None => String::new(),
    };

    let text = format!(
        r#"Stress-test the document at {target} before it ships.

Use the `mutate` tool with:
- target_path: "{target}"
- strategies: "all"
- severity_threshold: "minor"
{preset_line}
Then walk through the surviving mutations, critical first. For each one,
quote the original text, explain what breaks under the mutation, and
propose a concrete rewrite. Finish with the kill score and the three
changes that would raise it the most."#
    );

    Ok(vec![PromptMessage {
        role: "user".to_string(),
        content: PromptContent::Text { text },
    }])
}
