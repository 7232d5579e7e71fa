//! MCP Tool definitions and handlers

use std::time::Duration;

use mutation_engine::{error_json, MutateRequest};
use serde_json::json;
use shared_types::Strategy;

use super::protocol::{Tool, ToolResultContent};
use super::server::MutaDocServer;
use crate::error::ServerError;

/// Get all tool definitions
pub fn get_tool_definitions() -> Vec<Tool> {
    vec![
        Tool {
            name: "mutate".to_string(),
            description: Some(
                "Mutation-test a document: find contradictions, vague modifiers, dead or \
                 load-bearing sections, unsupported claims and fragile numeric limits"
                    .to_string(),
            ),
            input_schema: json!({
                "type": "object",
                "properties": {
                    "target_path": {
                        "type": "string",
                        "description": "Path of the document to analyze"
                    },
                    "strategies": {
                        "type": "string",
                        "default": "all",
                        "description": format!("\"all\" or a comma-separated list of: {}", Strategy::catalog())
                    },
                    "severity_threshold": {
                        "type": "string",
                        "enum": ["critical", "major", "minor", "info"],
                        "default": "minor",
                        "description": "Drop findings less severe than this"
                    },
                    "preset": {
                        "type": "string",
                        "description": "Domain preset (e.g. contract, api_spec, academic_paper, policy)"
                    }
                },
                "required": ["target_path"]
            }),
        },
        Tool {
            name: "list_presets".to_string(),
            description: Some(
                "Returns the available presets with their enabled strategies and severity overrides"
                    .to_string(),
            ),
            input_schema: json!({
                "type": "object",
                "properties": {}
            }),
        },
    ]
}

/// Dispatch a tool call
pub async fn handle_tool_call(
    server: &MutaDocServer,
    name: &str,
    arguments: serde_json::Value,
) -> Result<Vec<ToolResultContent>, ServerError> {
    match name {
        "mutate" => handle_mutate(server, arguments).await,
        "list_presets" => handle_list_presets(server),
        _ => Err(ServerError::UnknownTool(name.to_string())),
    }
}

/// Engine failures come back as `{"error": ...}` text, not as tool errors
async fn handle_mutate(
    server: &MutaDocServer,
    args: serde_json::Value,
) -> Result<Vec<ToolResultContent>, ServerError> {
    let request: MutateRequest =
        serde_json::from_value(args).map_err(|e| ServerError::InvalidArgument(e.to_string()))?;
    let timeout_ms = server.timeout_ms();
    let engine = server.engine().clone();

    tracing::debug!(target_path = %request.target_path.display(), "running mutate");

    let result = tokio::time::timeout(
        Duration::from_millis(timeout_ms),
        tokio::task::spawn_blocking(move || engine.mutate_json(&request)),
    )
    .await;

    let value = match result {
        Ok(Ok(value)) => value,
        Ok(Err(join_error)) => return Err(ServerError::TaskFailed(join_error.to_string())),
        Err(_elapsed) => {
            tracing::warn!(timeout_ms, "analysis timed out");
            error_json(ServerError::Timeout(timeout_ms).to_string())
        }
    };

    Ok(vec![ToolResultContent::Text {
        text: serde_json::to_string_pretty(&value)?,
    }])
}

fn handle_list_presets(server: &MutaDocServer) -> Result<Vec<ToolResultContent>, ServerError> {
    let registry = server.engine().presets();
    let presets: Vec<_> = registry
        .list()
        .into_iter()
        .map(|name| match registry.resolve(&name) {
            Ok(preset) => {
                let enabled: Vec<_> = Strategy::ALL
                    .into_iter()
                    .filter(|s| preset.is_enabled(*s))
                    .collect();
                let weights: serde_json::Map<_, _> = Strategy::ALL
                    .into_iter()
                    .map(|s| (s.to_string(), json!(preset.weight(s))))
                    .collect();
                json!({
                    "name": name,
                    "description": preset.description,
                    "default_persona": preset.default_persona,
                    "enabled_strategies": enabled,
                    "weights": weights,
                    "severity_overrides": preset.severity_overrides,
                })
            }
            Err(e) => {
                tracing::warn!(preset = %name, error = %e, "skipping unreadable preset");
                json!({ "name": name, "error": e.to_string() })
            }
        })
        .collect();

    let result = json!({
        "presets": presets,
        "count": presets.len()
    });

    Ok(vec![ToolResultContent::Text {
        text: serde_json::to_string_pretty(&result)?,
    }])
}
