//! Server-side errors

use thiserror::Error;

/// Errors surfaced by the protocol layer and tool handlers
#[derive(Error, Debug)]
pub enum ServerError {
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    #[error("Unknown tool: {0}")]
    UnknownTool(String),

    #[error("Resource not found: {0}")]
    ResourceNotFound(String),

    #[error("Prompt not found: {0}")]
    PromptNotFound(String),

    #[error("Protocol error: {0}")]
    ProtocolError(String),

    #[error("Analysis timed out after {0}ms")]
    Timeout(u64),

    #[error("Analysis task failed: {0}")]
    TaskFailed(String),

    #[error(transparent)]
    Engine(#[from] mutation_engine::MutateError),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    JsonError(#[from] serde_json::Error),
}

impl ServerError {
    /// JSON-RPC error code for failures reported as protocol errors
    pub fn code(&self) -> i32 {
        match self {
            ServerError::InvalidArgument(_)
            | ServerError::ResourceNotFound(_)
            | ServerError::PromptNotFound(_) => -32602,
            ServerError::UnknownTool(_) => -32601,
            ServerError::ProtocolError(_) | ServerError::JsonError(_) => -32700,
            _ => -32603,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_timeout_message() {
        assert_eq!(
            ServerError::Timeout(5000).to_string(),
            "Analysis timed out after 5000ms"
        );
    }

    #[test]
    fn test_engine_errors_pass_through() {
        let err: ServerError = mutation_engine::MutateError::PresetNotFound("legal".into()).into();
        assert_eq!(err.to_string(), "Preset not found: legal");
        assert_eq!(err.code(), -32603);
    }

    #[test]
    fn test_codes() {
        assert_eq!(ServerError::PromptNotFound("x".into()).code(), -32602);
        assert_eq!(ServerError::UnknownTool("x".into()).code(), -32601);
    }
}
