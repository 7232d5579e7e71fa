use std::path::PathBuf;

use shared_types::Strategy;
use thiserror::Error;

/// Errors that abort an analysis before any strategy runs
#[derive(Error, Debug)]
pub enum MutateError {
    #[error("File not found: {}", .0.display())]
    FileNotFound(PathBuf),

    #[error("Not a file: {}", .0.display())]
    NotAFile(PathBuf),

    #[error("Failed to read {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Preset not found: {0}")]
    PresetNotFound(String),

    #[error("Invalid preset '{name}': {reason}")]
    InvalidPreset { name: String, reason: String },

    #[error("Unknown strategies: {}. Valid: {}", .0.join(", "), Strategy::catalog())]
    UnknownStrategies(Vec<String>),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unknown_strategies_message() {
        let err = MutateError::UnknownStrategies(vec!["contradicton".to_string()]);
        assert_eq!(
            err.to_string(),
            "Unknown strategies: contradicton. Valid: contradiction, ambiguity, deletion, inversion, boundary"
        );
    }

    #[test]
    fn test_file_messages() {
        assert_eq!(
            MutateError::FileNotFound(PathBuf::from("/tmp/missing.md")).to_string(),
            "File not found: /tmp/missing.md"
        );
        assert_eq!(
            MutateError::PresetNotFound("legal".to_string()).to_string(),
            "Preset not found: legal"
        );
    }
}
