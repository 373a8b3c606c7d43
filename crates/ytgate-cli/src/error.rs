//! CLI-specific error types and mappings.
//!
//! Maps `CoreError` to exit codes and user-facing messages.

use thiserror::Error;
use ytgate_core::{ArtifactError, CoreError};

/// CLI-specific error type.
#[derive(Debug, Error)]
pub enum CliError {
    /// Rejected input (bad URL, bad quality selector).
    #[error("Invalid arguments: {0}")]
    Arguments(String),

    /// yt-dlp could not be run or failed.
    #[error("{0}")]
    Tool(String),

    /// No such artifact.
    #[error("{0}")]
    NotFound(String),

    /// Filesystem error.
    #[error("IO error: {0}")]
    Io(String),

    /// Configuration error.
    #[error("Configuration error: {0}")]
    Config(String),
}

impl CliError {
    /// Map error to an exit code following sysexits.h.
    pub const fn exit_code(&self) -> i32 {
        match self {
            Self::Arguments(_) => 2, // EX_USAGE
            Self::Tool(_) => 69,     // EX_UNAVAILABLE
            Self::NotFound(_) => 66, // EX_NOINPUT
            Self::Io(_) => 74,       // EX_IOERR
            Self::Config(_) => 78,   // EX_CONFIG
        }
    }
}

impl From<CoreError> for CliError {
    fn from(err: CoreError) -> Self {
        match err {
            CoreError::Validation(e) => Self::Arguments(e.to_string()),
            CoreError::Tool(e) => Self::Tool(e.to_string()),
            CoreError::Artifact(e @ ArtifactError::Io(_)) => Self::Io(e.to_string()),
            CoreError::Artifact(e) => Self::NotFound(e.to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ytgate_core::{ToolError, ValidationError};

    #[test]
    fn exit_codes() {
        let err: CliError = CoreError::from(ValidationError::MissingParameter("URL".into())).into();
        assert_eq!(err.exit_code(), 2);
        assert_eq!(err.to_string(), "Invalid arguments: URL parameter is required");

        let err: CliError = CoreError::from(ToolError::from_exit(Some(1), "ERROR: nope")).into();
        assert_eq!(err.exit_code(), 69);
        assert_eq!(err.to_string(), "ERROR: nope");

        let err: CliError = CoreError::from(ArtifactError::NotFound("x".into())).into();
        assert_eq!(err.exit_code(), 66);
    }
}
