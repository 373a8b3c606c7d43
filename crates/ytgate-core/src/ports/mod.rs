//! Port definitions (trait abstractions) for external systems.
//!
//! Ports define the interfaces that the core domain expects from infrastructure.
//! They contain no implementation details and use only domain types.
//!
//! # Design Rules
//!
//! - No process or filesystem handles in any signature
//! - Intent-based methods (`fetch_info`, `download`, `locate`), not command lines
//! - Errors are the semantic enums below; adapters map them to status codes

pub mod artifact_store;
pub mod media_tool;

use std::time::Duration;

use thiserror::Error;

pub use artifact_store::ArtifactStorePort;
pub use media_tool::MediaToolPort;

/// Errors produced while validating caller input.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    /// A required parameter was absent or empty.
    #[error("{0} parameter is required")]
    MissingParameter(String),

    /// The value is not an absolute http(s) URL.
    #[error("Invalid URL")]
    InvalidUrl {
        /// The rejected input, kept for logging.
        input: String,
    },

    /// A parameter had a value the gateway cannot hand to the tool.
    #[error("Invalid {name}: {reason}")]
    InvalidParameter { name: String, reason: String },
}

/// Domain-specific errors for external tool invocations.
///
/// This error type abstracts away process management details and gives
/// services a clean interface for handling tool failures.
#[derive(Debug, Error)]
pub enum ToolError {
    /// The tool binary could not be started at all.
    #[error("Failed to launch {program}: {reason}")]
    Spawn { program: String, reason: String },

    /// The tool exited non-zero. `message` carries its diagnostic output.
    #[error("{message}")]
    Failed {
        status: Option<i32>,
        message: String,
    },

    /// The configured invocation timeout elapsed; the child was killed.
    #[error("External tool timed out after {0:?}")]
    TimedOut(Duration),

    /// The tool's metadata output was not valid JSON.
    #[error("Failed to parse video info: {0}")]
    MetadataParse(String),
}

impl ToolError {
    /// Build a `Failed` error from an exit code and captured stderr.
    ///
    /// Falls back to describing the exit status when stderr is blank.
    pub fn from_exit(status: Option<i32>, stderr: &str) -> Self {
        let trimmed = stderr.trim();
        let message = if trimmed.is_empty() {
            match status {
                Some(code) => format!("External tool exited with status {code}"),
                None => "External tool was terminated by a signal".to_string(),
            }
        } else {
            trimmed.to_string()
        };
        Self::Failed { status, message }
    }
}

/// Domain-specific errors for the transient artifact directory.
#[derive(Debug, Error)]
pub enum ArtifactError {
    /// The tool reported success but no file carries the request token.
    #[error("Downloaded file not found")]
    ArtifactNotFound { token: String },

    /// More than one file carries the request token.
    #[error("Multiple files match download token {token}: {}", matches.join(", "))]
    AmbiguousArtifact { token: String, matches: Vec<String> },

    /// A named file does not exist in the artifact directory.
    #[error("File not found")]
    NotFound(String),

    /// Filesystem failure while reading or removing artifacts.
    #[error("Storage error: {0}")]
    Io(String),
}

impl From<std::io::Error> for ArtifactError {
    fn from(err: std::io::Error) -> Self {
        Self::Io(err.to_string())
    }
}

/// Core error type for semantic domain errors.
///
/// This is the canonical error type used across the core domain.
/// Adapters should map this to their own error types (HTTP status codes,
/// CLI exit codes).
#[derive(Debug, Error)]
pub enum CoreError {
    /// Caller input was rejected.
    #[error(transparent)]
    Validation(#[from] ValidationError),

    /// The external tool failed.
    #[error(transparent)]
    Tool(#[from] ToolError),

    /// Artifact lookup or removal failed.
    #[error(transparent)]
    Artifact(#[from] ArtifactError),
}
