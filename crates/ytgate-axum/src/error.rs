//! Axum-specific error types and mappings.
//!
//! This module maps `CoreError` and its parts onto HTTP status codes and a
//! JSON body with a stable `type` discriminant.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::Serialize;
use thiserror::Error;
use ytgate_core::{ArtifactError, CoreError, ToolError, ValidationError};

/// Axum-specific error type.
#[derive(Debug, Error)]
pub enum HttpError {
    /// Invalid caller input.
    #[error("Bad request: {message}")]
    BadRequest {
        message: String,
        error_type: &'static str,
    },

    /// Named resource does not exist.
    #[error("Not found: {message}")]
    NotFound {
        message: String,
        error_type: &'static str,
    },

    /// External tool or filesystem failure.
    #[error("Internal error: {message}")]
    Internal {
        message: String,
        error_type: &'static str,
    },
}

/// JSON error response body.
#[derive(Serialize)]
struct ErrorBody<'a> {
    error: &'a str,
    status: u16,
    /// Stable error type discriminant for client-side handling
    #[serde(rename = "type")]
    error_type: &'static str,
}

impl HttpError {
    pub fn status(&self) -> StatusCode {
        match self {
            Self::BadRequest { .. } => StatusCode::BAD_REQUEST,
            Self::NotFound { .. } => StatusCode::NOT_FOUND,
            Self::Internal { .. } => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    pub fn message(&self) -> &str {
        match self {
            Self::BadRequest { message, .. }
            | Self::NotFound { message, .. }
            | Self::Internal { message, .. } => message,
        }
    }

    pub const fn error_type(&self) -> &'static str {
        match self {
            Self::BadRequest { error_type, .. }
            | Self::NotFound { error_type, .. }
            | Self::Internal { error_type, .. } => error_type,
        }
    }

    pub(crate) fn internal(message: impl Into<String>) -> Self {
        Self::Internal {
            message: message.into(),
            error_type: "INTERNAL",
        }
    }
}

impl IntoResponse for HttpError {
    fn into_response(self) -> Response {
        let status = self.status();
        if status.is_server_error() {
            tracing::warn!(target: "ytgate.http", status = status.as_u16(), error = %self.message(), "request failed");
        }

        let body = ErrorBody {
            error: self.message(),
            status: status.as_u16(),
            error_type: self.error_type(),
        };

        (status, axum::Json(body)).into_response()
    }
}

impl From<ValidationError> for HttpError {
    fn from(err: ValidationError) -> Self {
        let error_type = match err {
            ValidationError::MissingParameter(_) => "MISSING_PARAMETER",
            ValidationError::InvalidUrl { .. } => "INVALID_URL",
            ValidationError::InvalidParameter { .. } => "INVALID_PARAMETER",
        };
        Self::BadRequest {
            message: err.to_string(),
            error_type,
        }
    }
}

impl From<ToolError> for HttpError {
    fn from(err: ToolError) -> Self {
        let error_type = match err {
            ToolError::MetadataParse(_) => "METADATA_PARSE_FAILURE",
            ToolError::Spawn { .. } | ToolError::Failed { .. } | ToolError::TimedOut(_) => {
                "EXTERNAL_TOOL_FAILURE"
            }
        };
        Self::Internal {
            message: err.to_string(),
            error_type,
        }
    }
}

impl From<ArtifactError> for HttpError {
    fn from(err: ArtifactError) -> Self {
        match err {
            ArtifactError::NotFound(_) => Self::NotFound {
                message: err.to_string(),
                error_type: "NOT_FOUND",
            },
            ArtifactError::ArtifactNotFound { .. } => Self::Internal {
                message: err.to_string(),
                error_type: "ARTIFACT_NOT_FOUND",
            },
            ArtifactError::AmbiguousArtifact { .. } => Self::Internal {
                message: err.to_string(),
                error_type: "AMBIGUOUS_ARTIFACT",
            },
            ArtifactError::Io(_) => Self::internal(err.to_string()),
        }
    }
}

impl From<CoreError> for HttpError {
    fn from(err: CoreError) -> Self {
        match err {
            CoreError::Validation(e) => e.into(),
            CoreError::Tool(e) => e.into(),
            CoreError::Artifact(e) => e.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn validation_maps_to_400_with_type() {
        let err: HttpError = ValidationError::MissingParameter("URL".into()).into();
        assert_eq!(err.status(), StatusCode::BAD_REQUEST);
        assert_eq!(err.message(), "URL parameter is required");
        assert_eq!(err.error_type(), "MISSING_PARAMETER");

        let err: HttpError = ValidationError::InvalidUrl { input: "x".into() }.into();
        assert_eq!(err.error_type(), "INVALID_URL");
        assert_eq!(err.message(), "Invalid URL");
    }

    #[test]
    fn tool_failure_maps_to_500_with_stderr() {
        let err: HttpError = CoreError::from(ToolError::from_exit(Some(1), "ERROR: boom")).into();
        assert_eq!(err.status(), StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(err.message(), "ERROR: boom");
        assert_eq!(err.error_type(), "EXTERNAL_TOOL_FAILURE");
    }

    #[test]
    fn artifact_errors_split_between_404_and_500() {
        let err: HttpError = ArtifactError::NotFound("x".into()).into();
        assert_eq!(err.status(), StatusCode::NOT_FOUND);
        assert_eq!(err.message(), "File not found");

        let err: HttpError = ArtifactError::ArtifactNotFound { token: "t".into() }.into();
        assert_eq!(err.status(), StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(err.message(), "Downloaded file not found");

        let err: HttpError = ArtifactError::Io("disk".into()).into();
        assert_eq!(err.error_type(), "INTERNAL");
    }
}
