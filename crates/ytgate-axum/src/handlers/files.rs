//! Artifact listing and deletion handlers.

use axum::Json;
use axum::extract::{Path, State};
use serde::Serialize;
use ytgate_core::ArtifactEntry;

use crate::error::HttpError;
use crate::state::AppState;

#[derive(Debug, Serialize)]
pub struct FilesResponse {
    pub files: Vec<ArtifactEntry>,
}

#[derive(Debug, Serialize)]
pub struct MessageResponse {
    pub message: String,
}

/// `GET /api/files` - every artifact currently on disk, newest first.
pub async fn list(State(state): State<AppState>) -> Result<Json<FilesResponse>, HttpError> {
    let files = state.gateway.list().await?;
    Ok(Json(FilesResponse { files }))
}

/// `DELETE /api/files/{filename}` - remove one artifact.
///
/// Unsafe or unknown names are reported as 404.
pub async fn remove(
    State(state): State<AppState>,
    Path(filename): Path<String>,
) -> Result<Json<MessageResponse>, HttpError> {
    let path = state.gateway.delete(&filename).await?;
    state.cleanup.cancel(&path);
    Ok(Json(MessageResponse {
        message: "File deleted successfully".to_string(),
    }))
}
