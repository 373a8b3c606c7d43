//! Download handlers - run the tool, stream the single artifact back.

use axum::extract::{Query, State};
use axum::response::Response;
use ytgate_core::{
    DEFAULT_AUDIO_FORMAT, DEFAULT_VIDEO_FORMAT, DownloadRequest, validate_url,
};

use super::MediaQuery;
use crate::error::HttpError;
use crate::state::AppState;
use crate::stream::artifact_response;

/// `GET /api/download/mp3?url=&quality=` - audio extraction.
pub async fn mp3(
    State(state): State<AppState>,
    Query(query): Query<MediaQuery>,
) -> Result<Response, HttpError> {
    let url = validate_url(query.url.as_deref())?;
    let request = DownloadRequest::audio(url, DEFAULT_AUDIO_FORMAT, query.quality.as_deref())?;
    deliver(&state, request).await
}

/// `GET /api/download/mp4?url=&quality=` - video download.
pub async fn mp4(
    State(state): State<AppState>,
    Query(query): Query<MediaQuery>,
) -> Result<Response, HttpError> {
    let url = validate_url(query.url.as_deref())?;
    let request = DownloadRequest::video(url, DEFAULT_VIDEO_FORMAT, query.quality.as_deref())?;
    deliver(&state, request).await
}

async fn deliver(state: &AppState, request: DownloadRequest) -> Result<Response, HttpError> {
    let artifact = state.gateway.download(request).await?;
    artifact_response(artifact, state.cleanup.clone()).await
}
