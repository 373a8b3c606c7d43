//! Metadata handler.

use axum::Json;
use axum::extract::{Query, State};
use ytgate_core::{VideoInfo, validate_url};

use super::MediaQuery;
use crate::error::HttpError;
use crate::state::AppState;

/// `GET /api/info?url=` - metadata without downloading.
pub async fn info(
    State(state): State<AppState>,
    Query(query): Query<MediaQuery>,
) -> Result<Json<VideoInfo>, HttpError> {
    let url = validate_url(query.url.as_deref())?;
    let info = state.gateway.info(&url).await?;
    Ok(Json(info))
}
