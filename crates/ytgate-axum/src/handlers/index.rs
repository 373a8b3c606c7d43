//! Capability listing served at `/`.

use axum::Json;
use serde_json::{Value, json};

/// Describe the service and its endpoints.
pub async fn index() -> Json<Value> {
    Json(json!({
        "message": "ytgate is running",
        "version": env!("CARGO_PKG_VERSION"),
        "endpoints": {
            "/api/info?url=VIDEO_URL": "Get video information",
            "/api/download/mp3?url=VIDEO_URL&quality=320": "Download as MP3",
            "/api/download/mp4?url=VIDEO_URL&quality=best": "Download as MP4",
            "/api/files": "List downloaded files",
            "DELETE /api/files/{filename}": "Delete a downloaded file",
            "/downloads/{filename}": "Fetch a downloaded file",
            "/health": "Liveness check"
        },
        "note": "This server is for educational purposes only"
    }))
}
