//! Streaming delivery of one-shot artifacts.
//!
//! The response body wraps the file reader; when the body is finished or
//! dropped (client disconnect included) the artifact is handed to the
//! cleanup scheduler.

use std::path::PathBuf;
use std::pin::Pin;
use std::task::{Context, Poll};

use axum::body::{Body, Bytes};
use axum::http::{HeaderValue, StatusCode, header};
use axum::response::Response;
use futures_core::Stream;
use tokio::fs::File;
use tokio_util::io::ReaderStream;
use ytgate_core::Artifact;
use ytgate_runtime::CleanupScheduler;

use crate::error::HttpError;

/// File body that schedules deletion of its source when dropped.
pub struct ArtifactStream {
    inner: ReaderStream<File>,
    path: PathBuf,
    cleanup: CleanupScheduler,
}

impl ArtifactStream {
    pub fn new(file: File, path: PathBuf, cleanup: CleanupScheduler) -> Self {
        Self {
            inner: ReaderStream::new(file),
            path,
            cleanup,
        }
    }
}

impl Stream for ArtifactStream {
    type Item = Result<Bytes, std::io::Error>;

    fn poll_next(mut self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Option<Self::Item>> {
        Pin::new(&mut self.inner).poll_next(cx)
    }
}

impl Drop for ArtifactStream {
    fn drop(&mut self) {
        schedule_or_remove(&self.cleanup, std::mem::take(&mut self.path));
    }
}

/// Hand `path` to the scheduler, or delete it now when no runtime is left.
fn schedule_or_remove(cleanup: &CleanupScheduler, path: PathBuf) {
    match tokio::runtime::Handle::try_current() {
        Ok(handle) => {
            let _guard = handle.enter();
            cleanup.schedule(path);
        }
        Err(_) => {
            if let Err(e) = std::fs::remove_file(&path) {
                if e.kind() != std::io::ErrorKind::NotFound {
                    tracing::warn!(target: "ytgate.cleanup", path = %path.display(), error = %e, "delete failed");
                }
            }
        }
    }
}

/// `Content-Disposition: attachment` for `filename`.
///
/// Plain ASCII names are quoted as-is. Anything else gets an ASCII fallback
/// plus an RFC 5987 `filename*` parameter.
pub fn content_disposition(filename: &str) -> HeaderValue {
    let plain = !filename.is_empty()
        && filename
            .bytes()
            .all(|b| (0x20..0x7f).contains(&b) && b != b'"' && b != b'\\');
    if plain {
        if let Ok(value) = HeaderValue::from_str(&format!("attachment; filename=\"{filename}\"")) {
            return value;
        }
    }

    let is_unreserved = |b: u8| b.is_ascii_alphanumeric() || matches!(b, b'-' | b'.' | b'_');

    let mut encoded = String::with_capacity(filename.len() * 3);
    for b in filename.bytes() {
        if is_unreserved(b) {
            encoded.push(char::from(b));
        } else {
            encoded.push_str(&format!("%{b:02X}"));
        }
    }

    let fallback: String = filename
        .chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() || matches!(c, '-' | '.' | '_' | ' ') {
                c
            } else {
                '_'
            }
        })
        .collect();

    HeaderValue::from_str(&format!(
        "attachment; filename=\"{fallback}\"; filename*=UTF-8''{encoded}"
    ))
    .unwrap_or_else(|_| HeaderValue::from_static("attachment"))
}

/// Build a streaming response for a located artifact.
///
/// Once this returns, the artifact's lifetime is owned by the body.
pub async fn artifact_response(
    artifact: Artifact,
    cleanup: CleanupScheduler,
) -> Result<Response, HttpError> {
    let file = match File::open(&artifact.path).await {
        Ok(file) => file,
        Err(e) => {
            schedule_or_remove(&cleanup, artifact.path.clone());
            return Err(HttpError::internal(format!("Failed to open download: {e}")));
        }
    };

    let length = match file.metadata().await {
        Ok(meta) => meta.len(),
        Err(_) => artifact.size_bytes,
    };
    let mime = mime_guess::from_path(&artifact.path).first_or_octet_stream();

    tracing::info!(
        target: "ytgate.http",
        file = %artifact.filename,
        bytes = length,
        mime = %mime,
        "streaming artifact"
    );

    let body = Body::from_stream(ArtifactStream::new(file, artifact.path, cleanup));
    let mut response = Response::new(body);
    *response.status_mut() = StatusCode::OK;

    let headers = response.headers_mut();
    if let Ok(value) = HeaderValue::from_str(mime.as_ref()) {
        headers.insert(header::CONTENT_TYPE, value);
    }
    headers.insert(header::CONTENT_LENGTH, HeaderValue::from(length));
    headers.insert(
        header::CONTENT_DISPOSITION,
        content_disposition(&artifact.filename),
    );

    Ok(response)
}
