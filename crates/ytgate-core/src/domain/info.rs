//! Normalized video metadata.
//!
//! The extractor's `--dump-json` output is large and loosely typed; only the
//! subset below is exposed to callers.

use serde::{Deserialize, Serialize};

use super::artifact::format_megabytes;
use crate::ports::ToolError;

/// Descriptions longer than this many characters are truncated.
pub const DESCRIPTION_LIMIT: usize = 200;

/// At most this many format descriptors are returned.
pub const FORMAT_LIMIT: usize = 10;

/// Metadata returned by the info endpoint.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VideoInfo {
    pub title: Option<String>,
    /// Human duration string such as `"3:32"`.
    pub duration: Option<String>,
    pub uploader: Option<String>,
    pub view_count: Option<u64>,
    pub thumbnail: Option<String>,
    pub description: String,
    pub formats: Vec<FormatSummary>,
}

/// One available stream.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FormatSummary {
    pub format_id: Option<String>,
    pub ext: Option<String>,
    /// Quality label (the extractor's `format_note`).
    pub quality: Option<String>,
    /// Approximate size, e.g. `"12.30 MB"`, or `"Unknown"`.
    pub filesize: String,
}

#[derive(Debug, Deserialize)]
struct RawVideoInfo {
    title: Option<String>,
    duration_string: Option<String>,
    uploader: Option<String>,
    view_count: Option<u64>,
    thumbnail: Option<String>,
    description: Option<String>,
    formats: Option<Vec<RawFormat>>,
}

#[derive(Debug, Deserialize)]
struct RawFormat {
    format_id: Option<String>,
    ext: Option<String>,
    format_note: Option<String>,
    filesize: Option<f64>,
    filesize_approx: Option<f64>,
}

impl From<RawFormat> for FormatSummary {
    fn from(raw: RawFormat) -> Self {
        let filesize = raw
            .filesize
            .or(raw.filesize_approx)
            .map_or_else(|| "Unknown".to_string(), format_megabytes);
        Self {
            format_id: raw.format_id,
            ext: raw.ext,
            quality: raw.format_note,
            filesize,
        }
    }
}

impl VideoInfo {
    /// Parse the extractor's `--dump-json` stdout.
    pub fn from_dump_json(stdout: &[u8]) -> Result<Self, ToolError> {
        let raw: RawVideoInfo = serde_json::from_slice(stdout)
            .map_err(|e| ToolError::MetadataParse(e.to_string()))?;

        Ok(Self {
            title: raw.title,
            duration: raw.duration_string,
            uploader: raw.uploader,
            view_count: raw.view_count,
            thumbnail: raw.thumbnail,
            description: truncate_description(raw.description.as_deref()),
            formats: raw
                .formats
                .unwrap_or_default()
                .into_iter()
                .take(FORMAT_LIMIT)
                .map(FormatSummary::from)
                .collect(),
        })
    }
}

/// Keep the first [`DESCRIPTION_LIMIT`] characters, appending `...` when cut.
///
/// Absent descriptions become the empty string.
pub fn truncate_description(description: Option<&str>) -> String {
    let Some(text) = description else {
        return String::new();
    };
    match text.char_indices().nth(DESCRIPTION_LIMIT) {
        Some((cut, _)) => format!("{}...", &text[..cut]),
        None => text.to_string(),
    }
}
