//! Download artifacts and the tokens that correlate them with requests.

use std::fmt;
use std::path::PathBuf;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Per-request correlation value embedded in the output filename.
///
/// The external tool names the final file from video metadata, so the
/// token is the only part of the name known in advance. Format:
/// `<unix-millis>-<8 hex chars>`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ArtifactToken(String);

impl ArtifactToken {
    /// Generate a fresh token from the current time and a random suffix.
    pub fn generate() -> Self {
        let random = Uuid::new_v4().simple().to_string();
        Self::from_parts(Utc::now().timestamp_millis(), &random[..8])
    }

    /// Build a token from its parts.
    pub fn from_parts(millis: i64, random: &str) -> Self {
        Self(format!("{millis}-{random}"))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Whether a directory entry name carries this token.
    pub fn matches(&self, file_name: &str) -> bool {
        file_name.contains(&self.0)
    }
}

impl fmt::Display for ArtifactToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// A file the external tool produced for one request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Artifact {
    pub token: ArtifactToken,
    /// Resolved file name, known only after the tool has run.
    pub filename: String,
    pub path: PathBuf,
    pub size_bytes: u64,
    pub created_at: Option<DateTime<Utc>>,
}

/// One row of the artifact listing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ArtifactEntry {
    pub filename: String,
    /// Human-readable size, e.g. `"3.42 MB"`.
    pub size: String,
    pub size_bytes: u64,
    pub created: Option<DateTime<Utc>>,
    pub download_url: String,
}

impl ArtifactEntry {
    pub fn new(filename: String, size_bytes: u64, created: Option<DateTime<Utc>>) -> Self {
        Self {
            download_url: format!("/downloads/{filename}"),
            size: format_megabytes(size_bytes as f64),
            filename,
            size_bytes,
            created,
        }
    }
}

/// Render a byte count as megabytes with two decimals.
pub fn format_megabytes(bytes: f64) -> String {
    format!("{:.2} MB", bytes / (1024.0 * 1024.0))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn generated_tokens_differ_within_the_same_millisecond() {
        let a = ArtifactToken::generate();
        let b = ArtifactToken::generate();
        assert_ne!(a, b);
    }

    #[test]
    fn token_shape() {
        let token = ArtifactToken::generate();
        let (millis, random) = token.as_str().split_once('-').unwrap();
        assert!(millis.parse::<i64>().is_ok());
        assert_eq!(random.len(), 8);
        assert!(random.bytes().all(|b| b.is_ascii_hexdigit()));
    }

    #[test]
    fn token_matches_by_substring() {
        let token = ArtifactToken::from_parts(1_700_000_000_000, "deadbeef");
        assert!(token.matches("Some Title_1700000000000-deadbeef.mp3"));
        assert!(!token.matches("Some Title_1700000000000-cafebabe.mp3"));
    }

    #[test]
    fn megabytes_two_decimals() {
        assert_eq!(format_megabytes(0.0), "0.00 MB");
        assert_eq!(format_megabytes(1_572_864.0), "1.50 MB");
    }

    #[test]
    fn entry_builds_download_url() {
        let entry = ArtifactEntry::new("clip_1-abc.mp4".to_string(), 2048, None);
        assert_eq!(entry.download_url, "/downloads/clip_1-abc.mp4");
        assert_eq!(entry.size, "0.00 MB");
    }
}
