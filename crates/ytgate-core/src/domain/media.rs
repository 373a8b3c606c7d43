//! Media URLs and download requests.

use std::fmt;

use serde::{Deserialize, Serialize};
use url::Url;

use crate::ports::ValidationError;

/// Codec that receives an explicit `--audio-quality` override.
pub const DEFAULT_AUDIO_FORMAT: &str = "mp3";

/// Bitrate used for [`DEFAULT_AUDIO_FORMAT`] when none is requested.
pub const DEFAULT_AUDIO_QUALITY: &str = "320";

/// Container used for video downloads.
pub const DEFAULT_VIDEO_FORMAT: &str = "mp4";

/// Sentinel quality selecting the best stream in the target container.
pub const BEST_QUALITY: &str = "best";

/// Audio codecs the extractor can convert to.
const AUDIO_FORMATS: &[&str] = &[
    "best", "aac", "alac", "flac", "m4a", "mp3", "opus", "vorbis", "wav",
];

/// A validated absolute `http`/`https` URL.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MediaUrl(Url);

impl MediaUrl {
    /// Parse and scheme-check a raw URL string.
    pub fn parse(raw: &str) -> Result<Self, ValidationError> {
        let invalid = || ValidationError::InvalidUrl {
            input: raw.to_string(),
        };
        let url = Url::parse(raw.trim()).map_err(|_| invalid())?;
        match url.scheme() {
            "http" | "https" if url.has_host() => Ok(Self(url)),
            _ => Err(invalid()),
        }
    }

    /// The URL as passed to the external tool.
    pub fn as_str(&self) -> &str {
        self.0.as_str()
    }

    /// Host portion, used for log fields.
    pub fn host(&self) -> Option<&str> {
        self.0.host_str()
    }
}

impl fmt::Display for MediaUrl {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// What the caller wants extracted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MediaKind {
    Audio,
    Video,
}

impl fmt::Display for MediaKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Audio => f.write_str("audio"),
            Self::Video => f.write_str("video"),
        }
    }
}

/// A validated download request: (url, kind, format, quality).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DownloadRequest {
    pub url: MediaUrl,
    pub kind: MediaKind,
    /// Audio codec or video container extension.
    pub format: String,
    /// Bitrate / VBR level for audio, `best` or a max height for video.
    pub quality: String,
}

impl DownloadRequest {
    /// Build an audio extraction request.
    ///
    /// `quality` defaults to [`DEFAULT_AUDIO_QUALITY`]; accepted values are a
    /// VBR level `0`-`10` or a bitrate such as `192` / `192k`.
    pub fn audio(
        url: MediaUrl,
        format: &str,
        quality: Option<&str>,
    ) -> Result<Self, ValidationError> {
        let format = format.trim().to_ascii_lowercase();
        if !AUDIO_FORMATS.contains(&format.as_str()) {
            return Err(invalid("format", format!("unsupported audio format '{format}'")));
        }

        let quality = non_empty(quality).unwrap_or(DEFAULT_AUDIO_QUALITY);
        let digits = quality.strip_suffix(['k', 'K']).unwrap_or(quality);
        if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
            return Err(invalid(
                "quality",
                format!("expected a bitrate like 192 or 192k, got '{quality}'"),
            ));
        }

        Ok(Self {
            url,
            kind: MediaKind::Audio,
            format,
            quality: quality.to_string(),
        })
    }

    /// Build a video download request.
    ///
    /// `quality` defaults to [`BEST_QUALITY`]; otherwise it must be a
    /// positive maximum height such as `720`.
    pub fn video(
        url: MediaUrl,
        format: &str,
        quality: Option<&str>,
    ) -> Result<Self, ValidationError> {
        let format = format.trim().to_ascii_lowercase();
        if format.is_empty()
            || format.len() > 8
            || !format.bytes().all(|b| b.is_ascii_alphanumeric())
        {
            return Err(invalid("format", format!("unsupported container '{format}'")));
        }

        let quality = non_empty(quality).unwrap_or(BEST_QUALITY);
        if quality != BEST_QUALITY && !matches!(quality.parse::<u32>(), Ok(h) if h > 0) {
            return Err(invalid(
                "quality",
                format!("expected 'best' or a height like 720, got '{quality}'"),
            ));
        }

        Ok(Self {
            url,
            kind: MediaKind::Video,
            format,
            quality: quality.to_string(),
        })
    }

    /// Whether the video request asks for the best stream in its container.
    pub fn wants_best(&self) -> bool {
        self.quality == BEST_QUALITY
    }
}

fn non_empty(value: Option<&str>) -> Option<&str> {
    value.map(str::trim).filter(|v| !v.is_empty())
}

fn invalid(name: &str, reason: String) -> ValidationError {
    ValidationError::InvalidParameter {
        name: name.to_string(),
        reason,
    }
}
