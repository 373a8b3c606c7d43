//! Domain types for the download gateway.
//!
//! These types describe what the gateway works with (URLs, requests,
//! plans, artifacts, metadata) and carry no infrastructure details.

mod artifact;
mod info;
mod media;
mod plan;

pub use artifact::{Artifact, ArtifactEntry, ArtifactToken, format_megabytes};
pub use info::{DESCRIPTION_LIMIT, FORMAT_LIMIT, FormatSummary, VideoInfo, truncate_description};
pub use media::{
    BEST_QUALITY, DEFAULT_AUDIO_FORMAT, DEFAULT_AUDIO_QUALITY, DEFAULT_VIDEO_FORMAT,
    DownloadRequest, MediaKind, MediaUrl,
};
pub use plan::DownloadPlan;
