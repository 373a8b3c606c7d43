//! External media tool trait definition.
//!
//! This port defines the interface for the command-line extractor the
//! gateway wraps. Implementations own all process details internally.

use async_trait::async_trait;

use super::ToolError;
use crate::domain::{DownloadPlan, MediaUrl, VideoInfo};

/// Media extraction tool used by the gateway.
///
/// # Design Rules
///
/// - Express **intent**, not command lines
/// - Arguments are always passed as discrete values, never via a shell
/// - Must support: real yt-dlp runner, test doubles
#[async_trait]
pub trait MediaToolPort: Send + Sync {
    /// Fetch metadata for `url` without downloading anything.
    async fn fetch_info(&self, url: &MediaUrl) -> Result<VideoInfo, ToolError>;

    /// Execute a download plan.
    ///
    /// On success the tool has written exactly one file into the plan's
    /// output directory whose name contains the plan token.
    async fn download(&self, plan: &DownloadPlan) -> Result<(), ToolError>;
}
