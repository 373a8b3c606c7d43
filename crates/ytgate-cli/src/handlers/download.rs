//! Download command handler.
//!
//! Runs the same lifecycle as the HTTP endpoints but leaves the artifact in
//! place; nothing is scheduled for deletion.

use anyhow::Result;
use ytgate_core::{
    Artifact, DEFAULT_AUDIO_FORMAT, DEFAULT_VIDEO_FORMAT, DownloadRequest, validate_url,
};

use crate::bootstrap::CliContext;
use crate::error::CliError;

/// Arguments for the download command.
#[derive(Debug, Clone, Default)]
pub struct DownloadArgs {
    pub url: String,
    pub audio: bool,
    pub format: Option<String>,
    pub quality: Option<String>,
}

impl DownloadArgs {
    /// Validate into a domain request.
    pub fn to_request(&self) -> Result<DownloadRequest, CliError> {
        let invalid = |e: ytgate_core::ValidationError| CliError::Arguments(e.to_string());
        let url = validate_url(Some(&self.url)).map_err(invalid)?;
        let quality = self.quality.as_deref();
        if self.audio {
            let format = self.format.as_deref().unwrap_or(DEFAULT_AUDIO_FORMAT);
            DownloadRequest::audio(url, format, quality).map_err(invalid)
        } else {
            let format = self.format.as_deref().unwrap_or(DEFAULT_VIDEO_FORMAT);
            DownloadRequest::video(url, format, quality).map_err(invalid)
        }
    }
}

/// Download and return the artifact.
pub async fn run(ctx: &CliContext, args: &DownloadArgs) -> Result<Artifact, CliError> {
    let request = args.to_request()?;
    Ok(ctx.gateway().download(request).await?)
}

/// Download and print the artifact path.
pub async fn execute(ctx: &CliContext, args: DownloadArgs) -> Result<()> {
    let artifact = run(ctx, &args).await?;
    println!("{}", artifact.path.display());
    Ok(())
}
