//! `MediaToolPort` implementation for yt-dlp.
//!
//! This module provides the `YtDlpRunner` which spawns yt-dlp as a child
//! process, one per call, and maps its exit status and output onto
//! `ToolError`.

use std::path::PathBuf;
use std::process::Output;
use std::time::Duration;

use async_trait::async_trait;
use tracing::debug;
use ytgate_core::{DownloadPlan, MediaToolPort, MediaUrl, ToolError, VideoInfo};

use crate::command::YtDlpCommandBuilder;

/// `MediaToolPort` implementation backed by the yt-dlp binary.
///
/// # Design
///
/// - Pure process concerns only
/// - No filesystem discovery; the artifact store finds the output
/// - Optional wall-clock timeout per invocation
#[derive(Debug, Clone)]
pub struct YtDlpRunner {
    binary_path: PathBuf,
    timeout: Option<Duration>,
}

impl YtDlpRunner {
    /// Create a runner with no timeout.
    pub fn new(binary_path: impl Into<PathBuf>) -> Self {
        Self {
            binary_path: binary_path.into(),
            timeout: None,
        }
    }

    /// Kill the child if it runs longer than `timeout`.
    #[must_use]
    pub const fn with_timeout(mut self, timeout: Option<Duration>) -> Self {
        self.timeout = timeout;
        self
    }

    async fn run(&self, builder: YtDlpCommandBuilder) -> Result<Output, ToolError> {
        let program = self.binary_path.display().to_string();
        debug!(target: "ytgate.tool", program = %program, args = ?builder.args(), "spawning");

        let child = builder.build().spawn().map_err(|e| ToolError::Spawn {
            program: program.clone(),
            reason: e.to_string(),
        })?;

        // kill_on_drop reaps the child when the timeout drops this future.
        let output = match self.timeout {
            Some(limit) => tokio::time::timeout(limit, child.wait_with_output())
                .await
                .map_err(|_| ToolError::TimedOut(limit))?,
            None => child.wait_with_output().await,
        }
        .map_err(|e| ToolError::Spawn {
            program,
            reason: e.to_string(),
        })?;

        let stderr = String::from_utf8_lossy(&output.stderr);
        if !stderr.trim().is_empty() {
            debug!(target: "ytgate.tool", stderr = %stderr.trim(), "tool stderr");
        }

        if output.status.success() {
            Ok(output)
        } else {
            debug!(target: "ytgate.tool", status = ?output.status.code(), "tool failed");
            Err(ToolError::from_exit(output.status.code(), &stderr))
        }
    }
}

#[async_trait]
impl MediaToolPort for YtDlpRunner {
    async fn fetch_info(&self, url: &MediaUrl) -> Result<VideoInfo, ToolError> {
        let output = self
            .run(YtDlpCommandBuilder::info(&self.binary_path, url))
            .await?;
        VideoInfo::from_dump_json(&output.stdout)
    }

    async fn download(&self, plan: &DownloadPlan) -> Result<(), ToolError> {
        self.run(YtDlpCommandBuilder::download(&self.binary_path, plan))
            .await
            .map(|_| ())
    }
}
