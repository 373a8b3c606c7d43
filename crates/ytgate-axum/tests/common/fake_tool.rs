//! Scripted `MediaToolPort` standing in for yt-dlp.

use std::sync::Mutex;

use async_trait::async_trait;
use ytgate_core::{DownloadPlan, MediaToolPort, MediaUrl, ToolError, VideoInfo};

/// What the fake does when asked to download.
#[derive(Debug, Clone)]
pub enum FakeBehavior {
    /// Write one file named from the output template.
    Write {
        title: &'static str,
        ext: &'static str,
        bytes: &'static [u8],
    },
    /// Leave a fragment behind, then exit non-zero with this stderr.
    Fail(&'static str),
    /// Exit zero leaving only an unfinished fragment.
    NoOutput,
    /// Write a fragment, then never finish.
    Stall,
}

pub struct FakeTool {
    behavior: FakeBehavior,
    plans: Mutex<Vec<DownloadPlan>>,
}

impl FakeTool {
    pub fn new(behavior: FakeBehavior) -> Self {
        Self {
            behavior,
            plans: Mutex::new(Vec::new()),
        }
    }

    /// Plans received so far.
    pub fn plans(&self) -> Vec<DownloadPlan> {
        self.plans.lock().unwrap().clone()
    }
}

fn render(plan: &DownloadPlan, title: &str, ext: &str) -> std::path::PathBuf {
    let template = plan.output_template().to_string_lossy().into_owned();
    template
        .replace("%(title)s", title)
        .replace("%(ext)s", ext)
        .into()
}

#[async_trait]
impl MediaToolPort for FakeTool {
    async fn fetch_info(&self, url: &MediaUrl) -> Result<VideoInfo, ToolError> {
        if let FakeBehavior::Fail(stderr) = self.behavior {
            return Err(ToolError::from_exit(Some(1), stderr));
        }
        let dump = serde_json::json!({
            "title": format!("Info for {}", url.host().unwrap_or_default()),
            "duration_string": "3:32",
            "uploader": "uploader",
            "view_count": 42,
            "thumbnail": "https://img.valid.example/t.jpg",
            "description": "d".repeat(250),
            "formats": (0..12).map(|i| serde_json::json!({
                "format_id": i.to_string(),
                "ext": "mp4",
                "format_note": "720p",
                "filesize": 1_048_576,
            })).collect::<Vec<_>>(),
        });
        VideoInfo::from_dump_json(dump.to_string().as_bytes())
    }

    async fn download(&self, plan: &DownloadPlan) -> Result<(), ToolError> {
        self.plans.lock().unwrap().push(plan.clone());
        match &self.behavior {
            FakeBehavior::Write { title, ext, bytes } => {
                std::fs::write(render(plan, title, ext), bytes).unwrap();
                Ok(())
            }
            FakeBehavior::Fail(stderr) => {
                std::fs::write(render(plan, "Partial", "webm.part"), b"").unwrap();
                Err(ToolError::from_exit(Some(1), stderr))
            }
            FakeBehavior::NoOutput => {
                std::fs::write(render(plan, "Partial", "mp4.part"), b"").unwrap();
                Ok(())
            }
            FakeBehavior::Stall => {
                std::fs::write(render(plan, "Slow", "webm.part"), b"").unwrap();
                std::future::pending().await
            }
        }
    }
}
