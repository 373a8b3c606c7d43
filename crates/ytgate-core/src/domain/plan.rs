//! Download plans.

use std::path::{Path, PathBuf};

use super::artifact::ArtifactToken;
use super::media::DownloadRequest;

/// A download request bound to a token and an output location.
///
/// The output template leaves the title and extension to the external tool
/// (`%(title)s`, `%(ext)s`); only the directory and the token are fixed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DownloadPlan {
    pub request: DownloadRequest,
    pub token: ArtifactToken,
    pub output_dir: PathBuf,
}

impl DownloadPlan {
    pub fn new(request: DownloadRequest, token: ArtifactToken, output_dir: impl AsRef<Path>) -> Self {
        Self {
            request,
            token,
            output_dir: output_dir.as_ref().to_path_buf(),
        }
    }

    /// Output path template handed to the tool's `-o` flag.
    pub fn output_template(&self) -> PathBuf {
        self.output_dir
            .join(format!("%(title)s_{}.%(ext)s", self.token))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::MediaUrl;

    #[test]
    fn template_embeds_token_and_tool_placeholders() {
        let url = MediaUrl::parse("https://valid.example/x").unwrap();
        let request = DownloadRequest::video(url, "mp4", None).unwrap();
        let token = ArtifactToken::from_parts(1, "0000abcd");
        let plan = DownloadPlan::new(request, token, "/tmp/downloads");

        assert_eq!(
            plan.output_template(),
            PathBuf::from("/tmp/downloads/%(title)s_1-0000abcd.%(ext)s")
        );
    }
}
