//! yt-dlp command invocation builder.
//!
//! Every value is pushed as its own argument; nothing is ever joined into a
//! shell string.

use std::ffi::{OsStr, OsString};
use std::path::PathBuf;
use std::process::Stdio;

use tokio::process::Command;
use ytgate_core::{DEFAULT_AUDIO_FORMAT, DownloadPlan, MediaKind, MediaUrl};

/// Builder for yt-dlp invocations.
///
/// # Example
///
/// ```rust,ignore
/// let cmd = YtDlpCommandBuilder::new("yt-dlp")
///     .flag("--dump-json")
///     .flag("--no-download")
///     .url(&url)
///     .build();
/// ```
#[derive(Debug, Clone)]
pub struct YtDlpCommandBuilder {
    binary_path: PathBuf,
    args: Vec<OsString>,
    url: Option<String>,
}

impl YtDlpCommandBuilder {
    pub fn new(binary_path: impl Into<PathBuf>) -> Self {
        Self {
            binary_path: binary_path.into(),
            args: Vec::new(),
            url: None,
        }
    }

    /// Metadata query: `--dump-json --no-download <url>`.
    pub fn info(binary_path: impl Into<PathBuf>, url: &MediaUrl) -> Self {
        Self::new(binary_path)
            .flag("--dump-json")
            .flag("--no-download")
            .url(url)
    }

    /// Download invocation for a plan.
    ///
    /// Audio: `-x --audio-format F` plus `--audio-quality Q` for mp3.
    /// Video: `-f best[ext=F]` for `best`, else `-f best[height<=Q]`.
    /// Always `-o <template>` and the URL last.
    pub fn download(binary_path: impl Into<PathBuf>, plan: &DownloadPlan) -> Self {
        let request = &plan.request;
        let builder = Self::new(binary_path);

        let builder = match request.kind {
            MediaKind::Audio => {
                let builder = builder
                    .flag("-x")
                    .arg_with_value("--audio-format", &request.format);
                if request.format == DEFAULT_AUDIO_FORMAT {
                    builder.arg_with_value("--audio-quality", &request.quality)
                } else {
                    builder
                }
            }
            MediaKind::Video if request.wants_best() => {
                builder.arg_with_value("-f", format!("best[ext={}]", request.format))
            }
            MediaKind::Video => {
                builder.arg_with_value("-f", format!("best[height<={}]", request.quality))
            }
        };

        builder
            .arg_with_value("-o", plan.output_template())
            .url(&request.url)
    }

    /// Add a flag with no value.
    #[must_use]
    pub fn flag(mut self, key: impl AsRef<OsStr>) -> Self {
        self.args.push(key.as_ref().to_os_string());
        self
    }

    /// Add a flag followed by its value as a separate argument.
    #[must_use]
    pub fn arg_with_value(mut self, key: impl AsRef<OsStr>, value: impl AsRef<OsStr>) -> Self {
        self.args.push(key.as_ref().to_os_string());
        self.args.push(value.as_ref().to_os_string());
        self
    }

    /// Set the target URL. It is always emitted as the final argument.
    #[must_use]
    pub fn url(mut self, url: &MediaUrl) -> Self {
        self.url = Some(url.as_str().to_string());
        self
    }

    /// The full argument vector, URL last.
    pub fn args(&self) -> Vec<OsString> {
        let mut args = self.args.clone();
        if let Some(url) = &self.url {
            args.push(OsString::from(url));
        }
        args
    }

    /// Build the command with piped stdout/stderr and no stdin.
    ///
    /// The child is killed if the owning future is dropped.
    pub fn build(self) -> Command {
        let mut cmd = Command::new(&self.binary_path);
        cmd.args(self.args())
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .kill_on_drop(true);
        cmd
    }
}
