//! Filesystem-backed artifact store.

use std::path::PathBuf;
use std::time::SystemTime;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use tokio::fs;
use tracing::{debug, warn};
use ytgate_core::{
    Artifact, ArtifactEntry, ArtifactError, ArtifactStorePort, ArtifactToken, validate_file_name,
};

/// Suffixes yt-dlp uses for unfinished or intermediate files.
const FRAGMENT_SUFFIXES: &[&str] = &[".part", ".ytdl", ".temp"];

/// Artifact store over a single flat directory.
#[derive(Debug, Clone)]
pub struct FsArtifactStore {
    root: PathBuf,
}

impl FsArtifactStore {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// Regular, visible files in the root with their metadata.
    async fn files(&self) -> Result<Vec<(String, std::fs::Metadata)>, ArtifactError> {
        let mut dir = fs::read_dir(&self.root).await?;
        let mut files = Vec::new();

        while let Some(entry) = dir.next_entry().await? {
            let Ok(name) = entry.file_name().into_string() else {
                continue;
            };
            if name.starts_with('.') {
                continue;
            }
            // Entries can vanish between read_dir and stat when cleanup runs.
            let Ok(meta) = entry.metadata().await else {
                continue;
            };
            if meta.is_file() {
                files.push((name, meta));
            }
        }

        Ok(files)
    }
}

fn is_fragment(name: &str) -> bool {
    FRAGMENT_SUFFIXES.iter().any(|suffix| name.ends_with(suffix))
}

/// Creation time, falling back to modification time where birth time is
/// unsupported.
fn created_at(meta: &std::fs::Metadata) -> Option<DateTime<Utc>> {
    meta.created()
        .or_else(|_| meta.modified())
        .ok()
        .map(DateTime::<Utc>::from)
}

#[async_trait]
impl ArtifactStorePort for FsArtifactStore {
    async fn locate(&self, token: &ArtifactToken) -> Result<Artifact, ArtifactError> {
        let mut matches: Vec<_> = self
            .files()
            .await?
            .into_iter()
            .filter(|(name, _)| token.matches(name) && !is_fragment(name))
            .collect();

        match matches.len() {
            0 => Err(ArtifactError::ArtifactNotFound {
                token: token.to_string(),
            }),
            1 => {
                let (filename, meta) = matches.remove(0);
                debug!(target: "ytgate.download", token = %token, file = %filename, "located artifact");
                Ok(Artifact {
                    token: token.clone(),
                    path: self.root.join(&filename),
                    size_bytes: meta.len(),
                    created_at: created_at(&meta),
                    filename,
                })
            }
            _ => {
                let mut names: Vec<String> = matches.into_iter().map(|(name, _)| name).collect();
                names.sort();
                Err(ArtifactError::AmbiguousArtifact {
                    token: token.to_string(),
                    matches: names,
                })
            }
        }
    }

    async fn list(&self) -> Result<Vec<ArtifactEntry>, ArtifactError> {
        let mut files: Vec<_> = self
            .files()
            .await?
            .into_iter()
            .map(|(name, meta)| {
                let sort_key = meta
                    .created()
                    .or_else(|_| meta.modified())
                    .unwrap_or(SystemTime::UNIX_EPOCH);
                (sort_key, ArtifactEntry::new(name, meta.len(), created_at(&meta)))
            })
            .collect();

        files.sort_by(|a, b| b.0.cmp(&a.0).then_with(|| a.1.filename.cmp(&b.1.filename)));
        Ok(files.into_iter().map(|(_, entry)| entry).collect())
    }

    async fn delete(&self, name: &str) -> Result<PathBuf, ArtifactError> {
        if !validate_file_name(name) {
            warn!(target: "ytgate.cleanup", file = %name, "rejected unsafe file name");
            return Err(ArtifactError::NotFound(name.to_string()));
        }

        let path = self.root.join(name);
        match fs::symlink_metadata(&path).await {
            Ok(meta) if meta.is_file() => {}
            Ok(_) => return Err(ArtifactError::NotFound(name.to_string())),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                return Err(ArtifactError::NotFound(name.to_string()));
            }
            Err(e) => return Err(e.into()),
        }

        match fs::remove_file(&path).await {
            Ok(()) => Ok(path),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                Err(ArtifactError::NotFound(name.to_string()))
            }
            Err(e) => Err(e.into()),
        }
    }

    async fn discard(&self, token: &ArtifactToken) -> usize {
        let mut dir = match fs::read_dir(&self.root).await {
            Ok(dir) => dir,
            Err(e) => {
                warn!(target: "ytgate.cleanup", token = %token, error = %e, "cannot scan for leftovers");
                return 0;
            }
        };

        let mut removed = 0;
        while let Ok(Some(entry)) = dir.next_entry().await {
            let name = entry.file_name();
            if !token.matches(&name.to_string_lossy()) {
                continue;
            }
            let path = entry.path();
            let result = match entry.file_type().await {
                Ok(kind) if kind.is_dir() => fs::remove_dir_all(&path).await,
                _ => fs::remove_file(&path).await,
            };
            match result {
                Ok(()) => removed += 1,
                Err(e) => {
                    warn!(target: "ytgate.cleanup", path = %path.display(), error = %e, "failed to discard leftover");
                }
            }
        }
        removed
    }
}
