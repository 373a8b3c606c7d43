//! Download directory preparation.
//!
//! The scratch directory must exist and be writable before the first tool
//! invocation; otherwise every download fails with an opaque tool error.

use std::fs::{self, OpenOptions};
use std::io::Write;
use std::path::{Path, PathBuf};

use thiserror::Error;

/// Probe file written by [`verify_writable`]. Hidden, so listings skip it.
const WRITE_PROBE: &str = ".ytgate_write_test";

/// Errors raised while preparing the download directory.
#[derive(Debug, Error)]
pub enum PathError {
    #[error("Path cannot be empty")]
    EmptyPath,

    #[error("{0} exists but is not a directory")]
    NotADirectory(PathBuf),

    #[error("Failed to create directory {path}: {reason}")]
    CreateFailed { path: PathBuf, reason: String },

    #[error("Directory {path} is not writable: {reason}")]
    NotWritable { path: PathBuf, reason: String },
}

/// Ensure `path` is an existing, writable directory, creating it (parents
/// included) when missing.
pub fn ensure_directory(path: &Path) -> Result<(), PathError> {
    if path.as_os_str().is_empty() {
        return Err(PathError::EmptyPath);
    }

    if path.exists() {
        if !path.is_dir() {
            return Err(PathError::NotADirectory(path.to_path_buf()));
        }
    } else {
        fs::create_dir_all(path).map_err(|e| PathError::CreateFailed {
            path: path.to_path_buf(),
            reason: e.to_string(),
        })?;
        tracing::debug!(target: "ytgate.cleanup", path = %path.display(), "created download directory");
    }

    verify_writable(path)
}

/// Verify a directory is writable by creating and removing a probe file.
pub fn verify_writable(path: &Path) -> Result<(), PathError> {
    let probe = path.join(WRITE_PROBE);
    let not_writable = |e: std::io::Error| PathError::NotWritable {
        path: path.to_path_buf(),
        reason: e.to_string(),
    };

    let mut file = OpenOptions::new()
        .create(true)
        .write(true)
        .truncate(true)
        .open(&probe)
        .map_err(not_writable)?;
    file.write_all(b"ok").map_err(not_writable)?;
    drop(file);
    if let Err(e) = fs::remove_file(&probe) {
        tracing::debug!(target: "ytgate.cleanup", path = %probe.display(), error = %e, "failed to remove write probe");
    }
    Ok(())
}
