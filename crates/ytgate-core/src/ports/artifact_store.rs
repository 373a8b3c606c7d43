//! Artifact store trait definition.
//!
//! The artifact store is a view over the transient output directory the
//! external tool writes into. It discovers files, it never creates them.

use async_trait::async_trait;
use std::path::PathBuf;

use super::ArtifactError;
use crate::domain::{Artifact, ArtifactEntry, ArtifactToken};

/// Access to the transient artifact directory.
#[async_trait]
pub trait ArtifactStorePort: Send + Sync {
    /// Find the single file whose name contains `token`.
    ///
    /// Returns `ArtifactNotFound` for zero matches and `AmbiguousArtifact`
    /// for more than one.
    async fn locate(&self, token: &ArtifactToken) -> Result<Artifact, ArtifactError>;

    /// List every file currently in the directory, newest first.
    async fn list(&self) -> Result<Vec<ArtifactEntry>, ArtifactError>;

    /// Remove a file by name and return the path that was removed.
    ///
    /// Returns `NotFound` when the name is unsafe or absent.
    async fn delete(&self, name: &str) -> Result<PathBuf, ArtifactError>;

    /// Best-effort removal of every entry carrying `token`.
    ///
    /// Used after a failed run to drop fragments. Returns the number of
    /// entries removed.
    async fn discard(&self, token: &ArtifactToken) -> usize;
}
