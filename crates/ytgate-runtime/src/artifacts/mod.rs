//! Artifact directory adapters: discovery, listing and deferred cleanup.

mod cleanup;
mod store;

pub use cleanup::{CleanupScheduler, remove_artifact};
pub use store::FsArtifactStore;
