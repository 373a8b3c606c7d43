#![doc = include_str!("../README.md")]
#![deny(unsafe_code)]

pub mod artifacts;
mod command;
mod runner;

// Re-export the MediaToolPort implementation
pub use runner::YtDlpRunner;

// Re-export the command builder for callers that log or dry-run invocations
pub use command::YtDlpCommandBuilder;

// Re-export artifact adapters
pub use artifacts::{CleanupScheduler, FsArtifactStore, remove_artifact};
