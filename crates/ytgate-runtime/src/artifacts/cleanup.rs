//! Deferred, cancellable artifact deletion.
//!
//! Delivered artifacts are removed after a grace period. Each scheduled
//! deletion is a tokio task keyed by path with its own cancellation token,
//! so an explicit delete or a later reschedule can pre-empt it.

use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use std::time::Duration;

use tokio_util::sync::CancellationToken;
use tracing::{debug, info, warn};

#[derive(Debug, Default)]
struct Pending {
    next_id: u64,
    entries: HashMap<PathBuf, (u64, CancellationToken)>,
}

/// Scheduler for post-delivery deletion.
///
/// Cloning is cheap; clones share the pending map.
#[derive(Debug, Clone)]
pub struct CleanupScheduler {
    delay: Duration,
    pending: Arc<Mutex<Pending>>,
}

impl CleanupScheduler {
    pub fn new(delay: Duration) -> Self {
        Self {
            delay,
            pending: Arc::new(Mutex::new(Pending::default())),
        }
    }

    fn lock(&self) -> MutexGuard<'_, Pending> {
        self.pending.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Delete `path` after the grace period.
    ///
    /// Must be called from within a tokio runtime. Rescheduling the same
    /// path replaces the earlier timer.
    pub fn schedule(&self, path: impl Into<PathBuf>) {
        let path = path.into();
        let cancel = CancellationToken::new();

        let id = {
            let mut pending = self.lock();
            pending.next_id += 1;
            let id = pending.next_id;
            if let Some((_, previous)) = pending.entries.insert(path.clone(), (id, cancel.clone())) {
                previous.cancel();
            }
            id
        };

        debug!(target: "ytgate.cleanup", path = %path.display(), delay_ms = self.delay.as_millis(), "scheduled");

        let delay = self.delay;
        let pending = Arc::clone(&self.pending);
        tokio::spawn(async move {
            tokio::select! {
                () = cancel.cancelled() => {
                    debug!(target: "ytgate.cleanup", path = %path.display(), "cancelled");
                }
                () = tokio::time::sleep(delay) => {
                    {
                        let mut pending = pending.lock().unwrap_or_else(PoisonError::into_inner);
                        if pending.entries.get(&path).is_some_and(|(current, _)| *current == id) {
                            pending.entries.remove(&path);
                        }
                    }
                    remove_artifact(&path).await;
                }
            }
        });
    }

    /// Cancel a pending deletion. Returns whether one was pending.
    pub fn cancel(&self, path: &Path) -> bool {
        let entry = self.lock().entries.remove(path);
        entry.map(|(_, token)| token.cancel()).is_some()
    }

    pub fn pending_count(&self) -> usize {
        self.lock().entries.len()
    }

    /// Cancel every timer and delete the files now. Used at shutdown.
    pub async fn flush(&self) -> usize {
        let drained: Vec<(PathBuf, CancellationToken)> = self
            .lock()
            .entries
            .drain()
            .map(|(path, (_, token))| (path, token))
            .collect();

        let count = drained.len();
        for (path, token) in drained {
            token.cancel();
            remove_artifact(&path).await;
        }
        if count > 0 {
            info!(target: "ytgate.cleanup", count, "flushed pending cleanups");
        }
        count
    }
}

/// Existence-checked, best-effort removal.
pub async fn remove_artifact(path: &Path) {
    match tokio::fs::try_exists(path).await {
        Ok(true) => match tokio::fs::remove_file(path).await {
            Ok(()) => info!(target: "ytgate.cleanup", path = %path.display(), "deleted artifact"),
            Err(e) => warn!(target: "ytgate.cleanup", path = %path.display(), error = %e, "delete failed"),
        },
        Ok(false) => debug!(target: "ytgate.cleanup", path = %path.display(), "already gone"),
        Err(e) => warn!(target: "ytgate.cleanup", path = %path.display(), error = %e, "cannot stat artifact"),
    }
}
