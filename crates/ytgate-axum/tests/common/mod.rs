//! Shared fixtures for ytgate-axum integration tests.

pub mod fake_tool;

use std::path::Path;
use std::sync::Arc;
use std::time::Duration;

use axum::Router;
use axum::body::Body;
use axum::http::{Method, Request};
use tempfile::TempDir;
use ytgate_axum::{AxumContext, CorsConfig, create_router};

use fake_tool::{FakeBehavior, FakeTool};

/// Cleanup delay short enough for tests to observe deletion.
pub const TEST_CLEANUP_DELAY: Duration = Duration::from_millis(50);

/// A router over a temporary download directory and a scripted tool.
pub struct TestApp {
    pub dir: TempDir,
    pub tool: Arc<FakeTool>,
    pub ctx_cleanup: ytgate_runtime::CleanupScheduler,
    pub router: Router,
}

impl TestApp {
    pub fn new(behavior: FakeBehavior) -> Self {
        let dir = TempDir::new().unwrap();
        let tool = Arc::new(FakeTool::new(behavior));
        let ctx = AxumContext::with_tool(tool.clone(), dir.path(), TEST_CLEANUP_DELAY);
        let ctx_cleanup = ctx.cleanup.clone();
        let router = create_router(ctx, &CorsConfig::AllowAll);
        Self {
            dir,
            tool,
            ctx_cleanup,
            router,
        }
    }

    /// Place a file directly in the download directory.
    pub fn seed(&self, name: &str, bytes: &[u8]) {
        std::fs::write(self.dir.path().join(name), bytes).unwrap();
    }

    pub fn exists(&self, name: &str) -> bool {
        self.dir.path().join(name).exists()
    }

    /// Visible files currently in the download directory.
    pub fn files(&self) -> Vec<String> {
        visible_files(self.dir.path())
    }
}

/// Sorted names of the non-hidden entries in `dir`.
pub fn visible_files(dir: &Path) -> Vec<String> {
    let mut names: Vec<String> = std::fs::read_dir(dir)
        .unwrap()
        .filter_map(Result::ok)
        .map(|e| e.file_name().to_string_lossy().into_owned())
        .filter(|n| !n.starts_with('.'))
        .collect();
    names.sort();
    names
}

pub fn get(uri: &str) -> Request<Body> {
    Request::builder().uri(uri).body(Body::empty()).unwrap()
}

pub fn delete(uri: &str) -> Request<Body> {
    Request::builder()
        .method(Method::DELETE)
        .uri(uri)
        .body(Body::empty())
        .unwrap()
}
