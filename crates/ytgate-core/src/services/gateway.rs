//! Gateway service - orchestrates info lookups and the download lifecycle.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use tracing::{debug, info, warn};

use crate::domain::{
    Artifact, ArtifactEntry, ArtifactToken, DownloadPlan, DownloadRequest, MediaUrl, VideoInfo,
};
use crate::ports::{ArtifactStorePort, CoreError, MediaToolPort};

/// Service tying the extractor and the artifact directory together.
///
/// A download runs as: plan (fresh token) → tool run → locate by token.
/// Delivery and deferred cleanup belong to the adapter that streams the file.
pub struct GatewayService {
    tool: Arc<dyn MediaToolPort>,
    artifacts: Arc<dyn ArtifactStorePort>,
    download_dir: PathBuf,
}

impl GatewayService {
    /// Create a new gateway service writing into `download_dir`.
    pub fn new(
        tool: Arc<dyn MediaToolPort>,
        artifacts: Arc<dyn ArtifactStorePort>,
        download_dir: impl Into<PathBuf>,
    ) -> Self {
        Self {
            tool,
            artifacts,
            download_dir: download_dir.into(),
        }
    }

    pub fn download_dir(&self) -> &Path {
        &self.download_dir
    }

    /// Fetch normalized metadata without downloading.
    pub async fn info(&self, url: &MediaUrl) -> Result<VideoInfo, CoreError> {
        debug!(target: "ytgate.tool", url = %url, host = ?url.host(), "fetching info");
        self.tool.fetch_info(url).await.map_err(CoreError::from)
    }

    /// Bind a request to a fresh token and the download directory.
    pub fn plan(&self, request: DownloadRequest) -> DownloadPlan {
        DownloadPlan::new(request, ArtifactToken::generate(), &self.download_dir)
    }

    /// Run the tool for `request` and return the single artifact it produced.
    pub async fn download(&self, request: DownloadRequest) -> Result<Artifact, CoreError> {
        let plan = self.plan(request);
        self.execute(&plan).await
    }

    /// Execute an existing plan.
    ///
    /// Every failure discards the files carrying the plan token. If the
    /// returned future is dropped before it completes (client disconnect),
    /// the same discard runs on a spawned task.
    pub async fn execute(&self, plan: &DownloadPlan) -> Result<Artifact, CoreError> {
        info!(
            target: "ytgate.download",
            token = %plan.token,
            host = ?plan.request.url.host(),
            kind = %plan.request.kind,
            format = %plan.request.format,
            quality = %plan.request.quality,
            "starting download"
        );

        let guard = LeftoverGuard::new(Arc::clone(&self.artifacts), plan.token.clone());

        if let Err(err) = self.tool.download(plan).await {
            warn!(target: "ytgate.download", token = %plan.token, error = %err, "tool failed");
            self.discard(&plan.token).await;
            guard.disarm();
            return Err(err.into());
        }

        let located = self.artifacts.locate(&plan.token).await;
        match located {
            Ok(artifact) => {
                guard.disarm();
                info!(
                    target: "ytgate.download",
                    token = %plan.token,
                    file = %artifact.filename,
                    bytes = artifact.size_bytes,
                    "download complete"
                );
                Ok(artifact)
            }
            Err(err) => {
                warn!(target: "ytgate.download", token = %plan.token, error = %err, "no usable output");
                self.discard(&plan.token).await;
                guard.disarm();
                Err(err.into())
            }
        }
    }

    /// List artifacts currently on disk, newest first.
    pub async fn list(&self) -> Result<Vec<ArtifactEntry>, CoreError> {
        self.artifacts.list().await.map_err(CoreError::from)
    }

    /// Delete an artifact by name. Returns the removed path.
    pub async fn delete(&self, name: &str) -> Result<PathBuf, CoreError> {
        let path = self.artifacts.delete(name).await?;
        info!(target: "ytgate.cleanup", file = %name, "deleted on request");
        Ok(path)
    }

    async fn discard(&self, token: &ArtifactToken) {
        discard_leftovers(self.artifacts.as_ref(), token).await;
    }
}

async fn discard_leftovers(artifacts: &dyn ArtifactStorePort, token: &ArtifactToken) {
    let removed = artifacts.discard(token).await;
    if removed > 0 {
        debug!(target: "ytgate.cleanup", token = %token, removed, "discarded leftovers");
    }
}

/// RAII guard that discards a token's files unless the run finished.
struct LeftoverGuard {
    artifacts: Arc<dyn ArtifactStorePort>,
    token: Option<ArtifactToken>,
}

impl LeftoverGuard {
    fn new(artifacts: Arc<dyn ArtifactStorePort>, token: ArtifactToken) -> Self {
        Self {
            artifacts,
            token: Some(token),
        }
    }

    fn disarm(mut self) {
        self.token = None;
    }
}

impl Drop for LeftoverGuard {
    fn drop(&mut self) {
        let Some(token) = self.token.take() else {
            return;
        };
        warn!(target: "ytgate.download", token = %token, "download abandoned");

        let Ok(handle) = tokio::runtime::Handle::try_current() else {
            warn!(target: "ytgate.cleanup", token = %token, "no runtime left to discard leftovers");
            return;
        };
        let artifacts = Arc::clone(&self.artifacts);
        handle.spawn(async move {
            discard_leftovers(artifacts.as_ref(), &token).await;
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ports::{ArtifactError, ToolError};
    use async_trait::async_trait;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::time::Duration;
    use mockall::mock;
    use mockall::predicate::always;

    mock! {
        Tool {}

        #[async_trait]
        impl MediaToolPort for Tool {
            async fn fetch_info(&self, url: &MediaUrl) -> Result<VideoInfo, ToolError>;
            async fn download(&self, plan: &DownloadPlan) -> Result<(), ToolError>;
        }
    }

    mock! {
        Store {}

        #[async_trait]
        impl ArtifactStorePort for Store {
            async fn locate(&self, token: &ArtifactToken) -> Result<Artifact, ArtifactError>;
            async fn list(&self) -> Result<Vec<ArtifactEntry>, ArtifactError>;
            async fn delete(&self, name: &str) -> Result<PathBuf, ArtifactError>;
            async fn discard(&self, token: &ArtifactToken) -> usize;
        }
    }

    fn request() -> DownloadRequest {
        let url = MediaUrl::parse("https://valid.example/watch?v=1").unwrap();
        DownloadRequest::audio(url, "mp3", Some("192")).unwrap()
    }

    fn artifact_for(token: &ArtifactToken) -> Artifact {
        let filename = format!("Song_{token}.mp3");
        Artifact {
            token: token.clone(),
            path: PathBuf::from("/tmp/downloads").join(&filename),
            filename,
            size_bytes: 3,
            created_at: None,
        }
    }

    fn service(tool: MockTool, store: MockStore) -> GatewayService {
        GatewayService::new(Arc::new(tool), Arc::new(store), "/tmp/downloads")
    }

    #[tokio::test]
    async fn successful_download_locates_artifact_by_plan_token() {
        let mut tool = MockTool::new();
        tool.expect_download()
            .withf(|plan| plan.output_dir == Path::new("/tmp/downloads"))
            .times(1)
            .returning(|_| Ok(()));

        let mut store = MockStore::new();
        store
            .expect_locate()
            .times(1)
            .returning(|token| Ok(artifact_for(token)));
        store.expect_discard().never();

        let artifact = service(tool, store).download(request()).await.unwrap();
        assert!(artifact.filename.starts_with("Song_"));
        assert!(artifact.token.matches(&artifact.filename));
    }

    #[tokio::test]
    async fn tool_failure_discards_leftovers_and_keeps_message() {
        let mut tool = MockTool::new();
        tool.expect_download()
            .returning(|_| Err(ToolError::from_exit(Some(1), "ERROR: Unsupported URL")));

        let mut store = MockStore::new();
        store.expect_locate().never();
        store.expect_discard().with(always()).times(1).returning(|_| 1);

        let err = service(tool, store).download(request()).await.unwrap_err();
        assert!(matches!(err, CoreError::Tool(ToolError::Failed { .. })));
        assert_eq!(err.to_string(), "ERROR: Unsupported URL");
    }

    #[tokio::test]
    async fn missing_output_discards_fragments() {
        let mut tool = MockTool::new();
        tool.expect_download().returning(|_| Ok(()));

        let mut store = MockStore::new();
        store.expect_locate().returning(|token| {
            Err(ArtifactError::ArtifactNotFound {
                token: token.to_string(),
            })
        });
        store.expect_discard().times(1).returning(|_| 1);

        let err = service(tool, store).download(request()).await.unwrap_err();
        assert_eq!(err.to_string(), "Downloaded file not found");
    }

    /// Tool that never finishes, like a long yt-dlp run.
    struct StalledTool;

    #[async_trait]
    impl MediaToolPort for StalledTool {
        async fn fetch_info(&self, _url: &MediaUrl) -> Result<VideoInfo, ToolError> {
            std::future::pending().await
        }

        async fn download(&self, _plan: &DownloadPlan) -> Result<(), ToolError> {
            std::future::pending().await
        }
    }

    #[tokio::test]
    async fn abandoned_download_discards_leftovers() {
        let discarded = Arc::new(AtomicUsize::new(0));
        let seen = Arc::clone(&discarded);

        let mut store = MockStore::new();
        store.expect_locate().never();
        store.expect_discard().returning(move |_| {
            seen.fetch_add(1, Ordering::SeqCst);
            1
        });

        let svc = GatewayService::new(Arc::new(StalledTool), Arc::new(store), "/tmp/downloads");
        let plan = svc.plan(request());
        let outcome = tokio::time::timeout(Duration::from_millis(20), svc.execute(&plan)).await;
        assert!(outcome.is_err());

        tokio::time::sleep(Duration::from_millis(50)).await;
        assert_eq!(discarded.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn completed_download_is_not_discarded_later() {
        let mut tool = MockTool::new();
        tool.expect_download().returning(|_| Ok(()));

        let mut store = MockStore::new();
        store
            .expect_locate()
            .returning(|token| Ok(artifact_for(token)));
        store.expect_discard().never();

        let svc = service(tool, store);
        svc.download(request()).await.unwrap();
        tokio::time::sleep(Duration::from_millis(20)).await;
    }

    #[tokio::test]
    async fn ambiguous_output_is_discarded() {
        let mut tool = MockTool::new();
        tool.expect_download().returning(|_| Ok(()));

        let mut store = MockStore::new();
        store.expect_locate().returning(|token| {
            Err(ArtifactError::AmbiguousArtifact {
                token: token.to_string(),
                matches: vec!["a".into(), "b".into()],
            })
        });
        store.expect_discard().times(1).returning(|_| 2);

        let err = service(tool, store).download(request()).await.unwrap_err();
        assert!(matches!(
            err,
            CoreError::Artifact(ArtifactError::AmbiguousArtifact { .. })
        ));
    }

    #[tokio::test]
    async fn plans_get_distinct_tokens() {
        let svc = service(MockTool::new(), MockStore::new());
        let a = svc.plan(request());
        let b = svc.plan(request());
        assert_ne!(a.token, b.token);
    }

    #[tokio::test]
    async fn delete_passes_through_not_found() {
        let mut store = MockStore::new();
        store
            .expect_delete()
            .returning(|name| Err(ArtifactError::NotFound(name.to_string())));

        let err = service(MockTool::new(), store)
            .delete("nope.mp3")
            .await
            .unwrap_err();
        assert_eq!(err.to_string(), "File not found");
    }
}
