//! Axum server bootstrap - the composition root.
//!
//! This module is the ONLY place where infrastructure is wired together
//! for the Axum web adapter. All concrete implementations are instantiated here.

use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use anyhow::{Context, Result};
use tracing::info;
use ytgate_core::{
    ArtifactStorePort, CorsOrigins, GatewayConfig, GatewayService, MediaToolPort,
    ensure_directory, join_host_port,
};
use ytgate_runtime::{CleanupScheduler, FsArtifactStore, YtDlpRunner};

/// CORS configuration for the web server.
#[derive(Debug, Clone, Default)]
pub enum CorsConfig {
    /// Allow all origins.
    #[default]
    AllowAll,
    /// Allow specific origins.
    AllowOrigins(Vec<String>),
}

impl From<&CorsOrigins> for CorsConfig {
    fn from(origins: &CorsOrigins) -> Self {
        match origins {
            CorsOrigins::Any => Self::AllowAll,
            CorsOrigins::List(list) => Self::AllowOrigins(list.clone()),
        }
    }
}

/// Server configuration for the Axum adapter.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    /// Scratch directory for tool output; created at bootstrap.
    pub download_dir: PathBuf,
    /// Path to the yt-dlp binary.
    pub tool_path: PathBuf,
    pub cleanup_delay: Duration,
    pub tool_timeout: Option<Duration>,
    pub cors: CorsConfig,
}

impl From<&GatewayConfig> for ServerConfig {
    fn from(config: &GatewayConfig) -> Self {
        Self {
            host: config.host.clone(),
            port: config.port,
            download_dir: config.download_dir.clone(),
            tool_path: config.tool_path.clone(),
            cleanup_delay: config.cleanup_delay,
            tool_timeout: config.tool_timeout,
            cors: CorsConfig::from(&config.cors),
        }
    }
}

impl ServerConfig {
    /// Config from the process environment.
    pub fn from_env() -> Result<Self> {
        let gateway = GatewayConfig::from_env()?;
        Ok(Self::from(&gateway))
    }

    /// Listen address as `host:port`.
    pub fn bind_addr(&self) -> String {
        join_host_port(&self.host, self.port)
    }
}

/// Application context for the Axum adapter.
///
/// Holds the gateway service plus the adapter-side cleanup scheduler.
pub struct AxumContext {
    /// Download lifecycle orchestration.
    pub gateway: Arc<GatewayService>,
    /// Deferred deletion of delivered artifacts.
    pub cleanup: CleanupScheduler,
    /// Directory served under `/downloads`.
    pub download_dir: PathBuf,
}

impl AxumContext {
    /// Assemble a context around an arbitrary media tool.
    ///
    /// The artifact store is always the filesystem store over `download_dir`.
    pub fn with_tool(
        tool: Arc<dyn MediaToolPort>,
        download_dir: impl Into<PathBuf>,
        cleanup_delay: Duration,
    ) -> Self {
        let download_dir = download_dir.into();
        let artifacts: Arc<dyn ArtifactStorePort> =
            Arc::new(FsArtifactStore::new(download_dir.clone()));
        Self {
            gateway: Arc::new(GatewayService::new(tool, artifacts, download_dir.clone())),
            cleanup: CleanupScheduler::new(cleanup_delay),
            download_dir,
        }
    }
}

/// Bootstrap the Axum server with all services.
pub fn bootstrap(config: &ServerConfig) -> Result<AxumContext> {
    ensure_directory(&config.download_dir)
        .with_context(|| format!("preparing {}", config.download_dir.display()))?;

    info!(
        target: "ytgate.http",
        download_dir = %config.download_dir.display(),
        tool = %config.tool_path.display(),
        cleanup_delay_secs = config.cleanup_delay.as_secs(),
        tool_timeout_secs = ?config.tool_timeout.map(|t| t.as_secs()),
        "Axum bootstrap resolved paths"
    );

    let runner: Arc<dyn MediaToolPort> =
        Arc::new(YtDlpRunner::new(config.tool_path.clone()).with_timeout(config.tool_timeout));

    Ok(AxumContext::with_tool(
        runner,
        config.download_dir.clone(),
        config.cleanup_delay,
    ))
}

/// Start the web server and serve until Ctrl-C / SIGTERM.
///
/// Pending artifact deletions are flushed after the listener stops.
pub async fn start_server(config: ServerConfig) -> Result<()> {
    use tokio::net::TcpListener;

    let ctx = bootstrap(&config)?;
    let cleanup = ctx.cleanup.clone();
    let app = crate::routes::create_router(ctx, &config.cors);

    let addr = config.bind_addr();
    let listener = TcpListener::bind(&addr)
        .await
        .with_context(|| format!("binding {addr}"))?;

    info!(target: "ytgate.http", "ytgate listening on http://{}", addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    cleanup.flush().await;
    info!(target: "ytgate.http", "server stopped");
    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::warn!(target: "ytgate.http", error = %e, "failed to listen for Ctrl-C");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => {
                tracing::warn!(target: "ytgate.http", error = %e, "failed to listen for SIGTERM");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => {}
        () = terminate => {}
    }
    info!(target: "ytgate.http", "shutdown signal received");
}
