//! CLI bootstrap - the composition root.
//!
//! This module is the ONLY place where infrastructure is wired together
//! for the CLI adapter:
//! - yt-dlp process runner (via ytgate-runtime)
//! - filesystem artifact store (via ytgate-runtime)
//! - gateway service (via ytgate-core)
//!
//! Command handlers receive the composed `CliContext` and delegate to it.

use std::sync::Arc;

use anyhow::Result;
use ytgate_core::{
    ArtifactStorePort, GatewayConfig, GatewayService, MediaToolPort, ensure_directory,
};
use ytgate_runtime::{FsArtifactStore, YtDlpRunner};

use crate::error::CliError;
use crate::parser::Cli;

/// Bootstrap configuration for the CLI.
#[derive(Debug, Clone)]
pub struct CliConfig {
    pub gateway: GatewayConfig,
}

impl CliConfig {
    /// Environment configuration with global flag overrides applied.
    pub fn from_env(cli: &Cli) -> Result<Self> {
        let gateway = GatewayConfig::from_env().map_err(|e| CliError::Config(e.to_string()))?;
        Ok(Self::from_gateway(gateway, cli))
    }

    /// Apply global flag overrides to an existing configuration.
    pub fn from_gateway(mut gateway: GatewayConfig, cli: &Cli) -> Self {
        if let Some(dir) = &cli.download_dir {
            gateway = gateway.with_download_dir(dir);
        }
        if let Some(tool) = &cli.yt_dlp {
            gateway = gateway.with_tool_path(tool);
        }
        Self { gateway }
    }
}

/// Fully composed context for CLI commands.
pub struct CliContext {
    pub gateway: Arc<GatewayService>,
    pub config: GatewayConfig,
}

impl CliContext {
    /// Compose a context around an arbitrary media tool.
    pub fn with_tool(tool: Arc<dyn MediaToolPort>, config: GatewayConfig) -> Self {
        let artifacts: Arc<dyn ArtifactStorePort> =
            Arc::new(FsArtifactStore::new(config.download_dir.clone()));
        let gateway = Arc::new(GatewayService::new(
            tool,
            artifacts,
            config.download_dir.clone(),
        ));
        Self { gateway, config }
    }

    pub fn gateway(&self) -> &GatewayService {
        &self.gateway
    }
}

/// Bootstrap the CLI application.
///
/// Creates the download directory if needed and wires the yt-dlp runner.
pub fn bootstrap(config: CliConfig) -> Result<CliContext> {
    let gateway = config.gateway;
    ensure_directory(&gateway.download_dir).map_err(|e| CliError::Io(e.to_string()))?;

    tracing::debug!(
        target: "ytgate.tool",
        download_dir = %gateway.download_dir.display(),
        tool = %gateway.tool_path.display(),
        "CLI bootstrap resolved paths"
    );

    let runner: Arc<dyn MediaToolPort> = Arc::new(
        YtDlpRunner::new(gateway.tool_path.clone()).with_timeout(gateway.tool_timeout),
    );
    Ok(CliContext::with_tool(runner, gateway))
}
