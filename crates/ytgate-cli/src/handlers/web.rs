//! Web command handler.

use anyhow::Result;
use ytgate_axum::{ServerConfig, start_server};
use ytgate_core::GatewayConfig;

/// Apply the web command's overrides to the gateway configuration.
pub fn server_config(gateway: &GatewayConfig, port: Option<u16>, host: Option<String>) -> ServerConfig {
    let mut config = ServerConfig::from(gateway);
    if let Some(port) = port {
        config.port = port;
    }
    if let Some(host) = host {
        config.host = host;
    }
    config
}

/// Run the HTTP gateway until interrupted.
pub async fn execute(gateway: &GatewayConfig, port: Option<u16>, host: Option<String>) -> Result<()> {
    start_server(server_config(gateway, port, host)).await
}
