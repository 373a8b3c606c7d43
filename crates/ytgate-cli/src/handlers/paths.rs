//! Paths command handler.
//!
//! Displays the resolved configuration for diagnostics.

use anyhow::Result;
use ytgate_core::{GatewayConfig, verify_writable};

/// Render the configuration in `key = value` form.
pub fn render(config: &GatewayConfig) -> String {
    let writable = if config.download_dir.is_dir() {
        verify_writable(&config.download_dir)
            .map_or_else(|e| format!("no ({e})"), |()| "yes".to_string())
    } else {
        "missing".to_string()
    };
    let timeout = config
        .tool_timeout
        .map_or_else(|| "none".to_string(), |t| format!("{}s", t.as_secs()));

    format!(
        "download_dir = {}\ndownload_dir_writable = {}\nyt_dlp = {}\nlisten = {}\ncleanup_delay = {}s\ntool_timeout = {}",
        config.download_dir.display(),
        writable,
        config.tool_path.display(),
        config.bind_addr(),
        config.cleanup_delay.as_secs(),
        timeout,
    )
}

/// Execute the paths command.
pub fn execute(config: &GatewayConfig) -> Result<()> {
    println!("{}", render(config));
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn renders_key_value_lines() {
        let tmp = tempfile::tempdir().unwrap();
        let config = GatewayConfig::default().with_download_dir(tmp.path());
        let out = render(&config);
        assert!(out.contains(&format!("download_dir = {}", tmp.path().display())));
        assert!(out.contains("download_dir_writable = yes"));
        assert!(out.contains("listen = 0.0.0.0:3000"));
        assert!(out.contains("tool_timeout = none"));
    }
}
