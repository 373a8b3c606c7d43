//! Gateway configuration.
//!
//! Values come from the process environment (a `.env` file is loaded by the
//! binary before this runs) and can be overridden by adapter flags.

use std::path::PathBuf;
use std::time::Duration;

use thiserror::Error;

/// Default listen port.
pub const DEFAULT_PORT: u16 = 3000;

/// Default listen address.
pub const DEFAULT_HOST: &str = "0.0.0.0";

/// Default transient download directory.
pub const DEFAULT_DOWNLOAD_DIR: &str = "/tmp/downloads";

/// Default extractor binary, resolved through `PATH`.
pub const DEFAULT_TOOL_PATH: &str = "yt-dlp";

/// Grace period between the end of a transfer and artifact deletion.
pub const DEFAULT_CLEANUP_DELAY: Duration = Duration::from_secs(5);

pub const ENV_PORT: &str = "PORT";
pub const ENV_HOST: &str = "YTGATE_HOST";
pub const ENV_DOWNLOAD_DIR: &str = "YTGATE_DOWNLOAD_DIR";
pub const ENV_TOOL_PATH: &str = "YT_DLP_PATH";
pub const ENV_CLEANUP_DELAY: &str = "YTGATE_CLEANUP_DELAY_SECS";
pub const ENV_TOOL_TIMEOUT: &str = "YTGATE_TOOL_TIMEOUT_SECS";
pub const ENV_CORS_ORIGINS: &str = "YTGATE_CORS_ORIGINS";

/// Errors raised while reading configuration.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    /// A variable was set to a value of the wrong shape.
    #[error("Invalid value for {key}: '{value}' ({reason})")]
    InvalidValue {
        key: &'static str,
        value: String,
        reason: &'static str,
    },
}

/// CORS policy for the HTTP adapter.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum CorsOrigins {
    /// Allow all origins.
    #[default]
    Any,
    /// Allow only these origins.
    List(Vec<String>),
}

/// Runtime configuration shared by every adapter.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GatewayConfig {
    pub host: String,
    pub port: u16,
    /// Scratch directory the tool writes into.
    pub download_dir: PathBuf,
    /// Extractor binary.
    pub tool_path: PathBuf,
    pub cleanup_delay: Duration,
    /// `None` waits for the tool indefinitely.
    pub tool_timeout: Option<Duration>,
    pub cors: CorsOrigins,
}

impl Default for GatewayConfig {
    fn default() -> Self {
        Self {
            host: DEFAULT_HOST.to_string(),
            port: DEFAULT_PORT,
            download_dir: PathBuf::from(DEFAULT_DOWNLOAD_DIR),
            tool_path: PathBuf::from(DEFAULT_TOOL_PATH),
            cleanup_delay: DEFAULT_CLEANUP_DELAY,
            tool_timeout: None,
            cors: CorsOrigins::Any,
        }
    }
}

impl GatewayConfig {
    /// Read configuration from the process environment.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Read configuration through an arbitrary key lookup.
    ///
    /// Blank values are treated as unset.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).map(|v| v.trim().to_string()).filter(|v| !v.is_empty());
        let mut config = Self::default();

        if let Some(host) = get(ENV_HOST) {
            config.host = host;
        }
        if let Some(port) = get(ENV_PORT) {
            config.port = port.parse().map_err(|_| ConfigError::InvalidValue {
                key: ENV_PORT,
                value: port,
                reason: "expected a port number",
            })?;
        }
        if let Some(dir) = get(ENV_DOWNLOAD_DIR) {
            config.download_dir = PathBuf::from(dir);
        }
        if let Some(tool) = get(ENV_TOOL_PATH) {
            config.tool_path = PathBuf::from(tool);
        }
        if let Some(secs) = get(ENV_CLEANUP_DELAY) {
            config.cleanup_delay = parse_secs(ENV_CLEANUP_DELAY, secs)?;
        }
        if let Some(secs) = get(ENV_TOOL_TIMEOUT) {
            let timeout = parse_secs(ENV_TOOL_TIMEOUT, secs)?;
            config.tool_timeout = (!timeout.is_zero()).then_some(timeout);
        }
        if let Some(origins) = get(ENV_CORS_ORIGINS) {
            let list: Vec<String> = origins
                .split(',')
                .map(str::trim)
                .filter(|o| !o.is_empty())
                .map(str::to_string)
                .collect();
            if !list.is_empty() && !list.iter().any(|o| o == "*") {
                config.cors = CorsOrigins::List(list);
            }
        }

        Ok(config)
    }

    /// `host:port` string for binding a listener.
    pub fn bind_addr(&self) -> String {
        join_host_port(&self.host, self.port)
    }

    /// Set the scratch directory.
    #[must_use]
    pub fn with_download_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.download_dir = dir.into();
        self
    }

    /// Set the extractor binary.
    #[must_use]
    pub fn with_tool_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.tool_path = path.into();
        self
    }

}

/// Join a host and port, bracketing bare IPv6 literals.
pub fn join_host_port(host: &str, port: u16) -> String {
    if host.contains(':') && !host.starts_with('[') {
        format!("[{host}]:{port}")
    } else {
        format!("{host}:{port}")
    }
}

fn parse_secs(key: &'static str, value: String) -> Result<Duration, ConfigError> {
    value
        .parse::<u64>()
        .map(Duration::from_secs)
        .map_err(|_| ConfigError::InvalidValue {
            key,
            value,
            reason: "expected whole seconds",
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| ((*k).to_string(), (*v).to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn defaults_when_nothing_is_set() {
        let config = GatewayConfig::from_lookup(lookup(&[])).unwrap();
        assert_eq!(config, GatewayConfig::default());
        assert_eq!(config.port, 3000);
        assert_eq!(config.download_dir, PathBuf::from("/tmp/downloads"));
        assert_eq!(config.cleanup_delay, Duration::from_secs(5));
        assert!(config.tool_timeout.is_none());
    }

    #[test]
    fn reads_every_variable() {
        let config = GatewayConfig::from_lookup(lookup(&[
            ("PORT", "8080"),
            ("YTGATE_HOST", "127.0.0.1"),
            ("YTGATE_DOWNLOAD_DIR", "/var/tmp/yt"),
            ("YT_DLP_PATH", "/opt/yt-dlp"),
            ("YTGATE_CLEANUP_DELAY_SECS", "12"),
            ("YTGATE_TOOL_TIMEOUT_SECS", "600"),
            ("YTGATE_CORS_ORIGINS", "http://a.test, http://b.test"),
        ]))
        .unwrap();

        assert_eq!(config.bind_addr(), "127.0.0.1:8080");
        assert_eq!(config.download_dir, PathBuf::from("/var/tmp/yt"));
        assert_eq!(config.tool_path, PathBuf::from("/opt/yt-dlp"));
        assert_eq!(config.cleanup_delay, Duration::from_secs(12));
        assert_eq!(config.tool_timeout, Some(Duration::from_secs(600)));
        assert_eq!(
            config.cors,
            CorsOrigins::List(vec!["http://a.test".into(), "http://b.test".into()])
        );
    }

    #[test]
    fn zero_timeout_means_none_and_star_means_any() {
        let config = GatewayConfig::from_lookup(lookup(&[
            ("YTGATE_TOOL_TIMEOUT_SECS", "0"),
            ("YTGATE_CORS_ORIGINS", "*"),
        ]))
        .unwrap();
        assert!(config.tool_timeout.is_none());
        assert_eq!(config.cors, CorsOrigins::Any);
    }

    #[test]
    fn rejects_bad_numbers() {
        let err = GatewayConfig::from_lookup(lookup(&[("PORT", "eighty")])).unwrap_err();
        assert!(matches!(err, ConfigError::InvalidValue { key: "PORT", .. }));

        let err =
            GatewayConfig::from_lookup(lookup(&[("YTGATE_CLEANUP_DELAY_SECS", "-1")])).unwrap_err();
        assert!(err.to_string().contains("YTGATE_CLEANUP_DELAY_SECS"));
    }

    #[test]
    fn ipv6_host_is_bracketed() {
        let config = GatewayConfig {
            host: "::1".to_string(),
            ..GatewayConfig::default()
        };
        assert_eq!(config.bind_addr(), "[::1]:3000");
    }
}
