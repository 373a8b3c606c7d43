#![doc = include_str!("../README.md")]
#![deny(unsafe_code)]

pub mod config;
pub mod domain;
pub mod paths;
pub mod ports;
pub mod services;
pub mod validation;

// Re-export commonly used types for convenience
pub use config::{ConfigError, CorsOrigins, GatewayConfig, join_host_port};
pub use domain::{
    Artifact, ArtifactEntry, ArtifactToken, BEST_QUALITY, DEFAULT_AUDIO_FORMAT,
    DEFAULT_AUDIO_QUALITY, DEFAULT_VIDEO_FORMAT, DownloadPlan, DownloadRequest, FormatSummary,
    MediaKind, MediaUrl, VideoInfo, format_megabytes,
};
pub use paths::{PathError, ensure_directory, verify_writable};
pub use ports::{
    ArtifactError, ArtifactStorePort, CoreError, MediaToolPort, ToolError, ValidationError,
};
pub use services::GatewayService;
pub use validation::{validate_file_name, validate_url};
