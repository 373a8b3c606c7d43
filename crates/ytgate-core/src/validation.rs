//! Request validation.
//!
//! Turns raw query/path values into domain types before anything reaches
//! the external tool or the filesystem.

use std::path::{Component, Path};

use crate::domain::MediaUrl;
use crate::ports::ValidationError;

/// Validate the `url` query parameter.
///
/// # Examples
///
/// ```rust
/// use ytgate_core::validation::validate_url;
/// use ytgate_core::ValidationError;
///
/// assert!(validate_url(Some("https://valid.example/watch?v=abc123")).is_ok());
/// assert!(matches!(validate_url(None), Err(ValidationError::MissingParameter(_))));
/// assert!(matches!(
///     validate_url(Some("ftp://x")),
///     Err(ValidationError::InvalidUrl { .. })
/// ));
/// ```
pub fn validate_url(raw: Option<&str>) -> Result<MediaUrl, ValidationError> {
    let raw = raw
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .ok_or_else(|| ValidationError::MissingParameter("URL".to_string()))?;
    MediaUrl::parse(raw)
}

/// Check that `name` is a single plain file name inside the artifact directory.
///
/// Rejects empty names, separators, `.`/`..` and absolute paths.
pub fn validate_file_name(name: &str) -> bool {
    if name.is_empty() || name.contains(['/', '\\']) {
        return false;
    }
    let mut components = Path::new(name).components();
    matches!(
        (components.next(), components.next()),
        (Some(Component::Normal(_)), None)
    )
}
