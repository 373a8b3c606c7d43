//! HTTP request handlers for the Axum web server.
//!
//! Each submodule contains handlers for a specific API area.
//! Handlers are thin wrappers that delegate to `GatewayService`.

pub mod download;
pub mod files;
pub mod index;
pub mod info;

use serde::Deserialize;

/// Query string shared by the info and download endpoints.
#[derive(Debug, Default, Deserialize)]
pub struct MediaQuery {
    pub url: Option<String>,
    pub quality: Option<String>,
}
