//! Route definitions and router construction.
//!
//! This module defines the HTTP routes and creates the main router.
//! Handlers delegate to the shared `GatewayService`.

use std::sync::Arc;

use axum::Router;
use axum::http::HeaderValue;
use axum::routing::get;
use tower_http::cors::{Any, CorsLayer};
use tower_http::services::ServeDir;
use tower_http::trace::TraceLayer;

use crate::bootstrap::{AxumContext, CorsConfig};
use crate::handlers;
use crate::state::AppState;

/// Build CORS layer from configuration.
fn build_cors_layer(config: &CorsConfig) -> CorsLayer {
    match config {
        CorsConfig::AllowAll => CorsLayer::new()
            .allow_origin(Any)
            .allow_methods(Any)
            .allow_headers(Any),
        CorsConfig::AllowOrigins(origins) => {
            let allowed: Vec<HeaderValue> = origins.iter().filter_map(|o| o.parse().ok()).collect();
            CorsLayer::new()
                .allow_origin(allowed)
                .allow_methods(Any)
                .allow_headers(Any)
        }
    }
}

/// API routes without the `/api` prefix (for nesting under /api).
///
/// Returned WITHOUT `.with_state()` applied; the caller supplies it.
pub(crate) fn api_routes() -> Router<AppState> {
    Router::new()
        .route("/info", get(handlers::info::info))
        .route("/download/mp3", get(handlers::download::mp3))
        .route("/download/mp4", get(handlers::download::mp4))
        .route("/files", get(handlers::files::list))
        .route(
            "/files/{filename}",
            axum::routing::delete(handlers::files::remove),
        )
}

/// Create the main Axum router.
///
/// # Path Parameter Syntax
/// Axum 0.8 uses brace syntax for path parameters: `{filename}`
pub fn create_router(ctx: AxumContext, cors_config: &CorsConfig) -> Router {
    let downloads = ServeDir::new(&ctx.download_dir);
    let state: AppState = Arc::new(ctx);

    Router::new()
        .route("/", get(handlers::index::index))
        .route("/health", get(health_check))
        .nest("/api", api_routes().with_state(state))
        .nest_service("/downloads", downloads)
        .layer(build_cors_layer(cors_config))
        .layer(TraceLayer::new_for_http())
}

/// Health check endpoint.
pub(crate) async fn health_check() -> &'static str {
    "OK"
}
