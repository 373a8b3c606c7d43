//! Command handlers that delegate to `GatewayService`.
//!
//! Handlers follow the canonical pattern:
//! - Signature: `pub async fn execute(ctx: &CliContext, ...) -> Result<()>`
//! - Thin wrappers that:
//!   1. Parse/validate CLI-specific input
//!   2. Call `GatewayService` methods
//!   3. Format output for the terminal

pub mod download;
pub mod files;
pub mod info;
pub mod paths;
pub mod web;
