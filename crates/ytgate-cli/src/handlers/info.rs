//! Info command handler.

use anyhow::Result;
use ytgate_core::validate_url;

use crate::bootstrap::CliContext;
use crate::error::CliError;

/// Print metadata for `url` as pretty JSON.
pub async fn execute(ctx: &CliContext, url: &str) -> Result<()> {
    let url = validate_url(Some(url)).map_err(|e| CliError::Arguments(e.to_string()))?;
    let info = ctx.gateway().info(&url).await.map_err(CliError::from)?;
    println!("{}", serde_json::to_string_pretty(&info)?);
    Ok(())
}
