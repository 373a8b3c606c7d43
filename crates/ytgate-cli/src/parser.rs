//! Main CLI parser and top-level argument handling.
//!
//! This module defines the root CLI structure with global options.

use std::path::PathBuf;

use clap::Parser;

use crate::commands::Commands;

/// Command-line interface for the yt-dlp download gateway.
#[derive(Parser)]
#[command(name = "ytgate")]
#[command(about = "HTTP gateway and CLI around yt-dlp")]
#[command(version)]
pub struct Cli {
    /// Override the scratch download directory
    #[arg(long = "download-dir", global = true)]
    pub download_dir: Option<PathBuf>,

    /// Path to the yt-dlp binary
    #[arg(long = "yt-dlp", global = true)]
    pub yt_dlp: Option<PathBuf>,

    /// Enable verbose/debug output
    #[arg(short = 'v', long = "verbose", global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_parser_builds() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_global_args() {
        let cli = Cli::parse_from([
            "ytgate",
            "--verbose",
            "--download-dir",
            "/tmp/yt",
            "files",
            "--yt-dlp",
            "/opt/yt-dlp",
        ]);
        assert!(cli.verbose);
        assert_eq!(cli.download_dir, Some(PathBuf::from("/tmp/yt")));
        assert_eq!(cli.yt_dlp, Some(PathBuf::from("/opt/yt-dlp")));
        assert!(matches!(cli.command, Some(Commands::Files)));
    }
}
