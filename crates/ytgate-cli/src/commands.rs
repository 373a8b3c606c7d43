//! Main commands enum.

use clap::Subcommand;

/// Available commands.
#[derive(Subcommand)]
pub enum Commands {
    /// Run the HTTP gateway
    Web {
        /// Port to listen on (overrides PORT)
        #[arg(short, long)]
        port: Option<u16>,
        /// Address to bind (overrides YTGATE_HOST)
        #[arg(long)]
        host: Option<String>,
    },

    /// Print video metadata as JSON without downloading
    Info {
        /// Video page URL
        url: String,
    },

    /// Download into the scratch directory and print the artifact path
    Download {
        /// Video page URL
        url: String,
        /// Extract audio instead of downloading video
        #[arg(short, long)]
        audio: bool,
        /// Audio codec or video container (defaults: mp3 / mp4)
        #[arg(short, long)]
        format: Option<String>,
        /// Audio bitrate or maximum video height (defaults: 320 / best)
        #[arg(short, long)]
        quality: Option<String>,
    },

    /// List artifacts in the scratch directory
    Files,

    /// Show resolved configuration and paths
    Paths,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::Cli;
    use clap::Parser;

    #[test]
    fn download_flags() {
        let cli = Cli::parse_from([
            "ytgate",
            "download",
            "https://valid.example/x",
            "--audio",
            "-q",
            "192",
        ]);
        match cli.command {
            Some(Commands::Download {
                url,
                audio,
                format,
                quality,
            }) => {
                assert_eq!(url, "https://valid.example/x");
                assert!(audio);
                assert!(format.is_none());
                assert_eq!(quality.as_deref(), Some("192"));
            }
            _ => panic!("expected download command"),
        }
    }

    #[test]
    fn web_port_override() {
        let cli = Cli::parse_from(["ytgate", "web", "--port", "8080"]);
        assert!(matches!(
            cli.command,
            Some(Commands::Web {
                port: Some(8080),
                host: None
            })
        ));
    }
}
