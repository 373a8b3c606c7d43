//! CLI entry point - the composition root.
//!
//! Command dispatch routes to handlers which delegate to `GatewayService`.
//! The `web` command bypasses `CliContext` and hands its configuration to
//! the Axum adapter, which composes its own context.

use std::process::ExitCode;

use clap::{CommandFactory, Parser};
use tracing_subscriber::EnvFilter;

use ytgate_cli::handlers::download::DownloadArgs;
use ytgate_cli::{Cli, CliConfig, CliError, Commands, bootstrap, handlers};

#[tokio::main]
async fn main() -> ExitCode {
    // Load environment variables
    dotenvy::dotenv().ok();

    let cli = Cli::parse();
    init_tracing(cli.verbose);

    match run(cli).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {e:#}");
            let code = e.downcast_ref::<CliError>().map_or(1, CliError::exit_code);
            ExitCode::from(u8::try_from(code).unwrap_or(1))
        }
    }
}

fn init_tracing(verbose: bool) {
    let default = if verbose { "debug" } else { "info" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

async fn run(cli: Cli) -> anyhow::Result<()> {
    let config = CliConfig::from_env(&cli)?;

    // Dispatch to appropriate handler
    let Some(command) = cli.command else {
        // No command provided - show help
        Cli::command().print_help()?;
        return Ok(());
    };

    match command {
        Commands::Web { port, host } => {
            handlers::web::execute(&config.gateway, port, host).await?;
        }
        Commands::Paths => {
            handlers::paths::execute(&config.gateway)?;
        }
        Commands::Info { url } => {
            let ctx = bootstrap(config)?;
            handlers::info::execute(&ctx, &url).await?;
        }
        Commands::Download {
            url,
            audio,
            format,
            quality,
        } => {
            let ctx = bootstrap(config)?;
            let args = DownloadArgs {
                url,
                audio,
                format,
                quality,
            };
            handlers::download::execute(&ctx, args).await?;
        }
        Commands::Files => {
            let ctx = bootstrap(config)?;
            handlers::files::execute(&ctx).await?;
        }
    }

    Ok(())
}
