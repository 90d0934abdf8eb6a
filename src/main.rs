//! crossforge - cross-compilation build orchestrator
//!
//! CLI entry point that dispatches to subcommands.

use clap::Parser;
use console::style;
use crossforge::cli::{commands, Cli, Commands};
use crossforge::config::ConfigManager;
use crossforge::error::ForgeResult;
use std::process::ExitCode;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> ExitCode {
    match run().await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("{} {}", style("Error:").red().bold(), e);
            if let Some(hint) = e.hint() {
                eprintln!("{} {}", style("Hint:").yellow(), hint);
            }
            ExitCode::FAILURE
        }
    }
}

async fn run() -> ForgeResult<()> {
    let cli = Cli::parse();

    // Initialize logging: 0 = warn (spinners only), 1 = info, 2+ = debug
    let filter = match cli.verbose {
        0 => EnvFilter::new("crossforge=warn"),
        1 => EnvFilter::new("crossforge=info"),
        _ => EnvFilter::new("crossforge=debug"),
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .without_time()
        .init();

    let config_manager = if let Some(ref path) = cli.config {
        ConfigManager::with_path(path.clone())
    } else {
        ConfigManager::new()
    };

    match cli.command {
        // Completions need no configuration at all
        Commands::Completions(args) => commands::completions(args).await,
        command => dispatch(command, &config_manager).await,
    }
}

async fn dispatch(command: Commands, config_manager: &ConfigManager) -> ForgeResult<()> {
    let config = config_manager.load().await?;

    match command {
        Commands::Completions(_) => unreachable!("Completions handled in run"),
        Commands::Build(args) => commands::build(args, &config).await,
        Commands::Deps(args) => commands::deps(args, &config).await,
        Commands::List(args) => commands::list(args, &config).await,
        Commands::History(args) => commands::history(args, &config).await,
        Commands::Status => commands::status(&config).await,
        Commands::Config(args) => commands::config(args, &config, config_manager).await,
    }
}
