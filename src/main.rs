//! texpng - LaTeX formula to PNG renderer
//!
//! CLI entry point that dispatches to subcommands.

use clap::Parser;
use console::style;
use std::process::ExitCode;
use texpng::cli::{Cli, Commands};
use texpng::config::ConfigManager;
use texpng::error::TexPngResult;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> ExitCode {
    match run().await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("{} {}", style("Error:").red().bold(), e);
            if let Some(diagnostics) = e.diagnostics() {
                for line in diagnostics.lines() {
                    eprintln!("  {}", style(line).dim());
                }
            }
            if let Some(hint) = e.hint() {
                eprintln!("{} {}", style("Hint:").yellow(), hint);
            }
            ExitCode::FAILURE
        }
    }
}

async fn run() -> TexPngResult<()> {
    let cli = Cli::parse();

    // Initialize logging: 0 = warn, 1 = info, 2+ = debug
    let filter = match cli.verbose {
        0 => EnvFilter::new("texpng=warn"),
        1 => EnvFilter::new("texpng=info"),
        _ => EnvFilter::new("texpng=debug"),
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .without_time()
        .with_writer(std::io::stderr)
        .init();

    // Load configuration
    let manager = if let Some(ref path) = cli.config {
        ConfigManager::with_path(path.clone())
    } else {
        ConfigManager::new()
    };
    let config = manager.load().await?;

    // Dispatch to command
    match cli.command {
        Commands::Render(args) => texpng::cli::commands::render(args, &config).await,
        Commands::Status => texpng::cli::commands::status(&config).await,
        Commands::Config(args) => texpng::cli::commands::config(args, &config, &manager).await,
    }
}
