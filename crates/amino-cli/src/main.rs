//! Amino CLI - Main entry point

use amino_cli::{Cli, Commands};
use amino_common::logging::{init_logging, LogConfig, LogLevel, LogOutput};
use clap::Parser;
use std::process;
use tracing::error;

#[tokio::main]
async fn main() {
    dotenvy::dotenv().ok();

    let cli = Cli::parse();

    // Logs go to stderr; stdout is reserved for command output
    let log_config = LogConfig::builder()
        .level(if cli.verbose { LogLevel::Debug } else { LogLevel::Warn })
        .output(LogOutput::Console)
        .log_file_prefix("amino-cli")
        .build();

    // Environment variables take precedence
    let log_config = log_config.clone().merge_env().unwrap_or(log_config);

    // The CLI works without logging
    let _guard = init_logging(&log_config).ok();

    if let Err(e) = execute_command(cli).await {
        error!(error = %e, "Command failed");
        eprintln!("Error: {}", e);
        process::exit(1);
    }
}

async fn execute_command(cli: Cli) -> amino_cli::Result<()> {
    match cli.command {
        Commands::Lookup {
            query,
            no_save,
            format,
        } => amino_cli::commands::lookup::run(query, no_save, format, cli.server_url).await,

        Commands::History {
            page,
            per_page,
            format,
        } => amino_cli::commands::history::run(page, per_page, format, cli.server_url).await,

        Commands::Show { id, format } => {
            amino_cli::commands::show::run(id, format, cli.server_url).await
        },
    }
}
