//! Amino CLI Library
//!
//! Command-line client for the Amino protein aggregation server.
//!
//! # Overview
//!
//! - **Lookup**: aggregate one identifier and print the composite record
//!   (`amino lookup TP53`), recorded in the history unless `--no-save` is given
//! - **History**: list recorded searches, newest first (`amino history`)
//! - **Show**: print one recorded search (`amino show <id>`)
//!
//! Every command takes `--format text|json`; JSON output is the server's
//! payload unchanged.

pub mod api;
pub mod commands;
pub mod error;
pub mod render;

// Re-export commonly used types
pub use error::{CliError, Result};

use clap::{Parser, Subcommand, ValueEnum};
use uuid::Uuid;

/// Amino - protein and gene information from public databases
#[derive(Parser, Debug)]
#[command(name = "amino")]
#[command(author, version, about, long_about = None)]
#[command(arg_required_else_help = true)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Server URL
    #[arg(long, env = "AMINO_SERVER_URL", default_value = api::client::DEFAULT_SERVER_URL, global = true)]
    pub server_url: String,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Look up a protein or gene across all sources
    Lookup {
        /// Gene symbol, UniProt accession or protein name (words are joined with spaces)
        #[arg(required = true, num_args = 1..)]
        query: Vec<String>,

        /// Do not record this lookup in the search history
        #[arg(long)]
        no_save: bool,

        #[arg(short, long, value_enum, default_value_t = OutputFormat::Text)]
        format: OutputFormat,
    },

    /// List recorded searches, newest first
    History {
        #[arg(short, long, default_value_t = 1)]
        page: i64,

        #[arg(long, default_value_t = 20)]
        per_page: i64,

        #[arg(short, long, value_enum, default_value_t = OutputFormat::Text)]
        format: OutputFormat,
    },

    /// Show one recorded search
    Show {
        /// Search id as printed by `lookup` or `history`
        id: Uuid,

        #[arg(short, long, value_enum, default_value_t = OutputFormat::Text)]
        format: OutputFormat,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    Text,
    Json,
}
