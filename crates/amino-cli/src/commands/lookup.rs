//! `amino lookup`

use amino_common::types::identifier::normalize_identifier;
use colored::Colorize;
use tracing::{debug, info};

use crate::api::ApiClient;
use crate::error::Result;
use crate::{render, OutputFormat};

pub async fn run(query: Vec<String>, no_save: bool, format: OutputFormat, server_url: String) -> Result<()> {
    let identifier = normalize_identifier(&query.join(" "))?;
    debug!(identifier = %identifier, no_save, "Starting lookup");

    let client = ApiClient::new(server_url)?;

    if no_save {
        let lookup = client.lookup(&identifier).await?;
        return match format {
            OutputFormat::Json => print_json(&lookup),
            OutputFormat::Text => {
                println!("{}", render::record_text(&lookup.record, &lookup.failures));
                Ok(())
            },
        };
    }

    let outcome = client.search(&identifier).await?;
    for warning in &outcome.warnings {
        eprintln!("{} {}", "warning:".yellow().bold(), warning);
    }

    match format {
        OutputFormat::Json => print_json(&outcome)?,
        OutputFormat::Text => {
            println!("{}", render::record_text(&outcome.record, &outcome.failures));
            if let Some(id) = outcome.search_id {
                info!(search_id = %id, "Search recorded");
                println!("{}", format!("Saved as search {}", id).dimmed());
            }
        },
    }

    Ok(())
}

fn print_json<T: serde::Serialize>(value: &T) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}
