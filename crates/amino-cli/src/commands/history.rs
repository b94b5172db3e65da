//! `amino history`

use crate::api::ApiClient;
use crate::error::{CliError, Result};
use crate::{render, OutputFormat};

pub async fn run(page: i64, per_page: i64, format: OutputFormat, server_url: String) -> Result<()> {
    if page < 1 {
        return Err(CliError::config("Page must be greater than 0"));
    }
    if !(1..=100).contains(&per_page) {
        return Err(CliError::config("Per page must be between 1 and 100"));
    }

    let client = ApiClient::new(server_url)?;
    let history = client.history(page, per_page).await?;

    match format {
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&history)?),
        OutputFormat::Text => println!(
            "{}",
            render::history_text(&history.items, history.pagination.as_ref())
        ),
    }

    Ok(())
}
