//! `amino show`

use colored::Colorize;
use uuid::Uuid;

use crate::api::ApiClient;
use crate::error::Result;
use crate::{render, OutputFormat};

pub async fn run(id: Uuid, format: OutputFormat, server_url: String) -> Result<()> {
    let client = ApiClient::new(server_url)?;
    let search = client.get_search(&id).await?;

    match format {
        // `full_data` is printed exactly as it was stored
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&search)?),
        OutputFormat::Text => {
            let record = search.protein_record()?;
            println!(
                "{}",
                format!(
                    "Search {} for '{}' at {}",
                    search.id,
                    search.protein_id,
                    search.timestamp.format("%Y-%m-%d %H:%M:%S UTC")
                )
                .dimmed()
            );
            println!("{}", render::record_text(&record, &[]));
        },
    }

    Ok(())
}
