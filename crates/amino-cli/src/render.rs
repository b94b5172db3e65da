//! Text rendering of records and history
//!
//! Functions return the rendered text; commands decide where it goes.

use amino_common::types::{ProteinRecord, SearchHistoryItem, SourceFailure};
use colored::Colorize;
use comfy_table::{modifiers::UTF8_ROUND_CORNERS, presets::UTF8_FULL, Table};

use crate::api::types::Pagination;

/// Rows shown per section before eliding the rest
pub const MAX_ROWS: usize = 10;

fn table(header: Vec<&str>) -> Table {
    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL)
        .apply_modifier(UTF8_ROUND_CORNERS)
        .set_header(header);
    table
}

fn section(lines: &mut Vec<String>, title: &str) {
    lines.push(String::new());
    lines.push(title.bold().to_string());
}

fn field(lines: &mut Vec<String>, label: &str, value: Option<&str>) {
    if let Some(value) = value.filter(|v| !v.is_empty()) {
        lines.push(format!("  {:<12} {}", format!("{}:", label).dimmed(), value));
    }
}

fn elided(lines: &mut Vec<String>, total: usize) {
    if total > MAX_ROWS {
        lines.push(format!("  ... and {} more", total - MAX_ROWS).dimmed().to_string());
    }
}

fn score(value: Option<f64>) -> String {
    value.map(|v| format!("{:.2}", v)).unwrap_or_else(|| "-".to_string())
}

/// Cut to `max` characters, marking the cut with an ellipsis
pub fn truncate(text: &str, max: usize) -> String {
    if text.chars().count() <= max {
        return text.to_string();
    }
    let kept: String = text.chars().take(max.saturating_sub(3)).collect();
    format!("{}...", kept)
}

/// Full text view of a composite record
pub fn record_text(record: &ProteinRecord, failures: &[SourceFailure]) -> String {
    let mut lines = Vec::new();

    let title = match (&record.protein_name, &record.gene_symbol) {
        (Some(name), Some(gene)) => format!("{} ({})", name, gene),
        _ => record.display_name().to_string(),
    };
    lines.push(title.bold().green().to_string());

    field(&mut lines, "Query", Some(&record.identifier));
    field(&mut lines, "Accession", record.accession.as_deref());
    field(&mut lines, "Organism", record.organism.as_deref());
    let genes = record.gene_names.join(", ");
    field(&mut lines, "Genes", Some(&genes));
    let length = record.sequence_length.map(|l| format!("{} aa", l));
    field(&mut lines, "Length", length.as_deref());

    if record.is_empty() {
        lines.push(String::new());
        lines.push(
            format!("No source returned data for '{}'.", record.identifier)
                .yellow()
                .to_string(),
        );
    }

    if let Some(summary) = &record.summary {
        section(&mut lines, "Summary");
        lines.push(format!("  {}", summary));
    }

    if let Some(function) = record.function.as_ref().filter(|f| Some(*f) != record.summary.as_ref()) {
        section(&mut lines, "Function");
        lines.push(format!("  {}", function));
    }

    if !record.subcellular_locations.is_empty() {
        section(&mut lines, "Subcellular location");
        lines.push(format!("  {}", record.subcellular_locations.join(", ")));
    }

    if !record.go_terms.is_empty() {
        section(&mut lines, &format!("GO terms ({})", record.go_terms.len()));
        for term in record.go_terms.iter().take(MAX_ROWS) {
            lines.push(format!("  {}  {}", term.id.cyan(), term.term));
        }
        elided(&mut lines, record.go_terms.len());
    }

    if !record.structures.is_empty() {
        section(&mut lines, &format!("Structures ({})", record.structures.len()));
        let mut t = table(vec!["ID", "Source", "Method", "Resolution (Å)", "Confidence"]);
        for s in record.structures.iter().take(MAX_ROWS) {
            t.add_row(vec![
                s.id.clone(),
                s.source.display_name().to_string(),
                s.method.clone().unwrap_or_else(|| "-".to_string()),
                score(s.resolution),
                score(s.confidence),
            ]);
        }
        lines.push(t.to_string());
        elided(&mut lines, record.structures.len());
    }

    if !record.interactions.is_empty() {
        section(&mut lines, &format!("Interactions ({})", record.interactions.len()));
        let mut t = table(vec!["Partner", "Score"]);
        for p in record.interactions.iter().take(MAX_ROWS) {
            t.add_row(vec![p.name.clone(), format!("{:.3}", p.score)]);
        }
        lines.push(t.to_string());
        elided(&mut lines, record.interactions.len());
        if let Some(url) = &record.interaction_network_url {
            lines.push(format!("  Network: {}", url));
        }
    }

    if !record.diseases.is_empty() {
        section(&mut lines, &format!("Diseases ({})", record.diseases.len()));
        let mut t = table(vec!["Disease", "Score", "Source"]);
        for d in record.diseases.iter().take(MAX_ROWS) {
            t.add_row(vec![
                truncate(&d.name, 60),
                score(d.score),
                d.source.display_name().to_string(),
            ]);
        }
        lines.push(t.to_string());
        elided(&mut lines, record.diseases.len());
    }

    if !record.drugs.is_empty() {
        section(&mut lines, &format!("Drugs ({})", record.drugs.len()));
        let mut t = table(vec!["Drug", "Type", "Mechanism", "Status"]);
        for d in record.drugs.iter().take(MAX_ROWS) {
            t.add_row(vec![
                d.name.clone(),
                d.drug_type.clone().unwrap_or_else(|| "-".to_string()),
                d.mechanism.clone().unwrap_or_else(|| "-".to_string()),
                d.groups.join(", "),
            ]);
        }
        lines.push(t.to_string());
        elided(&mut lines, record.drugs.len());
    }

    lines.push(String::new());
    if !record.sources.is_empty() {
        let names: Vec<_> = record.sources.iter().map(|s| s.display_name()).collect();
        lines.push(format!("Sources: {}", names.join(", ")));
    }
    for failure in failures {
        lines.push(
            format!(
                "Unavailable: {} ({}: {})",
                failure.source.display_name(),
                failure.kind,
                failure.message
            )
            .yellow()
            .to_string(),
        );
    }

    lines.join("\n")
}

/// History page as a table with a page footer
pub fn history_text(items: &[SearchHistoryItem], pagination: Option<&Pagination>) -> String {
    if items.is_empty() {
        return "No searches recorded yet.".to_string();
    }

    let mut t = table(vec!["ID", "Query", "Protein", "Genes", "Searched at"]);
    for item in items {
        t.add_row(vec![
            item.id.to_string(),
            item.protein_id.clone(),
            item.protein_name
                .as_deref()
                .map(|n| truncate(n, 40))
                .unwrap_or_else(|| "-".to_string()),
            truncate(&item.gene_names.join(", "), 30),
            item.timestamp.format("%Y-%m-%d %H:%M:%S UTC").to_string(),
        ]);
    }

    let mut out = t.to_string();
    if let Some(p) = pagination {
        out.push_str(&format!(
            "\nPage {}/{} ({} searches)",
            p.page,
            p.pages.max(1),
            p.total
        ));
    }
    out
}
