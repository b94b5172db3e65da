//! Protein/gene identifier normalisation

use crate::error::{AminoError, Result};

/// Longest identifier accepted from a caller
pub const MAX_IDENTIFIER_LENGTH: usize = 100;

/// Trim and check a user supplied identifier
///
/// Accepts gene symbols (`TP53`), accessions (`P04637`, `A0A024R161`) and
/// protein names (`Insulin`, `p53`). Allowed characters are ASCII letters,
/// digits, space and `-_.:`, with at least one letter or digit. The returned
/// string is what every connector is queried with and what the composite
/// record reports as its identifier.
pub fn normalize_identifier(raw: &str) -> Result<String> {
    let trimmed = raw.trim();

    if trimmed.is_empty() {
        return Err(AminoError::invalid_identifier(raw, "identifier cannot be empty"));
    }

    if trimmed.chars().count() > MAX_IDENTIFIER_LENGTH {
        return Err(AminoError::invalid_identifier(
            trimmed,
            format!("identifier must be at most {} characters", MAX_IDENTIFIER_LENGTH),
        ));
    }

    if let Some(bad) = trimmed
        .chars()
        .find(|c| !(c.is_ascii_alphanumeric() || matches!(c, '-' | '_' | '.' | ':' | ' ')))
    {
        return Err(AminoError::invalid_identifier(
            trimmed,
            format!("character '{}' is not allowed", bad),
        ));
    }

    // "." and ".." would be collapsed as path segments
    if !trimmed.chars().any(|c| c.is_ascii_alphanumeric()) {
        return Err(AminoError::invalid_identifier(
            trimmed,
            "identifier must contain a letter or digit",
        ));
    }

    Ok(trimmed.to_string())
}
