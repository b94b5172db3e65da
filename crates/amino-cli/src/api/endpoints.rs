//! API endpoint URL builders

/// Build protein lookup URL; the identifier is percent-encoded as one path segment
pub fn protein_url(base_url: &str, identifier: &str) -> String {
    format!(
        "{}/api/v1/proteins/{}",
        base(base_url),
        urlencoding::encode(identifier)
    )
}

/// Build search collection URL (run a search, list history)
pub fn searches_url(base_url: &str) -> String {
    format!("{}/api/v1/searches", base(base_url))
}

/// Build search history page URL
pub fn history_url(base_url: &str, page: i64, per_page: i64) -> String {
    format!("{}?page={}&per_page={}", searches_url(base_url), page, per_page)
}

/// Build recorded search URL
pub fn search_url(base_url: &str, id: &uuid::Uuid) -> String {
    format!("{}/{}", searches_url(base_url), id)
}

fn base(base_url: &str) -> &str {
    base_url.trim_end_matches('/')
}
