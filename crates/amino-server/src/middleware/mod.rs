//! HTTP middleware for the Amino server
//!
//! - CORS (Cross-Origin Resource Sharing)
//! - Request tracing
//! - Response compression

use axum::http::{header, Method};
use std::time::Duration;
use tower_http::{
    compression::CompressionLayer,
    cors::{Any, CorsLayer},
    trace::{DefaultMakeSpan, DefaultOnResponse, TraceLayer},
};
use tracing::Level;

use crate::config::CorsConfig;

/// Create CORS layer from configuration
///
/// An empty origin list or `*` allows any origin; credentials are then never
/// allowed, since browsers reject that combination.
pub fn cors_layer(config: &CorsConfig) -> CorsLayer {
    let cors = CorsLayer::new()
        .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
        .allow_headers([header::ACCEPT, header::CONTENT_TYPE])
        .max_age(Duration::from_secs(3600));

    if config.allowed_origins.is_empty() || config.allowed_origins.iter().any(|o| o == "*") {
        return cors.allow_origin(Any);
    }

    let origins: Vec<_> = config
        .allowed_origins
        .iter()
        .filter_map(|origin| origin.parse().ok())
        .collect();

    cors.allow_origin(origins)
        .allow_credentials(config.allow_credentials)
}

/// Create tracing/logging layer
pub fn tracing_layer(
) -> TraceLayer<tower_http::classify::SharedClassifier<tower_http::classify::ServerErrorsAsFailures>>
{
    TraceLayer::new_for_http()
        .make_span_with(DefaultMakeSpan::new().level(Level::INFO))
        .on_response(
            DefaultOnResponse::new()
                .level(Level::INFO)
                .latency_unit(tower_http::LatencyUnit::Millis),
        )
}

/// Composite records can be large; compress when the client accepts it
pub fn compression_layer() -> CompressionLayer {
    CompressionLayer::new()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cors_layer_with_specific_origins() {
        let config = CorsConfig {
            allowed_origins: vec![
                "http://localhost:3000".to_string(),
                "https://amino.example.com".to_string(),
            ],
            allow_credentials: true,
        };

        let _layer = cors_layer(&config);
    }

    #[test]
    fn test_cors_layer_with_wildcard_and_credentials() {
        let config = CorsConfig {
            allowed_origins: vec!["*".to_string()],
            allow_credentials: true,
        };

        let _layer = cors_layer(&config);
    }
}
