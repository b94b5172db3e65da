pub mod response;

use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::get,
    Json, Router,
};
use serde_json::json;
use sqlx::PgPool;
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;
use tokio::signal;

use crate::aggregation::Aggregator;
use crate::config::{Config, CorsConfig};
use crate::{db, features, middleware};

#[derive(Clone)]
pub struct AppState {
    pub db: PgPool,
    pub aggregator: Arc<Aggregator>,
}

/// Bind and serve until Ctrl+C or SIGTERM
pub async fn serve(config: &Config, state: AppState) -> anyhow::Result<()> {
    let app = create_router(state, &config.cors);

    let addr: SocketAddr = format!("{}:{}", config.server.host, config.server.port).parse()?;
    tracing::info!("Listening on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal(config.server.shutdown_timeout_secs))
        .await?;

    tracing::info!("Server shut down gracefully");
    Ok(())
}

pub fn create_router(state: AppState, cors: &CorsConfig) -> Router {
    let feature_state = features::FeatureState {
        db: state.db.clone(),
        aggregator: state.aggregator.clone(),
    };

    let api_v1 = features::router(feature_state);

    Router::new()
        .route("/", get(root))
        .route("/health", get(health))
        .with_state(state)
        .nest("/api/v1", api_v1)
        .layer(middleware::compression_layer())
        .layer(middleware::tracing_layer())
        .layer(middleware::cors_layer(cors))
}

async fn root(State(state): State<AppState>) -> impl IntoResponse {
    let sources: Vec<_> = state.aggregator.sources().map(|s| s.as_str()).collect();
    Json(json!({
        "name": "Amino Server",
        "version": env!("CARGO_PKG_VERSION"),
        "status": "running",
        "sources": sources,
    }))
}

/// Always `200`; the database is reported separately since lookups work without it
async fn health(State(state): State<AppState>) -> Response {
    let database = match db::health_check(&state.db).await {
        Ok(()) => "connected",
        Err(e) => {
            tracing::warn!(error = %e, "Database health check failed");
            "unavailable"
        },
    };

    (
        StatusCode::OK,
        Json(json!({
            "status": "healthy",
            "database": database,
        })),
    )
        .into_response()
}

async fn shutdown_signal(timeout_secs: u64) {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            tracing::error!("Failed to install Ctrl+C handler: {}", e);
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            },
            Err(e) => {
                tracing::error!("Failed to install SIGTERM handler: {}", e);
            },
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => tracing::info!("Received Ctrl+C, starting graceful shutdown"),
        _ = terminate => tracing::info!("Received terminate signal, starting graceful shutdown"),
    }

    tracing::info!("Waiting up to {} seconds for connections to close", timeout_secs);
    tokio::time::sleep(Duration::from_secs(timeout_secs.min(5))).await;
}
