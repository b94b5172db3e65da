//! HTTP API tests driven through the router with `oneshot`
//!
//! The database pool points at a closed port, so these run without
//! PostgreSQL and exercise the degraded persistence paths. Round trips through
//! a real database are marked `#[ignore]`.

mod common;

use amino_common::types::SourceKind;
use amino_server::aggregation::Aggregator;
use amino_server::api::{create_router, AppState};
use amino_server::config::CorsConfig;
use amino_server::sources::{PartialRecord, Phase};
use axum::{
    body::Body,
    http::{header, Method, Request, StatusCode},
    Router,
};
use common::{unreachable_pool, StubConnector};
use serde_json::{json, Value};
use sqlx::PgPool;
use std::sync::Arc;
use std::time::Duration;
use tower::ServiceExt;

fn aggregator() -> Arc<Aggregator> {
    Arc::new(Aggregator::new(
        vec![
            StubConnector::new(SourceKind::Uniprot, Phase::Identity, |q| {
                let mut partial = PartialRecord::new(SourceKind::Uniprot, &q.identifier);
                partial.accession = Some("P01308".into());
                partial.protein_name = Some("Insulin".into());
                partial.gene_names = vec!["INS".into()];
                partial.organism = Some("Homo sapiens".into());
                Ok(partial)
            })
            .shared(),
            StubConnector::failing(SourceKind::Pdb, Phase::Annotation).shared(),
        ],
        Duration::from_secs(1),
    ))
}

fn cors() -> CorsConfig {
    CorsConfig {
        allowed_origins: vec!["http://localhost:3000".to_string()],
        allow_credentials: true,
    }
}

fn app_with_pool(db: PgPool) -> Router {
    create_router(
        AppState {
            db,
            aggregator: aggregator(),
        },
        &cors(),
    )
}

fn app() -> Router {
    app_with_pool(unreachable_pool())
}

async fn send(app: Router, request: Request<Body>) -> (StatusCode, Value) {
    let response = app.oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    let body = serde_json::from_slice(&bytes).unwrap_or(Value::Null);
    (status, body)
}

fn get(uri: &str) -> Request<Body> {
    Request::builder().uri(uri).body(Body::empty()).unwrap()
}

fn post_json(uri: &str, body: Value) -> Request<Body> {
    Request::builder()
        .method(Method::POST)
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

#[tokio::test]
async fn test_root_lists_sources() {
    let (status, body) = send(app(), get("/")).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["name"], "Amino Server");
    assert_eq!(body["sources"], json!(["uniprot", "pdb"]));
}

#[tokio::test]
async fn test_health_reports_missing_database() {
    let (status, body) = send(app(), get("/health")).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "healthy");
    assert_eq!(body["database"], "unavailable");
}

#[tokio::test]
async fn test_lookup_protein() {
    let (status, body) = send(app(), get("/api/v1/proteins/ins")).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["success"], true);
    let record = &body["data"]["record"];
    assert_eq!(record["identifier"], "ins");
    assert_eq!(record["protein_name"], "Insulin");
    assert_eq!(
        record["summary"],
        "Insulin (INS) is a protein found in Homo sapiens."
    );
    assert_eq!(body["data"]["failures"][0]["source"], "pdb");
    assert_eq!(body["data"]["failures"][0]["kind"], "not_found");
}

#[tokio::test]
async fn test_lookup_rejects_invalid_identifier() {
    let (status, body) = send(app(), get("/api/v1/proteins/INS%3BDROP")).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["success"], false);
    assert_eq!(body["error"]["code"], "VALIDATION_ERROR");
}

#[tokio::test]
async fn test_search_without_database_still_returns_record() {
    let (status, body) = send(app(), post_json("/api/v1/searches", json!({"query": "INS"}))).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["record"]["protein_name"], "Insulin");
    assert!(body["data"].get("search_id").is_none());
    let warnings = body["data"]["warnings"].as_array().unwrap();
    assert_eq!(warnings.len(), 1);
    assert!(warnings[0].as_str().unwrap().contains("could not be saved"));
}

#[tokio::test]
async fn test_search_rejects_blank_query() {
    let (status, body) = send(app(), post_json("/api/v1/searches", json!({"query": "   "}))).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"]["code"], "VALIDATION_ERROR");
}

#[tokio::test]
async fn test_history_rejects_bad_pagination() {
    let (status, body) = send(app(), get("/api/v1/searches?page=0")).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"]["code"], "VALIDATION_ERROR");
}

#[tokio::test]
async fn test_history_rejects_page_beyond_offset_range() {
    let (status, body) = send(app(), get("/api/v1/searches?page=9223372036854775807")).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"]["code"], "VALIDATION_ERROR");
    assert_eq!(body["error"]["message"], "Page is too large");
}

#[tokio::test]
async fn test_history_without_database_is_internal_error() {
    let (status, body) = send(app(), get("/api/v1/searches")).await;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body["error"]["code"], "INTERNAL_ERROR");
}

#[tokio::test]
async fn test_get_search_rejects_malformed_id() {
    let (status, body) = send(app(), get("/api/v1/searches/not-a-uuid")).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"]["code"], "VALIDATION_ERROR");
}

#[tokio::test]
async fn test_cors_preflight_for_allowed_origin() {
    let request = Request::builder()
        .method(Method::OPTIONS)
        .uri("/api/v1/searches")
        .header(header::ORIGIN, "http://localhost:3000")
        .header(header::ACCESS_CONTROL_REQUEST_METHOD, "POST")
        .body(Body::empty())
        .unwrap();

    let response = app().oneshot(request).await.unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(
        response.headers().get(header::ACCESS_CONTROL_ALLOW_ORIGIN).unwrap(),
        "http://localhost:3000"
    );
}

#[sqlx::test(migrations = "../../migrations")]
#[ignore] // Requires database
async fn test_search_history_round_trip(pool: PgPool) -> sqlx::Result<()> {
    let (status, body) = send(
        app_with_pool(pool.clone()),
        post_json("/api/v1/searches", json!({"query": "INS"})),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["warnings"], json!([]));
    let id = body["data"]["search_id"].as_str().unwrap().to_string();

    let (status, body) = send(app_with_pool(pool.clone()), get("/api/v1/searches")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"][0]["id"], id.as_str());
    assert_eq!(body["data"][0]["protein_name"], "Insulin");
    assert_eq!(body["meta"]["pagination"]["total"], 1);

    let (status, body) = send(app_with_pool(pool.clone()), get(&format!("/api/v1/searches/{}", id))).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["full_data"]["identifier"], "INS");
    assert_eq!(body["data"]["full_data"]["gene_names"], json!(["INS"]));

    let (status, _) = send(
        app_with_pool(pool),
        get("/api/v1/searches/00000000-0000-0000-0000-000000000000"),
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    Ok(())
}
