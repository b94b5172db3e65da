//! End-to-end tests for the amino binary
//!
//! Each test runs the compiled CLI against a mock Amino server and checks:
//! - Text and JSON output of lookups
//! - Whether a lookup is recorded
//! - History listing and showing a stored search
//! - Error reporting

use assert_cmd::Command;
use predicates::prelude::*;
use serde_json::json;
use wiremock::{
    matchers::{body_json, method, path, query_param},
    Mock, MockServer, ResponseTemplate,
};

const SEARCH_ID: &str = "0b6f3f0e-8c1e-4c1a-9f0e-1f2a3b4c5d6e";

fn insulin_record() -> serde_json::Value {
    json!({
        "identifier": "INS",
        "accession": "P01308",
        "protein_name": "Insulin",
        "gene_names": ["INS"],
        "gene_symbol": "INS",
        "organism": "Homo sapiens",
        "sequence_length": 110,
        "function": "Insulin decreases blood glucose concentration.",
        "summary": "Insulin decreases blood glucose concentration.",
        "structures": [{
            "id": "4INS",
            "source": "pdb",
            "method": "X-RAY DIFFRACTION",
            "resolution": 1.5,
            "viewer_url": "https://www.rcsb.org/structure/4INS"
        }],
        "sources": ["uniprot", "pdb"]
    })
}

fn failures() -> serde_json::Value {
    json!([{ "source": "string", "kind": "timeout", "message": "no response within 10s" }])
}

fn amino() -> Command {
    let mut cmd = Command::cargo_bin("amino").unwrap();
    cmd.env("NO_COLOR", "1").env_remove("AMINO_SERVER_URL");
    cmd
}

#[tokio::test]
async fn test_lookup_records_search_and_prints_record() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/api/v1/searches"))
        .and(body_json(json!({ "query": "INS" })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "success": true,
            "data": {
                "record": insulin_record(),
                "failures": failures(),
                "search_id": SEARCH_ID,
                "warnings": []
            }
        })))
        .expect(1)
        .mount(&mock_server)
        .await;

    amino()
        .args(["lookup", "INS", "--server-url", &mock_server.uri()])
        .assert()
        .success()
        .stdout(predicate::str::contains("Insulin (INS)"))
        .stdout(predicate::str::contains("P01308"))
        .stdout(predicate::str::contains("4INS"))
        .stdout(predicate::str::contains("Unavailable: STRING (timeout: no response within 10s)"))
        .stdout(predicate::str::contains(format!("Saved as search {}", SEARCH_ID)));
}

#[tokio::test]
async fn test_lookup_json_format() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/api/v1/searches"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "success": true,
            "data": {
                "record": insulin_record(),
                "failures": [],
                "search_id": SEARCH_ID,
                "warnings": []
            }
        })))
        .mount(&mock_server)
        .await;

    let output = amino()
        .args(["lookup", "INS", "--format", "json", "--server-url", &mock_server.uri()])
        .output()
        .unwrap();

    assert!(output.status.success());
    let body: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(body["search_id"], SEARCH_ID);
    assert_eq!(body["record"]["accession"], "P01308");
    assert_eq!(body["record"]["sources"], json!(["uniprot", "pdb"]));
}

#[tokio::test]
async fn test_lookup_no_save_uses_protein_endpoint() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/v1/proteins/tumor%20protein%20p53"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "success": true,
            "data": {
                "record": {
                    "identifier": "tumor protein p53",
                    "protein_name": "Cellular tumor antigen p53",
                    "gene_names": ["TP53"],
                    "gene_symbol": "TP53",
                    "sources": ["uniprot"]
                },
                "failures": []
            }
        })))
        .expect(1)
        .mount(&mock_server)
        .await;

    Mock::given(method("POST"))
        .and(path("/api/v1/searches"))
        .respond_with(ResponseTemplate::new(500))
        .expect(0)
        .mount(&mock_server)
        .await;

    amino()
        .args(["lookup", "tumor", "protein", "p53", "--no-save", "--server-url", &mock_server.uri()])
        .assert()
        .success()
        .stdout(predicate::str::contains("Cellular tumor antigen p53 (TP53)"))
        .stdout(predicate::str::contains("Saved as search").not());
}

#[tokio::test]
async fn test_lookup_reports_unsaved_search() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/api/v1/searches"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "success": true,
            "data": {
                "record": { "identifier": "ZNF999" },
                "failures": [],
                "warnings": ["Search could not be saved to history: database unavailable"]
            }
        })))
        .mount(&mock_server)
        .await;

    amino()
        .args(["lookup", "ZNF999", "--server-url", &mock_server.uri()])
        .assert()
        .success()
        .stdout(predicate::str::contains("No source returned data for 'ZNF999'."))
        .stderr(predicate::str::contains("Search could not be saved to history"));
}

#[test]
fn test_lookup_rejects_invalid_identifier_locally() {
    // Nothing listens on port 1; the identifier must be rejected first
    amino()
        .args(["lookup", "INS;DROP", "--server-url", "http://127.0.0.1:1"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("character ';' is not allowed"));
}

#[test]
fn test_lookup_rejects_dot_segment_identifier() {
    amino()
        .args(["lookup", "..", "--no-save", "--server-url", "http://127.0.0.1:1"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("identifier must contain a letter or digit"));
}

#[tokio::test]
async fn test_lookup_server_validation_error() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/api/v1/searches"))
        .respond_with(ResponseTemplate::new(400).set_body_json(json!({
            "success": false,
            "error": { "code": "VALIDATION_ERROR", "message": "identifier is too long" }
        })))
        .mount(&mock_server)
        .await;

    amino()
        .args(["lookup", "INS", "--server-url", &mock_server.uri()])
        .assert()
        .failure()
        .stderr(predicate::str::contains(
            "Server error (VALIDATION_ERROR): identifier is too long",
        ));
}

#[tokio::test]
async fn test_history_table() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/v1/searches"))
        .and(query_param("page", "2"))
        .and(query_param("per_page", "5"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "success": true,
            "data": [{
                "id": SEARCH_ID,
                "protein_id": "INS",
                "protein_name": "Insulin",
                "gene_names": ["INS"],
                "organism": "Homo sapiens",
                "timestamp": "2026-03-01T12:30:00Z"
            }],
            "meta": {
                "pagination": {
                    "page": 2, "per_page": 5, "total": 6, "pages": 2,
                    "has_next": false, "has_prev": true
                }
            }
        })))
        .mount(&mock_server)
        .await;

    amino()
        .args(["history", "--page", "2", "--per-page", "5", "--server-url", &mock_server.uri()])
        .assert()
        .success()
        .stdout(predicate::str::contains(SEARCH_ID))
        .stdout(predicate::str::contains("Insulin"))
        .stdout(predicate::str::contains("2026-03-01 12:30:00 UTC"))
        .stdout(predicate::str::contains("Page 2/2 (6 searches)"));
}

#[test]
fn test_history_rejects_bad_page_size() {
    amino()
        .args(["history", "--per-page", "500", "--server-url", "http://127.0.0.1:1"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Per page must be between 1 and 100"));
}

#[tokio::test]
async fn test_show_prints_stored_record() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path(format!("/api/v1/searches/{}", SEARCH_ID)))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "success": true,
            "data": {
                "id": SEARCH_ID,
                "protein_id": "INS",
                "protein_name": "Insulin",
                "gene_names": ["INS"],
                "organism": "Homo sapiens",
                "timestamp": "2026-03-01T12:30:00Z",
                "full_data": insulin_record(),
                "summary": "Insulin decreases blood glucose concentration."
            }
        })))
        .mount(&mock_server)
        .await;

    amino()
        .args(["show", SEARCH_ID, "--server-url", &mock_server.uri()])
        .assert()
        .success()
        .stdout(predicate::str::contains(format!("Search {} for 'INS'", SEARCH_ID)))
        .stdout(predicate::str::contains("Insulin (INS)"))
        .stdout(predicate::str::contains("X-RAY DIFFRACTION"));
}

#[tokio::test]
async fn test_show_unknown_search() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path(format!("/api/v1/searches/{}", SEARCH_ID)))
        .respond_with(ResponseTemplate::new(404).set_body_json(json!({
            "success": false,
            "error": { "code": "NOT_FOUND", "message": format!("Search {} not found", SEARCH_ID) }
        })))
        .mount(&mock_server)
        .await;

    amino()
        .args(["show", SEARCH_ID, "--server-url", &mock_server.uri()])
        .assert()
        .failure()
        .stderr(predicate::str::contains(format!("Not found: Search {} not found", SEARCH_ID)));
}

#[test]
fn test_unreachable_server() {
    amino()
        .args(["history", "--server-url", "http://127.0.0.1:1"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Could not reach the Amino server"));
}
