//! Integration tests for the JSON API.

#![allow(clippy::unwrap_used)]

use address_book_core::AddressRules;
use address_book_integration_tests::TestApp;
use address_book_web::config::WebConfig;
use axum::http::StatusCode;
use serde_json::json;

// ============================================================================
// Read
// ============================================================================

#[tokio::test]
async fn test_api_info() {
    let app = TestApp::new();
    let resp = app.get("/api").await;

    assert_eq!(resp.status, StatusCode::OK);
    assert_eq!(resp.json()["message"], "Address Book API");
}

#[tokio::test]
async fn test_list_empty() {
    let app = TestApp::new();
    let resp = app.get("/api/addresses").await;

    assert_eq!(resp.status, StatusCode::OK);
    assert_eq!(resp.json(), json!({"addresses": [], "count": 0}));
}

#[tokio::test]
async fn test_list_in_insertion_order() {
    let app = TestApp::new();
    app.seed("1 Congress Ave", "Austin");
    app.seed("2 Beacon St", "Boston");

    let body = app.get("/api/addresses").await.json();
    assert_eq!(body["count"], 2);
    assert_eq!(
        body["addresses"][0],
        json!({
            "id": 1,
            "street": "1 Congress Ave",
            "city": "Austin",
            "state": "TX",
            "zip_code": "78701",
            "country": "USA",
        })
    );
    assert_eq!(body["addresses"][1]["city"], "Boston");
}

#[tokio::test]
async fn test_list_with_query_filters() {
    let app = TestApp::new();
    app.seed("1 Congress Ave", "Austin");
    app.seed("2 Beacon St", "Boston");
    app.seed("3 Lamar Blvd", "Austin West");

    let body = app.get("/api/addresses?q=AUSTIN").await.json();
    assert_eq!(body["count"], 2);
    assert_eq!(body["addresses"][0]["id"], 1);
    assert_eq!(body["addresses"][1]["id"], 3);

    let body = app.get("/api/addresses?q=xyz123").await.json();
    assert_eq!(body["count"], 0);
}

#[tokio::test]
async fn test_show_address() {
    let app = TestApp::new();
    let record = app.seed("1 Congress Ave", "Austin");

    let resp = app.get(&format!("/api/addresses/{}", record.id())).await;
    assert_eq!(resp.status, StatusCode::OK);
    assert_eq!(resp.json()["street"], "1 Congress Ave");
}

#[tokio::test]
async fn test_show_missing_or_malformed_is_not_found() {
    let app = TestApp::new();
    app.seed("1 Congress Ave", "Austin");

    for id in ["99", "0", "-1", "abc"] {
        let resp = app.get(&format!("/api/addresses/{id}")).await;
        assert_eq!(resp.status, StatusCode::NOT_FOUND, "id {id}");
        assert!(resp.json()["error"].as_str().unwrap().contains(id));
    }
}

// ============================================================================
// Create
// ============================================================================

#[tokio::test]
async fn test_create_returns_record_with_id() {
    let app = TestApp::new();
    let resp = app
        .post_json(
            "/api/addresses",
            &json!({
                "street": "742 Evergreen Terrace",
                "city": "Springfield",
                "state": "IL",
                "zip_code": "62701",
            }),
        )
        .await;

    assert_eq!(resp.status, StatusCode::CREATED);
    let body = resp.json();
    assert_eq!(body["message"], "Address created");
    assert_eq!(body["address"]["id"], 1);
    assert_eq!(body["address"]["country"], "USA");
    assert_eq!(app.store.len(), 1);
}

#[tokio::test]
async fn test_create_accepts_legacy_field_names() {
    let app = TestApp::new();
    let resp = app
        .post_json(
            "/api/addresses",
            &json!({
                "street_address": "1 Rue de Rivoli",
                "city": "Paris",
                "state": "IDF",
                "postal_code": "75001",
                "country": "France",
            }),
        )
        .await;

    assert_eq!(resp.status, StatusCode::CREATED);
    assert_eq!(resp.json()["address"]["zip_code"], "75001");
}

#[tokio::test]
async fn test_create_invalid_lists_every_field() {
    let app = TestApp::new();
    let resp = app
        .post_json(
            "/api/addresses",
            &json!({"street": "", "city": "Austin", "state": "", "zip_code": "!!"}),
        )
        .await;

    assert_eq!(resp.status, StatusCode::UNPROCESSABLE_ENTITY);
    let body = resp.json();
    let fields: Vec<&str> = body["fields"]
        .as_array()
        .unwrap()
        .iter()
        .map(|f| f["field"].as_str().unwrap())
        .collect();
    assert_eq!(fields, vec!["street", "state", "zip_code"]);
    assert!(app.store.is_empty());
}

#[tokio::test]
async fn test_create_respects_configured_min_lengths() {
    let app = TestApp::with_config(WebConfig {
        address_rules: AddressRules {
            min_street_len: 6,
            ..AddressRules::default()
        },
        ..WebConfig::default()
    });

    let resp = app
        .post_json(
            "/api/addresses",
            &json!({"street": "1 Elm", "city": "Austin", "state": "TX", "zip_code": "78701"}),
        )
        .await;

    assert_eq!(resp.status, StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(
        resp.json()["fields"][0]["message"],
        "street must be at least 6 characters"
    );
}

#[tokio::test]
async fn test_create_malformed_json_is_bad_request() {
    let app = TestApp::new();
    let resp = app
        .send(
            axum::http::Request::builder()
                .method("POST")
                .uri("/api/addresses")
                .header("content-type", "application/json")
                .body(axum::body::Body::from("{not json"))
                .unwrap(),
        )
        .await;

    assert_eq!(resp.status, StatusCode::BAD_REQUEST);
    assert!(resp.json()["error"].as_str().unwrap().starts_with("Bad request"));
    assert!(app.store.is_empty());
}

#[tokio::test]
async fn test_ids_not_reused_across_api_and_deletes() {
    let app = TestApp::new();
    let body = json!({"street": "1 Main St", "city": "Austin", "state": "TX", "zip_code": "78701"});

    let first = app.post_json("/api/addresses", &body).await.json();
    assert_eq!(first["address"]["id"], 1);

    let resp = app.delete("/address/1").await;
    assert_eq!(resp.status, StatusCode::OK);

    let second = app.post_json("/api/addresses", &body).await.json();
    assert_eq!(second["address"]["id"], 2);
}

#[tokio::test]
async fn test_concurrent_api_creates() {
    const N: usize = 25;
    let app = std::sync::Arc::new(TestApp::new());

    let mut handles = Vec::new();
    for i in 0..N {
        let app = std::sync::Arc::clone(&app);
        handles.push(tokio::spawn(async move {
            let body = json!({
                "street": format!("{i} Main St"),
                "city": "Austin",
                "state": "TX",
                "zip_code": "78701",
            });
            app.post_json("/api/addresses", &body).await.status
        }));
    }
    for handle in handles {
        assert_eq!(handle.await.unwrap(), StatusCode::CREATED);
    }

    let mut ids: Vec<i64> = app
        .store
        .list_all()
        .iter()
        .map(|r| r.id().as_i64())
        .collect();
    ids.sort_unstable();
    assert_eq!(ids, (1..=i64::try_from(N).unwrap()).collect::<Vec<_>>());
}

#[tokio::test]
async fn test_create_stores_fields_as_submitted() {
    let app = TestApp::new();
    let resp = app
        .post_json(
            "/api/addresses",
            &json!({"street": " 1 Main St", "city": "Austin ", "state": "TX", "zip_code": "78701"}),
        )
        .await;
    assert_eq!(resp.status, StatusCode::CREATED);

    let body = app.get("/api/addresses/1").await.json();
    assert_eq!(body["street"], " 1 Main St");
    assert_eq!(body["city"], "Austin ");
}
