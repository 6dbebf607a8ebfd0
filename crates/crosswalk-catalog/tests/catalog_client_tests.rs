//! Contract tests for the catalog client against wiremock servers:
//! token lifecycle (login count assertions), bearer injection, hard
//! failure on non-2xx, and questionnaire-shape fallback.

use crosswalk_catalog::{CatalogClient, CatalogConfig, CatalogError};
use crosswalk_core::ProductId;
use wiremock::matchers::{body_json, header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn test_client(server: &MockServer) -> CatalogClient {
    let config = CatalogConfig::new(
        server.uri().parse().unwrap(),
        "svc@example.com",
        zeroize::Zeroizing::new("hunter2".into()),
    );
    CatalogClient::new(config).expect("client build")
}

async fn mount_login(server: &MockServer, token: &str, expires_in: i64, expected_calls: u64) {
    Mock::given(method("POST"))
        .and(path("/login"))
        .and(body_json(serde_json::json!({
            "email": "svc@example.com",
            "password": "hunter2",
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "token": token,
            "expires_in": expires_in,
        })))
        .expect(expected_calls)
        .mount(server)
        .await;
}

#[tokio::test]
async fn valid_token_triggers_exactly_one_login() {
    let server = MockServer::start().await;
    // expires_in 3600 → fresh for ~59 minutes after the margin.
    mount_login(&server, "tok-1", 3600, 1).await;

    Mock::given(method("GET"))
        .and(path("/products/"))
        .and(header("Authorization", "Bearer tok-1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!([])))
        .expect(2)
        .mount(&server)
        .await;

    let client = test_client(&server);
    client.list_products().await.expect("first call");
    client.list_products().await.expect("second call");
    // Mock expectations verify: one login, two product calls.
}

#[tokio::test]
async fn stale_token_is_refreshed_before_next_call() {
    let server = MockServer::start().await;
    // expires_in 60 collapses to zero after the 60 s margin, so the
    // token is stale the moment it is stored — every call re-logs-in.
    mount_login(&server, "tok-short", 60, 2).await;

    Mock::given(method("GET"))
        .and(path("/products/"))
        .and(header("Authorization", "Bearer tok-short"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!([])))
        .expect(2)
        .mount(&server)
        .await;

    let client = test_client(&server);
    client.list_products().await.expect("first call");
    client.list_products().await.expect("second call");
}

#[tokio::test]
async fn post_json_sends_bearer_and_body() {
    let server = MockServer::start().await;
    mount_login(&server, "tok-1", 3600, 1).await;

    Mock::given(method("POST"))
        .and(path("/products/request-access/"))
        .and(header("Authorization", "Bearer tok-1"))
        .and(body_json(serde_json::json!({"product_id": "prod-7"})))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "status": "pending"
        })))
        .expect(1)
        .mount(&server)
        .await;

    let client = test_client(&server);
    let resp: serde_json::Value = client
        .post_json(
            "/products/request-access/",
            &serde_json::json!({"product_id": "prod-7"}),
        )
        .await
        .expect("post");
    assert_eq!(resp["status"], "pending");
}

#[tokio::test]
async fn login_without_token_field_is_fatal() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/login"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "message": "welcome"
        })))
        .mount(&server)
        .await;

    let client = test_client(&server);
    let err = client.list_products().await.unwrap_err();
    assert!(matches!(err, CatalogError::MissingToken), "got {err:?}");
}

#[tokio::test]
async fn login_rejection_propagates_status_and_body() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/login"))
        .respond_with(ResponseTemplate::new(401).set_body_string("bad credentials"))
        .mount(&server)
        .await;

    let client = test_client(&server);
    match client.list_products().await.unwrap_err() {
        CatalogError::Api { status, body, .. } => {
            assert_eq!(status, 401);
            assert_eq!(body, "bad credentials");
        }
        other => panic!("expected Api error, got {other:?}"),
    }
}

#[tokio::test]
async fn non_2xx_catalog_response_is_a_hard_failure() {
    let server = MockServer::start().await;
    mount_login(&server, "tok-1", 3600, 1).await;

    Mock::given(method("GET"))
        .and(path("/products/"))
        .respond_with(ResponseTemplate::new(500).set_body_string("boom"))
        .mount(&server)
        .await;

    let client = test_client(&server);
    match client.list_products().await.unwrap_err() {
        CatalogError::Api { status, .. } => assert_eq!(status, 500),
        other => panic!("expected Api error, got {other:?}"),
    }
}

#[tokio::test]
async fn fetch_controls_uses_nested_shape_when_present() {
    let server = MockServer::start().await;
    mount_login(&server, "tok-1", 3600, 1).await;

    let pid = ProductId::new();
    let cid = uuid::Uuid::new_v4();

    Mock::given(method("GET"))
        .and(path(format!("/products/{pid}/")))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "questionnaire": [{
                "question": "Encryption",
                "children": [
                    {"id": cid.to_string(), "question": "Data encrypted at rest", "type": "boolean"}
                ]
            }]
        })))
        .expect(1)
        .mount(&server)
        .await;

    let client = test_client(&server);
    let controls = client.fetch_controls(pid).await.expect("fetch");
    assert_eq!(controls.len(), 1);
    assert_eq!(controls[0].text, "Data encrypted at rest");
    assert_eq!(controls[0].product_id, pid);
    // The flat endpoint must not be consulted; no mock exists for it.
}

#[tokio::test]
async fn fetch_controls_falls_back_to_flat_shape() {
    let server = MockServer::start().await;
    mount_login(&server, "tok-1", 3600, 1).await;

    let pid = ProductId::new();
    let cid = uuid::Uuid::new_v4();

    Mock::given(method("GET"))
        .and(path(format!("/products/{pid}/")))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({})))
        .expect(1)
        .mount(&server)
        .await;

    Mock::given(method("GET"))
        .and(path(format!("/products/{pid}/questionnaire/")))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!([
            {"id": cid.to_string(), "text": "MFA required", "metadata": {"tier": 1}}
        ])))
        .expect(1)
        .mount(&server)
        .await;

    let client = test_client(&server);
    let controls = client.fetch_controls(pid).await.expect("fetch");
    assert_eq!(controls.len(), 1);
    assert_eq!(controls[0].text, "MFA required");
    assert_eq!(controls[0].metadata["tier"], 1);
}

#[tokio::test]
async fn fetch_controls_survives_a_missing_detail_endpoint() {
    let server = MockServer::start().await;
    mount_login(&server, "tok-1", 3600, 1).await;

    let pid = ProductId::new();
    let cid = uuid::Uuid::new_v4();

    // Flat-shape-only deployment: the nested endpoint does not exist.
    Mock::given(method("GET"))
        .and(path(format!("/products/{pid}/")))
        .respond_with(ResponseTemplate::new(404).set_body_string("not found"))
        .expect(1)
        .mount(&server)
        .await;

    Mock::given(method("GET"))
        .and(path(format!("/products/{pid}/questionnaire/")))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!([
            {"id": cid.to_string(), "text": "Password policy"}
        ])))
        .expect(1)
        .mount(&server)
        .await;

    let client = test_client(&server);
    let controls = client.fetch_controls(pid).await.expect("fetch");
    assert_eq!(controls.len(), 1);
    assert_eq!(controls[0].text, "Password policy");
}

#[tokio::test]
async fn fetch_controls_treats_flat_404_as_empty() {
    let server = MockServer::start().await;
    mount_login(&server, "tok-1", 3600, 1).await;

    let pid = ProductId::new();

    Mock::given(method("GET"))
        .and(path(format!("/products/{pid}/")))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({})))
        .mount(&server)
        .await;

    Mock::given(method("GET"))
        .and(path(format!("/products/{pid}/questionnaire/")))
        .respond_with(ResponseTemplate::new(404).set_body_string("no questionnaire"))
        .mount(&server)
        .await;

    let client = test_client(&server);
    let controls = client.fetch_controls(pid).await.expect("fetch");
    assert!(controls.is_empty());
}
