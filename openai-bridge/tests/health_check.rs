mod common;

use common::TestApp;
use reqwest::Client;

#[tokio::test]
async fn health_check_returns_status_and_version() {
    let app = TestApp::spawn_simulated().await;
    let client = Client::new();

    let response = client
        .get(format!("{}/health", app.http_address))
        .send()
        .await
        .expect("Failed to execute request");

    assert!(response.status().is_success());

    let body: serde_json::Value = response.json().await.expect("Failed to parse JSON");
    assert_eq!(body, serde_json::json!({"status": "ok", "version": "1.0.0"}));
}

#[tokio::test]
async fn responses_carry_request_id() {
    let app = TestApp::spawn_simulated().await;
    let client = Client::new();

    let response = client
        .get(format!("{}/health", app.http_address))
        .header("x-request-id", "req-42")
        .send()
        .await
        .expect("Failed to execute request");

    assert_eq!(
        response.headers().get("x-request-id").unwrap(),
        "req-42"
    );
    assert_eq!(
        response.headers().get("x-content-type-options").unwrap(),
        "nosniff"
    );
}

#[tokio::test]
async fn metrics_endpoint_returns_prometheus_format() {
    let app = TestApp::spawn_simulated().await;
    let client = Client::new();

    client
        .post(format!("{}/api/query", app.http_address))
        .json(&serde_json::json!({"query": "¿Qué es el asilo?"}))
        .send()
        .await
        .expect("Failed to execute request");

    let response = client
        .get(format!("{}/metrics", app.http_address))
        .send()
        .await
        .expect("Failed to execute request");

    assert!(response.status().is_success());

    let content_type = response
        .headers()
        .get("content-type")
        .expect("Missing content-type header")
        .to_str()
        .expect("Invalid content-type");
    assert!(content_type.starts_with("text/plain"));

    let body = response.text().await.expect("Failed to get response body");
    assert!(body.contains("bridge_requests_total"));
    assert!(body.contains("/api/query"));
}

#[tokio::test]
async fn unknown_route_is_not_found() {
    let app = TestApp::spawn_simulated().await;

    let response = Client::new()
        .get(format!("{}/api/unknown", app.http_address))
        .send()
        .await
        .expect("Failed to execute request");

    assert_eq!(response.status().as_u16(), 404);
}
