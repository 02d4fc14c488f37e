#![allow(dead_code)]

use async_trait::async_trait;
use axum::{
    body::Body,
    http::{Request, StatusCode},
    Router,
};
use openai_bridge::config::BridgeConfig;
use openai_bridge::prompts::PromptStore;
use openai_bridge::services::providers::{
    CompletionMode, CompletionProvider, CompletionRequest, ModelTier, ProviderError,
    SimulatedProvider,
};
use openai_bridge::startup::{build_router, AppState, Application};
use std::sync::{Arc, Mutex};
use tower::util::ServiceExt;

/// State answering in simulated mode with the built-in prompts.
pub fn simulated_state() -> AppState {
    state_with(Arc::new(SimulatedProvider::new()))
}

pub fn state_with(provider: Arc<dyn CompletionProvider>) -> AppState {
    AppState::new(
        BridgeConfig::simulated("prompts"),
        PromptStore::defaults(),
        provider,
    )
}

pub fn router_with(provider: Arc<dyn CompletionProvider>) -> Router {
    build_router(state_with(provider))
}

/// POST a raw body to `uri` and decode the JSON reply.
pub async fn post_raw(app: Router, uri: &str, body: &str) -> (StatusCode, serde_json::Value) {
    let response = app
        .oneshot(
            Request::builder()
                .method("POST")
                .uri(uri)
                .header("content-type", "application/json")
                .body(Body::from(body.to_string()))
                .unwrap(),
        )
        .await
        .unwrap();

    let status = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    let json = serde_json::from_slice(&bytes).expect("response body is not JSON");
    (status, json)
}

pub async fn post_json(
    app: Router,
    uri: &str,
    body: serde_json::Value,
) -> (StatusCode, serde_json::Value) {
    post_raw(app, uri, &body.to_string()).await
}

/// Provider that records every request and answers with a fixed text.
pub struct RecordingProvider {
    reply: String,
    requests: Mutex<Vec<CompletionRequest>>,
}

impl RecordingProvider {
    pub fn new(reply: &str) -> Arc<Self> {
        Arc::new(Self {
            reply: reply.to_string(),
            requests: Mutex::new(Vec::new()),
        })
    }

    pub fn requests(&self) -> Vec<CompletionRequest> {
        self.requests.lock().unwrap().clone()
    }

    pub fn last_request(&self) -> CompletionRequest {
        self.requests()
            .pop()
            .expect("provider was never called")
    }
}

#[async_trait]
impl CompletionProvider for RecordingProvider {
    async fn complete(&self, request: &CompletionRequest) -> Result<String, ProviderError> {
        self.requests.lock().unwrap().push(request.clone());
        Ok(self.reply.clone())
    }

    fn mode(&self) -> CompletionMode {
        CompletionMode::Live
    }

    fn model_for(&self, _tier: ModelTier) -> &str {
        "recording"
    }
}

/// Provider whose every call fails like an unreachable upstream.
pub struct FailingProvider;

#[async_trait]
impl CompletionProvider for FailingProvider {
    async fn complete(&self, _request: &CompletionRequest) -> Result<String, ProviderError> {
        Err(ProviderError::Network("connection refused".to_string()))
    }

    fn mode(&self) -> CompletionMode {
        CompletionMode::Live
    }

    fn model_for(&self, _tier: ModelTier) -> &str {
        "failing"
    }
}

pub struct TestApp {
    pub http_address: String,
    pub http_port: u16,
}

impl TestApp {
    /// Spawn the bridge on a random port with the given state.
    pub async fn spawn(state: AppState) -> Self {
        let app = Application::with_state(state, 0)
            .await
            .expect("Failed to build test application");

        let http_port = app.http_port();
        let http_address = format!("http://127.0.0.1:{}", http_port);

        tokio::spawn(async move {
            app.run_until_stopped().await.ok();
        });

        // Wait for HTTP server to be ready by polling health endpoint
        let client = reqwest::Client::new();
        let health_url = format!("{}/health", http_address);
        for _ in 0..50 {
            if client.get(&health_url).send().await.is_ok() {
                break;
            }
            tokio::time::sleep(tokio::time::Duration::from_millis(50)).await;
        }

        TestApp {
            http_address,
            http_port,
        }
    }

    pub async fn spawn_simulated() -> Self {
        Self::spawn(simulated_state()).await
    }
}
