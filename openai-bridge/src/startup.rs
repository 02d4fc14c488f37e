//! Application startup and lifecycle management.

use crate::config::BridgeConfig;
use crate::handlers::{
    analyze_case, enhance_document, health_check, metrics_endpoint, process_query,
};
use crate::prompts::PromptStore;
use crate::services::metrics;
use crate::services::providers::{
    CompletionProvider, OpenAiConfig, OpenAiProvider, SimulatedProvider,
};
use axum::{
    extract::{MatchedPath, Request},
    middleware::{self, Next},
    response::Response,
    routing::{get, post},
    Router,
};
use service_core::error::AppError;
use service_core::middleware::{request_id_middleware, security_headers_middleware};
use std::future::Future;
use std::net::SocketAddr;
use std::sync::Arc;
use tokio::net::TcpListener;
use tower_http::trace::TraceLayer;

/// Shared application state. Everything in it is read-only after startup.
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<BridgeConfig>,
    pub prompts: Arc<PromptStore>,
    pub completions: Arc<dyn CompletionProvider>,
}

impl AppState {
    pub fn new(
        config: BridgeConfig,
        prompts: PromptStore,
        completions: Arc<dyn CompletionProvider>,
    ) -> Self {
        Self {
            config: Arc::new(config),
            prompts: Arc::new(prompts),
            completions,
        }
    }

    /// Load prompts and pick the completion provider for `config`.
    pub fn from_config(config: BridgeConfig) -> Result<Self, AppError> {
        let prompts = PromptStore::load(&config.prompts.dir);
        tracing::info!(
            dir = %config.prompts.dir.display(),
            count = prompts.len(),
            "Prompt store ready"
        );

        let completions = completion_provider(&config)?;
        tracing::info!(mode = %completions.mode(), "Completion provider ready");

        Ok(Self::new(config, prompts, completions))
    }
}

fn completion_provider(config: &BridgeConfig) -> Result<Arc<dyn CompletionProvider>, AppError> {
    match &config.openai.api_key {
        Some(api_key) => {
            let provider = OpenAiProvider::new(OpenAiConfig {
                api_key: api_key.clone(),
                api_base: config.openai.api_base.clone(),
                query_model: config.models.query_model.clone(),
                long_form_model: config.models.long_form_model.clone(),
            })
            .map_err(|e| AppError::ConfigError(anyhow::anyhow!(e)))?;

            tracing::info!(
                query_model = %config.models.query_model,
                long_form_model = %config.models.long_form_model,
                "Initialized OpenAI provider"
            );
            Ok(Arc::new(provider))
        }
        None => {
            tracing::warn!("OPENAI_API_KEY not configured, answering with simulated responses");
            Ok(Arc::new(SimulatedProvider::new()))
        }
    }
}

/// Count every routed request by matched path and status.
async fn track_requests(req: Request, next: Next) -> Response {
    let endpoint = req
        .extensions()
        .get::<MatchedPath>()
        .map(|path| path.as_str().to_string())
        .unwrap_or_else(|| "unmatched".to_string());

    let response = next.run(req).await;
    metrics::record_request(&endpoint, response.status().as_u16());
    response
}

/// Build the HTTP router for `state`.
pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health_check))
        .route("/metrics", get(metrics_endpoint))
        .route("/api/query", post(process_query))
        .route("/api/documents/enhance", post(enhance_document))
        .route("/api/cases/analyze", post(analyze_case))
        .route_layer(middleware::from_fn(track_requests))
        .layer(TraceLayer::new_for_http())
        .layer(middleware::from_fn(security_headers_middleware))
        .layer(middleware::from_fn(request_id_middleware))
        .with_state(state)
}

/// Application container for managing server lifecycle.
pub struct Application {
    http_port: u16,
    http_listener: TcpListener,
    state: AppState,
}

impl Application {
    /// Build the application with the given configuration.
    pub async fn build(config: BridgeConfig) -> Result<Self, AppError> {
        let port = config.common.port;
        let state = AppState::from_config(config)?;
        Self::with_state(state, port).await
    }

    /// Bind a listener for an already assembled state (port 0 = random port).
    pub async fn with_state(state: AppState, port: u16) -> Result<Self, AppError> {
        metrics::init_metrics();

        let http_addr = SocketAddr::from(([0, 0, 0, 0], port));
        let http_listener = TcpListener::bind(http_addr).await.map_err(|e| {
            tracing::error!("Failed to bind HTTP listener to {}: {}", http_addr, e);
            AppError::from(e)
        })?;
        let http_port = http_listener.local_addr()?.port();

        tracing::info!("OpenAI bridge: HTTP on port {}", http_port);

        Ok(Self {
            http_port,
            http_listener,
            state,
        })
    }

    /// Get the HTTP port the server is listening on.
    pub fn http_port(&self) -> u16 {
        self.http_port
    }

    pub fn state(&self) -> &AppState {
        &self.state
    }

    /// Run the application until stopped.
    pub async fn run_until_stopped(self) -> std::io::Result<()> {
        self.run_with_shutdown(std::future::pending()).await
    }

    /// Run until `shutdown` resolves, then drain in-flight requests.
    pub async fn run_with_shutdown<F>(self, shutdown: F) -> std::io::Result<()>
    where
        F: Future<Output = ()> + Send + 'static,
    {
        let router = build_router(self.state);

        axum::serve(self.http_listener, router)
            .with_graceful_shutdown(shutdown)
            .await
            .map_err(|e| {
                tracing::error!("HTTP server error: {}", e);
                std::io::Error::other(format!("HTTP server error: {}", e))
            })
    }
}
