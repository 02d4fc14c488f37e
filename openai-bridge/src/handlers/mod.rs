//! HTTP handlers for the bridge.
//!
//! Each business endpoint has an `*_impl` function holding the logic and
//! returning `Result<_, AppError>`, plus a thin axum adapter.

pub mod cases;
pub mod documents;
pub mod health;
pub mod query;

use crate::services::metrics;
use crate::services::providers::{CompletionMode, CompletionRequest};
use crate::startup::AppState;
use service_core::error::AppError;
use std::time::Instant;

pub use cases::{analyze_case, analyze_case_impl};
pub use documents::{enhance_document, enhance_document_impl};
pub use health::{health_check, metrics_endpoint};
pub use query::{process_query, process_query_impl};

/// Run a completion for `endpoint`, recording latency and errors.
pub(crate) async fn complete(
    state: &AppState,
    endpoint: &'static str,
    request: &CompletionRequest,
) -> Result<String, AppError> {
    let provider = &state.completions;
    let mode = provider.mode();
    if mode == CompletionMode::Simulated {
        tracing::warn!(endpoint, "Using simulated response (no API key configured)");
    }

    let started = Instant::now();
    let result = provider.complete(request).await;
    metrics::record_completion_latency(endpoint, mode.as_str(), started.elapsed().as_secs_f64());

    result.map_err(|e| {
        metrics::record_completion_error(endpoint, e.kind());
        tracing::error!(
            endpoint,
            model = %provider.model_for(request.params.tier),
            error = %e,
            "Completion failed"
        );
        AppError::from(e)
    })
}

/// First `max_chars` characters of `text`, for log lines.
pub(crate) fn preview(text: &str, max_chars: usize) -> &str {
    match text.char_indices().nth(max_chars) {
        Some((idx, _)) => &text[..idx],
        None => text,
    }
}
