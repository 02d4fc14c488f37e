//! Completion provider abstractions and implementations.
//!
//! Handlers talk to a [`CompletionProvider`]; startup picks the live OpenAI
//! backend when a credential is configured and the simulated one otherwise.

pub mod openai;
pub mod simulated;

use async_trait::async_trait;
use service_core::error::AppError;
use std::fmt;
use thiserror::Error;

pub use openai::{OpenAiConfig, OpenAiProvider};
pub use simulated::SimulatedProvider;

/// Error type for provider operations.
#[derive(Error, Debug)]
pub enum ProviderError {
    #[error("Provider not configured: {0}")]
    NotConfigured(String),

    #[error("OpenAI API error {status}: {message}")]
    Api { status: u16, message: String },

    #[error("Rate limited by OpenAI API")]
    RateLimited,

    #[error("Network error: {0}")]
    Network(String),

    #[error("Malformed response: {0}")]
    MalformedResponse(String),
}

impl ProviderError {
    /// Short label used for metrics.
    pub fn kind(&self) -> &'static str {
        match self {
            ProviderError::NotConfigured(_) => "not_configured",
            ProviderError::Api { .. } => "api",
            ProviderError::RateLimited => "rate_limited",
            ProviderError::Network(_) => "network",
            ProviderError::MalformedResponse(_) => "malformed_response",
        }
    }
}

impl From<ProviderError> for AppError {
    fn from(err: ProviderError) -> Self {
        AppError::UpstreamError(err.to_string())
    }
}

/// Whether completions come from the real API or are synthesized locally.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CompletionMode {
    Live,
    Simulated,
}

impl CompletionMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            CompletionMode::Live => "live",
            CompletionMode::Simulated => "simulated",
        }
    }
}

impl fmt::Display for CompletionMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Which model family a request should use.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ModelTier {
    /// Short conversational answers.
    Query,
    /// Long documents and analyses.
    LongForm,
}

/// Sampling parameters for a completion.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CompletionParams {
    pub tier: ModelTier,
    pub max_tokens: u32,
    pub temperature: f32,
}

/// Deterministic reply the simulated provider produces for a request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SimulatedReply {
    QueryAnswer { query: String },
    EnhancedDocument {
        document: String,
        document_type: String,
    },
    CaseAnalysis,
}

/// A single chat completion: one system and one user message.
#[derive(Debug, Clone)]
pub struct CompletionRequest {
    pub system_prompt: String,
    pub user_prompt: String,
    pub params: CompletionParams,
    pub simulated: SimulatedReply,
}

/// Trait for chat-completion backends.
#[async_trait]
pub trait CompletionProvider: Send + Sync {
    /// Generate the assistant reply text.
    async fn complete(&self, request: &CompletionRequest) -> Result<String, ProviderError>;

    /// Mode this provider answers in.
    fn mode(&self) -> CompletionMode;

    /// Model name that serves `tier`, for logs and metrics.
    fn model_for(&self, tier: ModelTier) -> &str;
}
