//! Request and response bodies for the HTTP API.

use crate::prompts::DEFAULT_LANGUAGE;
use crate::services::SectionKey;
use serde::{Deserialize, Deserializer, Serialize};
use std::collections::BTreeMap;
use validator::Validate;

/// Value of the `source` field in every successful envelope.
pub const SOURCE: &str = "openai";

/// Confidence reported for general query answers.
pub const QUERY_CONFIDENCE: f64 = 0.9;

fn default_language() -> String {
    DEFAULT_LANGUAGE.to_string()
}

/// An explicit `null` behaves like an absent field.
fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

fn null_as_default_language<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<String>::deserialize(deserializer)?.unwrap_or_else(default_language))
}

// ============================================================================
// Requests
// ============================================================================

/// POST /api/query
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct QueryRequest {
    #[serde(
        default = "default_language",
        deserialize_with = "null_as_default_language"
    )]
    pub language: String,
    #[serde(default, deserialize_with = "null_as_default")]
    #[validate(length(min = 1, message = "Consulta vacía"))]
    pub query: String,
}

/// POST /api/documents/enhance
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct EnhanceDocumentRequest {
    #[serde(default, deserialize_with = "null_as_default")]
    #[validate(length(min = 1, message = "Texto del documento vacío"))]
    pub document: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub document_type: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub focus: String,
}

/// POST /api/cases/analyze
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct AnalyzeCaseRequest {
    #[serde(default, deserialize_with = "null_as_default")]
    #[validate(length(min = 1, message = "Detalles del caso vacíos"))]
    pub case_details: String,
}

// ============================================================================
// Responses
// ============================================================================

#[derive(Debug, Clone, Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub version: &'static str,
}

#[derive(Debug, Clone, Serialize)]
pub struct QueryResponse {
    pub response: String,
    pub source: &'static str,
    pub confidence: f64,
}

#[derive(Debug, Clone, Serialize)]
pub struct EnhanceDocumentResponse {
    pub enhanced_document: String,
    pub source: &'static str,
}

#[derive(Debug, Clone, Serialize)]
pub struct AnalyzeCaseResponse {
    pub full_analysis: String,
    pub sections: BTreeMap<SectionKey, String>,
    pub source: &'static str,
}
