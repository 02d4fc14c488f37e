use axum::{extract::State, Json};
use service_core::error::AppError;
use service_core::utils::ValidatedJson;

use super::complete;
use crate::dtos::{EnhanceDocumentRequest, EnhanceDocumentResponse, SOURCE};
use crate::prompts::DOCUMENT_ENHANCEMENT;
use crate::services::providers::{CompletionParams, CompletionRequest, ModelTier, SimulatedReply};
use crate::startup::AppState;

const ENDPOINT: &str = "documents";

const FALLBACK_PROMPT: &str = "Eres un experto en redacción de documentos legales de inmigración.";

const PARAMS: CompletionParams = CompletionParams {
    tier: ModelTier::LongForm,
    max_tokens: 4000,
    temperature: 0.5,
};

/// User message asking the model to rewrite `req.document`.
pub fn build_enhancement_prompt(req: &EnhanceDocumentRequest) -> String {
    format!(
        "TIPO DE DOCUMENTO: {}\nENFOQUE: {}\n\nDOCUMENTO ORIGINAL:\n{}\n\n\
         Por favor, mejora este documento legal manteniendo todos los hechos exactamente \
         como se presentan, pero mejorando su estructura, persuasividad, precisión legal, \
         claridad y profesionalismo.",
        req.document_type, req.focus, req.document
    )
}

/// Rewrite a legal document for structure and clarity.
#[tracing::instrument(skip(state, req), fields(document_type = %req.document_type))]
pub async fn enhance_document_impl(
    state: &AppState,
    req: EnhanceDocumentRequest,
) -> Result<EnhanceDocumentResponse, AppError> {
    let system_prompt = state
        .prompts
        .get_or_default(DOCUMENT_ENHANCEMENT, FALLBACK_PROMPT);

    tracing::info!(
        chars = req.document.chars().count(),
        "Processing document enhancement"
    );

    let request = CompletionRequest {
        system_prompt: system_prompt.content,
        user_prompt: build_enhancement_prompt(&req),
        params: PARAMS,
        simulated: SimulatedReply::EnhancedDocument {
            document: req.document,
            document_type: req.document_type,
        },
    };

    let enhanced = complete(state, ENDPOINT, &request).await?;

    tracing::info!(chars = enhanced.chars().count(), "Document enhanced");

    Ok(EnhanceDocumentResponse {
        enhanced_document: enhanced,
        source: SOURCE,
    })
}

/// POST /api/documents/enhance
pub async fn enhance_document(
    State(state): State<AppState>,
    ValidatedJson(req): ValidatedJson<EnhanceDocumentRequest>,
) -> Result<Json<EnhanceDocumentResponse>, AppError> {
    enhance_document_impl(&state, req).await.map(Json)
}
