use axum::{extract::State, Json};
use service_core::error::AppError;
use service_core::utils::ValidatedJson;

use super::{complete, preview};
use crate::dtos::{QueryRequest, QueryResponse, QUERY_CONFIDENCE, SOURCE};
use crate::services::providers::{CompletionParams, CompletionRequest, ModelTier, SimulatedReply};
use crate::startup::AppState;

const ENDPOINT: &str = "query";

/// Used when neither the requested nor the default language prompt exists.
const FALLBACK_PROMPT: &str = "Eres un experto en leyes de inmigración.";

const PARAMS: CompletionParams = CompletionParams {
    tier: ModelTier::Query,
    max_tokens: 1000,
    temperature: 0.7,
};

/// Answer a general immigration question.
#[tracing::instrument(skip(state, req), fields(language = %req.language))]
pub async fn process_query_impl(
    state: &AppState,
    req: QueryRequest,
) -> Result<QueryResponse, AppError> {
    let prompt_key = state.prompts.query_key_for(&req.language);
    let system_prompt = state.prompts.get_or_default(&prompt_key, FALLBACK_PROMPT);

    tracing::info!(
        prompt = %prompt_key,
        query = preview(&req.query, 50),
        "Processing query"
    );

    let request = CompletionRequest {
        system_prompt: system_prompt.content,
        user_prompt: req.query.clone(),
        params: PARAMS,
        simulated: SimulatedReply::QueryAnswer { query: req.query },
    };

    let answer = complete(state, ENDPOINT, &request).await?;

    tracing::info!(chars = answer.chars().count(), "Generated query response");

    Ok(QueryResponse {
        response: answer,
        source: SOURCE,
        confidence: QUERY_CONFIDENCE,
    })
}

/// POST /api/query
pub async fn process_query(
    State(state): State<AppState>,
    ValidatedJson(req): ValidatedJson<QueryRequest>,
) -> Result<Json<QueryResponse>, AppError> {
    process_query_impl(&state, req).await.map(Json)
}
