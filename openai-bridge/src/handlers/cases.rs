use axum::{extract::State, Json};
use service_core::error::AppError;
use service_core::utils::ValidatedJson;

use super::complete;
use crate::dtos::{AnalyzeCaseRequest, AnalyzeCaseResponse, SOURCE};
use crate::prompts::CASE_ANALYSIS;
use crate::services::providers::{CompletionParams, CompletionRequest, ModelTier, SimulatedReply};
use crate::services::sections::extract_case_sections;
use crate::startup::AppState;

const ENDPOINT: &str = "cases";

const FALLBACK_PROMPT: &str =
    "Eres un abogado de inmigración especializado en analizar casos complejos.";

const PARAMS: CompletionParams = CompletionParams {
    tier: ModelTier::LongForm,
    max_tokens: 3000,
    temperature: 0.5,
};

pub fn build_case_prompt(case_details: &str) -> String {
    format!(
        "DETALLES DEL CASO:\n{}\n\n\
         Por favor, proporciona un análisis detallado de este caso de inmigración.",
        case_details
    )
}

/// Analyze a case and split the analysis into its standard sections.
#[tracing::instrument(skip(state, req))]
pub async fn analyze_case_impl(
    state: &AppState,
    req: AnalyzeCaseRequest,
) -> Result<AnalyzeCaseResponse, AppError> {
    let system_prompt = state.prompts.get_or_default(CASE_ANALYSIS, FALLBACK_PROMPT);

    tracing::info!(
        chars = req.case_details.chars().count(),
        "Analyzing case"
    );

    let request = CompletionRequest {
        system_prompt: system_prompt.content,
        user_prompt: build_case_prompt(&req.case_details),
        params: PARAMS,
        simulated: SimulatedReply::CaseAnalysis,
    };

    let analysis = complete(state, ENDPOINT, &request).await?;

    tracing::info!(chars = analysis.chars().count(), "Case analysis generated");

    let sections = extract_case_sections(&analysis);

    Ok(AnalyzeCaseResponse {
        full_analysis: analysis,
        sections,
        source: SOURCE,
    })
}

/// POST /api/cases/analyze
pub async fn analyze_case(
    State(state): State<AppState>,
    ValidatedJson(req): ValidatedJson<AnalyzeCaseRequest>,
) -> Result<Json<AnalyzeCaseResponse>, AppError> {
    analyze_case_impl(&state, req).await.map(Json)
}
