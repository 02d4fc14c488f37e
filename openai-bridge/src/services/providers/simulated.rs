//! Placeholder provider used when no OpenAI credential is configured.

use super::{
    CompletionMode, CompletionProvider, CompletionRequest, ModelTier, ProviderError,
    SimulatedReply,
};
use async_trait::async_trait;

/// Produces fixed, deterministic replies without any network access.
#[derive(Debug, Clone, Copy, Default)]
pub struct SimulatedProvider;

impl SimulatedProvider {
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl CompletionProvider for SimulatedProvider {
    async fn complete(&self, request: &CompletionRequest) -> Result<String, ProviderError> {
        Ok(render(&request.simulated))
    }

    fn mode(&self) -> CompletionMode {
        CompletionMode::Simulated
    }

    fn model_for(&self, _tier: ModelTier) -> &str {
        "simulated"
    }
}

fn render(reply: &SimulatedReply) -> String {
    match reply {
        SimulatedReply::QueryAnswer { query } => format!(
            "Esta es una respuesta simulada a su consulta sobre inmigración: '{}'\n\n\
             1. Este es el primer punto importante sobre el tema.\n\
             2. Este es el segundo punto a considerar.\n\n\
             Recuerde que esta información es educativa y no constituye asesoramiento legal.",
            query
        ),
        SimulatedReply::EnhancedDocument {
            document,
            document_type,
        } => {
            let enhanced = format!("[Documento mejorado de tipo {}]\n\n{}", document_type, document)
                .replace("muy", "extremadamente")
                .replace("bueno", "excelente");
            format!("{}\n\n[Fin del documento mejorado]", enhanced)
        }
        SimulatedReply::CaseAnalysis => concat!(
            "EVALUACIÓN GENERAL\n",
            "Este caso involucra aspectos importantes de inmigración que requieren análisis detallado.\n\n",
            "OPCIONES LEGALES\n",
            "1. Primera opción legal.\n2. Segunda opción legal.\n\n",
            "ANÁLISIS DE RIESGOS\n",
            "Existen varios riesgos a considerar...\n\n",
            "ESTRATEGIA RECOMENDADA\n",
            "Basado en el análisis, recomendamos...\n\n",
            "PASOS PRÁCTICOS\n",
            "1. Primer paso a seguir.\n2. Segundo paso a seguir."
        )
        .to_string(),
    }
}
