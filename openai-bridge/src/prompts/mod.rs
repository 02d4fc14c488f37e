//! System prompts keyed by name.
//!
//! The store is built once at startup from a directory of `*.json` files and
//! shared read-only through the application state.

use serde::Deserialize;
use std::collections::HashMap;
use std::fs;
use std::path::Path;

pub const QUERY_PROMPT_PREFIX: &str = "immigration_query";
pub const DEFAULT_LANGUAGE: &str = "es";
pub const DOCUMENT_ENHANCEMENT: &str = "document_enhancement";
pub const CASE_ANALYSIS: &str = "case_analysis";

/// A system-role instruction for the model.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Prompt {
    #[serde(default = "default_role")]
    pub role: String,
    pub content: String,
}

fn default_role() -> String {
    "system".to_string()
}

impl Prompt {
    pub fn system(content: impl Into<String>) -> Self {
        Self {
            role: default_role(),
            content: content.into(),
        }
    }
}

/// Key of the general query prompt for `language`.
pub fn query_prompt_key(language: &str) -> String {
    format!("{}_{}", QUERY_PROMPT_PREFIX, language)
}

#[derive(Debug, Clone, Default)]
pub struct PromptStore {
    prompts: HashMap<String, Prompt>,
}

impl PromptStore {
    /// Load every `*.json` file in `dir`, keyed by file stem.
    ///
    /// Unreadable or malformed files are logged and skipped. A missing
    /// directory installs [`PromptStore::defaults`].
    pub fn load(dir: &Path) -> Self {
        if !dir.is_dir() {
            tracing::warn!(
                dir = %dir.display(),
                "Prompt directory not found, installing default prompts"
            );
            return Self::defaults();
        }

        let entries = match fs::read_dir(dir) {
            Ok(entries) => entries,
            Err(e) => {
                tracing::error!(dir = %dir.display(), error = %e, "Failed to read prompt directory");
                return Self::default();
            }
        };

        let mut prompts = HashMap::new();
        for entry in entries.flatten() {
            let path = entry.path();
            if path.extension().and_then(|ext| ext.to_str()) != Some("json") {
                continue;
            }
            let Some(name) = path.file_stem().and_then(|stem| stem.to_str()) else {
                continue;
            };

            match read_prompt(&path) {
                Ok(prompt) => {
                    tracing::info!(prompt = name, "Loaded prompt");
                    prompts.insert(name.to_string(), prompt);
                }
                Err(e) => {
                    tracing::error!(file = %path.display(), error = %e, "Failed to load prompt");
                }
            }
        }

        Self { prompts }
    }

    /// The built-in prompt set used when no prompt directory exists.
    pub fn defaults() -> Self {
        let prompts = [
            (
                query_prompt_key("es"),
                "Eres un experto en leyes de inmigración de Estados Unidos.",
            ),
            (
                query_prompt_key("en"),
                "You are an expert in U.S. immigration law.",
            ),
            (
                DOCUMENT_ENHANCEMENT.to_string(),
                "Eres un abogado de inmigración experto en redacción de documentos legales.",
            ),
            (
                CASE_ANALYSIS.to_string(),
                "Eres un abogado de inmigración especializado en analizar casos complejos. \
                 Organiza tu respuesta en estas secciones, cada una con su título en una \
                 línea propia y separadas por una línea en blanco: EVALUACIÓN GENERAL, \
                 OPCIONES LEGALES, ANÁLISIS DE RIESGOS, ESTRATEGIA RECOMENDADA, \
                 PASOS PRÁCTICOS. No uses líneas en blanco dentro de una sección.",
            ),
        ]
        .into_iter()
        .map(|(name, content)| (name, Prompt::system(content)))
        .collect();

        Self { prompts }
    }

    pub fn from_prompts(prompts: impl IntoIterator<Item = (String, Prompt)>) -> Self {
        Self {
            prompts: prompts.into_iter().collect(),
        }
    }

    pub fn get(&self, name: &str) -> Option<&Prompt> {
        self.prompts.get(name)
    }

    pub fn get_or_default(&self, name: &str, fallback: &str) -> Prompt {
        self.get(name)
            .cloned()
            .unwrap_or_else(|| Prompt::system(fallback))
    }

    pub fn contains(&self, name: &str) -> bool {
        self.prompts.contains_key(name)
    }

    /// Resolve the query prompt key for `language`, falling back to the
    /// default language when no prompt exists for it.
    pub fn query_key_for(&self, language: &str) -> String {
        let key = query_prompt_key(language);
        if self.contains(&key) {
            key
        } else {
            tracing::debug!(language, "No query prompt for language, using default");
            query_prompt_key(DEFAULT_LANGUAGE)
        }
    }

    pub fn len(&self) -> usize {
        self.prompts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.prompts.is_empty()
    }
}

fn read_prompt(path: &Path) -> anyhow::Result<Prompt> {
    let raw = fs::read_to_string(path)?;
    Ok(serde_json::from_str(&raw)?)
}
