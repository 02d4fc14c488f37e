use serde::Deserialize;
use service_core::config::{self as core_config, get_env, get_optional_env, is_production};
use service_core::error::AppError;
use std::env;
use std::path::{Path, PathBuf};

/// Value shipped in old `.env` templates; treated as "no credential".
pub const PLACEHOLDER_API_KEY: &str = "sk-your-api-key-here";

const DEFAULT_API_BASE: &str = "https://api.openai.com/v1";
const DEFAULT_QUERY_MODEL: &str = "gpt-3.5-turbo";
const DEFAULT_LONG_FORM_MODEL: &str = "gpt-3.5-turbo-16k";
const DEFAULT_PROMPTS_DIR: &str = "prompts";

#[derive(Debug, Clone, Deserialize)]
pub struct BridgeConfig {
    #[serde(flatten)]
    pub common: core_config::Config,
    pub openai: OpenAiConfig,
    pub models: ModelConfig,
    pub prompts: PromptsConfig,
}

#[derive(Debug, Clone, Deserialize)]
pub struct OpenAiConfig {
    /// `None` selects simulated mode.
    pub api_key: Option<String>,
    pub api_base: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ModelConfig {
    /// Model for short answers (`/api/query`).
    pub query_model: String,
    /// Model for document enhancement and case analysis.
    pub long_form_model: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct PromptsConfig {
    pub dir: PathBuf,
}

impl BridgeConfig {
    pub fn load() -> Result<Self, AppError> {
        let common_config = core_config::Config::load()?;
        let is_prod = is_production();

        let api_key = get_optional_env("OPENAI_API_KEY", is_prod)?;

        Ok(BridgeConfig {
            common: common_config,
            openai: OpenAiConfig {
                api_key: normalize_api_key(api_key),
                api_base: get_env("OPENAI_API_BASE", Some(DEFAULT_API_BASE), is_prod)?,
            },
            models: ModelConfig {
                query_model: get_env("OPENAI_QUERY_MODEL", Some(DEFAULT_QUERY_MODEL), is_prod)?,
                long_form_model: get_env(
                    "OPENAI_LONG_FORM_MODEL",
                    Some(DEFAULT_LONG_FORM_MODEL),
                    is_prod,
                )?,
            },
            prompts: PromptsConfig {
                dir: resolve_dir(&get_env("PROMPTS_DIR", Some(DEFAULT_PROMPTS_DIR), is_prod)?),
            },
        })
    }

    /// Configuration for tests and embedding: simulated mode, port 0.
    pub fn simulated(prompts_dir: impl Into<PathBuf>) -> Self {
        BridgeConfig {
            common: core_config::Config { port: 0 },
            openai: OpenAiConfig {
                api_key: None,
                api_base: DEFAULT_API_BASE.to_string(),
            },
            models: ModelConfig {
                query_model: DEFAULT_QUERY_MODEL.to_string(),
                long_form_model: DEFAULT_LONG_FORM_MODEL.to_string(),
            },
            prompts: PromptsConfig {
                dir: prompts_dir.into(),
            },
        }
    }

    /// Whether a usable credential is configured.
    pub fn is_live(&self) -> bool {
        self.openai.api_key.is_some()
    }
}

fn normalize_api_key(api_key: Option<String>) -> Option<String> {
    api_key
        .map(|key| key.trim().to_string())
        .filter(|key| !key.is_empty() && key != PLACEHOLDER_API_KEY)
}

/// Anchor a relative directory at the working directory so logs show
/// exactly where prompts are read from.
fn resolve_dir(dir: impl AsRef<Path>) -> PathBuf {
    let dir = dir.as_ref();
    if dir.is_absolute() {
        return dir.to_path_buf();
    }
    match env::current_dir() {
        Ok(cwd) => cwd.join(dir),
        Err(_) => dir.to_path_buf(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn placeholder_key_counts_as_missing() {
        assert_eq!(normalize_api_key(Some(PLACEHOLDER_API_KEY.to_string())), None);
        assert_eq!(normalize_api_key(Some("   ".to_string())), None);
        assert_eq!(normalize_api_key(None), None);
    }

    #[test]
    fn real_key_is_kept_trimmed() {
        assert_eq!(
            normalize_api_key(Some(" sk-live-123\n".to_string())),
            Some("sk-live-123".to_string())
        );
    }

    #[test]
    fn simulated_config_is_not_live() {
        let config = BridgeConfig::simulated("prompts");
        assert!(!config.is_live());
        assert_eq!(config.common.port, 0);
        assert_eq!(config.models.query_model, "gpt-3.5-turbo");
    }

    #[test]
    fn relative_prompts_dir_is_anchored_at_working_directory() {
        let resolved = resolve_dir(DEFAULT_PROMPTS_DIR);
        assert!(resolved.is_absolute());
        assert_eq!(
            resolved,
            env::current_dir().unwrap().join(DEFAULT_PROMPTS_DIR)
        );

        let absolute = env::temp_dir().join("prompts");
        assert_eq!(resolve_dir(&absolute), absolute);
    }
}
