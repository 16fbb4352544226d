use ai_llm_service::{LlmModelConfig, OpenAiService, config_openai_from_env};
use answer_resolver::AnswerResolver;
use tracing::info;

use crate::error_handler::AppResult;

/// Shared state for all HTTP handlers. Read-only after startup.
#[derive(Debug)]
pub struct AppState {
    /// Chooses between the remote model and offline answers.
    pub resolver: AnswerResolver,
}

impl AppState {
    pub fn new(resolver: AnswerResolver) -> Self {
        Self { resolver }
    }

    /// Builds state from an explicit model config.
    ///
    /// A config without an API key is a normal offline setup, not an error.
    pub fn from_config(cfg: LlmModelConfig) -> AppResult<Self> {
        let remote = if cfg.is_remote_enabled() {
            Some(OpenAiService::new(cfg)?)
        } else {
            info!("OPENAI_API_KEY not set; answering from offline rules only");
            None
        };
        Ok(Self::new(AnswerResolver::new(remote)))
    }

    /// Load shared state from environment variables.
    pub fn from_env() -> AppResult<Self> {
        Self::from_config(config_openai_from_env()?)
    }
}
