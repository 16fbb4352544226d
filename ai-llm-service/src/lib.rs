//! Shared LLM client for the portfolio assistant.
//!
//! - [`config`] builds an [`LlmModelConfig`] from environment variables.
//! - [`services::open_ai_service::OpenAiService`] performs one non-streaming
//!   chat completion against any OpenAI-compatible endpoint.
//! - [`error_handler`] holds the unified [`AiLlmError`] type.
//! - [`telemetry`] exposes a tracing layer scoped to this crate.

pub mod config;
pub mod error_handler;
pub mod services;
pub mod telemetry;

pub use config::{default_config::config_openai_from_env, llm_model_config::LlmModelConfig};
pub use error_handler::{AiLlmError, ConfigError, HttpError, ProviderError, ProviderErrorKind};
pub use services::open_ai_service::OpenAiService;
