//! Remote model config loaded from environment variables.
//!
//! Only the credential decides whether the remote path is used; every other
//! knob has a default tuned for a short, factual Q&A assistant.
//!
//! # Environment variables
//!
//! - `OPENAI_API_KEY`     = bearer credential (optional; absent → offline answers only)
//! - `OPENAI_BASE_URL`    = API base, default `https://api.openai.com`
//! - `OPENAI_MODEL`       = model id, default `gpt-4o-mini`
//! - `OPENAI_TEMPERATURE` = sampling temperature in `0.0..=2.0`, default `0.4`
//! - `LLM_MAX_TOKENS`     = optional max tokens (u32)
//!
//! Unparsable or out-of-range numeric values are logged and replaced by their
//! defaults; only a malformed `OPENAI_BASE_URL` fails startup.

use tracing::warn;

use crate::{
    config::llm_model_config::{DEFAULT_ENDPOINT, DEFAULT_MODEL, DEFAULT_TEMPERATURE, LlmModelConfig},
    error_handler::{
        AiLlmError, ConfigError, env_opt, env_opt_u32, validate_http_endpoint, validate_range_f32,
    },
};

/// Builds the OpenAI config from the process environment.
///
/// # Errors
/// - [`ConfigError::InvalidFormat`] if `OPENAI_BASE_URL` is not http(s)
pub fn config_openai_from_env() -> Result<LlmModelConfig, AiLlmError> {
    config_openai_from(|name| std::env::var(name).ok())
}

/// Same as [`config_openai_from_env`], reading variables through `lookup`.
///
/// Lets callers (and tests) supply values without touching the process env.
pub fn config_openai_from<F>(lookup: F) -> Result<LlmModelConfig, AiLlmError>
where
    F: Fn(&str) -> Option<String>,
{
    let api_key = env_opt(&lookup, "OPENAI_API_KEY");

    let endpoint = env_opt(&lookup, "OPENAI_BASE_URL").unwrap_or_else(|| DEFAULT_ENDPOINT.into());
    validate_http_endpoint("OPENAI_BASE_URL", &endpoint)?;

    let model = env_opt(&lookup, "OPENAI_MODEL").unwrap_or_else(|| DEFAULT_MODEL.into());

    let temperature = match env_opt(&lookup, "OPENAI_TEMPERATURE") {
        Some(raw) => parse_temperature(&raw).unwrap_or_else(|e| {
            warn!(
                value = %raw,
                error = %e,
                default = DEFAULT_TEMPERATURE,
                "ignoring OPENAI_TEMPERATURE"
            );
            DEFAULT_TEMPERATURE
        }),
        None => DEFAULT_TEMPERATURE,
    };

    let max_tokens = env_opt_u32(&lookup, "LLM_MAX_TOKENS").unwrap_or_else(|e| {
        warn!(error = %e, "ignoring LLM_MAX_TOKENS, no max_tokens will be sent");
        None
    });

    Ok(LlmModelConfig {
        model,
        endpoint,
        api_key,
        temperature,
        max_tokens,
    })
}

fn parse_temperature(raw: &str) -> Result<f32, AiLlmError> {
    let t = raw.trim().parse::<f32>().map_err(|_| ConfigError::InvalidNumber {
        var: "OPENAI_TEMPERATURE",
        reason: "expected f32",
    })?;
    validate_range_f32("temperature", t, 0.0, 2.0)?;
    Ok(t)
}
