/// Configuration for the remote chat-completion model.
///
/// Read once at startup and never mutated afterwards. The presence of
/// `api_key` is what enables the remote path at all; see
/// [`LlmModelConfig::is_remote_enabled`].
///
/// # Fields
///
/// - `model`: The model identifier (e.g., `"gpt-4o-mini"`).
/// - `endpoint`: Base URL of an OpenAI-compatible API (without `/v1/...`).
/// - `api_key`: Bearer credential. `None` means "answer offline only".
/// - `temperature`: Sampling temperature, kept low for factual answers.
/// - `max_tokens`: Optional completion length cap (omitted from the request when `None`).
///
/// # Examples
///
/// ```
/// use ai_llm_service::LlmModelConfig;
///
/// let cfg = LlmModelConfig {
///     api_key: Some("sk-test".into()),
///     ..LlmModelConfig::default()
/// };
/// assert!(cfg.is_remote_enabled());
/// assert_eq!(cfg.model, "gpt-4o-mini");
/// ```
#[derive(Clone)]
pub struct LlmModelConfig {
    /// Model identifier string.
    pub model: String,

    /// Base URL of the completion API (e.g., `https://api.openai.com`).
    pub endpoint: String,

    /// Optional API key for authentication.
    pub api_key: Option<String>,

    /// Sampling temperature (controls creativity).
    pub temperature: f32,

    /// Maximum number of tokens to generate.
    pub max_tokens: Option<u32>,
}

/// Default OpenAI API base.
pub const DEFAULT_ENDPOINT: &str = "https://api.openai.com";
/// Default chat model.
pub const DEFAULT_MODEL: &str = "gpt-4o-mini";
/// Default sampling temperature.
pub const DEFAULT_TEMPERATURE: f32 = 0.4;

impl LlmModelConfig {
    /// `true` when a non-empty credential is configured.
    pub fn is_remote_enabled(&self) -> bool {
        self.api_key
            .as_deref()
            .is_some_and(|key| !key.trim().is_empty())
    }
}

impl Default for LlmModelConfig {
    fn default() -> Self {
        Self {
            model: DEFAULT_MODEL.to_string(),
            endpoint: DEFAULT_ENDPOINT.to_string(),
            api_key: None,
            temperature: DEFAULT_TEMPERATURE,
            max_tokens: None,
        }
    }
}

// Manual impl so the key never ends up in logs via `{:?}`.
impl std::fmt::Debug for LlmModelConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LlmModelConfig")
            .field("model", &self.model)
            .field("endpoint", &self.endpoint)
            .field("api_key", &self.api_key.as_ref().map(|_| "<redacted>"))
            .field("temperature", &self.temperature)
            .field("max_tokens", &self.max_tokens)
            .finish()
    }
}
