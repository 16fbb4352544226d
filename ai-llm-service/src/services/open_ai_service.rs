//! OpenAI-compatible chat completion client.
//!
//! Minimal, non-streaming client around the OpenAI REST API. The endpoint is
//! derived from `LlmModelConfig::endpoint`:
//! - POST {endpoint}/v1/chat/completions
//!
//! Constructor validation:
//! - `cfg.api_key` must be present and non-blank
//! - `cfg.endpoint` must start with http:// or https://
//!
//! No retries and no timeout override: one round trip per call, bounded only
//! by the HTTP client's defaults.

use std::time::Instant;

use reqwest::header;
use serde::{Deserialize, Serialize};
use tracing::{debug, error, info, warn};

use crate::{
    config::llm_model_config::LlmModelConfig,
    error_handler::{AiLlmError, HttpError, ProviderError, ProviderErrorKind, make_snippet},
};

/// Thin client for an OpenAI-compatible chat completion API.
///
/// Constructed once from a complete [`LlmModelConfig`] and shared behind an
/// `Arc`. Internally keeps a preconfigured `reqwest::Client` with the bearer
/// and content-type headers already set.
#[derive(Debug)]
pub struct OpenAiService {
    client: reqwest::Client,
    cfg: LlmModelConfig,
    url_chat: String,
}

impl OpenAiService {
    /// Creates a new [`OpenAiService`] from the given config.
    ///
    /// # Errors
    /// - [`ProviderErrorKind::MissingApiKey`] if `cfg.api_key` is `None` or blank
    /// - [`ProviderErrorKind::InvalidEndpoint`] if `cfg.endpoint` is not http(s)
    /// - [`ProviderErrorKind::InvalidHeader`] if the key is not a valid header value
    /// - [`AiLlmError::HttpTransport`] if the HTTP client cannot be built
    pub fn new(cfg: LlmModelConfig) -> Result<Self, AiLlmError> {
        let api_key = cfg
            .api_key
            .as_deref()
            .map(str::trim)
            .filter(|k| !k.is_empty())
            .ok_or_else(|| ProviderError::openai(ProviderErrorKind::MissingApiKey))?;

        let endpoint = cfg.endpoint.trim();
        if endpoint.is_empty()
            || !(endpoint.starts_with("http://") || endpoint.starts_with("https://"))
        {
            return Err(ProviderError::openai(ProviderErrorKind::InvalidEndpoint(
                cfg.endpoint.clone(),
            ))
            .into());
        }

        let mut auth = header::HeaderValue::from_str(&format!("Bearer {api_key}")).map_err(|e| {
            ProviderError::openai(ProviderErrorKind::InvalidHeader(format!(
                "invalid API key header: {e}"
            )))
        })?;
        auth.set_sensitive(true);

        let mut headers = header::HeaderMap::new();
        headers.insert(header::AUTHORIZATION, auth);
        headers.insert(
            header::CONTENT_TYPE,
            header::HeaderValue::from_static("application/json"),
        );

        let client = reqwest::Client::builder()
            .default_headers(headers)
            .build()?;

        let base = endpoint.trim_end_matches('/');
        let url_chat = format!("{base}/v1/chat/completions");

        info!(
            model = %cfg.model,
            endpoint = %cfg.endpoint,
            temperature = cfg.temperature,
            "OpenAiService initialized"
        );

        Ok(Self {
            client,
            cfg,
            url_chat,
        })
    }

    /// Performs a **non-streaming** chat completion request.
    ///
    /// Sends `[system, user]` and returns the trimmed content of `choices[0]`.
    ///
    /// # Errors
    /// - [`ProviderErrorKind::HttpStatus`] for non-2xx responses (carries the full body)
    /// - [`ProviderErrorKind::EmptyContent`] when `choices[0].message.content`
    ///   is missing, null, or blank
    /// - [`ProviderErrorKind::Decode`] if the body is not the expected JSON
    /// - [`AiLlmError::HttpTransport`] for client/network failures
    pub async fn generate(&self, prompt: &str, system: &str) -> Result<String, AiLlmError> {
        let started = Instant::now();
        let body = ChatCompletionRequest::from_cfg(&self.cfg, prompt, system);

        debug!(
            model = %self.cfg.model,
            prompt_len = prompt.len(),
            system_len = system.len(),
            "POST {}", self.url_chat
        );

        let resp = self.client.post(&self.url_chat).json(&body).send().await?;

        if !resp.status().is_success() {
            let status = resp.status();
            let url = self.url_chat.clone();
            let text = resp.text().await?;

            error!(
                %status,
                %url,
                snippet = %make_snippet(&text),
                model = %self.cfg.model,
                latency_ms = started.elapsed().as_millis(),
                "/v1/chat/completions returned non-success status"
            );

            return Err(ProviderError::openai(ProviderErrorKind::HttpStatus(HttpError {
                status,
                url,
                body: text,
            }))
            .into());
        }

        let raw = resp.bytes().await?;
        let out: ChatCompletionResponse = serde_json::from_slice(&raw).map_err(|e| {
            error!(
                error = %e,
                model = %self.cfg.model,
                latency_ms = started.elapsed().as_millis(),
                "failed to decode /v1/chat/completions response"
            );
            ProviderError::openai(ProviderErrorKind::Decode(format!(
                "serde error: {e}; expected `choices[0].message.content`"
            )))
        })?;

        let Some(content) = out.first_content() else {
            warn!(
                model = %self.cfg.model,
                latency_ms = started.elapsed().as_millis(),
                "chat completion returned no usable content"
            );
            return Err(ProviderError::openai(ProviderErrorKind::EmptyContent).into());
        };

        info!(
            model = %self.cfg.model,
            latency_ms = started.elapsed().as_millis(),
            answer_len = content.len(),
            "chat completion completed"
        );

        Ok(content)
    }
}

/* ===========================================================================
HTTP payloads
======================================================================== */

/// Request body for `/v1/chat/completions` (non-streaming).
#[derive(Debug, Serialize)]
struct ChatCompletionRequest<'a> {
    model: &'a str,
    temperature: f32,
    messages: [ChatMessage<'a>; 2],
    #[serde(skip_serializing_if = "Option::is_none")]
    max_tokens: Option<u32>,
}

impl<'a> ChatCompletionRequest<'a> {
    fn from_cfg(cfg: &'a LlmModelConfig, prompt: &'a str, system: &'a str) -> Self {
        Self {
            model: &cfg.model,
            temperature: cfg.temperature,
            messages: [
                ChatMessage {
                    role: "system",
                    content: system,
                },
                ChatMessage {
                    role: "user",
                    content: prompt,
                },
            ],
            max_tokens: cfg.max_tokens,
        }
    }
}

#[derive(Debug, Serialize)]
struct ChatMessage<'a> {
    role: &'a str,
    content: &'a str,
}

/// Tolerant view of the response: every level may be missing.
#[derive(Debug, Deserialize)]
struct ChatCompletionResponse {
    #[serde(default)]
    choices: Option<Vec<Option<ChatChoice>>>,
}

#[derive(Debug, Deserialize)]
struct ChatChoice {
    #[serde(default)]
    message: Option<ChatMessageOut>,
}

#[derive(Debug, Deserialize)]
struct ChatMessageOut {
    #[serde(default)]
    content: Option<String>,
}

impl ChatCompletionResponse {
    /// Trimmed content of `choices[0]`, if non-blank.
    fn first_content(self) -> Option<String> {
        let content = self.choices?.into_iter().next()??.message?.content?;
        let trimmed = content.trim();
        (!trimmed.is_empty()).then(|| trimmed.to_string())
    }
}

#[cfg(test)]
mod tests {
    use std::sync::{Arc, Mutex};

    use axum::{
        Json, Router,
        http::{HeaderMap, StatusCode},
        response::IntoResponse,
        routing::post,
    };
    use serde_json::{Value, json};

    use super::*;

    #[derive(Clone, Default)]
    struct Seen {
        auth: Arc<Mutex<Option<String>>>,
        body: Arc<Mutex<Option<Value>>>,
    }

    async fn spawn_upstream(status: StatusCode, reply: &'static str, seen: Seen) -> String {
        let app = Router::new().route(
            "/v1/chat/completions",
            post(move |headers: HeaderMap, Json(body): Json<Value>| {
                let seen = seen.clone();
                async move {
                    *seen.auth.lock().unwrap() = headers
                        .get("authorization")
                        .and_then(|v| v.to_str().ok())
                        .map(str::to_string);
                    *seen.body.lock().unwrap() = Some(body);
                    (status, reply).into_response()
                }
            }),
        );
        let listener = tokio::net::TcpListener::bind(("127.0.0.1", 0)).await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });
        format!("http://{addr}")
    }

    fn service(endpoint: &str) -> OpenAiService {
        OpenAiService::new(LlmModelConfig {
            endpoint: endpoint.to_string(),
            api_key: Some("sk-test".into()),
            ..LlmModelConfig::default()
        })
        .unwrap()
    }

    #[test]
    fn new_requires_api_key() {
        let err = OpenAiService::new(LlmModelConfig::default()).unwrap_err();
        assert!(matches!(
            err.provider_kind(),
            Some(ProviderErrorKind::MissingApiKey)
        ));
    }

    #[test]
    fn new_rejects_bad_endpoint() {
        let err = OpenAiService::new(LlmModelConfig {
            endpoint: "api.openai.com".into(),
            api_key: Some("sk-test".into()),
            ..LlmModelConfig::default()
        })
        .unwrap_err();
        assert!(matches!(
            err.provider_kind(),
            Some(ProviderErrorKind::InvalidEndpoint(_))
        ));
    }

    #[test]
    fn first_content_handles_missing_levels() {
        let parse = |s: &str| serde_json::from_str::<ChatCompletionResponse>(s).unwrap();
        assert_eq!(parse("{}").first_content(), None);
        assert_eq!(parse(r#"{"choices":[]}"#).first_content(), None);
        assert_eq!(parse(r#"{"choices":[{}]}"#).first_content(), None);
        assert_eq!(parse(r#"{"choices":null}"#).first_content(), None);
        assert_eq!(parse(r#"{"choices":[null]}"#).first_content(), None);
        assert_eq!(parse(r#"{"choices":[{"message":null}]}"#).first_content(), None);
        assert_eq!(
            parse(r#"{"choices":[{"message":{"content":null}}]}"#).first_content(),
            None
        );
        assert_eq!(
            parse(r#"{"choices":[{"message":{"content":" \n "}}]}"#).first_content(),
            None
        );
        assert_eq!(
            parse(r#"{"choices":[{"message":{"content":" hi "}}]}"#).first_content(),
            Some("hi".to_string())
        );
    }

    #[tokio::test]
    async fn sends_expected_request_and_returns_trimmed_content() {
        let seen = Seen::default();
        let url = spawn_upstream(
            StatusCode::OK,
            r#"{"choices":[{"message":{"content":"  Hello there.  "}}]}"#,
            seen.clone(),
        )
        .await;

        let out = service(&url).generate("who are you?", "be brief").await.unwrap();
        assert_eq!(out, "Hello there.");

        assert_eq!(seen.auth.lock().unwrap().as_deref(), Some("Bearer sk-test"));
        let body = seen.body.lock().unwrap().clone().unwrap();
        assert_eq!(
            body,
            json!({
                "model": "gpt-4o-mini",
                "temperature": 0.4,
                "messages": [
                    {"role": "system", "content": "be brief"},
                    {"role": "user", "content": "who are you?"}
                ]
            })
        );
    }

    #[tokio::test]
    async fn non_success_status_keeps_raw_body() {
        let url = spawn_upstream(
            StatusCode::INTERNAL_SERVER_ERROR,
            "upstream down",
            Seen::default(),
        )
        .await;

        let err = service(&url).generate("q", "s").await.unwrap_err();
        match err.provider_kind() {
            Some(ProviderErrorKind::HttpStatus(http)) => {
                assert_eq!(http.status, StatusCode::INTERNAL_SERVER_ERROR);
                assert_eq!(http.body, "upstream down");
            }
            other => panic!("unexpected error kind: {other:?}"),
        }
    }

    #[tokio::test]
    async fn blank_content_is_empty_content() {
        let url = spawn_upstream(
            StatusCode::OK,
            r#"{"choices":[{"message":{"content":"  "}}]}"#,
            Seen::default(),
        )
        .await;

        let err = service(&url).generate("q", "s").await.unwrap_err();
        assert!(matches!(
            err.provider_kind(),
            Some(ProviderErrorKind::EmptyContent)
        ));
    }

    #[tokio::test]
    async fn non_json_body_is_decode_error() {
        let url = spawn_upstream(StatusCode::OK, "<html>oops</html>", Seen::default()).await;

        let err = service(&url).generate("q", "s").await.unwrap_err();
        assert!(matches!(
            err.provider_kind(),
            Some(ProviderErrorKind::Decode(_))
        ));
    }
}
