use answer_resolver::{Question, Topic};
use axum::extract::rejection::BytesRejection;
use serde::Deserialize;
use serde_json::Value;
use thiserror::Error;

/// Request payload for `POST /api/ai/chat`.
#[derive(Debug, Deserialize)]
pub struct ChatRequest {
    /// Natural language question. Taken as-is; blank strings are accepted.
    pub question: String,
    /// Optional persona hint. Non-string values are ignored.
    #[serde(default)]
    pub topic: Option<Value>,
}

impl From<ChatRequest> for Question {
    fn from(req: ChatRequest) -> Self {
        let topic = Topic::from_raw(req.topic.as_ref().and_then(Value::as_str));
        Question::new(req.question, topic)
    }
}

/// Why a chat request body could not be turned into a [`Question`].
#[derive(Debug, Error)]
pub enum RequestError {
    #[error("failed to read request body: {0}")]
    Body(#[from] BytesRejection),

    #[error("invalid chat request body: {0}")]
    Json(#[from] serde_json::Error),
}

/// Parses the raw body into a [`Question`].
///
/// The `Content-Type` header is not checked: any body that is a JSON object
/// with a string `question` is accepted.
pub fn parse_chat_request(body: &[u8]) -> Result<Question, RequestError> {
    let req: ChatRequest = serde_json::from_slice(body)?;
    Ok(req.into())
}
