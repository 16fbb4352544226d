use answer_resolver::{Answer, ResolveError, SAFE_ANSWER};
use serde::Serialize;
use thiserror::Error;
use tracing::warn;

use crate::routes::chat::chat_request::RequestError;

/// Response payload for `POST /api/ai/chat`. Always sent with `200 OK`.
#[derive(Debug, Serialize, PartialEq, Eq)]
pub struct ChatResponse {
    /// Text to render; never empty.
    pub answer: String,
    /// Raw upstream failure body, present only on fallback answers caused
    /// by a non-success remote response.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

/// Anything that kept the pipeline from producing an [`Answer`].
#[derive(Debug, Error)]
pub enum ChatError {
    #[error(transparent)]
    Request(#[from] RequestError),

    #[error(transparent)]
    Resolve(#[from] ResolveError),
}

impl ChatResponse {
    /// Collapses the pipeline outcome into the outbound contract.
    ///
    /// Failures become [`SAFE_ANSWER`] with no `error` field so internal
    /// details never reach the visitor.
    pub fn compose(outcome: Result<Answer, ChatError>) -> Self {
        match outcome {
            Ok(answer) => Self {
                answer: answer.text,
                error: answer.diagnostic,
            },
            Err(err) => {
                warn!(error = %err, "chat request failed; sending safe answer");
                Self {
                    answer: SAFE_ANSWER.to_string(),
                    error: None,
                }
            }
        }
    }
}
