//! Typed error for the answer-resolver crate.

use ai_llm_service::AiLlmError;
use thiserror::Error;

/// Failures the resolver cannot turn into an answer on its own.
///
/// Known remote failures (non-success status, empty content) are already
/// absorbed into a fallback [`crate::Answer`]; what reaches this type is
/// unexpected and gets collapsed to [`crate::SAFE_ANSWER`] by the caller.
#[derive(Debug, Error)]
pub enum ResolveError {
    /// Transport or decode failure talking to the completion API.
    #[error("remote completion failed: {0}")]
    Remote(#[from] AiLlmError),
}
