//! Answer resolution for the portfolio assistant.
//!
//! Public API: [`AnswerResolver::resolve`]. Given a [`Question`] it either asks
//! the remote model (when one is configured) or answers from the offline
//! keyword rules in [`fallback`], and always yields a non-empty [`Answer`]
//! unless an unexpected remote failure occurs.
//!
//! | Remote outcome             | Answer                                |
//! |----------------------------|---------------------------------------|
//! | not configured             | fallback                              |
//! | content                    | trimmed content                       |
//! | non-success status         | fallback + raw body as diagnostic     |
//! | blank / missing content    | fallback                              |
//! | transport / decode failure | `Err`, caller uses [`SAFE_ANSWER`]     |

mod answer;
mod error;
pub mod fallback;
mod prompt;
mod question;

pub use answer::{Answer, AnswerSource};
pub use error::ResolveError;
pub use fallback::{FallbackReason, fallback_answer};
pub use prompt::{ABOUT_SYSTEM, GENERAL_SYSTEM, system_prompt};
pub use question::{Question, Topic};

use ai_llm_service::{AiLlmError, OpenAiService, ProviderError, ProviderErrorKind};
use tracing::{debug, warn};

/// Generic reply for failures that carry no safe diagnostic.
pub const SAFE_ANSWER: &str = "I hit an issue answering right now. Please try again.";

/// Decides, per question, between the remote model and the offline rules.
///
/// Construct once at startup and share behind an `Arc`; it holds no
/// per-request state.
#[derive(Debug)]
pub struct AnswerResolver {
    remote: Option<OpenAiService>,
}

impl AnswerResolver {
    /// `remote = None` means every question is answered offline.
    pub fn new(remote: Option<OpenAiService>) -> Self {
        Self { remote }
    }

    /// Resolver that never calls out.
    pub fn offline() -> Self {
        Self::new(None)
    }

    pub fn is_remote_enabled(&self) -> bool {
        self.remote.is_some()
    }

    /// Resolves one question into exactly one answer.
    ///
    /// # Errors
    /// [`ResolveError::Remote`] for transport or decode failures; known
    /// provider outcomes are absorbed into a fallback [`Answer`].
    pub async fn resolve(&self, question: &Question) -> Result<Answer, ResolveError> {
        let Some(remote) = &self.remote else {
            debug!(topic = question.topic().as_str(), "no remote model configured");
            return Ok(Answer::fallback(
                fallback_answer(question.text(), FallbackReason::NotConfigured),
                None,
            ));
        };

        let system = system_prompt(question.topic());
        match remote.generate(question.text(), system).await {
            Ok(text) => Ok(Answer::remote(text)),
            Err(err) => absorb_remote_error(question, err),
        }
    }
}

/// Turns known provider outcomes into fallback answers; passes the rest on.
fn absorb_remote_error(question: &Question, err: AiLlmError) -> Result<Answer, ResolveError> {
    let fallback = || fallback_answer(question.text(), FallbackReason::RemoteUnavailable);

    match err {
        AiLlmError::Provider(p) => match p.kind {
            ProviderErrorKind::HttpStatus(http) => {
                warn!(status = %http.status, "remote model failed; answering from fallback");
                Ok(Answer::fallback(fallback(), Some(http.body)))
            }
            ProviderErrorKind::EmptyContent => {
                debug!("remote model returned no content; answering from fallback");
                Ok(Answer::fallback(fallback(), None))
            }
            kind => Err(ResolveError::Remote(
                ProviderError {
                    provider: p.provider,
                    kind,
                }
                .into(),
            )),
        },
        other => Err(ResolveError::Remote(other)),
    }
}
