//! Resolved answer handed to the HTTP layer.

/// Where the answer text came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AnswerSource {
    Remote,
    Fallback,
}

/// Exactly one per request; `text` is never empty.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Answer {
    pub text: String,
    pub source: AnswerSource,
    /// Raw upstream body from a non-success remote response. Only ever set on
    /// fallback answers.
    pub diagnostic: Option<String>,
}

impl Answer {
    pub fn remote(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            source: AnswerSource::Remote,
            diagnostic: None,
        }
    }

    pub fn fallback(text: impl Into<String>, diagnostic: Option<String>) -> Self {
        Self {
            text: text.into(),
            source: AnswerSource::Fallback,
            diagnostic,
        }
    }
}
