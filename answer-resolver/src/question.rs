//! Inbound question model.

/// Caller-supplied hint selecting the system persona for the remote call.
///
/// Any value other than the recognized ones (including no value at all) is
/// [`Topic::General`]; unknown topics are never rejected.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum Topic {
    /// `"about"`: questions from the About section chat.
    About,
    /// `"project"`: questions asked from a project card.
    Project,
    /// Anything else, including a missing topic.
    #[default]
    General,
}

impl Topic {
    /// Maps the raw `topic` field. Matching is exact and case-sensitive.
    pub fn from_raw(raw: Option<&str>) -> Self {
        match raw {
            Some("about") => Topic::About,
            Some("project") => Topic::Project,
            _ => Topic::General,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Topic::About => "about",
            Topic::Project => "project",
            Topic::General => "general",
        }
    }
}

/// One visitor question, built once per request and never mutated.
///
/// The text is kept exactly as sent: empty and whitespace-only questions are
/// accepted and simply fall through to the generic fallback.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Question {
    text: String,
    topic: Topic,
}

impl Question {
    pub fn new(text: impl Into<String>, topic: Topic) -> Self {
        Self {
            text: text.into(),
            topic,
        }
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn topic(&self) -> &Topic {
        &self.topic
    }
}
