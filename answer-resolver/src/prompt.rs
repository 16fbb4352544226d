//! System prompts for the remote model.

use crate::question::Topic;

/// Persona for the About section: warm, professional, focused on background.
pub const ABOUT_SYSTEM: &str = "You are the AI assistant embedded in Rishav Kumar's portfolio. Answer concisely about his internships, projects, skills, education, and achievements. Keep tone professional and warm.";

/// Persona for every other topic.
pub const GENERAL_SYSTEM: &str = "You are a helpful portfolio assistant. Be concise.";

/// System prompt for `topic`.
pub fn system_prompt(topic: &Topic) -> &'static str {
    match topic {
        Topic::About => ABOUT_SYSTEM,
        Topic::Project | Topic::General => GENERAL_SYSTEM,
    }
}
