//! Offline keyword rules used whenever the remote model is unavailable,
//! failed, or returned nothing usable.
//!
//! Rules are evaluated in order on the lower-cased question; the first match
//! wins and later rules are never consulted.

pub const INTERNSHIP_ANSWER: &str = "Rishav has interned as a Software Development Intern at Momntum AI (2025–present) and as a Machine Learning Intern at My Job Grow (Jul–Sep 2024).";

pub const PROJECTS_ANSWER: &str = "Highlighted projects: Snapfix‑AI (CV‑powered defect detection), LSTM Stock Prediction, AI‑based Attendance (OpenCV), and an LLM chatbot.";

pub const TECH_STACK_ANSWER: &str = "Preferred stack: React/Node/TypeScript on the web, Python for AI/ML with TensorFlow/Scikit‑learn, and tooling like Docker & AWS.";

pub const GENERIC_NOT_CONFIGURED_ANSWER: &str = "I'm Rishav's on‑site assistant. Ask about internships, projects, or skills! (Live AI not configured yet.)";

pub const GENERIC_UNAVAILABLE_ANSWER: &str = "I'm Rishav's on‑site assistant. Ask about internships, projects, or skills! (Live AI is unavailable right now.)";

/// Why the fallback is being used. Only changes the wording of the generic answer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FallbackReason {
    /// No API key configured.
    NotConfigured,
    /// The remote call failed or returned no usable content.
    RemoteUnavailable,
}

/// A keyword rule: matches when the question contains any of `keywords`.
#[derive(Debug)]
pub struct FallbackRule {
    pub name: &'static str,
    pub keywords: &'static [&'static str],
    pub answer: &'static str,
}

impl FallbackRule {
    fn matches(&self, lowered: &str) -> bool {
        self.keywords.iter().any(|k| lowered.contains(k))
    }
}

/// Ordered rule table. Order is precedence.
pub const FALLBACK_RULES: &[FallbackRule] = &[
    FallbackRule {
        name: "internship",
        keywords: &["intern"],
        answer: INTERNSHIP_ANSWER,
    },
    FallbackRule {
        name: "projects",
        keywords: &["project", "work"],
        answer: PROJECTS_ANSWER,
    },
    FallbackRule {
        name: "tech_stack",
        keywords: &["stack", "tech"],
        answer: TECH_STACK_ANSWER,
    },
];

/// First rule matching `question`, if any.
pub fn matching_rule(question: &str) -> Option<&'static FallbackRule> {
    let lowered = question.to_lowercase();
    FALLBACK_RULES.iter().find(|rule| rule.matches(&lowered))
}

/// Deterministic canned answer for `question`.
pub fn fallback_answer(question: &str, reason: FallbackReason) -> &'static str {
    match matching_rule(question) {
        Some(rule) => rule.answer,
        None => match reason {
            FallbackReason::NotConfigured => GENERIC_NOT_CONFIGURED_ANSWER,
            FallbackReason::RemoteUnavailable => GENERIC_UNAVAILABLE_ANSWER,
        },
    }
}
