use serde::Serialize;
use std::fmt::Display;

/// Placeholder used when the review service answers without any text
pub const NO_REVIEW_PLACEHOLDER: &str = "No review returned.";

/// Result of asking the review service for a game review
///
/// Review generation never fails the surrounding request: failures are carried
/// as data so callers can decide how to render them. The `Display` impl keeps
/// the `Error:` prefix convention for plain-text output.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "status", content = "text", rename_all = "snake_case")]
pub enum ReviewOutcome {
    Generated(String),
    Failed(ReviewFailure),
}

/// Why a review could not be generated
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ReviewFailure {
    /// The service answered with a non-success HTTP status
    Status(u16),
    /// The service was unreachable, timed out, or sent an unreadable body
    Transport(String),
}

impl ReviewOutcome {
    /// Wraps generated text, substituting the placeholder for blank output
    pub fn from_text(text: Option<String>) -> Self {
        match text {
            Some(text) if !text.trim().is_empty() => ReviewOutcome::Generated(text),
            _ => ReviewOutcome::Generated(NO_REVIEW_PLACEHOLDER.to_string()),
        }
    }

    pub fn is_generated(&self) -> bool {
        matches!(self, ReviewOutcome::Generated(_))
    }
}

impl Display for ReviewFailure {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ReviewFailure::Status(code) => {
                write!(f, "review service returned status code {}", code)
            }
            ReviewFailure::Transport(message) => {
                write!(f, "{} (is Ollama running?)", message)
            }
        }
    }
}

impl Display for ReviewOutcome {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ReviewOutcome::Generated(text) => write!(f, "{}", text.trim()),
            ReviewOutcome::Failed(failure) => write!(f, "Error: {}", failure),
        }
    }
}
