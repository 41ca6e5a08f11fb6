/// Review generation abstraction
///
/// Reviews come from an external text-generation service. The engine depends only
/// on this trait, so the Ollama client can be swapped for another backend or a
/// canned implementation in tests.
use crate::models::ReviewOutcome;

pub mod ollama;

pub use ollama::OllamaReviewer;

/// Trait for review generators
///
/// Implementations never return an error: every failure mode is folded into
/// [`ReviewOutcome::Failed`] so a broken review service cannot fail a request.
#[cfg_attr(test, mockall::automock)]
#[async_trait::async_trait]
pub trait ReviewGenerator: Send + Sync {
    /// Generates a short review of `title` tailored to the user's `mood`
    ///
    /// `genres` is the comma-joined genre string shown to the user.
    async fn generate_review(&self, title: &str, genres: &str, mood: &str) -> ReviewOutcome;

    /// Generator name for logging and debugging
    fn name(&self) -> &'static str;
}

/// Builds the prompt sent to the text-generation model
pub fn build_prompt(title: &str, genres: &str, mood: &str) -> String {
    format!(
        "You're a video game expert who writes concise but fun reviews.\n\
         Review this game for someone who is currently in the mood: {mood}.\n\
         Game Title: {title}\n\
         Genre(s): {genres}\n\
         Provide a 3-5 sentence review that fits the mood."
    )
}
