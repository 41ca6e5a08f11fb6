use std::fmt::Write;

use super::{GameRecord, ReviewOutcome};

/// Text shown when no catalogued game matches the requested mood and genre
pub const FALLBACK_MESSAGE: &str = "Sorry, I couldn't find any games matching that mood and genre.\n\n\
Try a different mood like: immersive, intense, suspenseful, or curious.\n\
Or select 'Any' under game style to broaden the results.";

/// A selected game together with its generated review
#[derive(Debug, Clone, PartialEq)]
pub struct Recommendation {
    pub game: GameRecord,
    pub review: ReviewOutcome,
}

/// Outcome of a single recommendation request
#[derive(Debug, Clone, PartialEq)]
pub enum RecommendationResult {
    /// One or two picks for the normalized mood, in selection order
    Matches {
        mood: String,
        picks: Vec<Recommendation>,
    },
    /// Nothing in the catalog matched
    NoMatch,
}

impl RecommendationResult {
    pub fn picks(&self) -> &[Recommendation] {
        match self {
            RecommendationResult::Matches { picks, .. } => picks,
            RecommendationResult::NoMatch => &[],
        }
    }

    pub fn is_match(&self) -> bool {
        matches!(self, RecommendationResult::Matches { .. })
    }

    /// Renders the result as markdown, or the fallback message when nothing matched
    pub fn to_markdown(&self) -> String {
        let (mood, picks) = match self {
            RecommendationResult::Matches { mood, picks } => (mood, picks),
            RecommendationResult::NoMatch => return FALLBACK_MESSAGE.to_string(),
        };

        let mut out = format!("## Game Recommendations for {} Mood\n\n", capitalize(mood));

        // Writing into a String cannot fail
        for pick in picks {
            let _ = writeln!(
                out,
                "### 🎮 {} - {}/5",
                pick.game.name,
                pick.game.rating_display()
            );
            let _ = writeln!(out, "- **Genres:** {}", pick.game.genres_display());
            let _ = writeln!(out, "- **Mood:** {}", pick.game.mood);
            let _ = writeln!(out, "- **AI Review:** {}\n", pick.review);
        }

        out
    }
}

fn capitalize(text: &str) -> String {
    let mut chars = text.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}
