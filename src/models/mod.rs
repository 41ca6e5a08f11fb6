use serde::Deserialize;

mod game;
mod recommendation;
mod review;

pub use game::{split_genres, GameRecord, GenreFilter, Mood, GENRE_SEPARATOR};
pub use recommendation::{Recommendation, RecommendationResult, FALLBACK_MESSAGE};
pub use review::{ReviewFailure, ReviewOutcome, NO_REVIEW_PLACEHOLDER};

/// Game styles offered to users as genre filters
pub const GAME_STYLES: [&str; 7] = [
    "Action",
    "Shooter",
    "RPG",
    "Puzzle",
    "Adventure",
    "Strategy",
    "Any",
];

/// Placeholder for values missing from the RAWG catalog
const MISSING_VALUE: &str = "N/A";

// ============================================================================
// RAWG API Types
// ============================================================================

/// Paged response from GET /games
#[derive(Debug, Clone, Deserialize)]
pub struct RawgGamesPage {
    #[serde(default)]
    pub results: Vec<RawgGame>,
}

/// Game entry as returned by the RAWG API
#[derive(Debug, Clone, Deserialize)]
pub struct RawgGame {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub rating: Option<f64>,
    #[serde(default)]
    pub genres: Vec<RawgGenre>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct RawgGenre {
    #[serde(default)]
    pub name: Option<String>,
}

impl From<RawgGame> for GameRecord {
    fn from(game: RawgGame) -> Self {
        let genres: Vec<String> = game
            .genres
            .into_iter()
            .map(|genre| genre.name.unwrap_or_else(|| MISSING_VALUE.to_string()))
            .collect();

        let mood = Mood::from_genres(&genres);

        let name = game
            .name
            .filter(|name| !name.trim().is_empty())
            .unwrap_or_else(|| MISSING_VALUE.to_string());

        GameRecord::new(name, game.rating, genres, mood.as_str())
    }
}
