use serde::{Deserialize, Serialize};
use std::fmt::Display;

/// Separator used when a genre list is stored or displayed as a single string
pub const GENRE_SEPARATOR: &str = ", ";

/// A catalogued video game
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct GameRecord {
    /// Display name, not guaranteed to be unique
    pub name: String,
    /// Score on a 0-5 scale, absent when the source had no usable value
    pub rating: Option<f64>,
    /// Genre labels in source order
    pub genres: Vec<String>,
    /// Mood label assigned at ingestion time
    pub mood: String,
}

impl GameRecord {
    pub fn new(
        name: impl Into<String>,
        rating: Option<f64>,
        genres: Vec<String>,
        mood: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            rating,
            genres,
            mood: mood.into(),
        }
    }

    /// Genres joined the way they are stored and rendered: "Indie, RPG"
    pub fn genres_display(&self) -> String {
        self.genres.join(GENRE_SEPARATOR)
    }

    /// Rating rendered for display, `N/A` when missing
    pub fn rating_display(&self) -> String {
        match self.rating {
            Some(rating) if rating.fract() == 0.0 => format!("{:.1}", rating),
            Some(rating) => format!("{}", rating),
            None => "N/A".to_string(),
        }
    }
}

/// Splits a stored genre string back into its labels
pub fn split_genres(genres: &str) -> Vec<String> {
    genres
        .split(',')
        .map(str::trim)
        .filter(|genre| !genre.is_empty())
        .map(str::to_string)
        .collect()
}

/// Mood vocabulary assigned to games during ingestion
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum Mood {
    Excited,
    Happy,
    Curious,
    Suspenseful,
    Immersive,
    Intense,
    /// No genre of the game maps to a mood
    Unknown,
}

impl Mood {
    /// Moods in the order their genre mappings are checked
    pub const MAPPED: [Mood; 6] = [
        Mood::Excited,
        Mood::Happy,
        Mood::Curious,
        Mood::Suspenseful,
        Mood::Immersive,
        Mood::Intense,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Mood::Excited => "excited",
            Mood::Happy => "happy",
            Mood::Curious => "curious",
            Mood::Suspenseful => "suspenseful",
            Mood::Immersive => "immersive",
            Mood::Intense => "intense",
            Mood::Unknown => "unknown",
        }
    }

    /// Genre labels that map to this mood
    pub fn genres(&self) -> &'static [&'static str] {
        match self {
            Mood::Excited => &["Racing", "Massively Multiplayer", "Sports"],
            Mood::Happy => &["Indie", "Platformer"],
            Mood::Curious => &["Puzzle", "Adventure"],
            Mood::Suspenseful => &["Shooter"],
            Mood::Immersive => &["RPG"],
            Mood::Intense => &["Action"],
            Mood::Unknown => &[],
        }
    }

    /// Picks the first mood (in `MAPPED` order) that any of the genres maps to
    pub fn from_genres<S: AsRef<str>>(genres: &[S]) -> Mood {
        Mood::MAPPED
            .into_iter()
            .find(|mood| {
                genres
                    .iter()
                    .any(|genre| mood.genres().contains(&genre.as_ref()))
            })
            .unwrap_or(Mood::Unknown)
    }
}

impl Display for Mood {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Optional secondary filter on a game's joined genre string
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GenreFilter {
    /// No genre restriction
    Any,
    /// Case-insensitive substring of the joined genre string (stored lowercased)
    Contains(String),
}

impl GenreFilter {
    /// Parses user input; "any" in any casing disables the filter
    pub fn parse(input: &str) -> Self {
        let genre = input.to_lowercase();
        if genre == "any" {
            GenreFilter::Any
        } else {
            GenreFilter::Contains(genre)
        }
    }
}

impl Display for GenreFilter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            GenreFilter::Any => write!(f, "any"),
            GenreFilter::Contains(genre) => write!(f, "{}", genre),
        }
    }
}
