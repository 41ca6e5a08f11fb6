use rand::Rng;
use std::sync::Arc;
use tracing::instrument;

use crate::{
    db::CatalogStore,
    error::AppResult,
    models::{GameRecord, GenreFilter, Recommendation, RecommendationResult},
    services::reviews::ReviewGenerator,
};

/// Maximum number of games returned per request
pub const MAX_PICKS: usize = 2;

/// Mood-based game recommendations
///
/// Stateless apart from its collaborators, so a single engine can be shared
/// across concurrent requests.
pub struct RecommendationEngine {
    catalog: Arc<dyn CatalogStore>,
    reviewer: Arc<dyn ReviewGenerator>,
}

impl RecommendationEngine {
    pub fn new(catalog: Arc<dyn CatalogStore>, reviewer: Arc<dyn ReviewGenerator>) -> Self {
        Self { catalog, reviewer }
    }

    /// Recommends up to two games for `mood`, optionally restricted by `genre`
    ///
    /// `genre` is either "any" (case-insensitive) or text that must appear in the
    /// game's joined genre string. Each pick is paired with a generated review;
    /// review failures are carried in the result rather than returned as errors.
    #[instrument(skip(self), fields(catalog = self.catalog.name(), reviewer = self.reviewer.name()))]
    pub async fn recommend(&self, mood: &str, genre: &str) -> AppResult<RecommendationResult> {
        let mood = mood.to_lowercase();
        let genre = GenreFilter::parse(genre);

        let matches = self.catalog.find_games(&mood, &genre).await?;

        if matches.is_empty() {
            tracing::info!(mood = %mood, genre = %genre, "No catalog matches");
            return Ok(RecommendationResult::NoMatch);
        }

        let selected = sample_games(matches, MAX_PICKS, &mut rand::rng());

        tracing::info!(
            mood = %mood,
            genre = %genre,
            picks = selected.len(),
            "Selected games, requesting reviews"
        );

        // One review at a time: the review service is a single local model
        let mut picks = Vec::with_capacity(selected.len());
        for game in selected {
            let review = self
                .reviewer
                .generate_review(&game.name, &game.genres_display(), &mood)
                .await;

            if !review.is_generated() {
                tracing::warn!(game = %game.name, review = %review, "Review unavailable");
            }

            picks.push(Recommendation { game, review });
        }

        Ok(RecommendationResult::Matches { mood, picks })
    }

    /// Same as [`recommend`](Self::recommend), rendered as markdown
    pub async fn recommend_markdown(&self, mood: &str, genre: &str) -> AppResult<String> {
        Ok(self.recommend(mood, genre).await?.to_markdown())
    }
}

/// Uniformly picks `limit` games without replacement
///
/// When there are no more than `limit` games all of them are kept. Picked games
/// keep their relative catalog order.
pub fn sample_games<R: Rng + ?Sized>(
    games: Vec<GameRecord>,
    limit: usize,
    rng: &mut R,
) -> Vec<GameRecord> {
    if games.len() <= limit {
        return games;
    }

    let mut indices = rand::seq::index::sample(rng, games.len(), limit).into_vec();
    indices.sort_unstable();

    games
        .into_iter()
        .enumerate()
        .filter(|(index, _)| indices.binary_search(index).is_ok())
        .map(|(_, game)| game)
        .collect()
}
