use axum::{
    extract::{Query, State},
    http::header,
    response::IntoResponse,
    Extension, Json,
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;

use crate::{
    error::AppResult,
    middleware::request_id::RequestId,
    models::{Recommendation, RecommendationResult, FALLBACK_MESSAGE},
    routes::AppState,
};

#[derive(Debug, Deserialize)]
pub struct RecommendationQuery {
    pub mood: String,
    #[serde(default = "default_genre")]
    pub genre: String,
}

fn default_genre() -> String {
    "any".to_string()
}

#[derive(Debug, Serialize)]
pub struct GameResponse {
    pub name: String,
    pub rating: Option<f64>,
    pub genres: String,
    pub mood: String,
    /// Generated review, or the `Error:` text when generation failed
    pub review: String,
    pub review_ok: bool,
}

impl From<&Recommendation> for GameResponse {
    fn from(pick: &Recommendation) -> Self {
        Self {
            name: pick.game.name.clone(),
            rating: pick.game.rating,
            genres: pick.game.genres_display(),
            mood: pick.game.mood.clone(),
            review: pick.review.to_string(),
            review_ok: pick.review.is_generated(),
        }
    }
}

#[derive(Debug, Serialize)]
pub struct RecommendationResponse {
    pub mood: String,
    pub genre: String,
    pub matched: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    pub games: Vec<GameResponse>,
    pub markdown: String,
}

impl RecommendationResponse {
    fn new(query: &RecommendationQuery, result: &RecommendationResult) -> Self {
        Self {
            mood: query.mood.to_lowercase(),
            genre: query.genre.to_lowercase(),
            matched: result.is_match(),
            message: (!result.is_match()).then(|| FALLBACK_MESSAGE.to_string()),
            games: result.picks().iter().map(GameResponse::from).collect(),
            markdown: result.to_markdown(),
        }
    }
}

/// Handler for the recommendations endpoint
pub async fn recommend(
    State(state): State<Arc<AppState>>,
    Extension(request_id): Extension<RequestId>,
    Query(query): Query<RecommendationQuery>,
) -> AppResult<Json<RecommendationResponse>> {
    tracing::info!(
        request_id = %request_id,
        mood = %query.mood,
        genre = %query.genre,
        "Processing recommendation request"
    );

    let result = state.engine.recommend(&query.mood, &query.genre).await?;

    tracing::info!(
        request_id = %request_id,
        picks = result.picks().len(),
        "Recommendation completed"
    );

    Ok(Json(RecommendationResponse::new(&query, &result)))
}

/// Handler returning the rendered markdown only
pub async fn recommend_markdown(
    State(state): State<Arc<AppState>>,
    Extension(request_id): Extension<RequestId>,
    Query(query): Query<RecommendationQuery>,
) -> AppResult<impl IntoResponse> {
    tracing::info!(
        request_id = %request_id,
        mood = %query.mood,
        genre = %query.genre,
        "Processing markdown recommendation request"
    );

    let markdown = state
        .engine
        .recommend_markdown(&query.mood, &query.genre)
        .await?;

    Ok((
        [(header::CONTENT_TYPE, "text/markdown; charset=utf-8")],
        markdown,
    ))
}
