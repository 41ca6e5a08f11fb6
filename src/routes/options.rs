use axum::Json;
use serde::Serialize;

use crate::models::{Mood, GAME_STYLES};

#[derive(Debug, Serialize)]
pub struct OptionsResponse {
    pub moods: Vec<Mood>,
    pub game_styles: Vec<&'static str>,
}

/// Lists the moods the catalog knows about and the suggested genre filters
pub async fn options() -> Json<OptionsResponse> {
    Json(OptionsResponse {
        moods: Mood::MAPPED.to_vec(),
        game_styles: GAME_STYLES.to_vec(),
    })
}
