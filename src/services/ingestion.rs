use crate::{
    db::SqliteCatalog,
    error::{AppError, AppResult},
    models::{GameRecord, RawgGamesPage},
};
use reqwest::Client as HttpClient;
use tracing::instrument;

/// Largest page the RAWG API serves
pub const RAWG_MAX_PAGE_SIZE: u32 = 40;

/// Client for the RAWG video games catalog
///
/// Only used by the offline ingestion job that fills the local catalog.
#[derive(Clone)]
pub struct RawgClient {
    http_client: HttpClient,
    api_key: String,
    api_url: String,
}

/// Summary of one ingestion run
#[derive(Debug, Clone, PartialEq)]
pub struct IngestionReport {
    pub fetched: usize,
    pub stored: u64,
    pub unknown_mood: usize,
}

impl RawgClient {
    pub fn new(api_key: String, api_url: String) -> Self {
        Self {
            http_client: HttpClient::new(),
            api_key,
            api_url: api_url.trim_end_matches('/').to_string(),
        }
    }

    /// Fetches one page of games and converts them into catalog records
    #[instrument(skip(self))]
    pub async fn fetch_games(&self, page: u32, page_size: u32) -> AppResult<Vec<GameRecord>> {
        if page == 0 {
            return Err(AppError::InvalidInput("page starts at 1".to_string()));
        }
        if page_size == 0 || page_size > RAWG_MAX_PAGE_SIZE {
            return Err(AppError::InvalidInput(format!(
                "page_size must be between 1 and {}, got {}",
                RAWG_MAX_PAGE_SIZE, page_size
            )));
        }

        let url = format!("{}/games", self.api_url);

        let response = self
            .http_client
            .get(&url)
            .query(&[
                ("key", self.api_key.clone()),
                ("page", page.to_string()),
                ("page_size", page_size.to_string()),
            ])
            .send()
            .await?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(AppError::ExternalApi(format!(
                "RAWG API returned status {}: {}",
                status, body
            )));
        }

        let page: RawgGamesPage = response.json().await?;
        let games: Vec<GameRecord> = page.results.into_iter().map(GameRecord::from).collect();

        tracing::info!(results = games.len(), provider = "rawg", "Games page fetched");

        Ok(games)
    }
}

/// Fetches a page of games and replaces the catalog contents with it
pub async fn ingest(
    client: &RawgClient,
    catalog: &SqliteCatalog,
    page: u32,
    page_size: u32,
) -> AppResult<IngestionReport> {
    let games = client.fetch_games(page, page_size).await?;

    for game in &games {
        tracing::debug!(
            name = %game.name,
            genres = %game.genres_display(),
            rating = %game.rating_display(),
            mood = %game.mood,
            "Catalog entry"
        );
    }

    let unknown_mood = games.iter().filter(|g| g.mood == "unknown").count();
    let stored = catalog.replace_all(&games).await?;

    Ok(IngestionReport {
        fetched: games.len(),
        stored,
        unknown_mood,
    })
}
