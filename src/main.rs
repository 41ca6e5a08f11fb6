use std::sync::Arc;

use anyhow::Context;
use moodplay::{
    config::Config,
    create_router,
    db::{create_pool, SqliteCatalog},
    services::{OllamaReviewer, RecommendationEngine},
    AppState,
};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let config = Config::from_env()?;

    let pool = create_pool(&config.database_url)
        .await
        .with_context(|| format!("Failed to open catalog at {}", config.database_url))?;

    let catalog = Arc::new(SqliteCatalog::new(pool));
    let reviewer = Arc::new(OllamaReviewer::from_config(&config)?);

    tracing::info!(
        review_service = %config.review_service_url,
        model = %config.review_model,
        "Review generator configured"
    );

    let state = Arc::new(AppState::new(RecommendationEngine::new(catalog, reviewer)));
    let app = create_router(state);

    let address = config.bind_address();
    let listener = tokio::net::TcpListener::bind(&address).await?;
    tracing::info!(address = %address, "Server listening");
    axum::serve(listener, app).await?;

    Ok(())
}
