use anyhow::Context;
use moodplay::{
    config::Config,
    db::{create_writable_pool, run_migrations, SqliteCatalog},
    services::ingestion::{ingest, RawgClient},
};
use tracing_subscriber::EnvFilter;

/// Fills the local catalog with one page of games from RAWG
#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let config = Config::from_env()?;
    let api_key = config
        .rawg_api_key
        .clone()
        .context("RAWG_API_KEY must be set to run ingestion")?;

    let pool = create_writable_pool(&config.database_url).await?;
    run_migrations(&pool).await?;

    let client = RawgClient::new(api_key, config.rawg_api_url.clone());
    let catalog = SqliteCatalog::new(pool.clone());

    let report = ingest(&client, &catalog, 1, config.rawg_page_size).await?;

    tracing::info!(
        fetched = report.fetched,
        stored = report.stored,
        unknown_mood = report.unknown_mood,
        database = %config.database_url,
        "Catalog ingestion finished"
    );

    pool.close().await;
    Ok(())
}
