use sqlx::{FromRow, SqlitePool};
use tracing::instrument;

use crate::{
    error::AppResult,
    models::{split_genres, GameRecord, GenreFilter},
};

/// Read access to the game catalog
///
/// The recommendation engine only needs to filter by mood and, optionally, by a
/// genre substring. Implementations must treat both comparisons case-insensitively;
/// callers pass the mood and genre already lowercased.
#[cfg_attr(test, mockall::automock)]
#[async_trait::async_trait]
pub trait CatalogStore: Send + Sync {
    /// Returns every game whose mood equals `mood` and whose joined genre string
    /// contains the filter text, in catalog order
    async fn find_games(&self, mood: &str, genre: &GenreFilter) -> AppResult<Vec<GameRecord>>;

    /// Store name for logging and debugging
    fn name(&self) -> &'static str;
}

// Stored rows may predate the schema. A catalog written with a TEXT `rating`
// column holds numbers as text next to placeholders such as 'N/A', so ratings
// are read as text and parsed in `GameRow`.
const SELECT_GAMES: &str = r#"
    SELECT
        COALESCE(name, 'N/A') AS name,
        CAST(rating AS TEXT) AS rating,
        COALESCE(genres, '') AS genres,
        COALESCE(mood, 'unknown') AS mood
    FROM games
    WHERE LOWER(COALESCE(mood, 'unknown')) = ?1
"#;

// instr() keeps the genre match a plain substring test, so `%` and `_` in user
// input are not treated as LIKE wildcards.
const GENRE_CLAUSE: &str = "AND instr(LOWER(COALESCE(genres, '')), ?2) > 0";

const ORDER_CLAUSE: &str = "ORDER BY rowid";

#[derive(Debug, FromRow)]
struct GameRow {
    name: String,
    rating: Option<String>,
    genres: String,
    mood: String,
}

/// Numeric rating from its stored text; placeholders and blanks are missing
fn parse_rating(raw: Option<&str>) -> Option<f64> {
    raw.and_then(|text| text.trim().parse::<f64>().ok())
        .filter(|rating| rating.is_finite())
}

impl From<GameRow> for GameRecord {
    fn from(row: GameRow) -> Self {
        let rating = parse_rating(row.rating.as_deref());
        GameRecord::new(row.name, rating, split_genres(&row.genres), row.mood)
    }
}

/// SQLite-backed catalog
#[derive(Clone)]
pub struct SqliteCatalog {
    pool: SqlitePool,
}

impl SqliteCatalog {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// Replaces the whole catalog with `games` in a single transaction
    ///
    /// Used by the ingestion job; the recommendation path never writes.
    #[instrument(skip(self, games), fields(games = games.len()))]
    pub async fn replace_all(&self, games: &[GameRecord]) -> AppResult<u64> {
        let mut tx = self.pool.begin().await?;

        let removed = sqlx::query("DELETE FROM games")
            .execute(&mut *tx)
            .await?
            .rows_affected();

        for game in games {
            sqlx::query("INSERT INTO games (name, rating, genres, mood) VALUES (?1, ?2, ?3, ?4)")
                .bind(&game.name)
                .bind(game.rating)
                .bind(game.genres_display())
                .bind(&game.mood)
                .execute(&mut *tx)
                .await?;
        }

        tx.commit().await?;

        tracing::info!(removed, inserted = games.len(), "Catalog replaced");

        Ok(games.len() as u64)
    }
}

#[async_trait::async_trait]
impl CatalogStore for SqliteCatalog {
    #[instrument(skip(self), fields(store = "sqlite"))]
    async fn find_games(&self, mood: &str, genre: &GenreFilter) -> AppResult<Vec<GameRecord>> {
        // Scoped acquisition: the connection goes back to the pool when `conn` drops
        let mut conn = self.pool.acquire().await?;

        let rows: Vec<GameRow> = match genre {
            GenreFilter::Any => {
                let sql = format!("{} {}", SELECT_GAMES, ORDER_CLAUSE);
                sqlx::query_as::<_, GameRow>(&sql).bind(mood).fetch_all(&mut *conn).await?
            }
            GenreFilter::Contains(genre) => {
                let sql = format!("{} {} {}", SELECT_GAMES, GENRE_CLAUSE, ORDER_CLAUSE);
                sqlx::query_as::<_, GameRow>(&sql)
                    .bind(mood)
                    .bind(genre)
                    .fetch_all(&mut *conn)
                    .await?
            }
        };

        tracing::debug!(matches = rows.len(), "Catalog query completed");

        Ok(rows.into_iter().map(GameRecord::from).collect())
    }

    fn name(&self) -> &'static str {
        "sqlite"
    }
}
