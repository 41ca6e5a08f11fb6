use std::sync::Arc;

use axum_test::TestServer;
use serde_json::Value;

use moodplay::{
    create_router,
    db::{create_in_memory_pool, run_migrations, SqliteCatalog},
    models::{GameRecord, ReviewFailure, ReviewOutcome, FALLBACK_MESSAGE},
    services::{RecommendationEngine, ReviewGenerator},
    AppState,
};

/// Review generator that answers instantly with a canned review
struct CannedReviewer;

#[async_trait::async_trait]
impl ReviewGenerator for CannedReviewer {
    async fn generate_review(&self, title: &str, _genres: &str, mood: &str) -> ReviewOutcome {
        ReviewOutcome::Generated(format!("{} suits a {} day.", title, mood))
    }

    fn name(&self) -> &'static str {
        "canned"
    }
}

/// Review generator standing in for a stopped Ollama instance
struct OfflineReviewer;

#[async_trait::async_trait]
impl ReviewGenerator for OfflineReviewer {
    async fn generate_review(&self, _title: &str, _genres: &str, _mood: &str) -> ReviewOutcome {
        ReviewOutcome::Failed(ReviewFailure::Transport("connection refused".to_string()))
    }

    fn name(&self) -> &'static str {
        "offline"
    }
}

fn game(name: &str, rating: f64, genres: &[&str], mood: &str) -> GameRecord {
    GameRecord::new(
        name,
        Some(rating),
        genres.iter().map(|g| g.to_string()).collect(),
        mood,
    )
}

async fn create_test_server(
    games: Vec<GameRecord>,
    reviewer: Arc<dyn ReviewGenerator>,
) -> TestServer {
    let pool = create_in_memory_pool().await.unwrap();
    run_migrations(&pool).await.unwrap();
    let catalog = SqliteCatalog::new(pool);
    catalog.replace_all(&games).await.unwrap();

    let engine = RecommendationEngine::new(Arc::new(catalog), reviewer);
    let app = create_router(Arc::new(AppState::new(engine)));
    TestServer::new(app).unwrap()
}

fn sample_catalog() -> Vec<GameRecord> {
    vec![
        game("Stardew Vibes", 4.5, &["Indie", "RPG"], "happy"),
        game("Night Raid", 3.8, &["Shooter"], "intense"),
    ]
}

fn immersive_catalog() -> Vec<GameRecord> {
    let mut games: Vec<GameRecord> = (0..12)
        .map(|i| game(&format!("Saga {}", i), 4.0, &["RPG"], "immersive"))
        .collect();
    games.push(game("Deep Dive", 4.1, &["Adventure"], "Immersive"));
    games.push(game("Tactics Realm", 3.9, &["Strategy", "RPG"], "IMMERSIVE"));
    games
}

fn game_names(body: &Value) -> Vec<String> {
    body["games"]
        .as_array()
        .unwrap()
        .iter()
        .map(|g| g["name"].as_str().unwrap().to_string())
        .collect()
}

#[tokio::test]
async fn test_health_check() {
    let server = create_test_server(vec![], Arc::new(CannedReviewer)).await;
    let response = server.get("/health").await;
    response.assert_status_ok();
    let body: Value = response.json();
    assert_eq!(body["status"], "healthy");
}

#[tokio::test]
async fn test_happy_mood_end_to_end() {
    let server = create_test_server(sample_catalog(), Arc::new(CannedReviewer)).await;

    let response = server
        .get("/api/v1/recommendations")
        .add_query_param("mood", "happy")
        .add_query_param("genre", "any")
        .await;
    response.assert_status_ok();

    let body: Value = response.json();
    assert_eq!(body["matched"], true);
    assert_eq!(game_names(&body), vec!["Stardew Vibes"]);
    assert_eq!(body["games"][0]["rating"], 4.5);
    assert_eq!(body["games"][0]["genres"], "Indie, RPG");
    assert_eq!(body["games"][0]["review"], "Stardew Vibes suits a happy day.");
    assert_eq!(body["games"][0]["review_ok"], true);

    let markdown = body["markdown"].as_str().unwrap();
    assert!(markdown.starts_with("## Game Recommendations for Happy Mood"));
    assert!(markdown.contains("Stardew Vibes"));
    assert!(!markdown.contains("Night Raid"));
}

#[tokio::test]
async fn test_genre_defaults_to_any() {
    let server = create_test_server(sample_catalog(), Arc::new(CannedReviewer)).await;

    let response = server
        .get("/api/v1/recommendations")
        .add_query_param("mood", "intense")
        .await;
    response.assert_status_ok();
    let body: Value = response.json();
    assert_eq!(body["genre"], "any");
    assert_eq!(game_names(&body), vec!["Night Raid"]);
}

#[tokio::test]
async fn test_unknown_mood_returns_fallback_verbatim() {
    let server = create_test_server(sample_catalog(), Arc::new(CannedReviewer)).await;

    let response = server
        .get("/api/v1/recommendations/markdown")
        .add_query_param("mood", "bored")
        .add_query_param("genre", "any")
        .await;
    response.assert_status_ok();
    assert_eq!(response.text(), FALLBACK_MESSAGE);

    let response = server
        .get("/api/v1/recommendations")
        .add_query_param("mood", "bored")
        .await;
    let body: Value = response.json();
    assert_eq!(body["matched"], false);
    assert_eq!(body["message"], FALLBACK_MESSAGE);
    assert!(body["games"].as_array().unwrap().is_empty());
}

#[tokio::test]
async fn test_markdown_endpoint_content_type() {
    let server = create_test_server(sample_catalog(), Arc::new(CannedReviewer)).await;

    let response = server
        .get("/api/v1/recommendations/markdown")
        .add_query_param("mood", "Happy")
        .await;
    response.assert_status_ok();
    assert_eq!(
        response.header("content-type").to_str().unwrap(),
        "text/markdown; charset=utf-8"
    );
    assert!(response.text().contains("### 🎮 Stardew Vibes - 4.5/5"));
}

#[tokio::test]
async fn test_always_two_distinct_picks_from_large_match_set() {
    let server = create_test_server(immersive_catalog(), Arc::new(CannedReviewer)).await;

    for _ in 0..10 {
        let response = server
            .get("/api/v1/recommendations")
            .add_query_param("mood", "immersive")
            .await;
        let names = game_names(&response.json());
        assert_eq!(names.len(), 2);
        assert_ne!(names[0], names[1]);
    }
}

#[tokio::test]
async fn test_case_insensitive_matching_uses_same_candidates() {
    let server = create_test_server(immersive_catalog(), Arc::new(CannedReviewer)).await;

    // Deep Dive is the only immersive game without an RPG genre
    let allowed: Vec<String> = (0..12)
        .map(|i| format!("Saga {}", i))
        .chain(std::iter::once("Tactics Realm".to_string()))
        .collect();

    for (mood, genre) in [("Immersive", "rpg"), ("immersive", "RPG")] {
        for _ in 0..10 {
            let response = server
                .get("/api/v1/recommendations")
                .add_query_param("mood", mood)
                .add_query_param("genre", genre)
                .await;
            for name in game_names(&response.json()) {
                assert!(allowed.contains(&name), "unexpected pick {name}");
            }
        }
    }
}

#[tokio::test]
async fn test_any_genre_matches_mood_only_set() {
    let server = create_test_server(immersive_catalog(), Arc::new(CannedReviewer)).await;
    let mood_only: std::collections::HashSet<String> =
        immersive_catalog().into_iter().map(|g| g.name).collect();

    let mut seen = std::collections::HashSet::new();
    for _ in 0..120 {
        let response = server
            .get("/api/v1/recommendations")
            .add_query_param("mood", "immersive")
            .add_query_param("genre", "ANY")
            .await;
        seen.extend(game_names(&response.json()));
    }

    assert!(seen.is_subset(&mood_only));
    // Deep Dive has no RPG genre, so it only shows up when the genre filter is off
    assert!(seen.contains("Deep Dive"));
}

#[tokio::test]
async fn test_offline_reviewer_degrades_gracefully() {
    let server = create_test_server(sample_catalog(), Arc::new(OfflineReviewer)).await;

    let response = server
        .get("/api/v1/recommendations")
        .add_query_param("mood", "intense")
        .await;
    response.assert_status_ok();

    let body: Value = response.json();
    assert_eq!(game_names(&body), vec!["Night Raid"]);
    assert_eq!(body["games"][0]["review_ok"], false);
    let review = body["games"][0]["review"].as_str().unwrap();
    assert!(review.starts_with("Error:"));
    assert!(review.contains("is Ollama running?"));
}

#[tokio::test]
async fn test_missing_mood_is_rejected() {
    let server = create_test_server(sample_catalog(), Arc::new(CannedReviewer)).await;
    let response = server.get("/api/v1/recommendations").expect_failure().await;
    response.assert_status(axum::http::StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_request_id_is_echoed() {
    let server = create_test_server(vec![], Arc::new(CannedReviewer)).await;

    let response = server
        .get("/health")
        .add_header(
            axum::http::HeaderName::from_static("x-request-id"),
            axum::http::HeaderValue::from_static("trace-me"),
        )
        .await;
    assert_eq!(response.header("x-request-id").to_str().unwrap(), "trace-me");

    let response = server.get("/health").await;
    assert!(!response.header("x-request-id").is_empty());
}

#[tokio::test]
async fn test_options_lists_moods_and_styles() {
    let server = create_test_server(vec![], Arc::new(CannedReviewer)).await;

    let response = server.get("/api/v1/options").await;
    response.assert_status_ok();
    let body: Value = response.json();
    let moods = body["moods"].as_array().unwrap();
    assert_eq!(moods.len(), 6);
    assert!(moods.contains(&Value::from("immersive")));
    assert!(!moods.contains(&Value::from("unknown")));
    assert_eq!(body["game_styles"].as_array().unwrap().last().unwrap(), "Any");
}
