use serde::Deserialize;
use std::time::Duration;

/// Application configuration loaded from environment variables
#[derive(Debug, Deserialize, Clone)]
pub struct Config {
    /// SQLite catalog connection URL
    #[serde(default = "default_database_url")]
    pub database_url: String,

    /// Base URL of the Ollama-compatible text generation service
    #[serde(default = "default_review_service_url")]
    pub review_service_url: String,

    /// Model identifier sent with every review request
    #[serde(default = "default_review_model")]
    pub review_model: String,

    #[serde(default = "default_review_temperature")]
    pub review_temperature: f64,

    /// Hard timeout for a single review request, in seconds
    #[serde(default = "default_review_timeout_secs")]
    pub review_timeout_secs: u64,

    /// RAWG API key, only needed by the ingestion job
    #[serde(default)]
    pub rawg_api_key: Option<String>,

    /// RAWG API base URL
    #[serde(default = "default_rawg_api_url")]
    pub rawg_api_url: String,

    /// Number of games fetched per ingestion run
    #[serde(default = "default_rawg_page_size")]
    pub rawg_page_size: u32,

    /// Server host address
    #[serde(default = "default_host")]
    pub host: String,

    /// Server port
    #[serde(default = "default_port")]
    pub port: u16,
}

fn default_database_url() -> String {
    "sqlite://games.db".to_string()
}

fn default_review_service_url() -> String {
    "http://localhost:11434".to_string()
}

fn default_review_model() -> String {
    "tinyllama".to_string()
}

fn default_review_temperature() -> f64 {
    0.7
}

fn default_review_timeout_secs() -> u64 {
    30
}

fn default_rawg_api_url() -> String {
    "https://api.rawg.io/api".to_string()
}

fn default_rawg_page_size() -> u32 {
    40
}

fn default_host() -> String {
    "127.0.0.1".to_string()
}

fn default_port() -> u16 {
    3000
}

impl Config {
    /// Load configuration from environment variables
    pub fn from_env() -> anyhow::Result<Self> {
        dotenvy::dotenv().ok();
        envy::from_env::<Config>().map_err(|e| anyhow::anyhow!("Failed to load config: {}", e))
    }

    pub fn review_timeout(&self) -> Duration {
        Duration::from_secs(self.review_timeout_secs)
    }

    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}
