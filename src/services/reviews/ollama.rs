/// Ollama review generator
///
/// Sends one non-streaming request to `POST {base_url}/api/generate` per review and
/// reads the `response` field of the reply.
use crate::{
    config::Config,
    error::AppResult,
    models::{ReviewFailure, ReviewOutcome},
    services::reviews::{build_prompt, ReviewGenerator},
};
use reqwest::Client as HttpClient;
use serde::{Deserialize, Serialize};
use std::time::Duration;

#[derive(Debug, Serialize)]
struct GenerateRequest<'a> {
    model: &'a str,
    prompt: &'a str,
    stream: bool,
    temperature: f64,
}

#[derive(Debug, Deserialize)]
struct GenerateResponse {
    #[serde(default)]
    response: Option<String>,
}

#[derive(Clone)]
pub struct OllamaReviewer {
    http_client: HttpClient,
    api_url: String,
    model: String,
    temperature: f64,
}

impl OllamaReviewer {
    /// Creates a reviewer whose requests are cut off after `timeout`
    pub fn new(
        api_url: String,
        model: String,
        temperature: f64,
        timeout: Duration,
    ) -> AppResult<Self> {
        let http_client = HttpClient::builder().timeout(timeout).build()?;

        Ok(Self {
            http_client,
            api_url: api_url.trim_end_matches('/').to_string(),
            model,
            temperature,
        })
    }

    pub fn from_config(config: &Config) -> AppResult<Self> {
        Self::new(
            config.review_service_url.clone(),
            config.review_model.clone(),
            config.review_temperature,
            config.review_timeout(),
        )
    }

    async fn request_review(&self, prompt: &str) -> Result<ReviewOutcome, reqwest::Error> {
        let url = format!("{}/api/generate", self.api_url);

        let response = self
            .http_client
            .post(&url)
            .json(&GenerateRequest {
                model: &self.model,
                prompt,
                stream: false,
                temperature: self.temperature,
            })
            .send()
            .await?;

        if !response.status().is_success() {
            let status = response.status();
            tracing::warn!(
                status = %status,
                provider = "ollama",
                "Review service returned non-success status"
            );
            return Ok(ReviewOutcome::Failed(ReviewFailure::Status(status.as_u16())));
        }

        let body: GenerateResponse = response.json().await?;
        Ok(ReviewOutcome::from_text(body.response))
    }
}

#[async_trait::async_trait]
impl ReviewGenerator for OllamaReviewer {
    async fn generate_review(&self, title: &str, genres: &str, mood: &str) -> ReviewOutcome {
        let prompt = build_prompt(title, genres, mood);

        match self.request_review(&prompt).await {
            Ok(outcome) => {
                tracing::info!(
                    title = %title,
                    generated = outcome.is_generated(),
                    provider = "ollama",
                    "Review request completed"
                );
                outcome
            }
            Err(e) => {
                tracing::warn!(
                    title = %title,
                    error = %e,
                    timeout = e.is_timeout(),
                    provider = "ollama",
                    "Review request failed"
                );
                ReviewOutcome::Failed(ReviewFailure::Transport(e.to_string()))
            }
        }
    }

    fn name(&self) -> &'static str {
        "ollama"
    }
}
