use anyhow::{Context, Result};
use reqwest::{Client, StatusCode};
use serde::{Deserialize, Serialize};
use std::time::Duration;
use thiserror::Error;
use tracing::{debug, warn};

use crate::config::Config;

const MAX_ATTEMPTS: u32 = 3;
const MAX_INPUT_BYTES: usize = 10_000;

/// Which prompt to wrap the input in
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SummaryKind {
    Text,
    NewsArticle,
}

impl SummaryKind {
    pub fn prompt(self, content: &str) -> String {
        let content = truncate_utf8(content, MAX_INPUT_BYTES);
        match self {
            SummaryKind::Text => format!("Summarize the following text: {}", content),
            SummaryKind::NewsArticle => {
                format!("Summarize the following news article:\n\n{}", content)
            }
        }
    }
}

#[derive(Serialize)]
struct GenerateRequest<'a> {
    model: &'a str,
    prompt: String,
    max_tokens: u32,
}

#[derive(Deserialize)]
struct GenerateResponse {
    generations: Vec<Generation>,
}

#[derive(Deserialize)]
struct Generation {
    text: String,
}

#[derive(Debug, Error)]
#[error("Cohere API error {status}: {body}")]
struct ApiFailure {
    status: StatusCode,
    body: String,
}

pub struct CohereSummarizer {
    client: Client,
    api_key: String,
    endpoint: String,
    model: String,
    max_tokens: u32,
}

impl CohereSummarizer {
    pub fn new(config: &Config) -> Result<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(60))
            .build()
            .context("Failed to create HTTP client")?;

        Ok(Self {
            client,
            api_key: config.cohere_api_key.clone(),
            endpoint: format!("{}/v1/generate", config.cohere_base_url.trim_end_matches('/')),
            model: config.cohere_model.clone(),
            max_tokens: config.summary_max_tokens,
        })
    }

    pub async fn summarize(&self, kind: SummaryKind, content: &str) -> Result<String> {
        let prompt = kind.prompt(content);

        let mut attempt = 0;
        loop {
            match self.try_generate(&prompt).await {
                Ok(summary) => return Ok(summary),
                Err(e) => {
                    attempt += 1;
                    let status = e.downcast_ref::<ApiFailure>().map(|f| f.status);
                    let retryable = match status {
                        Some(s) => s == StatusCode::TOO_MANY_REQUESTS || s.is_server_error(),
                        None => e.downcast_ref::<reqwest::Error>().is_some(),
                    };

                    if !retryable || attempt >= MAX_ATTEMPTS {
                        warn!(attempt, error = %e, "summarization failed");
                        return Err(e);
                    }

                    // Longer backoff for rate limits
                    let backoff = if status == Some(StatusCode::TOO_MANY_REQUESTS) {
                        Duration::from_secs(5 * attempt as u64)
                    } else {
                        Duration::from_millis(500 * 2_u64.pow(attempt - 1))
                    };
                    debug!(attempt, ?backoff, "retrying summarization");
                    tokio::time::sleep(backoff).await;
                }
            }
        }
    }

    async fn try_generate(&self, prompt: &str) -> Result<String> {
        let request = GenerateRequest {
            model: &self.model,
            prompt: prompt.to_string(),
            max_tokens: self.max_tokens,
        };

        let response = self
            .client
            .post(&self.endpoint)
            .bearer_auth(&self.api_key)
            .header("content-type", "application/json")
            .json(&request)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response
                .text()
                .await
                .unwrap_or_else(|_| String::from("unknown error"));
            return Err(ApiFailure { status, body }.into());
        }

        let generated = response
            .json::<GenerateResponse>()
            .await
            .context("Failed to parse Cohere API response")?;

        let text = generated
            .generations
            .first()
            .map(|g| g.text.trim().to_string())
            .context("Cohere API returned no generations")?;

        Ok(text)
    }
}

/// Cut `content` to at most `max` bytes without splitting a character
fn truncate_utf8(content: &str, max: usize) -> &str {
    if content.len() <= max {
        return content;
    }
    let mut end = max;
    while end > 0 && !content.is_char_boundary(end) {
        end -= 1;
    }
    &content[..end]
}
