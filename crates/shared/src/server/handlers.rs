use axum::extract::rejection::JsonRejection;
use axum::extract::State;
use axum::Json;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::info;

use super::{ApiError, AppState};
use crate::analysis::KeywordSource;
use crate::models::{AnalysisReport, ArticleReport};
use crate::summarizer::SummaryKind;

#[derive(Debug, Deserialize)]
pub struct AnalyzeRequest {
    #[serde(default)]
    pub text: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct AnalyzeUrlRequest {
    #[serde(default)]
    pub url: Option<String>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct HealthStatus {
    pub message: String,
    pub version: String,
    pub timestamp: DateTime<Utc>,
}

pub async fn index() -> Json<HealthStatus> {
    Json(HealthStatus {
        message: "News analysis API is running".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        timestamp: Utc::now(),
    })
}

pub async fn analyze(
    State(state): State<Arc<AppState>>,
    payload: Result<Json<AnalyzeRequest>, JsonRejection>,
) -> Result<Json<AnalysisReport>, ApiError> {
    let text = payload
        .ok()
        .and_then(|Json(req)| req.text)
        .filter(|t| !t.trim().is_empty())
        .ok_or_else(|| ApiError::BadRequest("No text provided".to_string()))?;

    info!(chars = text.len(), "analyzing text");

    let summary = state.summarizer.summarize(SummaryKind::Text, &text).await?;
    let report = state
        .analyzer
        .analyze(&text, &summary, KeywordSource::Input);

    Ok(Json(report))
}

pub async fn analyze_url(
    State(state): State<Arc<AppState>>,
    payload: Result<Json<AnalyzeUrlRequest>, JsonRejection>,
) -> Result<Json<ArticleReport>, ApiError> {
    let url = payload
        .ok()
        .and_then(|Json(req)| req.url)
        .filter(|u| !u.trim().is_empty())
        .ok_or_else(|| ApiError::BadRequest("No URL provided".to_string()))?;

    info!(%url, "analyzing article");

    let article = state.extractor.fetch_article(&url).await?;
    if article.text.trim().is_empty() {
        return Err(anyhow::anyhow!("Failed to extract content from URL").into());
    }

    let summary = state
        .summarizer
        .summarize(SummaryKind::NewsArticle, &article.text)
        .await?;
    let analysis = state
        .analyzer
        .analyze(&article.text, &summary, KeywordSource::Summary);

    Ok(Json(ArticleReport {
        title: article.title,
        source: article.source,
        published_date: article.published_date,
        analysis,
    }))
}
