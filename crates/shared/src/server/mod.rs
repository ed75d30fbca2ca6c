//! HTTP surface: a health check plus the two analysis endpoints

pub mod error;
mod handlers;

use anyhow::{Context, Result};
use axum::routing::{get, post};
use axum::Router;
use std::sync::Arc;
use tokio::net::TcpListener;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;
use tracing::info;

use crate::analysis::Analyzer;
use crate::config::Config;
use crate::extractor::ContentExtractor;
use crate::summarizer::CohereSummarizer;

pub use error::ApiError;
pub use handlers::{AnalyzeRequest, AnalyzeUrlRequest, HealthStatus};

/// Read-only per-process state shared by every request
pub struct AppState {
    pub summarizer: CohereSummarizer,
    pub extractor: ContentExtractor,
    pub analyzer: Analyzer,
}

impl AppState {
    pub fn from_config(config: &Config) -> Result<Self> {
        Ok(Self {
            summarizer: CohereSummarizer::new(config)?,
            extractor: ContentExtractor::new(config.fetch_timeout_secs)?,
            analyzer: Analyzer::new(),
        })
    }
}

pub fn router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/", get(handlers::index))
        .route("/analyze", post(handlers::analyze))
        .route("/analyze_url", post(handlers::analyze_url))
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(state)
}

/// Bind the configured address and serve until Ctrl-C
pub async fn serve(config: &Config) -> Result<()> {
    let state = Arc::new(AppState::from_config(config)?);
    let app = router(state);

    let addr = config.bind_addr();
    let listener = TcpListener::bind(&addr)
        .await
        .with_context(|| format!("Failed to bind {}", addr))?;

    info!(%addr, model = %config.cohere_model, "news analyzer listening");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("HTTP server error")?;

    info!("server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::warn!(error = %e, "could not listen for Ctrl-C; running until killed");
        std::future::pending::<()>().await;
    }
    info!("shutdown requested");
}
