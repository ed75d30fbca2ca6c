use anyhow::Result;
use shared::Config;
use tracing::info;
use tracing_subscriber::EnvFilter;

const DEFAULT_LOG_FILTER: &str = "news_analyzer=info,shared=info,tower_http=info";

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_LOG_FILTER)),
        )
        .init();

    info!("Starting news analyzer v{}", env!("CARGO_PKG_VERSION"));

    let config = Config::from_env()?;
    shared::serve(&config).await
}
