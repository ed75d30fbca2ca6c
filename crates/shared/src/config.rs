use anyhow::{Context, Result};
use std::env;
use std::str::FromStr;

const DEFAULT_HOST: &str = "0.0.0.0";
const DEFAULT_PORT: u16 = 5000;
const DEFAULT_COHERE_BASE_URL: &str = "https://api.cohere.ai";
const DEFAULT_COHERE_MODEL: &str = "command";
const DEFAULT_SUMMARY_MAX_TOKENS: u32 = 200;
const DEFAULT_FETCH_TIMEOUT_SECS: u64 = 30;

#[derive(Debug, Clone)]
pub struct Config {
    pub cohere_api_key: String,
    pub cohere_base_url: String,
    pub cohere_model: String,
    pub summary_max_tokens: u32,
    pub fetch_timeout_secs: u64,
    pub host: String,
    pub port: u16,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        // Try to load .env from multiple locations
        Self::try_load_dotenv();

        let cohere_api_key = env::var("COHERE_API_KEY").context(
            "COHERE_API_KEY not found.\n\n\
            To fix this, create ~/.config/news-analyzer/.env with:\n  \
            COHERE_API_KEY=your_key_here\n\n\
            Get your Cohere API key from: https://dashboard.cohere.com/api-keys",
        )?;

        if cohere_api_key.trim().is_empty() {
            anyhow::bail!("COHERE_API_KEY is set but empty");
        }

        Ok(Self {
            cohere_api_key,
            cohere_base_url: env::var("COHERE_BASE_URL")
                .unwrap_or_else(|_| DEFAULT_COHERE_BASE_URL.to_string()),
            cohere_model: env::var("COHERE_MODEL")
                .unwrap_or_else(|_| DEFAULT_COHERE_MODEL.to_string()),
            summary_max_tokens: parse_var("SUMMARY_MAX_TOKENS", DEFAULT_SUMMARY_MAX_TOKENS)?,
            fetch_timeout_secs: parse_var("FETCH_TIMEOUT_SECS", DEFAULT_FETCH_TIMEOUT_SECS)?,
            host: env::var("HOST").unwrap_or_else(|_| DEFAULT_HOST.to_string()),
            port: parse_var("PORT", DEFAULT_PORT)?,
        })
    }

    /// Config for tests and the CLI where the key is supplied directly.
    pub fn with_api_key(api_key: impl Into<String>) -> Self {
        Self {
            cohere_api_key: api_key.into(),
            cohere_base_url: DEFAULT_COHERE_BASE_URL.to_string(),
            cohere_model: DEFAULT_COHERE_MODEL.to_string(),
            summary_max_tokens: DEFAULT_SUMMARY_MAX_TOKENS,
            fetch_timeout_secs: DEFAULT_FETCH_TIMEOUT_SECS,
            host: DEFAULT_HOST.to_string(),
            port: DEFAULT_PORT,
        }
    }

    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    fn try_load_dotenv() {
        // 1. Current directory (for development)
        if dotenvy::dotenv().is_ok() {
            return;
        }

        // 2. ~/.config/news-analyzer/.env
        if let Some(config_dir) = dirs::config_dir() {
            let config_path = config_dir.join("news-analyzer").join(".env");
            if config_path.exists() && dotenvy::from_path(&config_path).is_ok() {
                return;
            }
        }

        // 3. ~/.env
        if let Some(home_dir) = dirs::home_dir() {
            let home_path = home_dir.join(".env");
            if home_path.exists() {
                let _ = dotenvy::from_path(&home_path);
            }
        }
    }
}

fn parse_var<T>(name: &str, default: T) -> Result<T>
where
    T: FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    match env::var(name) {
        Ok(raw) => parse_value(name, &raw),
        Err(_) => Ok(default),
    }
}

fn parse_value<T>(name: &str, raw: &str) -> Result<T>
where
    T: FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    raw.trim()
        .parse::<T>()
        .with_context(|| format!("Invalid value for {}: {:?}", name, raw))
}
