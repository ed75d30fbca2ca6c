use anyhow::{Context, Result};
use once_cell::sync::Lazy;
use reqwest::{Client, StatusCode};
use scraper::{Html, Selector};
use std::time::Duration;
use tracing::{debug, warn};
use url::Url;

const MAX_ATTEMPTS: u32 = 3;
// Below this, an <article> body is probably a teaser and the page-wide <p> scan is used.
const MIN_ARTICLE_CHARS: usize = 200;

static OG_TITLE: Lazy<Selector> = Lazy::new(|| selector(r#"meta[property="og:title"]"#));
static TITLE: Lazy<Selector> = Lazy::new(|| selector("title"));
static H1: Lazy<Selector> = Lazy::new(|| selector("h1"));
static ARTICLE_PARAGRAPHS: Lazy<Selector> = Lazy::new(|| selector("article p"));
static PARAGRAPHS: Lazy<Selector> = Lazy::new(|| selector("p"));
static PUBLISHED_META: Lazy<Selector> = Lazy::new(|| {
    selector(r#"meta[property="article:published_time"], meta[name="pubdate"], meta[itemprop="datePublished"]"#)
});
static TIME_DATETIME: Lazy<Selector> = Lazy::new(|| selector("time[datetime]"));

fn selector(css: &str) -> Selector {
    Selector::parse(css).unwrap_or_else(|e| panic!("invalid built-in selector {css}: {e:?}"))
}

/// A downloaded and parsed news article
#[derive(Debug, Clone, PartialEq)]
pub struct Article {
    pub title: String,
    pub source: String,
    pub text: String,
    pub published_date: Option<String>,
}

pub struct ContentExtractor {
    client: Client,
}

impl ContentExtractor {
    pub fn new(timeout_secs: u64) -> Result<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .user_agent("Mozilla/5.0 (compatible; NewsAnalyzer/1.0)")
            .cookie_store(true)
            .build()
            .context("Failed to create HTTP client")?;

        Ok(Self { client })
    }

    pub async fn fetch_article(&self, url: &str) -> Result<Article> {
        let parsed = validate_url(url)?;

        let mut attempt = 0;
        loop {
            match self.try_fetch(&parsed).await {
                Ok(article) => return Ok(article),
                Err(FetchFailure::Permanent(e)) => return Err(e),
                Err(FetchFailure::Transient(e)) => {
                    attempt += 1;
                    if attempt >= MAX_ATTEMPTS {
                        warn!(url = %parsed, error = %e, "giving up on article fetch");
                        return Err(e);
                    }
                    let backoff = Duration::from_millis(500 * 2_u64.pow(attempt - 1));
                    debug!(url = %parsed, attempt, ?backoff, "retrying article fetch");
                    tokio::time::sleep(backoff).await;
                }
            }
        }
    }

    async fn try_fetch(&self, url: &Url) -> std::result::Result<Article, FetchFailure> {
        let response = self
            .client
            .get(url.clone())
            .send()
            .await
            .context("Failed to send HTTP request")
            .map_err(FetchFailure::Transient)?;

        let status = response.status();
        if is_permanent(status) {
            return Err(FetchFailure::Permanent(anyhow::anyhow!(
                "Article request to {} returned {}",
                url,
                status
            )));
        }

        if !status.is_success() {
            return Err(FetchFailure::Transient(anyhow::anyhow!("HTTP error: {}", status)));
        }

        let final_url = response.url().clone();
        let html = response
            .text()
            .await
            .context("Failed to read response body")
            .map_err(FetchFailure::Transient)?;

        Ok(parse_article(&html, &final_url))
    }
}

/// Client errors won't change on retry, except timeouts and rate limits
fn is_permanent(status: StatusCode) -> bool {
    status.is_client_error()
        && !matches!(
            status,
            StatusCode::REQUEST_TIMEOUT | StatusCode::TOO_MANY_REQUESTS
        )
}

enum FetchFailure {
    Transient(anyhow::Error),
    Permanent(anyhow::Error),
}

pub fn validate_url(raw: &str) -> Result<Url> {
    let url = Url::parse(raw.trim()).with_context(|| format!("Invalid URL: {}", raw))?;
    match url.scheme() {
        "http" | "https" => Ok(url),
        other => anyhow::bail!("Unsupported URL scheme: {}", other),
    }
}

/// `scheme://host[:port]` of the page, the way the site identifies itself
pub fn source_of(url: &Url) -> String {
    url.origin().ascii_serialization()
}

pub fn parse_article(html: &str, url: &Url) -> Article {
    let document = Html::parse_document(html);

    Article {
        title: extract_title(&document),
        source: source_of(url),
        text: extract_text(&document, html),
        published_date: extract_published_date(&document),
    }
}

fn extract_title(document: &Html) -> String {
    let og = document
        .select(&OG_TITLE)
        .filter_map(|el| el.value().attr("content"))
        .map(str::trim)
        .find(|t| !t.is_empty());
    if let Some(title) = og {
        return title.to_string();
    }

    [&*TITLE, &*H1]
        .into_iter()
        .filter_map(|sel| document.select(sel).next())
        .map(|el| collapse_whitespace(&el.text().collect::<String>()))
        .find(|t| !t.is_empty())
        .unwrap_or_default()
}

fn extract_text(document: &Html, html: &str) -> String {
    let article_text = join_paragraphs(document, &ARTICLE_PARAGRAPHS);
    if article_text.len() >= MIN_ARTICLE_CHARS {
        return article_text;
    }

    let page_text = join_paragraphs(document, &PARAGRAPHS);
    if !page_text.is_empty() {
        return page_text;
    }

    if !article_text.is_empty() {
        return article_text;
    }

    html2text::from_read(html.as_bytes(), 100).trim().to_string()
}

fn join_paragraphs(document: &Html, sel: &Selector) -> String {
    document
        .select(sel)
        .map(|p| collapse_whitespace(&p.text().collect::<String>()))
        .filter(|p| !p.is_empty())
        .collect::<Vec<_>>()
        .join("\n\n")
}

fn extract_published_date(document: &Html) -> Option<String> {
    document
        .select(&PUBLISHED_META)
        .filter_map(|el| el.value().attr("content"))
        .chain(
            document
                .select(&TIME_DATETIME)
                .filter_map(|el| el.value().attr("datetime")),
        )
        .map(str::trim)
        .find(|d| !d.is_empty())
        .map(str::to_string)
}

fn collapse_whitespace(s: &str) -> String {
    s.split_whitespace().collect::<Vec<_>>().join(" ")
}
