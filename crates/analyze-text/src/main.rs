use anyhow::{Context, Result};
use clap::{ArgGroup, Parser};
use shared::{
    Analyzer, ArticleReport, CohereSummarizer, Config, ContentExtractor, KeywordSource,
    SummaryKind,
};
use std::fs;
use std::io::{self, Read};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "analyze-text")]
#[command(about = "Summarize and analyze a piece of text or a news article from the command line")]
#[command(group(ArgGroup::new("input").required(true).args(["text", "file", "url"])))]
struct Args {
    /// Text to analyze
    #[arg(short, long)]
    text: Option<String>,

    /// Read the text from a file ("-" for stdin)
    #[arg(short, long)]
    file: Option<PathBuf>,

    /// Fetch and analyze a news article
    #[arg(short, long)]
    url: Option<String>,

    /// Pretty-print the JSON output
    #[arg(short, long)]
    pretty: bool,
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_writer(io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn")),
        )
        .init();

    let args = Args::parse();
    let config = Config::from_env()?;
    let summarizer = CohereSummarizer::new(&config)?;
    let analyzer = Analyzer::new();

    let output = if let Some(url) = &args.url {
        eprintln!("🌐 Fetching article...");
        let extractor = ContentExtractor::new(config.fetch_timeout_secs)?;
        let article = extractor
            .fetch_article(url)
            .await
            .context("Failed to fetch article")?;

        if article.text.trim().is_empty() {
            anyhow::bail!("Failed to extract content from URL");
        }
        eprintln!("✓ Extracted {} characters from \"{}\"", article.text.len(), article.title);

        eprintln!("🤖 Summarizing with Cohere...");
        let summary = summarizer
            .summarize(SummaryKind::NewsArticle, &article.text)
            .await?;
        let analysis = analyzer.analyze(&article.text, &summary, KeywordSource::Summary);

        serde_json::to_value(ArticleReport {
            title: article.title,
            source: article.source,
            published_date: article.published_date,
            analysis,
        })?
    } else {
        let text = read_input(&args)?;
        if text.trim().is_empty() {
            anyhow::bail!("No text provided");
        }

        eprintln!("🤖 Summarizing with Cohere...");
        let summary = summarizer.summarize(SummaryKind::Text, &text).await?;
        serde_json::to_value(analyzer.analyze(&text, &summary, KeywordSource::Input))?
    };

    let json = if args.pretty {
        serde_json::to_string_pretty(&output)?
    } else {
        serde_json::to_string(&output)?
    };
    println!("{}", json);

    Ok(())
}

fn read_input(args: &Args) -> Result<String> {
    if let Some(text) = &args.text {
        return Ok(text.clone());
    }

    match &args.file {
        Some(path) if path.as_os_str() == "-" => {
            let mut buf = String::new();
            io::stdin()
                .read_to_string(&mut buf)
                .context("Failed to read stdin")?;
            Ok(buf)
        }
        Some(path) => fs::read_to_string(path)
            .with_context(|| format!("Failed to read {}", path.display())),
        None => anyhow::bail!("Provide --text, --file or --url"),
    }
}
