// Public modules
pub mod analysis;
pub mod config;
pub mod extractor;
pub mod models;
pub mod server;
pub mod summarizer;

// Re-export commonly used types
pub use analysis::{Analyzer, KeywordSource};
pub use config::Config;
pub use extractor::{Article, ContentExtractor};
pub use models::{AnalysisReport, ArticleReport, ErrorBody, NamedEntity};
pub use server::{router, serve, AppState};
pub use summarizer::{CohereSummarizer, SummaryKind};
