//! Text analyses run over every request
//!
//! Each analyzer is a pure function of its input, so the pipeline below is
//! just the fixed sequence the API promises.

pub mod emotion;
pub mod entities;
pub mod keywords;
pub mod language;
pub mod readability;
pub mod sentiment;
pub mod text;

use tracing::debug;

use crate::models::AnalysisReport;
use keywords::NounPhraseExtractor;
use readability::round2;

/// Where keywords are drawn from
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeywordSource {
    /// Noun phrases of the submitted text, original casing
    Input,
    /// Noun phrases of the generated summary, lowercased
    Summary,
}

#[derive(Debug, Clone, Default)]
pub struct Analyzer {
    phrases: NounPhraseExtractor,
}

impl Analyzer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn analyze(&self, input: &str, summary: &str, source: KeywordSource) -> AnalysisReport {
        let sentiment = sentiment::analyze(summary);

        let keywords = match source {
            KeywordSource::Input => self.phrases.clone().with_lowercase(false).extract(input),
            KeywordSource::Summary => self.phrases.clone().with_lowercase(true).extract(summary),
        };

        let entities = entities::extract(input);
        let emotion = emotion::dominant(input).to_string();
        let language = language::detect(input).unwrap_or(language::UNKNOWN).to_string();
        let word_count = text::word_count(input);
        let readability_score = readability::flesch_reading_ease(input);
        let toxicity_score = toxicity(sentiment.polarity);

        debug!(
            word_count,
            keywords = keywords.len(),
            entities = entities.len(),
            %language,
            %emotion,
            "analysis complete"
        );

        AnalysisReport {
            summary: summary.to_string(),
            polarity: sentiment.polarity,
            subjectivity: sentiment.subjectivity,
            keywords,
            entities,
            emotion,
            language,
            word_count,
            readability_score,
            toxicity_score,
        }
    }
}

/// Negative polarity read as a toxicity estimate
pub fn toxicity(polarity: f64) -> f64 {
    if polarity < 0.0 {
        round2(-polarity)
    } else {
        0.0
    }
}
