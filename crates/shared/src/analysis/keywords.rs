//! Noun phrase extraction
//!
//! Without a POS tagger, a phrase is approximated as a maximal run of content
//! words: function words, adverbs, past-tense verbs, punctuation and numbers
//! end a run.
//! Single-word runs only count when they look like proper nouns.

use once_cell::sync::Lazy;
use std::collections::HashSet;

use super::text::{self, Token};

/// Words that never belong inside a noun phrase
static FUNCTION_WORDS: Lazy<HashSet<&'static str>> = Lazy::new(|| {
    [
        "a", "an", "the", "this", "that", "these", "those", "some", "any", "each", "every",
        "all", "both", "either", "neither", "no", "not", "and", "or", "but", "nor", "so", "yet",
        "for", "of", "in", "on", "at", "to", "from", "by", "with", "about", "into", "onto",
        "over", "under", "after", "before", "during", "between", "through", "against",
        "without", "within", "across", "among", "around", "behind", "beyond", "near", "since",
        "until", "upon", "via", "as", "than", "like", "if", "then", "because", "while",
        "although", "though", "when", "where", "which", "who", "whom", "whose", "what", "why",
        "how", "i", "me", "my", "we", "us", "our", "you", "your", "he", "him", "his", "she",
        "her", "it", "its", "they", "them", "their", "is", "are", "was", "were", "be", "been",
        "being", "am", "has", "have", "had", "having", "do", "does", "did", "will", "would",
        "shall", "should", "can", "could", "may", "might", "must", "said", "says", "say",
        "told", "also", "just", "only", "even", "still", "very", "more", "most", "much",
        "many", "such", "other", "another", "there", "here", "now", "up", "down", "out",
        "off", "again", "too", "per", "according", "including", "whether", "however",
        "it's", "don't", "doesn't", "didn't", "won't", "can't", "isn't", "aren't", "wasn't",
    ]
    .into_iter()
    .collect()
});

#[derive(Debug, Clone)]
struct KeywordConfig {
    /// Minimum number of words in a multi-word phrase
    pub min_length: usize,
    /// Maximum number of words kept from a run
    pub max_length: usize,
    /// Lowercase the output phrases
    pub lowercase: bool,
}

impl Default for KeywordConfig {
    fn default() -> Self {
        Self {
            min_length: 2,
            max_length: 4,
            lowercase: false,
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct NounPhraseExtractor {
    config: KeywordConfig,
}

impl NounPhraseExtractor {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_lowercase(mut self, lowercase: bool) -> Self {
        self.config.lowercase = lowercase;
        self
    }

    pub fn with_max_length(mut self, max_length: usize) -> Self {
        self.config.max_length = max_length.max(1);
        self
    }

    /// Distinct noun phrases in first-seen order
    pub fn extract(&self, input: &str) -> Vec<String> {
        let mut seen = HashSet::new();
        let mut phrases = Vec::new();

        for sentence in text::sentences(input) {
            for run in content_runs(sentence) {
                let Some(phrase) = self.phrase_from_run(sentence, &run) else {
                    continue;
                };
                let key = phrase.to_lowercase();
                if seen.insert(key) {
                    phrases.push(phrase);
                }
            }
        }

        phrases
    }

    fn phrase_from_run(&self, sentence: &str, run: &[(usize, Token<'_>)]) -> Option<String> {
        // the head noun sits at the end of an English noun phrase
        let run = &run[run.len().saturating_sub(self.config.max_length)..];

        match run {
            [] => return None,
            [(position, token)] => {
                if !is_proper_noun(*position, token) {
                    return None;
                }
            }
            _ if run.len() < self.config.min_length => return None,
            _ => {}
        }

        let (_, first) = run.first()?;
        let (_, last) = run.last()?;
        let phrase = sentence[first.start..last.end]
            .split_whitespace()
            .collect::<Vec<_>>()
            .join(" ");

        Some(if self.config.lowercase {
            phrase.to_lowercase()
        } else {
            phrase
        })
    }
}

/// Capitalized mid-sentence, or an acronym anywhere
fn is_proper_noun(position: usize, token: &Token<'_>) -> bool {
    let is_acronym = token.text.len() > 1 && token.text.chars().all(|c| c.is_uppercase());
    is_acronym || (position > 0 && token.is_capitalized())
}

fn is_boundary_word(word: &str) -> bool {
    let lower = word.to_lowercase();
    if FUNCTION_WORDS.contains(lower.as_str()) {
        return true;
    }
    if lower.len() > 4 && lower.ends_with("ly") {
        return true;
    }
    // lowercase past-tense verbs ("approved", "discussed"); capitalized ones may be names
    let lowercase_start = word.chars().next().is_some_and(char::is_lowercase);
    lowercase_start && lower.len() > 4 && lower.ends_with("ed") && !lower.ends_with("eed")
}

/// Runs of adjacent content words, each tagged with its position in the sentence
fn content_runs(sentence: &str) -> Vec<Vec<(usize, Token<'_>)>> {
    let mut runs = Vec::new();
    let mut current: Vec<(usize, Token<'_>)> = Vec::new();
    let mut prev_end = 0;

    for (position, token) in text::tokens(sentence).into_iter().enumerate() {
        let gap = &sentence[prev_end..token.start];
        prev_end = token.end;

        // only whitespace or hyphens may sit between words of one phrase
        let joined = gap.chars().all(|c| c.is_whitespace() || c == '-');
        if !joined && !current.is_empty() {
            runs.push(std::mem::take(&mut current));
        }

        if is_boundary_word(token.text) {
            if !current.is_empty() {
                runs.push(std::mem::take(&mut current));
            }
            continue;
        }

        current.push((position, token));
    }

    if !current.is_empty() {
        runs.push(current);
    }

    runs
}
