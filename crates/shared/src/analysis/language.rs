//! Stopword-overlap language identification

use once_cell::sync::Lazy;
use std::collections::{HashMap, HashSet};
use stop_words::{get, LANGUAGE};

use super::text;

pub const UNKNOWN: &str = "unknown";

/// Languages we can tell apart, as ISO 639-1 codes
const CANDIDATES: &[&str] = &["en", "de", "fr", "es", "it", "pt", "nl", "sv", "da", "fi"];

fn stopword_list(code: &str) -> LANGUAGE {
    match code {
        "de" => LANGUAGE::German,
        "fr" => LANGUAGE::French,
        "es" => LANGUAGE::Spanish,
        "it" => LANGUAGE::Italian,
        "pt" => LANGUAGE::Portuguese,
        "nl" => LANGUAGE::Dutch,
        "sv" => LANGUAGE::Swedish,
        "da" => LANGUAGE::Danish,
        "fi" => LANGUAGE::Finnish,
        _ => LANGUAGE::English,
    }
}

struct StopwordIndex {
    by_language: Vec<(&'static str, HashSet<String>)>,
    /// How many candidate languages list each word
    spread: HashMap<String, usize>,
}

static INDEX: Lazy<StopwordIndex> = Lazy::new(|| {
    let by_language: Vec<(&'static str, HashSet<String>)> = CANDIDATES
        .iter()
        .map(|&code| {
            let words = get(stopword_list(code))
                .iter()
                .map(|s| s.to_string().to_lowercase())
                .collect();
            (code, words)
        })
        .collect();

    let mut spread: HashMap<String, usize> = HashMap::new();
    for (_, words) in &by_language {
        for word in words {
            *spread.entry(word.clone()).or_default() += 1;
        }
    }

    StopwordIndex {
        by_language,
        spread,
    }
});

/// Best-scoring language code, or `None` when no stopword matched.
///
/// A stopword shared by `k` languages adds `1/k` to each of them, so words
/// common to the whole family don't drown out the distinctive ones.
pub fn detect(text: &str) -> Option<&'static str> {
    let words = text::lower_words(text);
    if words.is_empty() {
        return None;
    }

    let index = &*INDEX;
    let mut best: Option<(&'static str, f64)> = None;

    for (code, stopwords) in &index.by_language {
        let score: f64 = words
            .iter()
            .filter(|w| stopwords.contains(w.as_str()))
            .map(|w| 1.0 / index.spread.get(w.as_str()).copied().unwrap_or(1) as f64)
            .sum();

        if score > 0.0 && best.map_or(true, |(_, s)| score > s) {
            best = Some((*code, score));
        }
    }

    best.map(|(code, _)| code)
}
