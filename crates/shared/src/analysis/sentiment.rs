//! Lexicon-based polarity and subjectivity scoring.
//!
//! Each lexicon word carries a `(polarity, subjectivity)` pair. An
//! intensifier directly before a word scales both values; a negation within
//! the three preceding tokens flips and dampens the polarity. The text score
//! is the mean over all matched words.

use once_cell::sync::Lazy;
use std::collections::{HashMap, HashSet};

use super::text;

const NEGATION_WINDOW: usize = 3;
const NEGATION_FACTOR: f64 = -0.5;

static LEXICON: Lazy<HashMap<&'static str, (f64, f64)>> = Lazy::new(|| {
    [
        // positive
        ("good", (0.7, 0.6)),
        ("great", (0.8, 0.75)),
        ("excellent", (1.0, 1.0)),
        ("amazing", (0.6, 0.9)),
        ("wonderful", (1.0, 1.0)),
        ("fantastic", (0.4, 0.9)),
        ("outstanding", (0.5, 0.67)),
        ("brilliant", (0.9, 1.0)),
        ("best", (1.0, 0.3)),
        ("better", (0.5, 0.5)),
        ("positive", (0.23, 0.55)),
        ("happy", (0.8, 1.0)),
        ("glad", (0.5, 1.0)),
        ("beautiful", (0.85, 1.0)),
        ("perfect", (1.0, 1.0)),
        ("awesome", (1.0, 1.0)),
        ("impressive", (1.0, 1.0)),
        ("remarkable", (0.75, 0.75)),
        ("successful", (0.75, 0.95)),
        ("strong", (0.43, 0.73)),
        ("safe", (0.5, 0.5)),
        ("helpful", (0.5, 0.5)),
        ("effective", (0.6, 0.8)),
        ("important", (0.4, 1.0)),
        ("significant", (0.38, 0.88)),
        ("nice", (0.6, 1.0)),
        ("fine", (0.42, 0.5)),
        ("love", (0.5, 0.6)),
        ("lovely", (0.5, 0.75)),
        ("pleased", (0.5, 0.5)),
        ("hopeful", (0.4, 0.6)),
        ("optimistic", (0.5, 0.6)),
        ("peaceful", (0.5, 0.6)),
        ("popular", (0.6, 0.8)),
        ("easy", (0.43, 0.83)),
        ("fair", (0.7, 0.9)),
        ("free", (0.4, 0.8)),
        ("healthy", (0.5, 0.5)),
        ("new", (0.14, 0.45)),
        ("innovative", (0.5, 0.75)),
        ("record", (0.2, 0.3)),
        ("stable", (0.3, 0.4)),
        ("clear", (0.1, 0.38)),
        ("fun", (0.3, 0.2)),
        ("interesting", (0.5, 0.5)),
        ("exciting", (0.3, 0.8)),
        ("win", (0.8, 0.4)),
        // negative
        ("bad", (-0.7, 0.67)),
        ("terrible", (-1.0, 1.0)),
        ("awful", (-1.0, 1.0)),
        ("horrible", (-1.0, 1.0)),
        ("poor", (-0.4, 0.6)),
        ("worst", (-1.0, 1.0)),
        ("worse", (-0.4, 0.6)),
        ("hate", (-0.8, 0.9)),
        ("sad", (-0.5, 1.0)),
        ("unhappy", (-0.6, 0.9)),
        ("angry", (-0.5, 1.0)),
        ("afraid", (-0.6, 0.9)),
        ("wrong", (-0.5, 0.9)),
        ("dangerous", (-0.6, 0.9)),
        ("deadly", (-0.2, 0.4)),
        ("violent", (-0.8, 0.9)),
        ("dead", (-0.2, 0.4)),
        ("difficult", (-0.5, 1.0)),
        ("hard", (-0.29, 0.54)),
        ("weak", (-0.38, 0.62)),
        ("serious", (-0.33, 0.67)),
        ("severe", (-0.5, 0.8)),
        ("critical", (-0.2, 0.6)),
        ("negative", (-0.3, 0.4)),
        ("failed", (-0.5, 0.3)),
        ("disappointing", (-0.6, 0.7)),
        ("disappointed", (-0.75, 0.75)),
        ("broken", (-0.4, 0.4)),
        ("stupid", (-0.8, 1.0)),
        ("ugly", (-0.7, 1.0)),
        ("painful", (-0.7, 0.9)),
        ("tragic", (-0.75, 0.75)),
        ("crisis", (-0.5, 0.5)),
        ("corrupt", (-0.5, 0.5)),
        ("illegal", (-0.5, 0.5)),
        ("controversial", (-0.2, 0.6)),
        ("uncertain", (-0.2, 0.7)),
        ("worried", (-0.5, 0.8)),
        ("expensive", (-0.5, 0.7)),
        ("slow", (-0.3, 0.4)),
        ("low", (-0.1, 0.3)),
        ("cruel", (-1.0, 1.0)),
        ("harmful", (-0.6, 0.8)),
        ("toxic", (-0.6, 0.8)),
        ("hostile", (-0.6, 0.8)),
        ("useless", (-0.5, 0.2)),
        ("unfair", (-0.6, 0.9)),
        ("lose", (-0.4, 0.4)),
        // neutral-polarity but opinionated
        ("likely", (0.0, 1.0)),
        ("possible", (0.0, 1.0)),
        ("strange", (-0.05, 0.15)),
        ("surprising", (0.1, 0.9)),
    ]
    .into_iter()
    .collect()
});

static INTENSIFIERS: Lazy<HashMap<&'static str, f64>> = Lazy::new(|| {
    [
        ("very", 1.3),
        ("really", 2.0),
        ("extremely", 1.5),
        ("incredibly", 1.4),
        ("highly", 1.3),
        ("so", 1.3),
        ("too", 1.1),
        ("most", 1.5),
        ("more", 1.1),
        ("quite", 1.1),
        ("particularly", 1.2),
        ("deeply", 1.3),
        ("slightly", 0.5),
        ("somewhat", 0.7),
        ("barely", 0.4),
    ]
    .into_iter()
    .collect()
});

static NEGATIONS: Lazy<HashSet<&'static str>> = Lazy::new(|| {
    [
        "not", "no", "never", "n't", "cannot", "don't", "doesn't", "didn't", "isn't",
        "aren't", "wasn't", "weren't", "won't", "wouldn't", "shouldn't", "couldn't",
        "hardly", "neither", "nor", "without",
    ]
    .into_iter()
    .collect()
});

#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Sentiment {
    pub polarity: f64,
    pub subjectivity: f64,
}

pub fn analyze(text: &str) -> Sentiment {
    let tokens = text::lower_words(text);

    let mut polarities = Vec::new();
    let mut subjectivities = Vec::new();

    for (i, word) in tokens.iter().enumerate() {
        let Some(&(mut polarity, mut subjectivity)) = LEXICON.get(word.as_str()) else {
            continue;
        };

        if let Some(prev) = i.checked_sub(1).map(|j| tokens[j].as_str()) {
            if let Some(&factor) = INTENSIFIERS.get(prev) {
                polarity *= factor;
                subjectivity *= factor;
            }
        }

        let window_start = i.saturating_sub(NEGATION_WINDOW);
        let negated = tokens[window_start..i]
            .iter()
            .any(|w| NEGATIONS.contains(w.as_str()));
        if negated {
            polarity *= NEGATION_FACTOR;
        }

        polarities.push(polarity.clamp(-1.0, 1.0));
        subjectivities.push(subjectivity.clamp(0.0, 1.0));
    }

    if polarities.is_empty() {
        return Sentiment::default();
    }

    Sentiment {
        polarity: mean(&polarities).clamp(-1.0, 1.0),
        subjectivity: mean(&subjectivities).clamp(0.0, 1.0),
    }
}

fn mean(values: &[f64]) -> f64 {
    values.iter().sum::<f64>() / values.len() as f64
}

#[cfg(test)]
mod tests {
    use super::*;

    fn approx(a: f64, b: f64) -> bool {
        (a - b).abs() < 1e-9
    }

    #[test]
    fn test_positive_text() {
        let s = analyze("The launch was a great success and the reviews were excellent.");
        assert!(approx(s.polarity, 0.9));
        assert!(approx(s.subjectivity, 0.875));
    }

    #[test]
    fn test_negative_text() {
        let s = analyze("A terrible storm left the town in a horrible state.");
        assert!(approx(s.polarity, -1.0));
        assert!(s.subjectivity > 0.9);
    }

    #[test]
    fn test_no_lexicon_words_is_neutral() {
        let s = analyze("The committee met on Tuesday to review the schedule.");
        assert_eq!(s, Sentiment::default());
    }

    #[test]
    fn test_negation_flips_and_dampens() {
        let s = analyze("The food was not good.");
        assert!(approx(s.polarity, -0.35));
    }

    #[test]
    fn test_intensifier_scales() {
        let s = analyze("It was very good.");
        assert!(approx(s.polarity, 0.91));
        assert!(approx(s.subjectivity, 0.78));
    }

    #[test]
    fn test_scores_stay_in_range() {
        let s = analyze("really really perfect, really excellent");
        assert!(s.polarity <= 1.0);
        assert!(s.subjectivity <= 1.0);
    }
}
