//! Word-emotion association lookup.
//!
//! Each lexicon word is associated with one or more of the ten affect
//! categories (eight basic emotions plus positive/negative sentiment). The
//! dominant emotion is the category with the most hits; ties go to the one
//! first seen in the text.

use once_cell::sync::Lazy;
use std::collections::HashMap;

use super::text;

pub const NEUTRAL: &str = "neutral";

const FEAR: &str = "fear";
const ANGER: &str = "anger";
const ANTICIPATION: &str = "anticipation";
const TRUST: &str = "trust";
const SURPRISE: &str = "surprise";
const POSITIVE: &str = "positive";
const NEGATIVE: &str = "negative";
const SADNESS: &str = "sadness";
const DISGUST: &str = "disgust";
const JOY: &str = "joy";

const ENTRIES: &[(&str, &[&str])] = &[
    ("abandon", &[FEAR, NEGATIVE, SADNESS]),
    ("abuse", &[ANGER, DISGUST, FEAR, NEGATIVE, SADNESS]),
    ("accident", &[FEAR, NEGATIVE, SADNESS, SURPRISE]),
    ("achievement", &[ANTICIPATION, JOY, POSITIVE, TRUST]),
    ("agree", &[POSITIVE, TRUST]),
    ("alarm", &[FEAR, NEGATIVE, SURPRISE]),
    ("angry", &[ANGER, DISGUST, NEGATIVE]),
    ("anxiety", &[ANGER, ANTICIPATION, FEAR, NEGATIVE, SADNESS]),
    ("attack", &[ANGER, FEAR, NEGATIVE]),
    ("award", &[ANTICIPATION, JOY, POSITIVE, SURPRISE, TRUST]),
    ("bad", &[ANGER, DISGUST, FEAR, NEGATIVE, SADNESS]),
    ("beautiful", &[JOY, POSITIVE]),
    ("believe", &[TRUST]),
    ("betrayal", &[ANGER, DISGUST, NEGATIVE, SADNESS, SURPRISE]),
    ("birth", &[ANTICIPATION, FEAR, JOY, POSITIVE, TRUST]),
    ("blame", &[ANGER, DISGUST, NEGATIVE]),
    ("bomb", &[ANGER, FEAR, NEGATIVE, SADNESS, SURPRISE]),
    ("celebrate", &[ANTICIPATION, JOY, POSITIVE]),
    ("celebration", &[ANTICIPATION, JOY, POSITIVE, SURPRISE]),
    ("cheer", &[ANTICIPATION, JOY, POSITIVE, SURPRISE, TRUST]),
    ("collapse", &[FEAR, NEGATIVE, SADNESS]),
    ("confidence", &[FEAR, JOY, POSITIVE, TRUST]),
    ("conflict", &[ANGER, FEAR, NEGATIVE, SADNESS]),
    ("court", &[ANGER, ANTICIPATION, FEAR]),
    ("crash", &[FEAR, NEGATIVE, SADNESS, SURPRISE]),
    ("crime", &[ANGER, NEGATIVE]),
    ("crisis", &[NEGATIVE]),
    ("cruel", &[ANGER, DISGUST, FEAR, NEGATIVE, SADNESS]),
    ("danger", &[FEAR, NEGATIVE, SADNESS]),
    ("death", &[ANGER, ANTICIPATION, DISGUST, FEAR, NEGATIVE, SADNESS, SURPRISE]),
    ("delight", &[ANTICIPATION, JOY, POSITIVE]),
    ("destroy", &[ANGER, FEAR, NEGATIVE, SADNESS]),
    ("destruction", &[ANGER, NEGATIVE]),
    ("disaster", &[ANGER, DISGUST, FEAR, NEGATIVE, SADNESS, SURPRISE]),
    ("disease", &[ANGER, DISGUST, FEAR, NEGATIVE, SADNESS]),
    ("disgust", &[ANGER, DISGUST, FEAR, NEGATIVE, SADNESS]),
    ("dispute", &[ANGER, NEGATIVE]),
    ("doubt", &[FEAR, NEGATIVE, SADNESS, TRUST]),
    ("emergency", &[FEAR, NEGATIVE, SADNESS, SURPRISE]),
    ("enjoy", &[ANTICIPATION, JOY, POSITIVE, TRUST]),
    ("evil", &[ANGER, DISGUST, FEAR, NEGATIVE, SADNESS]),
    ("excitement", &[ANTICIPATION, JOY, POSITIVE, SURPRISE]),
    ("expect", &[ANTICIPATION, POSITIVE, SURPRISE, TRUST]),
    ("fail", &[DISGUST, NEGATIVE]),
    ("failure", &[DISGUST, FEAR, NEGATIVE, SADNESS]),
    ("faith", &[ANTICIPATION, JOY, POSITIVE, TRUST]),
    ("fear", &[ANGER, FEAR, NEGATIVE]),
    ("fight", &[ANGER, FEAR, NEGATIVE]),
    ("fire", &[FEAR]),
    ("flood", &[FEAR]),
    ("fraud", &[ANGER, NEGATIVE]),
    ("freedom", &[JOY, POSITIVE, TRUST]),
    ("friend", &[JOY, POSITIVE, TRUST]),
    ("friendly", &[ANTICIPATION, JOY, POSITIVE, TRUST]),
    ("fun", &[ANTICIPATION, JOY, POSITIVE]),
    ("gift", &[ANTICIPATION, JOY, POSITIVE, SURPRISE]),
    ("good", &[ANTICIPATION, JOY, POSITIVE, SURPRISE, TRUST]),
    ("government", &[FEAR, NEGATIVE]),
    ("grief", &[NEGATIVE, SADNESS]),
    ("growth", &[POSITIVE]),
    ("guilty", &[ANGER, NEGATIVE, SADNESS]),
    ("happy", &[ANTICIPATION, JOY, POSITIVE, TRUST]),
    ("harm", &[FEAR, NEGATIVE]),
    ("hate", &[ANGER, DISGUST, FEAR, NEGATIVE, SADNESS]),
    ("hope", &[ANTICIPATION, JOY, POSITIVE, SURPRISE, TRUST]),
    ("horrible", &[ANGER, DISGUST, FEAR, NEGATIVE]),
    ("hostile", &[ANGER, DISGUST, FEAR, NEGATIVE]),
    ("hurt", &[ANGER, FEAR, NEGATIVE, SADNESS]),
    ("improve", &[ANTICIPATION, JOY, POSITIVE, TRUST]),
    ("improvement", &[JOY, POSITIVE, TRUST]),
    ("injury", &[ANGER, FEAR, NEGATIVE, SADNESS]),
    ("joy", &[JOY, POSITIVE, TRUST]),
    ("justice", &[POSITIVE, TRUST]),
    ("kill", &[FEAR, NEGATIVE, SADNESS]),
    ("killed", &[ANGER, FEAR, NEGATIVE, SADNESS, SURPRISE]),
    ("law", &[TRUST]),
    ("lose", &[ANGER, DISGUST, FEAR, NEGATIVE, SADNESS, SURPRISE]),
    ("loss", &[ANGER, FEAR, NEGATIVE, SADNESS]),
    ("love", &[JOY, POSITIVE]),
    ("lucky", &[JOY, POSITIVE, SURPRISE]),
    ("money", &[ANGER, ANTICIPATION, JOY, POSITIVE, SURPRISE, TRUST]),
    ("murder", &[ANGER, DISGUST, FEAR, NEGATIVE, SADNESS, SURPRISE]),
    ("outrage", &[ANGER, DISGUST, NEGATIVE]),
    ("pain", &[FEAR, NEGATIVE, SADNESS]),
    ("panic", &[FEAR, NEGATIVE]),
    ("peace", &[ANTICIPATION, JOY, POSITIVE, TRUST]),
    ("plan", &[ANTICIPATION]),
    ("pleasant", &[ANTICIPATION, JOY, POSITIVE, SURPRISE, TRUST]),
    ("police", &[FEAR, POSITIVE, TRUST]),
    ("poverty", &[ANGER, DISGUST, FEAR, NEGATIVE, SADNESS]),
    ("praise", &[JOY, POSITIVE, TRUST]),
    ("progress", &[ANTICIPATION, JOY, POSITIVE]),
    ("promise", &[JOY, POSITIVE, TRUST]),
    ("protect", &[POSITIVE, TRUST]),
    ("protest", &[ANGER, NEGATIVE]),
    ("proud", &[ANTICIPATION, JOY, POSITIVE, TRUST]),
    ("rage", &[ANGER, NEGATIVE]),
    ("reliable", &[POSITIVE, TRUST]),
    ("rescue", &[ANTICIPATION, JOY, POSITIVE, SURPRISE, TRUST]),
    ("risk", &[ANTICIPATION, FEAR, NEGATIVE]),
    ("sad", &[NEGATIVE, SADNESS]),
    ("safe", &[JOY, POSITIVE, TRUST]),
    ("safety", &[ANTICIPATION, JOY, POSITIVE, TRUST]),
    ("scandal", &[FEAR, NEGATIVE]),
    ("scream", &[ANGER, DISGUST, FEAR, NEGATIVE, SURPRISE]),
    ("shock", &[ANGER, FEAR, NEGATIVE, SURPRISE]),
    ("smile", &[JOY, POSITIVE, SURPRISE, TRUST]),
    ("strike", &[ANGER, NEGATIVE]),
    ("success", &[ANTICIPATION, JOY, POSITIVE]),
    ("successful", &[ANTICIPATION, JOY, POSITIVE, TRUST]),
    ("suddenly", &[SURPRISE]),
    ("suffer", &[NEGATIVE, SADNESS]),
    ("support", &[POSITIVE]),
    ("surprise", &[FEAR, JOY, SURPRISE]),
    ("teacher", &[POSITIVE, TRUST]),
    ("terrible", &[ANGER, DISGUST, FEAR, NEGATIVE, SADNESS]),
    ("terror", &[FEAR, NEGATIVE]),
    ("threat", &[ANGER, FEAR, NEGATIVE]),
    ("tragedy", &[FEAR, NEGATIVE, SADNESS]),
    ("true", &[JOY, POSITIVE, TRUST]),
    ("trust", &[TRUST]),
    ("truth", &[POSITIVE, TRUST]),
    ("unexpected", &[ANTICIPATION, FEAR, JOY, NEGATIVE, POSITIVE, SURPRISE]),
    ("victim", &[ANGER, FEAR, NEGATIVE, SADNESS]),
    ("victory", &[ANTICIPATION, JOY, POSITIVE, SURPRISE, TRUST]),
    ("violence", &[ANGER, FEAR, NEGATIVE, SADNESS]),
    ("war", &[FEAR, NEGATIVE]),
    ("warning", &[FEAR]),
    ("wealth", &[JOY, POSITIVE, TRUST]),
    ("welcome", &[JOY, POSITIVE, SURPRISE, TRUST]),
    ("win", &[ANTICIPATION, JOY, POSITIVE, SURPRISE]),
    ("wonderful", &[JOY, POSITIVE, SURPRISE, TRUST]),
    ("worry", &[ANTICIPATION, FEAR, NEGATIVE, SADNESS]),
    ("wreck", &[ANGER, DISGUST, FEAR, NEGATIVE, SADNESS, SURPRISE]),
];

static LEXICON: Lazy<HashMap<&'static str, &'static [&'static str]>> =
    Lazy::new(|| ENTRIES.iter().copied().collect());

/// Hit counts per emotion, in first-seen order
pub fn raw_scores(text: &str) -> Vec<(&'static str, usize)> {
    let mut scores: Vec<(&'static str, usize)> = Vec::new();

    for word in text::lower_words(text) {
        let Some(emotions) = LEXICON.get(word.as_str()) else {
            continue;
        };
        for &emotion in emotions.iter() {
            match scores.iter_mut().find(|(e, _)| *e == emotion) {
                Some((_, count)) => *count += 1,
                None => scores.push((emotion, 1)),
            }
        }
    }

    scores
}

pub fn dominant(text: &str) -> &'static str {
    raw_scores(text)
        .into_iter()
        .fold(None, |best: Option<(&'static str, usize)>, (emotion, count)| match best {
            Some((_, best_count)) if best_count >= count => best,
            _ => Some((emotion, count)),
        })
        .map(|(emotion, _)| emotion)
        .unwrap_or(NEUTRAL)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_raw_scores_count_each_hit() {
        let scores = raw_scores("War and more war.");
        assert_eq!(scores, vec![(FEAR, 2), (NEGATIVE, 2)]);
    }

    #[test]
    fn test_dominant_emotion() {
        assert_eq!(dominant("The victory brought joy and hope to the city."), JOY);
    }

    #[test]
    fn test_tie_goes_to_first_seen() {
        // "trust" -> trust, "fire" -> fear: one hit each
        assert_eq!(dominant("Trust the fire."), TRUST);
        assert_eq!(dominant("Fire. Trust."), FEAR);
    }

    #[test]
    fn test_no_hits_is_neutral() {
        assert_eq!(dominant("The quarterly figures were published on Monday."), NEUTRAL);
        assert_eq!(dominant(""), NEUTRAL);
    }
}
