use super::text;

/// Flesch reading ease, rounded to two decimals. Higher is easier.
pub fn flesch_reading_ease(input: &str) -> f64 {
    let words = text::words(input);
    if words.is_empty() {
        return 0.0;
    }

    let sentence_count = text::sentences(input).len().max(1) as f64;
    let word_count = words.len() as f64;
    let syllables: usize = words.iter().map(|w| text::count_syllables(w)).sum();

    let score = 206.835
        - 1.015 * (word_count / sentence_count)
        - 84.6 * (syllables as f64 / word_count);

    round2(score)
}

pub fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}
