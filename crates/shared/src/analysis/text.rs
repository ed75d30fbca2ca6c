//! Tokenization helpers shared by the analyzers

use once_cell::sync::Lazy;
use regex::Regex;

static WORD_RE: Lazy<Regex> = Lazy::new(|| {
    // combining marks stay attached so decomposed accents don't split a word
    Regex::new(r"\p{L}[\p{L}\p{M}]*(?:['’]\p{L}[\p{L}\p{M}]*)*")
        .unwrap_or_else(|e| panic!("word regex: {e}"))
});

/// A token with its byte span in the source text
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Token<'a> {
    pub text: &'a str,
    pub start: usize,
    pub end: usize,
}

impl<'a> Token<'a> {
    pub fn is_capitalized(&self) -> bool {
        self.text.chars().next().is_some_and(char::is_uppercase)
    }
}

/// Alphabetic word tokens, with inner apostrophes kept
pub fn words(text: &str) -> Vec<&str> {
    WORD_RE.find_iter(text).map(|m| m.as_str()).collect()
}

pub fn tokens(text: &str) -> Vec<Token<'_>> {
    WORD_RE
        .find_iter(text)
        .map(|m| Token {
            text: m.as_str(),
            start: m.start(),
            end: m.end(),
        })
        .collect()
}

/// Lowercased word tokens
pub fn lower_words(text: &str) -> Vec<String> {
    words(text).into_iter().map(str::to_lowercase).collect()
}

/// Split on sentence terminators and line breaks, dropping empty pieces
pub fn sentences(text: &str) -> Vec<&str> {
    let mut out = Vec::new();
    let mut start = 0;

    for (idx, ch) in text.char_indices() {
        if matches!(ch, '.' | '!' | '?' | '\n') {
            let end = idx + ch.len_utf8();
            let piece = text[start..end].trim();
            if piece.chars().any(char::is_alphanumeric) {
                out.push(piece);
            }
            start = end;
        }
    }

    let tail = text[start..].trim();
    if tail.chars().any(char::is_alphanumeric) {
        out.push(tail);
    }

    out
}

/// Whitespace-delimited token count
pub fn word_count(text: &str) -> usize {
    text.split_whitespace().count()
}

/// Vowel-group syllable estimate, never less than one
pub fn count_syllables(word: &str) -> usize {
    let word: Vec<char> = word
        .chars()
        .filter(|c| c.is_alphabetic())
        .flat_map(char::to_lowercase)
        .collect();

    if word.is_empty() {
        return 0;
    }
    if word.len() <= 3 {
        return 1;
    }

    let is_vowel = |c: char| matches!(c, 'a' | 'e' | 'i' | 'o' | 'u' | 'y');

    let mut count = 0;
    let mut prev_vowel = false;
    for &c in &word {
        let vowel = is_vowel(c);
        if vowel && !prev_vowel {
            count += 1;
        }
        prev_vowel = vowel;
    }

    let n = word.len();
    // silent trailing e, but "-le" after a consonant is its own syllable ("table")
    if word[n - 1] == 'e' && !is_vowel(word[n - 2]) {
        let consonant_le = word[n - 2] == 'l' && n >= 3 && !is_vowel(word[n - 3]);
        if !consonant_le {
            count -= 1;
        }
    }
    // "-es"/"-ed" endings rarely add a syllable unless after t/d/s-like sounds
    if n >= 4 && word[n - 2] == 'e' && matches!(word[n - 1], 'd' | 's') {
        let before = word[n - 3];
        if !is_vowel(before) && !matches!(before, 't' | 'd' | 's' | 'x' | 'z' | 'c' | 'g') {
            count -= 1;
        }
    }

    count.max(1)
}
