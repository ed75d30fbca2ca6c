//! Heuristic named entity recognition.
//!
//! Numeric entities (`MONEY`, `PERCENT`, `DATE`) come from patterns.
//! Everything else starts as a run of capitalized words and is labelled
//! from context: a preceding title makes it a `PERSON`, an organisation
//! suffix or acronym an `ORG`, a gazetteer hit a `GPE`, and anything left
//! over is `MISC`.

use once_cell::sync::Lazy;
use regex::Regex;
use std::collections::HashSet;

use super::text::{self, Token};
use crate::models::NamedEntity;

const MONTHS: &str =
    "January|February|March|April|May|June|July|August|September|October|November|December";
const WEEKDAYS: &str = "Monday|Tuesday|Wednesday|Thursday|Friday|Saturday|Sunday";

fn compile(pattern: &str) -> Regex {
    Regex::new(pattern).unwrap_or_else(|e| panic!("entity pattern {pattern}: {e}"))
}

/// Pattern entities in priority order; later ones may not overlap earlier ones
static PATTERNS: Lazy<Vec<(&'static str, Regex)>> = Lazy::new(|| {
    vec![
        (
            "MONEY",
            compile(
                r"[$€£]\s?\d[\d,]*(?:\.\d+)?(?:\s?(?:million|billion|trillion|bn|m)\b)?|\b\d[\d,]*(?:\.\d+)?\s(?:million\s|billion\s)?(?:dollars|euros|pounds)\b",
            ),
        ),
        (
            "PERCENT",
            compile(r"\b\d+(?:\.\d+)?\s?(?:%|percent\b|per cent\b)"),
        ),
        (
            "DATE",
            compile(&format!(
                r"\b(?:{m})\s+\d{{1,2}}(?:st|nd|rd|th)?(?:,?\s+\d{{4}})?\b|\b\d{{1,2}}\s+(?:{m})(?:\s+\d{{4}})?\b|\b(?:{m})\s+\d{{4}}\b|\b(?:{w})\b",
                m = MONTHS,
                w = WEEKDAYS
            )),
        ),
        ("DATE", compile(r"\b(?:1[89]\d{2}|20\d{2})\b")),
    ]
});

static CALENDAR_WORDS: Lazy<HashSet<&'static str>> =
    Lazy::new(|| MONTHS.split('|').chain(WEEKDAYS.split('|')).collect());

static TITLES: Lazy<HashSet<&'static str>> = Lazy::new(|| {
    [
        "Mr", "Mrs", "Ms", "Dr", "Prof", "Sir", "Dame", "President", "Senator", "Sen", "Rep",
        "Governor", "Gov", "Mayor", "Judge", "Justice", "Professor", "Minister", "Chancellor",
        "Secretary", "General", "Gen", "Captain", "Capt", "Pope", "King", "Queen", "Prince",
        "Princess", "Coach", "Chairman", "CEO",
    ]
    .into_iter()
    .collect()
});

/// Titles that are abbreviated with a trailing period
static ABBREVIATED_TITLES: Lazy<HashSet<&'static str>> = Lazy::new(|| {
    ["Mr", "Mrs", "Ms", "Dr", "Prof", "Sen", "Rep", "Gov", "Gen", "Capt", "St"]
        .into_iter()
        .collect()
});

static ORG_WORDS: Lazy<HashSet<&'static str>> = Lazy::new(|| {
    [
        "Inc", "Corp", "Corporation", "Company", "Co", "Ltd", "LLC", "Group", "Bank",
        "University", "College", "Association", "Agency", "Ministry", "Department", "Council",
        "Committee", "Party", "Foundation", "Institute", "Commission", "Union", "Court",
        "Times", "News", "Post", "Journal", "Airlines", "Motors", "Technologies", "Systems",
        "Holdings", "Partners", "Network", "Federation", "Organization", "Organisation",
        "Police", "Army", "Navy", "Parliament", "Congress", "Senate", "Club", "FC",
    ]
    .into_iter()
    .collect()
});

static GPE: Lazy<HashSet<&'static str>> = Lazy::new(|| {
    [
        // countries and blocs
        "Afghanistan", "Argentina", "Australia", "Austria", "Belgium", "Brazil", "Canada",
        "Chile", "China", "Colombia", "Cuba", "Denmark", "Egypt", "Ethiopia", "Finland",
        "France", "Germany", "Greece", "India", "Indonesia", "Iran", "Iraq", "Ireland",
        "Israel", "Italy", "Japan", "Kenya", "Lebanon", "Mexico", "Netherlands", "New Zealand",
        "Nigeria", "North Korea", "Norway", "Pakistan", "Palestine", "Peru", "Philippines",
        "Poland", "Portugal", "Qatar", "Russia", "Saudi Arabia", "South Africa",
        "South Korea", "Spain", "Sudan", "Sweden", "Switzerland", "Syria", "Taiwan",
        "Thailand", "Turkey", "Ukraine", "United Kingdom", "United States", "Venezuela",
        "Vietnam", "Yemen", "America", "Britain", "Europe", "Africa", "Asia", "Gaza", "US",
        "USA", "UK", "UAE", "EU",
        // cities
        "Amsterdam", "Athens", "Baghdad", "Bangkok", "Beijing", "Beirut", "Berlin", "Boston",
        "Brussels", "Cairo", "Chicago", "Delhi", "Dubai", "Dublin", "Geneva", "Hong Kong",
        "Houston", "Istanbul", "Jerusalem", "Kabul", "Kyiv", "Lagos", "Lisbon", "London",
        "Los Angeles", "Madrid", "Manila", "Melbourne", "Mexico City", "Miami", "Moscow",
        "Mumbai", "Nairobi", "New Delhi", "New York", "Oslo", "Ottawa", "Paris", "Prague",
        "Rome", "San Francisco", "Seattle", "Seoul", "Shanghai", "Singapore", "Stockholm",
        "Sydney", "Tehran", "Tel Aviv", "Tokyo", "Toronto", "Vienna", "Warsaw",
        "Washington",
        // US states not already covered
        "Alabama", "Alaska", "Arizona", "California", "Colorado", "Florida", "Georgia",
        "Hawaii", "Illinois", "Indiana", "Iowa", "Kansas", "Kentucky", "Louisiana", "Maine",
        "Maryland", "Massachusetts", "Michigan", "Minnesota", "Mississippi", "Missouri",
        "Montana", "Nebraska", "Nevada", "New Jersey", "New Mexico", "North Carolina",
        "Ohio", "Oklahoma", "Oregon", "Pennsylvania", "Tennessee", "Texas", "Utah",
        "Vermont", "Virginia", "Wisconsin", "Wyoming",
    ]
    .into_iter()
    .collect()
});

/// Capitalized words that only start a sentence, never a name
static LEADING_WORDS: Lazy<HashSet<&'static str>> = Lazy::new(|| {
    [
        "The", "A", "An", "This", "That", "These", "Those", "In", "On", "At", "For", "From",
        "With", "By", "As", "If", "When", "While", "After", "Before", "But", "And", "Or",
        "So", "It", "He", "She", "They", "We", "I", "You", "His", "Her", "Their", "Our", "Its",
        "My", "Your", "There", "Here", "Some", "Many", "Most", "All", "According", "Despite",
        "However", "Meanwhile", "Last", "Next", "Earlier", "Later", "Yesterday", "Today",
    ]
    .into_iter()
    .collect()
});

/// Lowercase words allowed between two capitalized ones ("Bank of America")
const CONNECTORS: &[&str] = &["of", "for", "and", "de", "del", "la", "van", "von"];

const SPEECH_VERBS: &[&str] = &["said", "says", "told", "added", "wrote", "argued"];

/// Distinct entities in order of first appearance
pub fn extract(input: &str) -> Vec<NamedEntity> {
    let mut found: Vec<(usize, NamedEntity)> = Vec::new();
    let mut taken: Vec<(usize, usize)> = Vec::new();

    for (label, pattern) in PATTERNS.iter() {
        for m in pattern.find_iter(input) {
            let overlaps = taken.iter().any(|&(s, e)| m.start() < e && s < m.end());
            if overlaps {
                continue;
            }
            taken.push((m.start(), m.end()));
            found.push((m.start(), NamedEntity::new(m.as_str().trim(), *label)));
        }
    }

    let tokens = text::tokens(input);
    for span in capitalized_spans(input, &tokens) {
        if let Some(entity) = classify_span(input, &tokens, span) {
            found.push(entity);
        }
    }

    found.sort_by_key(|(start, _)| *start);

    let mut seen = HashSet::new();
    found
        .into_iter()
        .map(|(_, entity)| entity)
        .filter(|entity| seen.insert(entity.clone()))
        .collect()
}

/// Token index ranges `[start, end)` of capitalized word runs
fn capitalized_spans(input: &str, tokens: &[Token<'_>]) -> Vec<(usize, usize)> {
    let mut spans = Vec::new();
    let mut i = 0;

    while i < tokens.len() {
        if !tokens[i].is_capitalized() {
            i += 1;
            continue;
        }

        let start = i;
        let mut end = i + 1;
        while end < tokens.len() {
            if !joins(input, &tokens[end - 1], &tokens[end]) {
                break;
            }
            if tokens[end].is_capitalized() {
                end += 1;
                continue;
            }
            let is_connector = CONNECTORS.contains(&tokens[end].text);
            if is_connector
                && end + 1 < tokens.len()
                && tokens[end + 1].is_capitalized()
                && joins(input, &tokens[end], &tokens[end + 1])
            {
                end += 2;
                continue;
            }
            break;
        }

        spans.push((start, end));
        i = end;
    }

    spans
}

/// Whether two neighbouring tokens can belong to the same name
fn joins(input: &str, prev: &Token<'_>, next: &Token<'_>) -> bool {
    let gap = &input[prev.end..next.start];
    if gap.is_empty() {
        return false;
    }
    if gap.chars().all(|c| c == ' ' || c == '\t') {
        return true;
    }
    // "Dr. Smith"
    ABBREVIATED_TITLES.contains(prev.text)
        && gap.starts_with('.')
        && gap[1..].chars().all(|c| c == ' ')
        && gap.len() > 1
}

fn starts_sentence(input: &str, tokens: &[Token<'_>], idx: usize) -> bool {
    if idx == 0 {
        return true;
    }
    let prev = &tokens[idx - 1];
    let gap = &input[prev.end..tokens[idx].start];
    let terminated = gap.contains(['.', '!', '?', '\n', ':', '"', '“']);
    terminated && !ABBREVIATED_TITLES.contains(prev.text)
}

fn classify_span(
    input: &str,
    tokens: &[Token<'_>],
    (mut start, mut end): (usize, usize),
) -> Option<(usize, NamedEntity)> {
    let sentence_initial = starts_sentence(input, tokens, start);

    while start < end
        && (LEADING_WORDS.contains(tokens[start].text)
            || CALENDAR_WORDS.contains(tokens[start].text))
    {
        start += 1;
    }
    while end > start && CALENDAR_WORDS.contains(tokens[end - 1].text) {
        end -= 1;
    }

    let mut titled = false;
    while start < end && TITLES.contains(tokens[start].text) {
        titled = true;
        start += 1;
    }

    if start >= end {
        return None;
    }

    let span = &tokens[start..end];
    let text = input[span[0].start..span[span.len() - 1].end]
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ");

    let is_acronym = |t: &Token<'_>| t.text.len() > 1 && t.text.chars().all(char::is_uppercase);

    if span.len() == 1 && sentence_initial && !titled {
        // a lone capitalized word opening a sentence is only trusted if we know it
        if !GPE.contains(text.as_str()) && !is_acronym(&span[0]) {
            return None;
        }
    }

    let label = if titled {
        "PERSON"
    } else if GPE.contains(text.as_str()) {
        "GPE"
    } else if span
        .iter()
        .any(|t| ORG_WORDS.contains(t.text) || is_acronym(t))
    {
        "ORG"
    } else if span.len() >= 2 && followed_by_speech(tokens, end) {
        "PERSON"
    } else {
        "MISC"
    };

    Some((span[0].start, NamedEntity::new(text, label)))
}

fn followed_by_speech(tokens: &[Token<'_>], end: usize) -> bool {
    tokens
        .get(end)
        .is_some_and(|t| SPEECH_VERBS.contains(&t.text))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pairs(text: &str) -> Vec<(String, String)> {
        extract(text)
            .into_iter()
            .map(|e| (e.text, e.label))
            .collect()
    }

    fn expected(items: &[(&str, &str)]) -> Vec<(String, String)> {
        items
            .iter()
            .map(|(t, l)| (t.to_string(), l.to_string()))
            .collect()
    }

    #[test]
    fn test_mixed_entities() {
        let found = pairs(
            "Apple Inc. is hiring. Tim Cook said the company will open an office in Berlin on Monday.",
        );
        assert_eq!(
            found,
            expected(&[
                ("Apple Inc", "ORG"),
                ("Tim Cook", "PERSON"),
                ("Berlin", "GPE"),
                ("Monday", "DATE"),
            ])
        );
    }

    #[test]
    fn test_titles_mark_people() {
        let found = pairs("The deal was signed by President Emmanuel Macron in Paris.");
        assert_eq!(
            found,
            expected(&[("Emmanuel Macron", "PERSON"), ("Paris", "GPE")])
        );

        let found = pairs("Dr. Jane Smith spoke to NATO officials.");
        assert_eq!(found, expected(&[("Jane Smith", "PERSON"), ("NATO", "ORG")]));
    }

    #[test]
    fn test_numeric_entities() {
        let found = pairs(
            "Shares fell 5% after the company lost $2.5 billion in 2023, it said on March 3, 2024.",
        );
        assert_eq!(
            found,
            expected(&[
                ("5%", "PERCENT"),
                ("$2.5 billion", "MONEY"),
                ("2023", "DATE"),
                ("March 3, 2024", "DATE"),
            ])
        );
    }

    #[test]
    fn test_connectors_inside_names() {
        let found = pairs("Analysts at the Bank of America expect growth.");
        assert_eq!(found, expected(&[("Bank of America", "ORG")]));
    }

    #[test]
    fn test_unknown_names_are_misc() {
        let found = pairs("Fans of the Quantum Lounge queued overnight.");
        assert_eq!(found, expected(&[("Quantum Lounge", "MISC")]));
    }

    #[test]
    fn test_duplicates_removed() {
        let found = pairs("Berlin is big. Berlin is old.");
        assert_eq!(found, expected(&[("Berlin", "GPE")]));
    }

    #[test]
    fn test_no_entities() {
        assert!(extract("").is_empty());
        assert!(extract("nothing capitalized here at all").is_empty());
        assert!(extract("Nothing notable happened.").is_empty());
    }
}
