//! Sentence splitting and sentence references.

use std::sync::LazyLock;

use regex::Regex;

use crate::config::SENTENCE_JOIN_ABBREVIATIONS;

#[allow(clippy::expect_used)] // Static regex that is guaranteed to be valid
static CANDIDATE_BOUNDARY: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[.!?]\s+").expect("valid regex"));

#[allow(clippy::expect_used)] // Static regex that is guaranteed to be valid
static REFERENCE_NUMBER: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\d{1,3}").expect("valid regex"));

/// Abbreviations common in German statutes that do not end a sentence.
const ABBREVIATIONS: &[&str] = &[
    "Abs.", "Art.", "Anl.", "Buchst.", "bzw.", "d.h.", "Dr.", "f.", "ff.", "ggf.", "gem.",
    "i.S.d.", "i.V.m.", "Kap.", "lit.", "Nr.", "S.", "sog.", "u.a.", "usw.", "vgl.", "z.B.",
    "Ziff.",
];

const MONTHS: &[&str] = &[
    "Januar", "Februar", "März", "April", "Mai", "Juni", "Juli", "August", "September",
    "Oktober", "November", "Dezember",
];

/// Splits text into sentences.
///
/// Passed into [`Amender`](super::Amender) so tests can use a deterministic
/// stand-in.
pub trait SentenceSplitter {
    /// Split `text` into trimmed, non-empty sentences.
    fn split(&self, text: &str) -> Vec<String>;
}

/// Rule-based splitter for German legal text.
///
/// A sentence ends at `.`, `!` or `?` followed by whitespace and an
/// uppercase letter, digit, opening quote or parenthesis, except after a
/// known abbreviation, a single letter, or a day number before a month.
#[derive(Debug, Clone, Copy, Default)]
pub struct RuleSplitter;

impl RuleSplitter {
    fn is_boundary(before: &str, after: &str) -> bool {
        let starts_sentence = after
            .chars()
            .next()
            .is_some_and(|c| c.is_uppercase() || c.is_ascii_digit() || c == '„' || c == '(');
        if !starts_sentence {
            return false;
        }

        let Some(token) = before.split_whitespace().last() else {
            return false;
        };
        if ABBREVIATIONS.contains(&token) {
            return false;
        }

        let stem = token.trim_end_matches('.');
        if stem.chars().count() == 1 && stem.chars().all(char::is_alphabetic) {
            return false;
        }

        let next_word = after.split_whitespace().next().unwrap_or_default();
        let is_day = !stem.is_empty() && stem.chars().all(|c| c.is_ascii_digit());
        !(is_day && MONTHS.contains(&next_word))
    }
}

impl SentenceSplitter for RuleSplitter {
    fn split(&self, text: &str) -> Vec<String> {
        let mut sentences = Vec::new();
        let mut start = 0;

        for boundary in CANDIDATE_BOUNDARY.find_iter(text) {
            let mark_end = boundary.start() + 1;
            if Self::is_boundary(&text[start..mark_end], &text[boundary.end()..]) {
                let sentence = text[start..mark_end].trim();
                if !sentence.is_empty() {
                    sentences.push(sentence.to_string());
                }
                start = boundary.end();
            }
        }

        let rest = text[start..].trim();
        if !rest.is_empty() {
            sentences.push(rest.to_string());
        }
        sentences
    }
}

/// Join fragments that a splitter cut after a non-terminal abbreviation.
#[must_use]
pub fn rejoin_abbreviations(sentences: Vec<String>) -> Vec<String> {
    let mut joined: Vec<String> = Vec::with_capacity(sentences.len());
    for sentence in sentences {
        match joined.last_mut() {
            Some(previous)
                if SENTENCE_JOIN_ABBREVIATIONS
                    .iter()
                    .any(|abbreviation| previous.ends_with(abbreviation)) =>
            {
                previous.push(' ');
                previous.push_str(&sentence);
            }
            _ => joined.push(sentence),
        }
    }
    joined
}

/// Split with any splitter, then rejoin abbreviation fragments.
pub fn split_sentences<S: SentenceSplitter + ?Sized>(splitter: &S, text: &str) -> Vec<String> {
    rejoin_abbreviations(splitter.split(text))
}

/// Parsed sentence reference, 1-based as written in instructions.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SentenceRef {
    /// "Satz 2"
    Single(usize),
    /// "Sätze 5 bis 7", both ends included.
    Range(usize, usize),
    /// "Sätze 1 und 3"
    List(Vec<usize>),
}

impl SentenceRef {
    /// Parse a reference such as "Satz 2", "Sätze 5 bis 7" or "Sätze 1 und 3".
    ///
    /// Returns `None` when the reference names no sentence number or a
    /// sentence 0.
    #[must_use]
    pub fn parse(reference: &str) -> Option<Self> {
        let numbers: Vec<usize> = REFERENCE_NUMBER
            .find_iter(reference)
            .filter_map(|m| m.as_str().parse().ok())
            .collect();
        if numbers.is_empty() || numbers.contains(&0) {
            return None;
        }

        match numbers.as_slice() {
            [single] => Some(SentenceRef::Single(*single)),
            [from, to] if reference.contains("bis") => {
                Some(SentenceRef::Range(*from.min(to), *from.max(to)))
            }
            _ => Some(SentenceRef::List(numbers)),
        }
    }

    /// Referenced sentences as 0-based indices in ascending order.
    #[must_use]
    pub fn indices(&self) -> Vec<usize> {
        let mut indices: Vec<usize> = match self {
            SentenceRef::Single(n) => vec![n - 1],
            SentenceRef::Range(from, to) => (from - 1..*to).collect(),
            SentenceRef::List(numbers) => numbers.iter().map(|n| n - 1).collect(),
        };
        indices.sort_unstable();
        indices.dedup();
        indices
    }
}
