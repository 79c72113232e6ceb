//! Extraction of locations, sentence references and change text from one
//! instruction line.

use std::sync::LazyLock;

use regex::Regex;

#[allow(clippy::expect_used)] // Static regex that is guaranteed to be valid
static QUOTED_SPAN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"„[^“]*“").expect("valid regex"));

#[allow(clippy::expect_used)] // Static regex that is guaranteed to be valid
static CHANGE_TEXT: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"„([^“]*)“|\b(Komma|Semikolon|Punkt)\b").expect("valid regex")
});

#[allow(clippy::expect_used)] // Static regex that is guaranteed to be valid
static SENTENCE_REFERENCE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\b(?:Satz|Sätze)\s+\d{1,3}(?:\s+(?:bis|und)\s*(?:Satz|Sätze)?\s*\d{1,3})?")
        .expect("valid regex")
});

#[allow(clippy::expect_used)] // Static regex that is guaranteed to be valid
static WHITESPACE_RUN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\s+").expect("valid regex"));

/// Location identifiers, in the order their tokens form a path.
#[allow(clippy::expect_used)] // Static regexes that are guaranteed to be valid
static LOCATION_PATTERNS: LazyLock<Vec<Regex>> = LazyLock::new(|| {
    [
        r"Inhaltsübersicht",
        r"Kapitel\s+\d{1,3}",
        r"§\s+\d{1,3}[a-z]?",
        r"Überschrift",
        r"\b(?:Absatz|Abs\.)\s*\d{1,3}",
        r"\b(?:Nummer|Nr\.)\s*\d{1,3}",
        r"\b(?:Buchstabe|Buchst\.)\s*[a-z]{1,2}\b",
    ]
    .into_iter()
    .map(|pattern| Regex::new(pattern).expect("valid regex"))
    .collect()
});

#[allow(clippy::expect_used)] // Static regex that is guaranteed to be valid
static PARAGRAPH_TOKEN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^(?:Absatz|Abs\.)\s*(\d{1,3})$").expect("valid regex"));

#[allow(clippy::expect_used)] // Static regex that is guaranteed to be valid
static NUMBER_TOKEN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^(?:Nummer|Nr\.)\s*(\d{1,3})$").expect("valid regex"));

#[allow(clippy::expect_used)] // Static regex that is guaranteed to be valid
static LETTER_TOKEN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^(?:Buchstabe|Buchst\.)\s*([a-z]{1,2})$").expect("valid regex"));

/// Collapse whitespace runs to single spaces and trim.
#[must_use]
pub fn collapse_whitespace(text: &str) -> String {
    WHITESPACE_RUN.replace_all(text.trim(), " ").into_owned()
}

/// Empty every quoted span, keeping the quotation marks.
///
/// Quoted text is new or old law text and must not be mistaken for
/// locations, sentence references or keywords.
#[must_use]
pub fn strip_quoted(line: &str) -> String {
    QUOTED_SPAN.replace_all(line, "„“").into_owned()
}

/// Rewrite a location token into source-law bulletpoint form.
///
/// # Examples
/// ```
/// use novelle::amendment::adapt_location_token;
///
/// assert_eq!(adapt_location_token("Absatz 3"), "(3)");
/// assert_eq!(adapt_location_token("Nr. 2"), "2.");
/// assert_eq!(adapt_location_token("Buchstabe a"), "a)");
/// assert_eq!(adapt_location_token("§  9"), "§ 9");
/// ```
#[must_use]
pub fn adapt_location_token(token: &str) -> String {
    let token = collapse_whitespace(token);

    if let Some(caps) = PARAGRAPH_TOKEN.captures(&token) {
        format!("({})", &caps[1])
    } else if let Some(caps) = NUMBER_TOKEN.captures(&token) {
        format!("{}.", &caps[1])
    } else if let Some(caps) = LETTER_TOKEN.captures(&token) {
        format!("{})", &caps[1])
    } else {
        token
    }
}

/// Location path of an instruction line.
///
/// Each identifier pattern contributes its first match; tokens are ordered
/// by pattern, not by position in the line.
#[must_use]
pub fn parse_location(line: &str) -> Vec<String> {
    let unquoted = strip_quoted(line);
    LOCATION_PATTERNS
        .iter()
        .filter_map(|pattern| pattern.find(&unquoted))
        .map(|m| adapt_location_token(m.as_str()))
        .collect()
}

/// Sentence reference of an instruction line, as written.
#[must_use]
pub fn parse_sentences(line: &str) -> Vec<String> {
    let unquoted = strip_quoted(line);
    SENTENCE_REFERENCE
        .find(&unquoted)
        .map(|m| vec![m.as_str().to_string()])
        .unwrap_or_default()
}

/// Quoted fragments and named punctuation marks of an instruction line.
///
/// Quoted fragments keep their inner whitespace. "Komma", "Semikolon" and
/// "Punkt" outside quotes stand for the bare mark.
#[must_use]
pub fn parse_change_text(line: &str) -> Vec<String> {
    CHANGE_TEXT
        .captures_iter(line)
        .filter_map(|caps| {
            if let Some(quoted) = caps.get(1) {
                return Some(quoted.as_str().to_string());
            }
            let mark = match caps.get(2)?.as_str() {
                "Komma" => ",",
                "Semikolon" => ";",
                _ => ".",
            };
            Some(mark.to_string())
        })
        .collect()
}
