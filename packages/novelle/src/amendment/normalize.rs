//! Normalization of amendment text before it is split into instructions.
//!
//! After normalization every line starts with a bulletpoint marker or a
//! `## ` heading marker, and quoted spans never contain line breaks.

use std::sync::LazyLock;

use regex::Regex;
use unicode_normalization::UnicodeNormalization;

use crate::config::{validate_quotes, CLOSING_QUOTE, OPENING_QUOTE};
use crate::error::Result;

#[allow(clippy::expect_used)] // Static regex that is guaranteed to be valid
static HYPHENATED_BREAK: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(\w)-\n(\w)").expect("valid regex"));

#[allow(clippy::expect_used)] // Static regex that is guaranteed to be valid
static INSTRUCTION_START: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^(?:\d{1,2}\.|[a-z]\)|[a-z][a-z]\)|\([a-z0-9]{1,3}\))").expect("valid regex")
});

#[allow(clippy::expect_used)] // Static regex that is guaranteed to be valid
static HEADING_START: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^(?:§|(?:In|Dem|Nach)\s*§)").expect("valid regex"));

/// How to deal with unbalanced quotation marks.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum QuotePolicy {
    /// Fail with the exact imbalance.
    #[default]
    Strict,
    /// Drop unopened closing quotes and close unclosed quotes at the end.
    Repair,
}

/// Replace line breaks inside quoted spans with spaces.
///
/// Nested quotes are supported. Fails with
/// [`QuoteMismatch`](crate::NovelleError::QuoteMismatch) when opening and
/// closing marks do not pair up.
pub fn join_quoted_lines(text: &str) -> Result<String> {
    validate_quotes(text)?;

    let mut depth = 0usize;
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            OPENING_QUOTE => depth += 1,
            CLOSING_QUOTE => depth = depth.saturating_sub(1),
            _ => {}
        }
        if c == '\n' && depth > 0 {
            out.push(' ');
        } else {
            out.push(c);
        }
    }
    Ok(out)
}

/// Balance quotation marks so that [`join_quoted_lines`] succeeds.
#[must_use]
pub fn repair_quotes(text: &str) -> String {
    let mut depth = 0usize;
    let mut dropped = 0usize;
    let mut out = String::with_capacity(text.len());

    for c in text.chars() {
        match c {
            OPENING_QUOTE => {
                depth += 1;
                out.push(c);
            }
            CLOSING_QUOTE if depth == 0 => dropped += 1,
            CLOSING_QUOTE => {
                depth -= 1;
                out.push(c);
            }
            _ => out.push(c),
        }
    }

    if depth > 0 || dropped > 0 {
        tracing::warn!(
            unclosed = depth,
            unopened = dropped,
            "Repairing unbalanced quotation marks"
        );
    }
    for _ in 0..depth {
        out.push(CLOSING_QUOTE);
    }
    out
}

/// Undo words split by a hyphen at a line end.
#[must_use]
pub fn rejoin_hyphenated(text: &str) -> String {
    HYPHENATED_BREAK.replace_all(text, "$1$2").into_owned()
}

/// Put every instruction on one line and mark section headings.
///
/// Lines starting with a bulletpoint marker open a new instruction. Lines
/// naming a section open a `## ` heading. All other lines continue the
/// line before them.
#[must_use]
pub fn pull_instruction_lines(text: &str) -> String {
    let mut lines: Vec<String> = Vec::new();

    for line in text.lines().map(str::trim).filter(|line| !line.is_empty()) {
        if INSTRUCTION_START.is_match(line) {
            lines.push(line.to_string());
        } else if HEADING_START.is_match(line) {
            lines.push(format!("## {line}"));
        } else if let Some(last) = lines.last_mut() {
            last.push(' ');
            last.push_str(line);
        } else {
            lines.push(line.to_string());
        }
    }

    lines.join("\n")
}

/// Prepare raw amendment text for [`change_request_lines`](super::change_request_lines).
pub fn normalize_amendment(text: &str, policy: QuotePolicy) -> Result<String> {
    let text: String = text.nfc().collect();
    let text = rejoin_hyphenated(&text);
    let text = match policy {
        QuotePolicy::Strict => join_quoted_lines(&text)?,
        QuotePolicy::Repair => join_quoted_lines(&repair_quotes(&text))?,
    };
    Ok(pull_instruction_lines(&text))
}
