//! Classification of instruction lines into changes.

use std::sync::LazyLock;

use regex::Regex;

use super::extract::{parse_change_text, parse_location, parse_sentences, strip_quoted};
use super::normalize::{normalize_amendment, QuotePolicy};
use super::types::{Change, ChangeType};
use crate::config::{AMENDMENT_ROOT_BULLETPOINT, HEADING_BULLETPOINT};
use crate::error::Result;
use crate::splitting::{create_amendment_cascade, AmendmentStrategy, SplitEngine};

#[allow(clippy::expect_used)] // Static regex that is guaranteed to be valid
static RENUMBERING_SINGULAR: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"(?:Absatz|Paragraph|Nummer)\s(?:\d{1,2}|[a-z]{1,2}\)?)\swird\s(?:Absatz|Paragraph|Nummer)\s(?:\d{1,2}|[a-z]{1,2}\)?)",
    )
    .expect("valid regex")
});

#[allow(clippy::expect_used)] // Static regex that is guaranteed to be valid
static RENUMBERING_PLURAL: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"(?:Absatz|Absätze|Abätze|Paragraph|Nummern)\s(?:\d{1,2}|[a-z]{1,2}\)?)\s(?:bis|und)\s(?:\d{1,2}|[a-z]{1,2}\)?)\swerden\s(?:der|die|das)?\s?(?:Absatz|Absätze|Abätze|Paragraph|Nummern)\s(?:\d{1,2}|[a-z]{1,2}\)?)\s(?:bis|und)\s(?:\d{1,2}|[a-z]{1,2}\)?)",
    )
    .expect("valid regex")
});

#[allow(clippy::expect_used)] // Static regex that is guaranteed to be valid
static OPERATION_KEYWORD: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\b(?:eingefügt|ersetzt|gefasst|angefügt|gestrichen|aufgehoben|vorangestellt)\b")
        .expect("valid regex")
});

/// Flatten normalized amendment text into one line per instruction.
///
/// Each leaf of the amendment tree yields its ancestors' labels and texts
/// joined from the top down; `##` headings contribute their text only.
/// Text without any marker yields its non-empty lines.
pub fn change_request_lines(text: &str) -> Result<Vec<String>> {
    let engine = SplitEngine::new(create_amendment_cascade(), AmendmentStrategy);
    let tree = engine.build(AMENDMENT_ROOT_BULLETPOINT, "", text)?;
    let root = tree.root();

    if tree.children(root).is_empty() {
        return Ok(text
            .lines()
            .map(str::trim)
            .filter(|line| !line.is_empty())
            .map(String::from)
            .collect());
    }

    let lines = tree
        .leaves()
        .into_iter()
        .map(|leaf| {
            tree.path_to(leaf)
                .into_iter()
                .skip(1)
                .map(|id| {
                    let bulletpoint = tree.bulletpoint(id);
                    let text = tree.text(id);
                    if bulletpoint == HEADING_BULLETPOINT {
                        text.to_string()
                    } else {
                        format!("{bulletpoint} {text}")
                    }
                })
                .collect::<Vec<_>>()
                .join(" ")
        })
        .collect();

    Ok(lines)
}

/// Classify one instruction line.
///
/// Always yields exactly one change; lines that match no operation keyword
/// or more than one are kept as sentinel kinds for review.
#[must_use]
pub fn parse_change_request_line(line: &str) -> Vec<Change> {
    let mut unquoted = strip_quoted(line);
    let mut renumbering = false;
    for pattern in [&*RENUMBERING_SINGULAR, &*RENUMBERING_PLURAL] {
        if pattern.is_match(&unquoted) {
            renumbering = true;
            unquoted = pattern.replace_all(&unquoted, "").into_owned();
        }
    }

    let mut kinds: Vec<ChangeType> = Vec::new();
    for keyword in OPERATION_KEYWORD.find_iter(&unquoted) {
        if let Some(kind) = ChangeType::from_keyword(keyword.as_str()) {
            if !kinds.contains(&kind) {
                kinds.push(kind);
            }
        }
    }

    let change_type = match kinds.as_slice() {
        [kind] => *kind,
        [] if renumbering => ChangeType::Renumbering,
        [] => ChangeType::Unknown,
        _ => ChangeType::MultipleChanges,
    };

    let change = Change {
        location: parse_location(&unquoted),
        sentences: parse_sentences(&unquoted),
        text: parse_change_text(line),
        change_type,
        raw_text: line.to_string(),
    };

    if change.change_type.is_unresolved() {
        tracing::warn!(change_type = %change.change_type, line = %line, "Could not classify instruction");
    } else {
        tracing::debug!(change_type = %change.change_type, location = ?change.location, "Parsed instruction");
    }

    vec![change]
}

/// Parse raw amendment text into changes.
pub fn parse_changes(text: &str, policy: QuotePolicy) -> Result<Vec<Change>> {
    let normalized = normalize_amendment(text, policy)?;
    let changes: Vec<Change> = change_request_lines(&normalized)?
        .iter()
        .flat_map(|line| parse_change_request_line(line))
        .collect();

    tracing::info!(changes = changes.len(), "Parsed amendment");
    Ok(changes)
}
