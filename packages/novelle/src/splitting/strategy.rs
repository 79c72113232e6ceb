//! Strategies for cutting node text out of a segment.

use std::sync::LazyLock;

use regex::Regex;

use super::registry::MarkerCascade;

#[allow(clippy::expect_used)] // Static regex that is guaranteed to be valid
static LINE_BREAK: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\s*\n\s*").expect("valid regex"));

#[allow(clippy::expect_used)] // Static regex that is guaranteed to be valid
static MARKUP_TAG: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"<.*?>").expect("valid regex"));

/// Trait for the text-extraction half of splitting.
///
/// A segment is the text between one marker and the next marker of the
/// same level; it still contains the markers of finer levels.
pub trait SplitStrategy {
    /// Text owned by the node whose marker precedes `segment`.
    fn node_text(&self, segment: &str, cascade: &MarkerCascade) -> String;

    /// Bulletpoint label for a raw marker match.
    fn bulletpoint(&self, marker: &str) -> String {
        marker.trim().to_string()
    }
}

/// Strategy for source laws.
///
/// Node text runs up to the first marker of any level. Line breaks inside
/// are joined with single spaces and markup tags are dropped.
pub struct SourceLawStrategy;

impl SplitStrategy for SourceLawStrategy {
    fn node_text(&self, segment: &str, cascade: &MarkerCascade) -> String {
        let end = cascade
            .first_marker_start(segment)
            .unwrap_or(segment.len());
        let own = MARKUP_TAG.replace_all(&segment[..end], "");
        LINE_BREAK.replace_all(own.trim(), " ").into_owned()
    }
}

/// Strategy for amending laws: node text is the first line of the segment.
pub struct AmendmentStrategy;

impl SplitStrategy for AmendmentStrategy {
    fn node_text(&self, segment: &str, _cascade: &MarkerCascade) -> String {
        segment
            .trim()
            .lines()
            .next()
            .unwrap_or_default()
            .trim()
            .to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::splitting::config::{create_amendment_cascade, create_source_law_cascade};

    #[test]
    fn test_source_text_stops_at_finer_marker() {
        let cascade = create_source_law_cascade();
        let text = SourceLawStrategy.node_text(
            " Widmung\n(1) Straßen werden\n gewidmet.\n(2) Weiteres.",
            &cascade,
        );
        assert_eq!(text, "Widmung");
    }

    #[test]
    fn test_source_text_joins_lines_and_strips_markup() {
        let cascade = create_source_law_cascade();
        let text =
            SourceLawStrategy.node_text(" Die <B>Straße</B> wird\n   gewidmet.\n", &cascade);
        assert_eq!(text, "Die Straße wird gewidmet.");
    }

    #[test]
    fn test_container_has_empty_text() {
        let cascade = create_source_law_cascade();
        assert_eq!(SourceLawStrategy.node_text("\n(1) Text", &cascade), "");
    }

    #[test]
    fn test_amendment_text_is_first_line() {
        let cascade = create_amendment_cascade();
        let text =
            AmendmentStrategy.node_text(" § 9 wird wie folgt geändert:\n1. In Absatz 1", &cascade);
        assert_eq!(text, "§ 9 wird wie folgt geändert:");
    }

    #[test]
    fn test_bulletpoint_is_trimmed_marker() {
        assert_eq!(SourceLawStrategy.bulletpoint("\n    (3)"), "(3)");
        assert_eq!(AmendmentStrategy.bulletpoint("## "), "##");
    }
}
