//! Flattening of the HTML-like markup in law API bodies.

use std::sync::LazyLock;

use regex::Regex;

#[allow(clippy::expect_used)] // Static regex that is guaranteed to be valid
static FOOTNOTE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"<SUP.*?SUP>").expect("valid regex"));

#[allow(clippy::expect_used)] // Static regex that is guaranteed to be valid
static LIST_BOUNDARY: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"<DL.*?>|</DL>").expect("valid regex"));

#[allow(clippy::expect_used)] // Static regex that is guaranteed to be valid
static TERM_BOUNDARY: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"</DT>|<DT>").expect("valid regex"));

#[allow(clippy::expect_used)] // Static regex that is guaranteed to be valid
static DEFINITION_WRAPPER: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"</LA></DD>|<DD.*?>|<LA.*?>").expect("valid regex"));

#[allow(clippy::expect_used)] // Static regex that is guaranteed to be valid
static ANY_TAG: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"<.*?>").expect("valid regex"));

/// Whether a body has nested structure worth parsing into child nodes.
///
/// True for bodies with more than one `<P>` paragraph or a `<DL` list.
#[must_use]
pub fn is_structured(body: &str) -> bool {
    body.matches("<P>").count() > 1 || body.contains("<DL")
}

/// Turn paragraph and definition-list markup into newline-separated text.
///
/// Paragraphs and list terms each start a new line, so their markers are
/// found by the source-law cascade. Footnote links are dropped.
#[must_use]
pub fn flatten_markup(body: &str) -> String {
    let body = body.replace("<P>", "\n").replace("</P>", "");
    let body = FOOTNOTE.replace_all(&body, "");
    let body = LIST_BOUNDARY.replace_all(&body, "");

    TERM_BOUNDARY
        .split(&body)
        .map(|piece| DEFINITION_WRAPPER.replace_all(piece, "").into_owned())
        .collect::<Vec<_>>()
        .join("\n")
}

/// Remove every tag and trim the result.
#[must_use]
pub fn strip_markup(text: &str) -> String {
    ANY_TAG.replace_all(text, "").trim().to_string()
}
