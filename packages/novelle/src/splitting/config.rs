//! Marker cascades for German laws and amending laws.

use std::sync::LazyLock;

use regex::Regex;

use super::registry::MarkerCascade;
use super::types::MarkerSpec;

// Source-law markers start on a fresh line; indentation is allowed below
// section level so rendered trees can be read back.
#[allow(clippy::expect_used)] // Static regex that is guaranteed to be valid
static SOURCE_CHAPTER: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\nKapitel\s*\d{1,3}").expect("valid regex"));

#[allow(clippy::expect_used)] // Static regex that is guaranteed to be valid
static SOURCE_SECTION: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\n§\s*\d{1,3}[a-z]?").expect("valid regex"));

#[allow(clippy::expect_used)] // Static regex that is guaranteed to be valid
static SOURCE_PARAGRAPH: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\n\s*\([a-z0-9]{1,3}\)").expect("valid regex"));

#[allow(clippy::expect_used)] // Static regex that is guaranteed to be valid
static SOURCE_ITEM: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\n\s*\d{1,2}\.").expect("valid regex"));

#[allow(clippy::expect_used)] // Static regex that is guaranteed to be valid
static SOURCE_SUFFIXED_ITEM: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\n\s*\d{1,2}[a-z]{1,2}\.").expect("valid regex"));

#[allow(clippy::expect_used)] // Static regex that is guaranteed to be valid
static SOURCE_LETTER: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\n\s*[a-z]\)").expect("valid regex"));

#[allow(clippy::expect_used)] // Static regex that is guaranteed to be valid
static SOURCE_DOUBLE_LETTER: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\n\s*[a-z]{2}\)").expect("valid regex"));

// Amendment markers are anchored at line starts.
#[allow(clippy::expect_used)] // Static regex that is guaranteed to be valid
static AMENDMENT_HEADING: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?m)^## ").expect("valid regex"));

#[allow(clippy::expect_used)] // Static regex that is guaranteed to be valid
static AMENDMENT_ITEM: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?m)^\d{1,2}\.").expect("valid regex"));

#[allow(clippy::expect_used)] // Static regex that is guaranteed to be valid
static AMENDMENT_LETTER: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?m)^[a-z]\)").expect("valid regex"));

#[allow(clippy::expect_used)] // Static regex that is guaranteed to be valid
static AMENDMENT_DOUBLE_LETTER: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?m)^[a-z][a-z]\)").expect("valid regex"));

#[allow(clippy::expect_used)] // Static regex that is guaranteed to be valid
static AMENDMENT_PARAGRAPH: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?m)^\([a-z0-9]\)").expect("valid regex"));

/// Create the cascade for the text of a source law.
///
/// ```text
/// Kapitel 1
/// └── § 1
///     └── (1)
///         └── 1. / 1a.
///             └── a)
///                 └── aa)
/// ```
#[must_use]
pub fn create_source_law_cascade() -> MarkerCascade {
    let mut cascade = MarkerCascade::new();

    cascade.register(
        MarkerSpec::new("chapter", SOURCE_CHAPTER.clone()).with_examples(["Kapitel 1", "Kapitel 12"]),
    );
    cascade.register(
        MarkerSpec::new("section", SOURCE_SECTION.clone()).with_examples(["§ 1", "§ 11a", "§12"]),
    );
    cascade.register(
        MarkerSpec::new("paragraph", SOURCE_PARAGRAPH.clone()).with_examples(["(1)", "(2a)", "    (3)"]),
    );
    cascade.register(MarkerSpec::new("item", SOURCE_ITEM.clone()).with_examples(["1.", "12."]));
    cascade.register(
        MarkerSpec::new("suffixed_item", SOURCE_SUFFIXED_ITEM.clone()).with_examples(["1a.", "3ab."]),
    );
    cascade.register(MarkerSpec::new("letter", SOURCE_LETTER.clone()).with_examples(["a)", "z)"]));
    cascade.register(
        MarkerSpec::new("double_letter", SOURCE_DOUBLE_LETTER.clone()).with_examples(["aa)"]),
    );

    cascade
}

/// Create the cascade for the instruction text of an amending law.
///
/// `## ` headings are inserted by
/// [`normalize_amendment`](crate::amendment::normalize_amendment) in front
/// of lines that name a section.
#[must_use]
pub fn create_amendment_cascade() -> MarkerCascade {
    let mut cascade = MarkerCascade::new();

    cascade.register(MarkerSpec::new("heading", AMENDMENT_HEADING.clone()).with_examples(["##"]));
    cascade.register(MarkerSpec::new("item", AMENDMENT_ITEM.clone()).with_examples(["1.", "13."]));
    cascade.register(MarkerSpec::new("letter", AMENDMENT_LETTER.clone()).with_examples(["a)"]));
    cascade.register(
        MarkerSpec::new("double_letter", AMENDMENT_DOUBLE_LETTER.clone()).with_examples(["aa)"]),
    );
    cascade.register(
        MarkerSpec::new("paragraph", AMENDMENT_PARAGRAPH.clone()).with_examples(["(1)", "(b)"]),
    );

    cascade
}
