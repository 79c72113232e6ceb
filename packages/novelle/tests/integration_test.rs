//! End-to-end tests for the amendment pipeline.
//!
//! Uses a small road law and an amending law that touches it at every
//! level: words, punctuation, whole paragraphs, new paragraphs and
//! sentences, plus one instruction whose target does not exist.

use std::fs;
use std::path::Path;

use pretty_assertions::assert_eq;

use novelle::amendment::change_request_lines;
use novelle::apply::Outcome;
use novelle::source::source_law_engine;
use novelle::{
    build_from_segments, build_from_text, parse_changes, Amender, Change, ChangeType, LawSegment,
    LawTree, QuotePolicy,
};

/// Load fixture file content.
fn load_fixture(name: &str) -> String {
    let path = Path::new(env!("CARGO_MANIFEST_DIR"))
        .join("tests")
        .join("fixtures")
        .join(name);
    fs::read_to_string(&path).unwrap_or_else(|e| panic!("Failed to load {}: {}", path.display(), e))
}

fn source_tree() -> LawTree {
    build_from_text("Straßengesetz", &load_fixture("strassengesetz.txt")).unwrap()
}

fn changes() -> Vec<Change> {
    parse_changes(&load_fixture("aenderungsgesetz.txt"), QuotePolicy::Strict).unwrap()
}

const SOURCE_RENDERED: &str = "Titel: Straßengesetz
    Kapitel 1 Allgemeine Bestimmungen
        § 1 Geltungsbereich
            (1) Dieses Gesetz gilt für alle öffentlichen Straßen.
            (2) Es gilt nicht für Privatwege.
        § 2 Begriffsbestimmungen
            (1) Öffentliche Straßen sind:
                1. Fahrbahnen,
                2. Gehwege,
                3. Radwege.
            (2) Zur Straße gehören der Straßenkörper und der Luftraum.
    Kapitel 2 Nutzung
        § 9 Sondernutzung
            (1) Die Benutzung der befahrbaren Straßen über den Gemeingebrauch hinaus ist Sondernutzung. Sie bedarf der Erlaubnis.
            (2) Die Erlaubnis wird auf Zeit erteilt.
            (3) Gebühren können erhoben werden.
";

const MODIFIED_RENDERED: &str = "Titel: Straßengesetz
    Kapitel 1 Allgemeine Bestimmungen
        § 1 Geltungsbereich
            (1) Dieses Gesetz gilt für alle dem öffentlichen Verkehr gewidmeten Straßen.
            (2) Es gilt nicht für Privatwege.
        § 2 Begriffsbestimmungen
            (1) Öffentliche Straßen sind:
                1. Fahrbahnen,
                2. Gehwege,
                3. Radwege,
    Kapitel 2 Nutzung
        § 9 Sondernutzung
            (1) Die Benutzung der befahrbaren Straßen über den Gemeingebrauch (Sondernutzung) hinaus ist Sondernutzung. Sie bedarf der Erlaubnis.
            (2) Die Erlaubnis wird auf Zeit erteilt.
            (2a) Die Erlaubnis kann widerrufen werden.
            (3) Gebühren können erhoben werden. Die Gebühren fließen der Gemeinde zu.
";

#[test]
fn test_source_law_tree() {
    assert_eq!(source_tree().to_text(), SOURCE_RENDERED);
}

#[test]
fn test_amendment_lines() {
    let normalized = novelle::amendment::normalize_amendment(
        &load_fixture("aenderungsgesetz.txt"),
        QuotePolicy::Strict,
    )
    .unwrap();
    let lines = change_request_lines(&normalized).unwrap();

    assert_eq!(lines.len(), 7);
    assert_eq!(
        lines[4],
        "3. § 9 wird wie folgt geändert: b) Nach Absatz 2 wird folgender Absatz 2a eingefügt: „(2a) Die Erlaubnis kann widerrufen werden.“"
    );
}

#[test]
fn test_parsed_changes() {
    let changes = changes();

    let kinds: Vec<ChangeType> = changes.iter().map(|c| c.change_type).collect();
    assert_eq!(
        kinds,
        vec![
            ChangeType::Replace,
            ChangeType::Replace,
            ChangeType::Cancelled,
            ChangeType::InsertAfter,
            ChangeType::InsertAfter,
            ChangeType::Append,
            ChangeType::Cancelled,
        ]
    );
    assert_eq!(changes[1].location, vec!["§ 2", "(1)", "3."]);
    assert_eq!(changes[1].text, vec![".", ","]);
    assert_eq!(changes[3].sentences, vec!["Satz 1"]);
    assert_eq!(changes[6].location, vec!["§ 12"]);
}

#[test]
fn test_full_pipeline() {
    let source = source_tree();
    let amendment = Amender::default().apply_changes(&source, &changes()).unwrap();

    assert_eq!(amendment.tree.to_text(), MODIFIED_RENDERED);
    assert_eq!(source.to_text(), SOURCE_RENDERED, "source tree must stay untouched");
    assert_eq!(amendment.results.len(), 7);
    assert_eq!(amendment.applied, 6);
    assert_eq!(
        amendment.summary(),
        "Successfully applied 6 out of 7 changes (85.7%)"
    );

    let last = &amendment.results[6];
    assert_eq!(last.outcome, Outcome::NotFound);
    assert_eq!(last.message, "Location '§ 12' not found below 'Titel:'");
}

#[test]
fn test_unresolvable_change_does_not_stop_batch() {
    let source = source_tree();
    let changes = vec![
        Change::new(ChangeType::Append, "1. Dem § 1 Absatz 2 wird ... angefügt.")
            .with_location(["§ 1", "(2)"])
            .with_text(["Ausnahmen regelt die Gemeinde."]),
        Change::new(ChangeType::Replace, "2. In § 77 wird ... ersetzt.")
            .with_location(["§ 77"])
            .with_text(["a", "b"]),
    ];

    let amendment = Amender::default().apply_changes(&source, &changes).unwrap();

    assert_eq!(amendment.results.len(), 2);
    assert_eq!(amendment.applied, 1);
    assert_eq!(amendment.results[1].status(), 0);
}

#[test]
fn test_ambiguous_location_is_not_guessed() {
    let source = source_tree();
    let changes = vec![Change::new(ChangeType::Cancelled, "1. Absatz 2 wird aufgehoben.")
        .with_location(["(2)"])];

    let amendment = Amender::default().apply_changes(&source, &changes).unwrap();

    assert_eq!(amendment.results[0].outcome, Outcome::NotFound);
    assert!(amendment.results[0].message.contains("ambiguous"));
    assert_eq!(amendment.tree.to_text(), SOURCE_RENDERED);
}

#[test]
fn test_render_parse_round_trip() {
    for tree in [source_tree(), {
        let source = source_tree();
        Amender::default().apply_changes(&source, &changes()).unwrap().tree
    }] {
        let rendered = tree.to_text();
        let body: Vec<&str> = rendered.lines().skip(1).map(str::trim_start).collect();

        let reparsed = source_law_engine()
            .build(
                tree.bulletpoint(tree.root()),
                tree.text(tree.root()),
                &format!("\n{}", body.join("\n")),
            )
            .unwrap();

        assert_eq!(reparsed.to_text(), rendered);
    }
}

#[test]
fn test_dictionary_round_trip() {
    let tree = source_tree();
    let restored = LawTree::from_json(&tree.to_json().unwrap()).unwrap();
    assert_eq!(restored.to_text(), tree.to_text());
}

#[test]
fn test_segments_pipeline() {
    let segments: Vec<LawSegment> =
        serde_json::from_str(&load_fixture("strassengesetz.json")).unwrap();
    let source = build_from_segments("Straßengesetz", &segments).unwrap();
    let changes = parse_changes(
        "1. In § 1 Absatz 2 wird das Wort „Privatwege“ durch das Wort „Feldwege“ ersetzt.\n2. § 3 wird aufgehoben.",
        QuotePolicy::Strict,
    )
    .unwrap();

    let amendment = Amender::default().apply_changes(&source, &changes).unwrap();

    assert_eq!(amendment.applied, 2);
    assert_eq!(
        amendment.tree.to_text(),
        "Titel: Straßengesetz
    § 1 Geltungsbereich
        (1) Dieses Gesetz gilt für alle öffentlichen Straßen.
        (2) Es gilt nicht für Feldwege.
    § 2 Widmung Straßen werden durch Verfügung gewidmet.
"
    );
}

#[test]
fn test_unbalanced_quotes_fail_strict_and_repair_lenient() {
    let text = "1. In § 1 Absatz 1 wird das Wort „öffentlichen durch das Wort „gewidmeten“ ersetzt.";

    assert!(parse_changes(text, QuotePolicy::Strict).is_err());
    let changes = parse_changes(text, QuotePolicy::Repair).unwrap();
    assert_eq!(changes.len(), 1);
}
