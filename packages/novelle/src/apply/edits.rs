//! Edit operations on a resolved target node.
//!
//! Every operation branches on the number of text fragments and on the
//! sentence reference of the change. Combinations without a defined
//! meaning produce a failed [`ChangeResult`] and leave the tree untouched.
//! `Err` is reserved for inconsistencies of the tree itself.

use std::sync::LazyLock;

use regex::Regex;

use super::result::ChangeResult;
use super::sentences::{split_sentences, SentenceRef, SentenceSplitter};
use crate::amendment::{collapse_whitespace, Change};
use crate::error::{NovelleError, Result};
use crate::source::source_law_engine;
use crate::tree::{LawTree, NodeId};

/// Bulletpoint marker at the start of inserted or rephrased text.
#[allow(clippy::expect_used)] // Static regex that is guaranteed to be valid
static LEADING_MARKER: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"^(?:Kapitel\s*\d{1,3}|§\s*\d{1,3}[a-z]?|\([a-z0-9]{1,3}\)|\d{1,2}\.|[a-z][a-z]\)|[a-z]\))",
    )
    .expect("valid regex")
});

#[allow(clippy::expect_used)] // Static regex that is guaranteed to be valid
static SPACE_RUN: LazyLock<Regex> = LazyLock::new(|| Regex::new(r" {2,}").expect("valid regex"));

/// Width of the indentation that stands for a line break in quoted structure.
const QUOTED_INDENT: &str = "    ";

/// Split a leading bulletpoint marker off `text`.
fn leading_marker(text: &str) -> Option<(String, &str)> {
    let text = text.trim_start();
    let m = LEADING_MARKER.find(text)?;
    Some((collapse_whitespace(m.as_str()), text[m.end()..].trim()))
}

fn is_word_char(c: char) -> bool {
    c.is_alphanumeric() || c == '_'
}

/// Insert `insertion` after the first whole-word occurrence of `anchor`.
fn insert_after_anchor(text: &str, anchor: &str, insertion: &str) -> Result<Option<String>> {
    let anchor = collapse_whitespace(anchor);
    if anchor.is_empty() {
        return Ok(None);
    }

    let mut pattern = String::new();
    if anchor.starts_with(is_word_char) {
        pattern.push_str(r"\b");
    }
    pattern.push_str(&regex::escape(&anchor).replace(' ', r"\s+"));
    if anchor.ends_with(is_word_char) {
        pattern.push_str(r"\b");
    }

    let Some(m) = Regex::new(&pattern)?.find(text) else {
        return Ok(None);
    };
    let insertion = collapse_whitespace(insertion);
    let separator = if insertion.starts_with([',', ';', '.']) {
        ""
    } else {
        " "
    };
    Ok(Some(format!(
        "{}{separator}{insertion}{}",
        &text[..m.end()],
        &text[m.end()..]
    )))
}

/// Parsed sentence reference of a change, or the message explaining why
/// it cannot be used.
fn sentence_ref(change: &Change) -> std::result::Result<Option<SentenceRef>, String> {
    match change.sentences.as_slice() {
        [] => Ok(None),
        [reference] => SentenceRef::parse(reference)
            .map(Some)
            .ok_or_else(|| format!("Unreadable sentence reference '{reference}'")),
        many => Err(format!("{} sentence references not supported", many.len())),
    }
}

fn check_indices(indices: &[usize], count: usize) -> std::result::Result<(), String> {
    match indices.iter().find(|&&i| i >= count) {
        Some(i) => Err(format!(
            "Sentence {} out of range, node has {count} sentence(s)",
            i + 1
        )),
        None => Ok(()),
    }
}

/// Edit operations, parameterized by the sentence splitter they use.
pub struct Editor<'a, S: SentenceSplitter + ?Sized> {
    splitter: &'a S,
}

impl<'a, S: SentenceSplitter + ?Sized> Editor<'a, S> {
    /// Create a new editor.
    #[must_use]
    pub fn new(splitter: &'a S) -> Self {
        Self { splitter }
    }

    fn sentences(&self, text: &str) -> Vec<String> {
        split_sentences(self.splitter, text)
    }

    /// Replace text, either in the whole node or within sentences.
    pub fn replace(
        &self,
        tree: &mut LawTree,
        node: NodeId,
        change: &Change,
    ) -> Result<ChangeResult> {
        let reference = match sentence_ref(change) {
            Ok(reference) => reference,
            Err(message) => return Ok(ChangeResult::failed(change, node, message)),
        };
        if let [old, _] = change.text.as_slice() {
            if collapse_whitespace(old).is_empty() {
                return Ok(ChangeResult::failed(change, node, "Empty text to replace"));
            }
        }
        let text = tree.node(node)?.text.clone();

        let new_text = match (change.text.as_slice(), reference) {
            ([old, new], None) => text.replace(&collapse_whitespace(old), &collapse_whitespace(new)),
            ([replacement], Some(reference)) => {
                let mut sentences = self.sentences(&text);
                let indices = reference.indices();
                if let Err(message) = check_indices(&indices, sentences.len()) {
                    return Ok(ChangeResult::failed(change, node, message));
                }
                let Some((&first, rest)) = indices.split_first() else {
                    return Ok(ChangeResult::failed(change, node, "Empty sentence reference"));
                };
                for &i in rest.iter().rev() {
                    sentences.remove(i);
                }
                sentences[first] = collapse_whitespace(replacement);
                sentences.join(" ")
            }
            ([old, new], Some(SentenceRef::Single(n))) => {
                let mut sentences = self.sentences(&text);
                if let Err(message) = check_indices(&[n - 1], sentences.len()) {
                    return Ok(ChangeResult::failed(change, node, message));
                }
                sentences[n - 1] =
                    sentences[n - 1].replace(&collapse_whitespace(old), &collapse_whitespace(new));
                sentences.join(" ")
            }
            ([_, _], Some(_)) => {
                return Ok(ChangeResult::failed(
                    change,
                    node,
                    "range+multi-text replace not supported",
                ))
            }
            (texts, reference) => {
                return Ok(ChangeResult::failed(
                    change,
                    node,
                    format!(
                        "replace with {} text fragment(s) {} sentence reference not supported",
                        texts.len(),
                        if reference.is_some() { "and a" } else { "and no" }
                    ),
                ))
            }
        };

        tree.set_text(node, new_text)?;
        Ok(ChangeResult::applied(change, node, "Text replaced"))
    }

    /// Insert text after anchors, a new sentence, or new structure.
    pub fn insert_after(
        &self,
        tree: &mut LawTree,
        node: NodeId,
        change: &Change,
    ) -> Result<ChangeResult> {
        let reference = match sentence_ref(change) {
            Ok(reference) => reference,
            Err(message) => return Ok(ChangeResult::failed(change, node, message)),
        };

        match change.text.as_slice() {
            [] => Ok(ChangeResult::failed(change, node, "insert_after without text")),
            [text] if reference.is_none() && leading_marker(text).is_some() => {
                self.insert_sibling(tree, node, change, text)
            }
            [text] => match reference {
                Some(SentenceRef::Single(n)) => {
                    let mut sentences = self.sentences(tree.text(node));
                    if n > sentences.len() {
                        return Ok(ChangeResult::failed(
                            change,
                            node,
                            format!(
                                "Sentence {n} out of range, node has {} sentence(s)",
                                sentences.len()
                            ),
                        ));
                    }
                    sentences.insert(n, collapse_whitespace(text));
                    tree.set_text(node, sentences.join(" "))?;
                    Ok(ChangeResult::applied(change, node, format!("Sentence inserted after sentence {n}")))
                }
                Some(_) => Ok(ChangeResult::failed(
                    change,
                    node,
                    "insert_after with a sentence range or enumeration not supported",
                )),
                None => Ok(ChangeResult::failed(
                    change,
                    node,
                    "insert_after with one text needs a sentence reference or a bulletpoint",
                )),
            },
            texts if texts.len() % 2 == 0 => {
                let mut text = tree.text(node).to_string();
                let mut missing = Vec::new();
                for pair in texts.chunks(2) {
                    let [anchor, insertion] = pair else {
                        continue;
                    };
                    match insert_after_anchor(&text, anchor, insertion)? {
                        Some(updated) => text = updated,
                        None => missing.push(anchor.as_str()),
                    }
                }

                if missing.len() == texts.len() / 2 {
                    return Ok(ChangeResult::failed(
                        change,
                        node,
                        format!("Anchor text not found: {}", missing.join(", ")),
                    ));
                }
                tree.set_text(node, text)?;
                let message = if missing.is_empty() {
                    "Text inserted".to_string()
                } else {
                    format!("Text inserted, anchors not found: {}", missing.join(", "))
                };
                Ok(ChangeResult::applied(change, node, message))
            }
            texts => Ok(ChangeResult::failed(
                change,
                node,
                format!("insert_after with {} text fragments not supported", texts.len()),
            )),
        }
    }

    /// Insert a structural sibling of `node`, next to it or at top level.
    fn insert_sibling(
        &self,
        tree: &mut LawTree,
        node: NodeId,
        change: &Change,
        text: &str,
    ) -> Result<ChangeResult> {
        let Some((marker, rest)) = leading_marker(text) else {
            return Ok(ChangeResult::failed(change, node, "Inserted text has no bulletpoint"));
        };
        let Some(parent) = tree.parent(node) else {
            return Ok(ChangeResult::failed(
                change,
                node,
                "Cannot insert a sibling of the root node",
            ));
        };

        let root = tree.root();
        let target = if tree.find_child(parent, &marker).is_some() {
            Some(parent)
        } else if tree.find_child(root, &marker).is_some() {
            Some(root)
        } else {
            None
        };

        match target {
            Some(target) => self.insert_numbered(tree, target, node, change, &marker, rest),
            None => self.insert_parsed(tree, parent, node, change, text),
        }
    }

    /// Insert a node at `marker`, renumbering the siblings that follow.
    fn insert_numbered(
        &self,
        tree: &mut LawTree,
        parent: NodeId,
        node: NodeId,
        change: &Change,
        marker: &str,
        text: &str,
    ) -> Result<ChangeResult> {
        match tree.insert_child(parent, collapse_whitespace(text), marker) {
            Ok(_) => Ok(ChangeResult::applied(
                change,
                node,
                format!("Inserted {marker} below {}", tree.bulletpoint(parent)),
            )),
            Err(NovelleError::NonNumericBulletpoint(label)) => Ok(ChangeResult::failed(
                change,
                node,
                format!("Cannot renumber '{label}' to make room for {marker}"),
            )),
            Err(e) => Err(e),
        }
    }

    /// Parse `text` as new structure below `parent` and restore the order.
    fn insert_parsed(
        &self,
        tree: &mut LawTree,
        parent: NodeId,
        node: NodeId,
        change: &Change,
        text: &str,
    ) -> Result<ChangeResult> {
        let mut prepared = text.replace(QUOTED_INDENT, "\n");
        for &sibling in tree.children(parent) {
            let label = tree.bulletpoint(sibling);
            prepared = prepared.replace(&format!("\n{label}"), &format!(" {label}"));
        }

        let added = source_law_engine().split(tree, parent, &format!("\n{prepared}"))?;
        if added == 0 {
            return Ok(ChangeResult::failed(
                change,
                node,
                "No bulletpoint structure found in inserted text",
            ));
        }
        tree.sort_children(parent)?;
        Ok(ChangeResult::applied(
            change,
            node,
            format!("Inserted {added} node(s) below {}", tree.bulletpoint(parent)),
        ))
    }

    /// Insert a structural child of `node`.
    fn insert_child_structure(
        &self,
        tree: &mut LawTree,
        node: NodeId,
        change: &Change,
        marker: &str,
        text: &str,
        rest: &str,
    ) -> Result<ChangeResult> {
        if tree.find_child(node, marker).is_some() {
            self.insert_numbered(tree, node, node, change, marker, rest)
        } else {
            self.insert_parsed(tree, node, node, change, text)
        }
    }

    /// Replace the node text, or one sentence of it, with new wording.
    pub fn rephrase(
        &self,
        tree: &mut LawTree,
        node: NodeId,
        change: &Change,
    ) -> Result<ChangeResult> {
        let reference = match sentence_ref(change) {
            Ok(reference) => reference,
            Err(message) => return Ok(ChangeResult::failed(change, node, message)),
        };
        let [text] = change.text.as_slice() else {
            return Ok(ChangeResult::failed(
                change,
                node,
                format!("rephrase with {} text fragments not supported", change.text.len()),
            ));
        };
        let wording = match leading_marker(text) {
            Some((_, rest)) => collapse_whitespace(rest),
            None => collapse_whitespace(text),
        };

        match reference {
            None => {
                tree.set_text(node, wording)?;
                Ok(ChangeResult::applied(change, node, "Text rephrased"))
            }
            Some(SentenceRef::Single(n)) => {
                let mut sentences = self.sentences(tree.text(node));
                if let Err(message) = check_indices(&[n - 1], sentences.len()) {
                    return Ok(ChangeResult::failed(change, node, message));
                }
                sentences[n - 1] = wording;
                tree.set_text(node, sentences.join(" "))?;
                Ok(ChangeResult::applied(change, node, format!("Sentence {n} rephrased")))
            }
            Some(_) => Ok(ChangeResult::failed(
                change,
                node,
                "rephrase with a sentence range or enumeration not supported",
            )),
        }
    }

    /// Add text or a structural child at the end of the node.
    pub fn append(&self, tree: &mut LawTree, node: NodeId, change: &Change) -> Result<ChangeResult> {
        let [text] = change.text.as_slice() else {
            return Ok(ChangeResult::failed(
                change,
                node,
                format!("append with {} text fragments not supported", change.text.len()),
            ));
        };

        if let Some((marker, rest)) = leading_marker(text) {
            return self.insert_child_structure(tree, node, change, &marker, text, rest);
        }

        let addition = collapse_whitespace(text);
        let current = tree.text(node).trim_end();
        let new_text = if current.is_empty() {
            addition
        } else {
            format!("{current} {addition}")
        };
        tree.set_text(node, new_text)?;
        Ok(ChangeResult::applied(change, node, "Text appended"))
    }

    /// Add text or a structural child at the start of the node.
    pub fn prepend(&self, tree: &mut LawTree, node: NodeId, change: &Change) -> Result<ChangeResult> {
        let [text] = change.text.as_slice() else {
            return Ok(ChangeResult::failed(
                change,
                node,
                format!("prepend with {} text fragments not supported", change.text.len()),
            ));
        };

        if let Some((marker, rest)) = leading_marker(text) {
            return self.insert_child_structure(tree, node, change, &marker, text, rest);
        }

        let addition = collapse_whitespace(text);
        let current = tree.text(node).trim_start();
        let new_text = if current.is_empty() {
            addition
        } else {
            format!("{addition} {current}")
        };
        tree.set_text(node, new_text)?;
        Ok(ChangeResult::applied(change, node, "Text prepended"))
    }

    /// Delete literal text from the node.
    ///
    /// With several fragments the first one only names the position and
    /// the remaining fragments, joined by spaces, are deleted.
    pub fn delete_after(
        &self,
        tree: &mut LawTree,
        node: NodeId,
        change: &Change,
    ) -> Result<ChangeResult> {
        let target = match change.text.as_slice() {
            [] => return Ok(ChangeResult::failed(change, node, "delete_after without text")),
            [single] => collapse_whitespace(single),
            [_, rest @ ..] => rest
                .iter()
                .map(|fragment| collapse_whitespace(fragment))
                .collect::<Vec<_>>()
                .join(" "),
        };

        let text = tree.text(node).replace(&target, "");
        let text = SPACE_RUN.replace_all(&text, " ").trim().to_string();
        tree.set_text(node, text)?;
        Ok(ChangeResult::applied(change, node, "Text deleted"))
    }

    /// Remove the node from its parent, or remove sentences from its text.
    pub fn cancelled(
        &self,
        tree: &mut LawTree,
        node: NodeId,
        change: &Change,
    ) -> Result<ChangeResult> {
        let reference = match sentence_ref(change) {
            Ok(reference) => reference,
            Err(message) => return Ok(ChangeResult::failed(change, node, message)),
        };
        if !change.text.is_empty() {
            return Ok(ChangeResult::failed(
                change,
                node,
                format!("cancelled with {} text fragments not supported", change.text.len()),
            ));
        }

        match reference {
            None => {
                let Some(parent) = tree.parent(node) else {
                    return Ok(ChangeResult::failed(change, node, "Cannot remove the root node"));
                };
                let bulletpoint = tree.bulletpoint(node).to_string();
                tree.remove_child(parent, &bulletpoint)?;
                Ok(ChangeResult::applied(
                    change,
                    node,
                    format!("Removed {bulletpoint} from {}", tree.bulletpoint(parent)),
                ))
            }
            Some(reference) => {
                let mut sentences = self.sentences(tree.text(node));
                let indices = reference.indices();
                if let Err(message) = check_indices(&indices, sentences.len()) {
                    return Ok(ChangeResult::failed(change, node, message));
                }
                for &i in indices.iter().rev() {
                    sentences.remove(i);
                }
                tree.set_text(node, sentences.join(" "))?;
                Ok(ChangeResult::applied(
                    change,
                    node,
                    format!("Removed {} sentence(s)", indices.len()),
                ))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::amendment::ChangeType;
    use crate::apply::sentences::RuleSplitter;
    use pretty_assertions::assert_eq;

    /// § 1 "Test parent node" with a single child (1) holding `text`.
    fn tree_with(text: &str) -> (LawTree, NodeId) {
        let mut tree = LawTree::new("§ 1", "Test parent node");
        let root = tree.root();
        let node = tree.add_child(root, "(1)", text).unwrap();
        (tree, node)
    }

    fn change(kind: ChangeType, text: &[&str], sentences: &[&str]) -> Change {
        Change::new(kind, "(1) - Change something in this test.")
            .with_location(["(1)"])
            .with_text(text.iter().copied())
            .with_sentences(sentences.iter().copied())
    }

    fn editor() -> Editor<'static, RuleSplitter> {
        Editor::new(&RuleSplitter)
    }

    #[test]
    fn test_leading_marker() {
        assert_eq!(leading_marker("(2) Neu."), Some(("(2)".to_string(), "Neu.")));
        assert_eq!(leading_marker("§  11a Titel"), Some(("§ 11a".to_string(), "Titel")));
        assert_eq!(leading_marker("aa) Text"), Some(("aa)".to_string(), "Text")));
        assert_eq!(leading_marker("Kein Marker"), None);
    }

    #[test]
    fn test_replace_success() {
        let (mut tree, node) = tree_with("Test text to replace;");
        let change = change(ChangeType::Replace, &["text to replace", "replaced"], &[]);

        let res = editor().replace(&mut tree, node, &change).unwrap();
        assert_eq!(res.status(), 1);
        assert_eq!(tree.text(node), "Test replaced;");
    }

    #[test]
    fn test_replace_collapses_whitespace_in_fragments() {
        let (mut tree, node) = tree_with("Das Wort befahrbaren.");
        let change = change(ChangeType::Replace, &["befahrbaren", "zum Befahren  bestimmten"], &[]);

        editor().replace(&mut tree, node, &change).unwrap();
        assert_eq!(tree.text(node), "Das Wort zum Befahren bestimmten.");
    }

    #[test]
    fn test_replace_fails_with_one_text() {
        let (mut tree, node) = tree_with("Test text to replace;");
        let change = change(ChangeType::Replace, &["replaced"], &[]);

        let res = editor().replace(&mut tree, node, &change).unwrap();
        assert_eq!(res.status(), 0);
        assert_eq!(tree.text(node), "Test text to replace;");
    }

    #[test]
    fn test_replace_empty_old_text_fails() {
        let (mut tree, node) = tree_with("Abc.");
        let change = change(ChangeType::Replace, &[" ", "X"], &[]);

        let res = editor().replace(&mut tree, node, &change).unwrap();
        assert_eq!(res.status(), 0);
        assert_eq!(res.message, "Empty text to replace");
        assert_eq!(tree.text(node), "Abc.");
    }

    #[test]
    fn test_replace_sentence_wholesale() {
        let (mut tree, node) = tree_with("Erster Satz. Zweiter Satz. Dritter Satz.");
        let change = change(ChangeType::Replace, &["Neuer Satz."], &["Satz 2"]);

        editor().replace(&mut tree, node, &change).unwrap();
        assert_eq!(tree.text(node), "Erster Satz. Neuer Satz. Dritter Satz.");
    }

    #[test]
    fn test_replace_sentence_range() {
        let (mut tree, node) = tree_with("Eins. Zwei. Drei. Vier.");
        let change = change(ChangeType::Replace, &["Neu."], &["Sätze 2 bis 3"]);

        editor().replace(&mut tree, node, &change).unwrap();
        assert_eq!(tree.text(node), "Eins. Neu. Vier.");
    }

    #[test]
    fn test_replace_within_sentence() {
        let (mut tree, node) = tree_with("Der Antrag ist zu stellen. Der Antrag ist frei.");
        let change = change(ChangeType::Replace, &["Antrag", "Bescheid"], &["Satz 2"]);

        editor().replace(&mut tree, node, &change).unwrap();
        assert_eq!(tree.text(node), "Der Antrag ist zu stellen. Der Bescheid ist frei.");
    }

    #[test]
    fn test_replace_range_with_two_texts_fails() {
        let (mut tree, node) = tree_with("Eins. Zwei. Drei.");
        let change = change(ChangeType::Replace, &["a", "b"], &["Sätze 1 bis 2"]);

        let res = editor().replace(&mut tree, node, &change).unwrap();
        assert_eq!(res.status(), 0);
        assert_eq!(res.message, "range+multi-text replace not supported");
    }

    #[test]
    fn test_replace_sentence_out_of_range() {
        let (mut tree, node) = tree_with("Nur ein Satz.");
        let change = change(ChangeType::Replace, &["Neu."], &["Satz 3"]);

        let res = editor().replace(&mut tree, node, &change).unwrap();
        assert_eq!(res.status(), 0);
        assert_eq!(res.message, "Sentence 3 out of range, node has 1 sentence(s)");
        assert_eq!(tree.text(node), "Nur ein Satz.");
    }

    #[test]
    fn test_insert_after_pair() {
        let (mut tree, node) = tree_with("Test text insert here;");
        let change = change(ChangeType::InsertAfter, &["insert", "inserted"], &[]);

        let res = editor().insert_after(&mut tree, node, &change).unwrap();
        assert_eq!(res.status(), 1);
        assert_eq!(tree.text(node), "Test text insert inserted here;");
    }

    #[test]
    fn test_insert_after_whole_word_only() {
        let (mut tree, node) = tree_with("Kennzeichenpflicht und Kennzeichen.");
        let change = change(ChangeType::InsertAfter, &["Kennzeichen", ", gültige Plaketten"], &[]);

        editor().insert_after(&mut tree, node, &change).unwrap();
        assert_eq!(
            tree.text(node),
            "Kennzeichenpflicht und Kennzeichen, gültige Plaketten."
        );
    }

    #[test]
    fn test_insert_after_missing_anchor_fails() {
        let (mut tree, node) = tree_with("Nichts passt.");
        let change = change(ChangeType::InsertAfter, &["fehlt", "neu"], &[]);

        let res = editor().insert_after(&mut tree, node, &change).unwrap();
        assert_eq!(res.status(), 0);
        assert_eq!(tree.text(node), "Nichts passt.");
    }

    #[test]
    fn test_insert_after_without_text_fails() {
        let (mut tree, node) = tree_with("Text.");
        let change = change(ChangeType::InsertAfter, &[], &[]);
        assert_eq!(editor().insert_after(&mut tree, node, &change).unwrap().status(), 0);
    }

    #[test]
    fn test_insert_existing_bulletpoint_renumbers() {
        let (mut tree, node) = tree_with("Old node text.");
        let root = tree.root();
        let change = change(ChangeType::InsertAfter, &["(1) New inserted node text"], &[]);

        let res = editor().insert_after(&mut tree, node, &change).unwrap();

        assert_eq!(res.status(), 1);
        assert_eq!(
            tree.to_text(),
            "§ 1 Test parent node\n    (1) New inserted node text\n    (2) Old node text.\n"
        );
        assert_eq!(tree.children(root)[1], node);
    }

    #[test]
    fn test_insert_new_bulletpoint_is_parsed() {
        let (mut tree, node) = tree_with("Old node text.");
        let root = tree.root();
        let change = change(ChangeType::InsertAfter, &["(2) New inserted node text"], &[]);

        let res = editor().insert_after(&mut tree, node, &change).unwrap();

        assert_eq!(res.status(), 1);
        let second = tree.children(root)[1];
        assert_eq!(tree.bulletpoint(second), "(2)");
        assert_eq!(tree.text(second), "New inserted node text");
    }

    #[test]
    fn test_insert_structure_with_indented_items() {
        let (mut tree, node) = tree_with("Old node text.");
        let root = tree.root();
        let change = change(
            ChangeType::InsertAfter,
            &["(2) Neue Regeln:    1. erste,    2. zweite."],
            &[],
        );

        editor().insert_after(&mut tree, node, &change).unwrap();

        let second = tree.children(root)[1];
        assert_eq!(tree.text(second), "Neue Regeln:");
        assert_eq!(tree.children(second).len(), 2);
    }

    #[test]
    fn test_insert_sibling_of_root_fails() {
        let mut tree = LawTree::new("§ 1", "Root");
        let root = tree.root();
        let change = change(ChangeType::InsertAfter, &["§ 2 Neu"], &[]);

        let res = editor().insert_after(&mut tree, root, &change).unwrap();
        assert_eq!(res.status(), 0);
    }

    #[test]
    fn test_insert_after_sentence() {
        let (mut tree, node) =
            tree_with("This is the first sentence. And before this sentence something is inserted.");
        let change = change(ChangeType::InsertAfter, &["Inserted sentence."], &["nach Satz 1"]);

        let res = editor().insert_after(&mut tree, node, &change).unwrap();
        assert_eq!(res.status(), 1);
        assert_eq!(
            tree.text(node),
            "This is the first sentence. Inserted sentence. And before this sentence something is inserted."
        );
    }

    #[test]
    fn test_insert_after_sentence_wins_over_leading_marker() {
        let (mut tree, node) =
            tree_with("This is the first sentence. And before this sentence something is inserted.");
        let change = change(ChangeType::InsertAfter, &["§ 5 gilt entsprechend."], &["nach Satz 1"]);

        let res = editor().insert_after(&mut tree, node, &change).unwrap();
        assert_eq!(res.status(), 1);
        assert_eq!(
            tree.text(node),
            "This is the first sentence. § 5 gilt entsprechend. And before this sentence something is inserted."
        );
        assert_eq!(tree.node_count(), 2);
    }

    #[test]
    fn test_insert_after_sentence_range_fails() {
        let (mut tree, node) = tree_with("Eins. Zwei.");
        let change = change(ChangeType::InsertAfter, &["Neu."], &["Sätze 1 bis 2"]);
        assert_eq!(editor().insert_after(&mut tree, node, &change).unwrap().status(), 0);
    }

    #[test]
    fn test_rephrase_strips_bulletpoint() {
        let (mut tree, node) = tree_with("Old text.");
        let change = change(ChangeType::Rephrase, &["(1) Rephrased text."], &[]);

        let res = editor().rephrase(&mut tree, node, &change).unwrap();
        assert_eq!(res.status(), 1);
        assert_eq!(tree.text(node), "Rephrased text.");
    }

    #[test]
    fn test_rephrase_sentence() {
        let (mut tree, node) = tree_with("Here is nothing to do. Here is something to do.");
        let change = change(ChangeType::Rephrase, &["Text to rephrase."], &["Satz 2"]);

        editor().rephrase(&mut tree, node, &change).unwrap();
        assert_eq!(tree.text(node), "Here is nothing to do. Text to rephrase.");
    }

    #[test]
    fn test_rephrase_range_fails() {
        let (mut tree, node) = tree_with("Eins. Zwei.");
        let change = change(ChangeType::Rephrase, &["Neu."], &["Sätze 1 und 2"]);
        assert_eq!(editor().rephrase(&mut tree, node, &change).unwrap().status(), 0);
    }

    #[test]
    fn test_append_text() {
        let (mut tree, node) = tree_with("Current text to append to.");
        let change = change(ChangeType::Append, &["Appended text."], &[]);

        let res = editor().append(&mut tree, node, &change).unwrap();
        assert_eq!(res.status(), 1);
        assert_eq!(tree.text(node), "Current text to append to. Appended text.");
    }

    #[test]
    fn test_append_fails_with_two_or_no_texts() {
        let (mut tree, node) = tree_with("Current text.");
        let two = change(ChangeType::Append, &["a", "b"], &[]);
        let none = change(ChangeType::Append, &[], &[]);

        assert_eq!(editor().append(&mut tree, node, &two).unwrap().status(), 0);
        assert_eq!(editor().append(&mut tree, node, &none).unwrap().status(), 0);
        assert_eq!(tree.text(node), "Current text.");
    }

    #[test]
    fn test_append_structural_child() {
        let mut tree = LawTree::new("§ 5", "Sondernutzung");
        let root = tree.root();
        tree.add_child(root, "(1)", "Eins.").unwrap();
        let change = change(ChangeType::Append, &["(2) Zwei."], &[]);

        editor().append(&mut tree, root, &change).unwrap();
        assert_eq!(tree.to_text(), "§ 5 Sondernutzung\n    (1) Eins.\n    (2) Zwei.\n");
    }

    #[test]
    fn test_prepend_text() {
        let (mut tree, node) = tree_with("bestehender Text.");
        let change = change(ChangeType::Prepend, &["Vorweg:"], &[]);

        editor().prepend(&mut tree, node, &change).unwrap();
        assert_eq!(tree.text(node), "Vorweg: bestehender Text.");
    }

    #[test]
    fn test_prepend_structural_child_renumbers() {
        let mut tree = LawTree::new("§ 5", "");
        let root = tree.root();
        tree.add_child(root, "(1)", "Alt.").unwrap();
        let change = change(ChangeType::Prepend, &["(1) Neu."], &[]);

        editor().prepend(&mut tree, root, &change).unwrap();
        assert_eq!(tree.to_text(), "§ 5 \n    (1) Neu.\n    (2) Alt.\n");
    }

    #[test]
    fn test_delete_after_one_text() {
        let (mut tree, node) = tree_with("Current to delete text.");
        let change = change(ChangeType::DeleteAfter, &["to delete"], &[]);

        let res = editor().delete_after(&mut tree, node, &change).unwrap();
        assert_eq!(res.status(), 1);
        assert_eq!(tree.text(node), "Current text.");
    }

    #[test]
    fn test_delete_after_two_texts() {
        let (mut tree, node) = tree_with("Current to delete text.");
        let change = change(ChangeType::DeleteAfter, &["to delete", "text"], &[]);

        let res = editor().delete_after(&mut tree, node, &change).unwrap();
        assert_eq!(res.status(), 1);
        assert_eq!(tree.text(node), "Current to delete .");
    }

    #[test]
    fn test_delete_after_fails_without_text() {
        let (mut tree, node) = tree_with("Current to delete text.");
        let change = change(ChangeType::DeleteAfter, &[], &[]);

        let res = editor().delete_after(&mut tree, node, &change).unwrap();
        assert_eq!(res.status(), 0);
        assert_eq!(tree.text(node), "Current to delete text.");
    }

    #[test]
    fn test_cancel_node() {
        let (mut tree, node) = tree_with("Node to remove.");
        let root = tree.root();
        let other = tree.add_child(root, "(2)", "Node to remain.").unwrap();
        let change = change(ChangeType::Cancelled, &[], &[]);

        let res = editor().cancelled(&mut tree, node, &change).unwrap();

        assert_eq!(res.status(), 1);
        assert_eq!(tree.children(root).len(), 1);
        assert_eq!(tree.bulletpoint(other), "(1)");
        assert_eq!(tree.text(other), "Node to remain.");
    }

    #[test]
    fn test_cancel_root_fails() {
        let mut tree = LawTree::new("§ 1", "Root");
        let root = tree.root();
        let change = change(ChangeType::Cancelled, &[], &[]);
        assert_eq!(editor().cancelled(&mut tree, root, &change).unwrap().status(), 0);
    }

    #[test]
    fn test_cancel_sentence_range_is_inclusive() {
        let (mut tree, node) = tree_with("Eins. Zwei. Drei. Vier.");
        let change = change(ChangeType::Cancelled, &[], &["Sätze 2 bis 3"]);

        editor().cancelled(&mut tree, node, &change).unwrap();
        assert_eq!(tree.text(node), "Eins. Vier.");
    }

    #[test]
    fn test_cancel_sentence_enumeration() {
        let (mut tree, node) = tree_with("Eins. Zwei. Drei.");
        let change = change(ChangeType::Cancelled, &[], &["Sätze 1 und 3"]);

        editor().cancelled(&mut tree, node, &change).unwrap();
        assert_eq!(tree.text(node), "Zwei.");
    }

    #[test]
    fn test_cancel_with_text_fails() {
        let (mut tree, node) = tree_with("Eins.");
        let change = change(ChangeType::Cancelled, &["Eins."], &[]);
        assert_eq!(editor().cancelled(&mut tree, node, &change).unwrap().status(), 0);
    }
}
