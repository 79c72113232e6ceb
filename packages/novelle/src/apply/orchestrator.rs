//! Applies a list of changes to a copy of a source-law tree.

use tracing::instrument;

use super::edits::Editor;
use super::resolver::resolve;
use super::result::{ChangeResult, Outcome};
use super::sentences::{RuleSplitter, SentenceSplitter};
use crate::amendment::{Change, ChangeType};
use crate::error::Result;
use crate::tree::{LawTree, NodeId};

/// Modified tree together with the per-change results.
#[derive(Debug, Clone)]
pub struct Amendment {
    pub tree: LawTree,
    /// One result per input change, in input order.
    pub results: Vec<ChangeResult>,
    /// Number of results with status 1.
    pub applied: usize,
}

impl Amendment {
    /// One-line summary of how many changes were applied.
    #[must_use]
    pub fn summary(&self) -> String {
        let total = self.results.len();
        let percent = if total == 0 {
            0.0
        } else {
            self.applied as f64 * 100.0 / total as f64
        };
        format!(
            "Successfully applied {} out of {total} changes ({percent:.1}%)",
            self.applied
        )
    }
}

/// Applies changes one by one, in order.
///
/// A change that cannot be applied is recorded and the next one is
/// attempted. Later changes see the tree as modified by earlier ones.
#[derive(Debug, Clone)]
pub struct Amender<S: SentenceSplitter = RuleSplitter> {
    splitter: S,
}

impl Default for Amender<RuleSplitter> {
    fn default() -> Self {
        Self::new(RuleSplitter)
    }
}

impl<S: SentenceSplitter> Amender<S> {
    /// Create an amender that splits sentences with `splitter`.
    #[must_use]
    pub fn new(splitter: S) -> Self {
        Self { splitter }
    }

    /// Apply `changes` to a copy of `source`.
    ///
    /// The source tree is left untouched.
    #[instrument(level = "debug", skip_all, fields(changes = changes.len()))]
    pub fn apply_changes(&self, source: &LawTree, changes: &[Change]) -> Result<Amendment> {
        let mut tree = source.clone();
        let mut results = Vec::with_capacity(changes.len());

        for change in changes {
            let result = self.apply_change(&mut tree, change)?;
            tracing::info!(
                outcome = %result.outcome,
                change_type = %change.change_type,
                location = %change.location.join(" "),
                "{}",
                result.message
            );
            results.push(result);
        }

        let applied = results.iter().filter(|r| r.status() == 1).count();
        Ok(Amendment {
            tree,
            results,
            applied,
        })
    }

    fn apply_change(&self, tree: &mut LawTree, change: &Change) -> Result<ChangeResult> {
        let location = effective_location(change);
        if change.change_type.is_unresolved() {
            let node = resolve(tree, tree.root(), location).ok();
            let result = unresolved_result(change, node);
            if let Some(node) = node {
                tree.attach_result(node, result.clone())?;
            }
            return Ok(result);
        }

        let node = match resolve(tree, tree.root(), location) {
            Ok(node) => node,
            Err(e) => {
                tracing::warn!(raw_text = %change.raw_text, "{e}");
                return Ok(ChangeResult::not_found(change, e.to_string()));
            }
        };

        let before = tree.to_text();
        let parent = tree.parent(node);
        let mut result = match self.dispatch(tree, node, change) {
            Ok(result) => result,
            Err(e) => {
                tracing::error!(
                    error = %e,
                    change_type = %change.change_type,
                    location = ?change.location,
                    sentences = ?change.sentences,
                    text = ?change.text,
                    raw_text = %change.raw_text,
                    "Change raised an error"
                );
                ChangeResult::skipped(change, Some(node), format!("Error while applying: {e}"))
            }
        };

        if result.outcome == Outcome::Applied
            && change.change_type != ChangeType::Renumbering
            && tree.to_text() == before
        {
            result.outcome = Outcome::AppliedWithoutEffect;
            result.message = format!("{} (tree unchanged)", result.message);
        }

        let holder = if tree.contains(node) { Some(node) } else { parent };
        if let Some(holder) = holder {
            tree.attach_result(holder, result.clone())?;
        }
        Ok(result)
    }

    fn dispatch(&self, tree: &mut LawTree, node: NodeId, change: &Change) -> Result<ChangeResult> {
        let editor = Editor::new(&self.splitter);
        match change.change_type {
            ChangeType::Replace => editor.replace(tree, node, change),
            ChangeType::InsertAfter => editor.insert_after(tree, node, change),
            ChangeType::Rephrase => editor.rephrase(tree, node, change),
            ChangeType::Append => editor.append(tree, node, change),
            ChangeType::Prepend => editor.prepend(tree, node, change),
            ChangeType::DeleteAfter => editor.delete_after(tree, node, change),
            ChangeType::Cancelled => editor.cancelled(tree, node, change),
            ChangeType::Renumbering => Ok(ChangeResult::applied(
                change,
                node,
                "Renumbering is covered by insertions and removals",
            )),
            ChangeType::MultipleChanges | ChangeType::Unknown => {
                Ok(unresolved_result(change, Some(node)))
            }
        }
    }
}

/// Skip result for a line the parser could not classify.
fn unresolved_result(change: &Change, node: Option<NodeId>) -> ChangeResult {
    ChangeResult::skipped(
        change,
        node,
        format!("Change type {} is not applied", change.change_type),
    )
}

/// Location to resolve for a change.
///
/// An appended text that starts with the last location token is the new
/// child itself, so the change targets the parent.
fn effective_location(change: &Change) -> &[String] {
    let location = change.location.as_slice();
    match (change.change_type, location.split_last(), change.text.first()) {
        (ChangeType::Append, Some((last, parent)), Some(text))
            if !parent.is_empty() && text.trim_start().starts_with(last.as_str()) =>
        {
            parent
        }
        _ => location,
    }
}
