//! Location resolution: from a location path to one tree node.

use thiserror::Error;

use crate::config::{CHAPTER_PREFIX, HEADING_REFERENCE};
use crate::tree::{LawTree, NodeId};

/// Why a location path did not lead to exactly one node.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ResolveError {
    #[error("Change has no location")]
    EmptyLocation,

    #[error("Location '{token}' not found below '{within}'")]
    NotFound { token: String, within: String },

    #[error("Location '{token}' is ambiguous below '{within}' ({matches} matches)")]
    Ambiguous {
        token: String,
        within: String,
        matches: usize,
    },
}

/// Follow `location` from `start`, one token at a time.
///
/// Each token must match the bulletpoint of exactly one node in the
/// current subtree, the current node included. A heading reference stops
/// resolution at the current node. When a token matches nothing inside a
/// chapter, the chapter itself is kept as the target.
pub fn resolve(tree: &LawTree, start: NodeId, location: &[String]) -> Result<NodeId, ResolveError> {
    if location.is_empty() {
        return Err(ResolveError::EmptyLocation);
    }

    let mut current = start;
    for token in location {
        if token == HEADING_REFERENCE {
            return Ok(current);
        }

        let matches: Vec<NodeId> = tree
            .descendants(current)
            .into_iter()
            .filter(|&id| tree.bulletpoint(id) == token)
            .collect();

        current = match matches.as_slice() {
            [single] => *single,
            [] if tree.bulletpoint(current).starts_with(CHAPTER_PREFIX) => {
                // TODO: report chapter fallbacks separately once reviewers
                // can tell them apart from exact matches in the change report.
                tracing::debug!(token = %token, chapter = %tree.bulletpoint(current), "Falling back to chapter");
                current
            }
            [] => {
                return Err(ResolveError::NotFound {
                    token: token.clone(),
                    within: tree.bulletpoint(current).to_string(),
                })
            }
            many => {
                return Err(ResolveError::Ambiguous {
                    token: token.clone(),
                    within: tree.bulletpoint(current).to_string(),
                    matches: many.len(),
                })
            }
        };
    }

    Ok(current)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn path(tokens: &[&str]) -> Vec<String> {
        tokens.iter().map(|t| t.to_string()).collect()
    }

    /// Titel: > Kapitel 1 > § 1 > (1), (2) > 1.; and § 2 > (1)
    fn sample_tree() -> LawTree {
        let mut tree = LawTree::new("Titel:", "Gesetz");
        let root = tree.root();
        let chapter = tree.add_child(root, "Kapitel 1", "Allgemeines").unwrap();
        let first = tree.add_child(chapter, "§ 1", "Zweck").unwrap();
        tree.add_child(first, "(1)", "Eins").unwrap();
        let second_paragraph = tree.add_child(first, "(2)", "Zwei").unwrap();
        tree.add_child(second_paragraph, "1.", "Nummer eins").unwrap();
        let second = tree.add_child(chapter, "§ 2", "Begriffe").unwrap();
        tree.add_child(second, "(1)", "Eins").unwrap();
        tree
    }

    #[test]
    fn test_resolve_searches_whole_subtree() {
        let tree = sample_tree();
        let node = resolve(&tree, tree.root(), &path(&["§ 1", "1."])).unwrap();
        assert_eq!(tree.text(node), "Nummer eins");
    }

    #[test]
    fn test_resolve_is_deterministic() {
        let tree = sample_tree();
        let location = path(&["§ 2", "(1)"]);
        let first = resolve(&tree, tree.root(), &location).unwrap();
        let second = resolve(&tree, tree.root(), &location).unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn test_resolve_ambiguous_fails() {
        let tree = sample_tree();
        let err = resolve(&tree, tree.root(), &path(&["(1)"])).unwrap_err();
        assert!(matches!(err, ResolveError::Ambiguous { matches: 2, .. }));
    }

    #[test]
    fn test_resolve_not_found() {
        let tree = sample_tree();
        let err = resolve(&tree, tree.root(), &path(&["§ 9"])).unwrap_err();
        assert_eq!(err.to_string(), "Location '§ 9' not found below 'Titel:'");
    }

    #[test]
    fn test_resolve_heading_stops() {
        let tree = sample_tree();
        let node = resolve(&tree, tree.root(), &path(&["§ 1", "Überschrift", "(2)"])).unwrap();
        assert_eq!(tree.bulletpoint(node), "§ 1");
    }

    #[test]
    fn test_resolve_chapter_fallback() {
        let tree = sample_tree();
        let node = resolve(&tree, tree.root(), &path(&["Kapitel 1", "§ 7"])).unwrap();
        assert_eq!(tree.bulletpoint(node), "Kapitel 1");
    }

    #[test]
    fn test_resolve_empty_location() {
        let tree = sample_tree();
        assert_eq!(
            resolve(&tree, tree.root(), &[]),
            Err(ResolveError::EmptyLocation)
        );
    }
}
