//! Split engine that builds trees from flat text using a marker cascade.

use super::registry::MarkerCascade;
use super::strategy::SplitStrategy;
use crate::error::Result;
use crate::tree::{LawTree, NodeId};

/// Engine for splitting text into a document tree.
///
/// For each level in cascade order, every match in the remaining text
/// becomes a child of the current node and the segment up to the next
/// match of that level is split recursively below it. Only the text
/// before the first match is left for the finer levels.
pub struct SplitEngine<S: SplitStrategy> {
    cascade: MarkerCascade,
    strategy: S,
}

impl<S: SplitStrategy> SplitEngine<S> {
    /// Create a new split engine.
    #[must_use]
    pub fn new(cascade: MarkerCascade, strategy: S) -> Self {
        Self { cascade, strategy }
    }

    /// The cascade this engine splits with.
    #[must_use]
    pub fn cascade(&self) -> &MarkerCascade {
        &self.cascade
    }

    /// Build a new tree below a fresh root.
    pub fn build(
        &self,
        root_bulletpoint: &str,
        root_text: &str,
        text: &str,
    ) -> Result<LawTree> {
        let mut tree = LawTree::new(root_bulletpoint, root_text);
        let root = tree.root();
        self.split(&mut tree, root, text)?;
        Ok(tree)
    }

    /// Split `text` into children of `parent`.
    ///
    /// Returns the number of nodes added directly below `parent`.
    pub fn split(&self, tree: &mut LawTree, parent: NodeId, text: &str) -> Result<usize> {
        let mut remaining = text;
        let mut added = 0;

        for spec in self.cascade.iter() {
            let matches: Vec<_> = spec.pattern.find_iter(remaining).collect();
            let Some(first) = matches.first() else {
                continue;
            };
            let first_start = first.start();

            for (i, marker) in matches.iter().enumerate() {
                let end = matches.get(i + 1).map_or(remaining.len(), |next| next.start());
                let segment = &remaining[marker.end()..end];

                let bulletpoint = self.strategy.bulletpoint(marker.as_str());
                let node_text = self.strategy.node_text(segment, &self.cascade);
                tracing::trace!(kind = %spec.kind, bulletpoint = %bulletpoint, "Split marker");

                let child = tree.add_child(parent, bulletpoint, node_text)?;
                self.split(tree, child, segment)?;
                added += 1;
            }

            remaining = &remaining[..first_start];
        }

        Ok(added)
    }
}
