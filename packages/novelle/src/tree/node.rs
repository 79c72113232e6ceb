//! Arena-backed document tree.

use std::fmt;

use generational_arena::{Arena, Index};
use tracing::instrument;

use super::bulletpoint::{decrement, increment, natural_cmp};
use crate::apply::ChangeResult;
use crate::config::INDENT_WIDTH;
use crate::error::{NovelleError, Result};

/// Stable handle of a node inside a [`LawTree`].
///
/// Handles of removed nodes are never reused for other nodes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct NodeId(Index);

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let (index, generation) = self.0.into_raw_parts();
        write!(f, "#{index}.{generation}")
    }
}

/// One labeled segment of a law.
#[derive(Debug, Clone)]
pub struct DocumentNode {
    /// Structural label, unique among siblings (e.g. "§ 9", "(1)", "3.", "b)").
    pub bulletpoint: String,
    /// Text owned by this node. Empty for pure containers.
    pub text: String,
    /// Parent node, `None` for the root.
    pub parent: Option<NodeId>,
    /// Children in document order.
    pub children: Vec<NodeId>,
    /// Results of the changes applied to this node.
    pub changes: Vec<ChangeResult>,
}

impl DocumentNode {
    fn new(bulletpoint: String, text: String, parent: Option<NodeId>) -> Self {
        Self {
            bulletpoint,
            text,
            parent,
            children: Vec::new(),
            changes: Vec::new(),
        }
    }
}

/// Tree of [`DocumentNode`]s with exactly one root.
///
/// Cloning the tree copies the whole arena, and node handles stay valid in
/// the copy.
#[derive(Debug, Clone)]
pub struct LawTree {
    arena: Arena<DocumentNode>,
    root: NodeId,
}

impl LawTree {
    /// Create a tree consisting of a root node only.
    #[must_use]
    pub fn new(bulletpoint: impl Into<String>, text: impl Into<String>) -> Self {
        let mut arena = Arena::new();
        let root = NodeId(arena.insert(DocumentNode::new(
            bulletpoint.into(),
            text.into(),
            None,
        )));
        Self { arena, root }
    }

    /// Handle of the root node.
    #[must_use]
    pub fn root(&self) -> NodeId {
        self.root
    }

    /// Number of nodes in the tree, root included.
    #[must_use]
    pub fn node_count(&self) -> usize {
        self.arena.len()
    }

    /// Whether the handle refers to a live node of this tree.
    #[must_use]
    pub fn contains(&self, id: NodeId) -> bool {
        self.arena.contains(id.0)
    }

    /// Borrow a node.
    pub fn node(&self, id: NodeId) -> Result<&DocumentNode> {
        self.arena.get(id.0).ok_or(NovelleError::UnknownNode(id))
    }

    fn node_mut(&mut self, id: NodeId) -> Result<&mut DocumentNode> {
        self.arena.get_mut(id.0).ok_or(NovelleError::UnknownNode(id))
    }

    /// Parent of a node, `None` for the root and for removed nodes.
    #[must_use]
    pub fn parent(&self, id: NodeId) -> Option<NodeId> {
        self.arena.get(id.0).and_then(|node| node.parent)
    }

    /// Children of a node, empty for removed nodes.
    #[must_use]
    pub fn children(&self, id: NodeId) -> &[NodeId] {
        self.arena
            .get(id.0)
            .map_or(&[][..], |node| node.children.as_slice())
    }

    /// Bulletpoint of a node, empty for removed nodes.
    #[must_use]
    pub fn bulletpoint(&self, id: NodeId) -> &str {
        self.arena
            .get(id.0)
            .map_or("", |node| node.bulletpoint.as_str())
    }

    /// Text of a node, empty for removed nodes.
    #[must_use]
    pub fn text(&self, id: NodeId) -> &str {
        self.arena.get(id.0).map_or("", |node| node.text.as_str())
    }

    /// Direct child of `parent` with the given bulletpoint.
    #[must_use]
    pub fn find_child(&self, parent: NodeId, bulletpoint: &str) -> Option<NodeId> {
        self.children(parent)
            .iter()
            .copied()
            .find(|&child| self.bulletpoint(child) == bulletpoint)
    }

    /// Distance from the root (the root has depth 0).
    #[must_use]
    pub fn depth(&self, id: NodeId) -> usize {
        let mut depth = 0;
        let mut current = self.parent(id);
        while let Some(parent) = current {
            depth += 1;
            current = self.parent(parent);
        }
        depth
    }

    /// Nodes on the path from the root down to `id`, both included.
    #[must_use]
    pub fn path_to(&self, id: NodeId) -> Vec<NodeId> {
        let mut path = vec![id];
        let mut current = self.parent(id);
        while let Some(parent) = current {
            path.push(parent);
            current = self.parent(parent);
        }
        path.reverse();
        path
    }

    /// Topmost ancestor of `id`.
    ///
    /// This is the tree's root for every live node.
    #[must_use]
    pub fn find_root(&self, id: NodeId) -> NodeId {
        let mut current = id;
        while let Some(parent) = self.parent(current) {
            current = parent;
        }
        current
    }

    /// `id` and all of its descendants in pre-order.
    #[must_use]
    pub fn descendants(&self, id: NodeId) -> Vec<NodeId> {
        let mut result = Vec::new();
        if !self.contains(id) {
            return result;
        }
        let mut stack = vec![id];
        while let Some(current) = stack.pop() {
            result.push(current);
            stack.extend(self.children(current).iter().rev().copied());
        }
        result
    }

    /// Nodes without children, in pre-order.
    #[must_use]
    pub fn leaves(&self) -> Vec<NodeId> {
        self.descendants(self.root)
            .into_iter()
            .filter(|&id| self.children(id).is_empty())
            .collect()
    }

    /// Append a child without renumbering.
    ///
    /// Used while building a tree from text, where children arrive in
    /// document order.
    #[instrument(level = "trace", skip(self, text))]
    pub fn add_child(
        &mut self,
        parent: NodeId,
        bulletpoint: impl Into<String> + fmt::Debug,
        text: impl Into<String>,
    ) -> Result<NodeId> {
        self.node(parent)?;
        let node = DocumentNode::new(bulletpoint.into(), text.into(), Some(parent));
        let id = NodeId(self.arena.insert(node));
        self.node_mut(parent)?.children.push(id);
        Ok(id)
    }

    /// Replace the text of a node.
    pub fn set_text(&mut self, id: NodeId, text: impl Into<String>) -> Result<()> {
        self.node_mut(id)?.text = text.into();
        Ok(())
    }

    /// Record the result of a change on a node.
    pub fn attach_result(&mut self, id: NodeId, result: ChangeResult) -> Result<()> {
        self.node_mut(id)?.changes.push(result);
        Ok(())
    }

    /// Insert a new child where `bulletpoint` currently sits.
    ///
    /// Without a child labeled `bulletpoint` the node is appended. Otherwise
    /// it takes that child's position and every following sibling that now
    /// collides with its predecessor is incremented. All new labels are
    /// computed before the tree is touched, so a non-numeric label in the
    /// cascade leaves the tree unchanged.
    #[instrument(level = "debug", skip(self, text))]
    pub fn insert_child(
        &mut self,
        parent: NodeId,
        text: impl Into<String>,
        bulletpoint: &str,
    ) -> Result<NodeId> {
        let children = self.node(parent)?.children.clone();
        let position = children
            .iter()
            .position(|&child| self.bulletpoint(child) == bulletpoint)
            .unwrap_or(children.len());

        let mut labels: Vec<String> = children
            .iter()
            .map(|&child| self.bulletpoint(child).to_string())
            .collect();
        labels.insert(position, bulletpoint.to_string());

        let mut relabels = Vec::new();
        for i in (position + 1)..labels.len() {
            if labels[i] == labels[i - 1] {
                let next = increment(&labels[i])
                    .ok_or_else(|| NovelleError::NonNumericBulletpoint(labels[i].clone()))?;
                labels[i] = next.clone();
                relabels.push((children[i - 1], next));
            }
        }

        let node = DocumentNode::new(bulletpoint.to_string(), text.into(), Some(parent));
        let id = NodeId(self.arena.insert(node));
        self.node_mut(parent)?.children.insert(position, id);
        for (child, label) in relabels {
            tracing::debug!(from = %self.bulletpoint(child), to = %label, "Renumbering sibling");
            self.node_mut(child)?.bulletpoint = label;
        }

        Ok(id)
    }

    /// Remove the child labeled `bulletpoint` together with its subtree.
    ///
    /// Every following sibling with a number is decremented by one.
    #[instrument(level = "debug", skip(self))]
    pub fn remove_child(&mut self, parent: NodeId, bulletpoint: &str) -> Result<()> {
        let children = self.node(parent)?.children.clone();
        let position = children
            .iter()
            .position(|&child| self.bulletpoint(child) == bulletpoint)
            .ok_or_else(|| NovelleError::ChildNotFound {
                bulletpoint: bulletpoint.to_string(),
            })?;

        for &sibling in &children[position + 1..] {
            if let Some(label) = decrement(self.bulletpoint(sibling)) {
                self.node_mut(sibling)?.bulletpoint = label;
            }
        }

        self.node_mut(parent)?.children.remove(position);
        for id in self.descendants(children[position]) {
            self.arena.remove(id.0);
        }

        Ok(())
    }

    /// Order the children of a node naturally by bulletpoint.
    pub fn sort_children(&mut self, id: NodeId) -> Result<()> {
        let mut children = self.node(id)?.children.clone();
        children.sort_by(|&a, &b| natural_cmp(self.bulletpoint(a), self.bulletpoint(b)));
        self.node_mut(id)?.children = children;
        Ok(())
    }

    /// Render the whole tree, one indented line per node.
    #[must_use]
    pub fn to_text(&self) -> String {
        self.render_subtree(self.root)
    }

    /// Render the subtree below `id`, indented relative to `id`.
    #[must_use]
    pub fn render_subtree(&self, id: NodeId) -> String {
        let mut out = String::new();
        self.render_into(id, 0, &mut out);
        out
    }

    fn render_into(&self, id: NodeId, level: usize, out: &mut String) {
        let Some(node) = self.arena.get(id.0) else {
            return;
        };
        out.push_str(&" ".repeat(INDENT_WIDTH * level));
        out.push_str(&node.bulletpoint);
        out.push(' ');
        out.push_str(&node.text);
        out.push('\n');
        for &child in &node.children {
            self.render_into(child, level + 1, out);
        }
    }
}
