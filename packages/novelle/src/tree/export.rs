//! Dictionary form of a tree, independent of the arena.

use serde::{Deserialize, Serialize};

use super::node::{LawTree, NodeId};
use crate::error::Result;

/// Nested, serializable copy of a tree.
///
/// Change results attached to nodes are not part of this form.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TreeDict {
    pub bulletpoint: String,
    pub text: String,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub children: Vec<TreeDict>,
}

impl LawTree {
    /// Convert the whole tree to its dictionary form.
    #[must_use]
    pub fn to_dict(&self) -> TreeDict {
        self.subtree_dict(self.root())
    }

    /// Convert the subtree below `id` to its dictionary form.
    #[must_use]
    pub fn subtree_dict(&self, id: NodeId) -> TreeDict {
        TreeDict {
            bulletpoint: self.bulletpoint(id).to_string(),
            text: self.text(id).to_string(),
            children: self
                .children(id)
                .iter()
                .map(|&child| self.subtree_dict(child))
                .collect(),
        }
    }

    /// Rebuild a tree from its dictionary form.
    pub fn from_dict(dict: &TreeDict) -> Result<Self> {
        let mut tree = LawTree::new(dict.bulletpoint.as_str(), dict.text.as_str());
        let root = tree.root();
        tree.extend_from_dict(root, &dict.children)?;
        Ok(tree)
    }

    fn extend_from_dict(&mut self, parent: NodeId, children: &[TreeDict]) -> Result<()> {
        for child in children {
            let id = self.add_child(parent, child.bulletpoint.as_str(), child.text.as_str())?;
            self.extend_from_dict(id, &child.children)?;
        }
        Ok(())
    }

    /// Serialize the tree as pretty-printed JSON.
    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(&self.to_dict())?)
    }

    /// Deserialize a tree from JSON produced by [`LawTree::to_json`].
    pub fn from_json(json: &str) -> Result<Self> {
        let dict: TreeDict = serde_json::from_str(json)?;
        Self::from_dict(&dict)
    }

    /// Serialize the tree as YAML.
    pub fn to_yaml(&self) -> Result<String> {
        Ok(serde_yaml_ng::to_string(&self.to_dict())?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_tree() -> LawTree {
        let mut tree = LawTree::new("Titel:", "Berliner Straßengesetz");
        let root = tree.root();
        let section = tree.add_child(root, "§ 1", "Geltungsbereich").unwrap();
        tree.add_child(section, "(1)", "Dieses Gesetz gilt für Straßen.")
            .unwrap();
        tree.add_child(section, "(2)", "").unwrap();
        tree
    }

    #[test]
    fn test_dict_round_trip() {
        let tree = sample_tree();
        let rebuilt = LawTree::from_dict(&tree.to_dict()).unwrap();
        assert_eq!(rebuilt.to_text(), tree.to_text());
    }

    #[test]
    fn test_json_round_trip() {
        let tree = sample_tree();
        let json = tree.to_json().unwrap();
        assert!(json.contains("\"bulletpoint\": \"§ 1\""));

        let rebuilt = LawTree::from_json(&json).unwrap();
        assert_eq!(rebuilt.to_dict(), tree.to_dict());
    }

    #[test]
    fn test_leaf_omits_children_key() {
        let tree = LawTree::new("(1)", "leaf");
        let json = tree.to_json().unwrap();
        assert!(!json.contains("children"));
    }

    #[test]
    fn test_to_yaml() {
        let yaml = sample_tree().to_yaml().unwrap();
        assert!(yaml.contains("bulletpoint: Titel:") || yaml.contains("bulletpoint: 'Titel:'"));
        assert!(yaml.contains("Geltungsbereich"));
    }
}
