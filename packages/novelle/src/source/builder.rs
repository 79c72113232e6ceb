//! Builders turning flat text or API segments into a [`LawTree`].

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use super::markup::{flatten_markup, is_structured, strip_markup};
use crate::config::{REPEALED_TEXT, SOURCE_ROOT_BULLETPOINT, TABLE_OF_CONTENTS};
use crate::error::{NovelleError, Result};
use crate::splitting::{create_source_law_cascade, SourceLawStrategy, SplitEngine};
use crate::tree::LawTree;

/// One segment of a law as delivered by a structured law API.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LawSegment {
    /// Segment kind (e.g. "section", "heading").
    #[serde(rename = "type")]
    pub kind: String,
    pub id: String,
    /// Label of the segment, used as its bulletpoint (e.g. "§ 5").
    pub name: String,
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub parent: Option<SegmentParent>,
    /// Segment content with HTML-like markup.
    #[serde(default)]
    pub body: Option<String>,
}

/// Reference from a segment to its enclosing segment.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SegmentParent {
    pub id: String,
}

impl LawSegment {
    fn title(&self) -> &str {
        self.title.as_deref().unwrap_or_default().trim()
    }

    fn body(&self) -> &str {
        self.body.as_deref().unwrap_or_default()
    }

    /// Text of a segment without nested structure.
    fn plain_text(&self) -> String {
        let body = strip_markup(self.body());
        let text = [self.title(), body.as_str()]
            .into_iter()
            .filter(|part| !part.is_empty())
            .collect::<Vec<_>>()
            .join(" ");

        if text.is_empty() {
            REPEALED_TEXT.to_string()
        } else {
            text
        }
    }
}

/// Split engine configured for source-law text.
#[must_use]
pub fn source_law_engine() -> SplitEngine<SourceLawStrategy> {
    SplitEngine::new(create_source_law_cascade(), SourceLawStrategy)
}

/// Build the tree of a law given as flat text with bulletpoint markers.
///
/// Markers are recognized at line starts; the text is prefixed with a line
/// break so the very first line can carry a marker too.
pub fn build_from_text(title: &str, text: &str) -> Result<LawTree> {
    let tree = source_law_engine().build(SOURCE_ROOT_BULLETPOINT, title, &format!("\n{text}"))?;

    if tree.children(tree.root()).is_empty() {
        return Err(NovelleError::EmptyDocument(format!("source law '{title}'")));
    }

    tracing::debug!(nodes = tree.node_count(), "Built source law tree from text");
    Ok(tree)
}

/// Build the tree of a law given as API segments.
///
/// Every segment becomes a node under the node of its parent segment, or
/// under the root when the parent is absent or unknown. Segments with
/// structured bodies are parsed further with the source-law cascade.
pub fn build_from_segments(title: &str, segments: &[LawSegment]) -> Result<LawTree> {
    if segments.is_empty() {
        return Err(NovelleError::EmptyDocument(format!("source law '{title}'")));
    }

    let engine = source_law_engine();
    let mut tree = LawTree::new(SOURCE_ROOT_BULLETPOINT, title);
    let root = tree.root();
    let mut nodes = HashMap::new();

    for segment in segments {
        let parent = segment
            .parent
            .as_ref()
            .and_then(|parent| nodes.get(parent.id.as_str()).copied())
            .unwrap_or(root);

        let node = if segment.name == TABLE_OF_CONTENTS {
            tree.add_child(parent, segment.name.as_str(), segment.title())?
        } else if is_structured(segment.body()) {
            let node = tree.add_child(parent, segment.name.as_str(), segment.title())?;
            engine.split(&mut tree, node, &flatten_markup(segment.body()))?;
            node
        } else {
            tree.add_child(parent, segment.name.as_str(), segment.plain_text())?
        };

        nodes.insert(segment.id.as_str(), node);
    }

    tracing::debug!(
        segments = segments.len(),
        nodes = tree.node_count(),
        "Built source law tree from segments"
    );
    Ok(tree)
}
