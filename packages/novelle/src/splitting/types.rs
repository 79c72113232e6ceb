//! Types for the splitting system.

use regex::Regex;

/// Declarative specification of one bulletpoint level.
#[derive(Debug, Clone)]
pub struct MarkerSpec {
    /// Short name of the level (e.g. "section").
    pub kind: String,

    /// Pattern matching the marker, including any leading line break.
    pub pattern: Regex,

    /// Sample markers this level must recognize.
    pub examples: Vec<String>,
}

impl MarkerSpec {
    /// Create a new marker specification.
    #[must_use]
    pub fn new(kind: impl Into<String>, pattern: Regex) -> Self {
        Self {
            kind: kind.into(),
            pattern,
            examples: Vec::new(),
        }
    }

    /// Set the sample markers.
    #[must_use]
    pub fn with_examples(mut self, examples: impl IntoIterator<Item = impl Into<String>>) -> Self {
        self.examples = examples.into_iter().map(Into::into).collect();
        self
    }

    /// Check whether every sample marker is recognized.
    ///
    /// Samples are tested at the start of a fresh line, the way markers
    /// appear in the text handed to the engine.
    #[must_use]
    pub fn recognizes_examples(&self) -> bool {
        self.examples
            .iter()
            .all(|example| self.pattern.is_match(&format!("\n{example} text")))
    }
}
