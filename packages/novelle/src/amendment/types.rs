//! Core types of parsed amendment instructions.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Kind of edit an instruction asks for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ChangeType {
    #[serde(rename = "replace")]
    Replace,
    #[serde(rename = "insert_after")]
    InsertAfter,
    #[serde(rename = "rephrase")]
    Rephrase,
    #[serde(rename = "append")]
    Append,
    #[serde(rename = "delete_after")]
    DeleteAfter,
    #[serde(rename = "cancelled")]
    Cancelled,
    #[serde(rename = "prepend")]
    Prepend,
    /// Pure relabeling, absorbed by the tree's own renumbering.
    #[serde(rename = "RENUMBERING")]
    Renumbering,
    /// More than one operation keyword in one line.
    #[serde(rename = "MULTIPLE_CHANGES")]
    MultipleChanges,
    /// No operation keyword found.
    #[serde(rename = "UNKNOWN")]
    Unknown,
}

impl ChangeType {
    /// Name used in reports and serialized changes.
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            ChangeType::Replace => "replace",
            ChangeType::InsertAfter => "insert_after",
            ChangeType::Rephrase => "rephrase",
            ChangeType::Append => "append",
            ChangeType::DeleteAfter => "delete_after",
            ChangeType::Cancelled => "cancelled",
            ChangeType::Prepend => "prepend",
            ChangeType::Renumbering => "RENUMBERING",
            ChangeType::MultipleChanges => "MULTIPLE_CHANGES",
            ChangeType::Unknown => "UNKNOWN",
        }
    }

    /// Operation named by a German drafting verb.
    #[must_use]
    pub fn from_keyword(keyword: &str) -> Option<Self> {
        match keyword {
            "eingefügt" => Some(ChangeType::InsertAfter),
            "ersetzt" => Some(ChangeType::Replace),
            "gefasst" => Some(ChangeType::Rephrase),
            "angefügt" => Some(ChangeType::Append),
            "gestrichen" => Some(ChangeType::DeleteAfter),
            "aufgehoben" => Some(ChangeType::Cancelled),
            "vorangestellt" => Some(ChangeType::Prepend),
            _ => None,
        }
    }

    /// Whether the kind marks a line the parser declined to classify.
    #[must_use]
    pub fn is_unresolved(&self) -> bool {
        matches!(self, ChangeType::MultipleChanges | ChangeType::Unknown)
    }
}

impl fmt::Display for ChangeType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One parsed amendment instruction.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Change {
    /// Path of bulletpoints from the law's root to the target node.
    pub location: Vec<String>,
    /// Zero or one sentence reference, as written (e.g. "Sätze 5 bis 7").
    pub sentences: Vec<String>,
    /// Quoted fragments and punctuation marks, in order of appearance.
    pub text: Vec<String>,
    pub change_type: ChangeType,
    /// The instruction line this change was parsed from.
    pub raw_text: String,
}

impl Change {
    /// Create a change without location, sentences or text.
    #[must_use]
    pub fn new(change_type: ChangeType, raw_text: impl Into<String>) -> Self {
        Self {
            location: Vec::new(),
            sentences: Vec::new(),
            text: Vec::new(),
            change_type,
            raw_text: raw_text.into(),
        }
    }

    /// Set the location path.
    #[must_use]
    pub fn with_location(mut self, location: impl IntoIterator<Item = impl Into<String>>) -> Self {
        self.location = location.into_iter().map(Into::into).collect();
        self
    }

    /// Set the sentence references.
    #[must_use]
    pub fn with_sentences(
        mut self,
        sentences: impl IntoIterator<Item = impl Into<String>>,
    ) -> Self {
        self.sentences = sentences.into_iter().map(Into::into).collect();
        self
    }

    /// Set the text fragments.
    #[must_use]
    pub fn with_text(mut self, text: impl IntoIterator<Item = impl Into<String>>) -> Self {
        self.text = text.into_iter().map(Into::into).collect();
        self
    }
}
