//! Error types for the amendment engine.
//!
//! Only whole-document problems and internal inconsistencies are errors.
//! A single change that cannot be applied is reported through
//! [`ChangeResult`](crate::apply::ChangeResult) instead.

use thiserror::Error;

use crate::tree::NodeId;

/// Main error type for the novelle library.
#[derive(Debug, Error)]
pub enum NovelleError {
    /// Opening and closing quotation marks do not pair up.
    #[error("{}", quote_mismatch_message(*.opening, *.closing))]
    QuoteMismatch { opening: usize, closing: usize },

    /// `remove_child` was asked for a bulletpoint that has no matching child.
    #[error("Child {bulletpoint} not found")]
    ChildNotFound { bulletpoint: String },

    /// A node identifier that no longer (or never did) belong to the tree.
    #[error("Node {0} is not part of this tree")]
    UnknownNode(NodeId),

    /// Renumbering needs a digit run in the bulletpoint.
    #[error("Bulletpoint '{0}' has no number that could be renumbered")]
    NonNumericBulletpoint(String),

    /// Input that should describe a structured document yielded nothing.
    #[error("No structure found in {0}")]
    EmptyDocument(String),

    /// Building a pattern from change text failed.
    #[error("Invalid pattern: {0}")]
    Pattern(#[from] regex::Error),

    /// IO error.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// YAML serialization error.
    #[error("YAML serialization failed: {0}")]
    Yaml(#[from] serde_yaml_ng::Error),

    /// JSON (de)serialization error.
    #[error("JSON (de)serialization failed: {0}")]
    Json(#[from] serde_json::Error),
}

fn quote_mismatch_message(opening: usize, closing: usize) -> String {
    if opening > closing {
        format!(
            "Found {opening} opening but only {closing} closing quotation marks ({} unclosed)",
            opening - closing
        )
    } else {
        format!(
            "Found {closing} closing but only {opening} opening quotation marks ({} unopened)",
            closing - opening
        )
    }
}

/// Result type alias for novelle operations.
pub type Result<T> = std::result::Result<T, NovelleError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_quote_mismatch_more_opening() {
        let err = NovelleError::QuoteMismatch {
            opening: 3,
            closing: 1,
        };
        assert_eq!(
            err.to_string(),
            "Found 3 opening but only 1 closing quotation marks (2 unclosed)"
        );
    }

    #[test]
    fn test_quote_mismatch_more_closing() {
        let err = NovelleError::QuoteMismatch {
            opening: 0,
            closing: 1,
        };
        assert_eq!(
            err.to_string(),
            "Found 1 closing but only 0 opening quotation marks (1 unopened)"
        );
    }

    #[test]
    fn test_child_not_found_display() {
        let err = NovelleError::ChildNotFound {
            bulletpoint: "(4)".to_string(),
        };
        assert_eq!(err.to_string(), "Child (4) not found");
    }
}
