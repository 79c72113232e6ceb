//! Per-change results.

use std::fmt;

use serde::Serialize;

use crate::amendment::Change;
use crate::tree::NodeId;

/// How an attempted change ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Outcome {
    /// The tree was changed as instructed.
    Applied,
    /// The operation succeeded but the rendered tree did not change.
    AppliedWithoutEffect,
    /// The operation was attempted and refused.
    Failed,
    /// The location could not be resolved.
    NotFound,
    /// The change was never dispatched.
    Skipped,
}

impl Outcome {
    /// Name used in reports.
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Outcome::Applied => "applied",
            Outcome::AppliedWithoutEffect => "applied_without_effect",
            Outcome::Failed => "failed",
            Outcome::NotFound => "not_found",
            Outcome::Skipped => "skipped",
        }
    }

    /// 1 when the change counts as applied, 0 otherwise.
    #[must_use]
    pub fn status(&self) -> u8 {
        match self {
            Outcome::Applied | Outcome::AppliedWithoutEffect => 1,
            Outcome::Failed | Outcome::NotFound | Outcome::Skipped => 0,
        }
    }
}

impl fmt::Display for Outcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A change paired with the node it was applied to and how that went.
#[derive(Debug, Clone)]
pub struct ChangeResult {
    pub change: Change,
    /// Target node, `None` when resolution failed.
    pub affected_node: Option<NodeId>,
    pub outcome: Outcome,
    pub message: String,
}

impl ChangeResult {
    fn new(
        change: &Change,
        affected_node: Option<NodeId>,
        outcome: Outcome,
        message: impl Into<String>,
    ) -> Self {
        Self {
            change: change.clone(),
            affected_node,
            outcome,
            message: message.into(),
        }
    }

    /// Successful change of `node`.
    #[must_use]
    pub fn applied(change: &Change, node: NodeId, message: impl Into<String>) -> Self {
        Self::new(change, Some(node), Outcome::Applied, message)
    }

    /// Refused change of `node`; nothing was mutated.
    #[must_use]
    pub fn failed(change: &Change, node: NodeId, message: impl Into<String>) -> Self {
        Self::new(change, Some(node), Outcome::Failed, message)
    }

    /// Change whose location did not resolve.
    #[must_use]
    pub fn not_found(change: &Change, message: impl Into<String>) -> Self {
        Self::new(change, None, Outcome::NotFound, message)
    }

    /// Change that was not dispatched to an edit operation.
    #[must_use]
    pub fn skipped(change: &Change, node: Option<NodeId>, message: impl Into<String>) -> Self {
        Self::new(change, node, Outcome::Skipped, message)
    }

    /// 1 when applied, 0 otherwise.
    #[must_use]
    pub fn status(&self) -> u8 {
        self.outcome.status()
    }
}
