//! Applying parsed changes to a source-law tree.
//!
//! - `resolver`: location path to target node
//! - `sentences`: sentence splitting and sentence references
//! - `edits`: the edit operations on one node
//! - `orchestrator`: ordered, non-fatal application of a change list

mod edits;
mod orchestrator;
mod resolver;
mod result;
mod sentences;

pub use edits::Editor;
pub use orchestrator::{Amender, Amendment};
pub use resolver::{resolve, ResolveError};
pub use result::{ChangeResult, Outcome};
pub use sentences::{rejoin_abbreviations, split_sentences, RuleSplitter, SentenceRef, SentenceSplitter};
