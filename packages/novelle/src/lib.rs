//! Novelle - Apply German amending-law instructions to the law they amend.
//!
//! An amending law ("Änderungsgesetz") lists instructions such as
//! "In § 9 Absatz 1 wird das Wort „befahrbaren“ durch die Wörter „zum
//! Befahren bestimmten“ ersetzt." This crate parses the amended law into a
//! tree of labeled nodes, parses the instructions into structured changes
//! and applies them one by one, reporting per change whether it took effect.
//!
//! # Example
//!
//! ```
//! use novelle::{build_from_text, parse_changes, Amender, QuotePolicy};
//!
//! let law = build_from_text("Straßengesetz", "§ 9 Sondernutzung\n(1) Die Nutzung der befahrbaren Straßen.").unwrap();
//! let changes = parse_changes(
//!     "1. In § 9 Absatz 1 wird das Wort „befahrbaren“ durch die Wörter „zum Befahren bestimmten“ ersetzt.",
//!     QuotePolicy::Strict,
//! )
//! .unwrap();
//!
//! let amendment = Amender::default().apply_changes(&law, &changes).unwrap();
//! assert_eq!(amendment.applied, 1);
//! assert!(amendment.tree.to_text().contains("zum Befahren bestimmten Straßen"));
//! ```
//!
//! # Architecture
//!
//! - [`config`]: Configuration constants and validation
//! - [`error`]: Error types and Result alias
//! - [`tree`]: Arena-backed document tree with renumbering
//! - [`splitting`]: Marker cascades that split flat text into trees
//! - [`source`]: Source-law tree builder
//! - [`amendment`]: Amendment normalization and change parsing
//! - [`apply`]: Location resolution, edit operations and orchestration
//! - [`output`]: Change reports and output files
//! - [`cli`]: Command-line interface

pub mod amendment;
pub mod apply;
pub mod cli;
pub mod config;
pub mod error;
pub mod output;
pub mod source;
pub mod splitting;
pub mod tree;

// Re-export the pipeline entry points
pub use amendment::{parse_changes, Change, ChangeType, QuotePolicy};
pub use apply::{Amender, Amendment, ChangeResult, Outcome, RuleSplitter, SentenceSplitter};
pub use source::{build_from_segments, build_from_text, LawSegment};

// Re-export commonly used items
pub use error::{NovelleError, Result};
pub use tree::{LawTree, NodeId};
