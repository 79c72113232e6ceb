//! Bulletpoint splitting system for flat legal text.
//!
//! A [`MarkerCascade`] lists marker patterns from the coarsest level
//! (chapters) to the finest (lettered items). The [`SplitEngine`] splits
//! text at every match of the first pattern that occurs, turns each match
//! into a child node and recurses into the text that follows it. The
//! [`SplitStrategy`] decides how a node's own text is cut from that
//! segment, which differs between source laws and amendments.

mod config;
mod engine;
mod registry;
mod strategy;
mod types;

pub use config::{create_amendment_cascade, create_source_law_cascade};
pub use engine::SplitEngine;
pub use registry::MarkerCascade;
pub use strategy::{AmendmentStrategy, SourceLawStrategy, SplitStrategy};
pub use types::MarkerSpec;
