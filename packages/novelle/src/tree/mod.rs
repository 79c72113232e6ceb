//! Document tree of a law: labeled nodes in a parent/children hierarchy.
//!
//! Nodes live in a generational arena and are addressed by [`NodeId`].
//! Insertion and removal keep sibling bulletpoints unique by renumbering.

mod bulletpoint;
mod export;
mod node;

pub use bulletpoint::{decrement, increment, natural_cmp};
pub use export::TreeDict;
pub use node::{DocumentNode, LawTree, NodeId};
