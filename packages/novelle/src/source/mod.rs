//! Source-law tree builder.
//!
//! Accepts a law either as flat text with bulletpoint markers or as the
//! segment list of a structured law API, and builds the document tree the
//! amendments are applied to.

mod builder;
mod markup;

pub use builder::{build_from_segments, build_from_text, source_law_engine, LawSegment, SegmentParent};
pub use markup::{flatten_markup, is_structured, strip_markup};
