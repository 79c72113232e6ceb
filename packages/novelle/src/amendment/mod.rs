//! Change-request parser: from amending-law text to [`Change`] records.
//!
//! Parsing runs in two stages. The normalized text is split into a tree
//! with the amendment cascade and each leaf path is flattened into one
//! instruction line. Each line is then classified on its own.

mod extract;
mod normalize;
mod parser;
mod types;

pub use extract::{
    adapt_location_token, collapse_whitespace, parse_change_text, parse_location,
    parse_sentences, strip_quoted,
};
pub use normalize::{
    join_quoted_lines, normalize_amendment, pull_instruction_lines, rejoin_hyphenated,
    repair_quotes, QuotePolicy,
};
pub use parser::{change_request_lines, parse_change_request_line, parse_changes};
pub use types::{Change, ChangeType};
