//! Configuration constants and validation functions for the amendment engine.

use std::path::Path;

use crate::error::{NovelleError, Result};

/// Spaces per tree level in [`LawTree::to_text`](crate::tree::LawTree::to_text).
pub const INDENT_WIDTH: usize = 4;

/// Bulletpoint of the root node of a source-law tree.
pub const SOURCE_ROOT_BULLETPOINT: &str = "Titel:";

/// Bulletpoint of the root node of an amendment tree.
pub const AMENDMENT_ROOT_BULLETPOINT: &str = "change";

/// Bulletpoint given to `## ` heading lines of an amendment.
pub const HEADING_BULLETPOINT: &str = "##";

/// Text of a segment whose content has been repealed.
pub const REPEALED_TEXT: &str = "(weggefallen)";

/// Name of the table of contents segment and location token.
pub const TABLE_OF_CONTENTS: &str = "Inhaltsübersicht";

/// Location token addressing a node's heading.
///
/// Headings are not modeled as separate nodes, so resolution stops at
/// the current node when it meets this token.
pub const HEADING_REFERENCE: &str = "Überschrift";

/// Bulletpoint prefix of chapter-level containers.
pub const CHAPTER_PREFIX: &str = "Kapitel";

/// Abbreviations that end with a period but never end a sentence.
///
/// Sentence fragments ending in one of these are joined with the fragment
/// that follows.
pub const SENTENCE_JOIN_ABBREVIATIONS: &[&str] = &["BGBl."];

/// German opening quotation mark („).
pub const OPENING_QUOTE: char = '\u{201E}';

/// German closing quotation mark (“).
pub const CLOSING_QUOTE: char = '\u{201C}';

/// Wrap width for messages printed by the CLI.
pub const MESSAGE_WRAP_WIDTH: usize = 100;

/// Check that opening and closing quotation marks pair up.
///
/// Marks are scanned in order. A closing mark without an open quote fails
/// right away with the counts seen up to that mark, otherwise the totals
/// are compared at the end.
///
/// # Examples
/// ```
/// use novelle::config::validate_quotes;
///
/// assert!(validate_quotes("das Wort „Grünanlagen“ wird ersetzt").is_ok());
/// assert!(validate_quotes("das Wort „Grünanlagen wird ersetzt").is_err());
/// ```
pub fn validate_quotes(text: &str) -> Result<()> {
    let mut opening = 0usize;
    let mut closing = 0usize;
    for c in text.chars() {
        match c {
            OPENING_QUOTE => opening += 1,
            CLOSING_QUOTE => {
                closing += 1;
                if closing > opening {
                    return Err(NovelleError::QuoteMismatch { opening, closing });
                }
            }
            _ => {}
        }
    }

    if opening == closing {
        Ok(())
    } else {
        Err(NovelleError::QuoteMismatch { opening, closing })
    }
}

/// Check that an output path exists and is a directory.
pub fn validate_output_dir(path: &Path) -> Result<()> {
    if !path.exists() {
        return Err(NovelleError::Io(std::io::Error::new(
            std::io::ErrorKind::NotFound,
            format!("Output directory does not exist: {}", path.display()),
        )));
    }
    if !path.is_dir() {
        return Err(NovelleError::Io(std::io::Error::new(
            std::io::ErrorKind::InvalidInput,
            format!("Output path is not a directory: {}", path.display()),
        )));
    }
    Ok(())
}
