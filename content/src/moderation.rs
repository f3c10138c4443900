//! Comment text moderation
//!
//! Comments containing any word from the prohibited list are rejected at
//! the validation layer, before storage or authorization is consulted.

use crate::error::ContentError;
use tracing::debug;

/// Words that may not appear in comment text.
pub const PROHIBITED_WORDS: &[&str] = &["scoundrel", "swindler"];

/// Field error message shown when a comment contains a prohibited word.
pub const PROHIBITED_WARNING: &str = "Don't use offensive language!";

/// Check comment text against the prohibited word list
///
/// Matching is case-insensitive containment: a prohibited word embedded in
/// surrounding text still rejects the comment.
pub fn check_comment_text(text: &str) -> Result<(), ContentError> {
    let lowered = text.to_lowercase();

    for word in PROHIBITED_WORDS {
        if lowered.contains(word) {
            debug!("comment rejected, contains prohibited word: {}", word);
            return Err(ContentError::ProhibitedWords(
                PROHIBITED_WARNING.to_string(),
            ));
        }
    }

    Ok(())
}
