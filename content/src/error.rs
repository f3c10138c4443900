//! Error types for content validation

use thiserror::Error;

/// Errors that can occur while validating user-submitted content
#[derive(Error, Debug)]
pub enum ContentError {
    /// A field failed format or uniqueness validation
    #[error("Content validation failed: {0}")]
    ValidationError(String),

    /// Submitted text contains words from the prohibited list
    #[error("{0}")]
    ProhibitedWords(String),
}

impl ContentError {
    /// The user-facing message for this error.
    pub fn message(&self) -> &str {
        match self {
            ContentError::ValidationError(msg) => msg,
            ContentError::ProhibitedWords(msg) => msg,
        }
    }
}
