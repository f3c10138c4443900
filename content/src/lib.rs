//! # Content Crate
//!
//! Validation utilities shared by the Quill backend's public surface:
//!
//! - **Slug handling**: derive a URL-safe slug from a note title and
//!   validate user-supplied slugs.
//! - **Moderation**: reject comment text containing prohibited words.
//!
//! Both run at the validation layer, before any authorization or storage
//! work happens for the request.
//!
//! ## Usage
//!
//! ```rust
//! use content::{check_comment_text, slugify};
//!
//! let slug = slugify("My First Note");
//! assert_eq!(slug, "my-first-note");
//! assert!(check_comment_text("nice article").is_ok());
//! ```

pub mod error;
pub mod moderation;
pub mod slug;

pub use error::ContentError;
pub use moderation::{check_comment_text, PROHIBITED_WARNING, PROHIBITED_WORDS};
pub use slug::{slugify, validate_slug_format, SLUG_MAX_LEN, SLUG_TAKEN_WARNING};

/// Result type for content operations
pub type Result<T> = std::result::Result<T, ContentError>;
