//! Slug derivation and validation for notes

use crate::error::ContentError;

/// Maximum length of a note slug.
pub const SLUG_MAX_LEN: usize = 100;

/// Warning appended to a slug that is already taken, surfaced as a field
/// validation error on the create/update form.
pub const SLUG_TAKEN_WARNING: &str = " is already in use, slug must be unique";

/// Derive a URL-safe slug from a title
///
/// Converts the title by:
/// 1. Lowercasing
/// 2. Replacing punctuation with spaces
/// 3. Collapsing runs of whitespace
/// 4. Joining words with hyphens
/// 5. Truncating to [`SLUG_MAX_LEN`] characters
///
/// Used when a note is submitted without an explicit slug.
///
/// # Example
///
/// ```rust
/// use content::slugify;
///
/// assert_eq!(slugify("Hello World!"), "hello-world");
/// assert_eq!(slugify("Shopping: This Week"), "shopping-this-week");
/// ```
pub fn slugify(title: &str) -> String {
    let slug = title
        .to_lowercase()
        .chars()
        .map(|c| if c.is_alphanumeric() { c } else { ' ' })
        .collect::<String>()
        .split_whitespace()
        .collect::<Vec<_>>()
        .join("-");

    // Truncation can land on a word boundary, leaving a dangling hyphen.
    let truncated: String = slug.chars().take(SLUG_MAX_LEN).collect();
    truncated.trim_end_matches('-').to_string()
}

/// Validate that a string is a usable slug
///
/// Valid slugs are non-empty, at most [`SLUG_MAX_LEN`] characters, and
/// contain only lowercase ASCII letters, digits, and single interior
/// hyphens.
pub fn validate_slug_format(slug: &str) -> Result<(), ContentError> {
    if slug.is_empty() {
        return Err(ContentError::ValidationError(
            "Slug cannot be empty".to_string(),
        ));
    }

    if slug.chars().count() > SLUG_MAX_LEN {
        return Err(ContentError::ValidationError(format!(
            "Slug cannot be longer than {} characters",
            SLUG_MAX_LEN
        )));
    }

    if !slug
        .chars()
        .all(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || c == '-')
    {
        return Err(ContentError::ValidationError(
            "Slug can only contain lowercase letters, numbers, and hyphens".to_string(),
        ));
    }

    if slug.starts_with('-') || slug.ends_with('-') {
        return Err(ContentError::ValidationError(
            "Slug cannot start or end with hyphen".to_string(),
        ));
    }

    if slug.contains("--") {
        return Err(ContentError::ValidationError(
            "Slug cannot contain consecutive hyphens".to_string(),
        ));
    }

    Ok(())
}
