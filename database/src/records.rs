//! Row types for the four stored resource kinds.

use authz::OwnedResource;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// A registered user
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct UserRecord {
    pub id: i64,
    pub username: String,
    pub password_hash: String,
    pub created_at: DateTime<Utc>,
}

/// A news item. Published editorially, not through the public API.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct NewsRecord {
    pub id: i64,
    pub title: String,
    pub text: String,
    pub date: DateTime<Utc>,
}

/// A user comment attached to a news item.
///
/// `author_id` is set once at creation and never reassigned by edits.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct CommentRecord {
    pub id: i64,
    pub news_id: i64,
    pub author_id: i64,
    pub text: String,
    pub created: DateTime<Utc>,
}

impl OwnedResource for CommentRecord {
    fn kind(&self) -> &'static str {
        "comment"
    }

    fn owner_id(&self) -> i64 {
        self.author_id
    }
}

/// A personal note addressed by its unique slug.
///
/// `author_id` is set once at creation and never reassigned by edits.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct NoteRecord {
    pub id: i64,
    pub title: String,
    pub text: String,
    pub slug: String,
    pub author_id: i64,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl OwnedResource for NoteRecord {
    fn kind(&self) -> &'static str {
        "note"
    }

    fn owner_id(&self) -> i64 {
        self.author_id
    }
}
