use crate::records::{CommentRecord, NewsRecord, NoteRecord, UserRecord};
use crate::{Database, DatabaseError, Result};
use chrono::{DateTime, Utc};
use tracing::{debug, info};

/// Number of news items shown on the home page listing.
pub const NEWS_PER_PAGE: i64 = 10;

/// User account storage operations
pub struct UserStore<'a> {
    db: &'a Database,
}

impl<'a> UserStore<'a> {
    pub fn new(db: &'a Database) -> Self {
        Self { db }
    }

    /// Create a new user, returning its id. The username must be unique.
    pub async fn create(&self, username: &str, password_hash: &str) -> Result<i64> {
        let result = sqlx::query("INSERT INTO users (username, password_hash) VALUES (?, ?)")
            .bind(username)
            .bind(password_hash)
            .execute(self.db.pool())
            .await?;

        let id = result.last_insert_rowid();
        info!("Created user {} with id: {}", username, id);
        Ok(id)
    }

    pub async fn get(&self, id: i64) -> Result<Option<UserRecord>> {
        let user = sqlx::query_as::<_, UserRecord>("SELECT * FROM users WHERE id = ?")
            .bind(id)
            .fetch_optional(self.db.pool())
            .await?;
        Ok(user)
    }

    pub async fn get_by_username(&self, username: &str) -> Result<Option<UserRecord>> {
        let user = sqlx::query_as::<_, UserRecord>("SELECT * FROM users WHERE username = ?")
            .bind(username)
            .fetch_optional(self.db.pool())
            .await?;
        Ok(user)
    }

    pub async fn username_exists(&self, username: &str) -> Result<bool> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM users WHERE username = ?")
            .bind(username)
            .fetch_one(self.db.pool())
            .await?;
        Ok(count > 0)
    }
}

/// News item storage operations
pub struct NewsStore<'a> {
    db: &'a Database,
}

impl<'a> NewsStore<'a> {
    pub fn new(db: &'a Database) -> Self {
        Self { db }
    }

    pub async fn create(&self, title: &str, text: &str, date: DateTime<Utc>) -> Result<i64> {
        let result = sqlx::query("INSERT INTO news (title, text, date) VALUES (?, ?, ?)")
            .bind(title)
            .bind(text)
            .bind(date)
            .execute(self.db.pool())
            .await?;

        let id = result.last_insert_rowid();
        debug!("Created news item with id: {}", id);
        Ok(id)
    }

    pub async fn get(&self, id: i64) -> Result<Option<NewsRecord>> {
        let news = sqlx::query_as::<_, NewsRecord>("SELECT * FROM news WHERE id = ?")
            .bind(id)
            .fetch_optional(self.db.pool())
            .await?;
        Ok(news)
    }

    /// The home page listing: newest first, at most `limit` items.
    pub async fn home_page(&self, limit: i64) -> Result<Vec<NewsRecord>> {
        let items =
            sqlx::query_as::<_, NewsRecord>("SELECT * FROM news ORDER BY date DESC LIMIT ?")
                .bind(limit)
                .fetch_all(self.db.pool())
                .await?;
        Ok(items)
    }

    pub async fn count(&self) -> Result<i64> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM news")
            .fetch_one(self.db.pool())
            .await?;
        Ok(count)
    }
}

/// Comment storage operations
pub struct CommentStore<'a> {
    db: &'a Database,
}

impl<'a> CommentStore<'a> {
    pub fn new(db: &'a Database) -> Self {
        Self { db }
    }

    pub async fn create(
        &self,
        news_id: i64,
        author_id: i64,
        text: &str,
        created: DateTime<Utc>,
    ) -> Result<i64> {
        let result = sqlx::query(
            "INSERT INTO comments (news_id, author_id, text, created) VALUES (?, ?, ?, ?)",
        )
        .bind(news_id)
        .bind(author_id)
        .bind(text)
        .bind(created)
        .execute(self.db.pool())
        .await?;

        let id = result.last_insert_rowid();
        info!("Created comment {} on news {}", id, news_id);
        Ok(id)
    }

    pub async fn get(&self, id: i64) -> Result<Option<CommentRecord>> {
        let comment = sqlx::query_as::<_, CommentRecord>("SELECT * FROM comments WHERE id = ?")
            .bind(id)
            .fetch_optional(self.db.pool())
            .await?;
        Ok(comment)
    }

    /// Comments of a news item, oldest first.
    pub async fn list_for_news(&self, news_id: i64) -> Result<Vec<CommentRecord>> {
        let comments = sqlx::query_as::<_, CommentRecord>(
            "SELECT * FROM comments WHERE news_id = ? ORDER BY created ASC",
        )
        .bind(news_id)
        .fetch_all(self.db.pool())
        .await?;
        Ok(comments)
    }

    /// Replace the comment text. The author is never reassigned.
    pub async fn update_text(&self, id: i64, text: &str) -> Result<()> {
        let result = sqlx::query("UPDATE comments SET text = ? WHERE id = ?")
            .bind(text)
            .bind(id)
            .execute(self.db.pool())
            .await?;

        if result.rows_affected() == 0 {
            return Err(DatabaseError::RecordNotFound(format!("comment {}", id)));
        }

        info!("Updated comment with id: {}", id);
        Ok(())
    }

    pub async fn delete(&self, id: i64) -> Result<()> {
        let result = sqlx::query("DELETE FROM comments WHERE id = ?")
            .bind(id)
            .execute(self.db.pool())
            .await?;

        if result.rows_affected() == 0 {
            return Err(DatabaseError::RecordNotFound(format!("comment {}", id)));
        }

        info!("Deleted comment with id: {}", id);
        Ok(())
    }

    pub async fn count(&self) -> Result<i64> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM comments")
            .fetch_one(self.db.pool())
            .await?;
        Ok(count)
    }
}

/// Note storage operations
pub struct NoteStore<'a> {
    db: &'a Database,
}

impl<'a> NoteStore<'a> {
    pub fn new(db: &'a Database) -> Self {
        Self { db }
    }

    pub async fn create(
        &self,
        title: &str,
        text: &str,
        slug: &str,
        author_id: i64,
    ) -> Result<i64> {
        let result = sqlx::query(
            "INSERT INTO notes (title, text, slug, author_id) VALUES (?, ?, ?, ?)",
        )
        .bind(title)
        .bind(text)
        .bind(slug)
        .bind(author_id)
        .execute(self.db.pool())
        .await?;

        let id = result.last_insert_rowid();
        info!("Created note {} with slug: {}", id, slug);
        Ok(id)
    }

    pub async fn get_by_slug(&self, slug: &str) -> Result<Option<NoteRecord>> {
        let note = sqlx::query_as::<_, NoteRecord>("SELECT * FROM notes WHERE slug = ?")
            .bind(slug)
            .fetch_optional(self.db.pool())
            .await?;
        Ok(note)
    }

    pub async fn slug_exists(&self, slug: &str) -> Result<bool> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM notes WHERE slug = ?")
            .bind(slug)
            .fetch_one(self.db.pool())
            .await?;
        Ok(count > 0)
    }

    /// Notes belonging to one author, oldest first.
    pub async fn list_for_author(&self, author_id: i64) -> Result<Vec<NoteRecord>> {
        let notes = sqlx::query_as::<_, NoteRecord>(
            "SELECT * FROM notes WHERE author_id = ? ORDER BY id ASC",
        )
        .bind(author_id)
        .fetch_all(self.db.pool())
        .await?;
        Ok(notes)
    }

    /// Update title, text, and slug. `author_id` is intentionally not an
    /// updatable column.
    pub async fn update(&self, id: i64, title: &str, text: &str, slug: &str) -> Result<()> {
        let result = sqlx::query(
            "UPDATE notes SET title = ?, text = ?, slug = ?, updated_at = CURRENT_TIMESTAMP \
             WHERE id = ?",
        )
        .bind(title)
        .bind(text)
        .bind(slug)
        .bind(id)
        .execute(self.db.pool())
        .await?;

        if result.rows_affected() == 0 {
            return Err(DatabaseError::RecordNotFound(format!("note {}", id)));
        }

        info!("Updated note with id: {}", id);
        Ok(())
    }

    pub async fn delete(&self, id: i64) -> Result<()> {
        let result = sqlx::query("DELETE FROM notes WHERE id = ?")
            .bind(id)
            .execute(self.db.pool())
            .await?;

        if result.rows_affected() == 0 {
            return Err(DatabaseError::RecordNotFound(format!("note {}", id)));
        }

        info!("Deleted note with id: {}", id);
        Ok(())
    }

    pub async fn count(&self) -> Result<i64> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM notes")
            .fetch_one(self.db.pool())
            .await?;
        Ok(count)
    }
}
