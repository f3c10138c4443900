//! Development seed data. Only used by debug builds when the database is
//! empty, so a fresh checkout has something on the home page.

use chrono::{Duration, Utc};
use database::{Database, NewsStore};
use tracing::info;

/// Seed a handful of news items if the news table is empty.
pub async fn init_test_data(db: &Database) -> database::Result<()> {
    let news = NewsStore::new(db);

    if news.count().await? > 0 {
        info!("News table already populated, skipping test data");
        return Ok(());
    }

    let today = Utc::now();
    let items = [
        (
            "Welcome to Quill",
            "Quill is a small news-and-notes service. Anyone can read the news; \
             log in to comment and to keep personal notes.",
        ),
        (
            "Comments are moderated",
            "Comment text is checked against a short prohibited-word list before \
             it is stored.",
        ),
        (
            "Notes are private",
            "Your notes are listed only to you, and only you can edit or delete \
             them.",
        ),
    ];

    for (offset, (title, text)) in items.iter().enumerate() {
        news.create(title, text, today - Duration::days(offset as i64))
            .await?;
    }

    info!("Seeded {} news items", items.len());
    Ok(())
}
