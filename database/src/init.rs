use crate::{Database, Result};
use std::path::PathBuf;
use std::sync::Arc;
use tracing::info;

/// Database initialization configuration
pub struct DatabaseConfig {
    /// Path to the database file
    pub database_path: PathBuf,
    /// Whether to create tables on initialization
    pub create_tables: bool,
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            database_path: PathBuf::from("data").join("quill.db"),
            create_tables: true,
        }
    }
}

impl DatabaseConfig {
    /// Create a new database configuration with default paths
    pub fn new() -> Self {
        Self::default()
    }

    /// Set a custom database path
    pub fn with_database_path(mut self, path: PathBuf) -> Self {
        self.database_path = path;
        self
    }

    /// Set whether to create tables on initialization
    pub fn with_create_tables(mut self, create: bool) -> Self {
        self.create_tables = create;
        self
    }
}

/// Initialize the database with the given configuration
pub async fn initialize_database(config: DatabaseConfig) -> Result<Arc<Database>> {
    info!("Initializing database with configuration");

    // Ensure the data directory exists
    if let Some(parent) = config.database_path.parent() {
        std::fs::create_dir_all(parent)?;
    }

    // Create the database file if it doesn't exist
    if !config.database_path.exists() {
        std::fs::File::create(&config.database_path)?;
        info!("Created new database file at: {:?}", config.database_path);
    }

    let db_path_str = config
        .database_path
        .to_str()
        .ok_or_else(|| crate::DatabaseError::Other("Invalid database path".into()))?;

    let db = Database::new(db_path_str).await?;
    let db = Arc::new(db);

    if config.create_tables {
        create_tables(&db).await?;
    }

    Ok(db)
}

/// Create the users, news, comments, and notes tables.
pub async fn create_tables(db: &Database) -> Result<()> {
    info!("Creating tables");

    db.execute_raw(
        r#"
        CREATE TABLE IF NOT EXISTS users (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            username TEXT NOT NULL UNIQUE,
            password_hash TEXT NOT NULL,
            created_at TIMESTAMP NOT NULL DEFAULT CURRENT_TIMESTAMP
        )
        "#,
    )
    .await?;

    db.execute_raw(
        r#"
        CREATE TABLE IF NOT EXISTS news (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            title TEXT NOT NULL,
            text TEXT NOT NULL,
            date TIMESTAMP NOT NULL
        )
        "#,
    )
    .await?;

    db.execute_raw(
        r#"
        CREATE TABLE IF NOT EXISTS comments (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            news_id INTEGER NOT NULL REFERENCES news(id) ON DELETE CASCADE,
            author_id INTEGER NOT NULL REFERENCES users(id),
            text TEXT NOT NULL,
            created TIMESTAMP NOT NULL
        )
        "#,
    )
    .await?;

    db.execute_raw(
        r#"
        CREATE INDEX IF NOT EXISTS idx_comments_news_created
        ON comments(news_id, created)
        "#,
    )
    .await?;

    db.execute_raw(
        r#"
        CREATE TABLE IF NOT EXISTS notes (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            title TEXT NOT NULL,
            text TEXT NOT NULL,
            slug TEXT NOT NULL UNIQUE,
            author_id INTEGER NOT NULL REFERENCES users(id),
            created_at TIMESTAMP NOT NULL DEFAULT CURRENT_TIMESTAMP,
            updated_at TIMESTAMP NOT NULL DEFAULT CURRENT_TIMESTAMP
        )
        "#,
    )
    .await?;

    info!("Tables created");

    Ok(())
}
