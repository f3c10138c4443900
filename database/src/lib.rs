use sqlx::{Pool, Sqlite, SqlitePool};
use std::path::Path;
use tracing::{debug, info};

pub mod error;
pub mod init;
pub mod records;
pub mod storage;

pub use error::{DatabaseError, Result};
pub use init::{initialize_database, DatabaseConfig};
pub use records::{CommentRecord, NewsRecord, NoteRecord, UserRecord};
pub use storage::{CommentStore, NewsStore, NoteStore, UserStore, NEWS_PER_PAGE};

/// Database connection pool
#[derive(Debug)]
pub struct Database {
    pool: Pool<Sqlite>,
}

impl Database {
    /// Create a new database connection
    pub async fn new(database_path: &str) -> Result<Self> {
        // Ensure the data directory exists
        if let Some(parent) = Path::new(database_path).parent() {
            std::fs::create_dir_all(parent)?;
        }

        info!("Connecting to database at: {}", database_path);

        // For SQLite, we need to ensure the proper connection string format
        let connection_string =
            if database_path.starts_with("sqlite:") || database_path.starts_with(":memory:") {
                database_path.to_string()
            } else if database_path.starts_with('/') {
                format!("sqlite://{}", database_path)
            } else {
                format!("sqlite:{}", database_path)
            };

        debug!("Using connection string: {}", connection_string);

        let pool = SqlitePool::connect(&connection_string).await?;

        debug!("Database connection established");

        Ok(Self { pool })
    }

    /// Get a reference to the connection pool
    pub fn pool(&self) -> &Pool<Sqlite> {
        &self.pool
    }

    /// Get a clone of the connection pool
    pub fn get_pool(&self) -> Pool<Sqlite> {
        self.pool.clone()
    }

    /// Check if a table exists
    pub async fn table_exists(&self, table_name: &str) -> Result<bool> {
        let query = r#"
            SELECT COUNT(*) as count
            FROM sqlite_master
            WHERE type='table' AND name=?
        "#;

        let result: (i32,) = sqlx::query_as(query)
            .bind(table_name)
            .fetch_one(&self.pool)
            .await?;

        Ok(result.0 > 0)
    }

    /// Execute raw SQL (for table creation, etc.)
    pub async fn execute_raw(&self, sql: &str) -> Result<()> {
        sqlx::query(sql).execute(&self.pool).await?;
        Ok(())
    }
}
