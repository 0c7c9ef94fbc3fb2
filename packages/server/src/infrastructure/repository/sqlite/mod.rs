//! SQLite stores.
//!
//! A file-based backend for single-server deployments. Both stores share
//! one connection pool owned by [`SqliteDatabase`].

mod history;
mod room;

use sqlx::sqlite::{SqlitePool, SqlitePoolOptions};

use crate::domain::StoreError;

pub use history::SqliteHistoryStore;
pub use room::SqliteRoomStore;

const MAX_CONNECTIONS: u32 = 5;

/// Connection pool plus schema setup
#[derive(Clone)]
pub struct SqliteDatabase {
    pool: SqlitePool,
}

impl SqliteDatabase {
    /// Connect and create the tables if they do not exist.
    ///
    /// # Example URLs
    /// - `sqlite::memory:` - In-memory database (ephemeral)
    /// - `sqlite://agora.db?mode=rwc` - File-based database, created if missing
    pub async fn connect(database_url: &str) -> Result<Self, StoreError> {
        // Every connection to `:memory:` opens its own empty database, so the
        // pool must keep exactly one connection alive forever.
        let options = if database_url.contains(":memory:") {
            SqlitePoolOptions::new()
                .max_connections(1)
                .idle_timeout(None)
                .max_lifetime(None)
        } else {
            SqlitePoolOptions::new().max_connections(MAX_CONNECTIONS)
        };

        let pool = options
            .connect(database_url)
            .await
            .map_err(unavailable)?;

        let database = Self { pool };
        database.run_migrations().await?;
        Ok(database)
    }

    /// In-memory database (for testing)
    pub async fn in_memory() -> Result<Self, StoreError> {
        Self::connect("sqlite::memory:").await
    }

    async fn run_migrations(&self) -> Result<(), StoreError> {
        sqlx::query(
            r#"
            CREATE TABLE IF NOT EXISTS rooms (
                room_id TEXT PRIMARY KEY,
                password TEXT NOT NULL
            )
            "#,
        )
        .execute(&self.pool)
        .await
        .map_err(unavailable)?;

        sqlx::query(
            r#"
            CREATE TABLE IF NOT EXISTS messages (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                room_id TEXT NOT NULL,
                nickname TEXT NOT NULL,
                content TEXT NOT NULL
            )
            "#,
        )
        .execute(&self.pool)
        .await
        .map_err(unavailable)?;

        sqlx::query("CREATE INDEX IF NOT EXISTS idx_messages_room_id ON messages(room_id, id)")
            .execute(&self.pool)
            .await
            .map_err(unavailable)?;

        Ok(())
    }

    pub fn room_store(&self) -> SqliteRoomStore {
        SqliteRoomStore::new(self.pool.clone())
    }

    pub fn history_store(&self) -> SqliteHistoryStore {
        SqliteHistoryStore::new(self.pool.clone())
    }
}

fn unavailable(error: sqlx::Error) -> StoreError {
    StoreError::Unavailable(error.to_string())
}
