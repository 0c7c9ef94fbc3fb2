//! SQLite HistoryStore 実装

use async_trait::async_trait;
use sqlx::sqlite::SqlitePool;

use crate::domain::{ChatMessage, HistoryRecord, HistoryStore, RoomId, StoreError};

use super::unavailable;

/// `messages` テーブルを使う HistoryStore 実装
///
/// 追記順は AUTOINCREMENT の `id` で保証します。
pub struct SqliteHistoryStore {
    pool: SqlitePool,
}

impl SqliteHistoryStore {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl HistoryStore for SqliteHistoryStore {
    async fn append(&self, message: &ChatMessage) -> Result<(), StoreError> {
        sqlx::query("INSERT INTO messages (room_id, nickname, content) VALUES (?, ?, ?)")
            .bind(message.room_id.as_str())
            .bind(message.nickname.as_str())
            .bind(message.content.as_str())
            .execute(&self.pool)
            .await
            .map_err(unavailable)?;
        Ok(())
    }

    async fn list(&self, room_id: &RoomId) -> Result<Vec<HistoryRecord>, StoreError> {
        let rows: Vec<(String, String)> = sqlx::query_as(
            "SELECT nickname, content FROM messages WHERE room_id = ? ORDER BY id ASC",
        )
        .bind(room_id.as_str())
        .fetch_all(&self.pool)
        .await
        .map_err(unavailable)?;

        Ok(rows
            .into_iter()
            .map(|(nickname, content)| HistoryRecord { nickname, content })
            .collect())
    }
}
