//! SQLite RoomStore 実装

use async_trait::async_trait;
use sqlx::sqlite::SqlitePool;

use crate::domain::{RoomId, RoomPassword, RoomStore, StoreError};

use super::unavailable;

/// `rooms` テーブルを使う RoomStore 実装
pub struct SqliteRoomStore {
    pool: SqlitePool,
}

impl SqliteRoomStore {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl RoomStore for SqliteRoomStore {
    async fn put(&self, room_id: &RoomId, password: &RoomPassword) -> Result<(), StoreError> {
        sqlx::query("INSERT INTO rooms (room_id, password) VALUES (?, ?)")
            .bind(room_id.as_str())
            .bind(password.as_str())
            .execute(&self.pool)
            .await
            .map_err(|e| match e {
                sqlx::Error::Database(db) if db.is_unique_violation() => {
                    StoreError::AlreadyExists(room_id.as_str().to_string())
                }
                other => unavailable(other),
            })?;
        Ok(())
    }

    async fn get(&self, room_id: &RoomId) -> Result<RoomPassword, StoreError> {
        let password: Option<String> =
            sqlx::query_scalar("SELECT password FROM rooms WHERE room_id = ?")
                .bind(room_id.as_str())
                .fetch_optional(&self.pool)
                .await
                .map_err(unavailable)?;

        let password =
            password.ok_or_else(|| StoreError::NotFound(room_id.as_str().to_string()))?;
        RoomPassword::new(password).map_err(|e| {
            StoreError::Unavailable(format!("corrupt password for room '{}': {}", room_id, e))
        })
    }
}
