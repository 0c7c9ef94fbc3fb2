//! InMemory HistoryStore 実装

use std::collections::HashMap;

use async_trait::async_trait;
use tokio::sync::Mutex;

use crate::domain::{ChatMessage, HistoryRecord, HistoryStore, RoomId, StoreError};

/// インメモリ HistoryStore 実装
///
/// room ごとに追記順の Vec を保持します。
#[derive(Default)]
pub struct InMemoryHistoryStore {
    records: Mutex<HashMap<RoomId, Vec<HistoryRecord>>>,
}

impl InMemoryHistoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl HistoryStore for InMemoryHistoryStore {
    async fn append(&self, message: &ChatMessage) -> Result<(), StoreError> {
        let mut records = self.records.lock().await;
        records
            .entry(message.room_id.clone())
            .or_default()
            .push(HistoryRecord::from(message));
        Ok(())
    }

    async fn list(&self, room_id: &RoomId) -> Result<Vec<HistoryRecord>, StoreError> {
        let records = self.records.lock().await;
        Ok(records.get(room_id).cloned().unwrap_or_default())
    }
}
