//! InMemory RoomStore 実装
//!
//! HashMap をインメモリ DB として使用します。プロセス終了で内容は失われます。

use std::collections::{HashMap, hash_map::Entry};

use async_trait::async_trait;
use tokio::sync::Mutex;

use crate::domain::{RoomId, RoomPassword, RoomStore, StoreError};

/// インメモリ RoomStore 実装
#[derive(Default)]
pub struct InMemoryRoomStore {
    rooms: Mutex<HashMap<RoomId, RoomPassword>>,
}

impl InMemoryRoomStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl RoomStore for InMemoryRoomStore {
    async fn put(&self, room_id: &RoomId, password: &RoomPassword) -> Result<(), StoreError> {
        let mut rooms = self.rooms.lock().await;
        match rooms.entry(room_id.clone()) {
            Entry::Occupied(_) => Err(StoreError::AlreadyExists(room_id.as_str().to_string())),
            Entry::Vacant(slot) => {
                slot.insert(password.clone());
                Ok(())
            }
        }
    }

    async fn get(&self, room_id: &RoomId) -> Result<RoomPassword, StoreError> {
        let rooms = self.rooms.lock().await;
        rooms
            .get(room_id)
            .cloned()
            .ok_or_else(|| StoreError::NotFound(room_id.as_str().to_string()))
    }
}
