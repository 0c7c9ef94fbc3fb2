//! Store interfaces.
//!
//! The relay persists through three narrow collaborators. Implementations
//! provide their own internal synchronization; callers never hold a
//! transaction across two stores.

use async_trait::async_trait;

use super::{
    entity::{ChatMessage, HistoryRecord},
    error::StoreError,
    value_object::{RoomId, RoomPassword},
};

/// room_id → password key-value store
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait RoomStore: Send + Sync {
    /// Insert a room. Fails with [`StoreError::AlreadyExists`] if the id is
    /// taken.
    async fn put(&self, room_id: &RoomId, password: &RoomPassword) -> Result<(), StoreError>;

    /// Look up a room's password. Fails with [`StoreError::NotFound`].
    async fn get(&self, room_id: &RoomId) -> Result<RoomPassword, StoreError>;
}

/// Append-only message log, ordered by insertion per room
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait HistoryStore: Send + Sync {
    async fn append(&self, message: &ChatMessage) -> Result<(), StoreError>;

    /// All records of a room in append order; empty if none.
    async fn list(&self, room_id: &RoomId) -> Result<Vec<HistoryRecord>, StoreError>;
}

/// Long-term external copy of every message. Best-effort only.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ArchiveStore: Send + Sync {
    async fn append(&self, message: &ChatMessage) -> Result<(), StoreError>;
}
