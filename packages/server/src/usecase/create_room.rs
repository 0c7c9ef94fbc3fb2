//! UseCase: ルーム作成処理

use std::sync::Arc;

use crate::domain::{RoomId, RoomPassword, RoomStore, StoreError};

use super::error::CreateRoomError;

/// ルーム作成のユースケース
pub struct CreateRoomUseCase {
    /// RoomStore（room_id → password の永続化）
    room_store: Arc<dyn RoomStore>,
}

impl CreateRoomUseCase {
    pub fn new(room_store: Arc<dyn RoomStore>) -> Self {
        Self { room_store }
    }

    /// ルームを作成
    ///
    /// # Returns
    ///
    /// * `Ok(())` - 作成成功
    /// * `Err(CreateRoomError::AlreadyExists)` - 同じ room_id が既に存在する
    /// * `Err(CreateRoomError::StoreUnavailable)` - RoomStore の障害
    pub async fn execute(
        &self,
        room_id: RoomId,
        password: RoomPassword,
    ) -> Result<(), CreateRoomError> {
        match self.room_store.put(&room_id, &password).await {
            Ok(()) => {
                tracing::info!("Room '{}' created", room_id);
                Ok(())
            }
            Err(StoreError::AlreadyExists(id)) => {
                tracing::info!("Room '{}' already exists", id);
                Err(CreateRoomError::AlreadyExists(id))
            }
            Err(e) => {
                tracing::error!("Failed to create room '{}': {}", room_id, e);
                Err(CreateRoomError::StoreUnavailable(e.to_string()))
            }
        }
    }
}
