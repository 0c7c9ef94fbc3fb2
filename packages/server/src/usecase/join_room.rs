//! UseCase: ルーム参加（パスワード検証）処理
//!
//! 参加の可否を判定するだけで、接続の登録は行いません。
//! 接続の登録はリアルタイムチャンネルを開いた時に行われます。

use std::sync::Arc;

use crate::domain::{RoomId, RoomPassword, RoomStore, StoreError};

use super::error::JoinRoomError;

/// ルーム参加のユースケース
pub struct JoinRoomUseCase {
    room_store: Arc<dyn RoomStore>,
}

impl JoinRoomUseCase {
    pub fn new(room_store: Arc<dyn RoomStore>) -> Self {
        Self { room_store }
    }

    /// room_id とパスワードを検証
    ///
    /// # Returns
    ///
    /// * `Ok(())` - room が存在し、パスワードが完全一致
    /// * `Err(JoinRoomError::Unauthorized)` - room が存在しない、またはパスワード不一致
    /// * `Err(JoinRoomError::StoreUnavailable)` - RoomStore の障害
    pub async fn execute(
        &self,
        room_id: RoomId,
        password: RoomPassword,
    ) -> Result<(), JoinRoomError> {
        match self.room_store.get(&room_id).await {
            Ok(stored) if stored.matches(&password) => {
                tracing::info!("Join to room '{}' accepted", room_id);
                Ok(())
            }
            Ok(_) | Err(StoreError::NotFound(_)) => {
                tracing::info!("Join to room '{}' rejected", room_id);
                Err(JoinRoomError::Unauthorized)
            }
            Err(e) => {
                tracing::error!("Failed to look up room '{}': {}", room_id, e);
                Err(JoinRoomError::StoreUnavailable(e.to_string()))
            }
        }
    }
}
