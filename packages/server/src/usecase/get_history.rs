//! UseCase: 履歴取得処理

use std::sync::Arc;

use crate::domain::{HistoryRecord, HistoryStore, RoomId};

use super::error::GetHistoryError;

/// 履歴取得のユースケース
pub struct GetHistoryUseCase {
    history_store: Arc<dyn HistoryStore>,
}

impl GetHistoryUseCase {
    pub fn new(history_store: Arc<dyn HistoryStore>) -> Self {
        Self { history_store }
    }

    /// room の履歴を追記順に取得（履歴がなければ空）
    pub async fn execute(&self, room_id: RoomId) -> Result<Vec<HistoryRecord>, GetHistoryError> {
        self.history_store.list(&room_id).await.map_err(|e| {
            tracing::error!("Failed to load history of room '{}': {}", room_id, e);
            GetHistoryError::StoreUnavailable(e.to_string())
        })
    }
}
