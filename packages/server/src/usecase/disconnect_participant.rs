//! UseCase: 参加者切断処理
//!
//! 正常終了・エラー・キャンセルのどの経路でも、接続の登録解除はここを通ります。
//! 呼び出しは [`super::ConnectionGuard`] が一度だけ行います。

use std::sync::Arc;

use crate::domain::{ConnectionRegistry, Participant};

/// 参加者切断のユースケース
pub struct DisconnectParticipantUseCase {
    registry: Arc<dyn ConnectionRegistry>,
}

impl DisconnectParticipantUseCase {
    pub fn new(registry: Arc<dyn ConnectionRegistry>) -> Self {
        Self { registry }
    }

    /// 接続を registry から削除
    ///
    /// # Returns
    ///
    /// 削除した場合は `true`、登録されていなかった場合は `false`（何もしない）
    pub fn execute(&self, participant: &Participant) -> bool {
        let removed = self
            .registry
            .deregister(&participant.room_id, &participant.id);

        if removed {
            tracing::info!(
                "'{}' ({}) left room '{}', {} connection(s) remaining",
                participant.nickname,
                participant.id,
                participant.room_id,
                self.registry.count(&participant.room_id)
            );
        } else {
            tracing::debug!(
                "Connection '{}' was not registered in room '{}'",
                participant.id,
                participant.room_id
            );
        }
        removed
    }
}
