//! UseCase: 参加者接続処理
//!
//! ## テスト実装の作業記録
//!
//! ### 何をテストしているか
//! - ConnectParticipantUseCase::execute() による registry への登録
//! - 返される ConnectionGuard のライフサイクル（Open → Closing → Closed）
//!
//! ### なぜこのテストが必要か
//! - 登録解除が全ての終了経路でちょうど一度行われることを保証する
//!
//! ### どのような状況を想定しているか
//! - 正常系：close() による明示的な切断
//! - キャンセル：close() を呼ばずに guard が drop される
//! - エッジケース：同じ nickname での複数接続

use std::sync::Arc;

use tokio::sync::mpsc;

use crate::domain::{
    Connection, ConnectionRegistry, Nickname, OUTBOUND_QUEUE_CAPACITY, OutboundReceiver,
    Participant, RoomId,
};

use super::{ConnectionGuard, DisconnectParticipantUseCase};

/// 参加者接続のユースケース
///
/// room のパスワードは再検証しません（リアルタイムチャンネルは
/// join_room の結果を信頼します）。
pub struct ConnectParticipantUseCase {
    registry: Arc<dyn ConnectionRegistry>,
    disconnect_participant_usecase: Arc<DisconnectParticipantUseCase>,
}

impl ConnectParticipantUseCase {
    pub fn new(
        registry: Arc<dyn ConnectionRegistry>,
        disconnect_participant_usecase: Arc<DisconnectParticipantUseCase>,
    ) -> Self {
        Self {
            registry,
            disconnect_participant_usecase,
        }
    }

    /// 接続を registry に登録
    ///
    /// # Returns
    ///
    /// * `ConnectionGuard` - Open 状態の guard。drop または close() で登録解除される
    /// * `OutboundReceiver` - 他の参加者からのフレームを受け取るチャンネル
    pub fn execute(
        &self,
        room_id: RoomId,
        nickname: Nickname,
    ) -> (ConnectionGuard, OutboundReceiver) {
        let (tx, rx) = mpsc::channel(OUTBOUND_QUEUE_CAPACITY);
        let participant = Participant::new(room_id, nickname);
        let mut guard = ConnectionGuard::new(
            participant.clone(),
            self.disconnect_participant_usecase.clone(),
        );

        self.registry.register(Connection::new(participant, tx));
        guard.mark_open();

        let participant = guard.participant();
        tracing::info!(
            "'{}' ({}) joined room '{}', {} connection(s)",
            participant.nickname,
            participant.id,
            participant.room_id,
            self.registry.count(&participant.room_id)
        );

        (guard, rx)
    }
}
