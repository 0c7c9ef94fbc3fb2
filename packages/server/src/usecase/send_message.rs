//! UseCase: メッセージ送信処理
//!
//! ## テスト実装の作業記録
//!
//! ### 何をテストしているか
//! - SendMessageUseCase::execute() メソッド
//! - 履歴・アーカイブへの書き込みと、送信者以外へのブロードキャスト
//!
//! ### なぜこのテストが必要か
//! - 送信者自身にはメッセージが戻らないことを保証
//! - 1 つの接続の失敗が他の受信者への配信を止めないことを保証
//! - 履歴・アーカイブの障害がブロードキャストを止めないことを保証
//!
//! ### どのような状況を想定しているか
//! - 正常系：3 人の部屋で 1 人が送信
//! - 異常系：HistoryStore / ArchiveStore の障害、切断済みの受信者
//! - エッジケース：送信者のみが接続している場合（ブロードキャスト対象なし）

use std::sync::Arc;

use crate::domain::{
    ArchiveStore, ChatMessage, ConnectionRegistry, HistoryStore, MessageContent, Participant,
    PushError,
};

/// Outcome of one broadcast.
///
/// `archived` is `None` when no archive is configured.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BroadcastReport {
    pub persisted: bool,
    pub archived: Option<bool>,
    pub delivered: usize,
    pub failed: usize,
}

/// メッセージ送信のユースケース
pub struct SendMessageUseCase {
    history_store: Arc<dyn HistoryStore>,
    archive_store: Option<Arc<dyn ArchiveStore>>,
    registry: Arc<dyn ConnectionRegistry>,
}

impl SendMessageUseCase {
    pub fn new(
        history_store: Arc<dyn HistoryStore>,
        archive_store: Option<Arc<dyn ArchiveStore>>,
        registry: Arc<dyn ConnectionRegistry>,
    ) -> Self {
        Self {
            history_store,
            archive_store,
            registry,
        }
    }

    /// メッセージ送信を実行
    ///
    /// # Arguments
    ///
    /// * `sender` - 送信者（Domain Model）
    /// * `content` - メッセージ内容（Domain Model）
    /// * `payload` - 送信する JSON フレーム（DTO 層で生成されたもの）
    ///
    /// # Returns
    ///
    /// 配信結果。永続化やアーカイブの失敗はエラーにせず、report に記録するのみ
    pub async fn execute(
        &self,
        sender: &Participant,
        content: MessageContent,
        payload: String,
    ) -> BroadcastReport {
        let message = ChatMessage::new(
            sender.room_id.clone(),
            sender.nickname.clone(),
            content,
        );

        // 1. 履歴とアーカイブへの書き込み（互いに独立）
        let (persisted, archived) = tokio::join!(
            self.persist(&message),
            self.archive(&message)
        );

        // 2. 送信者以外の全ての接続へ配信
        let (delivered, failed) = self.fan_out(sender, payload);

        tracing::debug!(
            "Broadcast from '{}' in room '{}': delivered={}, failed={}",
            sender.nickname,
            sender.room_id,
            delivered,
            failed
        );

        BroadcastReport {
            persisted,
            archived,
            delivered,
            failed,
        }
    }

    async fn persist(&self, message: &ChatMessage) -> bool {
        match self.history_store.append(message).await {
            Ok(()) => true,
            Err(e) => {
                tracing::warn!(
                    "Failed to persist message in room '{}': {}",
                    message.room_id,
                    e
                );
                false
            }
        }
    }

    async fn archive(&self, message: &ChatMessage) -> Option<bool> {
        let archive_store = self.archive_store.as_ref()?;
        match archive_store.append(message).await {
            Ok(()) => Some(true),
            Err(e) => {
                tracing::warn!(
                    "Failed to archive message in room '{}': {}",
                    message.room_id,
                    e
                );
                Some(false)
            }
        }
    }

    /// Sends `payload` to every connection of the sender's room except the
    /// sender itself. Sends happen on a snapshot, outside the registry lock.
    ///
    /// A connection whose queue is full is deregistered. Once the last
    /// sender handle is gone its pump drains what is queued and the
    /// connection closes.
    fn fan_out(&self, sender: &Participant, payload: String) -> (usize, usize) {
        let mut delivered = 0;
        let mut failed = 0;

        for connection in self.registry.snapshot(&sender.room_id) {
            if connection.id() == sender.id {
                continue;
            }
            match connection.send(payload.clone()) {
                Ok(()) => delivered += 1,
                Err(PushError::QueueFull(_)) => {
                    tracing::warn!(
                        "'{}' ({}) is not reading, evicting from room '{}'",
                        connection.nickname(),
                        connection.id(),
                        connection.room_id()
                    );
                    self.registry
                        .deregister(connection.room_id(), &connection.id());
                    failed += 1;
                }
                Err(e) => {
                    tracing::warn!(
                        "Failed to deliver to '{}' ({}): {}",
                        connection.nickname(),
                        connection.id(),
                        e
                    );
                    failed += 1;
                }
            }
        }

        (delivered, failed)
    }
}
