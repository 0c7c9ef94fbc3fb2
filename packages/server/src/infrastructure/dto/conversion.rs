//! Conversion logic between DTOs and domain entities.

use crate::domain::{MessageContent, Nickname, entity};
use crate::infrastructure::dto::{archive, http, websocket};

// ========================================
// Domain Entity → DTO
// ========================================

impl websocket::ChatMessage {
    pub fn new(nickname: &Nickname, content: &MessageContent) -> Self {
        Self {
            nickname: nickname.as_str().to_string(),
            content: content.as_str().to_string(),
        }
    }
}

impl From<entity::HistoryRecord> for http::HistoryRecordDto {
    fn from(model: entity::HistoryRecord) -> Self {
        Self {
            nickname: model.nickname,
            content: model.content,
        }
    }
}

impl archive::ArchiveEntryDto {
    pub fn new(message: &entity::ChatMessage, archived_at: String) -> Self {
        Self {
            room_id: message.room_id.as_str().to_string(),
            nickname: message.nickname.as_str().to_string(),
            content: message.content.as_str().to_string(),
            archived_at,
        }
    }
}
