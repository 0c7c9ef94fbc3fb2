//! HTTP API DTOs.

use serde::{Deserialize, Serialize};

/// Body of `POST /create_room` and `POST /join_room`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RoomCredentialsDto {
    pub room_id: String,
    pub password: String,
}

/// Success body: `{"message": "..."}`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MessageResponseDto {
    pub message: String,
}

/// Error body: `{"detail": "..."}`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorResponseDto {
    pub detail: String,
}

/// One element of `GET /history/{room_id}`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HistoryRecordDto {
    pub nickname: String,
    pub content: String,
}
