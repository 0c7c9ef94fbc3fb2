//! WebSocket frame DTOs.
//!
//! Inbound frames are raw text and have no DTO.

use serde::{Deserialize, Serialize};

/// Outbound chat frame: `{"nickname": "...", "content": "..."}`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatMessage {
    pub nickname: String,
    pub content: String,
}
