//! Archive line DTO.

use serde::{Deserialize, Serialize};

/// One JSON line in the message archive
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ArchiveEntryDto {
    pub room_id: String,
    pub nickname: String,
    pub content: String,
    /// RFC 3339, UTC
    pub archived_at: String,
}
