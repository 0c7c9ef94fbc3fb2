//! JSON Lines file archive.
//!
//! Every relayed message is appended as one [`ArchiveEntryDto`] line. The
//! file is opened in append mode, so restarts keep adding to the same
//! archive.

use std::{path::Path, sync::Arc};

use agora_shared::time::{Clock, SystemClock, timestamp_to_rfc3339};
use async_trait::async_trait;
use tokio::{
    fs::{File, OpenOptions},
    io::AsyncWriteExt,
    sync::Mutex,
};

use crate::{
    domain::{ArchiveStore, ChatMessage, StoreError},
    infrastructure::dto::archive::ArchiveEntryDto,
};

/// Append-only JSON Lines archive
pub struct JsonLinesArchive {
    file: Mutex<File>,
    clock: Arc<dyn Clock>,
}

impl JsonLinesArchive {
    /// Open (or create) the archive file at `path`
    pub async fn open(path: impl AsRef<Path>) -> Result<Self, StoreError> {
        Self::open_with_clock(path, Arc::new(SystemClock)).await
    }

    pub async fn open_with_clock(
        path: impl AsRef<Path>,
        clock: Arc<dyn Clock>,
    ) -> Result<Self, StoreError> {
        let file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(path.as_ref())
            .await
            .map_err(|e| {
                StoreError::Unavailable(format!(
                    "cannot open archive '{}': {}",
                    path.as_ref().display(),
                    e
                ))
            })?;

        Ok(Self {
            file: Mutex::new(file),
            clock,
        })
    }
}

#[async_trait]
impl ArchiveStore for JsonLinesArchive {
    async fn append(&self, message: &ChatMessage) -> Result<(), StoreError> {
        let now = self.clock.now_millis();
        let archived_at = timestamp_to_rfc3339(now)
            .ok_or_else(|| StoreError::Unavailable(format!("clock out of range: {}", now)))?;

        let mut line = serde_json::to_string(&ArchiveEntryDto::new(message, archived_at))
            .map_err(|e| StoreError::Unavailable(e.to_string()))?;
        line.push('\n');

        // One write per line under the lock keeps concurrent appends from
        // interleaving.
        let mut file = self.file.lock().await;
        file.write_all(line.as_bytes())
            .await
            .map_err(|e| StoreError::Unavailable(e.to_string()))?;
        file.flush()
            .await
            .map_err(|e| StoreError::Unavailable(e.to_string()))?;
        Ok(())
    }
}
