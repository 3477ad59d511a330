#[cfg(test)]
#[path = "history_test.rs"]
mod tests;

use anyhow::Result;

use super::Storage;
use super::StorageKey;
use crate::domain::models::Message;

/// The persisted conversation. Loaded once at startup, written through on
/// every change, wiped wholesale on request.
pub struct HistoryStore {
    storage: Storage,
}

impl HistoryStore {
    pub fn new(storage: Storage) -> HistoryStore {
        return HistoryStore { storage };
    }

    pub async fn load(&self) -> Result<Vec<Message>> {
        let messages = self.storage.read(StorageKey::ChatHistory).await?;
        return Ok(messages.unwrap_or_default());
    }

    pub async fn save(&self, messages: &[Message]) -> Result<()> {
        return self.storage.write(StorageKey::ChatHistory, &messages).await;
    }

    pub async fn clear(&self) -> Result<()> {
        return self.storage.remove(StorageKey::ChatHistory).await;
    }
}
