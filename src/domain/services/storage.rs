#[cfg(test)]
#[path = "storage_test.rs"]
mod tests;

use std::path;

use anyhow::Result;
use serde::de::DeserializeOwned;
use serde::Serialize;
use tokio::fs;
use tokio::io::AsyncWriteExt;

use crate::configuration::Config;
use crate::configuration::ConfigKey;

#[derive(Clone, Copy, Eq, PartialEq, strum::Display)]
#[strum(serialize_all = "kebab-case")]
pub enum StorageKey {
    AuthToken,
    ChatHistory,
    Dashboards,
}

/// Durable key-value records, one JSON file per key under the data
/// directory.
pub struct Storage {
    pub data_dir: path::PathBuf,
}

impl Default for Storage {
    fn default() -> Storage {
        let configured = Config::get(ConfigKey::DataDir);
        if !configured.is_empty() {
            return Storage::new(path::PathBuf::from(configured));
        }

        let data_dir = dirs::data_dir().unwrap().join("alfred");
        return Storage::new(data_dir);
    }
}

impl Storage {
    pub fn new(data_dir: path::PathBuf) -> Storage {
        return Storage { data_dir };
    }

    fn record_path(&self, key: StorageKey) -> path::PathBuf {
        return self.data_dir.join(format!("{key}.json"));
    }

    /// Reads a record. A corrupt record is treated as absent: the file is
    /// removed and `None` comes back rather than an error.
    pub async fn read<T: DeserializeOwned>(&self, key: StorageKey) -> Result<Option<T>> {
        let file_path = self.record_path(key);
        if !file_path.exists() {
            return Ok(None);
        }

        let payload = fs::read_to_string(&file_path).await?;
        match serde_json::from_str::<T>(&payload) {
            Ok(record) => return Ok(Some(record)),
            Err(err) => {
                tracing::warn!(key = %key, err = ?err, "Discarding corrupt record");
                fs::remove_file(&file_path).await?;
                return Ok(None);
            }
        }
    }

    pub async fn write<T: Serialize>(&self, key: StorageKey, record: &T) -> Result<()> {
        let payload = serde_json::to_string(record)?;

        if !self.data_dir.exists() {
            fs::create_dir_all(&self.data_dir).await?;
        }

        let mut file = fs::File::create(self.record_path(key)).await?;
        file.write_all(payload.as_bytes()).await?;

        return Ok(());
    }

    pub async fn remove(&self, key: StorageKey) -> Result<()> {
        let file_path = self.record_path(key);
        if !file_path.exists() {
            return Ok(());
        }

        fs::remove_file(file_path).await?;
        return Ok(());
    }
}
