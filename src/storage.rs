use std::collections::{BTreeMap, HashMap};
use std::path::{Path, PathBuf};
use log::{debug, warn};
use crate::error::WanderlustError;

/// String key-value storage, the same shape as browser local storage.
pub trait Storage {
    async fn get(&self, key: &str) -> Result<Option<String>, WanderlustError>;
    async fn set(&mut self, key: &str, value: String) -> Result<(), WanderlustError>;
}

/// Keeps every key in a single JSON object on disk. The whole file is replaced on each `set`.
pub struct FileStorage {
    db_path: PathBuf,
}

impl FileStorage {
    pub fn new(db_path: PathBuf) -> anyhow::Result<Self> {
        if !db_path.exists() {
            std::fs::write(&db_path, "{}")?;
        }
        if !db_path.is_file() {
            anyhow::bail!("db_path is not a file");
        }
        Ok(Self { db_path })
    }

    pub fn path(&self) -> &Path {
        &self.db_path
    }

    async fn read_map(&self) -> Result<BTreeMap<String, String>, WanderlustError> {
        let file_str = tokio::fs::read_to_string(&self.db_path).await
            .map_err(WanderlustError::StorageIOError)?;
        if file_str.trim().is_empty() {
            return Ok(BTreeMap::new());
        }
        serde_json::from_str(&file_str).map_err(WanderlustError::StorageSerializationError)
    }
}

impl Storage for FileStorage {
    async fn get(&self, key: &str) -> Result<Option<String>, WanderlustError> {
        let map = self.read_map().await?;
        Ok(map.get(key).cloned())
    }

    async fn set(&mut self, key: &str, value: String) -> Result<(), WanderlustError> {
        let mut map = match self.read_map().await {
            Ok(map) => map,
            Err(WanderlustError::StorageSerializationError(e)) => {
                warn!("Overwriting unreadable storage file {}: {}", self.db_path.display(), e);
                BTreeMap::new()
            }
            Err(e) => return Err(e),
        };
        map.insert(key.to_string(), value);
        let serialized_map = serde_json::to_string_pretty(&map)
            .map_err(WanderlustError::StorageSerializationError)?;
        // a failed write leaves the previous file intact
        let tmp_path = self.db_path.with_extension("json.tmp");
        tokio::fs::write(&tmp_path, serialized_map).await
            .map_err(WanderlustError::StorageIOError)?;
        tokio::fs::rename(&tmp_path, &self.db_path).await
            .map_err(WanderlustError::StorageIOError)?;
        debug!("Stored key {} in {}", key, self.db_path.display());
        Ok(())
    }
}

#[derive(Debug, Default, Clone)]
pub struct InMemoryStorage {
    values: HashMap<String, String>,
}

impl Storage for InMemoryStorage {
    async fn get(&self, key: &str) -> Result<Option<String>, WanderlustError> {
        Ok(self.values.get(key).cloned())
    }

    async fn set(&mut self, key: &str, value: String) -> Result<(), WanderlustError> {
        self.values.insert(key.to_string(), value);
        Ok(())
    }
}
