use std::collections::BTreeMap;
use std::path::PathBuf;

use tokio::fs;
use tokio::io::AsyncWriteExt;
use tokio::sync::Mutex;

#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("storage io failure: {0}")]
    Io(#[from] std::io::Error),
    #[error("storage content corrupt: {0}")]
    Corrupt(#[from] serde_json::Error),
}

/// Persistent string key-value store backed by a single JSON file.
///
/// Writes go through a temp file, are fsynced, then renamed into place, so a
/// completed call is a confirmed durable write and callers can read their own
/// writes back immediately. Access is serialized behind an async mutex; each
/// operation re-reads the file (no in-memory cache).
pub struct FileKvStore {
    path: PathBuf,
    lock: Mutex<()>,
}

impl FileKvStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            lock: Mutex::new(()),
        }
    }

    pub async fn get(&self, key: &str) -> Result<Option<String>, StoreError> {
        let _guard = self.lock.lock().await;
        Ok(self.read_map().await?.get(key).cloned())
    }

    pub async fn set(&self, key: &str, value: &str) -> Result<(), StoreError> {
        let _guard = self.lock.lock().await;
        let mut map = self.read_map().await?;
        map.insert(key.to_string(), value.to_string());
        self.write_map(&map).await
    }

    pub async fn remove(&self, key: &str) -> Result<(), StoreError> {
        let _guard = self.lock.lock().await;
        let mut map = self.read_map().await?;
        if map.remove(key).is_some() {
            self.write_map(&map).await?;
        }
        Ok(())
    }

    async fn read_map(&self) -> Result<BTreeMap<String, String>, StoreError> {
        match fs::read(&self.path).await {
            Ok(bytes) => Ok(serde_json::from_slice(&bytes)?),
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => Ok(BTreeMap::new()),
            Err(err) => Err(err.into()),
        }
    }

    async fn write_map(&self, map: &BTreeMap<String, String>) -> Result<(), StoreError> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent).await?;
            }
        }
        let tmp = self.path.with_extension("tmp");
        let mut file = fs::File::create(&tmp).await?;
        file.write_all(&serde_json::to_vec_pretty(map)?).await?;
        file.sync_all().await?;
        fs::rename(&tmp, &self.path).await?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn store(dir: &TempDir) -> FileKvStore {
        FileKvStore::new(dir.path().join("store.json"))
    }

    #[tokio::test]
    async fn test_missing_file_reads_as_empty() {
        let dir = TempDir::new().unwrap();
        assert_eq!(store(&dir).get("anything").await.unwrap(), None);
    }

    #[tokio::test]
    async fn test_set_get_remove_round_trip() {
        let dir = TempDir::new().unwrap();
        let kv = store(&dir);

        kv.set("userToken", "token_abc_123").await.unwrap();
        assert_eq!(
            kv.get("userToken").await.unwrap().as_deref(),
            Some("token_abc_123")
        );

        kv.remove("userToken").await.unwrap();
        assert_eq!(kv.get("userToken").await.unwrap(), None);
    }

    #[tokio::test]
    async fn test_values_survive_a_new_handle() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("store.json");

        FileKvStore::new(&path).set("@users", "[]").await.unwrap();
        let reopened = FileKvStore::new(&path);
        assert_eq!(reopened.get("@users").await.unwrap().as_deref(), Some("[]"));
    }

    #[tokio::test]
    async fn test_removing_absent_key_is_a_no_op() {
        let dir = TempDir::new().unwrap();
        let kv = store(&dir);
        kv.remove("nothing-here").await.unwrap();
        assert_eq!(kv.get("nothing-here").await.unwrap(), None);
    }
}
