use std::{collections::BTreeMap, path::PathBuf};

use serde::{Serialize, de::DeserializeOwned};

use crate::error::StoreError;

/// Disk-backed memoization store keyed by numeric id.
///
/// The whole map is loaded when the cache is opened and written back only
/// when [`Cache::save`] is called. Entries never expire. Not safe for more
/// than one writer.
pub struct Cache<V> {
    path: PathBuf,
    store: BTreeMap<i64, V>,
}

impl<V> Cache<V>
where
    V: Serialize + DeserializeOwned,
{
    /// Opens the cache backed by `path`. A missing file yields an empty cache.
    pub async fn open(path: impl Into<PathBuf>) -> Result<Self, StoreError> {
        let path = path.into();
        if !path.exists() {
            return Ok(Self {
                path,
                store: BTreeMap::new(),
            });
        }

        let content = async_fs::read(&path)
            .await
            .map_err(|e| StoreError::IoError(e))?;
        let store = serde_json::from_slice(&content).map_err(|e| StoreError::SerdeError(e))?;
        Ok(Self { path, store })
    }

    pub fn get(&self, key: i64) -> Option<&V> {
        self.store.get(&key)
    }

    pub fn set(&mut self, key: i64, value: V) {
        self.store.insert(key, value);
    }

    pub fn contains(&self, key: i64) -> bool {
        self.store.contains_key(&key)
    }

    pub fn len(&self) -> usize {
        self.store.len()
    }

    pub fn is_empty(&self) -> bool {
        self.store.is_empty()
    }

    pub fn path(&self) -> &PathBuf {
        &self.path
    }

    pub async fn save(&self) -> Result<(), StoreError> {
        if let Some(parent) = self.path.parent() {
            async_fs::create_dir_all(parent)
                .await
                .map_err(|e| StoreError::IoError(e))?;
        }

        let json = serde_json::to_vec(&self.store).map_err(|e| StoreError::SerdeError(e))?;
        async_fs::write(&self.path, json)
            .await
            .map_err(|e| StoreError::IoError(e))
    }

    /// Drops every entry and removes the backing file.
    pub async fn clear(&mut self) -> Result<(), StoreError> {
        self.store.clear();
        if self.path.exists() {
            async_fs::remove_file(&self.path)
                .await
                .map_err(|e| StoreError::IoError(e))?;
        }
        Ok(())
    }
}
