use std::{future::Future, path::Path};

use serde::{Serialize, de::DeserializeOwned};

use crate::{Res, error::StoreError};

/// Returns the stage result stored at `path`, or computes and stores it.
///
/// `producer` is a future that has not been polled yet. When the snapshot
/// file exists it is decoded and returned, and the producer is dropped
/// without ever running. Otherwise the producer is awaited and its result is
/// written to `path` before being returned. A failing producer writes nothing.
pub async fn load_or_compute<T, F>(path: &Path, producer: F) -> Res<T>
where
    T: Serialize + DeserializeOwned,
    F: Future<Output = Res<T>>,
{
    if path.exists() {
        return Ok(load(path).await?);
    }

    let result = producer.await?;
    store(path, &result).await?;
    Ok(result)
}

pub async fn load<T: DeserializeOwned>(path: &Path) -> Result<T, StoreError> {
    let content = async_fs::read(path)
        .await
        .map_err(|e| StoreError::IoError(e))?;
    serde_json::from_slice(&content).map_err(|e| StoreError::SerdeError(e))
}

pub async fn store<T: Serialize>(path: &Path, value: &T) -> Result<(), StoreError> {
    if let Some(parent) = path.parent() {
        async_fs::create_dir_all(parent)
            .await
            .map_err(|e| StoreError::IoError(e))?;
    }

    let json = serde_json::to_vec(value).map_err(|e| StoreError::SerdeError(e))?;
    async_fs::write(path, json)
        .await
        .map_err(|e| StoreError::IoError(e))
}

/// Removes the snapshot at `path`. Returns `false` if there was none.
pub async fn remove(path: &Path) -> Result<bool, StoreError> {
    if !path.exists() {
        return Ok(false);
    }

    async_fs::remove_file(path)
        .await
        .map_err(|e| StoreError::IoError(e))?;
    Ok(true)
}
