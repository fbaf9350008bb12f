use std::{io::BufReader, path::PathBuf, sync::Arc};

use reqwest::Url;
use reqwest_cookie_store::{CookieStore, CookieStoreMutex};

use crate::error::ApiError;

/// Persisted cookie jar shared by every request to the gateway.
pub struct CookieManager {
    path: PathBuf,
    store: Arc<CookieStoreMutex>,
}

impl CookieManager {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            store: Arc::new(CookieStoreMutex::new(CookieStore::default())),
        }
    }

    /// Loads the jar from `path`. A missing file yields an empty jar.
    pub async fn load(path: impl Into<PathBuf>) -> Result<Self, ApiError> {
        let path = path.into();
        if !path.exists() {
            return Ok(Self::new(path));
        }

        let content = async_fs::read(&path)
            .await
            .map_err(|e| ApiError::Cookie(e.to_string()))?;
        let store = cookie_store::serde::json::load(BufReader::new(content.as_slice()))
            .map_err(|e| ApiError::Cookie(e.to_string()))?;

        Ok(Self {
            path,
            store: Arc::new(CookieStoreMutex::new(store)),
        })
    }

    pub async fn persist(&self) -> Result<(), ApiError> {
        let mut json = Vec::new();
        {
            let store = self
                .store
                .lock()
                .map_err(|e| ApiError::Cookie(e.to_string()))?;
            cookie_store::serde::json::save(&store, &mut json)
                .map_err(|e| ApiError::Cookie(e.to_string()))?;
        }

        if let Some(parent) = self.path.parent() {
            async_fs::create_dir_all(parent)
                .await
                .map_err(|e| ApiError::Cookie(e.to_string()))?;
        }
        async_fs::write(&self.path, json)
            .await
            .map_err(|e| ApiError::Cookie(e.to_string()))
    }

    /// Adds the cookies of a `;;`-joined `Set-Cookie` string, as returned in
    /// the body of a successful QR login check, for `url`.
    pub fn absorb(&self, cookies: &str, url: &Url) -> Result<usize, ApiError> {
        let mut store = self
            .store
            .lock()
            .map_err(|e| ApiError::Cookie(e.to_string()))?;

        let mut inserted = 0;
        for cookie in cookies.split(";;").map(str::trim).filter(|c| !c.is_empty()) {
            if store.parse(cookie, url).is_ok() {
                inserted += 1;
            }
        }
        Ok(inserted)
    }

    pub fn count(&self) -> usize {
        self.store
            .lock()
            .map(|store| store.iter_any().count())
            .unwrap_or(0)
    }

    pub fn store(&self) -> Arc<CookieStoreMutex> {
        Arc::clone(&self.store)
    }

    pub fn path(&self) -> &PathBuf {
        &self.path
    }
}
