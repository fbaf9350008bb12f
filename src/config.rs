//! Configuration management for the NetEase Cloud Music scraper.
//!
//! This module handles loading and accessing configuration values from environment
//! variables and `.env` files, and resolves every file the application reads or
//! writes below the data directory.
//!
//! The configuration system follows a hierarchical approach:
//! 1. Environment variables (highest priority)
//! 2. `.env` file in the local data directory
//! 3. Application defaults

use dotenv;
use std::{env, path::PathBuf};

use crate::types::Stage;

/// Base URL of the API gateway used when `NCM_API_URL` is not set.
pub const DEFAULT_API_URL: &str = "http://localhost:3000";

/// Playlist categories collected when `NCM_CATEGORIES` is not set.
pub const DEFAULT_CATEGORIES: [&str; 5] = ["摇滚", "朋克", "民谣", "说唱", "电子"];

/// Page sizes used by the collectors.
pub const PLAYLIST_PAGE_SIZE: u64 = 100;
pub const TRACK_PAGE_SIZE: u64 = 500;
pub const ALBUM_PAGE_SIZE: u64 = 100;

/// Interval between two QR login status checks, in seconds.
pub const LOGIN_POLL_SECS: u64 = 4;

/// Loads environment variables from a `.env` file in the data directory.
///
/// Creates the data directory if it doesn't exist and loads environment
/// variables from `<data dir>/.env` when the file is present. A missing file
/// is not an error; every setting has a default.
///
/// # Directory Structure
///
/// Unless `NCM_DATA_DIR` is set, the function looks for the `.env` file in:
/// - Linux: `~/.local/share/ncmscrape/.env`
/// - macOS: `~/Library/Application Support/ncmscrape/.env`
/// - Windows: `%LOCALAPPDATA%/ncmscrape/.env`
///
/// # Errors
///
/// This function will return an error if:
/// - The data directory cannot be created
/// - The `.env` file exists but cannot be read or parsed
pub async fn load_env() -> Result<(), String> {
    let root = data_dir();
    async_fs::create_dir_all(&root)
        .await
        .map_err(|e| e.to_string())?;

    let path = root.join(".env");
    if path.is_file() {
        dotenv::from_path(&path).map_err(|e| e.to_string())?;
    }
    Ok(())
}

/// Returns the base URL of the local API gateway.
///
/// Reads `NCM_API_URL`, falling back to [`DEFAULT_API_URL`]. A trailing slash
/// is removed so endpoint paths can be appended directly.
///
/// # Example
///
/// ```
/// let url = api_url(); // e.g., "http://localhost:3000"
/// ```
pub fn api_url() -> String {
    env::var("NCM_API_URL")
        .ok()
        .filter(|v| !v.trim().is_empty())
        .map(|v| v.trim().trim_end_matches('/').to_string())
        .unwrap_or_else(|| DEFAULT_API_URL.to_string())
}

/// Returns the root directory for cookies, caches, snapshots and exports.
///
/// Reads `NCM_DATA_DIR`, falling back to `ncmscrape/` below the platform's
/// local data directory.
pub fn data_dir() -> PathBuf {
    match env::var("NCM_DATA_DIR") {
        Ok(dir) if !dir.trim().is_empty() => PathBuf::from(dir.trim()),
        _ => {
            let mut path = dirs::data_local_dir().unwrap_or_else(|| PathBuf::from("."));
            path.push("ncmscrape");
            path
        }
    }
}

/// Returns the playlist categories to collect.
///
/// Reads the comma separated `NCM_CATEGORIES`, falling back to
/// [`DEFAULT_CATEGORIES`].
pub fn categories() -> Vec<String> {
    env::var("NCM_CATEGORIES")
        .ok()
        .map(|v| split_list(&v))
        .filter(|c| !c.is_empty())
        .unwrap_or_else(|| DEFAULT_CATEGORIES.iter().map(|c| c.to_string()).collect())
}

/// Returns the artist ids seeding the discography pipeline.
///
/// Reads the comma separated `NCM_ARTIST_IDS`. Entries that are not integers
/// are ignored.
pub fn seed_artist_ids() -> Vec<i64> {
    env::var("NCM_ARTIST_IDS")
        .map(|v| {
            split_list(&v)
                .iter()
                .filter_map(|id| id.parse().ok())
                .collect()
        })
        .unwrap_or_default()
}

fn split_list(value: &str) -> Vec<String> {
    value
        .split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(String::from)
        .collect()
}

/// File layout below the data directory.
#[derive(Debug, Clone)]
pub struct DataPaths {
    root: PathBuf,
}

impl DataPaths {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn from_env() -> Self {
        Self::new(data_dir())
    }

    pub fn root(&self) -> &PathBuf {
        &self.root
    }

    pub fn cookie_file(&self) -> PathBuf {
        self.root.join("cookies.json")
    }

    pub fn tracks_cache(&self) -> PathBuf {
        self.root.join("cache/tracks.json")
    }

    pub fn artists_cache(&self) -> PathBuf {
        self.root.join("cache/artists.json")
    }

    pub fn snapshot(&self, stage: Stage) -> PathBuf {
        self.root
            .join(format!("snapshots/{stage}.json", stage = stage.name()))
    }

    pub fn export(&self, stage: Stage) -> PathBuf {
        self.root
            .join(format!("exports/{stage}.parquet", stage = stage.name()))
    }

    pub fn qr_image(&self) -> PathBuf {
        self.root.join("qr.png")
    }
}
