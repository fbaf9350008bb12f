//! Data endpoints of the gateway.
//!
//! Thin wrappers that map each [`MusicApi`] method onto its form body. Paging
//! decisions belong to the collectors.

use serde_json::Value;

use crate::error::ApiError;

use super::{ApiClient, MusicApi};

impl MusicApi for ApiClient {
    async fn top_playlists(
        &self,
        category: &str,
        offset: u64,
        limit: u64,
    ) -> Result<Value, ApiError> {
        self.post(
            "/top/playlist",
            &[
                ("cat", category.to_string()),
                ("offset", offset.to_string()),
                ("limit", limit.to_string()),
                ("total", "true".to_string()),
                ("order", "hot".to_string()),
            ],
        )
        .await
    }

    async fn playlist_tracks(
        &self,
        playlist_id: i64,
        offset: u64,
        limit: u64,
    ) -> Result<Value, ApiError> {
        self.post(
            "/playlist/track/all",
            &[
                ("id", playlist_id.to_string()),
                ("offset", offset.to_string()),
                ("limit", limit.to_string()),
            ],
        )
        .await
    }

    async fn artist_detail(&self, artist_id: i64) -> Result<Value, ApiError> {
        self.post("/ugc/artist/get", &[("id", artist_id.to_string())])
            .await
    }

    async fn artist_misc(&self, artist_id: i64) -> Result<Value, ApiError> {
        self.post("/artists", &[("id", artist_id.to_string())]).await
    }

    async fn artist_albums(
        &self,
        artist_id: i64,
        offset: u64,
        limit: u64,
    ) -> Result<Value, ApiError> {
        self.post(
            "/artist/album",
            &[
                ("id", artist_id.to_string()),
                ("offset", offset.to_string()),
                ("limit", limit.to_string()),
            ],
        )
        .await
    }

    async fn album_sales(&self, album_ids: &[i64]) -> Result<Value, ApiError> {
        let ids = album_ids
            .iter()
            .map(|id| id.to_string())
            .collect::<Vec<_>>()
            .join(",");

        self.post("/digitalAlbum/sales", &[("ids", ids)]).await
    }
}
