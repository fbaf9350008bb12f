#![allow(dead_code)]

use std::{
    collections::{HashMap, VecDeque},
    sync::Mutex,
};

use ncmscrape::{
    error::ApiError,
    netease::{LoginApi, MusicApi, parse_qr_check},
    types::{QrCheck, QrCode},
};
use serde_json::{Value, json};

/// Canned gateway. Paged endpoints answer with the page at `offset / limit`
/// and with `{}` once the pages run out.
#[derive(Default)]
pub struct MockApi {
    pub playlists: HashMap<String, Vec<Value>>,
    pub tracks: HashMap<i64, Vec<Value>>,
    pub artists: HashMap<i64, Value>,
    pub misc: HashMap<i64, Value>,
    pub albums: HashMap<i64, Vec<Value>>,
    pub sales: HashMap<Vec<i64>, Value>,
    calls: Mutex<Vec<String>>,
}

impl MockApi {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn calls(&self) -> Vec<String> {
        self.calls.lock().unwrap().clone()
    }

    pub fn calls_to(&self, endpoint: &str) -> usize {
        self.calls
            .lock()
            .unwrap()
            .iter()
            .filter(|c| c.split(':').next() == Some(endpoint))
            .count()
    }

    fn record(&self, call: String) {
        self.calls.lock().unwrap().push(call);
    }
}

fn page(pages: Option<&Vec<Value>>, offset: u64, limit: u64) -> Value {
    pages
        .and_then(|p| p.get((offset / limit) as usize))
        .cloned()
        .unwrap_or_else(|| json!({}))
}

impl MusicApi for MockApi {
    async fn top_playlists(
        &self,
        category: &str,
        offset: u64,
        limit: u64,
    ) -> Result<Value, ApiError> {
        self.record(format!("top_playlists:{}:{}", category, offset));
        Ok(page(self.playlists.get(category), offset, limit))
    }

    async fn playlist_tracks(
        &self,
        playlist_id: i64,
        offset: u64,
        limit: u64,
    ) -> Result<Value, ApiError> {
        self.record(format!("playlist_tracks:{}:{}", playlist_id, offset));
        Ok(page(self.tracks.get(&playlist_id), offset, limit))
    }

    async fn artist_detail(&self, artist_id: i64) -> Result<Value, ApiError> {
        self.record(format!("artist_detail:{}", artist_id));
        Ok(self
            .artists
            .get(&artist_id)
            .cloned()
            .unwrap_or_else(|| json!({ "code": 404, "message": "not found" })))
    }

    async fn artist_misc(&self, artist_id: i64) -> Result<Value, ApiError> {
        self.record(format!("artist_misc:{}", artist_id));
        Ok(self
            .misc
            .get(&artist_id)
            .cloned()
            .unwrap_or_else(|| json!({ "code": 404 })))
    }

    async fn artist_albums(
        &self,
        artist_id: i64,
        offset: u64,
        limit: u64,
    ) -> Result<Value, ApiError> {
        self.record(format!("artist_albums:{}:{}", artist_id, offset));
        Ok(page(self.albums.get(&artist_id), offset, limit))
    }

    async fn album_sales(&self, album_ids: &[i64]) -> Result<Value, ApiError> {
        let ids: Vec<String> = album_ids.iter().map(|id| id.to_string()).collect();
        self.record(format!("album_sales:{}", ids.join(",")));
        Ok(self
            .sales
            .get(album_ids)
            .cloned()
            .unwrap_or_else(|| json!({ "code": 200, "data": [] })))
    }
}

/// Playlist page holding the ids `first..first + count`.
pub fn playlist_page(first: i64, count: i64, more: bool, total: Option<i64>) -> Value {
    let playlists: Vec<Value> = (first..first + count)
        .map(|id| {
            json!({
                "id": id,
                "name": format!("playlist {}", id),
                "playCount": id * 10,
                "shareCount": 1,
                "trackCount": 3,
                "commentCount": 2,
                "subscribedCount": 5,
            })
        })
        .collect();

    let mut page = json!({ "code": 200, "more": more, "playlists": playlists });
    if let Some(total) = total {
        page["total"] = json!(total);
    }
    page
}

/// Track page; every song is `(track id, artist ids)`.
pub fn track_page(songs: &[(i64, Vec<i64>)]) -> Value {
    let songs: Vec<Value> = songs
        .iter()
        .map(|(id, artists)| {
            let ar: Vec<Value> = artists.iter().map(|a| json!({ "id": a })).collect();
            json!({ "id": id, "name": format!("track {}", id), "ar": ar })
        })
        .collect();
    json!({ "code": 200, "songs": songs })
}

pub fn artist_detail(name: &str) -> Value {
    json!({
        "code": 200,
        "data": {
            "artistName": name,
            "area": "CN",
            "type": 1,
            "alias": ["alias"],
            "production": null,
            "desc": "a description",
        }
    })
}

pub fn artist_misc(id: i64, name: &str, albums: i64) -> Value {
    json!({
        "code": 200,
        "artist": {
            "id": id,
            "name": name,
            "musicSize": 40,
            "albumSize": albums,
            "mvSize": 3,
        }
    })
}

pub fn album_page(first: i64, count: i64, more: bool) -> Value {
    let albums: Vec<Value> = (first..first + count)
        .map(|id| json!({ "id": id, "name": format!("album {}", id) }))
        .collect();
    json!({ "code": 200, "more": more, "hotAlbums": albums })
}

/// Login gateway answering `/login/qr/check` with the queued codes.
pub struct MockLogin {
    codes: Mutex<VecDeque<i64>>,
    pub fail_qr: bool,
    checks: Mutex<u32>,
}

impl MockLogin {
    pub fn new(codes: &[i64]) -> Self {
        Self {
            codes: Mutex::new(codes.iter().copied().collect()),
            fail_qr: false,
            checks: Mutex::new(0),
        }
    }

    pub fn checks(&self) -> u32 {
        *self.checks.lock().unwrap()
    }
}

impl LoginApi for MockLogin {
    async fn qr_image_url(&self) -> Result<QrCode, ApiError> {
        if self.fail_qr {
            return Err(ApiError::Remote {
                code: 502,
                message: "Failed to obtain QR key".to_string(),
            });
        }

        Ok(QrCode {
            key: "unikey-1".to_string(),
            image: "data:image/png;base64,iVBORw0KGgo=".to_string(),
        })
    }

    async fn qr_login_status(&self, _key: &str) -> Result<QrCheck, ApiError> {
        *self.checks.lock().unwrap() += 1;
        let code = self
            .codes
            .lock()
            .unwrap()
            .pop_front()
            .ok_or(ApiError::MissingField("code"))?;

        let response = if code == 803 {
            json!({ "code": code, "message": "授权登陆成功", "cookie": "MUSIC_U=abc; Path=/" })
        } else {
            json!({ "code": code, "message": "waiting", "cookie": "" })
        };
        parse_qr_check(&response)
    }
}
