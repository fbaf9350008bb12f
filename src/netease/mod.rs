//! # NetEase Cloud Music Integration Module
//!
//! This module is the integration layer between the scraper and a local
//! NetEase Cloud Music API gateway (the Node.js `NeteaseCloudMusicApi`
//! server, listening on `http://localhost:3000` by default).
//!
//! ## Architecture
//!
//! ```text
//! Application Layer (CLI, Pipeline, Login)
//!          ↓
//! MusicApi / LoginApi traits
//!          ↓
//! ApiClient
//!     ├── Login (QR key, QR image, QR status)
//!     └── Catalog (playlists, tracks, artists, albums, sales)
//!          ↓
//! HTTP Layer (reqwest, form bodies, shared cookie jar)
//!          ↓
//! API gateway
//! ```
//!
//! ## Request Model
//!
//! Every endpoint is a one-shot `POST` with a form-encoded body. A fresh
//! `reqwest::Client` is built per request and wired to the shared cookie
//! store, so cookies set by the login flow are sent with every later request.
//! Responses are decoded as JSON and handed back untouched: no retries, no
//! timeouts and no schema validation happen here.
//!
//! ## Error Handling
//!
//! Only the login flow inspects the `code` field and turns a non-success code
//! into [`ApiError::Remote`]. Data endpoints return remote errors as regular
//! payloads; collectors classify them with [`crate::types::Fetched`].
//!
//! ## Traits
//!
//! Collectors are generic over [`MusicApi`] and the login state machine over
//! [`LoginApi`], which lets tests drive both with canned responses.

mod catalog;
mod login;

pub use login::{parse_qr_check, parse_qr_image, parse_qr_key};

use reqwest::{Client, Url};
use serde_json::Value;

use crate::{
    config::DataPaths,
    error::ApiError,
    management::CookieManager,
    types::{QrCheck, QrCode},
};

/// Data endpoints consumed by the collectors.
///
/// Every method returns the decoded JSON body as-is. A remote error such as
/// `{"code": 400, "msg": "..."}` is still `Ok`; only transport and decoding
/// failures surface as [`ApiError::Http`].
#[allow(async_fn_in_trait)]
pub trait MusicApi {
    /// Fetches one page of the hottest playlists of a category.
    ///
    /// # Arguments
    ///
    /// * `category` - Playlist category name, e.g. `摇滚`
    /// * `offset` - Index of the first playlist of the page
    /// * `limit` - Maximum number of playlists in the page
    ///
    /// # API Endpoint
    ///
    /// `POST /top/playlist` with `cat`, `offset`, `limit`, `total=true` and
    /// `order=hot`.
    async fn top_playlists(
        &self,
        category: &str,
        offset: u64,
        limit: u64,
    ) -> Result<Value, ApiError>;

    /// Fetches one page of a playlist's tracks.
    ///
    /// The response carries no `more` flag; callers page by the playlist's
    /// track count.
    ///
    /// # API Endpoint
    ///
    /// `POST /playlist/track/all` with `id`, `offset` and `limit`.
    async fn playlist_tracks(
        &self,
        playlist_id: i64,
        offset: u64,
        limit: u64,
    ) -> Result<Value, ApiError>;

    /// `POST /ugc/artist/get`: the user-generated artist profile.
    async fn artist_detail(&self, artist_id: i64) -> Result<Value, ApiError>;

    /// `POST /artists`: the artist summary with its hot songs.
    async fn artist_misc(&self, artist_id: i64) -> Result<Value, ApiError>;

    /// Fetches one page of an artist's albums.
    ///
    /// # API Endpoint
    ///
    /// `POST /artist/album` with `id`, `offset` and `limit`.
    async fn artist_albums(
        &self,
        artist_id: i64,
        offset: u64,
        limit: u64,
    ) -> Result<Value, ApiError>;

    /// Fetches the digital sales of several albums in one request.
    ///
    /// # Arguments
    ///
    /// * `album_ids` - Albums to look up, sent comma-joined as `ids`
    ///
    /// # API Endpoint
    ///
    /// `POST /digitalAlbum/sales`
    async fn album_sales(&self, album_ids: &[i64]) -> Result<Value, ApiError>;
}

/// QR login endpoints consumed by the login state machine.
#[allow(async_fn_in_trait)]
pub trait LoginApi {
    /// Requests a login key and the QR image encoding it.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::Remote`] when either request answers with a code
    /// other than 200, and [`ApiError::MissingField`] when the key or image
    /// is absent.
    async fn qr_image_url(&self) -> Result<QrCode, ApiError>;

    /// Checks whether the QR code for `key` has been scanned and confirmed.
    ///
    /// # Returns
    ///
    /// The check code mapped to a [`crate::types::LoginState`]: 801 and 802
    /// are pending, 803 is success and anything else is a failure. On
    /// success the cookies from the response are added to the client's jar.
    async fn qr_login_status(&self, key: &str) -> Result<QrCheck, ApiError>;
}

/// HTTP client for the API gateway.
pub struct ApiClient {
    base_url: String,
    cookies: CookieManager,
}

impl ApiClient {
    /// Creates a client for the gateway at `base_url`. A trailing slash is
    /// dropped.
    pub fn new(base_url: &str, cookies: CookieManager) -> Self {
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            cookies,
        }
    }

    /// Creates a client whose cookie jar is loaded from the data directory.
    pub async fn open(base_url: &str, paths: &DataPaths) -> Result<Self, ApiError> {
        let cookies = CookieManager::load(paths.cookie_file()).await?;
        Ok(Self::new(base_url, cookies))
    }

    pub fn cookies(&self) -> &CookieManager {
        &self.cookies
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, path: &str) -> String {
        format!("{base}{path}", base = self.base_url, path = path)
    }

    fn gateway_url(&self) -> Result<Url, ApiError> {
        Url::parse(&self.base_url).map_err(|e| ApiError::Cookie(e.to_string()))
    }

    /// Sends `form` as a urlencoded `POST` body and decodes the JSON answer.
    async fn post(&self, path: &str, form: &[(&str, String)]) -> Result<Value, ApiError> {
        let client = Client::builder()
            .cookie_provider(self.cookies.store())
            .build()?;

        let response = client.post(self.url(path)).form(form).send().await?;
        let json = response.json::<Value>().await?;
        Ok(json)
    }
}

fn timestamp() -> String {
    chrono::Utc::now().timestamp_millis().to_string()
}
