use std::fmt;

use serde::{Deserialize, Serialize, de::DeserializeOwned};
use serde_json::Value;
use tabled::Tabled;

/// Pipeline stages. Each stage owns one snapshot file and one export file.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Stage {
    Playlists,
    Tracks,
    Artists,
    ArtistMisc,
    ArtistAlbums,
    ArtistSales,
}

impl Stage {
    pub const CATALOG: [Stage; 3] = [Stage::Playlists, Stage::Tracks, Stage::Artists];
    pub const DISCOGRAPHY: [Stage; 3] =
        [Stage::ArtistMisc, Stage::ArtistAlbums, Stage::ArtistSales];

    pub fn name(&self) -> &'static str {
        match self {
            Stage::Playlists => "playlists",
            Stage::Tracks => "tracks",
            Stage::Artists => "artists",
            Stage::ArtistMisc => "artist_misc",
            Stage::ArtistAlbums => "artist_albums",
            Stage::ArtistSales => "artist_sales",
        }
    }

    pub fn all() -> impl Iterator<Item = Stage> {
        Self::CATALOG.into_iter().chain(Self::DISCOGRAPHY)
    }
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LoginState {
    Init,
    Pending,
    Success,
    Failed,
}

impl LoginState {
    /// Maps a `/login/qr/check` status code onto the login state.
    pub fn from_check_code(code: i64) -> Self {
        match code {
            801 | 802 => LoginState::Pending,
            803 => LoginState::Success,
            _ => LoginState::Failed,
        }
    }
}

impl fmt::Display for LoginState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            LoginState::Init => "init",
            LoginState::Pending => "pending",
            LoginState::Success => "success",
            LoginState::Failed => "failed",
        };
        f.write_str(name)
    }
}

/// A QR login key together with the image that encodes it.
#[derive(Debug, Clone, PartialEq)]
pub struct QrCode {
    pub key: String,
    /// `data:image/png;base64,...` URL as returned by the gateway.
    pub image: String,
}

/// Outcome of one `/login/qr/check` call.
#[derive(Debug, Clone, PartialEq)]
pub struct QrCheck {
    pub state: LoginState,
    pub code: i64,
    pub cookie: Option<String>,
}

/// Envelope shared by the login endpoints.
#[derive(Debug, Clone, Deserialize)]
pub struct CodeEnvelope<T> {
    pub code: i64,
    #[serde(default)]
    pub msg: Option<String>,
    #[serde(default)]
    pub message: Option<String>,
    pub data: Option<T>,
    #[serde(default)]
    pub cookie: Option<String>,
}

impl<T> CodeEnvelope<T> {
    pub fn remote_message(&self) -> Option<String> {
        self.msg
            .clone()
            .or_else(|| self.message.clone())
            .filter(|m| !m.is_empty())
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct QrKeyData {
    pub unikey: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct QrImageData {
    pub qrimg: String,
}

/// Classified API payload.
///
/// Data endpoints return whatever the gateway answered, including remote
/// errors. Collectors decode the raw value into the payload they expect and
/// branch on the outcome.
#[derive(Debug, Clone, PartialEq)]
pub enum Fetched<T> {
    Valid(T),
    Empty,
    Malformed(String),
}

/// A decoded payload that can carry no elements.
pub trait Payload: DeserializeOwned {
    fn is_empty(&self) -> bool;
}

impl<T: Payload> Fetched<T> {
    pub fn classify(value: &Value) -> Self {
        match T::deserialize(value) {
            Ok(payload) if payload.is_empty() => Fetched::Empty,
            Ok(payload) => Fetched::Valid(payload),
            Err(e) => Fetched::Malformed(e.to_string()),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct PlaylistPage {
    #[serde(default)]
    pub more: bool,
    #[serde(default)]
    pub total: Option<i64>,
    pub playlists: Vec<PlaylistItem>,
}

impl Payload for PlaylistPage {
    fn is_empty(&self) -> bool {
        self.playlists.is_empty()
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct PlaylistItem {
    pub id: i64,
    pub name: String,
    pub play_count: i64,
    pub share_count: i64,
    pub track_count: i64,
    pub comment_count: i64,
    pub subscribed_count: i64,
}

#[derive(Debug, Clone, Deserialize)]
pub struct TrackPage {
    pub songs: Vec<Song>,
}

impl Payload for TrackPage {
    fn is_empty(&self) -> bool {
        self.songs.is_empty()
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Song {
    pub id: i64,
    pub name: String,
    pub ar: Option<Vec<SongArtist>>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct SongArtist {
    pub id: Option<i64>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ArtistDetailResponse {
    #[serde(default)]
    pub data: Option<ArtistDetail>,
}

impl Payload for ArtistDetailResponse {
    fn is_empty(&self) -> bool {
        self.data.is_none()
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ArtistDetail {
    pub artist_name: String,
    pub area: Value,
    #[serde(rename = "type")]
    pub kind: Value,
    pub alias: Value,
    pub production: Value,
    pub desc: Value,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ArtistMiscResponse {
    #[serde(default)]
    pub artist: Option<ArtistProfile>,
}

impl Payload for ArtistMiscResponse {
    fn is_empty(&self) -> bool {
        self.artist.as_ref().is_none_or(|a| a.id == 0)
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ArtistProfile {
    pub id: i64,
    pub name: String,
    pub music_size: i64,
    pub album_size: i64,
    pub mv_size: i64,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AlbumPage {
    #[serde(default)]
    pub more: bool,
    pub hot_albums: Vec<AlbumItem>,
    #[serde(default)]
    pub artist: Option<ArtistProfile>,
}

impl Payload for AlbumPage {
    fn is_empty(&self) -> bool {
        self.hot_albums.is_empty()
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct AlbumItem {
    pub id: i64,
    pub name: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct SalesResponse {
    pub data: Vec<AlbumSales>,
}

impl Payload for SalesResponse {
    fn is_empty(&self) -> bool {
        self.data.is_empty()
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct AlbumSales {
    pub album_id: i64,
    pub album_sales: i64,
}

#[derive(Tabled)]
pub struct StageTableRow {
    pub stage: String,
    pub snapshot: String,
    pub rows: String,
    pub export: String,
}

#[derive(Tabled)]
pub struct CacheTableRow {
    pub cache: String,
    pub entries: usize,
    pub path: String,
}

#[derive(Tabled)]
pub struct LoginTableRow {
    pub login_status: String,
    pub qr_key: String,
    pub check_code: String,
    pub check_cookie: String,
    pub check_count: u32,
}
