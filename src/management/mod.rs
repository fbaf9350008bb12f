mod cache;
mod cookies;
pub mod snapshot;

pub use cache::Cache;
pub use cookies::CookieManager;
pub use snapshot::load_or_compute;

use serde_json::Value;

/// Raw `/playlist/track/all` pages per playlist id.
pub type TracksCache = Cache<Vec<Value>>;

/// Raw `/ugc/artist/get` responses per artist id.
pub type ArtistsCache = Cache<Value>;
