//! # Collectors
//!
//! Each collector walks one family of endpoints page by page, classifies
//! every payload with [`crate::types::Fetched`] and flattens the valid ones
//! into a column table. Collectors never raise on malformed or empty
//! payloads; they stop paging (or skip the record) instead. Transport errors
//! propagate.
//!
//! ## Stage order
//!
//! ```text
//! catalog:      playlists ──▶ tracks ──▶ artists
//! discography:  artist_misc ──▶ artist_albums ──▶ album_sales
//! ```
//!
//! Every collector takes the previous stage's table as its input.

mod artists;
mod discography;
mod playlists;
mod tracks;

pub use artists::collect_artists;
pub use discography::{collect_album_sales, collect_artist_albums, collect_artist_misc};
pub use playlists::collect_playlists;
pub use tracks::collect_tracks;

/// Offset bookkeeping for offset/limit pagination.
///
/// Paging stops when the remote reports no further pages or when the offset
/// reaches the total. The total is learned once, from the first response
/// that reports a positive value, and never re-read. If the total stays
/// unknown and the remote keeps reporting more pages, paging never stops.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Pager {
    offset: u64,
    limit: u64,
    total: Option<u64>,
}

impl Pager {
    /// Starts at offset 0 with an unknown total. A zero limit is raised to 1.
    pub fn new(limit: u64) -> Self {
        Self {
            offset: 0,
            limit: limit.max(1),
            total: None,
        }
    }

    /// Starts with a total that is already known, e.g. a playlist's track
    /// count. Non-positive totals count as unknown.
    pub fn with_total(limit: u64, total: i64) -> Self {
        let mut pager = Self::new(limit);
        pager.learn_total(Some(total));
        pager
    }

    /// Starts with a total that is authoritative even when it is zero, e.g.
    /// a playlist's track count for an endpoint without a `more` flag. Paging
    /// stops once the offset reaches it, so a total of zero still requests
    /// exactly one page.
    pub fn bounded(limit: u64, total: i64) -> Self {
        let mut pager = Self::new(limit);
        pager.total = Some(total.max(0) as u64);
        pager
    }

    /// Records the total reported by a response unless one is already known.
    pub fn learn_total(&mut self, total: Option<i64>) {
        if self.total.is_some() {
            return;
        }
        self.total = total.filter(|t| *t > 0).map(|t| t as u64);
    }

    /// Moves past the current page and tells whether another page should be
    /// requested.
    pub fn advance(&mut self, more: bool) -> bool {
        self.offset += self.limit;
        more && self.total.is_none_or(|total| self.offset < total)
    }

    pub fn offset(&self) -> u64 {
        self.offset
    }

    pub fn limit(&self) -> u64 {
        self.limit
    }

    pub fn total(&self) -> Option<u64> {
        self.total
    }
}
