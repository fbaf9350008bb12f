//! # CLI Module
//!
//! This module provides the command-line interface layer for ncmscrape. It
//! implements all user-facing commands and coordinates between the API
//! client, the pipelines and the on-disk state.
//!
//! ## Command Categories
//!
//! ### Authentication
//!
//! - [`login`] - QR-code login; polls the gateway every 4 seconds until the
//!   code is confirmed or rejected and stores the session cookies
//!
//! ### Collection
//!
//! - [`collect`] - Playlists → tracks → artists for the configured categories
//! - [`discography`] - Artist profiles → albums → album sales
//!
//! ### Information and Maintenance
//!
//! - [`status`] - Shows which stages have snapshots and exports
//! - [`caches`] - Shows the size of the response caches
//! - [`clear_caches`] - Removes response caches
//!
//! ## Architecture Design
//!
//! ```text
//! CLI Layer (User Interface)
//!     ↓
//! Pipeline Layer (Stage order, snapshots, export)
//!     ↓
//! Collector Layer (Pagination, flattening, caches)
//!     ↓
//! API Layer (NetEase gateway, cookies)
//! ```
//!
//! ## Error Handling
//!
//! Commands never return errors. A failure that leaves nothing useful to do
//! ends the process through the `error!` macro; snapshots written before the
//! failure are kept, so running the same command again resumes at the stage
//! that failed. Login failures are reported as warnings and offer a restart.
//!
//! ## Usage Patterns
//!
//! ```bash
//! ncmscrape login                          # Scan the QR code with the mobile app
//! ncmscrape collect                        # Collect the default categories
//! ncmscrape collect --category 摇滚 --force # Re-collect one category from scratch
//! ncmscrape discography --artist 6452      # Albums and sales of one artist
//! ncmscrape status                         # What is on disk
//! ```

mod collect;
mod login;
mod status;

pub use collect::collect;
pub use collect::discography;
pub use login::login;
pub use status::caches;
pub use status::clear_caches;
pub use status::status;
