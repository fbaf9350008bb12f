//! NetEase Cloud Music Scraper Library
//!
//! This library collects playlist, track and artist metadata from a local
//! NetEase Cloud Music API gateway, memoizes every stage on disk and exports
//! the resulting column tables as Parquet files for later analysis. It also
//! drives the QR-code login flow that seeds the shared cookie jar.
//!
//! # Modules
//!
//! - `cli` - Command-line interface implementations
//! - `collect` - Pagination collectors that flatten API pages into tables
//! - `config` - Configuration management, environment variables and data paths
//! - `error` - Error types shared across the crate
//! - `export` - Parquet export of column tables
//! - `login` - QR login state machine
//! - `management` - Disk-backed caches, stage snapshots and cookie persistence
//! - `netease` - NetEase Cloud Music API client implementation
//! - `pipeline` - Stage orchestration for the catalog and discography datasets
//! - `tables` - Column-oriented table types
//! - `types` - API payload structures and classification
//! - `utils` - Utility functions and helpers
//!
//! # Example
//!
//! ```
//! use ncmscrape::{config, netease::ApiClient, pipeline};
//!
//! #[tokio::main]
//! async fn main() -> ncmscrape::Res<()> {
//!     config::load_env().await?;
//!     let paths = config::DataPaths::from_env();
//!     let client = ApiClient::open(&config::api_url(), &paths).await?;
//!     let catalog = pipeline::prepare_catalog(&client, &paths, &config::categories()).await?;
//!     pipeline::export_catalog(&catalog, &paths)?;
//!     Ok(())
//! }
//! ```

pub mod cli;
pub mod collect;
pub mod config;
pub mod error;
pub mod export;
pub mod login;
pub mod management;
pub mod netease;
pub mod pipeline;
pub mod tables;
pub mod types;
pub mod utils;

/// A convenient Result type alias for operations that may fail.
///
/// Provides a standard error handling pattern throughout the application
/// using a boxed dynamic error trait object. Every error type of the crate
/// converts into it, which keeps `?` usable across module boundaries in
/// async contexts.
///
/// # Type Parameters
///
/// - `T` - The success type returned on successful operations
pub type Res<T> = std::result::Result<T, Box<dyn std::error::Error + Send + Sync>>;

/// Prints an informational message with a blue bullet point.
///
/// Creates a formatted output line with a distinctive blue "o" indicator
/// followed by the provided message. Used for general information and
/// status updates throughout the application.
///
/// # Example
///
/// ```
/// info!("Collecting playlists for {} categories", count);
/// ```
#[macro_export]
macro_rules! info {
  ($($arg:tt)*) => ({
    use colored::Colorize;
    println!("[{}] {}", "o".blue().bold(), std::format_args!($($arg)*));
  })
}

/// Prints a success message with a green checkmark.
///
/// # Example
///
/// ```
/// success!("Collected {} playlists", count);
/// ```
#[macro_export]
macro_rules! success {
  ($($arg:tt)*) => ({
    use colored::Colorize;
    println!("[{}] {}", "✓".green().bold(), std::format_args!($($arg)*));
  })
}

/// Prints an error message with a red exclamation mark and exits the program.
///
/// Creates a formatted error output with a red "!" indicator and immediately
/// terminates the program with exit code 1. Used for unrecoverable errors
/// such as a failed pipeline stage. The last written stage snapshot is kept,
/// so the next run resumes from there.
///
/// # Example
///
/// ```
/// error!("Pipeline failed: {}", e);
/// // Program exits here - code after this will not execute
/// ```
#[macro_export]
macro_rules! error {
  ($($arg:tt)*) => ({
    use colored::Colorize;
    println!("[{}] {}", "!".red().bold(), std::format_args!($($arg)*));
    std::process::exit(1);
  })
}

/// Prints a warning message with a yellow exclamation mark.
///
/// Used for recoverable issues, such as a failed QR login, that users should
/// notice without the program terminating.
///
/// # Example
///
/// ```
/// warning!("Login failed with code {}", code);
/// ```
#[macro_export]
macro_rules! warning {
  ($($arg:tt)*) => ({
    use colored::Colorize;
    println!("[{}] {}", "!".yellow().bold(), std::format_args!($($arg)*));
  })
}
