use crate::{
    config::{self, DataPaths},
    error, info,
    netease::ApiClient,
    pipeline, success,
    types::Stage,
    warning,
};

/// Collects playlists, tracks and artists and exports them as Parquet.
///
/// # Arguments
///
/// * `categories` - Playlist categories; empty means the configured defaults
/// * `force` - Remove the catalog snapshots first so every stage runs again.
///   Response caches are kept, so cached playlists and artists are not
///   requested again.
///
/// # Process Flow
///
/// 1. Loads the cookie jar and stores it back (creating it on first run)
/// 2. Runs playlists → tracks → artists, each stage memoized on disk
/// 3. Stores the cookie jar again
/// 4. Writes one Parquet file per table
pub async fn collect(categories: Vec<String>, force: bool) {
    let paths = DataPaths::from_env();
    let categories = if categories.is_empty() {
        config::categories()
    } else {
        categories
    };

    let client = open_client(&paths).await;

    if force {
        match pipeline::clear_snapshots(&paths, &Stage::CATALOG).await {
            Ok(removed) => info!("Removed {} catalog snapshots", removed),
            Err(e) => error!("Cannot remove catalog snapshots. Err: {}", e),
        }
    }

    persist_cookies(&client).await;
    info!(
        "Collecting {} categories from {}",
        categories.join(", "),
        client.base_url()
    );

    let dataset = match pipeline::prepare_catalog(&client, &paths, &categories).await {
        Ok(dataset) => dataset,
        Err(e) => error!(
            "Cannot collect catalog. Err: {}\nRun the command again to resume.",
            e
        ),
    };
    persist_cookies(&client).await;

    if let Err(e) = pipeline::export_catalog(&dataset, &paths) {
        error!("Cannot export catalog. Err: {}", e);
    }

    success!(
        "Exported catalog to {}",
        paths.root().join("exports").display()
    );
}

/// Collects artist profiles, albums and album sales and exports them.
///
/// The artists are taken from `artist_ids`, then from `NCM_ARTIST_IDS`, and
/// finally from the artists collected by [`collect`].
pub async fn discography(artist_ids: Vec<i64>, force: bool) {
    let paths = DataPaths::from_env();
    let artist_ids = resolve_artist_ids(artist_ids, &paths).await;
    if artist_ids.is_empty() {
        error!("No artists to collect. Pass --artist, set NCM_ARTIST_IDS or run ncmscrape collect.");
    }

    let client = open_client(&paths).await;

    if force {
        match pipeline::clear_snapshots(&paths, &Stage::DISCOGRAPHY).await {
            Ok(removed) => info!("Removed {} discography snapshots", removed),
            Err(e) => error!("Cannot remove discography snapshots. Err: {}", e),
        }
    }

    persist_cookies(&client).await;
    info!("Collecting discography of {} artists", artist_ids.len());

    let dataset = match pipeline::prepare_discography(&client, &paths, &artist_ids).await {
        Ok(dataset) => dataset,
        Err(e) => error!(
            "Cannot collect discography. Err: {}\nRun the command again to resume.",
            e
        ),
    };
    persist_cookies(&client).await;

    if let Err(e) = pipeline::export_discography(&dataset, &paths) {
        error!("Cannot export discography. Err: {}", e);
    }

    success!(
        "Exported discography to {}",
        paths.root().join("exports").display()
    );
}

async fn resolve_artist_ids(artist_ids: Vec<i64>, paths: &DataPaths) -> Vec<i64> {
    if !artist_ids.is_empty() {
        return crate::utils::distinct_ids(artist_ids);
    }

    let seeded = config::seed_artist_ids();
    if !seeded.is_empty() {
        return crate::utils::distinct_ids(seeded);
    }

    match pipeline::catalog_artist_ids(paths).await {
        Ok(ids) => ids,
        Err(e) => {
            warning!("Cannot read the artists snapshot. Err: {}", e);
            Vec::new()
        }
    }
}

async fn open_client(paths: &DataPaths) -> ApiClient {
    match ApiClient::open(&config::api_url(), paths).await {
        Ok(client) => client,
        Err(e) => error!(
            "Cannot load cookies from {}. Err: {}",
            paths.cookie_file().display(),
            e
        ),
    }
}

async fn persist_cookies(client: &ApiClient) {
    if let Err(e) = client.cookies().persist().await {
        error!("Cannot save cookies. Err: {}", e);
    }
}
