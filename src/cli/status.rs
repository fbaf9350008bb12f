use tabled::Table;

use crate::{
    config::DataPaths,
    error,
    management::{ArtistsCache, TracksCache},
    pipeline, success,
    types::{CacheTableRow, Stage, StageTableRow},
    warning,
};

/// Shows, per stage, whether a snapshot and an export exist.
pub async fn status() {
    let paths = DataPaths::from_env();

    let mut rows = Vec::new();
    for stage in Stage::all() {
        let (snapshot, count) = match pipeline::snapshot_rows(&paths, stage).await {
            Ok(Some(count)) => ("yes".to_string(), count.to_string()),
            Ok(None) => ("no".to_string(), "-".to_string()),
            Err(e) => {
                warning!("Cannot read {} snapshot. Err: {}", stage, e);
                ("unreadable".to_string(), "-".to_string())
            }
        };

        rows.push(StageTableRow {
            stage: stage.to_string(),
            snapshot,
            rows: count,
            export: if paths.export(stage).exists() {
                "yes".to_string()
            } else {
                "no".to_string()
            },
        });
    }

    println!("{}", Table::new(rows));
}

/// Shows how many responses each cache holds.
pub async fn caches() {
    let paths = DataPaths::from_env();

    let tracks = match TracksCache::open(paths.tracks_cache()).await {
        Ok(cache) => cache,
        Err(e) => error!("Cannot load tracks cache. Err: {}", e),
    };
    let artists = match ArtistsCache::open(paths.artists_cache()).await {
        Ok(cache) => cache,
        Err(e) => error!("Cannot load artists cache. Err: {}", e),
    };

    let rows = vec![
        CacheTableRow {
            cache: "tracks".to_string(),
            entries: tracks.len(),
            path: tracks.path().display().to_string(),
        },
        CacheTableRow {
            cache: "artists".to_string(),
            entries: artists.len(),
            path: artists.path().display().to_string(),
        },
    ];

    println!("{}", Table::new(rows));
}

/// Removes the selected caches; both when neither is selected.
pub async fn clear_caches(tracks: bool, artists: bool) {
    let paths = DataPaths::from_env();
    let both = !tracks && !artists;

    if tracks || both {
        match TracksCache::open(paths.tracks_cache()).await {
            Ok(mut cache) => {
                let entries = cache.len();
                if let Err(e) = cache.clear().await {
                    error!("Cannot clear tracks cache. Err: {}", e);
                }
                success!("Cleared {} cached playlists", entries);
            }
            Err(e) => error!("Cannot load tracks cache. Err: {}", e),
        }
    }

    if artists || both {
        match ArtistsCache::open(paths.artists_cache()).await {
            Ok(mut cache) => {
                let entries = cache.len();
                if let Err(e) = cache.clear().await {
                    error!("Cannot clear artists cache. Err: {}", e);
                }
                success!("Cleared {} cached artists", entries);
            }
            Err(e) => error!("Cannot load artists cache. Err: {}", e),
        }
    }
}
