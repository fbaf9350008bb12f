//! Stage orchestration.
//!
//! Both pipelines run their collectors strictly in dependency order. Every
//! stage goes through [`load_or_compute`], so a stage whose snapshot exists
//! is loaded instead of collected and an interrupted run resumes at the
//! first stage without a snapshot. Each stage's table is handed explicitly
//! to the next stage.

use crate::{
    Res,
    collect::{
        collect_album_sales, collect_artist_albums, collect_artist_misc, collect_artists,
        collect_playlists, collect_tracks,
    },
    config::DataPaths,
    error::{ExportError, StoreError},
    export,
    management::{ArtistsCache, TracksCache, load_or_compute, snapshot},
    netease::MusicApi,
    tables::{
        AlbumTable, ArtistMiscTable, ArtistTable, PlaylistTable, SalesTable, Table, TrackTable,
    },
    types::Stage,
    utils,
};

#[derive(Debug, Clone, Default, PartialEq)]
pub struct CatalogDataset {
    pub playlists: PlaylistTable,
    pub tracks: TrackTable,
    pub artists: ArtistTable,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct DiscographyDataset {
    pub artist_misc: ArtistMiscTable,
    pub artist_albums: AlbumTable,
    pub artist_sales: SalesTable,
}

/// Runs playlists → tracks → artists.
pub async fn prepare_catalog<A: MusicApi>(
    api: &A,
    paths: &DataPaths,
    categories: &[String],
) -> Res<CatalogDataset> {
    let playlists = load_or_compute(
        &paths.snapshot(Stage::Playlists),
        collect_playlists(api, categories),
    )
    .await?;

    let tracks = load_or_compute(
        &paths.snapshot(Stage::Tracks),
        tracks_stage(api, paths, &playlists),
    )
    .await?;

    let artists = load_or_compute(
        &paths.snapshot(Stage::Artists),
        artists_stage(api, paths, &tracks),
    )
    .await?;

    Ok(CatalogDataset {
        playlists,
        tracks,
        artists,
    })
}

/// Runs artist misc → artist albums → album sales for `artist_ids`.
pub async fn prepare_discography<A: MusicApi>(
    api: &A,
    paths: &DataPaths,
    artist_ids: &[i64],
) -> Res<DiscographyDataset> {
    let artist_misc = load_or_compute(
        &paths.snapshot(Stage::ArtistMisc),
        collect_artist_misc(api, artist_ids),
    )
    .await?;

    let artist_albums = load_or_compute(
        &paths.snapshot(Stage::ArtistAlbums),
        collect_artist_albums(api, &artist_misc),
    )
    .await?;

    let artist_sales = load_or_compute(
        &paths.snapshot(Stage::ArtistSales),
        collect_album_sales(api, &artist_albums),
    )
    .await?;

    Ok(DiscographyDataset {
        artist_misc,
        artist_albums,
        artist_sales,
    })
}

// The caches are saved even when the collector fails, so the next run does
// not repeat the requests that already succeeded.
async fn tracks_stage<A: MusicApi>(
    api: &A,
    paths: &DataPaths,
    playlists: &PlaylistTable,
) -> Res<TrackTable> {
    let mut cache = TracksCache::open(paths.tracks_cache()).await?;
    let result = collect_tracks(api, playlists, &mut cache).await;
    cache.save().await?;
    result
}

async fn artists_stage<A: MusicApi>(
    api: &A,
    paths: &DataPaths,
    tracks: &TrackTable,
) -> Res<ArtistTable> {
    let mut cache = ArtistsCache::open(paths.artists_cache()).await?;
    let result = collect_artists(api, tracks, &mut cache).await;
    cache.save().await?;
    result
}

pub fn export_catalog(dataset: &CatalogDataset, paths: &DataPaths) -> Result<(), ExportError> {
    export::write_parquet(&dataset.playlists, &paths.export(Stage::Playlists))?;
    export::write_parquet(&dataset.tracks, &paths.export(Stage::Tracks))?;
    export::write_parquet(&dataset.artists, &paths.export(Stage::Artists))
}

pub fn export_discography(
    dataset: &DiscographyDataset,
    paths: &DataPaths,
) -> Result<(), ExportError> {
    export::write_parquet(&dataset.artist_misc, &paths.export(Stage::ArtistMisc))?;
    export::write_parquet(&dataset.artist_albums, &paths.export(Stage::ArtistAlbums))?;
    export::write_parquet(&dataset.artist_sales, &paths.export(Stage::ArtistSales))
}

/// Deletes the snapshots of `stages` and returns how many existed.
pub async fn clear_snapshots(paths: &DataPaths, stages: &[Stage]) -> Result<usize, StoreError> {
    let mut removed = 0;
    for stage in stages {
        if snapshot::remove(&paths.snapshot(*stage)).await? {
            removed += 1;
        }
    }
    Ok(removed)
}

/// Number of rows in the snapshot of `stage`, or `None` without snapshot.
pub async fn snapshot_rows(paths: &DataPaths, stage: Stage) -> Result<Option<usize>, StoreError> {
    let path = paths.snapshot(stage);
    if !path.exists() {
        return Ok(None);
    }

    let rows = match stage {
        Stage::Playlists => snapshot::load::<PlaylistTable>(&path).await?.len(),
        Stage::Tracks => snapshot::load::<TrackTable>(&path).await?.len(),
        Stage::Artists => snapshot::load::<ArtistTable>(&path).await?.len(),
        Stage::ArtistMisc => snapshot::load::<ArtistMiscTable>(&path).await?.len(),
        Stage::ArtistAlbums => snapshot::load::<AlbumTable>(&path).await?.len(),
        Stage::ArtistSales => snapshot::load::<SalesTable>(&path).await?.len(),
    };
    Ok(Some(rows))
}

/// Distinct artist ids of the catalog's artist snapshot, in first-seen order.
pub async fn catalog_artist_ids(paths: &DataPaths) -> Result<Vec<i64>, StoreError> {
    let path = paths.snapshot(Stage::Artists);
    if !path.exists() {
        return Ok(Vec::new());
    }

    let artists: ArtistTable = snapshot::load(&path).await?;
    Ok(utils::distinct_ids(artists.artist_id))
}
