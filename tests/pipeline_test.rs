mod common;

use std::fs::File;

use common::*;
use ncmscrape::config::DataPaths;
use ncmscrape::pipeline;
use ncmscrape::tables::Table;
use ncmscrape::types::Stage;
use parquet::arrow::arrow_reader::ParquetRecordBatchReaderBuilder;
use serde_json::json;
use tempfile::TempDir;

fn catalog_api() -> MockApi {
    let mut api = MockApi::new();
    api.playlists
        .insert("摇滚".into(), vec![playlist_page(1, 2, false, Some(2))]);
    api.tracks
        .insert(1, vec![track_page(&[(10, vec![7]), (11, vec![7, 8])])]);
    api.tracks.insert(2, vec![track_page(&[(12, vec![8])])]);
    api.artists.insert(7, artist_detail("Tang Dynasty"));
    api.artists.insert(8, artist_detail("Black Panther"));
    api
}

fn discography_api() -> MockApi {
    let mut api = MockApi::new();
    api.misc.insert(7, artist_misc(7, "Tang Dynasty", 2));
    api.albums.insert(7, vec![album_page(100, 2, false)]);
    api.sales.insert(
        vec![100, 101],
        json!({ "code": 200, "data": [
            { "albumId": 100, "albumSales": 5000 },
            { "albumId": 101, "albumSales": 12 }
        ]}),
    );
    api
}

fn parquet_rows(path: &std::path::Path) -> i64 {
    let file = File::open(path).unwrap();
    let builder = ParquetRecordBatchReaderBuilder::try_new(file).unwrap();
    builder.metadata().file_metadata().num_rows()
}

#[tokio::test]
async fn test_catalog_runs_all_stages() {
    let dir = TempDir::new().unwrap();
    let paths = DataPaths::new(dir.path());
    let api = catalog_api();

    let dataset = pipeline::prepare_catalog(&api, &paths, &["摇滚".to_string()])
        .await
        .unwrap();

    assert_eq!(dataset.playlists.len(), 2);
    assert_eq!(dataset.tracks.len(), 4);
    assert_eq!(dataset.artists.len(), 4);
    assert_eq!(api.calls_to("artist_detail"), 2);

    for stage in Stage::CATALOG {
        assert!(paths.snapshot(stage).exists(), "{stage} snapshot missing");
    }
    assert!(paths.tracks_cache().exists());
    assert!(paths.artists_cache().exists());
}

#[tokio::test]
async fn test_catalog_is_memoized() {
    let dir = TempDir::new().unwrap();
    let paths = DataPaths::new(dir.path());

    let first = pipeline::prepare_catalog(&catalog_api(), &paths, &["摇滚".to_string()])
        .await
        .unwrap();

    let offline = MockApi::new();
    let second = pipeline::prepare_catalog(&offline, &paths, &["摇滚".to_string()])
        .await
        .unwrap();

    assert_eq!(first, second);
    assert!(offline.calls().is_empty());
}

#[tokio::test]
async fn test_catalog_resumes_at_missing_stage() {
    let dir = TempDir::new().unwrap();
    let paths = DataPaths::new(dir.path());
    let api = catalog_api();

    let first = pipeline::prepare_catalog(&api, &paths, &["摇滚".to_string()])
        .await
        .unwrap();
    let removed = pipeline::clear_snapshots(&paths, &[Stage::Artists])
        .await
        .unwrap();
    assert_eq!(removed, 1);

    // artist details come from the cache, nothing is requested again
    let offline = MockApi::new();
    let second = pipeline::prepare_catalog(&offline, &paths, &["摇滚".to_string()])
        .await
        .unwrap();

    assert_eq!(first.artists, second.artists);
    assert!(offline.calls().is_empty());
}

#[tokio::test]
async fn test_export_catalog_writes_one_file_per_table() {
    let dir = TempDir::new().unwrap();
    let paths = DataPaths::new(dir.path());

    let dataset = pipeline::prepare_catalog(&catalog_api(), &paths, &["摇滚".to_string()])
        .await
        .unwrap();
    pipeline::export_catalog(&dataset, &paths).unwrap();

    assert_eq!(parquet_rows(&paths.export(Stage::Playlists)), 2);
    assert_eq!(parquet_rows(&paths.export(Stage::Tracks)), 4);
    assert_eq!(parquet_rows(&paths.export(Stage::Artists)), 4);
}

#[tokio::test]
async fn test_discography_runs_all_stages() {
    let dir = TempDir::new().unwrap();
    let paths = DataPaths::new(dir.path());
    let api = discography_api();

    let dataset = pipeline::prepare_discography(&api, &paths, &[7])
        .await
        .unwrap();
    pipeline::export_discography(&dataset, &paths).unwrap();

    assert_eq!(dataset.artist_misc.artist_name, vec!["Tang Dynasty".to_string()]);
    assert_eq!(dataset.artist_albums.album_id, vec![100, 101]);
    assert_eq!(dataset.artist_sales.sales, vec![5000, 12]);
    assert_eq!(parquet_rows(&paths.export(Stage::ArtistSales)), 2);

    assert_eq!(
        pipeline::snapshot_rows(&paths, Stage::ArtistAlbums)
            .await
            .unwrap(),
        Some(2)
    );
}

#[tokio::test]
async fn test_failed_stage_leaves_earlier_snapshots() {
    let dir = TempDir::new().unwrap();
    let paths = DataPaths::new(dir.path());
    std::fs::create_dir_all(paths.root().join("cache")).unwrap();
    std::fs::write(paths.tracks_cache(), "corrupt").unwrap();

    let result = pipeline::prepare_catalog(&catalog_api(), &paths, &["摇滚".to_string()]).await;

    assert!(result.is_err());
    assert!(paths.snapshot(Stage::Playlists).exists());
    assert!(!paths.snapshot(Stage::Tracks).exists());
}

#[tokio::test]
async fn test_status_helpers() {
    let dir = TempDir::new().unwrap();
    let paths = DataPaths::new(dir.path());

    assert_eq!(
        pipeline::snapshot_rows(&paths, Stage::Playlists)
            .await
            .unwrap(),
        None
    );
    assert!(
        pipeline::catalog_artist_ids(&paths)
            .await
            .unwrap()
            .is_empty()
    );

    pipeline::prepare_catalog(&catalog_api(), &paths, &["摇滚".to_string()])
        .await
        .unwrap();

    assert_eq!(
        pipeline::catalog_artist_ids(&paths).await.unwrap(),
        vec![7, 8]
    );
    assert_eq!(
        pipeline::clear_snapshots(&paths, &Stage::CATALOG)
            .await
            .unwrap(),
        3
    );
    assert_eq!(
        pipeline::clear_snapshots(&paths, &Stage::CATALOG)
            .await
            .unwrap(),
        0
    );
}
