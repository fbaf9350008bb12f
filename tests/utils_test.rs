use ncmscrape::collect::Pager;
use ncmscrape::config::{DEFAULT_CATEGORIES, DataPaths};
use ncmscrape::types::{Fetched, PlaylistPage, Stage};
use ncmscrape::utils::*;
use serde_json::json;
use std::future::{pending, ready};

#[test]
fn test_value_to_text() {
    assert_eq!(value_to_text(&json!(null)), None);
    assert_eq!(value_to_text(&json!("港台")), Some("港台".to_string()));
    assert_eq!(value_to_text(&json!(2)), Some("2".to_string()));
    assert_eq!(
        value_to_text(&json!(["a", "b"])),
        Some("[\"a\",\"b\"]".to_string())
    );
    assert_eq!(
        value_to_text(&json!({ "k": 1 })),
        Some("{\"k\":1}".to_string())
    );
}

#[test]
fn test_decode_data_url() {
    // "hello" in base64
    let bytes = decode_data_url("data:image/png;base64,aGVsbG8=").unwrap();
    assert_eq!(bytes, b"hello");

    let bare = decode_data_url("aGVsbG8=").unwrap();
    assert_eq!(bare, b"hello");

    assert!(decode_data_url("data:image/png;base64,@@@").is_err());
}

#[test]
fn test_distinct_ids() {
    assert_eq!(distinct_ids(vec![3, 1, 3, 0, 2, 1]), vec![3, 1, 2]);
    assert!(distinct_ids(vec![0, 0]).is_empty());
}

#[test]
fn test_option_text_and_display_total() {
    assert_eq!(option_text(&Some(801)), "801");
    assert_eq!(option_text::<i64>(&None), "-");
    assert_eq!(display_total(Some(250)), "250");
    assert_eq!(display_total(None), "unknown");
}

#[test]
fn test_pager_stops_at_total() {
    let mut pager = Pager::new(100);
    pager.learn_total(Some(250));

    assert!(pager.advance(true));
    assert_eq!(pager.offset(), 100);
    assert!(pager.advance(true));
    assert!(!pager.advance(true));
    assert_eq!(pager.offset(), 300);
}

#[test]
fn test_pager_stops_when_no_more() {
    let mut pager = Pager::new(100);
    assert!(!pager.advance(false));
}

#[test]
fn test_pager_first_positive_total_wins() {
    let mut pager = Pager::new(10);
    pager.learn_total(None);
    pager.learn_total(Some(0));
    assert_eq!(pager.total(), None);

    pager.learn_total(Some(30));
    pager.learn_total(Some(1000));
    assert_eq!(pager.total(), Some(30));
}

#[test]
fn test_pager_without_total_follows_more() {
    let mut pager = Pager::new(10);
    for _ in 0..50 {
        assert!(pager.advance(true));
    }
    assert_eq!(pager.offset(), 500);
}

#[test]
fn test_pager_with_known_total() {
    let mut pager = Pager::with_total(500, 1200);
    assert_eq!(pager.total(), Some(1200));
    assert!(pager.advance(true));
    assert!(pager.advance(true));
    assert!(!pager.advance(true));

    let unknown = Pager::with_total(500, 0);
    assert_eq!(unknown.total(), None);
    assert_eq!(Pager::new(0).limit(), 1);
}

#[test]
fn test_bounded_pager_treats_zero_as_known() {
    let mut empty = Pager::bounded(500, 0);
    assert_eq!(empty.total(), Some(0));
    assert!(!empty.advance(true));

    let mut pager = Pager::bounded(500, 501);
    pager.learn_total(Some(10_000));
    assert_eq!(pager.total(), Some(501));
    assert!(pager.advance(true));
    assert!(!pager.advance(true));

    assert_eq!(Pager::bounded(500, -3).total(), Some(0));
}

#[tokio::test]
async fn test_interruptible_returns_work_output() {
    assert_eq!(interruptible(ready(7), pending::<()>()).await, Some(7));
}

#[tokio::test]
async fn test_interruptible_cancels_pending_work() {
    assert_eq!(interruptible(pending::<i32>(), ready(())).await, None);

    // an interrupt that is already due wins over finished work
    assert_eq!(interruptible(ready(7), ready(())).await, None);
}

#[test]
fn test_fetched_classification() {
    let valid = Fetched::<PlaylistPage>::classify(&json!({
        "more": false,
        "playlists": [{ "id": 1 }]
    }));
    assert!(matches!(valid, Fetched::Valid(page) if page.playlists.len() == 1));

    let empty = Fetched::<PlaylistPage>::classify(&json!({ "playlists": [] }));
    assert!(matches!(empty, Fetched::Empty));

    let malformed = Fetched::<PlaylistPage>::classify(&json!({ "code": 500 }));
    assert!(matches!(malformed, Fetched::Malformed(_)));

    let wrong_type = Fetched::<PlaylistPage>::classify(&json!({ "playlists": "none" }));
    assert!(matches!(wrong_type, Fetched::Malformed(_)));
}

#[test]
fn test_stage_names() {
    let names: Vec<&str> = Stage::all().map(|s| s.name()).collect();
    assert_eq!(
        names,
        vec![
            "playlists",
            "tracks",
            "artists",
            "artist_misc",
            "artist_albums",
            "artist_sales"
        ]
    );
}

#[test]
fn test_data_paths_layout() {
    let paths = DataPaths::new("/tmp/ncm");

    assert!(paths.cookie_file().ends_with("cookies.json"));
    assert!(paths.tracks_cache().ends_with("cache/tracks.json"));
    assert!(paths.artists_cache().ends_with("cache/artists.json"));
    assert!(
        paths
            .snapshot(Stage::ArtistMisc)
            .ends_with("snapshots/artist_misc.json")
    );
    assert!(
        paths
            .export(Stage::Tracks)
            .ends_with("exports/tracks.parquet")
    );
    assert!(paths.qr_image().starts_with("/tmp/ncm"));
}

#[test]
fn test_default_categories() {
    assert_eq!(DEFAULT_CATEGORIES, ["摇滚", "朋克", "民谣", "说唱", "电子"]);
}
