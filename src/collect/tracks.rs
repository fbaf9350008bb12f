use indicatif::ProgressBar;
use serde_json::Value;

use crate::{
    Res,
    config::TRACK_PAGE_SIZE,
    management::TracksCache,
    netease::MusicApi,
    success,
    tables::{PlaylistTable, Table, TrackRow, TrackTable},
    types::{Fetched, TrackPage},
    utils,
};

use super::Pager;

/// Lists the tracks of every playlist, one row per track artist.
///
/// The raw pages of a playlist are stored in `cache` once paging finished
/// without a malformed page; cached playlists are never fetched again.
/// Artists without an id, or with id 0, are skipped.
///
/// Paging is bounded by each playlist's `track_count`: a playlist reporting
/// zero tracks costs exactly one request.
///
/// # Arguments
///
/// * `api` - Gateway to page through
/// * `playlists` - Output of [`super::collect_playlists`]
/// * `cache` - Raw pages per playlist id; updated in memory, the caller saves
///   it
///
/// # Errors
///
/// Transport errors propagate. Playlists fetched before the error are already
/// in `cache`.
pub async fn collect_tracks<A: MusicApi>(
    api: &A,
    playlists: &PlaylistTable,
    cache: &mut TracksCache,
) -> Res<TrackTable> {
    let mut table = TrackTable::default();
    let pb = utils::spinner("Fetching playlist tracks...");

    for (index, (&playlist_id, &track_count)) in playlists
        .playlist_id
        .iter()
        .zip(playlists.track_count.iter())
        .enumerate()
    {
        if !cache.contains(playlist_id) {
            pb.set_message(format!(
                "Fetching tracks of playlist {} ({}/{})",
                playlist_id,
                index + 1,
                playlists.len()
            ));

            let (pages, complete) =
                fetch_track_pages(api, playlist_id, track_count, &pb).await?;
            if !complete {
                flatten_pages(&pages, playlist_id, &mut table);
                continue;
            }
            cache.set(playlist_id, pages);
        }

        if let Some(pages) = cache.get(playlist_id) {
            flatten_pages(pages, playlist_id, &mut table);
        }
    }

    pb.finish_and_clear();
    success!(
        "Collected {} track artists from {} playlists",
        table.len(),
        playlists.len()
    );

    Ok(table)
}

/// Returns the valid pages of one playlist and whether paging ended cleanly.
async fn fetch_track_pages<A: MusicApi>(
    api: &A,
    playlist_id: i64,
    track_count: i64,
    pb: &ProgressBar,
) -> Res<(Vec<Value>, bool)> {
    let mut pager = Pager::bounded(TRACK_PAGE_SIZE, track_count);
    let mut pages = Vec::new();

    loop {
        pb.set_message(format!(
            "Fetching tracks of playlist {} from {} to {}, total: {}",
            playlist_id,
            pager.offset(),
            pager.offset() + pager.limit(),
            utils::display_total(pager.total()),
        ));

        let response = api
            .playlist_tracks(playlist_id, pager.offset(), pager.limit())
            .await?;

        match Fetched::<TrackPage>::classify(&response) {
            Fetched::Valid(_) => pages.push(response),
            Fetched::Empty => return Ok((pages, true)),
            Fetched::Malformed(_) => return Ok((pages, false)),
        }

        if !pager.advance(true) {
            return Ok((pages, true));
        }
    }
}

fn flatten_pages(pages: &[Value], playlist_id: i64, table: &mut TrackTable) {
    for page in pages {
        let Fetched::Valid(page) = Fetched::<TrackPage>::classify(page) else {
            continue;
        };

        for song in page.songs {
            for artist in song.ar.unwrap_or_default() {
                let Some(artist_id) = artist.id.filter(|id| *id != 0) else {
                    continue;
                };

                table.push(TrackRow {
                    playlist_id,
                    track_id: song.id,
                    track_name: song.name.clone(),
                    artist_id,
                });
            }
        }
    }
}
