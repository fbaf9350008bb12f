use std::collections::{HashMap, HashSet};

use crate::{
    Res,
    config::ALBUM_PAGE_SIZE,
    netease::MusicApi,
    success,
    tables::{AlbumRow, AlbumTable, ArtistMiscRow, ArtistMiscTable, SalesRow, SalesTable, Table},
    types::{AlbumPage, ArtistMiscResponse, Fetched, SalesResponse},
    utils,
};

use super::Pager;

/// Fetches name and mv/track/album counts of every distinct artist id.
pub async fn collect_artist_misc<A: MusicApi>(
    api: &A,
    artist_ids: &[i64],
) -> Res<ArtistMiscTable> {
    let mut table = ArtistMiscTable::default();
    let pb = utils::spinner("Fetching artist profiles...");

    let mut seen = HashSet::new();
    for &artist_id in artist_ids {
        if artist_id == 0 || !seen.insert(artist_id) {
            continue;
        }

        pb.set_message(format!("Getting artist {} profile", artist_id));
        let response = api.artist_misc(artist_id).await?;

        let Fetched::Valid(ArtistMiscResponse {
            artist: Some(profile),
        }) = Fetched::<ArtistMiscResponse>::classify(&response)
        else {
            continue;
        };

        table.push(ArtistMiscRow {
            artist_id,
            artist_name: profile.name,
            mv_count: profile.mv_size,
            track_count: profile.music_size,
            album_count: profile.album_size,
        });
    }

    pb.finish_and_clear();
    success!("Collected {} artist profiles", table.len());

    Ok(table)
}

/// Lists the albums of every profiled artist.
///
/// The album count of the profile bounds the paging. When the profile
/// reported no albums, the count is taken from the first album page instead.
pub async fn collect_artist_albums<A: MusicApi>(
    api: &A,
    artists: &ArtistMiscTable,
) -> Res<AlbumTable> {
    let mut table = AlbumTable::default();
    let pb = utils::spinner("Fetching artist albums...");

    for artist in artists.rows() {
        let mut pager = Pager::with_total(ALBUM_PAGE_SIZE, artist.album_count);

        loop {
            pb.set_message(format!(
                "Fetching albums of artist {} from {} to {}, total: {}",
                artist.artist_id,
                pager.offset(),
                pager.offset() + pager.limit(),
                utils::display_total(pager.total()),
            ));

            let response = api
                .artist_albums(artist.artist_id, pager.offset(), pager.limit())
                .await?;

            let page = match Fetched::<AlbumPage>::classify(&response) {
                Fetched::Valid(page) => page,
                Fetched::Empty | Fetched::Malformed(_) => break,
            };

            pager.learn_total(page.artist.as_ref().map(|a| a.album_size));

            for album in page.hot_albums.into_iter().filter(|a| a.id != 0) {
                table.push(AlbumRow {
                    artist_id: artist.artist_id,
                    album_id: album.id,
                    album_name: album.name,
                });
            }

            if !pager.advance(page.more) {
                break;
            }
        }
    }

    pb.finish_and_clear();
    success!(
        "Collected {} albums of {} artists",
        table.len(),
        artists.len()
    );

    Ok(table)
}

/// Looks up the sales figures of every album, one request per artist.
///
/// # Errors
///
/// Only transport errors. A sales payload in an unexpected shape is skipped.
pub async fn collect_album_sales<A: MusicApi>(api: &A, albums: &AlbumTable) -> Res<SalesTable> {
    let mut table = SalesTable::default();
    let pb = utils::spinner("Fetching album sales...");

    for (artist_id, album_ids) in group_albums_by_artist(albums) {
        pb.set_message(format!(
            "Getting sales of {} albums of artist {}",
            album_ids.len(),
            artist_id
        ));

        let response = api.album_sales(&album_ids).await?;
        let Fetched::Valid(sales) = Fetched::<SalesResponse>::classify(&response) else {
            continue;
        };

        for entry in sales.data.into_iter().filter(|s| s.album_id != 0) {
            table.push(SalesRow {
                album_id: entry.album_id,
                sales: entry.album_sales,
            });
        }
    }

    pb.finish_and_clear();
    success!("Collected sales of {} albums", table.len());

    Ok(table)
}

/// Groups distinct album ids by artist, keeping first-seen order.
fn group_albums_by_artist(albums: &AlbumTable) -> Vec<(i64, Vec<i64>)> {
    let mut groups: Vec<(i64, Vec<i64>)> = Vec::new();
    let mut index: HashMap<i64, usize> = HashMap::new();
    let mut seen = HashSet::new();

    for (&artist_id, &album_id) in albums.artist_id.iter().zip(albums.album_id.iter()) {
        if album_id == 0 || !seen.insert(album_id) {
            continue;
        }

        let slot = *index.entry(artist_id).or_insert_with(|| {
            groups.push((artist_id, Vec::new()));
            groups.len() - 1
        });
        groups[slot].1.push(album_id);
    }

    groups
}
