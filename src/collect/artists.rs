use crate::{
    Res,
    management::ArtistsCache,
    netease::MusicApi,
    success,
    tables::{ArtistRow, ArtistTable, Table, TrackTable},
    types::{ArtistDetailResponse, Fetched},
    utils,
};

/// Looks up the detail of every track artist.
///
/// Each artist is fetched at most once: the raw response is cached under the
/// artist id, including responses without a `data` object, which are then
/// skipped on every later lookup as well.
///
/// # Arguments
///
/// * `api` - Gateway to query
/// * `tracks` - Output of [`super::collect_tracks`]
/// * `cache` - Raw responses per artist id; updated in memory only
///
/// # Returns
///
/// One row per track row whose artist has a `data` object, so an artist
/// appears as often as it appears in `tracks`.
pub async fn collect_artists<A: MusicApi>(
    api: &A,
    tracks: &TrackTable,
    cache: &mut ArtistsCache,
) -> Res<ArtistTable> {
    let mut table = ArtistTable::default();
    let pb = utils::spinner("Fetching artist details...");

    for (index, track) in tracks.rows().enumerate() {
        if track.artist_id == 0 {
            continue;
        }

        if !cache.contains(track.artist_id) {
            pb.set_message(format!(
                "Getting artist {} detail ({}/{})",
                track.artist_id,
                index + 1,
                tracks.len()
            ));
            let response = api.artist_detail(track.artist_id).await?;
            cache.set(track.artist_id, response);
        }

        let Some(response) = cache.get(track.artist_id) else {
            continue;
        };
        let Fetched::Valid(ArtistDetailResponse {
            data: Some(detail),
        }) = Fetched::<ArtistDetailResponse>::classify(response)
        else {
            continue;
        };

        table.push(ArtistRow {
            track_id: track.track_id,
            playlist_id: track.playlist_id,
            artist_id: track.artist_id,
            artist_name: detail.artist_name,
            artist_area: utils::value_to_text(&detail.area),
            artist_type: utils::value_to_text(&detail.kind),
            artist_alias: utils::value_to_text(&detail.alias),
            artist_production: utils::value_to_text(&detail.production),
            artist_description: utils::value_to_text(&detail.desc),
        });
    }

    pb.finish_and_clear();
    success!(
        "Collected {} artist rows ({} artists cached)",
        table.len(),
        cache.len()
    );

    Ok(table)
}
