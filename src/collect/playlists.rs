use crate::{
    Res,
    config::PLAYLIST_PAGE_SIZE,
    netease::MusicApi,
    success,
    tables::{PlaylistRow, PlaylistTable, Table},
    types::{Fetched, PlaylistPage},
    utils,
};

use super::Pager;

/// Lists the hottest playlists of every category.
///
/// One row per playlist, tagged with the category it was listed under. A
/// playlist listed under several categories appears once per category.
///
/// # Arguments
///
/// * `api` - Gateway to page through
/// * `categories` - Category names, requested in the given order
///
/// # Returns
///
/// The playlist table, or the first transport error. A malformed or empty
/// page ends paging for its category without failing the stage.
///
/// # Example
///
/// ```
/// let categories = vec!["摇滚".to_string(), "民谣".to_string()];
/// let playlists = collect_playlists(&client, &categories).await?;
/// println!("{} playlists", playlists.len());
/// ```
pub async fn collect_playlists<A: MusicApi>(api: &A, categories: &[String]) -> Res<PlaylistTable> {
    let mut table = PlaylistTable::default();
    let pb = utils::spinner("Fetching playlists...");

    for category in categories {
        let mut pager = Pager::new(PLAYLIST_PAGE_SIZE);

        loop {
            pb.set_message(format!(
                "Fetching {category} playlists {from}..{to} (total: {total})",
                category = category,
                from = pager.offset(),
                to = pager.offset() + pager.limit(),
                total = utils::display_total(pager.total()),
            ));

            let response = api
                .top_playlists(category, pager.offset(), pager.limit())
                .await?;

            let page = match Fetched::<PlaylistPage>::classify(&response) {
                Fetched::Valid(page) => page,
                Fetched::Empty | Fetched::Malformed(_) => break,
            };

            pager.learn_total(page.total);

            for playlist in page.playlists.into_iter().filter(|p| p.id != 0) {
                table.push(PlaylistRow {
                    category: category.clone(),
                    playlist_id: playlist.id,
                    playlist_name: playlist.name,
                    play_count: playlist.play_count,
                    share_count: playlist.share_count,
                    track_count: playlist.track_count,
                    comment_count: playlist.comment_count,
                    subscribed_count: playlist.subscribed_count,
                });
            }

            if !pager.advance(page.more) {
                break;
            }
        }
    }

    pb.finish_and_clear();
    success!(
        "Collected {} playlists from {} categories",
        table.len(),
        categories.len()
    );

    Ok(table)
}
