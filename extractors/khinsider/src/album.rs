use std::collections::HashSet;

use ripvgm_extractor_api::url::Url;
use ripvgm_extractor_api::{
    async_trait, Extraction, ExtractionError, Host, ListBreed, ListExtraction, ListExtractor,
    NewExtractor, Result, URLMatcher,
};
use tracing::info;

use crate::common::{last_segment, match_album_id, title_from_slug, track_url};
use crate::html::{search_album_title, search_audio_url, track_links, TrackLink};

/// Text of the download icon shown next to every track; it links to the same page.
pub const ICON_LABEL: &str = "get_app";

pub struct KhinsiderAlbumLE {}

impl NewExtractor for KhinsiderAlbumLE {
    fn new() -> Self {
        KhinsiderAlbumLE {}
    }
}

impl URLMatcher for KhinsiderAlbumLE {
    fn name(&self) -> &'static str {
        "khinsider:album"
    }

    fn description(&self) -> &'static str {
        "KHInsider game soundtrack album, as a playlist of MP3s"
    }

    fn match_extractor(&self, url: &Url) -> bool {
        match_album_id(url).is_some()
    }
}

/// Track links in listing order, without icon links and without repeated targets.
fn listed_tracks(webpage: &str) -> Vec<TrackLink> {
    let mut seen = HashSet::new();
    track_links(webpage)
        .into_iter()
        .filter(|link| link.title != ICON_LABEL)
        .filter(|link| seen.insert(link.path.clone()))
        .collect()
}

/// `Ok(None)` when the page has no audio player.
async fn extract_entry(ctx: &dyn Host, link: &TrackLink) -> Result<Option<Extraction>> {
    let song_url = track_url(&link.path)?;
    let song_page = ctx
        .fetch(&format!("Downloading page for {}", link.title), &song_url)
        .await?;
    Ok(search_audio_url(&song_page).map(|audio| {
        Extraction::mp3(
            last_segment(&link.path),
            Some(link.title.clone()),
            audio,
        )
    }))
}

#[async_trait]
impl ListExtractor for KhinsiderAlbumLE {
    async fn extract_list(&self, ctx: &dyn Host, url: &Url) -> Result<ListExtraction> {
        let album_id = match_album_id(url)
            .ok_or_else(|| ExtractionError::UnsupportedUrl(url.to_string()))?
            .to_string();
        let webpage = ctx.fetch(&album_id, url).await?;

        let title = search_album_title(&webpage).unwrap_or_else(|| title_from_slug(&album_id));
        let links = listed_tracks(&webpage);

        let mut entries = Vec::with_capacity(links.len());
        for link in &links {
            match extract_entry(ctx, link).await {
                Ok(Some(entry)) => entries.push(entry),
                Ok(None) => ctx.warn(&format!("Could not find MP3 URL for {}", link.title)),
                Err(e) => ctx.warn(&format!("Error extracting {}: {}", link.title, e)),
            }
        }
        info!(
            album = %album_id,
            listed = links.len(),
            extracted = entries.len(),
            "extracted album"
        );

        Ok(ListExtraction {
            id: album_id,
            breed: ListBreed::Album,
            title,
            entries,
        })
    }
}

#[cfg(test)]
mod tests {
    use ripvgm_extractor_api::url::Url;
    use ripvgm_extractor_api::{
        ExtractionContext, ExtractionError, ListBreed, ListExtractor, StubHost, URLMatcher,
    };

    use super::{listed_tracks, KhinsiderAlbumLE};

    const ALBUM_URL: &str = "https://downloads.khinsider.com/game-soundtracks/album/minecraft";
    const TRACK_BASE: &str = "https://downloads.khinsider.com/game-soundtracks/album/minecraft/";

    fn row(file: &str, title: &str) -> String {
        format!(
            r#"<tr>
<td class="playlistDownloadSong"><a href="/game-soundtracks/album/minecraft/{file}"><i class="material-icons">get_app</i></a></td>
<td class="clickable-row"><a href="/game-soundtracks/album/minecraft/{file}">{title}</a></td>
</tr>"#
        )
    }

    fn album_page(heading: Option<&str>, rows: &[(&str, &str)]) -> String {
        let heading = heading
            .map(|h| format!("<h2>{h}</h2>"))
            .unwrap_or_default();
        let rows: String = rows.iter().map(|(file, title)| row(file, title)).collect();
        format!(r#"<html><body>{heading}<table id="songlist">{rows}</table></body></html>"#)
    }

    fn track_page(file: &str) -> String {
        format!(
            r#"<p>Song name: <b>{file}</b></p>
<audio id="audio" controls src="https://vgmsite.com/soundtracks/minecraft/{file}"></audio>"#
        )
    }

    fn host_with_tracks(album: String, files: &[&str]) -> StubHost {
        files.iter().fold(
            StubHost::new().with_page(ALBUM_URL, album),
            |host, file| host.with_page(&format!("{TRACK_BASE}{file}"), track_page(file)),
        )
    }

    const ROWS: [(&str, &str); 3] = [
        ("01.%2520Key.mp3", "Key"),
        ("02.%2520Door.mp3", "Door"),
        ("03.%2520Subwoofer%2520Lullaby.mp3", "Subwoofer Lullaby"),
    ];

    #[test]
    fn match_album_url() {
        let khinsider = KhinsiderAlbumLE {};
        assert!(khinsider.match_extractor(&Url::parse(ALBUM_URL).unwrap()));
        let mtch = khinsider.match_extractor(
            &Url::parse(&format!("{TRACK_BASE}01.%2520Key.mp3")).unwrap(),
        );
        assert!(!mtch);
    }

    #[test]
    fn icon_links_are_skipped_wherever_they_are() {
        let page = concat!(
            r#"<a href="/game-soundtracks/album/x/01.mp3">get_app</a>"#,
            r#"<a href="/game-soundtracks/album/x/01.mp3">One</a>"#,
            r#"<a href="/game-soundtracks/album/x/02.mp3">Two</a>"#,
            r#"<a href="/game-soundtracks/album/x/02.mp3">get_app</a>"#,
        );
        let titles: Vec<_> = listed_tracks(page).into_iter().map(|l| l.title).collect();
        assert_eq!(titles, vec!["One", "Two"]);
    }

    #[test]
    fn repeated_targets_keep_the_first_link() {
        let page = concat!(
            r#"<a href="/game-soundtracks/album/x/01.mp3">One</a>"#,
            r#"<a href="/game-soundtracks/album/x/01.mp3">2:13</a>"#,
        );
        let titles: Vec<_> = listed_tracks(page).into_iter().map(|l| l.title).collect();
        assert_eq!(titles, vec!["One"]);
    }

    #[tokio::test]
    async fn extracts_full_album() {
        let files: Vec<_> = ROWS.iter().map(|(file, _)| *file).collect();
        let host = host_with_tracks(album_page(Some("Minecraft Soundtrack"), &ROWS), &files);
        let album = KhinsiderAlbumLE {}
            .extract_list(&host, &Url::parse(ALBUM_URL).unwrap())
            .await
            .expect("extraction");

        assert_eq!(album.id, "minecraft");
        assert_eq!(album.title, "Minecraft Soundtrack");
        assert_eq!(album.breed, ListBreed::Album);
        let titles: Vec<_> = album
            .entries
            .iter()
            .map(|e| e.title.clone().unwrap())
            .collect();
        assert_eq!(titles, vec!["Key", "Door", "Subwoofer Lullaby"]);
        assert!(album.entries.iter().all(|e| e.ext == "mp3"));
        assert_eq!(
            album.entries[0].url,
            "https://vgmsite.com/soundtracks/minecraft/01.%2520Key.mp3"
        );
        assert!(host.warnings().is_empty());
        // album page, then every track page once
        assert_eq!(host.requests().len(), 4);
    }

    #[tokio::test]
    async fn album_entries_use_own_track_slug_as_id() {
        // each entry is named after its own track page, not after the album
        let files: Vec<_> = ROWS.iter().map(|(file, _)| *file).collect();
        let host = host_with_tracks(album_page(None, &ROWS), &files);
        let album = KhinsiderAlbumLE {}
            .extract_list(&host, &Url::parse(ALBUM_URL).unwrap())
            .await
            .expect("extraction");
        let ids: Vec<_> = album.entries.iter().map(|e| e.id.as_str()).collect();
        assert_eq!(
            ids,
            vec![
                "01.%2520Key.mp3",
                "02.%2520Door.mp3",
                "03.%2520Subwoofer%2520Lullaby.mp3"
            ]
        );
    }

    #[tokio::test]
    async fn title_falls_back_to_slug() {
        let host = StubHost::new().with_page(ALBUM_URL, album_page(None, &[]));
        let album = KhinsiderAlbumLE {}
            .extract_list(&host, &Url::parse(ALBUM_URL).unwrap())
            .await
            .expect("extraction");
        assert_eq!(album.title, "Minecraft");
        assert!(album.entries.is_empty());
        assert!(host.warnings().is_empty());
    }

    #[tokio::test]
    async fn failing_track_is_left_out() {
        // no page for the second track
        let host = host_with_tracks(
            album_page(Some("Minecraft Soundtrack"), &ROWS),
            &[ROWS[0].0, ROWS[2].0],
        );
        let album = KhinsiderAlbumLE {}
            .extract_list(&host, &Url::parse(ALBUM_URL).unwrap())
            .await
            .expect("extraction");

        let titles: Vec<_> = album
            .entries
            .iter()
            .map(|e| e.title.clone().unwrap())
            .collect();
        assert_eq!(titles, vec!["Key", "Subwoofer Lullaby"]);
        let warnings = host.warnings();
        assert_eq!(warnings.len(), 1);
        assert!(warnings[0].starts_with("Error extracting Door: "));
        assert!(warnings[0].contains("HTTP 404"));
    }

    #[tokio::test]
    async fn track_without_player_is_left_out() {
        let files: Vec<_> = ROWS.iter().map(|(file, _)| *file).collect();
        let host = host_with_tracks(album_page(Some("Minecraft Soundtrack"), &ROWS), &files)
            .with_page(
                &format!("{TRACK_BASE}{}", ROWS[0].0),
                "<p>This track was removed.</p>",
            );
        let album = KhinsiderAlbumLE {}
            .extract_list(&host, &Url::parse(ALBUM_URL).unwrap())
            .await
            .expect("extraction");

        assert_eq!(album.entries.len(), 2);
        assert_eq!(album.entries[0].title.as_deref(), Some("Door"));
        assert_eq!(host.warnings(), vec!["Could not find MP3 URL for Key"]);
    }

    #[tokio::test]
    async fn unreachable_album_page_fails() {
        let host = StubHost::new();
        let err = KhinsiderAlbumLE {}
            .extract_list(&host, &Url::parse(ALBUM_URL).unwrap())
            .await
            .unwrap_err();
        assert!(matches!(err, ExtractionError::HttpStatus { status: 404, .. }));
    }

    #[tokio::test]
    #[ignore = "talks to downloads.khinsider.com"]
    async fn do_fetch_full_album() {
        let slug = "drawful-2-original-unofficial-soundtrack-family-computer-ios-linux-macos-ps4-gamerip-2016";
        let album = KhinsiderAlbumLE {}
            .extract_list(
                &ExtractionContext::new().expect("context"),
                &Url::parse(&format!(
                    "https://downloads.khinsider.com/game-soundtracks/album/{slug}"
                ))
                .unwrap(),
            )
            .await
            .expect("extraction");
        assert_eq!(album.id, slug);
        assert_eq!(album.title, "Drawful 2 Original Unofficial Soundtrack");
        assert!(album.entries.len() >= 13);
        assert!(album.entries.iter().all(|e| e.ext == "mp3"));
    }
}
