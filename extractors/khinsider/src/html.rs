use nipper::Document;
use once_cell::sync::Lazy;
use regex::Regex;

pub const MP3_URL: &str = "MP3 URL";

static AUDIO_SRC: Lazy<Regex> = Lazy::new(|| Regex::new(r#"<audio.*?src="([^"]+)""#).unwrap());
static SONG_NAME: Lazy<Regex> = Lazy::new(|| Regex::new(r"Song name:\s*(.*)").unwrap());
static ALBUM_HEADING: Lazy<Regex> = Lazy::new(|| Regex::new(r"<h2>(.+?)</h2>").unwrap());
static TRACK_ANCHOR: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r#"<a href="(/game-soundtracks/album/[^"]+)">(.+?)</a>"#).unwrap()
});

static LINE_BREAK: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)\s*<\s*br\s*/?\s*>\s*").unwrap());
static PARAGRAPH_BREAK: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)<\s*/\s*p\s*>\s*<\s*p[^>]*>").unwrap());

/// A link from an album page to one of its track pages.
#[derive(PartialEq, Eq, Clone, Debug)]
pub struct TrackLink {
    /// Site-relative, as written in the `href`.
    pub path: String,
    pub title: String,
}

/// Turns an HTML fragment into the plain text a reader would see:
/// tags dropped, entities decoded, newlines turned into spaces, `<br>` kept as a newline.
// must stay a non-async function for nipper reasons
pub fn clean_html(fragment: &str) -> String {
    let text = fragment.replace('\n', " ");
    let text = LINE_BREAK.replace_all(&text, "\n");
    let text = PARAGRAPH_BREAK.replace_all(&text, "\n").into_owned();
    Document::from(text.as_str())
        .select("body")
        .text()
        .trim()
        .to_string()
}

/// First capture group of `regex` in `page`, cleaned; empty counts as not found.
fn search(regex: &Regex, page: &str) -> Option<String> {
    regex
        .captures(page)
        .and_then(|c| c.get(1))
        .map(|m| clean_html(m.as_str()))
        .filter(|s| !s.is_empty())
}

pub fn search_audio_url(page: &str) -> Option<String> {
    search(&AUDIO_SRC, page)
}

pub fn search_song_name(page: &str) -> Option<String> {
    search(&SONG_NAME, page)
}

pub fn search_album_title(page: &str) -> Option<String> {
    search(&ALBUM_HEADING, page)
}

/// Every track link on the page, in page order, duplicates included.
pub fn track_links(page: &str) -> Vec<TrackLink> {
    TRACK_ANCHOR
        .captures_iter(page)
        .map(|c| TrackLink {
            path: c[1].to_string(),
            title: clean_html(&c[2]),
        })
        .collect()
}
