use once_cell::sync::Lazy;
use ripvgm_extractor_api::url::Url;
use ripvgm_extractor_api::Result;

pub const KHINSIDER_HOST: &str = "downloads.khinsider.com";

static KHINSIDER_BASE_URL: Lazy<Url> =
    Lazy::new(|| Url::parse("https://downloads.khinsider.com/").unwrap());

/// Path segments after `/game-soundtracks/album/`, if this is a soundtrack URL at all.
fn _album_segments(url: &Url) -> Option<Vec<&str>> {
    if !matches!(url.scheme(), "http" | "https") || url.host_str() != Some(KHINSIDER_HOST) {
        return None;
    }
    let mut segments: Vec<&str> = url.path_segments()?.collect();
    if segments.last() == Some(&"") {
        segments.pop();
    }
    match segments.as_slice() {
        ["game-soundtracks", "album", rest @ ..] => Some(rest.to_vec()),
        _ => None,
    }
}

fn _is_slug(s: &str) -> bool {
    !s.is_empty() && s.chars().all(|c| c.is_alphanumeric() || c == '_' || c == '-')
}

/// Only the start is constrained; file names carry `-`, `(`, `'` and the like.
fn _is_track_path(s: &str) -> bool {
    s.chars()
        .next()
        .map_or(false, |c| c.is_alphanumeric() || c == '_' || c == '.' || c == '%')
}

/// Album slug of an album page URL.
pub fn match_album_id(url: &Url) -> Option<&str> {
    match _album_segments(url)?.as_slice() {
        [slug] if _is_slug(slug) => Some(*slug),
        _ => None,
    }
}

/// Last path segment of a track page URL, still percent-encoded.
pub fn match_track_id(url: &Url) -> Option<&str> {
    match _album_segments(url)?.as_slice() {
        [slug, track] if !slug.is_empty() && _is_track_path(track) => Some(*track),
        _ => None,
    }
}

/// Absolute URL for a site-relative track link.
pub fn track_url(path: &str) -> Result<Url> {
    Ok(KHINSIDER_BASE_URL.join(path)?)
}

pub fn last_segment(path: &str) -> &str {
    let path = path.trim_end_matches('/');
    path.rsplit('/').next().unwrap_or(path)
}

/// `persona-5-royal` -> `Persona 5 Royal`. Every run of letters gets a
/// capital first letter and lower-case rest, so `5th` becomes `5Th`.
pub fn title_from_slug(slug: &str) -> String {
    let mut title = String::with_capacity(slug.len());
    let mut in_word = false;
    for c in slug.chars() {
        if c == '-' {
            title.push(' ');
            in_word = false;
        } else if c.is_alphabetic() {
            if in_word {
                title.extend(c.to_lowercase());
            } else {
                title.extend(c.to_uppercase());
            }
            in_word = true;
        } else {
            title.push(c);
            in_word = false;
        }
    }
    title
}
