#[macro_use]
extern crate smart_default;

mod context;
mod error;
pub mod host;

pub use context::{build_http, ContextConfig, ExtractionContext, DEFAULT_USER_AGENT};
pub use error::{ExtractionError, Result};
pub use host::{Host, StubHost};

pub use async_trait::async_trait;
pub use reqwest;
pub use url;

use serde::Serialize;
use url::Url;

/// File extension of every format the supported sites serve.
pub const MP3_EXT: &str = "mp3";

pub trait NewExtractor {
    fn new() -> Self;
}

pub trait URLMatcher {
    /// Stable machine-readable name, like `khinsider:album`.
    fn name(&self) -> &'static str;

    fn description(&self) -> &'static str;

    fn match_extractor(&self, url: &Url) -> bool;
}

#[async_trait]
pub trait RecordingExtractor: URLMatcher + Sync + Send {
    async fn extract_recording(&self, ctx: &dyn Host, url: &Url) -> Result<Extraction>;
}

#[async_trait]
pub trait ListExtractor: URLMatcher + Sync + Send {
    /// Extracts something that is a list from the service, with all of its entries.
    /// Entries that fail on their own are reported through [`Host::warn`] and left out.
    async fn extract_list(&self, ctx: &dyn Host, url: &Url) -> Result<ListExtraction>;
}

/// A single downloadable recording.
///
/// Serializes to the `id`/`title`/`url`/`ext` mapping the downloader consumes.
#[derive(Serialize, PartialEq, Eq, Clone, Debug)]
pub struct Extraction {
    pub id: String,
    pub title: Option<String>,
    /// Media URL, exactly as found on the page.
    pub url: String,
    pub ext: String,
}

impl Extraction {
    pub fn mp3<I, U>(id: I, title: Option<String>, url: U) -> Self
    where
        I: Into<String>,
        U: Into<String>,
    {
        Extraction {
            id: id.into(),
            title,
            url: url.into(),
            ext: MP3_EXT.to_string(),
        }
    }
}

#[derive(Serialize, SmartDefault, PartialEq, Eq, Clone, Copy, Debug)]
#[serde(rename_all = "lowercase")]
pub enum ListBreed {
    /// User-defined set of music
    #[default]
    Playlist,
    /// An album, as defined by publisher
    Album,
}

/// What the list extractor spits out at you.
#[derive(Serialize, Default, PartialEq, Clone, Debug)]
pub struct ListExtraction {
    pub id: String,
    pub breed: ListBreed,
    pub title: String,
    pub entries: Vec<Extraction>,
}

#[derive(Serialize, PartialEq, Clone, Debug)]
#[serde(tag = "_type")]
pub enum AnyExtraction {
    #[serde(rename = "recording")]
    Recording(Extraction),
    #[serde(rename = "playlist")]
    List(ListExtraction),
}

pub enum AnyExtractor {
    Recording(Box<dyn RecordingExtractor>),
    List(Box<dyn ListExtractor>),
}

impl AnyExtractor {
    pub async fn extract_info(&self, ctx: &dyn Host, url: &Url) -> Result<AnyExtraction> {
        match self {
            AnyExtractor::Recording(re) => re
                .extract_recording(ctx, url)
                .await
                .map(AnyExtraction::Recording),
            AnyExtractor::List(le) => le.extract_list(ctx, url).await.map(AnyExtraction::List),
        }
    }

    pub fn match_extractor(&self, url: &Url) -> bool {
        match self {
            AnyExtractor::Recording(re) => re.match_extractor(url),
            AnyExtractor::List(le) => le.match_extractor(url),
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            AnyExtractor::Recording(re) => re.name(),
            AnyExtractor::List(le) => le.name(),
        }
    }

    pub fn description(&self) -> &'static str {
        match self {
            AnyExtractor::Recording(re) => re.description(),
            AnyExtractor::List(le) => le.description(),
        }
    }
}
