use ripvgm_extractor_api::url::Url;
use ripvgm_extractor_api::{
    async_trait, Extraction, ExtractionError, Host, NewExtractor, RecordingExtractor, Result,
    URLMatcher,
};
use tracing::debug;

use crate::common::match_track_id;
use crate::html::{search_audio_url, search_song_name, MP3_URL};

pub struct KhinsiderTrackRE {}

impl NewExtractor for KhinsiderTrackRE {
    fn new() -> Self {
        KhinsiderTrackRE {}
    }
}

impl URLMatcher for KhinsiderTrackRE {
    fn name(&self) -> &'static str {
        "khinsider:track"
    }

    fn description(&self) -> &'static str {
        "KHInsider game soundtrack track, as MP3"
    }

    fn match_extractor(&self, url: &Url) -> bool {
        match_track_id(url).is_some()
    }
}

#[async_trait]
impl RecordingExtractor for KhinsiderTrackRE {
    async fn extract_recording(&self, ctx: &dyn Host, url: &Url) -> Result<Extraction> {
        let id = match_track_id(url)
            .ok_or_else(|| ExtractionError::UnsupportedUrl(url.to_string()))?
            .to_string();
        let webpage = ctx.fetch(&id, url).await?;

        let title = search_song_name(&webpage);
        let audio = search_audio_url(&webpage).ok_or(ExtractionError::MissingField(MP3_URL))?;
        debug!(%id, ?title, %audio, "extracted track");

        Ok(Extraction::mp3(id, title, audio))
    }
}
