use once_cell::sync::Lazy;
pub use ripvgm_extractor_api::*;
use ripvgm_extractor_api::url::Url;
use tracing::debug;

pub static DEFAULT_EXTRACTOR_LIST: Lazy<Vec<&AnyExtractor>> = Lazy::new(|| {
    let l = vec![].into_iter();

    #[cfg(feature = "khinsider")]
    let l = l.chain(ripvgm_extractor_khinsider::EXTRACTORS.iter());

    l.collect()
});

pub struct CoreClient<'a> {
    extractors: Vec<&'a AnyExtractor>,
    host: Box<dyn Host>,
}

impl CoreClient<'static> {
    /// Client fetching over HTTP, configured from the environment.
    pub fn new() -> Result<Self> {
        Ok(CoreClient::with_host(ExtractionContext::new()?))
    }

    pub fn with_host<H>(host: H) -> Self
    where
        H: Host + 'static,
    {
        CoreClient {
            extractors: DEFAULT_EXTRACTOR_LIST.to_vec(),
            host: Box::new(host),
        }
    }
}

impl<'a> CoreClient<'a> {
    pub fn find_extractor(&self, url: &Url) -> Option<&'a AnyExtractor> {
        self.extractors
            .iter()
            .copied()
            .find(|extractor| extractor.match_extractor(url))
    }

    /// Runs the first extractor that takes `url`; `Ok(None)` if none does.
    pub async fn extract_url(&self, url: &Url) -> Result<Option<AnyExtraction>> {
        match self.find_extractor(url) {
            Some(extractor) => {
                debug!(extractor = extractor.name(), %url, "extracting");
                extractor
                    .extract_info(self.host.as_ref(), url)
                    .await
                    .map(Option::Some)
            }
            None => Ok(None),
        }
    }
}
