use async_trait::async_trait;
use url::Url;

use crate::error::Result;

#[async_trait]
/// What the extractors need from whoever runs them.
///
/// Transport concerns (headers, redirects, proxies, HTTP errors) all live
/// behind `fetch`, so extraction logic works on page text only and can be
/// driven by [`StubHost`](super::StubHost) in tests.
pub trait Host: Send + Sync {
    /// Fetches `url` and returns the body as text.
    /// `resource_name` says what is being downloaded, for the logs.
    async fn fetch(&self, resource_name: &str, url: &Url) -> Result<String>;

    /// Reports a problem that did not stop the extraction.
    fn warn(&self, message: &str);
}
