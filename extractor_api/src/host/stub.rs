use std::collections::HashMap;
use std::sync::{Mutex, PoisonError};

use async_trait::async_trait;
use url::Url;

use super::api::Host;
use crate::error::{ExtractionError, Result};

/// A [`Host`] serving canned pages. Unknown URLs answer with HTTP 404.
#[derive(Default)]
pub struct StubHost {
    pages: HashMap<String, String>,
    requests: Mutex<Vec<String>>,
    warnings: Mutex<Vec<String>>,
}

impl StubHost {
    pub fn new() -> Self {
        StubHost::default()
    }

    pub fn with_page<B>(mut self, url: &str, body: B) -> Self
    where
        B: Into<String>,
    {
        let key = Url::parse(url)
            .map(String::from)
            .unwrap_or_else(|_| url.to_string());
        self.pages.insert(key, body.into());
        self
    }

    /// URLs fetched so far, in order.
    pub fn requests(&self) -> Vec<String> {
        self.requests
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    pub fn warnings(&self) -> Vec<String> {
        self.warnings
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }
}

#[async_trait]
impl Host for StubHost {
    async fn fetch(&self, _resource_name: &str, url: &Url) -> Result<String> {
        self.requests
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(url.to_string());
        self.pages
            .get(url.as_str())
            .cloned()
            .ok_or_else(|| ExtractionError::HttpStatus {
                url: url.to_string(),
                status: 404,
            })
    }

    fn warn(&self, message: &str) {
        tracing::warn!("{message}");
        self.warnings
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(message.to_string());
    }
}
