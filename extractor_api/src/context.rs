use std::env;
use std::time::Duration;

use async_trait::async_trait;
use reqwest::header::{self, HeaderMap, HeaderValue};
use sys_locale::get_locale;
use tracing::{debug, warn};
use url::Url;

use crate::error::{ExtractionError, Result};
use crate::host::Host;

pub const DEFAULT_USER_AGENT: &str =
    "Mozilla/5.0 (X11; Linux x86_64; rv:102.0) Gecko/20100101 Firefox/102.0";

fn system_locales() -> Vec<String> {
    let locale = get_locale()
        .filter(|l| l != "c" && l != "C")
        .unwrap_or_else(|| "en-US".to_string());
    with_language_fallback(locale)
}

/// `pl-PL` -> `[pl-PL, pl]`.
fn with_language_fallback(locale: String) -> Vec<String> {
    match locale.get(0..2) {
        Some(language) if locale.len() > 2 => {
            let language = language.to_string();
            vec![locale, language]
        }
        _ => vec![locale],
    }
}

/// Everything the HTTP side of [`ExtractionContext`] can be tuned with.
#[derive(SmartDefault, Clone, Debug)]
pub struct ContextConfig {
    #[default(_code = "DEFAULT_USER_AGENT.to_string()")]
    pub user_agent: String,
    /// Most preferred first, sent as `Accept-Language`.
    #[default(_code = "system_locales()")]
    pub locales: Vec<String>,
    pub proxy: Option<String>,
    pub accept_invalid_certs: bool,
    pub timeout: Option<Duration>,
}

impl ContextConfig {
    /// Defaults, plus the proxy from `http_proxy` if one is set.
    pub fn from_env() -> Self {
        let mut config = ContextConfig::default();
        if let Ok(proxy) = env::var("http_proxy") {
            // debugging proxies re-sign TLS with their own CA
            config.proxy = Some(proxy);
            config.accept_invalid_certs = true;
        }
        config
    }
}

/// The real [`Host`]: fetches pages over HTTP, reports warnings to the log.
#[derive(Clone)]
pub struct ExtractionContext {
    pub http: reqwest::Client,
    pub config: ContextConfig,
}

impl ExtractionContext {
    pub fn new() -> Result<ExtractionContext> {
        ExtractionContext::with_config(ContextConfig::from_env())
    }

    pub fn with_config(config: ContextConfig) -> Result<ExtractionContext> {
        Ok(ExtractionContext {
            http: build_http(&config)?,
            config,
        })
    }

    pub async fn get_body(&self, resource_name: &str, url: &Url) -> Result<String> {
        debug!(resource = resource_name, %url, "fetching");
        let response = self
            .http
            .get(url.clone())
            .send()
            .await
            .map_err(|e| fetch_error(url, e))?;

        let status = response.status();
        if !status.is_success() {
            return Err(ExtractionError::HttpStatus {
                url: url.to_string(),
                status: status.as_u16(),
            });
        }

        response.text().await.map_err(|e| fetch_error(url, e))
    }
}

fn fetch_error(url: &Url, e: reqwest::Error) -> ExtractionError {
    ExtractionError::Fetch {
        url: url.to_string(),
        source: Box::new(e),
    }
}

#[async_trait]
impl Host for ExtractionContext {
    async fn fetch(&self, resource_name: &str, url: &Url) -> Result<String> {
        self.get_body(resource_name, url).await
    }

    fn warn(&self, message: &str) {
        warn!("{message}");
    }
}

fn accept_language(locales: &[String]) -> String {
    locales
        .iter()
        .enumerate()
        .map(|(i, l)| {
            if i != 0 {
                format!("{l};q={}", 1.0 - (i as f32 / 10.0))
            } else {
                l.clone()
            }
        })
        .collect::<Vec<_>>()
        .join(",")
}

pub fn build_http(config: &ContextConfig) -> Result<reqwest::Client> {
    let mut headers = HeaderMap::new();
    // a locale that is not a valid header value is just not sent
    if let Ok(value) = HeaderValue::from_str(&accept_language(&config.locales)) {
        headers.insert(header::ACCEPT_LANGUAGE, value);
    }

    let mut builder = reqwest::ClientBuilder::new()
        .user_agent(config.user_agent.as_str())
        .default_headers(headers);

    if let Some(proxy) = &config.proxy {
        builder = builder.proxy(reqwest::Proxy::all(proxy).map_err(ExtractionError::Client)?);
    }
    if config.accept_invalid_certs {
        builder = builder.danger_accept_invalid_certs(true);
    }
    if let Some(timeout) = config.timeout {
        builder = builder.timeout(timeout);
    }

    builder.build().map_err(ExtractionError::Client)
}
