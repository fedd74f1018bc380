use thiserror::Error;

pub type Result<T, E = ExtractionError> = std::result::Result<T, E>;

#[derive(Error, Debug)]
pub enum ExtractionError {
    /// A field the result cannot do without is not on the page.
    #[error("Could not find {0}")]
    MissingField(&'static str),

    #[error("unable to download {url}: {source}")]
    Fetch {
        url: String,
        #[source]
        source: Box<dyn std::error::Error + Send + Sync>,
    },

    #[error("{url} responded with HTTP {status}")]
    HttpStatus { url: String, status: u16 },

    #[error("unsupported URL: {0}")]
    UnsupportedUrl(String),

    #[error(transparent)]
    InvalidUrl(#[from] url::ParseError),

    #[error("unable to set up the HTTP client: {0}")]
    Client(#[source] reqwest::Error),
}
