use thiserror::Error;

#[derive(Error, Debug)]
pub enum FetchError {
    #[error("Invalid URL: {0}")]
    InvalidUrl(String),

    #[error("HTTP request failed: {0}")]
    RequestFailed(#[from] reqwest::Error),

    #[error("HTTP {status} from source")]
    Status { status: u16 },

    #[error("Invalid response encoding: {0}")]
    InvalidEncoding(String),
}

#[derive(Error, Debug)]
pub enum AiError {
    #[error("API request failed: {0}")]
    RequestFailed(String),

    #[error("API returned error: {status} - {body}")]
    Api { status: u16, body: String },

    #[error("Failed to parse response: {0}")]
    ParseError(String),
}

/// Error surface shared by the two relay functions.
#[derive(Error, Debug)]
pub enum RelayError {
    /// A required input was missing or empty. The message is the
    /// client-facing error string.
    #[error("{0}")]
    InvalidInput(&'static str),

    #[error("Failed to fetch {url}: {source}")]
    SourceFetch { url: String, source: FetchError },

    #[error(transparent)]
    Gateway(#[from] AiError),

    #[error("Failed to parse model response: {0}")]
    MalformedResponse(String),
}
