use reqwest::header::InvalidHeaderValue;

pub type Result<T> = std::result::Result<T, Error>;

/// Failures surfaced by the marketplace client. None of them are retried.
#[derive(thiserror::Error, Debug)]
pub enum Error {
    /// The request could not be built, usually a malformed `base_url`.
    #[error("invalid request to {url}: {source}")]
    Request {
        url: String,
        #[source]
        source: reqwest::Error,
    },
    /// The request never produced a response (connection, DNS, TLS, timeout).
    #[error("request to {url} failed: {source}")]
    Transport {
        url: String,
        #[source]
        source: reqwest::Error,
    },
    #[error("failed to read response body from {url}: {source}")]
    Body {
        url: String,
        #[source]
        source: reqwest::Error,
    },
    /// The body was read but is not the expected JSON document. The body is
    /// kept for inspection but left out of the message, it may carry a token.
    #[error("failed to decode response from {url}: {source}")]
    Decode {
        url: String,
        body: String,
        #[source]
        source: serde_json::Error,
    },
    #[error("invalid header value: {0}")]
    Header(#[from] InvalidHeaderValue),
}
