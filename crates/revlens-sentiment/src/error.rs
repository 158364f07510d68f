use thiserror::Error;

#[derive(Debug, Error)]
pub enum SentimentError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("{provider} returned status {status}")]
    UnexpectedStatus { provider: &'static str, status: u16 },

    #[error("{provider} response decode error: {source}")]
    Decode {
        provider: &'static str,
        #[source]
        source: serde_json::Error,
    },

    #[error("invalid {provider} endpoint \"{url}\": {reason}")]
    InvalidEndpoint {
        provider: &'static str,
        url: String,
        reason: String,
    },

    #[error("review source error: {0}")]
    ReviewSource(String),
}
