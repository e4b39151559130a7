//! Error types for the API clients and series builders

use thiserror::Error;

#[derive(Error, Debug)]
pub enum ScreenerError {
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("{endpoint} returned {status}: {body}")]
    Status {
        endpoint: &'static str,
        status: u16,
        body: String,
    },

    #[error("Invalid URL: {0}")]
    InvalidUrl(String),

    #[error("GraphQL errors: {0}")]
    GraphQl(String),

    #[error("Decode error: {0}")]
    Decode(String),

    #[error("Indicator error: {0}")]
    Indicator(String),
}

pub type ScreenerResult<T> = Result<T, ScreenerError>;

impl From<serde_json::Error> for ScreenerError {
    fn from(err: serde_json::Error) -> Self {
        Self::Decode(err.to_string())
    }
}
