use thiserror::Error;

use crate::config::ConfigError;
use crate::domain::ApiError;

#[derive(Error, Debug)]
pub enum MindstreamError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Invalid URL: {0}")]
    InvalidUrl(#[from] url::ParseError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("API error: {0}")]
    Api(#[from] ApiError),

    #[error("Not logged in, run `mindstream login` first")]
    NotAuthenticated,

    #[error("Source not found: {0}")]
    SourceNotFound(String),

    #[error("Feed not found: {0}")]
    FeedNotFound(String),
}

impl From<ConfigError> for MindstreamError {
    fn from(e: ConfigError) -> Self {
        MindstreamError::Config(e.to_string())
    }
}

pub type Result<T> = std::result::Result<T, MindstreamError>;
