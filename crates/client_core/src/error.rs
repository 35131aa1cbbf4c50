use std::time::Duration;

use reqwest::StatusCode;
use shared::error::{ApiError, ErrorCode};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum SearchError {
    #[error("user search rate limited (HTTP {status})")]
    RateLimited { status: StatusCode },
    #[error("user search returned unexpected HTTP {status}")]
    UnexpectedStatus { status: StatusCode },
    #[error("user search transport failure: {0}")]
    Transport(#[from] reqwest::Error),
    #[error("user search timed out after {0:?}")]
    Timeout(Duration),
    #[error("malformed user search response: {0}")]
    Malformed(#[from] serde_json::Error),
}

impl SearchError {
    pub fn code(&self) -> ErrorCode {
        match self {
            SearchError::RateLimited { .. } => ErrorCode::RateLimited,
            SearchError::UnexpectedStatus { .. } => ErrorCode::UnexpectedStatus,
            SearchError::Transport(_) => ErrorCode::Transport,
            SearchError::Timeout(_) => ErrorCode::Timeout,
            SearchError::Malformed(_) => ErrorCode::Malformed,
        }
    }
}

impl From<SearchError> for ApiError {
    fn from(value: SearchError) -> Self {
        ApiError::new(value.code(), value.to_string())
    }
}

#[derive(Debug, Error)]
pub enum SettingsError {
    #[error("failed to read settings file '{path}': {source}")]
    Read {
        path: String,
        source: std::io::Error,
    },
    #[error("failed to parse settings file '{path}': {source}")]
    Parse {
        path: String,
        source: toml::de::Error,
    },
    #[error("invalid search endpoint '{endpoint}': {source}")]
    InvalidEndpoint {
        endpoint: String,
        source: url::ParseError,
    },
    #[error("invalid value for {name}: '{value}'")]
    InvalidValue { name: &'static str, value: String },
}
