//! Error types for the upstream client

use std::fmt;

#[derive(Debug)]
pub enum UpstreamError {
    Http(Box<reqwest::Error>),
    InvalidUrl(String),
}

impl fmt::Display for UpstreamError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            UpstreamError::Http(err) => write!(f, "HTTP error: {}", err),
            UpstreamError::InvalidUrl(msg) => write!(f, "Invalid upstream URL: {}", msg),
        }
    }
}

impl std::error::Error for UpstreamError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            UpstreamError::Http(err) => Some(err.as_ref()),
            _ => None,
        }
    }
}

impl From<reqwest::Error> for UpstreamError {
    fn from(err: reqwest::Error) -> Self {
        UpstreamError::Http(Box::new(err))
    }
}

impl From<url::ParseError> for UpstreamError {
    fn from(err: url::ParseError) -> Self {
        UpstreamError::InvalidUrl(err.to_string())
    }
}

pub type Result<T> = std::result::Result<T, UpstreamError>;
