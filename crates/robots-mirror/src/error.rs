//! Error types for the robots mirror

use crate::types::ErrorResponse;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Json, Response};
use std::fmt;

pub const FETCH_FAILED_DETAIL: &str = "Failed to fetch robots.txt";

#[derive(Debug)]
pub enum MirrorError {
    Upstream(robots_upstream::UpstreamError),
    Io(Box<std::io::Error>),
    Config(String),
}

impl fmt::Display for MirrorError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MirrorError::Upstream(err) => write!(f, "Upstream error: {}", err),
            MirrorError::Io(err) => write!(f, "IO error: {}", err),
            MirrorError::Config(msg) => write!(f, "Configuration error: {}", msg),
        }
    }
}

impl std::error::Error for MirrorError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            MirrorError::Upstream(err) => Some(err),
            MirrorError::Io(err) => Some(err.as_ref()),
            _ => None,
        }
    }
}

impl From<robots_upstream::UpstreamError> for MirrorError {
    fn from(err: robots_upstream::UpstreamError) -> Self {
        MirrorError::Upstream(err)
    }
}

impl From<std::io::Error> for MirrorError {
    fn from(err: std::io::Error) -> Self {
        MirrorError::Io(Box::new(err))
    }
}

impl From<tracing_subscriber::filter::ParseError> for MirrorError {
    fn from(err: tracing_subscriber::filter::ParseError) -> Self {
        MirrorError::Config(err.to_string())
    }
}

pub type Result<T> = std::result::Result<T, MirrorError>;

/// Failure to produce robots.txt for a client, rendered as an HTTP error
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ServeError {
    /// Upstream gave no usable content; its status is echoed back as-is,
    /// including a 200 with an empty body
    Upstream(StatusCode),
    /// Upstream unreachable, so there is no status to echo
    BadGateway,
}

impl ServeError {
    pub fn status(&self) -> StatusCode {
        match self {
            ServeError::Upstream(status) => *status,
            ServeError::BadGateway => StatusCode::BAD_GATEWAY,
        }
    }
}

impl fmt::Display for ServeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ServeError::Upstream(status) => write!(f, "Upstream returned {}", status),
            ServeError::BadGateway => write!(f, "Upstream unreachable"),
        }
    }
}

impl std::error::Error for ServeError {}

impl IntoResponse for ServeError {
    fn into_response(self) -> Response {
        (
            self.status(),
            Json(ErrorResponse {
                detail: FETCH_FAILED_DETAIL.to_string(),
            }),
        )
            .into_response()
    }
}
