//! Upstream fetch result

use reqwest::StatusCode;

/// Result of a single GET against the upstream resource
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FetchOutcome {
    pub status: StatusCode,
    /// Only present when the upstream answered 200
    pub body: Option<String>,
}

impl FetchOutcome {
    pub fn ok(body: String) -> Self {
        Self {
            status: StatusCode::OK,
            body: Some(body),
        }
    }

    pub fn failed(status: StatusCode) -> Self {
        Self { status, body: None }
    }

    /// True when the upstream answered 200 with a non-empty body
    pub fn has_content(&self) -> bool {
        self.status == StatusCode::OK && self.body.as_deref().is_some_and(|b| !b.is_empty())
    }
}
