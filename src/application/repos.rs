//! Content store trait describing where raw site resources come from.

use async_trait::async_trait;
use thiserror::Error;

/// Failure to retrieve a raw resource. `NotFound` is kept apart so callers can
/// treat a missing optional file differently from a broken one.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum FetchError {
    #[error("resource `{path}` not found")]
    NotFound { path: String },
    #[error("failed to fetch `{path}`: {message}")]
    Failed { path: String, message: String },
}

impl FetchError {
    pub fn not_found(path: impl Into<String>) -> Self {
        Self::NotFound { path: path.into() }
    }

    pub fn failed(path: impl Into<String>, err: impl std::fmt::Display) -> Self {
        Self::Failed {
            path: path.into(),
            message: err.to_string(),
        }
    }
}

/// Read-only access to raw text resources addressed by a relative path.
#[async_trait]
pub trait ContentStore: Send + Sync {
    async fn fetch_text(&self, path: &str) -> Result<String, FetchError>;
}
