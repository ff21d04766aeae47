use std::{
    io::ErrorKind,
    path::{Component, Path, PathBuf},
};

use async_trait::async_trait;
use tracing::debug;

use crate::application::repos::{ContentStore, FetchError};

/// Content store rooted at a local directory.
#[derive(Debug, Clone)]
pub struct FsContentStore {
    root: PathBuf,
}

impl FsContentStore {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// Resolve a relative resource path under the root. Absolute paths and
    /// parent-directory components are rejected.
    fn resolve(&self, path: &str) -> Result<PathBuf, FetchError> {
        let relative = Path::new(path);
        let escapes = relative.components().any(|component| {
            !matches!(component, Component::Normal(_) | Component::CurDir)
        });
        if path.is_empty() || escapes {
            return Err(FetchError::failed(path, "path escapes the content root"));
        }
        Ok(self.root.join(relative))
    }
}

#[async_trait]
impl ContentStore for FsContentStore {
    async fn fetch_text(&self, path: &str) -> Result<String, FetchError> {
        let full = self.resolve(path)?;
        debug!(
            target = "infra::fs_store",
            path = %full.display(),
            "reading content file"
        );
        tokio::fs::read_to_string(&full)
            .await
            .map_err(|err| match err.kind() {
                ErrorKind::NotFound => FetchError::not_found(path),
                _ => FetchError::failed(path, err),
            })
    }
}
