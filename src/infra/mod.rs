//! Infrastructure adapters and runtime bootstrap.

pub mod error;
pub mod fs_store;
pub mod http_store;
pub mod resources;
pub mod telemetry;

use std::sync::Arc;

use crate::application::repos::ContentStore;
use crate::config::{ContentLocation, ContentSettings};

use error::InfraError;
use fs_store::FsContentStore;
use http_store::HttpContentStore;
use resources::ResourceCache;

/// Build the content store for the configured location, wrapped in a
/// [`ResourceCache`] so each resource is fetched at most once per run.
pub fn content_store(settings: &ContentSettings) -> Result<Arc<ResourceCache>, InfraError> {
    let inner: Arc<dyn ContentStore> = match &settings.location {
        ContentLocation::Dir(dir) => Arc::new(FsContentStore::new(dir.clone())),
        ContentLocation::Url(base) => Arc::new(HttpContentStore::new(base.clone())?),
    };
    Ok(Arc::new(ResourceCache::new(inner)))
}
