//! Idempotent resource acquisition.
//!
//! Repeated or concurrent requests for the same resource path share a single
//! fetch and observe the same outcome, success or failure.

use std::sync::Arc;

use async_trait::async_trait;
use dashmap::DashMap;
use tokio::sync::OnceCell;
use tracing::debug;

use crate::application::repos::{ContentStore, FetchError};

type Outcome = Result<String, FetchError>;

pub struct ResourceCache {
    inner: Arc<dyn ContentStore>,
    entries: DashMap<String, Arc<OnceCell<Outcome>>>,
}

impl ResourceCache {
    pub fn new(inner: Arc<dyn ContentStore>) -> Self {
        Self {
            inner,
            entries: DashMap::new(),
        }
    }

    /// Number of distinct resources requested so far.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    fn cell(&self, path: &str) -> Arc<OnceCell<Outcome>> {
        // The map guard is dropped before any await.
        self.entries
            .entry(path.to_string())
            .or_insert_with(|| Arc::new(OnceCell::new()))
            .clone()
    }
}

#[async_trait]
impl ContentStore for ResourceCache {
    async fn fetch_text(&self, path: &str) -> Result<String, FetchError> {
        let cell = self.cell(path);
        cell.get_or_init(|| async {
            metrics::counter!("vitae_resource_fetch_total").increment(1);
            debug!(target = "infra::resources", path, "fetching resource");
            self.inner.fetch_text(path).await
        })
        .await
        .clone()
    }
}

#[cfg(test)]
mod tests {
    use std::sync::atomic::{AtomicUsize, Ordering};

    use super::*;

    #[derive(Default)]
    struct CountingStore {
        calls: AtomicUsize,
    }

    #[async_trait]
    impl ContentStore for CountingStore {
        async fn fetch_text(&self, path: &str) -> Result<String, FetchError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            tokio::task::yield_now().await;
            if path.ends_with(".md") {
                Ok(format!("body of {path}"))
            } else {
                Err(FetchError::not_found(path))
            }
        }
    }

    #[tokio::test]
    async fn repeated_requests_fetch_once() {
        let store = Arc::new(CountingStore::default());
        let cache = ResourceCache::new(store.clone());

        let first = cache.fetch_text("content.md").await;
        let second = cache.fetch_text("content.md").await;

        assert_eq!(first, Ok("body of content.md".to_string()));
        assert_eq!(first, second);
        assert_eq!(store.calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn failures_are_cached_too() {
        let store = Arc::new(CountingStore::default());
        let cache = ResourceCache::new(store.clone());

        assert!(cache.fetch_text("pubs.json").await.is_err());
        assert!(cache.fetch_text("pubs.json").await.is_err());
        assert_eq!(store.calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn concurrent_requests_share_one_fetch() {
        let store = Arc::new(CountingStore::default());
        let cache = Arc::new(ResourceCache::new(store.clone()));

        let handles = (0..8)
            .map(|_| {
                let cache = Arc::clone(&cache);
                tokio::spawn(async move { cache.fetch_text("posts/a.md").await })
            })
            .collect::<Vec<_>>();
        for handle in handles {
            assert_eq!(
                handle.await.expect("task joins"),
                Ok("body of posts/a.md".to_string())
            );
        }

        assert_eq!(store.calls.load(Ordering::SeqCst), 1);
        assert_eq!(cache.len(), 1);
    }

    #[tokio::test]
    async fn distinct_paths_are_fetched_separately() {
        let store = Arc::new(CountingStore::default());
        let cache = ResourceCache::new(store.clone());

        let _ = cache.fetch_text("a.md").await;
        let _ = cache.fetch_text("b.md").await;
        assert_eq!(store.calls.load(Ordering::SeqCst), 2);
    }
}
