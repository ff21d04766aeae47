use async_trait::async_trait;
use reqwest::{Client, StatusCode, Url, header};
use tracing::debug;

use crate::application::repos::{ContentStore, FetchError};

use super::error::InfraError;

/// Content store that fetches resources relative to a base URL.
#[derive(Debug, Clone)]
pub struct HttpContentStore {
    client: Client,
    base: Url,
}

impl HttpContentStore {
    pub fn new(base: Url) -> Result<Self, InfraError> {
        let client = Client::builder()
            .user_agent(Self::user_agent())
            .build()
            .map_err(|err| InfraError::http(err.to_string()))?;
        Ok(Self {
            client,
            base: normalize_base(base),
        })
    }

    pub fn user_agent() -> &'static str {
        concat!("vitae/", env!("CARGO_PKG_VERSION"))
    }

    pub fn base(&self) -> &Url {
        &self.base
    }

    /// Resolve a relative resource path below the base. Paths that would leave
    /// the base (parent segments, absolute URLs) are rejected.
    pub fn url(&self, path: &str) -> Result<Url, FetchError> {
        let relative = path.trim_start_matches('/');
        if relative.is_empty() {
            return Err(FetchError::failed(path, "empty resource path"));
        }
        let url = self
            .base
            .join(relative)
            .map_err(|err| FetchError::failed(path, err))?;
        if !url.as_str().starts_with(self.base.as_str()) {
            return Err(FetchError::failed(path, "path escapes the content base"));
        }
        Ok(url)
    }
}

/// Ensure the base ends with `/` so joins stay below it.
fn normalize_base(mut base: Url) -> Url {
    if !base.path().ends_with('/') {
        let path = format!("{}/", base.path());
        base.set_path(&path);
    }
    base
}

#[async_trait]
impl ContentStore for HttpContentStore {
    async fn fetch_text(&self, path: &str) -> Result<String, FetchError> {
        let url = self.url(path)?;
        debug!(target = "infra::http_store", %url, "fetching content");

        let response = self
            .client
            .get(url)
            .header(header::CACHE_CONTROL, "no-cache")
            .send()
            .await
            .map_err(|err| FetchError::failed(path, err))?;

        match response.status() {
            StatusCode::NOT_FOUND => Err(FetchError::not_found(path)),
            status if status.is_success() => response
                .text()
                .await
                .map_err(|err| FetchError::failed(path, err)),
            status => Err(FetchError::failed(path, format!("status {status}"))),
        }
    }
}
