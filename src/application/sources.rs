//! Structured data sources tried as an ordered strategy chain.
//!
//! A site resource such as the publication list may exist as JSON or YAML. Each
//! candidate is a [`SourceDescriptor`]; the [`SourceChain`] tries them in order and
//! the first candidate that both fetches and decodes wins.

use std::{collections::HashMap, fmt, sync::Arc};

use async_trait::async_trait;
use serde_json::Value;
use thiserror::Error;
use tracing::{debug, warn};

use crate::application::repos::{ContentStore, FetchError};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DataFormat {
    Json,
    Yaml,
}

impl DataFormat {
    /// Infer the format from a file extension.
    pub fn from_path(path: &str) -> Option<Self> {
        let (_, extension) = path.rsplit_once('.')?;
        match extension.to_ascii_lowercase().as_str() {
            "json" => Some(Self::Json),
            "yaml" | "yml" => Some(Self::Yaml),
            _ => None,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Json => "json",
            Self::Yaml => "yaml",
        }
    }
}

impl fmt::Display for DataFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceDescriptor {
    pub path: String,
    pub format: DataFormat,
}

impl SourceDescriptor {
    /// Build a descriptor from a path whose extension names the format.
    pub fn from_path(path: impl Into<String>) -> Option<Self> {
        let path = path.into();
        let format = DataFormat::from_path(&path)?;
        Some(Self { path, format })
    }
}

#[derive(Debug, Error)]
pub enum SourceError {
    #[error("source `{path}` not found")]
    NotFound { path: String },
    #[error(transparent)]
    Fetch(FetchError),
    #[error("failed to parse `{path}` as {format}: {message}")]
    Parse {
        path: String,
        format: DataFormat,
        message: String,
    },
    #[error("no parser available for {format} source `{path}`")]
    NoParser { path: String, format: DataFormat },
    #[error("no data sources configured")]
    Empty,
    #[error("all {count} data sources failed; last error: {last}")]
    Exhausted { count: usize, last: Box<SourceError> },
}

impl From<FetchError> for SourceError {
    fn from(err: FetchError) -> Self {
        match err {
            FetchError::NotFound { path } => Self::NotFound { path },
            other => Self::Fetch(other),
        }
    }
}

/// Decodes raw text into the loosely-typed value model the normalizers accept.
pub trait DataParser: Send + Sync {
    fn parse(&self, text: &str) -> Result<Value, String>;
}

#[derive(Debug, Default, Clone, Copy)]
pub struct JsonParser;

impl DataParser for JsonParser {
    fn parse(&self, text: &str) -> Result<Value, String> {
        serde_json::from_str(text).map_err(|err| err.to_string())
    }
}

#[derive(Debug, Default, Clone, Copy)]
pub struct YamlParser;

impl DataParser for YamlParser {
    fn parse(&self, text: &str) -> Result<Value, String> {
        yaml_serde::from_str::<Value>(text).map_err(|err| err.to_string())
    }
}

/// Parsers available to a source, keyed by format.
#[derive(Clone, Default)]
pub struct Parsers {
    by_format: HashMap<DataFormat, Arc<dyn DataParser>>,
}

impl Parsers {
    pub fn empty() -> Self {
        Self::default()
    }

    /// JSON and YAML.
    pub fn standard() -> Self {
        Self::empty()
            .with(DataFormat::Json, Arc::new(JsonParser))
            .with(DataFormat::Yaml, Arc::new(YamlParser))
    }

    pub fn with(mut self, format: DataFormat, parser: Arc<dyn DataParser>) -> Self {
        self.by_format.insert(format, parser);
        self
    }

    pub fn get(&self, format: DataFormat) -> Option<&Arc<dyn DataParser>> {
        self.by_format.get(&format)
    }
}

/// One way of turning a descriptor into raw data.
#[async_trait]
pub trait SourceStrategy: Send + Sync {
    async fn load(&self, descriptor: &SourceDescriptor) -> Result<Value, SourceError>;
}

/// Fetches the descriptor's path from a content store and decodes it with the
/// parser registered for its format.
#[derive(Clone)]
pub struct StoreSource {
    store: Arc<dyn ContentStore>,
    parsers: Parsers,
}

impl StoreSource {
    pub fn new(store: Arc<dyn ContentStore>, parsers: Parsers) -> Self {
        Self { store, parsers }
    }
}

#[async_trait]
impl SourceStrategy for StoreSource {
    async fn load(&self, descriptor: &SourceDescriptor) -> Result<Value, SourceError> {
        let parser = self
            .parsers
            .get(descriptor.format)
            .ok_or_else(|| SourceError::NoParser {
                path: descriptor.path.clone(),
                format: descriptor.format,
            })?;

        let text = self.store.fetch_text(&descriptor.path).await?;

        parser.parse(&text).map_err(|message| SourceError::Parse {
            path: descriptor.path.clone(),
            format: descriptor.format,
            message,
        })
    }
}

/// Ordered candidates for one resource.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceChain {
    descriptors: Vec<SourceDescriptor>,
}

impl SourceChain {
    pub fn new(descriptors: Vec<SourceDescriptor>) -> Self {
        Self { descriptors }
    }

    pub fn descriptors(&self) -> &[SourceDescriptor] {
        &self.descriptors
    }

    /// Try each candidate in turn; the first success wins.
    pub async fn load(&self, strategy: &dyn SourceStrategy) -> Result<Value, SourceError> {
        let mut last: Option<SourceError> = None;

        for descriptor in &self.descriptors {
            match strategy.load(descriptor).await {
                Ok(value) => {
                    debug!(
                        target = "application::sources",
                        path = %descriptor.path,
                        format = %descriptor.format,
                        "data source loaded"
                    );
                    return Ok(value);
                }
                Err(err) => {
                    metrics::counter!("vitae_source_failure_total").increment(1);
                    warn!(
                        target = "application::sources",
                        path = %descriptor.path,
                        format = %descriptor.format,
                        error = %err,
                        "data source failed; trying next candidate"
                    );
                    last = Some(err);
                }
            }
        }

        match last {
            Some(err) => Err(SourceError::Exhausted {
                count: self.descriptors.len(),
                last: Box::new(err),
            }),
            None => Err(SourceError::Empty),
        }
    }
}
