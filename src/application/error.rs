use std::error::Error as StdError;

use thiserror::Error;

use crate::{
    application::{site::SiteError, sources::SourceError},
    config::LoadError,
    infra::error::InfraError,
    presentation::views::TemplateRenderError,
};

/// Error chain of a failure, outermost first, for structured logging.
#[derive(Debug, Clone)]
pub struct ErrorReport {
    pub source: &'static str,
    pub messages: Vec<String>,
}

impl ErrorReport {
    pub fn from_error(source: &'static str, error: &dyn StdError) -> Self {
        let mut messages = Vec::new();
        messages.push(error.to_string());
        let mut current = error.source();
        while let Some(inner) = current {
            messages.push(inner.to_string());
            current = inner.source();
        }
        Self { source, messages }
    }
}

#[derive(Debug, Error)]
pub enum AppError {
    #[error(transparent)]
    Config(#[from] LoadError),
    #[error(transparent)]
    Infra(#[from] InfraError),
    #[error(transparent)]
    Site(#[from] SiteError),
    #[error(transparent)]
    Template(#[from] TemplateRenderError),
    #[error("validation failed: {0}")]
    Validation(String),
}

impl AppError {
    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation(message.into())
    }

    /// Short message suitable for the terminal.
    pub fn presentation_message(&self) -> &'static str {
        match self {
            AppError::Config(_) => "Configuration is invalid",
            AppError::Infra(InfraError::Telemetry(_)) => "Logging subsystem could not start",
            AppError::Infra(InfraError::Io(_)) => "I/O failure while writing the site",
            AppError::Infra(InfraError::Http { .. }) => "HTTP client could not be created",
            AppError::Site(SiteError::Source(SourceError::Exhausted { .. })) => {
                "No data source could be loaded"
            }
            AppError::Site(_) => "Content could not be loaded",
            AppError::Template(_) => "Template rendering failed",
            AppError::Validation(_) => "Request could not be processed",
        }
    }

    pub fn report(&self) -> ErrorReport {
        let source = match self {
            AppError::Template(err) => err.origin(),
            _ => "application::error::AppError",
        };
        ErrorReport::from_error(source, self)
    }
}
