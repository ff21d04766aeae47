use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Identifies what is being rendered so failures can be attributed in logs.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum RenderTarget {
    /// The "about" part of the site's content document.
    About,
    /// The full body of a blog post.
    PostBody { slug: String },
    /// A standalone Markdown file rendered from the command line.
    Standalone { name: String },
}

impl RenderTarget {
    pub fn label(&self) -> &str {
        match self {
            RenderTarget::About => "about",
            RenderTarget::PostBody { slug } => slug.as_str(),
            RenderTarget::Standalone { name } => name.as_str(),
        }
    }
}

/// Structured errors surfaced by a Markdown renderer. Any of these sends the
/// caller down the fallback path.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum RenderError {
    #[error("markdown rendering failed: {message}")]
    Markdown { message: String },
    #[error("renderer unavailable: {reason}")]
    Unavailable { reason: String },
}

/// A Markdown-to-HTML converter. Implementations must be deterministic: the same
/// input yields the same output or the same error.
pub trait MarkdownRenderer: Send + Sync {
    /// Short name used in logs.
    fn name(&self) -> &'static str;

    fn render(&self, markdown: &str) -> Result<String, RenderError>;
}
