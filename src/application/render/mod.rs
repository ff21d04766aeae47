//! Markdown rendering pipeline.
//!
//! Rendering is pure: Markdown in, HTML out. The full renderer is an injected
//! capability; when it is absent or fails, the minimal fallback keeps the page
//! usable instead of leaving a section empty.

mod fallback;
mod service;
mod types;

pub use fallback::render_minimal_markdown;
pub use service::{ComrakRenderer, ContentRenderer, render_service};
pub use types::{MarkdownRenderer, RenderError, RenderTarget};
