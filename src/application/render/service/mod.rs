mod config;

use std::sync::Arc;

use comrak::{Arena, format_html, options::Options, parse_document};
use once_cell::sync::Lazy;
use tracing::{debug, warn};

use crate::application::render::{
    fallback::render_minimal_markdown,
    types::{MarkdownRenderer, RenderError, RenderTarget},
};
use crate::config::{RenderEngine, RenderSettings};

use config::{build_sanitizer, default_options};

/// Full Markdown renderer: comrak (GFM tables, footnotes, autolinks, raw HTML)
/// followed by ammonia sanitisation.
pub struct ComrakRenderer {
    options: Options<'static>,
    sanitizer: ammonia::Builder<'static>,
}

impl ComrakRenderer {
    fn new() -> Self {
        Self {
            options: default_options(),
            sanitizer: build_sanitizer(),
        }
    }

    /// Render without the sanitisation stage, for diagnosing sanitizer rules.
    pub fn render_unsanitized(&self, markdown: &str) -> Result<String, RenderError> {
        let arena = Arena::new();
        let root = parse_document(&arena, markdown, &self.options);

        let mut html = String::new();
        format_html(root, &self.options, &mut html).map_err(|err| RenderError::Markdown {
            message: err.to_string(),
        })?;
        Ok(html)
    }
}

impl Default for ComrakRenderer {
    fn default() -> Self {
        Self::new()
    }
}

impl MarkdownRenderer for ComrakRenderer {
    fn name(&self) -> &'static str {
        "comrak"
    }

    fn render(&self, markdown: &str) -> Result<String, RenderError> {
        let html = self.render_unsanitized(markdown)?;
        Ok(self.sanitizer.clean(&html).to_string())
    }
}

static RENDER_SERVICE: Lazy<Arc<ComrakRenderer>> = Lazy::new(|| Arc::new(ComrakRenderer::new()));

/// Access the shared comrak renderer, initialised on first use.
pub fn render_service() -> Arc<ComrakRenderer> {
    Arc::clone(&RENDER_SERVICE)
}

/// Renders Markdown through an injected primary renderer and degrades to the
/// minimal fallback when the primary is absent or fails.
#[derive(Clone)]
pub struct ContentRenderer {
    primary: Option<Arc<dyn MarkdownRenderer>>,
}

impl ContentRenderer {
    pub fn new(primary: Option<Arc<dyn MarkdownRenderer>>) -> Self {
        Self { primary }
    }

    /// A renderer that only ever uses the minimal fallback.
    pub fn fallback_only() -> Self {
        Self::new(None)
    }

    pub fn render(&self, target: &RenderTarget, markdown: &str) -> String {
        let Some(primary) = self.primary.as_ref() else {
            debug!(
                target = "application::render::service",
                document = target.label(),
                "no primary renderer configured; using fallback"
            );
            return self.render_fallback(markdown);
        };

        match primary.render(markdown) {
            Ok(html) => html,
            Err(err) => {
                warn!(
                    target = "application::render::service",
                    document = target.label(),
                    renderer = primary.name(),
                    error = %err,
                    "primary renderer failed; using fallback"
                );
                self.render_fallback(markdown)
            }
        }
    }

    fn render_fallback(&self, markdown: &str) -> String {
        metrics::counter!("vitae_render_fallback_total").increment(1);
        render_minimal_markdown(markdown)
    }
}

impl From<&RenderSettings> for ContentRenderer {
    fn from(settings: &RenderSettings) -> Self {
        match settings.engine {
            RenderEngine::Comrak => {
                let primary: Arc<dyn MarkdownRenderer> = render_service();
                Self::new(Some(primary))
            }
            RenderEngine::Minimal => Self::fallback_only(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Unreachable;

    impl MarkdownRenderer for Unreachable {
        fn name(&self) -> &'static str {
            "unreachable"
        }

        fn render(&self, _markdown: &str) -> Result<String, RenderError> {
            Err(RenderError::Unavailable {
                reason: "library could not be loaded".into(),
            })
        }
    }

    #[test]
    fn comrak_renders_tables_and_emphasis() {
        let html = render_service()
            .render("| a | b |\n|---|---|\n| 1 | 2 |\n\nSome **bold**.")
            .expect("render succeeds");
        assert!(html.contains("<table>"));
        assert!(html.contains("<strong>bold</strong>"));
    }

    #[test]
    fn comrak_sanitizes_scripts() {
        let html = render_service()
            .render("hello <script>alert(1)</script>")
            .expect("render succeeds");
        assert!(!html.contains("<script"));
        assert!(html.contains("hello"));
    }

    #[test]
    fn comrak_keeps_raw_tables() {
        let html = render_service()
            .render("<table><tr><td>cell</td></tr></table>")
            .expect("render succeeds");
        assert!(html.contains("<td>cell</td>"));
    }

    #[test]
    fn failing_primary_falls_back_to_minimal() {
        let primary: Arc<dyn MarkdownRenderer> = Arc::new(Unreachable);
        let renderer = ContentRenderer::new(Some(primary));
        let html = renderer.render(&RenderTarget::About, "# Hi\n\n- a\n- b");
        assert_eq!(html, "<h2>Hi</h2>\n<ul>\n<li>a</li>\n<li>b</li>\n</ul>");
    }

    #[test]
    fn missing_primary_uses_minimal() {
        let renderer = ContentRenderer::fallback_only();
        let html = renderer.render(&RenderTarget::About, "**x**");
        assert_eq!(html, "<p><strong>x</strong></p>");
    }

    #[test]
    fn engine_setting_selects_renderer() {
        let minimal = ContentRenderer::from(&RenderSettings {
            engine: RenderEngine::Minimal,
        });
        assert_eq!(minimal.render(&RenderTarget::About, "# T"), "<h2>T</h2>");

        let comrak = ContentRenderer::from(&RenderSettings {
            engine: RenderEngine::Comrak,
        });
        assert!(comrak.render(&RenderTarget::About, "# T").contains("<h1>"));
    }
}
