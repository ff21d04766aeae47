use askama::{Error as AskamaError, Template};
use thiserror::Error;

#[derive(Debug, Error)]
#[error("{public_message}")]
pub struct TemplateRenderError {
    pub(crate) source: &'static str,
    pub(crate) public_message: &'static str,
    #[source]
    pub(crate) error: AskamaError,
}

impl TemplateRenderError {
    pub fn new(source: &'static str, public_message: &'static str, error: AskamaError) -> Self {
        Self {
            source,
            public_message,
            error,
        }
    }

    /// Module path that attempted the render.
    pub fn origin(&self) -> &'static str {
        self.source
    }
}

pub fn render_template<T: Template>(template: T) -> Result<String, TemplateRenderError> {
    template.render().map_err(|err| {
        TemplateRenderError::new(
            "presentation::views::render_template",
            "Template rendering failed",
            err,
        )
    })
}

#[derive(Clone)]
pub struct FooterView {
    pub copy: String,
}

impl FooterView {
    pub fn for_year(site_title: &str, year: i32) -> Self {
        Self {
            copy: format!("© {year} {site_title}"),
        }
    }
}

/// Shared page chrome. `root` is the relative path back to the site root, so
/// pages work when opened straight from disk.
#[derive(Clone)]
pub struct LayoutChrome {
    pub site_title: String,
    pub root: String,
    pub footer: FooterView,
}

impl LayoutChrome {
    pub fn new(site_title: impl Into<String>, year: i32) -> Self {
        let site_title = site_title.into();
        let footer = FooterView::for_year(&site_title, year);
        Self {
            site_title,
            root: String::new(),
            footer,
        }
    }

    pub fn nested(self, root: impl Into<String>) -> Self {
        Self {
            root: root.into(),
            ..self
        }
    }
}

/// Rendered sections of the home page. Every field holds trusted fragment HTML.
pub struct HomeContext {
    pub about_html: String,
    pub publications_html: String,
    pub education_html: String,
    pub blog_html: String,
    pub query: Option<String>,
}

#[derive(Template)]
#[template(path = "home.html")]
pub struct HomeTemplate {
    pub chrome: LayoutChrome,
    pub content: HomeContext,
}

pub struct PostPageContext {
    pub title: String,
    pub detail_html: String,
}

#[derive(Template)]
#[template(path = "post.html")]
pub struct PostTemplate {
    pub chrome: LayoutChrome,
    pub content: PostPageContext,
}
