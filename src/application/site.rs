//! Site assembly: load every content resource, normalize it and render the
//! section fragments of the home page and the post pages.

use std::{
    cmp::Reverse,
    collections::{BTreeSet, HashSet},
    sync::Arc,
};

use futures::future::join_all;
use thiserror::Error;
use tracing::{info, warn};

use crate::application::{
    content::split_about,
    normalize::{normalize_education, normalize_posts, normalize_publications},
    render::{ContentRenderer, RenderTarget},
    repos::{ContentStore, FetchError},
    search::filter_publications,
    sources::{Parsers, SourceChain, SourceDescriptor, SourceError, StoreSource},
};
use crate::config::SourceSettings;
use crate::domain::entities::{BlogPost, EducationEntry, Publication};
use crate::presentation::fragments::{
    PublicationDisplay, failed_message, render_education, render_post_detail, render_post_list,
    render_publication_list,
};
use crate::util::date::parse_date;

/// Where each site resource lives.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SiteSources {
    pub document: String,
    pub publications: SourceChain,
    pub education: SourceChain,
    pub posts: SourceChain,
    pub post_body_dir: String,
}

impl From<&SourceSettings> for SiteSources {
    fn from(settings: &SourceSettings) -> Self {
        fn chain(paths: &[String]) -> SourceChain {
            SourceChain::new(
                paths
                    .iter()
                    .filter_map(|path| SourceDescriptor::from_path(path.as_str()))
                    .collect(),
            )
        }

        Self {
            document: settings.document.clone(),
            publications: chain(&settings.publications),
            education: chain(&settings.education),
            posts: chain(&settings.posts),
            post_body_dir: settings.post_body_dir.clone(),
        }
    }
}

#[derive(Debug, Error)]
pub enum SiteError {
    #[error(transparent)]
    Fetch(#[from] FetchError),
    #[error(transparent)]
    Source(#[from] SourceError),
}

/// Result of loading one home page section. A failure stays scoped to its section.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SectionOutcome {
    Rendered(String),
    Failed { resource: String, error: String },
}

impl SectionOutcome {
    pub fn html(&self) -> String {
        match self {
            SectionOutcome::Rendered(html) => html.clone(),
            SectionOutcome::Failed { resource, .. } => failed_message(resource),
        }
    }

    pub fn is_failed(&self) -> bool {
        matches!(self, SectionOutcome::Failed { .. })
    }
}

pub struct HomeSections {
    pub about: SectionOutcome,
    pub publications: SectionOutcome,
    pub education: SectionOutcome,
    pub blog: SectionOutcome,
    /// Posts backing the blog section, newest first; empty when it failed.
    pub posts: Vec<BlogPost>,
}

impl HomeSections {
    pub fn failed_sections(&self) -> usize {
        [&self.about, &self.publications, &self.education, &self.blog]
            .into_iter()
            .filter(|outcome| outcome.is_failed())
            .count()
    }
}

/// A rendered post page body.
pub struct PostPage {
    pub post: BlogPost,
    pub detail_html: String,
}

#[derive(Clone)]
pub struct SiteService {
    store: Arc<dyn ContentStore>,
    source: StoreSource,
    renderer: ContentRenderer,
    sources: SiteSources,
    display: PublicationDisplay,
}

impl SiteService {
    pub fn new(
        store: Arc<dyn ContentStore>,
        renderer: ContentRenderer,
        sources: SiteSources,
    ) -> Self {
        Self::with_parsers(store, renderer, sources, Parsers::standard())
    }

    pub fn with_parsers(
        store: Arc<dyn ContentStore>,
        renderer: ContentRenderer,
        sources: SiteSources,
        parsers: Parsers,
    ) -> Self {
        let source = StoreSource::new(Arc::clone(&store), parsers);
        Self {
            store,
            source,
            renderer,
            sources,
            display: PublicationDisplay::default(),
        }
    }

    pub fn with_display(self, display: PublicationDisplay) -> Self {
        Self { display, ..self }
    }

    /// Rendered "about" part of the content document.
    pub async fn about_html(&self) -> Result<String, SiteError> {
        let document = self.store.fetch_text(&self.sources.document).await?;
        Ok(self
            .renderer
            .render(&RenderTarget::About, split_about(&document)))
    }

    pub async fn publications(&self) -> Result<Vec<Publication>, SiteError> {
        let raw = self.sources.publications.load(&self.source).await?;
        Ok(normalize_publications(&raw))
    }

    pub async fn education(&self) -> Result<Vec<EducationEntry>, SiteError> {
        let raw = self.sources.education.load(&self.source).await?;
        Ok(normalize_education(&raw))
    }

    /// Blog posts, newest first.
    pub async fn posts(&self) -> Result<Vec<BlogPost>, SiteError> {
        let raw = self.sources.posts.load(&self.source).await?;
        let mut posts = normalize_posts(&raw);
        sort_newest_first(&mut posts);
        Ok(posts)
    }

    /// Rendered body of one post: the `posts/{slug}.md` file when present,
    /// otherwise the inline content or summary.
    pub async fn post_body_html(&self, post: &BlogPost) -> String {
        let path = post.body_path(&self.sources.post_body_dir);
        let markdown = match self.store.fetch_text(&path).await {
            Ok(text) => text,
            Err(FetchError::NotFound { .. }) => post.inline_body().to_string(),
            Err(err) => {
                warn!(
                    target = "application::site",
                    slug = %post.slug,
                    error = %err,
                    "post body unavailable; using inline content"
                );
                post.inline_body().to_string()
            }
        };
        self.renderer.render(
            &RenderTarget::PostBody {
                slug: post.slug.clone(),
            },
            &markdown,
        )
    }

    pub async fn post_page(&self, post: &BlogPost) -> PostPage {
        let body = self.post_body_html(post).await;
        PostPage {
            post: post.clone(),
            detail_html: render_post_detail(post, &body),
        }
    }

    pub async fn post_pages(&self, posts: &[BlogPost]) -> Vec<PostPage> {
        for slug in duplicate_slugs(posts) {
            warn!(
                target = "application::site",
                slug = %slug,
                "several posts share one slug; only the last page is kept"
            );
        }
        join_all(posts.iter().map(|post| self.post_page(post))).await
    }

    /// Load and render every home page section concurrently. A section whose
    /// resource fails renders a static failure message; the others are unaffected.
    pub async fn load_home(&self, query: Option<&str>) -> HomeSections {
        let (about, publications, education, posts) = tokio::join!(
            self.about_html(),
            self.publications(),
            self.education(),
            self.posts(),
        );

        let about = self.outcome(&self.sources.document, about);
        let publications = self.outcome(
            self.chain_label(&self.sources.publications),
            publications.map(|list| {
                let visible = filter_publications(&list, query.unwrap_or_default());
                render_publication_list(&visible, self.display)
            }),
        );
        let education = self.outcome(
            self.chain_label(&self.sources.education),
            education.map(|entries| render_education(&entries)),
        );
        let (blog, posts) = match posts {
            Ok(posts) => (SectionOutcome::Rendered(render_post_list(&posts)), posts),
            Err(err) => (
                self.outcome(self.chain_label(&self.sources.posts), Err(err)),
                Vec::new(),
            ),
        };

        let sections = HomeSections {
            about,
            publications,
            education,
            blog,
            posts,
        };
        info!(
            target = "application::site",
            posts = sections.posts.len(),
            failed_sections = sections.failed_sections(),
            "home sections loaded"
        );
        sections
    }

    fn outcome(&self, resource: &str, result: Result<String, SiteError>) -> SectionOutcome {
        match result {
            Ok(html) => SectionOutcome::Rendered(html),
            Err(err) => {
                metrics::counter!("vitae_section_failure_total").increment(1);
                warn!(
                    target = "application::site",
                    resource,
                    error = %err,
                    "section failed to load"
                );
                SectionOutcome::Failed {
                    resource: resource.to_string(),
                    error: err.to_string(),
                }
            }
        }
    }

    fn chain_label<'a>(&self, chain: &'a SourceChain) -> &'a str {
        chain
            .descriptors()
            .first()
            .map(|descriptor| descriptor.path.as_str())
            .unwrap_or_default()
    }
}

/// Slugs used by more than one post, in sorted order.
pub fn duplicate_slugs(posts: &[BlogPost]) -> Vec<&str> {
    let mut seen = HashSet::new();
    posts
        .iter()
        .map(|post| post.slug.as_str())
        .filter(|slug| !seen.insert(*slug))
        .collect::<BTreeSet<_>>()
        .into_iter()
        .collect()
}

/// Newest first by parsed date. Posts without a usable date follow the dated
/// ones in their original order.
pub fn sort_newest_first(posts: &mut [BlogPost]) {
    posts.sort_by_cached_key(|post| {
        let date = parse_date(&post.date);
        (date.is_none(), Reverse(date))
    });
}
