use std::{path::Path, sync::Arc};

use vitae::{
    application::{
        render::ContentRenderer,
        repos::ContentStore,
        site::{SectionOutcome, SiteService, SiteSources},
    },
    config::SourceSettings,
    infra::{fs_store::FsContentStore, resources::ResourceCache},
    presentation::{
        fragments::PublicationDisplay,
        views::{HomeContext, HomeTemplate, LayoutChrome, render_template},
    },
};

async fn write(root: &Path, path: &str, contents: &str) {
    let full = root.join(path);
    if let Some(parent) = full.parent() {
        tokio::fs::create_dir_all(parent)
            .await
            .expect("create parent dir");
    }
    tokio::fs::write(full, contents).await.expect("write fixture");
}

fn site(root: &Path) -> SiteService {
    let store: Arc<dyn ContentStore> = Arc::new(ResourceCache::new(Arc::new(
        FsContentStore::new(root),
    )));
    SiteService::new(
        store,
        ContentRenderer::fallback_only(),
        SiteSources::from(&SourceSettings::default()),
    )
    .with_display(PublicationDisplay::plain())
}

#[tokio::test]
async fn builds_every_section_from_mixed_formats() {
    let dir = tempfile::tempdir().expect("tempdir");
    let root = dir.path();
    write(root, "content.md", "# Jane\n\nHello.\n\n## Publications\n\nstale").await;
    write(
        root,
        "pubs.yaml",
        "publications:\n  - title: Robust Seeing\n    authors: Jane Doe\n    venue: CVPR\n    year: 2024\n    links:\n      - label: PDF\n        href: https://example.org/seeing.pdf\n",
    )
    .await;
    write(
        root,
        "education.json",
        r#"[{"degree":"PhD","school":"Example University"}]"#,
    )
    .await;
    write(
        root,
        "posts/index.json",
        r#"{"posts":[
            {"title":"First Post","date":"2023-02-01","summary":"Older."},
            {"title":"Second Post","date":"2024-02-01","tags":"rust, notes"}
        ]}"#,
    )
    .await;
    write(root, "posts/second-post.md", "Body from **file**.").await;

    let site = site(root);
    let home = site.load_home(None).await;

    assert_eq!(home.failed_sections(), 0);
    assert_eq!(
        home.about,
        SectionOutcome::Rendered("<h2>Jane</h2>\n<p>Hello.</p>".into())
    );

    let publications = home.publications.html();
    assert!(publications.contains(
        "<a href=\"https://example.org/seeing.pdf\" target=\"_blank\" rel=\"noopener noreferrer\">Robust Seeing</a>"
    ));
    assert!(publications.contains("<div class=\"pub-venue\">CVPR, 2024</div>"));

    assert!(home.education.html().contains("Example University"));

    let slugs: Vec<_> = home.posts.iter().map(|post| post.slug.as_str()).collect();
    assert_eq!(slugs, ["second-post", "first-post"]);
    assert_eq!(home.posts[0].tags, ["rust", "notes"]);

    let pages = site.post_pages(&home.posts).await;
    assert!(pages[0]
        .detail_html
        .contains("<p>Body from <strong>file</strong>.</p>"));
    assert!(pages[1].detail_html.contains("<p>Older.</p>"));
}

#[tokio::test]
async fn one_broken_section_leaves_the_others_intact() {
    let dir = tempfile::tempdir().expect("tempdir");
    let root = dir.path();
    write(root, "pubs.json", r#"{"publications":[{"title":"Still Here"}]}"#).await;
    write(root, "education.json", "{ this is not json").await;
    write(root, "education.yaml", "[unclosed").await;
    write(root, "posts/index.yaml", "posts: []\n").await;

    let home = site(root).load_home(None).await;

    assert!(home.about.is_failed());
    assert_eq!(
        home.about.html(),
        "<p class=\"muted\">Failed to load <code>content.md</code>. Please check the file.</p>"
    );
    assert!(home.publications.html().contains("Still Here"));
    assert!(home.education.is_failed());
    assert_eq!(
        home.blog,
        SectionOutcome::Rendered("<p class=\"muted\">No posts yet.</p>".into())
    );
    assert_eq!(home.failed_sections(), 2);
}

#[tokio::test]
async fn home_page_renders_around_sections() {
    let dir = tempfile::tempdir().expect("tempdir");
    let root = dir.path();
    write(root, "content.md", "About **me**").await;

    let home = site(root).load_home(Some("nothing")).await;
    let html = render_template(HomeTemplate {
        chrome: LayoutChrome::new("Jane Doe", 2026),
        content: HomeContext {
            about_html: home.about.html(),
            publications_html: home.publications.html(),
            education_html: home.education.html(),
            blog_html: home.blog.html(),
            query: Some("nothing".into()),
        },
    })
    .expect("home renders");

    assert!(html.contains("<p>About <strong>me</strong></p>"));
    assert!(html.contains("Failed to load <code>pubs.json</code>"));
    assert!(html.contains("2026 Jane Doe"));
}
