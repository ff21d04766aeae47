use std::{path::Path, process};

use time::OffsetDateTime;
use tracing::{Dispatch, Level, dispatcher, error, info};
use tracing_subscriber::fmt as tracing_fmt;
use vitae::{
    application::{
        error::AppError,
        render::{ContentRenderer, RenderTarget},
        search::filter_publications,
        site::{SiteService, SiteSources},
    },
    config,
    infra::{self, error::InfraError, telemetry},
    presentation::views::{
        HomeContext, HomeTemplate, LayoutChrome, PostPageContext, PostTemplate, render_template,
    },
};

#[tokio::main]
async fn main() {
    if let Err(error) = run().await {
        report_application_error(&error);
        process::exit(1);
    }
}

fn report_application_error(error: &AppError) {
    let report = error.report();
    if dispatcher::has_been_set() {
        error!(
            error = %error,
            chain = ?report.messages,
            "{}",
            error.presentation_message()
        );
        return;
    }

    let subscriber = tracing_fmt()
        .with_max_level(Level::ERROR)
        .with_writer(std::io::stderr)
        .finish();
    let dispatch = Dispatch::new(subscriber);
    dispatcher::with_default(&dispatch, || {
        error!(
            error = %error,
            chain = ?report.messages,
            "{}",
            error.presentation_message()
        );
    });
}

async fn run() -> Result<(), AppError> {
    let (cli_args, settings) = config::load_with_cli()?;

    let command = cli_args
        .command
        .unwrap_or(config::Command::Build(config::BuildArgs::default()));

    telemetry::init(&settings.logging)?;

    match command {
        config::Command::Build(args) => run_build(settings, args).await,
        config::Command::Render(args) => run_render(settings, args).await,
        config::Command::Search(args) => run_search(settings, args).await,
    }
}

fn site_service(settings: &config::Settings) -> Result<SiteService, AppError> {
    let store = infra::content_store(&settings.content)?;
    Ok(SiteService::new(
        store,
        ContentRenderer::from(&settings.render),
        SiteSources::from(&settings.sources),
    ))
}

async fn run_build(settings: config::Settings, args: config::BuildArgs) -> Result<(), AppError> {
    let site = site_service(&settings)?;
    let output = settings.output.dir.as_path();
    let year = OffsetDateTime::now_utc().year();

    info!(
        target = "vitae::build",
        output = %output.display(),
        "Starting build"
    );

    let home = site.load_home(args.query.as_deref()).await;
    let chrome = LayoutChrome::new(settings.site.title.clone(), year);

    let index = render_template(HomeTemplate {
        chrome: chrome.clone(),
        content: HomeContext {
            about_html: home.about.html(),
            publications_html: home.publications.html(),
            education_html: home.education.html(),
            blog_html: home.blog.html(),
            query: args
                .query
                .as_deref()
                .map(str::trim)
                .filter(|query| !query.is_empty())
                .map(str::to_string),
        },
    })?;
    write_page(&output.join("index.html"), &index).await?;

    let pages = site.post_pages(&home.posts).await;
    let post_chrome = chrome.nested("../");
    for page in &pages {
        let html = render_template(PostTemplate {
            chrome: post_chrome.clone(),
            content: PostPageContext {
                title: page.post.title.clone(),
                detail_html: page.detail_html.clone(),
            },
        })?;
        let path = output.join("posts").join(format!("{}.html", page.post.slug));
        write_page(&path, &html).await?;
    }

    info!(
        target = "vitae::build",
        posts = pages.len(),
        failed_sections = home.failed_sections(),
        "Build completed"
    );
    Ok(())
}

async fn write_page(path: &Path, html: &str) -> Result<(), InfraError> {
    if let Some(parent) = path.parent() {
        tokio::fs::create_dir_all(parent).await?;
    }
    tokio::fs::write(path, html).await?;
    Ok(())
}

async fn run_render(settings: config::Settings, args: config::RenderArgs) -> Result<(), AppError> {
    let markdown = tokio::fs::read_to_string(&args.file)
        .await
        .map_err(InfraError::from)?;
    let renderer = ContentRenderer::from(&settings.render);
    let target = RenderTarget::Standalone {
        name: args.file.display().to_string(),
    };
    println!("{}", renderer.render(&target, &markdown));
    Ok(())
}

async fn run_search(settings: config::Settings, args: config::SearchArgs) -> Result<(), AppError> {
    if args.query.trim().is_empty() {
        return Err(AppError::validation("search query must not be empty"));
    }

    let site = site_service(&settings)?;
    let publications = site.publications().await?;
    let matches = filter_publications(&publications, &args.query);

    info!(
        target = "vitae::search",
        query = %args.query,
        matches = matches.len(),
        total = publications.len(),
        "Search completed"
    );
    for publication in &matches {
        match publication.year.as_str() {
            "" => println!("{}", publication.title),
            year => println!("{} ({year})", publication.title),
        }
    }
    Ok(())
}

