//! Configuration layer: typed settings with layered precedence (file → env → CLI).

mod cli;

use std::{path::PathBuf, str::FromStr};

use clap::Parser;
use config::{Config, Environment, File};
use serde::Deserialize;
use thiserror::Error;
use tracing::level_filters::LevelFilter;
use url::Url;

use crate::application::sources::DataFormat;

pub use cli::{BuildArgs, CliArgs, Command, RenderArgs, SearchArgs, SiteOverrides};

const DEFAULT_CONFIG_BASENAME: &str = "config/default";
const LOCAL_CONFIG_BASENAME: &str = "vitae";
const ENV_PREFIX: &str = "VITAE";
const DEFAULT_CONTENT_DIR: &str = "content";
const DEFAULT_DOCUMENT: &str = "content.md";
const DEFAULT_PUBLICATION_SOURCES: &[&str] = &["pubs.json", "pubs.yaml"];
const DEFAULT_EDUCATION_SOURCES: &[&str] = &["education.json", "education.yaml"];
const DEFAULT_POST_SOURCES: &[&str] = &["posts/index.json", "posts/index.yaml"];
const DEFAULT_POST_BODY_DIR: &str = "posts";
const DEFAULT_SITE_TITLE: &str = "Home";
const DEFAULT_OUTPUT_DIR: &str = "public";
const LIST_KEYS: &[&str] = &["sources.publications", "sources.education", "sources.posts"];

#[derive(Debug, Clone)]
pub struct Settings {
    pub content: ContentSettings,
    pub sources: SourceSettings,
    pub render: RenderSettings,
    pub site: SiteSettings,
    pub output: OutputSettings,
    pub logging: LoggingSettings,
}

#[derive(Debug, Clone)]
pub struct ContentSettings {
    pub location: ContentLocation,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ContentLocation {
    Dir(PathBuf),
    Url(Url),
}

/// Resource paths relative to the content location.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceSettings {
    pub document: String,
    /// Ordered candidates; the first one that loads wins.
    pub publications: Vec<String>,
    pub education: Vec<String>,
    pub posts: Vec<String>,
    /// Directory holding `{slug}.md` post bodies.
    pub post_body_dir: String,
}

impl Default for SourceSettings {
    fn default() -> Self {
        Self {
            document: DEFAULT_DOCUMENT.to_string(),
            publications: owned(DEFAULT_PUBLICATION_SOURCES),
            education: owned(DEFAULT_EDUCATION_SOURCES),
            posts: owned(DEFAULT_POST_SOURCES),
            post_body_dir: DEFAULT_POST_BODY_DIR.to_string(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RenderEngine {
    /// comrak with ammonia sanitisation.
    #[default]
    Comrak,
    /// Minimal fallback renderer only.
    Minimal,
}

impl FromStr for RenderEngine {
    type Err = String;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_ascii_lowercase().as_str() {
            "comrak" => Ok(Self::Comrak),
            "minimal" | "fallback" => Ok(Self::Minimal),
            other => Err(format!("unknown render engine `{other}`")),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RenderSettings {
    pub engine: RenderEngine,
}

#[derive(Debug, Clone)]
pub struct SiteSettings {
    pub title: String,
}

#[derive(Debug, Clone)]
pub struct OutputSettings {
    pub dir: PathBuf,
}

#[derive(Debug, Clone)]
pub struct LoggingSettings {
    pub level: LevelFilter,
    pub format: LogFormat,
}

#[derive(Debug, Clone, Copy)]
pub enum LogFormat {
    Json,
    Compact,
}

#[derive(Debug, Error)]
pub enum LoadError {
    #[error("failed to build configuration: {0}")]
    Build(#[from] config::ConfigError),
    #[error("invalid configuration for `{key}`: {reason}")]
    Invalid { key: &'static str, reason: String },
}

impl LoadError {
    fn invalid(key: &'static str, reason: impl Into<String>) -> Self {
        Self::Invalid {
            key,
            reason: reason.into(),
        }
    }
}

pub fn load(cli: &CliArgs) -> Result<Settings, LoadError> {
    let mut builder = Config::builder()
        .add_source(File::with_name(DEFAULT_CONFIG_BASENAME).required(false))
        .add_source(File::with_name(LOCAL_CONFIG_BASENAME).required(false));

    if let Some(path) = cli.config_file.as_ref() {
        builder = builder.add_source(File::from(path.as_path()).required(true));
    }

    // `VITAE_SITE__TITLE`: one underscore after the prefix, two between segments.
    let mut environment = Environment::with_prefix(ENV_PREFIX)
        .prefix_separator("_")
        .separator("__")
        .try_parsing(true)
        .list_separator(",");
    for key in LIST_KEYS {
        environment = environment.with_list_parse_key(key);
    }
    builder = builder.add_source(environment);

    let mut raw: RawSettings = builder.build()?.try_deserialize()?;

    raw.apply_site_overrides(&cli.site);
    if let Some(Command::Render(args)) = cli.command.as_ref() {
        raw.apply_render_overrides(args);
    }

    Settings::from_raw(raw)
}

#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
struct RawSettings {
    content: RawContentSettings,
    sources: RawSourceSettings,
    render: RawRenderSettings,
    site: RawSiteSettings,
    output: RawOutputSettings,
    logging: RawLoggingSettings,
}

impl RawSettings {
    fn apply_site_overrides(&mut self, overrides: &SiteOverrides) {
        if let Some(dir) = overrides.content_dir.as_ref() {
            self.content.dir = Some(dir.clone());
            self.content.base_url = None;
        }
        if let Some(url) = overrides.content_url.as_ref() {
            self.content.base_url = Some(url.clone());
        }
        if let Some(dir) = overrides.output_dir.as_ref() {
            self.output.dir = Some(dir.clone());
        }
        if let Some(engine) = overrides.render_engine.as_ref() {
            self.render.engine = Some(engine.clone());
        }
        if let Some(level) = overrides.log_level.as_ref() {
            self.logging.level = Some(level.clone());
        }
        if let Some(json) = overrides.log_json {
            self.logging.json = Some(json);
        }
    }

    fn apply_render_overrides(&mut self, args: &RenderArgs) {
        if args.fallback {
            self.render.engine = Some("minimal".to_string());
        }
    }
}

impl Settings {
    fn from_raw(raw: RawSettings) -> Result<Self, LoadError> {
        let RawSettings {
            content,
            sources,
            render,
            site,
            output,
            logging,
        } = raw;

        let content = build_content_settings(content)?;
        let sources = build_source_settings(sources)?;
        let render = build_render_settings(render)?;
        let site = build_site_settings(site)?;
        let output = build_output_settings(output)?;
        let logging = build_logging_settings(logging)?;

        Ok(Self {
            content,
            sources,
            render,
            site,
            output,
            logging,
        })
    }
}

fn build_content_settings(content: RawContentSettings) -> Result<ContentSettings, LoadError> {
    let base_url = content.base_url.and_then(|value| {
        let trimmed = value.trim();
        (!trimmed.is_empty()).then(|| trimmed.to_string())
    });

    if let Some(base_url) = base_url {
        let url = Url::parse(&base_url)
            .map_err(|err| LoadError::invalid("content.base_url", format!("{err}")))?;
        if !matches!(url.scheme(), "http" | "https") {
            return Err(LoadError::invalid(
                "content.base_url",
                "scheme must be http or https",
            ));
        }
        return Ok(ContentSettings {
            location: ContentLocation::Url(url),
        });
    }

    let dir = content
        .dir
        .unwrap_or_else(|| PathBuf::from(DEFAULT_CONTENT_DIR));
    if dir.as_os_str().is_empty() {
        return Err(LoadError::invalid("content.dir", "path must not be empty"));
    }

    Ok(ContentSettings {
        location: ContentLocation::Dir(dir),
    })
}

fn build_source_settings(sources: RawSourceSettings) -> Result<SourceSettings, LoadError> {
    let defaults = SourceSettings::default();

    let document = sources.document.unwrap_or(defaults.document);
    if document.trim().is_empty() {
        return Err(LoadError::invalid(
            "sources.document",
            "path must not be empty",
        ));
    }

    let publications = candidate_list(
        "sources.publications",
        sources.publications,
        defaults.publications,
    )?;
    let education = candidate_list("sources.education", sources.education, defaults.education)?;
    let posts = candidate_list("sources.posts", sources.posts, defaults.posts)?;

    let post_body_dir = sources
        .post_body_dir
        .map(|dir| dir.trim().trim_end_matches('/').to_string())
        .unwrap_or(defaults.post_body_dir);

    Ok(SourceSettings {
        document: document.trim().to_string(),
        publications,
        education,
        posts,
        post_body_dir,
    })
}

/// Validate an ordered list of data-source candidates.
fn candidate_list(
    key: &'static str,
    value: Option<Vec<String>>,
    default: Vec<String>,
) -> Result<Vec<String>, LoadError> {
    let candidates: Vec<String> = value
        .unwrap_or(default)
        .into_iter()
        .map(|path| path.trim().to_string())
        .filter(|path| !path.is_empty())
        .collect();

    if candidates.is_empty() {
        return Err(LoadError::invalid(key, "at least one source is required"));
    }
    if let Some(path) = candidates
        .iter()
        .find(|path| DataFormat::from_path(path).is_none())
    {
        return Err(LoadError::invalid(
            key,
            format!("`{path}` must end in .json, .yaml or .yml"),
        ));
    }

    Ok(candidates)
}

fn build_render_settings(render: RawRenderSettings) -> Result<RenderSettings, LoadError> {
    let engine = match render.engine {
        Some(value) => RenderEngine::from_str(&value)
            .map_err(|reason| LoadError::invalid("render.engine", reason))?,
        None => RenderEngine::default(),
    };
    Ok(RenderSettings { engine })
}

fn build_site_settings(site: RawSiteSettings) -> Result<SiteSettings, LoadError> {
    let title = site
        .title
        .unwrap_or_else(|| DEFAULT_SITE_TITLE.to_string());
    if title.trim().is_empty() {
        return Err(LoadError::invalid("site.title", "title must not be empty"));
    }
    Ok(SiteSettings {
        title: title.trim().to_string(),
    })
}

fn build_output_settings(output: RawOutputSettings) -> Result<OutputSettings, LoadError> {
    let dir = output
        .dir
        .unwrap_or_else(|| PathBuf::from(DEFAULT_OUTPUT_DIR));
    if dir.as_os_str().is_empty() {
        return Err(LoadError::invalid("output.dir", "path must not be empty"));
    }
    Ok(OutputSettings { dir })
}

fn build_logging_settings(logging: RawLoggingSettings) -> Result<LoggingSettings, LoadError> {
    let level = match logging.level {
        Some(level) => LevelFilter::from_str(level.as_str()).map_err(|err| {
            LoadError::invalid("logging.level", format!("failed to parse: {err}"))
        })?,
        None => LevelFilter::INFO,
    };

    let format = if logging.json.unwrap_or(false) {
        LogFormat::Json
    } else {
        LogFormat::Compact
    };

    Ok(LoggingSettings { level, format })
}

#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
struct RawContentSettings {
    dir: Option<PathBuf>,
    base_url: Option<String>,
}

#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
struct RawSourceSettings {
    document: Option<String>,
    publications: Option<Vec<String>>,
    education: Option<Vec<String>>,
    posts: Option<Vec<String>>,
    post_body_dir: Option<String>,
}

#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
struct RawRenderSettings {
    engine: Option<String>,
}

#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
struct RawSiteSettings {
    title: Option<String>,
}

#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
struct RawOutputSettings {
    dir: Option<PathBuf>,
}

#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
struct RawLoggingSettings {
    level: Option<String>,
    json: Option<bool>,
}

fn owned(values: &[&str]) -> Vec<String> {
    values.iter().map(|value| value.to_string()).collect()
}

/// Resolve configuration using the supplied CLI arguments, returning both for downstream use.
pub fn load_with_cli() -> Result<(CliArgs, Settings), LoadError> {
    let args = CliArgs::parse();
    let settings = load(&args)?;
    Ok((args, settings))
}

#[cfg(test)]
mod tests;
