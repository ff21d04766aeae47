use std::path::Path;

use serial_test::serial;

use super::*;

/// Sets environment variables for one test and removes them on drop.
struct EnvGuard {
    keys: Vec<&'static str>,
}

impl EnvGuard {
    fn set(vars: &[(&'static str, &str)]) -> Self {
        for (key, value) in vars {
            // SAFETY: env-mutating tests are `#[serial]`.
            unsafe { std::env::set_var(key, value) };
        }
        Self {
            keys: vars.iter().map(|(key, _)| *key).collect(),
        }
    }
}

impl Drop for EnvGuard {
    fn drop(&mut self) {
        for key in &self.keys {
            // SAFETY: env-mutating tests are `#[serial]`.
            unsafe { std::env::remove_var(key) };
        }
    }
}

#[test]
fn defaults_resolve_to_local_content() {
    let settings = Settings::from_raw(RawSettings::default()).expect("valid settings");

    assert_eq!(
        settings.content.location,
        ContentLocation::Dir(PathBuf::from("content"))
    );
    assert_eq!(settings.sources, SourceSettings::default());
    assert_eq!(settings.sources.publications, ["pubs.json", "pubs.yaml"]);
    assert_eq!(settings.render.engine, RenderEngine::Comrak);
    assert_eq!(settings.site.title, "Home");
    assert_eq!(settings.output.dir, Path::new("public"));
    assert_eq!(settings.logging.level, LevelFilter::INFO);
    assert!(matches!(settings.logging.format, LogFormat::Compact));
}

#[test]
fn cli_overrides_take_highest_precedence() {
    let mut raw = RawSettings::default();
    raw.output.dir = Some(PathBuf::from("dist"));
    raw.logging.level = Some("info".to_string());

    let overrides = SiteOverrides {
        output_dir: Some(PathBuf::from("site")),
        log_level: Some("debug".to_string()),
        ..Default::default()
    };

    raw.apply_site_overrides(&overrides);
    let settings = Settings::from_raw(raw).expect("valid settings");

    assert_eq!(settings.output.dir, Path::new("site"));
    assert_eq!(settings.logging.level, LevelFilter::DEBUG);
}

#[test]
fn cli_json_logging_enforces_format() {
    let mut raw = RawSettings::default();
    let overrides = SiteOverrides {
        log_json: Some(true),
        ..Default::default()
    };

    raw.apply_site_overrides(&overrides);
    let settings = Settings::from_raw(raw).expect("valid settings");

    assert!(matches!(settings.logging.format, LogFormat::Json));
}

#[test]
fn base_url_switches_to_http_content() {
    let mut raw = RawSettings::default();
    raw.content.base_url = Some(" https://example.org/site ".to_string());

    let settings = Settings::from_raw(raw).expect("valid settings");
    match settings.content.location {
        ContentLocation::Url(url) => assert_eq!(url.as_str(), "https://example.org/site"),
        other => panic!("unexpected location: {other:?}"),
    }
}

#[test]
fn content_dir_override_wins_over_configured_url() {
    let mut raw = RawSettings::default();
    raw.content.base_url = Some("https://example.org/".to_string());

    raw.apply_site_overrides(&SiteOverrides {
        content_dir: Some(PathBuf::from("local")),
        ..Default::default()
    });
    let settings = Settings::from_raw(raw).expect("valid settings");

    assert_eq!(
        settings.content.location,
        ContentLocation::Dir(PathBuf::from("local"))
    );
}

#[test]
fn base_url_requires_http_scheme() {
    let mut raw = RawSettings::default();
    raw.content.base_url = Some("file:///srv/site".to_string());

    let err = Settings::from_raw(raw).expect_err("file scheme rejected");
    assert!(matches!(
        err,
        LoadError::Invalid {
            key: "content.base_url",
            ..
        }
    ));
}

#[test]
fn source_candidates_must_name_a_data_format() {
    let mut raw = RawSettings::default();
    raw.sources.publications = Some(vec!["pubs.toml".to_string()]);

    let err = Settings::from_raw(raw).expect_err("unknown extension rejected");
    assert!(matches!(
        err,
        LoadError::Invalid {
            key: "sources.publications",
            ..
        }
    ));
}

#[test]
fn source_candidates_must_not_be_empty() {
    let mut raw = RawSettings::default();
    raw.sources.posts = Some(vec!["  ".to_string()]);

    let err = Settings::from_raw(raw).expect_err("empty list rejected");
    assert!(matches!(
        err,
        LoadError::Invalid {
            key: "sources.posts",
            ..
        }
    ));
}

#[test]
fn post_body_dir_drops_trailing_slash() {
    let mut raw = RawSettings::default();
    raw.sources.post_body_dir = Some("articles/".to_string());

    let settings = Settings::from_raw(raw).expect("valid settings");
    assert_eq!(settings.sources.post_body_dir, "articles");
}

#[test]
fn unknown_render_engine_is_rejected() {
    let mut raw = RawSettings::default();
    raw.render.engine = Some("pandoc".to_string());

    let err = Settings::from_raw(raw).expect_err("unknown engine rejected");
    assert!(err.to_string().contains("render.engine"));
}

#[test]
fn render_fallback_flag_selects_minimal_engine() {
    let args = CliArgs::parse_from(["vitae", "render", "--fallback", "notes.md"]);
    let mut raw = RawSettings::default();
    if let Some(Command::Render(render)) = args.command.as_ref() {
        raw.apply_render_overrides(render);
    }

    let settings = Settings::from_raw(raw).expect("valid settings");
    assert_eq!(settings.render.engine, RenderEngine::Minimal);
}

#[test]
fn default_to_build_command() {
    let args = CliArgs::parse_from(["vitae"]);
    let command = args
        .command
        .unwrap_or(Command::Build(BuildArgs::default()));
    assert!(matches!(command, Command::Build(BuildArgs { query: None })));
}

#[test]
fn parse_build_arguments_with_global_overrides() {
    let args = CliArgs::parse_from([
        "vitae",
        "build",
        "--query",
        "cvpr",
        "--content-dir",
        "site/content",
        "--render-engine",
        "minimal",
    ]);

    assert_eq!(
        args.site.content_dir.as_deref(),
        Some(Path::new("site/content"))
    );
    assert_eq!(args.site.render_engine.as_deref(), Some("minimal"));
    match args.command.expect("build command") {
        Command::Build(build) => assert_eq!(build.query.as_deref(), Some("cvpr")),
        _ => panic!("wrong command parsed"),
    }
}

#[test]
fn parse_search_arguments() {
    let args = CliArgs::parse_from(["vitae", "--log-json", "true", "search", "vision"]);

    assert_eq!(args.site.log_json, Some(true));
    match args.command.expect("search command") {
        Command::Search(search) => assert_eq!(search.query, "vision"),
        _ => panic!("wrong command parsed"),
    }
}

#[test]
#[serial]
fn environment_sets_scalar_keys() {
    let _env = EnvGuard::set(&[
        ("VITAE_SITE__TITLE", "Jane Doe"),
        ("VITAE_SOURCES__POST_BODY_DIR", "articles/"),
        ("VITAE_LOGGING__JSON", "true"),
    ]);

    let settings = load(&CliArgs::parse_from(["vitae"])).expect("valid settings");

    assert_eq!(settings.site.title, "Jane Doe");
    assert_eq!(settings.sources.post_body_dir, "articles");
    assert!(matches!(settings.logging.format, LogFormat::Json));
}

#[test]
#[serial]
fn environment_splits_source_lists() {
    let _env = EnvGuard::set(&[("VITAE_SOURCES__PUBLICATIONS", "a.json,b.yaml")]);

    let settings = load(&CliArgs::parse_from(["vitae"])).expect("valid settings");

    assert_eq!(settings.sources.publications, ["a.json", "b.yaml"]);
    assert_eq!(
        settings.sources.education,
        ["education.json", "education.yaml"]
    );
}

#[test]
#[serial]
fn cli_overrides_win_over_environment() {
    let _env = EnvGuard::set(&[("VITAE_OUTPUT__DIR", "from-env")]);

    let settings = load(&CliArgs::parse_from(["vitae", "--output-dir", "from-cli"]))
        .expect("valid settings");

    assert_eq!(settings.output.dir, Path::new("from-cli"));
}
