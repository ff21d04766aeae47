use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueHint, builder::BoolishValueParser};

/// Command-line arguments for the vitae binary.
#[derive(Debug, Parser)]
#[command(name = "vitae", version, about = "Academic homepage renderer")]
pub struct CliArgs {
    /// Optional path to a configuration file.
    #[arg(long = "config-file", env = "VITAE_CONFIG_FILE", value_name = "PATH")]
    pub config_file: Option<PathBuf>,

    #[command(flatten)]
    pub site: SiteOverrides,

    #[command(subcommand)]
    pub command: Option<Command>,
}

#[derive(Debug, Subcommand, Clone)]
pub enum Command {
    /// Render the home page and every post page into the output directory.
    Build(BuildArgs),
    /// Render one Markdown file to stdout.
    Render(RenderArgs),
    /// Print the titles of publications matching a query.
    Search(SearchArgs),
}

#[derive(Debug, Args, Default, Clone)]
pub struct BuildArgs {
    /// Only list publications matching this query on the home page.
    #[arg(long, value_name = "QUERY")]
    pub query: Option<String>,
}

#[derive(Debug, Args, Clone)]
pub struct RenderArgs {
    #[arg(value_name = "FILE", value_hint = ValueHint::FilePath)]
    pub file: PathBuf,

    /// Use the minimal fallback renderer.
    #[arg(long, action = clap::ArgAction::SetTrue)]
    pub fallback: bool,
}

#[derive(Debug, Args, Clone)]
pub struct SearchArgs {
    #[arg(value_name = "QUERY")]
    pub query: String,
}

/// Overrides accepted by every command.
#[derive(Debug, Args, Default, Clone)]
pub struct SiteOverrides {
    /// Override the local content directory.
    #[arg(long = "content-dir", value_name = "PATH", global = true, value_hint = ValueHint::DirPath)]
    pub content_dir: Option<PathBuf>,

    /// Fetch content over HTTP from this base URL instead of a directory.
    #[arg(long = "content-url", value_name = "URL", global = true)]
    pub content_url: Option<String>,

    /// Override the output directory.
    #[arg(long = "output-dir", value_name = "PATH", global = true, value_hint = ValueHint::DirPath)]
    pub output_dir: Option<PathBuf>,

    /// Override the Markdown renderer (comrak|minimal).
    #[arg(long = "render-engine", value_name = "ENGINE", global = true)]
    pub render_engine: Option<String>,

    /// Override the base log level (trace|debug|info|warn|error).
    #[arg(long = "log-level", value_name = "LEVEL", global = true)]
    pub log_level: Option<String>,

    /// Toggle JSON logging.
    #[arg(
        long = "log-json",
        value_name = "BOOL",
        global = true,
        value_parser = BoolishValueParser::new()
    )]
    pub log_json: Option<bool>,
}
