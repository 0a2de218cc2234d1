//! CLI argument definitions for the restyle tool.

use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};
use clap_verbosity_flag::{Verbosity, WarnLevel};
use colorchoice_clap::Color;

use restyle_model::{AccentColor, Flavor, GeneratorVariant};

#[derive(Parser)]
#[command(
    name = "restyle",
    version,
    about = "Re-color a web page onto the fixed target palette",
    long_about = "Analyze a fetched page's HTML and CSS, map every discovered color\n\
                  onto the 4-flavor / 14-accent target palette, and generate a\n\
                  host-scoped theme stylesheet."
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    /// Adjust log verbosity (-v for debug, -vv for trace, -q for errors only).
    #[command(flatten)]
    pub verbosity: Verbosity<WarnLevel>,

    /// Control ANSI color output (auto, always, never).
    #[command(flatten)]
    pub color: Color,

    /// Explicit log level (overrides -v/-q flags).
    #[arg(long = "log-level", value_enum, global = true)]
    pub log_level: Option<LogLevelArg>,

    /// Log output format (pretty for human, json for machine parsing).
    #[arg(
        long = "log-format",
        value_enum,
        default_value = "pretty",
        global = true
    )]
    pub log_format: LogFormatArg,

    /// Write logs to a file instead of stderr.
    #[arg(long = "log-file", value_name = "PATH", global = true)]
    pub log_file: Option<PathBuf>,
}

#[derive(Subcommand)]
pub enum Command {
    /// Run the full pipeline and write the generated theme.
    Theme(ThemeArgs),

    /// Analyze a page and emit the snapshot as JSON.
    Analyze(AnalyzeArgs),

    /// List the target palette: flavors, tokens, and the accent wheel.
    Palette,
}

#[derive(Parser)]
pub struct ThemeArgs {
    /// Path to the fetched page HTML.
    #[arg(value_name = "HTML_FILE")]
    pub html: PathBuf,

    /// Paths to the page's CSS files, concatenated in order.
    #[arg(long = "css", value_name = "CSS_FILE", required = true)]
    pub css: Vec<PathBuf>,

    /// Source page URL, used for host scoping and metadata.
    #[arg(long = "url", value_name = "URL")]
    pub url: String,

    /// Target flavor.
    #[arg(long = "flavor", default_value = "mocha", value_parser = parse_flavor)]
    pub flavor: Flavor,

    /// Main accent color.
    #[arg(long = "accent", default_value = "blue", value_parser = parse_accent)]
    pub accent: AccentColor,

    /// Generator emission strategy.
    #[arg(long = "variant", value_enum, default_value = "dynamic")]
    pub variant: VariantArg,

    /// Output path for the theme document (default: restyle.theme.less).
    #[arg(long = "output", value_name = "PATH")]
    pub output: Option<PathBuf>,

    /// Output path for the JSON report (default: theme_report.json next
    /// to the theme document).
    #[arg(long = "report", value_name = "PATH")]
    pub report: Option<PathBuf>,

    /// Branding color hints to seed the dominant color list.
    #[arg(long = "branding-color", value_name = "COLOR")]
    pub branding_colors: Vec<String>,

    /// Map at most this many selectors (highest frequency first).
    #[arg(long = "selector-limit", value_name = "N")]
    pub selector_limit: Option<usize>,

    /// Skip custom-property mapping.
    #[arg(long = "no-variables")]
    pub no_variables: bool,

    /// Skip SVG color mapping.
    #[arg(long = "no-svgs")]
    pub no_svgs: bool,

    /// Skip selector mapping.
    #[arg(long = "no-selectors")]
    pub no_selectors: bool,

    /// Emit per-rule provenance comments in the theme document.
    #[arg(long = "verbose-comments")]
    pub verbose_comments: bool,

    /// Validate and report without writing output files.
    #[arg(long = "dry-run")]
    pub dry_run: bool,
}

#[derive(Parser)]
pub struct AnalyzeArgs {
    /// Path to the fetched page HTML.
    #[arg(value_name = "HTML_FILE")]
    pub html: PathBuf,

    /// Paths to the page's CSS files, concatenated in order.
    #[arg(long = "css", value_name = "CSS_FILE", required = true)]
    pub css: Vec<PathBuf>,

    /// Source page URL recorded in the snapshot.
    #[arg(long = "url", value_name = "URL")]
    pub url: String,

    /// Write the snapshot JSON here instead of stdout.
    #[arg(long = "output", value_name = "PATH")]
    pub output: Option<PathBuf>,
}

#[derive(Clone, Copy, ValueEnum)]
pub enum VariantArg {
    Baked,
    Dynamic,
    Refined,
}

impl From<VariantArg> for GeneratorVariant {
    fn from(value: VariantArg) -> Self {
        match value {
            VariantArg::Baked => GeneratorVariant::Baked,
            VariantArg::Dynamic => GeneratorVariant::Dynamic,
            VariantArg::Refined => GeneratorVariant::Refined,
        }
    }
}

/// CLI log level choices.
#[derive(Clone, Copy, ValueEnum)]
pub enum LogLevelArg {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

/// CLI log format choices.
#[derive(Clone, Copy, ValueEnum)]
pub enum LogFormatArg {
    Pretty,
    Compact,
    Json,
}

fn parse_flavor(value: &str) -> Result<Flavor, String> {
    Flavor::parse(value).ok_or_else(|| {
        format!(
            "unknown flavor '{value}' (expected one of: latte, frappe, macchiato, mocha)"
        )
    })
}

fn parse_accent(value: &str) -> Result<AccentColor, String> {
    AccentColor::parse(value)
        .ok_or_else(|| format!("unknown accent '{value}' (run `restyle palette` for the list)"))
}
