//! CLI argument definitions for yutool.

use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};
use clap_verbosity_flag::{Verbosity, WarnLevel};
use colorchoice_clap::Color;
use tracing::level_filters::LevelFilter;

use yutool_cli::logging::LogFormat;
use yutool_cli::pipeline::DEFAULT_TARGET_DIR;

#[derive(Parser)]
#[command(
    name = "yutool",
    version,
    about = "Export input-method releases for the practice application",
    long_about = "Export the roots and shortcut dictionaries of an input-method release\n\
                  as sorted text files.\n\n\
                  The practice configuration is then rendered from a JSON5 template\n\
                  whose items are rebuilt from those files."
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    /// Adjust log verbosity (-v for info, -vv for debug, -q for errors only).
    #[command(flatten)]
    pub verbosity: Verbosity<WarnLevel>,

    /// Control ANSI color output (auto, always, never).
    #[command(flatten)]
    pub color: Color,

    /// Explicit log level (overrides -v/-q flags).
    #[arg(long = "log-level", value_enum, global = true)]
    pub log_level: Option<LogLevelArg>,

    /// Log output format.
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

impl Cli {
    /// Level requested by `--log-level`, else by `-v`/`-q`.
    pub fn requested_level(&self) -> Option<LevelFilter> {
        self.log_level.map(LevelFilter::from).or_else(|| {
            self.verbosity
                .is_present()
                .then(|| self.verbosity.tracing_level_filter())
        })
    }
}

#[derive(Subcommand)]
pub enum Command {
    /// Export text files and the rendered configuration for a release.
    Export(ExportArgs),

    /// Show which dictionary files a release resolves to.
    Inspect(InspectArgs),
}

#[derive(Parser)]
pub struct ExportArgs {
    /// Release archive (.zip) or unpacked release directory.
    #[arg(value_name = "SOURCE")]
    pub source: PathBuf,

    /// Output directory, created when missing.
    #[arg(long = "target", short = 't', value_name = "DIR", default_value = DEFAULT_TARGET_DIR)]
    pub target: PathBuf,

    /// Read roots from a CSV (text, code columns) instead of the roots dictionary.
    #[arg(long = "root-csv", value_name = "PATH")]
    pub root_csv: Option<PathBuf>,

    /// Write the bumped config_version back into the template.
    #[arg(long = "update", short = 'u')]
    pub update: bool,

    /// Method name (default: the schema declared by the release).
    #[arg(long = "method", value_name = "NAME")]
    pub method: Option<String>,

    /// Export a single variant (default: base method plus every variant found).
    #[arg(long = "variant", value_name = "SUFFIX")]
    pub variant: Option<String>,

    /// Release version used in output names (default: from the archive name).
    #[arg(long = "release-version", value_name = "VERSION")]
    pub release_version: Option<String>,

    /// Template directory; repeat to search several, first match wins.
    #[arg(long = "template-dir", value_name = "DIR")]
    pub template_dirs: Vec<PathBuf>,

    /// Only write the text exports.
    #[arg(long = "no-template", conflicts_with = "update")]
    pub no_template: bool,

    /// How the root key is taken from the last field of a root line.
    #[arg(long = "root-key", value_enum, default_value = "lm")]
    pub root_key: RootKeyArg,
}

#[derive(Parser)]
pub struct InspectArgs {
    /// Release archive (.zip) or unpacked release directory.
    #[arg(value_name = "SOURCE")]
    pub source: PathBuf,

    /// Method name (default: the schema declared by the release).
    #[arg(long = "method", value_name = "NAME")]
    pub method: Option<String>,

    /// Only resolve this variant.
    #[arg(long = "variant", value_name = "SUFFIX")]
    pub variant: Option<String>,
}

/// Root key extraction rule.
#[derive(Clone, Copy, ValueEnum)]
pub enum RootKeyArg {
    /// Strip a leading `/lm`.
    Lm,
    /// Drop the first three characters.
    #[value(name = "fixed3")]
    Fixed3,
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

impl From<LogLevelArg> for LevelFilter {
    fn from(level: LogLevelArg) -> Self {
        match level {
            LogLevelArg::Error => LevelFilter::ERROR,
            LogLevelArg::Warn => LevelFilter::WARN,
            LogLevelArg::Info => LevelFilter::INFO,
            LogLevelArg::Debug => LevelFilter::DEBUG,
            LogLevelArg::Trace => LevelFilter::TRACE,
        }
    }
}

/// CLI log format choices.
#[derive(Clone, Copy, ValueEnum)]
pub enum LogFormatArg {
    Pretty,
    Compact,
    Json,
}

impl From<LogFormatArg> for LogFormat {
    fn from(format: LogFormatArg) -> Self {
        match format {
            LogFormatArg::Pretty => LogFormat::Pretty,
            LogFormatArg::Compact => LogFormat::Compact,
            LogFormatArg::Json => LogFormat::Json,
        }
    }
}
