//! CLI argument definitions.

use std::io::{self, IsTerminal};
use std::path::PathBuf;

use clap::{ColorChoice, Parser, Subcommand, ValueEnum};
use clap_verbosity_flag::{Verbosity, WarnLevel};
use colorchoice_clap::Color;
use csvtidy_cli::logging::{LogConfig, LogFormat};
use tracing::level_filters::LevelFilter;

#[derive(Parser)]
#[command(
    name = "csvtidy",
    version,
    about = "Detect, clean and validate delimited text files",
    long_about = "Detect the dialect of a CSV-like file, repair its text and structure,\n\
                  and validate the cleaned result.\n\n\
                  Each run writes the cleaned file, three stage reports and an\n\
                  append-only run log into the output directory."
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    /// More or less console output (-v info, -vv debug, -q errors only).
    #[command(flatten)]
    pub verbosity: Verbosity<WarnLevel>,

    #[command(flatten)]
    pub color: Color,

    /// Console log level; takes precedence over -v/-q and RUST_LOG.
    #[arg(long = "log-level", value_enum, global = true)]
    pub log_level: Option<LogLevelArg>,

    #[arg(long = "log-format", value_enum, default_value = "pretty", global = true)]
    pub log_format: LogFormatArg,

    /// Append console logs to this file instead of stderr.
    #[arg(long = "log-file", value_name = "PATH", global = true)]
    pub log_file: Option<PathBuf>,
}

impl Cli {
    /// `--log-level` beats `-v/-q`, which beat `RUST_LOG`.
    pub fn log_config(&self) -> LogConfig {
        let explicit = self.log_level.map(LevelFilter::from);
        LogConfig {
            level_filter: explicit.unwrap_or_else(|| self.verbosity.tracing_level_filter()),
            use_env_filter: explicit.is_none() && !self.verbosity.is_present(),
            with_ansi: match self.color.color {
                ColorChoice::Always => true,
                ColorChoice::Never => false,
                ColorChoice::Auto => io::stderr().is_terminal(),
            },
            format: self.log_format.into(),
            log_file: self.log_file.clone(),
        }
    }
}

#[derive(Subcommand)]
pub enum Command {
    /// Run detect, analyze, clean and validate on one file.
    Clean(CleanArgs),

    /// Print the detected dialect and quality issues; writes nothing.
    Detect(DetectArgs),

    /// Run the pipeline on several files or directories.
    Batch(BatchArgs),
}

#[derive(Parser)]
pub struct CleanArgs {
    #[arg(value_name = "FILE")]
    pub input: PathBuf,

    /// Output directory (default: the input file's directory).
    #[arg(short = 'o', long = "output-dir", value_name = "DIR")]
    pub output_dir: Option<PathBuf>,

    /// Clean even when detection finds no issues.
    #[arg(short = 'f', long = "force")]
    pub force: bool,

    /// Print the run outcome as JSON instead of tables.
    #[arg(long = "json")]
    pub json: bool,
}

#[derive(Parser)]
pub struct DetectArgs {
    #[arg(value_name = "FILE")]
    pub input: PathBuf,

    #[arg(long = "json")]
    pub json: bool,
}

#[derive(Parser)]
pub struct BatchArgs {
    /// Files or directories; a directory contributes its *.csv files.
    #[arg(value_name = "PATH", required = true)]
    pub paths: Vec<PathBuf>,

    /// Output root; each file gets a subdirectory named after it.
    #[arg(short = 'o', long = "output-dir", value_name = "DIR")]
    pub output_dir: Option<PathBuf>,

    #[arg(short = 'f', long = "force")]
    pub force: bool,
}

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
