//! Console diagnostics through `tracing` and `tracing-subscriber`.
//!
//! This is process-wide output for the binary. The per-run cleaning log lives
//! in [`crate::run_log`] and does not go through `tracing`.
//!
//! # Log Levels
//!
//! - `error`: stage failures
//! - `warn`: validation findings, encoding fallback, run log problems
//! - `info`: stage completion with counts and durations
//! - `debug`: dialect details, rewrite progress

use std::fs::OpenOptions;
use std::io;
use std::path::PathBuf;
use std::sync::Mutex;

use anyhow::{Context, Result};
use tracing::level_filters::LevelFilter;
use tracing_subscriber::fmt::format::FmtSpan;
use tracing_subscriber::fmt::{self, MakeWriter};
use tracing_subscriber::layer::{Layer, SubscriberExt};
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{EnvFilter, Registry};

/// Targets that follow the configured level; everything else stays at `warn`.
const CRATE_TARGETS: [&str; 6] = [
    "csvtidy",
    "csvtidy_cli",
    "csvtidy_ingest",
    "csvtidy_transform",
    "csvtidy_validate",
    "csvtidy_report",
];

type BoxedLayer = Box<dyn Layer<Registry> + Send + Sync>;

/// Log output format.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum LogFormat {
    #[default]
    Pretty,
    /// One line per event.
    Compact,
    /// One JSON object per event, plus span close events with durations.
    Json,
}

#[derive(Debug, Clone)]
pub struct LogConfig {
    pub level_filter: LevelFilter,
    /// Let `RUST_LOG` replace the level-based directives when it is set.
    pub use_env_filter: bool,
    pub with_ansi: bool,
    pub format: LogFormat,
    /// Append to this file instead of writing to stderr. File output carries
    /// timestamps and never uses ANSI colors.
    pub log_file: Option<PathBuf>,
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            level_filter: LevelFilter::WARN,
            use_env_filter: true,
            with_ansi: true,
            format: LogFormat::Pretty,
            log_file: None,
        }
    }
}

/// Installs the global subscriber. Call once, before any stage runs.
pub fn init_logging(config: &LogConfig) -> Result<()> {
    let layer = match &config.log_file {
        Some(path) => {
            let file = OpenOptions::new()
                .create(true)
                .append(true)
                .open(path)
                .with_context(|| format!("open log file {}", path.display()))?;
            format_layer(config.format, Mutex::new(file), false, true)
        }
        None => format_layer(config.format, io::stderr, config.with_ansi, false),
    };

    tracing_subscriber::registry()
        .with(layer)
        .with(build_env_filter(config))
        .try_init()
        .context("install tracing subscriber")
}

fn format_layer<W>(format: LogFormat, writer: W, ansi: bool, timestamps: bool) -> BoxedLayer
where
    W: for<'writer> MakeWriter<'writer> + Send + Sync + 'static,
{
    let layer = fmt::layer()
        .with_writer(writer)
        .with_ansi(ansi)
        .with_target(false);
    match (format, timestamps) {
        (LogFormat::Json, _) => layer.json().with_span_events(FmtSpan::CLOSE).boxed(),
        (LogFormat::Compact, true) => layer.compact().boxed(),
        (LogFormat::Compact, false) => layer.compact().without_time().boxed(),
        (LogFormat::Pretty, true) => layer.boxed(),
        (LogFormat::Pretty, false) => layer.without_time().boxed(),
    }
}

fn build_env_filter(config: &LogConfig) -> EnvFilter {
    if config.use_env_filter
        && let Ok(filter) = EnvFilter::try_from_default_env()
    {
        return filter;
    }
    EnvFilter::new(default_directives(config.level_filter))
}

fn default_directives(level_filter: LevelFilter) -> String {
    let level = level_filter.to_string().to_lowercase();
    std::iter::once("warn".to_string())
        .chain(CRATE_TARGETS.iter().map(|target| format!("{target}={level}")))
        .collect::<Vec<_>>()
        .join(",")
}
