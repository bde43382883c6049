//! Append-only log of cleaning runs.
//!
//! One [`RunLog`] belongs to one pipeline run. Lines from every run land in
//! the same file, so the log accumulates across invocations.

use std::fmt;
use std::fs::{File, OpenOptions};
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use chrono::Local;
use tracing::warn;

/// Severity of a run log line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunLogLevel {
    Info,
    Warning,
    Error,
}

impl fmt::Display for RunLogLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Info => "INFO",
            Self::Warning => "WARNING",
            Self::Error => "ERROR",
        })
    }
}

/// Sink writing `YYYY-MM-DD HH:MM:SS - LEVEL - message` lines.
#[derive(Debug)]
pub struct RunLog {
    path: Option<PathBuf>,
    file: Option<File>,
}

impl RunLog {
    /// Opens `path` for appending, creating it if needed.
    pub fn open(path: &Path) -> io::Result<Self> {
        let file = OpenOptions::new().create(true).append(true).open(path)?;
        Ok(Self {
            path: Some(path.to_path_buf()),
            file: Some(file),
        })
    }

    /// A sink that drops every line.
    pub fn disabled() -> Self {
        Self {
            path: None,
            file: None,
        }
    }

    pub fn path(&self) -> Option<&Path> {
        self.path.as_deref()
    }

    pub fn info(&mut self, message: &str) {
        self.record(RunLogLevel::Info, message);
    }

    pub fn warning(&mut self, message: &str) {
        self.record(RunLogLevel::Warning, message);
    }

    /// Appends one line. A failed write disables the sink for the rest of the
    /// run instead of interrupting it.
    pub fn record(&mut self, level: RunLogLevel, message: &str) {
        let Some(file) = self.file.as_mut() else {
            return;
        };
        let line = format_line(&Local::now().format("%Y-%m-%d %H:%M:%S").to_string(), level, message);
        if let Err(error) = file.write_all(line.as_bytes()) {
            warn!(path = ?self.path, %error, "run log write failed, disabling run log");
            self.file = None;
        }
    }
}

fn format_line(timestamp: &str, level: RunLogLevel, message: &str) -> String {
    format!("{timestamp} - {level} - {message}\n")
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    #[test]
    fn test_format_line() {
        assert_eq!(
            format_line("2026-10-15 08:30:00", RunLogLevel::Warning, "slow"),
            "2026-10-15 08:30:00 - WARNING - slow\n"
        );
    }

    #[test]
    fn test_lines_accumulate_across_opens() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("run.log");

        RunLog::open(&path).unwrap().info("first");
        let mut log = RunLog::open(&path).unwrap();
        log.record(RunLogLevel::Error, "second");

        let contents = fs::read_to_string(&path).unwrap();
        let lines: Vec<&str> = contents.lines().collect();
        assert_eq!(lines.len(), 2);
        assert!(lines[0].ends_with(" - INFO - first"));
        assert!(lines[1].ends_with(" - ERROR - second"));
        assert_eq!(lines[0].len(), "YYYY-MM-DD HH:MM:SS - INFO - first".len());
    }

    #[test]
    fn test_disabled_sink_writes_nothing() {
        let mut log = RunLog::disabled();
        log.info("ignored");
        assert!(log.path().is_none());
    }
}
