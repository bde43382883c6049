//! Whole-file rewrite with crash-safe replacement.

use std::ffi::OsString;
use std::fs::{self, File};
use std::io::{self, BufWriter, Write};
use std::path::{Path, PathBuf};
use std::time::Instant;

use csv::{QuoteStyle, Terminator, WriterBuilder};
use csvtidy_ingest::DecodedLines;
use csvtidy_model::{CleaningStatistics, DatasetConfiguration, Dialect, TextEncoding};
use tracing::{debug, info};

use crate::error::{Result, TransformError};
use crate::normalize::RowNormalizer;

/// Source lines between progress reports.
pub const PROGRESS_INTERVAL: u64 = 10_000;

/// Path of the temporary file written next to `destination`.
pub fn temp_sibling(destination: &Path) -> PathBuf {
    let mut name = destination
        .file_name()
        .map(OsString::from)
        .unwrap_or_default();
    name.push(".tmp");
    destination.with_file_name(name)
}

/// Streams a source file through [`RowNormalizer`] into a new UTF-8 file.
///
/// The header line is copied as decoded. Blank lines and rows the normalizer
/// rejects are dropped and counted as skipped. Output is written to
/// [`temp_sibling`] and only moved over the destination after it has been
/// flushed and synced, so the destination is never seen half-written.
#[derive(Debug, Clone, Copy)]
pub struct FileRewriter {
    dialect: Dialect,
    encoding: TextEncoding,
    normalizer: RowNormalizer,
}

impl FileRewriter {
    pub fn new(config: &DatasetConfiguration) -> Self {
        Self {
            dialect: config.dialect(),
            encoding: config.encoding(),
            normalizer: RowNormalizer::for_config(config),
        }
    }

    pub fn rewrite(&self, source: &Path, destination: &Path) -> Result<CleaningStatistics> {
        self.rewrite_with_progress(source, destination, |_| {})
    }

    /// Like [`rewrite`](Self::rewrite), calling `on_progress` with the number
    /// of data lines read every [`PROGRESS_INTERVAL`] lines.
    pub fn rewrite_with_progress<F>(
        &self,
        source: &Path,
        destination: &Path,
        mut on_progress: F,
    ) -> Result<CleaningStatistics>
    where
        F: FnMut(u64),
    {
        let start = Instant::now();
        let temp_path = temp_sibling(destination);
        let mut lines = DecodedLines::open(source, self.encoding)?;

        let file = File::create(&temp_path).map_err(|e| temp_error("create", &temp_path, e))?;
        let mut out = BufWriter::new(file);
        if let Some(header) = lines.next() {
            let header = header?;
            out.write_all(header.as_bytes())
                .and_then(|()| out.write_all(b"\n"))
                .map_err(|e| temp_error("write", &temp_path, e))?;
        }

        let mut writer = WriterBuilder::new()
            .delimiter(self.dialect.delimiter_byte())
            .quote(self.dialect.quote_byte())
            .quote_style(QuoteStyle::Necessary)
            .terminator(Terminator::Any(b'\n'))
            .flexible(true)
            .from_writer(out);

        let mut stats = CleaningStatistics::new();
        for line in lines {
            let line = line?;
            stats.record_row();

            if line.trim().is_empty() {
                stats.record_skipped();
            } else {
                let row = self.normalizer.normalize_line(&line);
                if row.success {
                    writer
                        .write_record(&row.fields)
                        .map_err(|source| TransformError::CsvWrite {
                            path: temp_path.clone(),
                            source,
                        })?;
                    stats.record_cleaned(row.counts);
                } else {
                    stats.absorb(row.counts);
                    stats.record_skipped();
                }
            }

            if stats.total_rows() % PROGRESS_INTERVAL == 0 {
                debug!(rows = stats.total_rows(), "rewrite progress");
                on_progress(stats.total_rows());
            }
        }

        writer
            .flush()
            .map_err(|e| temp_error("flush", &temp_path, e))?;
        let out = writer.into_inner().map_err(|e| {
            temp_error("flush", &temp_path, io::Error::new(e.error().kind(), e.to_string()))
        })?;
        let file = out
            .into_inner()
            .map_err(|e| temp_error("flush", &temp_path, e.into_error()))?;
        file.sync_all()
            .map_err(|e| temp_error("sync", &temp_path, e))?;
        drop(file);

        replace(&temp_path, destination)?;

        info!(
            source = %source.display(),
            destination = %destination.display(),
            total = stats.total_rows(),
            cleaned = stats.cleaned_rows(),
            skipped = stats.skipped_rows(),
            duration_ms = start.elapsed().as_millis(),
            "rewrite complete"
        );
        Ok(stats)
    }
}

// Remove-then-move: `fs::rename` cannot overwrite on every platform.
fn replace(temp_path: &Path, destination: &Path) -> Result<()> {
    let replace_error = |source| TransformError::AtomicReplace {
        temp_path: temp_path.to_path_buf(),
        target_path: destination.to_path_buf(),
        source,
    };
    if destination.exists() {
        fs::remove_file(destination).map_err(replace_error)?;
    }
    fs::rename(temp_path, destination).map_err(replace_error)
}

fn temp_error(operation: &'static str, path: &Path, source: io::Error) -> TransformError {
    TransformError::TempFile {
        operation,
        path: path.to_path_buf(),
        source,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn temp_sibling_appends_suffix() {
        assert_eq!(
            temp_sibling(Path::new("out/dataset_cleaned.csv")),
            PathBuf::from("out/dataset_cleaned.csv.tmp")
        );
    }
}
