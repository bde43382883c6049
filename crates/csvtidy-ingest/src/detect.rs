//! Dialect and quality detection.

use std::fs::File;
use std::io::Read;
use std::path::{Path, PathBuf};
use std::time::Instant;

use csvtidy_model::{
    DELIMITER_CANDIDATES, DatasetConfiguration, Dialect, IssueKind, QualityIssues,
    has_problematic_char, looks_like_html_entity,
};
use tracing::{debug, info};

use crate::encoding::detect_encoding;
use crate::error::{IngestError, Result};
use crate::lines::{DecodedLines, count_lines};
use crate::records::{ParsedRow, read_rows};

/// Bytes inspected when choosing the quote character.
pub const QUOTE_SCAN_BYTES: usize = 10_000;

/// Data rows inspected by the quality scan.
pub const QUALITY_SCAN_ROWS: usize = 1000;

/// Infers a [`DatasetConfiguration`] from a file on disk.
#[derive(Debug, Clone)]
pub struct DialectDetector {
    path: PathBuf,
}

impl DialectDetector {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Runs every detection step in order: encoding, delimiter, quote
    /// character, row count, column count, quality scan.
    ///
    /// # Errors
    ///
    /// I/O failures, an empty file, or a line the detected encoding cannot
    /// decode.
    pub fn detect(&self) -> Result<DatasetConfiguration> {
        let start = Instant::now();
        let path = self.path.as_path();

        let encoding = detect_encoding(path)?;

        let header_line = match DecodedLines::open(path, encoding)?.next() {
            Some(line) => line?,
            None => {
                return Err(IngestError::EmptyFile {
                    path: path.to_path_buf(),
                });
            }
        };
        let delimiter = detect_delimiter(&header_line);
        let quote_char = detect_quote_char(&read_prefix(path, QUOTE_SCAN_BYTES)?);
        let dialect = Dialect::new(delimiter, quote_char).map_err(|source| {
            IngestError::InvalidConfiguration {
                path: path.to_path_buf(),
                source,
            }
        })?;
        debug!(?delimiter, ?quote_char, %encoding, "dialect inferred");

        let row_count = count_lines(path, encoding)?.saturating_sub(1);

        let mut rows = read_rows(path, encoding, dialect)?;
        let column_count = match rows.next() {
            Some(header) => header?.fields.len(),
            None => 0,
        };
        let quality_issues = scan_quality(rows, column_count)?;

        let config = DatasetConfiguration::new(
            path,
            dialect,
            encoding,
            column_count,
            row_count,
            quality_issues,
        )
        .map_err(|source| IngestError::InvalidConfiguration {
            path: path.to_path_buf(),
            source,
        })?;

        info!(
            path = %path.display(),
            delimiter = ?config.delimiter(),
            quote_char = ?config.quote_char(),
            encoding = %config.encoding(),
            columns = config.column_count(),
            rows = config.row_count(),
            issues = config.total_issues(),
            duration_ms = start.elapsed().as_millis(),
            "detection complete"
        );
        Ok(config)
    }
}

/// Picks the most frequent delimiter candidate in `header_line`.
///
/// Ties, including no candidate at all, go to the earliest candidate in
/// [`DELIMITER_CANDIDATES`]. Quoting is ignored, so a quoted delimiter in the
/// header still counts.
pub fn detect_delimiter(header_line: &str) -> char {
    let mut best = DELIMITER_CANDIDATES[0];
    let mut best_count = 0;
    for candidate in DELIMITER_CANDIDATES {
        let count = header_line.matches(candidate).count();
        if count > best_count {
            best = candidate;
            best_count = count;
        }
    }
    best
}

/// Double quote unless single quotes strictly outnumber it in `sample`.
pub fn detect_quote_char(sample: &[u8]) -> char {
    let double = sample.iter().filter(|b| **b == b'"').count();
    let single = sample.iter().filter(|b| **b == b'\'').count();
    if single > double { '\'' } else { '"' }
}

/// Tallies quality issues over the first [`QUALITY_SCAN_ROWS`] data rows.
///
/// HTML-entity and special-character issues are flagged at most once per row;
/// every whitespace-only field counts on its own.
pub fn scan_quality<I>(rows: I, expected_columns: usize) -> Result<QualityIssues>
where
    I: IntoIterator<Item = Result<ParsedRow>>,
{
    let mut issues = QualityIssues::default();
    for row in rows.into_iter().take(QUALITY_SCAN_ROWS) {
        let row = row?;
        if row.fields.len() != expected_columns {
            issues.record(IssueKind::SeparatorInconsistencies, 1);
        }
        let empty = row.fields.iter().filter(|f| f.trim().is_empty()).count();
        issues.record(IssueKind::EmptyFields, empty);
        if row.fields.iter().any(|f| looks_like_html_entity(f)) {
            issues.record(IssueKind::HtmlEntities, 1);
        }
        if row.fields.iter().any(|f| has_problematic_char(f)) {
            issues.record(IssueKind::SpecialChars, 1);
        }
    }
    Ok(issues)
}

fn read_prefix(path: &Path, limit: usize) -> Result<Vec<u8>> {
    let file = File::open(path).map_err(|e| IngestError::from_io(path, e))?;
    let mut buffer = Vec::with_capacity(limit);
    file.take(limit as u64)
        .read_to_end(&mut buffer)
        .map_err(|e| IngestError::from_io(path, e))?;
    Ok(buffer)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row(line: usize, fields: &[&str]) -> Result<ParsedRow> {
        Ok(ParsedRow {
            line,
            fields: fields.iter().map(|f| f.to_string()).collect(),
        })
    }

    #[test]
    fn test_delimiter_prefers_highest_count() {
        assert_eq!(detect_delimiter("a,b,c;d"), ',');
        assert_eq!(detect_delimiter("a\tb\tc"), '\t');
    }

    #[test]
    fn test_delimiter_ties_follow_candidate_order() {
        assert_eq!(detect_delimiter("a;b,c"), ';');
        assert_eq!(detect_delimiter("a|b\tc"), '\t');
        assert_eq!(detect_delimiter("single"), ';');
    }

    #[test]
    fn test_quote_char_requires_strict_majority() {
        assert_eq!(detect_quote_char(b"'a','b'"), '\'');
        assert_eq!(detect_quote_char(b"\"a\",'b'"), '"');
        assert_eq!(detect_quote_char(b""), '"');
    }

    #[test]
    fn test_scan_quality_flags_once_per_row() {
        let rows = vec![
            row(2, &["1", "a &amp; b", "x&y;"]),
            row(3, &["2", " ", "ok"]),
            row(4, &["3", "Zürich…"]),
            row(5, &[]),
        ];
        let issues = scan_quality(rows, 3).unwrap();
        assert_eq!(issues.get(IssueKind::HtmlEntities), 1);
        assert_eq!(issues.get(IssueKind::EmptyFields), 1);
        assert_eq!(issues.get(IssueKind::SpecialChars), 1);
        assert_eq!(issues.get(IssueKind::SeparatorInconsistencies), 2);
    }

    #[test]
    fn test_scan_quality_allows_spanish_accents() {
        let issues = scan_quality(vec![row(2, &["José", "Muñoz"])], 2).unwrap();
        assert_eq!(issues.total(), 0);
    }
}
