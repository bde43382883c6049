//! Pre-cleaning analysis of the source file.

use std::collections::HashSet;
use std::path::Path;
use std::time::Instant;

use csvtidy_ingest::{read_decoded, read_rows};
use csvtidy_model::{AnalysisStats, DatasetConfiguration, RowInconsistency, html_entity_regex};
use tracing::info;

use crate::error::Result;

/// Data rows checked for column-count consistency.
pub const STRUCTURE_SAMPLE_ROWS: usize = 100;

/// Data rows checked for duplicates and empty fields.
pub const DUPLICATE_SAMPLE_ROWS: usize = 1000;

/// Gathers [`AnalysisStats`] for a source file.
///
/// Character-level statistics cover the whole file; row-level checks stop at
/// [`STRUCTURE_SAMPLE_ROWS`] and [`DUPLICATE_SAMPLE_ROWS`].
#[derive(Debug, Clone, Copy)]
pub struct QualityAnalyzer<'a> {
    config: &'a DatasetConfiguration,
}

impl<'a> QualityAnalyzer<'a> {
    pub fn new(config: &'a DatasetConfiguration) -> Self {
        Self { config }
    }

    pub fn analyze(&self, path: &Path) -> Result<AnalysisStats> {
        let start = Instant::now();
        let mut stats = AnalysisStats {
            expected_columns: self.config.column_count(),
            ..AnalysisStats::default()
        };

        let text = read_decoded(path, self.config.encoding())?;
        self.scan_text(&text, &mut stats);
        self.scan_rows(path, &mut stats)?;

        info!(
            path = %path.display(),
            lines = stats.total_lines,
            inconsistent = stats.inconsistent_rows,
            duplicates = stats.duplicate_rows,
            non_ascii = stats.non_ascii_chars,
            entities = stats.html_entity_occurrences,
            duration_ms = start.elapsed().as_millis(),
            "analysis complete"
        );
        Ok(stats)
    }

    fn scan_text(&self, text: &str, stats: &mut AnalysisStats) {
        stats.file_size_chars = text.chars().count();
        for line in text.lines() {
            stats.total_lines += 1;
            if line.trim().is_empty() {
                stats.empty_lines += 1;
            }
        }
        stats.header = text.lines().next().map(str::to_string);

        let non_ascii: HashSet<char> = text.chars().filter(|c| !c.is_ascii()).collect();
        stats.non_ascii_chars = non_ascii.len();

        let mut entities = HashSet::new();
        for found in html_entity_regex().find_iter(text) {
            stats.html_entity_occurrences += 1;
            entities.insert(found.as_str());
        }
        stats.distinct_html_entities = entities.len();
    }

    fn scan_rows(&self, path: &Path, stats: &mut AnalysisStats) -> Result<()> {
        let expected = self.config.column_count();
        let mut seen: HashSet<Vec<String>> = HashSet::new();

        let rows = read_rows(path, self.config.encoding(), self.config.dialect())?;
        for (index, row) in rows.skip(1).take(DUPLICATE_SAMPLE_ROWS).enumerate() {
            let row = row?;
            stats.rows_analyzed += 1;

            if index < STRUCTURE_SAMPLE_ROWS && row.fields.len() != expected {
                stats.inconsistencies.push(RowInconsistency {
                    line: row.line,
                    found: row.fields.len(),
                    expected,
                });
            }
            stats.empty_fields += row.fields.iter().filter(|f| f.trim().is_empty()).count();
            if !seen.insert(row.fields) {
                stats.duplicate_rows += 1;
            }
        }
        stats.inconsistent_rows = stats.inconsistencies.len();
        Ok(())
    }
}
