use serde::Serialize;

/// A sampled row whose field count differs from the header.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct RowInconsistency {
    /// 1-based physical line where the record starts.
    pub line: usize,
    pub found: usize,
    pub expected: usize,
}

/// Read-only statistics gathered from the source file before cleaning.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct AnalysisStats {
    // structure
    pub total_lines: usize,
    pub file_size_chars: usize,
    pub empty_lines: usize,
    pub header: Option<String>,
    // separators (sampled)
    pub expected_columns: usize,
    pub inconsistent_rows: usize,
    pub inconsistencies: Vec<RowInconsistency>,
    // encoding (whole file)
    pub non_ascii_chars: usize,
    pub html_entity_occurrences: usize,
    pub distinct_html_entities: usize,
    // quality (sampled)
    pub rows_analyzed: usize,
    pub empty_fields: usize,
    pub duplicate_rows: usize,
}

impl AnalysisStats {
    pub fn issue_count(&self) -> usize {
        self.inconsistencies.len()
    }

    /// Whether the analysis suggests running the cleaning stage.
    pub fn recommends_cleaning(&self) -> bool {
        self.issue_count() > 0
    }

    /// Statistics as label/value pairs, in report order.
    pub fn entries(&self) -> Vec<(&'static str, String)> {
        vec![
            ("total_lines", self.total_lines.to_string()),
            ("file_size_chars", self.file_size_chars.to_string()),
            ("empty_lines", self.empty_lines.to_string()),
            ("expected_columns", self.expected_columns.to_string()),
            ("inconsistent_rows", self.inconsistent_rows.to_string()),
            ("non_ascii_chars", self.non_ascii_chars.to_string()),
            (
                "html_entity_occurrences",
                self.html_entity_occurrences.to_string(),
            ),
            (
                "distinct_html_entities",
                self.distinct_html_entities.to_string(),
            ),
            ("rows_analyzed", self.rows_analyzed.to_string()),
            ("empty_fields", self.empty_fields.to_string()),
            ("duplicate_rows", self.duplicate_rows.to_string()),
        ]
    }
}
