//! Results of the post-cleaning checks.
//!
//! Each check is independent; a failing check is a finding to report, never a
//! reason to stop the run.

use serde::Serialize;

/// Structural mismatch examples kept per run.
pub const MAX_STRUCTURE_EXAMPLES: usize = 10;

/// Largest tolerated difference between original and cleaned data rows.
///
/// Covers blank lines and malformed rows dropped by the rewriter.
pub const ROW_DRIFT_TOLERANCE: usize = 5;

/// Re-parse of the cleaned file against its own header.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct StructureCheck {
    pub is_valid_csv: bool,
    pub total_rows: usize,
    pub total_columns: usize,
    pub header: Vec<String>,
    pub consistent_columns: bool,
    pub inconsistent_rows: usize,
    pub errors: Vec<String>,
}

impl StructureCheck {
    pub fn passed(&self) -> bool {
        self.is_valid_csv && self.consistent_columns
    }

    /// Records a mismatching row; examples stop accumulating at the cap.
    pub fn record_mismatch(&mut self, line: usize, found: usize) {
        self.consistent_columns = false;
        self.inconsistent_rows += 1;
        if self.errors.len() < MAX_STRUCTURE_EXAMPLES {
            self.errors.push(format!(
                "Row {line}: {found} columns (expected: {})",
                self.total_columns
            ));
        }
    }
}

/// Residual encoding defects in the cleaned file.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct EncodingCheck {
    /// Distinct characters outside ASCII and the allow-list.
    pub problematic_chars: usize,
    /// Residual entity pattern occurrences.
    pub html_entities: usize,
    pub sample_chars: Vec<char>,
}

impl EncodingCheck {
    pub fn passed(&self) -> bool {
        self.problematic_chars == 0
    }

    pub fn has_residual_entities(&self) -> bool {
        self.html_entities > 0
    }
}

/// Row-count comparison between original and cleaned files.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct IntegrityCheck {
    pub original_rows: usize,
    pub cleaned_rows: usize,
    pub row_difference: usize,
    pub data_preserved: bool,
}

impl IntegrityCheck {
    pub fn compare(original_rows: usize, cleaned_rows: usize) -> Self {
        let row_difference = original_rows.abs_diff(cleaned_rows);
        Self {
            original_rows,
            cleaned_rows,
            row_difference,
            data_preserved: row_difference <= ROW_DRIFT_TOLERANCE,
        }
    }

    pub fn passed(&self) -> bool {
        self.data_preserved
    }
}

/// The three checks of one validation run.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ValidationReport {
    pub structure: StructureCheck,
    pub encoding: EncodingCheck,
    pub integrity: IntegrityCheck,
}

impl ValidationReport {
    pub fn passed(&self) -> bool {
        self.structure.passed() && self.encoding.passed() && self.integrity.passed()
    }
}
