//! Counters accumulated while rewriting a file.

use std::ops::AddAssign;

use serde::Serialize;

/// Per-row counters reported by the row normalizer.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct NormalizationCounts {
    pub character_replacements: u64,
    pub html_entities_fixed: u64,
    pub whitespace_normalized: u64,
}

impl AddAssign for NormalizationCounts {
    fn add_assign(&mut self, other: Self) {
        self.character_replacements += other.character_replacements;
        self.html_entities_fixed += other.html_entities_fixed;
        self.whitespace_normalized += other.whitespace_normalized;
    }
}

/// Aggregate statistics for one rewrite.
///
/// Starts at zero and only grows; there is no way to decrement or reset a
/// counter once the stage has begun.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct CleaningStatistics {
    total_rows: u64,
    cleaned_rows: u64,
    skipped_rows: u64,
    character_replacements: u64,
    html_entities_fixed: u64,
    whitespace_normalized: u64,
}

impl CleaningStatistics {
    pub fn new() -> Self {
        Self::default()
    }

    /// Counts a data line read from the source.
    pub fn record_row(&mut self) {
        self.total_rows += 1;
    }

    pub fn record_cleaned(&mut self, counts: NormalizationCounts) {
        self.cleaned_rows += 1;
        self.absorb(counts);
    }

    pub fn record_skipped(&mut self) {
        self.skipped_rows += 1;
    }

    /// Adds field counters without counting a row, used when a row is
    /// normalized but then rejected.
    pub fn absorb(&mut self, counts: NormalizationCounts) {
        self.character_replacements += counts.character_replacements;
        self.html_entities_fixed += counts.html_entities_fixed;
        self.whitespace_normalized += counts.whitespace_normalized;
    }

    pub fn total_rows(&self) -> u64 {
        self.total_rows
    }

    pub fn cleaned_rows(&self) -> u64 {
        self.cleaned_rows
    }

    pub fn skipped_rows(&self) -> u64 {
        self.skipped_rows
    }

    pub fn character_replacements(&self) -> u64 {
        self.character_replacements
    }

    pub fn html_entities_fixed(&self) -> u64 {
        self.html_entities_fixed
    }

    pub fn whitespace_normalized(&self) -> u64 {
        self.whitespace_normalized
    }

    /// Share of data rows written, as a percentage; zero when nothing was read.
    pub fn success_rate(&self) -> f64 {
        if self.total_rows == 0 {
            0.0
        } else {
            self.cleaned_rows as f64 / self.total_rows as f64 * 100.0
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn starts_at_zero() {
        let stats = CleaningStatistics::new();
        assert_eq!(stats, CleaningStatistics::default());
        assert_eq!(stats.success_rate(), 0.0);
    }

    #[test]
    fn row_law_holds_after_mixed_rows() {
        let mut stats = CleaningStatistics::new();
        for _ in 0..3 {
            stats.record_row();
        }
        let counts = NormalizationCounts {
            character_replacements: 1,
            html_entities_fixed: 0,
            whitespace_normalized: 2,
        };
        stats.record_cleaned(counts);
        stats.record_cleaned(counts);
        stats.record_skipped();
        assert_eq!(stats.total_rows() - stats.skipped_rows(), stats.cleaned_rows());
        assert_eq!(stats.character_replacements(), 2);
        assert_eq!(stats.whitespace_normalized(), 4);
        assert!((stats.success_rate() - 66.666).abs() < 0.01);
    }
}
