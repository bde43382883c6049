use std::path::Path;

use chrono::NaiveDate;
use csvtidy_model::CleaningStatistics;

use crate::common::{banner, format_count};

/// Renders the cleaning report for one rewrite dated `date`.
pub fn render_cleaning_report(
    source: &Path,
    cleaned: &Path,
    stats: &CleaningStatistics,
    date: NaiveDate,
) -> String {
    let mut lines = banner("DATA CLEANING REPORT");
    lines.push(format!("Original file: {}", source.display()));
    lines.push(format!("Cleaned file: {}", cleaned.display()));
    lines.push(format!("Date: {}", date.format("%Y-%m-%d")));
    lines.push(String::new());

    lines.push("STATISTICS:".to_string());
    lines.push(format!("- Total rows: {}", format_count(stats.total_rows())));
    lines.push(format!("- Cleaned rows: {}", format_count(stats.cleaned_rows())));
    lines.push(format!("- Skipped rows: {}", format_count(stats.skipped_rows())));
    lines.push(format!("- Success rate: {:.2}%", stats.success_rate()));
    lines.push(String::new());

    lines.push("CORRECTIONS APPLIED:".to_string());
    lines.push(format!(
        "- Characters normalized: {}",
        format_count(stats.character_replacements())
    ));
    lines.push(format!(
        "- HTML entities fixed: {}",
        format_count(stats.html_entities_fixed())
    ));
    lines.push(format!(
        "- Fields whitespace-normalized: {}",
        format_count(stats.whitespace_normalized())
    ));

    lines.join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;
    use csvtidy_model::NormalizationCounts;

    #[test]
    fn empty_run_reports_zero_rate() {
        let text = render_cleaning_report(
            Path::new("raw.csv"),
            Path::new("clean.csv"),
            &CleaningStatistics::new(),
            NaiveDate::from_ymd_opt(2026, 1, 2).unwrap(),
        );
        assert!(text.contains("Date: 2026-01-02"));
        assert!(text.contains("- Success rate: 0.00%"));
    }

    #[test]
    fn counters_use_thousands_separators() {
        let mut stats = CleaningStatistics::new();
        for _ in 0..1500 {
            stats.record_row();
            stats.record_cleaned(NormalizationCounts {
                whitespace_normalized: 2,
                ..NormalizationCounts::default()
            });
        }
        let text = render_cleaning_report(
            Path::new("raw.csv"),
            Path::new("clean.csv"),
            &stats,
            NaiveDate::from_ymd_opt(2026, 1, 2).unwrap(),
        );
        assert!(text.contains("- Total rows: 1,500"));
        assert!(text.contains("- Fields whitespace-normalized: 3,000"));
        assert!(text.contains("- Success rate: 100.00%"));
    }
}
