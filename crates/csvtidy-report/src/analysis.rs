use std::path::Path;

use csvtidy_model::{AnalysisStats, DatasetConfiguration};

use crate::common::banner;

/// Renders the pre-cleaning analysis report.
pub fn render_analysis_report(
    path: &Path,
    config: &DatasetConfiguration,
    stats: &AnalysisStats,
) -> String {
    let mut lines = banner("DATASET ANALYSIS REPORT");
    lines.push(format!("File: {}", path.display()));
    lines.push(String::new());

    lines.push("DETECTED CONFIGURATION:".to_string());
    lines.push(format!("- Delimiter: {:?}", config.delimiter()));
    lines.push(format!("- Quote character: {:?}", config.quote_char()));
    lines.push(format!("- Encoding: {}", config.encoding()));
    lines.push(format!("- Columns: {}", config.column_count()));
    lines.push(format!("- Data rows: {}", config.row_count()));
    lines.push(String::new());

    lines.push("DETECTED QUALITY ISSUES:".to_string());
    for (kind, count) in config.quality_issues().iter() {
        lines.push(format!("- {kind}: {count}"));
    }
    lines.push(String::new());

    lines.push("STATISTICS:".to_string());
    for (label, value) in stats.entries() {
        lines.push(format!("- {label}: {value}"));
    }
    lines.push(String::new());

    lines.push(format!("ISSUES FOUND: {}", stats.issue_count()));
    for issue in &stats.inconsistencies {
        lines.push(format!(
            "- Line {}: {} columns (expected {})",
            issue.line, issue.found, issue.expected
        ));
    }

    if stats.recommends_cleaning() {
        lines.push(String::new());
        lines.push("RECOMMENDATIONS:".to_string());
        lines.push("1. Run data cleaning".to_string());
        lines.push("2. Validate after cleaning".to_string());
    }

    lines.join("\n")
}
