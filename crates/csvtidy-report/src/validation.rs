use std::path::Path;

use csvtidy_model::ValidationReport;

use crate::common::{banner, status};

/// Renders the post-cleaning validation report.
pub fn render_validation_report(original: &Path, cleaned: &Path, report: &ValidationReport) -> String {
    let structure = &report.structure;
    let encoding = &report.encoding;
    let integrity = &report.integrity;

    let mut lines = banner("VALIDATION REPORT");
    lines.push(format!("Original file: {}", original.display()));
    lines.push(format!("Cleaned file: {}", cleaned.display()));
    lines.push(String::new());

    lines.push("SUMMARY:".to_string());
    lines.push(format!("- CSV structure: {}", status(structure.passed())));
    lines.push(format!("- Encoding: {}", status(encoding.passed())));
    lines.push(format!("- Integrity: {}", status(integrity.passed())));
    lines.push(String::new());

    lines.push("STRUCTURE:".to_string());
    lines.push(format!("- Data rows: {}", structure.total_rows));
    lines.push(format!("- Columns: {}", structure.total_columns));
    lines.push(format!("- Inconsistent rows: {}", structure.inconsistent_rows));
    for error in &structure.errors {
        lines.push(format!("  {error}"));
    }
    lines.push(String::new());

    lines.push("ENCODING:".to_string());
    lines.push(format!("- Problematic characters: {}", encoding.problematic_chars));
    if !encoding.sample_chars.is_empty() {
        let sample: Vec<String> = encoding.sample_chars.iter().map(|c| format!("{c:?}")).collect();
        lines.push(format!("- Sample: {}", sample.join(", ")));
    }
    lines.push(format!("- Residual HTML entities: {}", encoding.html_entities));
    lines.push(String::new());

    lines.push("INTEGRITY:".to_string());
    lines.push(format!("- Original rows: {}", integrity.original_rows));
    lines.push(format!("- Cleaned rows: {}", integrity.cleaned_rows));
    lines.push(format!("- Row difference: {}", integrity.row_difference));
    lines.push(String::new());

    lines.push(
        if report.passed() {
            "VALIDATION PASSED"
        } else {
            "VALIDATION COMPLETED WITH FINDINGS"
        }
        .to_string(),
    );

    lines.join("\n")
}
