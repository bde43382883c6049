//! Shared layout helpers.

use std::fs;
use std::path::Path;

use anyhow::{Context, Result};

/// Width of the banner rules framing every report title.
pub const REPORT_WIDTH: usize = 60;

/// Title block: rule, title, rule.
pub(crate) fn banner(title: &str) -> Vec<String> {
    let rule = "=".repeat(REPORT_WIDTH);
    vec![rule.clone(), title.to_string(), rule]
}

pub(crate) fn status(ok: bool) -> &'static str {
    if ok { "OK" } else { "ERROR" }
}

/// Formats a count with `,` thousands separators.
pub fn format_count(value: u64) -> String {
    let digits = value.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (index, ch) in digits.chars().enumerate() {
        if index > 0 && (digits.len() - index) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    out
}

/// Writes a rendered report, replacing any previous one.
pub fn write_report(path: &Path, contents: &str) -> Result<()> {
    let mut text = contents.to_string();
    if !text.ends_with('\n') {
        text.push('\n');
    }
    fs::write(path, text).with_context(|| format!("write report {}", path.display()))
}
