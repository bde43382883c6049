//! Human-readable stage reports.
//!
//! Each stage of a run leaves one plain-text report behind:
//!
//! - **Analysis**: detected dialect, source statistics, issues and recommendations
//! - **Cleaning**: row counters, success rate and corrections applied
//! - **Validation**: structure, encoding and integrity checks with a verdict
//!
//! Renderers are pure; [`write_report`] persists the result.

mod analysis;
mod cleaning;
mod common;
mod validation;

pub use analysis::render_analysis_report;
pub use cleaning::render_cleaning_report;
pub use common::{REPORT_WIDTH, format_count, write_report};
pub use validation::render_validation_report;
