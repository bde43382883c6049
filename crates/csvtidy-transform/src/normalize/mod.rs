//! Per-row normalization.
//!
//! Each field goes through three steps in fixed order:
//!
//! 1. [`fold_unicode`]: decomposition plus typographic substitutions
//! 2. [`repair_html`]: entity decoding, reference repairs, tag stripping
//! 3. [`collapse_whitespace`]: runs to one space, trimmed
//!
//! Entity decoding and tag stripping can leave stray spaces behind, so
//! whitespace is always collapsed last.

mod html;
mod unicode;
mod whitespace;

pub use html::{ENTITY_REPAIRS, repair_html};
pub use unicode::{SUBSTITUTIONS, fold_unicode};
pub use whitespace::collapse_whitespace;

use csvtidy_ingest::parse_record;
use csvtidy_model::{DatasetConfiguration, Dialect, NormalizationCounts};

/// Outcome of normalizing one line.
///
/// A row that cannot be split into any field comes back with
/// `success == false` and no fields; the caller decides how to count it.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NormalizedRow {
    pub fields: Vec<String>,
    pub success: bool,
    pub counts: NormalizationCounts,
}

/// Parses a line with the active dialect and normalizes every field.
#[derive(Debug, Clone, Copy)]
pub struct RowNormalizer {
    dialect: Dialect,
}

impl RowNormalizer {
    pub fn new(dialect: Dialect) -> Self {
        Self { dialect }
    }

    pub fn for_config(config: &DatasetConfiguration) -> Self {
        Self::new(config.dialect())
    }

    /// Normalizes one raw line. Never fails; see [`NormalizedRow`].
    pub fn normalize_line(&self, line: &str) -> NormalizedRow {
        let raw_fields = parse_record(line, self.dialect);
        if raw_fields.is_empty() {
            return NormalizedRow::default();
        }

        let mut counts = NormalizationCounts::default();
        let fields = raw_fields
            .iter()
            .map(|field| normalize_field(field, &mut counts))
            .collect();
        NormalizedRow {
            fields,
            success: true,
            counts,
        }
    }
}

/// Runs the three normalization steps on a single field.
pub fn normalize_field(field: &str, counts: &mut NormalizationCounts) -> String {
    let folded = fold_unicode(field, counts);
    let repaired = repair_html(&folded, counts);
    collapse_whitespace(&repaired, counts)
}
