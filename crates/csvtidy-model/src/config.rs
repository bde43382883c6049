//! Dataset configuration inferred once per run.
//!
//! Every downstream stage reads the delimiter and quote character from the same
//! [`Dialect`], which keeps column and row counts consistent across stages.

use std::fmt;
use std::path::{Path, PathBuf};
use std::str::FromStr;

use serde::{Serialize, Serializer};

use crate::error::{ModelError, Result};
use crate::issues::QualityIssues;

/// Candidate delimiters in preference order; ties go to the earlier entry.
pub const DELIMITER_CANDIDATES: [char; 4] = [';', ',', '\t', '|'];

/// Text encodings the detector may select, in probe order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum TextEncoding {
    #[default]
    Utf8,
    Latin1,
    Iso8859_1,
    Cp1252,
}

impl TextEncoding {
    /// Probe order used by encoding detection.
    pub const CANDIDATES: [TextEncoding; 4] = [
        TextEncoding::Utf8,
        TextEncoding::Latin1,
        TextEncoding::Iso8859_1,
        TextEncoding::Cp1252,
    ];

    pub fn name(self) -> &'static str {
        match self {
            TextEncoding::Utf8 => "utf-8",
            TextEncoding::Latin1 => "latin-1",
            TextEncoding::Iso8859_1 => "iso-8859-1",
            TextEncoding::Cp1252 => "cp1252",
        }
    }
}

impl fmt::Display for TextEncoding {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for TextEncoding {
    type Err = ModelError;

    fn from_str(value: &str) -> Result<Self> {
        let lowered = value.trim().to_ascii_lowercase();
        Self::CANDIDATES
            .into_iter()
            .find(|encoding| encoding.name() == lowered)
            .ok_or(ModelError::UnknownEncoding(lowered))
    }
}

impl Serialize for TextEncoding {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        serializer.serialize_str(self.name())
    }
}

/// Delimiter and quote character pair.
///
/// Both characters are ASCII so they can be handed to the byte-oriented CSV
/// reader and writer unchanged.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Dialect {
    delimiter: char,
    quote_char: char,
}

impl Dialect {
    pub fn new(delimiter: char, quote_char: char) -> Result<Self> {
        if !is_dialect_char(delimiter) {
            return Err(ModelError::InvalidDelimiter(delimiter));
        }
        if !is_dialect_char(quote_char) {
            return Err(ModelError::InvalidQuoteChar(quote_char));
        }
        if delimiter == quote_char {
            return Err(ModelError::DelimiterIsQuote(delimiter));
        }
        Ok(Self {
            delimiter,
            quote_char,
        })
    }

    pub fn delimiter(&self) -> char {
        self.delimiter
    }

    pub fn quote_char(&self) -> char {
        self.quote_char
    }

    pub fn delimiter_byte(&self) -> u8 {
        ascii_byte(self.delimiter)
    }

    pub fn quote_byte(&self) -> u8 {
        ascii_byte(self.quote_char)
    }
}

impl Default for Dialect {
    fn default() -> Self {
        Self {
            delimiter: ',',
            quote_char: '"',
        }
    }
}

fn is_dialect_char(ch: char) -> bool {
    ch.is_ascii() && ch != '\n' && ch != '\r'
}

fn ascii_byte(ch: char) -> u8 {
    // Dialect::new only admits ASCII, so the conversion is lossless.
    u8::try_from(u32::from(ch)).unwrap_or(b',')
}

/// Immutable configuration record produced by dialect detection.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DatasetConfiguration {
    filepath: PathBuf,
    #[serde(flatten)]
    dialect: Dialect,
    encoding: TextEncoding,
    column_count: usize,
    row_count: usize,
    quality_issues: QualityIssues,
    needs_cleaning: bool,
}

impl DatasetConfiguration {
    /// Builds a configuration, rejecting a header without columns.
    pub fn new(
        filepath: impl Into<PathBuf>,
        dialect: Dialect,
        encoding: TextEncoding,
        column_count: usize,
        row_count: usize,
        quality_issues: QualityIssues,
    ) -> Result<Self> {
        if column_count == 0 {
            return Err(ModelError::EmptyHeader);
        }
        Ok(Self {
            filepath: filepath.into(),
            dialect,
            encoding,
            column_count,
            row_count,
            needs_cleaning: quality_issues.total() > 0,
            quality_issues,
        })
    }

    pub fn filepath(&self) -> &Path {
        &self.filepath
    }

    pub fn dialect(&self) -> Dialect {
        self.dialect
    }

    pub fn delimiter(&self) -> char {
        self.dialect.delimiter()
    }

    pub fn quote_char(&self) -> char {
        self.dialect.quote_char()
    }

    pub fn encoding(&self) -> TextEncoding {
        self.encoding
    }

    /// Field count of the header row.
    pub fn column_count(&self) -> usize {
        self.column_count
    }

    /// Physical line count minus the header line.
    pub fn row_count(&self) -> usize {
        self.row_count
    }

    pub fn quality_issues(&self) -> &QualityIssues {
        &self.quality_issues
    }

    pub fn total_issues(&self) -> usize {
        self.quality_issues.total()
    }

    pub fn needs_cleaning(&self) -> bool {
        self.needs_cleaning
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::issues::IssueKind;

    #[test]
    fn dialect_rejects_non_ascii_and_line_breaks() {
        assert_eq!(Dialect::new('§', '"'), Err(ModelError::InvalidDelimiter('§')));
        assert_eq!(Dialect::new(',', '\n'), Err(ModelError::InvalidQuoteChar('\n')));
        assert_eq!(Dialect::new('"', '"'), Err(ModelError::DelimiterIsQuote('"')));
    }

    #[test]
    fn dialect_exposes_bytes() {
        let dialect = Dialect::new('\t', '\'').unwrap();
        assert_eq!(dialect.delimiter_byte(), b'\t');
        assert_eq!(dialect.quote_byte(), b'\'');
    }

    #[test]
    fn needs_cleaning_follows_issue_total() {
        let clean = DatasetConfiguration::new(
            "a.csv",
            Dialect::default(),
            TextEncoding::Utf8,
            3,
            0,
            QualityIssues::default(),
        )
        .unwrap();
        assert!(!clean.needs_cleaning());

        let mut issues = QualityIssues::default();
        issues.record(IssueKind::SpecialChars, 1);
        let dirty = DatasetConfiguration::new(
            "a.csv",
            Dialect::default(),
            TextEncoding::Latin1,
            3,
            4,
            issues,
        )
        .unwrap();
        assert!(dirty.needs_cleaning());
        assert_eq!(dirty.total_issues(), 1);
    }

    #[test]
    fn zero_columns_is_rejected() {
        let result = DatasetConfiguration::new(
            "a.csv",
            Dialect::default(),
            TextEncoding::Utf8,
            0,
            0,
            QualityIssues::default(),
        );
        assert_eq!(result, Err(ModelError::EmptyHeader));
    }

    #[test]
    fn encoding_names_round_trip() {
        for encoding in TextEncoding::CANDIDATES {
            assert_eq!(encoding.name().parse::<TextEncoding>(), Ok(encoding));
        }
        assert!("ebcdic".parse::<TextEncoding>().is_err());
    }
}
