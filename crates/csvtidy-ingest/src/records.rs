//! Logical record assembly and single-record parsing.
//!
//! A logical record is one or more physical lines joined while a quoted field
//! is still open at the end of a line.

use std::path::Path;

use csv::ReaderBuilder;
use csvtidy_model::{Dialect, TextEncoding};

use crate::error::Result;
use crate::lines::DecodedLines;

/// Scanner state at a character boundary.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum QuoteState {
    FieldStart,
    Unquoted,
    Quoted,
    QuoteInQuoted,
}

impl QuoteState {
    fn advance(self, ch: char, dialect: Dialect) -> Self {
        let delimiter = dialect.delimiter();
        let quote = dialect.quote_char();
        match self {
            Self::FieldStart if ch == quote => Self::Quoted,
            Self::FieldStart | Self::Unquoted if ch == delimiter => Self::FieldStart,
            Self::FieldStart | Self::Unquoted => Self::Unquoted,
            Self::Quoted if ch == quote => Self::QuoteInQuoted,
            Self::Quoted => Self::Quoted,
            Self::QuoteInQuoted if ch == quote => Self::Quoted,
            Self::QuoteInQuoted if ch == delimiter => Self::FieldStart,
            Self::QuoteInQuoted => Self::Unquoted,
        }
    }

    fn scan(self, line: &str, dialect: Dialect) -> Self {
        line.chars().fold(self, |state, ch| state.advance(ch, dialect))
    }
}

/// Decoded text of one logical record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawRecord {
    /// 1-based physical line where the record starts.
    pub line: usize,
    pub text: String,
}

impl RawRecord {
    pub fn parse(self, dialect: Dialect) -> ParsedRow {
        ParsedRow {
            line: self.line,
            fields: parse_record(&self.text, dialect),
        }
    }
}

/// One logical record split into fields.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParsedRow {
    pub line: usize,
    pub fields: Vec<String>,
}

/// Iterator over the logical records of a file, header included.
pub struct LogicalRecords {
    lines: DecodedLines,
    dialect: Dialect,
}

impl LogicalRecords {
    pub fn open(path: &Path, encoding: TextEncoding, dialect: Dialect) -> Result<Self> {
        Ok(Self {
            lines: DecodedLines::open(path, encoding)?,
            dialect,
        })
    }
}

impl Iterator for LogicalRecords {
    type Item = Result<RawRecord>;

    fn next(&mut self) -> Option<Self::Item> {
        let first = match self.lines.next()? {
            Ok(line) => line,
            Err(e) => return Some(Err(e)),
        };
        let start = self.lines.line_number();
        let mut state = QuoteState::FieldStart.scan(&first, self.dialect);
        let mut text = first;

        while state == QuoteState::Quoted {
            match self.lines.next() {
                Some(Ok(line)) => {
                    state = state.scan(&line, self.dialect);
                    text.push('\n');
                    text.push_str(&line);
                }
                Some(Err(e)) => return Some(Err(e)),
                // Unterminated quote at end of file: emit what we have.
                None => break,
            }
        }

        Some(Ok(RawRecord { line: start, text }))
    }
}

/// Splits one logical record into fields using the dialect.
///
/// An empty record has no fields. Text the csv reader rejects falls back to
/// [`naive_split`].
pub fn parse_record(text: &str, dialect: Dialect) -> Vec<String> {
    if text.is_empty() {
        return Vec::new();
    }
    let mut reader = ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .delimiter(dialect.delimiter_byte())
        .quote(dialect.quote_byte())
        .from_reader(text.as_bytes());

    match reader.records().next() {
        Some(Ok(record)) => record.iter().map(str::to_string).collect(),
        _ => naive_split(text, dialect.delimiter()),
    }
}

/// Splits on every delimiter, ignoring quoting.
pub fn naive_split(text: &str, delimiter: char) -> Vec<String> {
    text.split(delimiter).map(str::to_string).collect()
}

/// Opens `path` and yields every logical record already split into fields.
pub fn read_rows(
    path: &Path,
    encoding: TextEncoding,
    dialect: Dialect,
) -> Result<impl Iterator<Item = Result<ParsedRow>>> {
    Ok(LogicalRecords::open(path, encoding, dialect)?
        .map(move |record| record.map(|raw| raw.parse(dialect))))
}
