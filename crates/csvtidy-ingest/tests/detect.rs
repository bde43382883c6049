//! Integration tests for dialect detection on real files.

use std::fs;
use std::path::PathBuf;

use csvtidy_ingest::{DialectDetector, IngestError};
use csvtidy_model::{IssueKind, TextEncoding};
use proptest::prelude::*;
use tempfile::TempDir;

fn write_file(dir: &TempDir, name: &str, contents: &[u8]) -> PathBuf {
    let path = dir.path().join(name);
    fs::write(&path, contents).expect("write file");
    path
}

// =========================================================================
// Scenarios
// =========================================================================

#[test]
fn detects_semicolon_dataset() {
    let dir = TempDir::new().unwrap();
    let path = write_file(&dir, "people.csv", "id;name\n1;José \n2;\n".as_bytes());

    let config = DialectDetector::new(&path).detect().expect("detect");

    assert_eq!(config.delimiter(), ';');
    assert_eq!(config.quote_char(), '"');
    assert_eq!(config.encoding(), TextEncoding::Utf8);
    assert_eq!(config.column_count(), 2);
    assert_eq!(config.row_count(), 2);
    assert_eq!(config.quality_issues().get(IssueKind::EmptyFields), 1);
    assert_eq!(config.quality_issues().get(IssueKind::SpecialChars), 0);
    assert!(config.needs_cleaning());
}

#[test]
fn header_only_file_needs_no_cleaning() {
    let dir = TempDir::new().unwrap();
    let path = write_file(&dir, "header.csv", b"a,b,c\n");

    let config = DialectDetector::new(&path).detect().expect("detect");

    assert_eq!(config.delimiter(), ',');
    assert_eq!(config.column_count(), 3);
    assert_eq!(config.row_count(), 0);
    assert_eq!(config.total_issues(), 0);
    assert!(!config.needs_cleaning());
}

#[test]
fn detects_latin1_and_reads_through_it() {
    let dir = TempDir::new().unwrap();
    let path = write_file(&dir, "latin.csv", b"name|city\nJos\xe9|M\xfcnchen\n");

    let config = DialectDetector::new(&path).detect().expect("detect");

    assert_eq!(config.encoding(), TextEncoding::Latin1);
    assert_eq!(config.delimiter(), '|');
    assert_eq!(config.row_count(), 1);
    assert_eq!(config.total_issues(), 0);
}

#[test]
fn strips_byte_order_mark_from_header() {
    let dir = TempDir::new().unwrap();
    let path = write_file(&dir, "bom.csv", "\u{feff}a\tb\n1\t2\n".as_bytes());

    let config = DialectDetector::new(&path).detect().expect("detect");

    assert_eq!(config.delimiter(), '\t');
    assert_eq!(config.column_count(), 2);
    assert!(!config.needs_cleaning());
}

#[test]
fn quoted_header_keeps_column_count() {
    let dir = TempDir::new().unwrap();
    let path = write_file(&dir, "quoted.csv", b"\"a,b\",c\n1,2\n");

    let config = DialectDetector::new(&path).detect().expect("detect");

    assert_eq!(config.column_count(), 2);
    assert_eq!(config.quality_issues().get(IssueKind::SeparatorInconsistencies), 0);
}

#[test]
fn prefers_single_quote_when_it_dominates() {
    let dir = TempDir::new().unwrap();
    let path = write_file(&dir, "single.csv", b"a,b\n'x,y',z\n");

    let config = DialectDetector::new(&path).detect().expect("detect");

    assert_eq!(config.quote_char(), '\'');
    assert_eq!(config.quality_issues().get(IssueKind::SeparatorInconsistencies), 0);
}

#[test]
fn blank_lines_count_as_separator_issues() {
    let dir = TempDir::new().unwrap();
    let path = write_file(&dir, "blank.csv", b"a,b\n1,2\n\n3,4,5\n");

    let config = DialectDetector::new(&path).detect().expect("detect");

    assert_eq!(config.row_count(), 3);
    assert_eq!(config.quality_issues().get(IssueKind::SeparatorInconsistencies), 2);
}

// =========================================================================
// Failures
// =========================================================================

#[test]
fn empty_file_fails() {
    let dir = TempDir::new().unwrap();
    let path = write_file(&dir, "empty.csv", b"");

    let err = DialectDetector::new(&path).detect().unwrap_err();
    assert!(matches!(err, IngestError::EmptyFile { .. }));
}

#[test]
fn missing_file_fails() {
    let dir = TempDir::new().unwrap();
    let err = DialectDetector::new(dir.path().join("absent.csv"))
        .detect()
        .unwrap_err();
    assert!(matches!(err, IngestError::FileNotFound { .. }));
    assert!(err.is_io());
}

#[test]
fn undecodable_line_after_probe_window_fails() {
    let dir = TempDir::new().unwrap();
    let mut contents = b"id,text\n".to_vec();
    for i in 0..1500 {
        contents.extend_from_slice(format!("{i},plain\n").as_bytes());
    }
    contents.extend_from_slice(b"9999,bad\xff\n");
    let path = write_file(&dir, "late.csv", &contents);

    let err = DialectDetector::new(&path).detect().unwrap_err();
    assert!(err.is_decode());
}

// =========================================================================
// Properties
// =========================================================================

proptest! {
    #[test]
    fn recovers_exclusive_delimiter(
        index in 0usize..4,
        columns in 1usize..6,
        rows in proptest::collection::vec(
            proptest::collection::vec("[a-zA-Z0-9 ]{0,8}", 6),
            0..20,
        ),
    ) {
        let delimiter = [';', ',', '\t', '|'][index];
        let separator = delimiter.to_string();
        let header: Vec<String> = (0..columns).map(|c| format!("col{c}")).collect();
        let mut contents = header.join(&separator);
        contents.push('\n');
        for row in &rows {
            contents.push_str(&row[..columns].join(&separator));
            contents.push('\n');
        }

        let dir = TempDir::new().unwrap();
        let path = write_file(&dir, "prop.csv", contents.as_bytes());
        let config = DialectDetector::new(&path).detect().unwrap();

        if columns > 1 {
            prop_assert_eq!(config.delimiter(), delimiter);
        }
        prop_assert_eq!(config.column_count(), columns);
        prop_assert_eq!(config.row_count(), rows.len());
    }
}
