//! Integration tests for the cleaning stage.

use std::fs;
use std::path::{Path, PathBuf};

use csvtidy_ingest::DialectDetector;
use csvtidy_model::{CleaningStatistics, NormalizationCounts};
use csvtidy_transform::normalize::normalize_field;
use csvtidy_transform::{FileRewriter, temp_sibling};
use proptest::prelude::*;
use tempfile::TempDir;

fn write_file(dir: &TempDir, name: &str, contents: &[u8]) -> PathBuf {
    let path = dir.path().join(name);
    fs::write(&path, contents).expect("write file");
    path
}

fn clean(dir: &TempDir, source: &Path, name: &str) -> (PathBuf, CleaningStatistics) {
    let config = DialectDetector::new(source).detect().expect("detect");
    let destination = dir.path().join(name);
    let stats = FileRewriter::new(&config)
        .rewrite(source, &destination)
        .expect("rewrite");
    (destination, stats)
}

// =========================================================================
// Scenarios
// =========================================================================

#[test]
fn trims_fields_and_keeps_empty_ones() {
    let dir = TempDir::new().unwrap();
    let source = write_file(&dir, "raw.csv", "id;name\n1;José \n2;\n".as_bytes());

    let (destination, stats) = clean(&dir, &source, "clean.csv");

    assert_eq!(fs::read_to_string(&destination).unwrap(), "id;name\n1;José\n2;\n");
    assert_eq!(stats.total_rows(), 2);
    assert_eq!(stats.cleaned_rows(), 2);
    assert_eq!(stats.skipped_rows(), 0);
    assert_eq!(stats.whitespace_normalized(), 4);
    assert!((stats.success_rate() - 100.0).abs() < 1e-9);
    assert!(!temp_sibling(&destination).exists());
}

#[test]
fn repairs_entities_and_tags() {
    let dir = TempDir::new().unwrap();
    let source = write_file(&dir, "raw.csv", b"id,text\n1,caf&eacute; <br> bar\n");

    let (destination, stats) = clean(&dir, &source, "clean.csv");

    assert_eq!(fs::read_to_string(&destination).unwrap(), "id,text\n1,café bar\n");
    assert_eq!(stats.html_entities_fixed(), 1);
    assert_eq!(stats.whitespace_normalized(), 2);
}

#[test]
fn blank_lines_are_skipped_and_counted() {
    let dir = TempDir::new().unwrap();
    let source = write_file(&dir, "raw.csv", b"a,b\n1,2\n\n   \n3,4\n");

    let (destination, stats) = clean(&dir, &source, "clean.csv");

    assert_eq!(fs::read_to_string(&destination).unwrap(), "a,b\n1,2\n3,4\n");
    assert_eq!(stats.total_rows(), 4);
    assert_eq!(stats.skipped_rows(), 2);
    assert_eq!(stats.total_rows() - stats.skipped_rows(), stats.cleaned_rows());
}

#[test]
fn header_is_copied_verbatim() {
    let dir = TempDir::new().unwrap();
    let source = write_file(
        &dir,
        "raw.csv",
        "\u{feff} Id ,  Full   Name\n1,\u{201c}Ann\u{201d}\n".as_bytes(),
    );

    let (destination, stats) = clean(&dir, &source, "clean.csv");

    assert_eq!(
        fs::read_to_string(&destination).unwrap(),
        " Id ,  Full   Name\n1,\"\"\"Ann\"\"\"\n"
    );
    assert_eq!(stats.character_replacements(), 2);
}

#[test]
fn latin1_source_is_written_as_utf8() {
    let dir = TempDir::new().unwrap();
    let source = write_file(&dir, "raw.csv", b"name;city\nJos\xe9;M\xfcnchen\n");

    let (destination, _) = clean(&dir, &source, "clean.csv");

    assert_eq!(
        fs::read_to_string(&destination).unwrap(),
        "name;city\nJosé;München\n"
    );
}

#[test]
fn fields_with_delimiter_are_quoted() {
    let dir = TempDir::new().unwrap();
    let source = write_file(&dir, "raw.csv", b"id,name\n1,\"Smith,   John\"\n");

    let (destination, _) = clean(&dir, &source, "clean.csv");

    assert_eq!(
        fs::read_to_string(&destination).unwrap(),
        "id,name\n1,\"Smith, John\"\n"
    );
}

#[test]
fn existing_destination_is_replaced() {
    let dir = TempDir::new().unwrap();
    let source = write_file(&dir, "raw.csv", b"a,b\n1,2\n");
    write_file(&dir, "clean.csv", b"stale content that is longer than the new file\n");

    let (destination, _) = clean(&dir, &source, "clean.csv");

    assert_eq!(fs::read_to_string(&destination).unwrap(), "a,b\n1,2\n");
}

#[test]
fn missing_source_leaves_no_output() {
    let dir = TempDir::new().unwrap();
    let source = write_file(&dir, "raw.csv", b"a,b\n1,2\n");
    let config = DialectDetector::new(&source).detect().unwrap();
    let destination = dir.path().join("clean.csv");

    let err = FileRewriter::new(&config)
        .rewrite(&dir.path().join("gone.csv"), &destination)
        .unwrap_err();

    assert!(err.to_string().contains("file not found"));
    assert!(!destination.exists());
    assert!(!temp_sibling(&destination).exists());
}

#[test]
fn failed_rewrite_leaves_destination_untouched() {
    let dir = TempDir::new().unwrap();
    let clean_source = write_file(&dir, "clean.csv", b"a,b\n1,2\n");
    let config = DialectDetector::new(&clean_source).detect().unwrap();
    let bad_source = write_file(&dir, "bad.csv", b"a,b\n1,2\n3,\xff\n4,5\n");
    let destination = write_file(&dir, "out.csv", b"old\n");

    let err = FileRewriter::new(&config)
        .rewrite(&bad_source, &destination)
        .unwrap_err();

    assert!(err.to_string().contains("line 3"));
    assert_eq!(fs::read_to_string(&destination).unwrap(), "old\n");
    assert!(temp_sibling(&destination).exists());
}

#[test]
fn progress_is_reported_per_interval() {
    let dir = TempDir::new().unwrap();
    let mut contents = String::from("n\n");
    for i in 0..25_000 {
        contents.push_str(&format!("{i}\n"));
    }
    let source = write_file(&dir, "big.csv", contents.as_bytes());
    let config = DialectDetector::new(&source).detect().unwrap();

    let mut reports = Vec::new();
    let stats = FileRewriter::new(&config)
        .rewrite_with_progress(&source, &dir.path().join("out.csv"), |rows| reports.push(rows))
        .unwrap();

    assert_eq!(reports, vec![10_000, 20_000]);
    assert_eq!(stats.cleaned_rows(), 25_000);
}

// =========================================================================
// Idempotence
// =========================================================================

#[test]
fn second_pass_is_byte_identical() {
    let dir = TempDir::new().unwrap();
    let source = write_file(
        &dir,
        "raw.csv",
        "id;note\n1;  caf&eacute;<br/>au   lait \n\n2;\u{201c}quoted\u{201d} \u{2014} ok\n3;\"a;b\"\n"
            .as_bytes(),
    );

    let (first, _) = clean(&dir, &source, "first.csv");
    let (second, stats) = clean(&dir, &first, "second.csv");

    assert_eq!(fs::read(&first).unwrap(), fs::read(&second).unwrap());
    assert_eq!(stats.skipped_rows(), 0);
    assert_eq!(stats.character_replacements(), 0);
    assert_eq!(stats.html_entities_fixed(), 0);
}

proptest! {
    #[test]
    fn normalizing_a_field_twice_changes_nothing(
        field in "[a-zA-Z0-9 \t\u{a0}\u{201c}\u{201d}\u{2013}\u{2026}éñü,.;]{0,24}",
    ) {
        let mut counts = NormalizationCounts::default();
        let once = normalize_field(&field, &mut counts);
        let mut again = NormalizationCounts::default();
        let twice = normalize_field(&once, &mut again);
        prop_assert_eq!(&twice, &once);
        prop_assert_eq!(again.character_replacements, 0);
        prop_assert_eq!(again.html_entities_fixed, 0);
    }
}
