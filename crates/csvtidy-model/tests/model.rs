//! Public API checks for the shared model types.

use csvtidy_model::{
    CleaningStatistics, DatasetConfiguration, Dialect, IssueKind, ModelError, NormalizationCounts,
    QualityIssues, TextEncoding,
};

#[test]
fn encoding_names_parse_case_insensitively() {
    for encoding in TextEncoding::CANDIDATES {
        let upper = encoding.name().to_ascii_uppercase();
        assert_eq!(upper.parse::<TextEncoding>().unwrap(), encoding);
    }
    assert!(matches!(
        "utf-16".parse::<TextEncoding>(),
        Err(ModelError::UnknownEncoding(name)) if name == "utf-16"
    ));
}

#[test]
fn configuration_requires_header_columns() {
    let err = DatasetConfiguration::new(
        "empty.csv",
        Dialect::default(),
        TextEncoding::Utf8,
        0,
        0,
        QualityIssues::default(),
    )
    .unwrap_err();
    assert_eq!(err, ModelError::EmptyHeader);
}

#[test]
fn issues_drive_needs_cleaning() {
    let mut issues = QualityIssues::default();
    issues.record(IssueKind::SpecialChars, 1);
    issues.record(IssueKind::HtmlEntities, 2);

    let config = DatasetConfiguration::new(
        "dirty.csv",
        Dialect::new('|', '\'').unwrap(),
        TextEncoding::Cp1252,
        4,
        12,
        issues,
    )
    .unwrap();

    assert!(config.needs_cleaning());
    assert_eq!(config.total_issues(), 3);
    assert_eq!(config.delimiter(), '|');
    assert_eq!(config.quote_char(), '\'');
    assert_eq!(config.encoding().to_string(), "cp1252");
}

#[test]
fn statistics_serialize_every_counter() {
    let mut stats = CleaningStatistics::new();
    stats.record_row();
    stats.record_cleaned(NormalizationCounts {
        character_replacements: 2,
        html_entities_fixed: 1,
        whitespace_normalized: 3,
    });
    stats.record_row();
    stats.record_skipped();

    let json = serde_json::to_value(stats).unwrap();
    assert_eq!(json["total_rows"], 2);
    assert_eq!(json["cleaned_rows"], 1);
    assert_eq!(json["skipped_rows"], 1);
    assert_eq!(json["whitespace_normalized"], 3);
    assert_eq!(stats.success_rate(), 50.0);
}
