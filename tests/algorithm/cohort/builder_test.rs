//! Tests for building cohorts from subject table files

use cohort_match::algorithm::cohort::{ABSTAINERS, RELAPSERS};
use cohort_match::{CohortBuilder, CohortBuilderConfig, CohortMatchError, SkipReason};

use crate::utils::subject_table;

#[test]
fn test_build_from_file() {
    let table = subject_table(
        "1001,1,42.0,2\n\
         1002,0,30,Male\n\
         1003,2,50,2\n\
         1004X,1,44,2\n\
         1005,0,N/A,Male\n\
         1006,1,38,Female\n\
         1007,,41,2\n",
    );

    let build = CohortBuilder::default()
        .build_from_path(table.path())
        .unwrap();

    assert_eq!(build.rows_read, 7);
    assert_eq!(build.relapsers.name(), RELAPSERS);
    assert_eq!(build.abstainers.name(), ABSTAINERS);
    assert_eq!(build.relapsers.ids(), ["1001"]);
    assert_eq!(build.relapsers.get("1001"), Some(42.0));
    assert_eq!(build.abstainers.ids(), ["1002"]);
    assert_eq!(build.abstainers.get("1002"), Some(30.0));

    assert_eq!(
        build.skipped_subjects(SkipReason::UnknownRelapseStatus),
        ["1003", "1007"]
    );
    assert_eq!(build.skipped_subjects(SkipReason::MissingDataMarker), ["1004X"]);
    assert_eq!(build.skipped_subjects(SkipReason::InvalidAge), ["1005"]);
    assert_eq!(build.skipped_subjects(SkipReason::OtherSex), ["1006"]);
}

#[test]
fn test_marker_row_excluded_even_with_valid_fields() {
    let table = subject_table("X1001,1,42.0,2\n1002,1,40,2\n");
    let build = CohortBuilder::default()
        .build_from_path(table.path())
        .unwrap();

    assert!(!build.relapsers.contains("X1001"));
    assert_eq!(build.relapsers.len(), 1);
}

#[test]
fn test_short_rows_are_skipped() {
    let table = subject_table("1001,1,42.0\n1002,0,30,2\n");
    let build = CohortBuilder::default()
        .build_from_path(table.path())
        .unwrap();

    assert_eq!(build.skip_counts(), [(SkipReason::MissingColumns, 1)]);
    assert_eq!(build.abstainers.len(), 1);
}

#[test]
fn test_custom_marker() {
    let config = CohortBuilderConfig::builder()
        .missing_data_marker("MISSING")
        .build();
    let table = subject_table("1001X,1,42.0,2\n1002MISSING,0,30,2\n");
    let build = CohortBuilder::new(config)
        .build_from_path(table.path())
        .unwrap();

    assert_eq!(build.relapsers.ids(), ["1001X"]);
    assert!(build.abstainers.is_empty());
}

#[test]
fn test_missing_file_is_fatal() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("absent.csv");
    let err = CohortBuilder::default().build_from_path(&path).unwrap_err();
    assert!(matches!(err, CohortMatchError::IoError { .. }));
    assert!(err.to_string().contains("absent.csv"));
}
