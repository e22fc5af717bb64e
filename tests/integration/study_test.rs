//! End-to-end tests: configuration file, subject table, both comparisons

use cohort_match::study::{CONTROLS_ABSTAINERS, CONTROLS_RELAPSERS};
use cohort_match::utils::logging::write_study_report;
use cohort_match::{CohortMatchError, DuplicatePolicy, StudyConfig, run_study};

use crate::utils::{subject_table, temp_file};

const CONFIG: &str = r#"{
    "controls": { "C1": 60.0, "C2": 70.0, "C3": 45.0 },
    "builder": { "missing_data_marker": "X" }
}"#;

#[test]
fn test_run_study_end_to_end() {
    let config_file = temp_file(CONFIG);
    let config = StudyConfig::from_file(config_file.path()).unwrap();
    let table = subject_table(
        "A1,0,59,2\n\
         A2,0,72,Male\n\
         R1,1,46,2\n\
         R2,1,61.5,Male\n\
         XR3,1,70,2\n",
    );

    let report = run_study(table.path(), &config).unwrap();
    assert_eq!(report.comparisons.len(), 2);

    let abstainers = &report.comparisons[0];
    assert_eq!(abstainers.label, CONTROLS_ABSTAINERS);
    let pairs: Vec<_> = abstainers.result.id_pairs().collect();
    assert_eq!(pairs, [("C1", "A1"), ("C2", "A2")]);
    assert!((abstainers.result.average_difference - 1.5).abs() < 1e-12);
    assert_eq!(abstainers.result.unmatched_reference, ["C3"]);

    let relapsers = &report.comparisons[1];
    assert_eq!(relapsers.label, CONTROLS_RELAPSERS);
    let pairs: Vec<_> = relapsers.result.id_pairs().collect();
    assert_eq!(pairs, [("C1", "R2"), ("C3", "R1")]);
    assert!((relapsers.result.average_difference - 1.25).abs() < 1e-12);

    assert_eq!(report.skipped.len(), 1);
    assert_eq!(report.skipped[0].subject, "XR3");

    let mut out = Vec::new();
    write_study_report(&mut out, &report).unwrap();
    let text = String::from_utf8(out).unwrap();
    assert!(text.contains("Controls-Relapsers Data:"));
    assert!(text.contains("Average difference in age: 1.25"));
}

#[test]
fn test_empty_case_cohort_aborts_with_comparison_name() {
    let config = StudyConfig::from_json(CONFIG).unwrap();
    let table = subject_table("R1,1,46,2\n");

    let err = run_study(table.path(), &config).unwrap_err();
    match err {
        CohortMatchError::ComparisonFailed { comparison, .. } => {
            assert_eq!(comparison, CONTROLS_ABSTAINERS);
        }
        other => panic!("unexpected error: {other}"),
    }
}

#[test]
fn test_controls_file_replaces_controls() {
    let mut config = StudyConfig::from_json(CONFIG).unwrap();
    let controls = temp_file(r#"{"K9": 50.0}"#);
    config.load_controls(controls.path()).unwrap();

    assert_eq!(config.controls.ids(), ["K9"]);
    assert_eq!(config.builder.missing_data_marker, "X");
}

#[test]
fn test_reject_duplicates_through_config() {
    let mut config = StudyConfig::from_json(CONFIG).unwrap();
    config.builder.duplicate_policy = DuplicatePolicy::Reject;
    let table = subject_table("A1,0,59,2\nA1,0,60,2\nR1,1,46,2\n");

    let err = run_study(table.path(), &config).unwrap_err();
    assert!(matches!(err, CohortMatchError::DuplicateSubject { .. }));
}

#[test]
fn test_bundled_config_runs() {
    let config = StudyConfig::bundled().unwrap();
    let table = subject_table("1001,0,65,2\n1002,1,50,2\n1003,1,36,Male\n");

    let report = run_study(table.path(), &config).unwrap();
    let abstainer_pairs: Vec<_> = report.comparisons[0].result.id_pairs().collect();
    assert_eq!(abstainer_pairs, [("C005", "1001")]);
    let relapser_pairs: Vec<_> = report.comparisons[1].result.id_pairs().collect();
    assert_eq!(relapser_pairs, [("C007", "1002"), ("C009", "1003")]);
}

#[test]
fn test_malformed_config() {
    let err = StudyConfig::from_json(r#"{"controls": {"C1": "sixty"}}"#).unwrap_err();
    assert!(matches!(err, CohortMatchError::JsonError(_)));
}
