//! Report output
//!
//! Text and JSON renderings of a study report.

pub mod console;

pub use self::console::{
    print_study_report, print_study_report_json, write_study_report, write_study_report_json,
};
