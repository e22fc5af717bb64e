//! Console output utilities
//!
//! Human-readable and JSON renderings of a study report.

use std::io::{self, Write};

use itertools::Itertools;

use crate::algorithm::cohort::count_by_reason;
use crate::study::{Comparison, StudyReport};

/// Write one comparison: its pairs, average age difference and balance
pub fn write_comparison<W: Write>(out: &mut W, comparison: &Comparison) -> io::Result<()> {
    let result = &comparison.result;
    let pairs: Vec<(&str, &str)> = result.id_pairs().collect();

    writeln!(out, "{} Data:", comparison.label)?;
    writeln!(out, "Matches: {pairs:?}")?;
    writeln!(out, "Average difference in age: {}", result.average_difference)?;
    if !result.unmatched_reference.is_empty() {
        writeln!(
            out,
            "Unmatched {}: {}",
            result.reference_cohort,
            result.unmatched_reference.iter().join(", ")
        )?;
    }
    if !result.unmatched_target.is_empty() {
        writeln!(
            out,
            "Unmatched {}: {}",
            result.target_cohort,
            result.unmatched_target.iter().join(", ")
        )?;
    }
    writeln!(out, "Balance: {}", comparison.balance)
}

/// Write the full text report
pub fn write_study_report<W: Write>(out: &mut W, report: &StudyReport) -> io::Result<()> {
    for (i, comparison) in report.comparisons.iter().enumerate() {
        if i > 0 {
            writeln!(out)?;
        }
        write_comparison(out, comparison)?;
    }

    if !report.skipped.is_empty() {
        let counts = count_by_reason(&report.skipped)
            .into_iter()
            .map(|(reason, count)| format!("{reason}: {count}"))
            .join(", ");
        writeln!(out)?;
        writeln!(
            out,
            "Excluded rows: {} of {} ({counts})",
            report.skipped.len(),
            report.rows_read
        )?;
    }

    if !report.duplicates.is_empty() {
        writeln!(
            out,
            "Repeated identifiers (later row kept): {}",
            report.duplicates.iter().join(", ")
        )?;
    }

    Ok(())
}

/// Print the text report to standard output
pub fn print_study_report(report: &StudyReport) -> io::Result<()> {
    let stdout = io::stdout();
    let mut out = stdout.lock();
    write_study_report(&mut out, report)
}

/// Write the report as pretty JSON followed by a newline
pub fn write_study_report_json<W: Write>(
    out: &mut W,
    report: &StudyReport,
) -> serde_json::Result<()> {
    serde_json::to_writer_pretty(&mut *out, report)?;
    writeln!(out).map_err(serde_json::Error::io)
}

/// Print the report as pretty JSON to standard output
pub fn print_study_report_json(report: &StudyReport) -> serde_json::Result<()> {
    let stdout = io::stdout();
    let mut out = stdout.lock();
    write_study_report_json(&mut out, report)
}
