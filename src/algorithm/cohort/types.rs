//! Type definitions for cohort building

use std::fmt;

use itertools::Itertools;
use serde::Serialize;

use crate::models::Cohort;

/// Name of the abstainer cohort
pub const ABSTAINERS: &str = "abstainers";
/// Name of the relapser cohort
pub const RELAPSERS: &str = "relapsers";

/// Case cohort a row is routed to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CaseCohort {
    /// Relapse flag `"0"`
    Abstainers,
    /// Relapse flag `"1"`
    Relapsers,
}

/// Why a row was excluded from both case cohorts
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SkipReason {
    /// Row has fewer fields than the column layout needs
    MissingColumns,
    /// Identifier carries the missing-data marker
    MissingDataMarker,
    /// Sex field is not an accepted token
    UnrecognizedSex,
    /// Subject is not of the configured sex
    OtherSex,
    /// Relapse flag is neither `"0"` nor `"1"`
    UnknownRelapseStatus,
    /// Age is not a finite number
    InvalidAge,
}

impl fmt::Display for SkipReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let text = match self {
            Self::MissingColumns => "too few columns",
            Self::MissingDataMarker => "missing-data marker in identifier",
            Self::UnrecognizedSex => "unrecognized sex code",
            Self::OtherSex => "sex not included in the case cohorts",
            Self::UnknownRelapseStatus => "unknown relapse flag",
            Self::InvalidAge => "age is not a finite number",
        };
        f.write_str(text)
    }
}

/// A row excluded from the case cohorts
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SkippedRow {
    /// Input line number (header is line 1)
    pub line: u64,
    /// Identifier field as read, possibly empty
    pub subject: String,
    /// Exclusion reason
    pub reason: SkipReason,
}

/// Result of reading a subject table
#[derive(Debug, Clone)]
pub struct CohortBuild {
    /// Subjects with relapse flag `"0"`
    pub abstainers: Cohort,
    /// Subjects with relapse flag `"1"`
    pub relapsers: Cohort,
    /// Rows excluded from both cohorts
    pub skipped: Vec<SkippedRow>,
    /// Identifiers that repeated within a cohort
    pub duplicates: Vec<String>,
    /// Data rows read, header excluded
    pub rows_read: usize,
}

impl CohortBuild {
    /// Number of skipped rows per reason, ordered by reason
    #[must_use]
    pub fn skip_counts(&self) -> Vec<(SkipReason, usize)> {
        count_by_reason(&self.skipped)
    }

    /// Identifiers skipped for the given reason
    #[must_use]
    pub fn skipped_subjects(&self, reason: SkipReason) -> Vec<&str> {
        self.skipped
            .iter()
            .filter(|row| row.reason == reason)
            .map(|row| row.subject.as_str())
            .collect()
    }
}

/// Number of rows per skip reason, ordered by reason
#[must_use]
pub fn count_by_reason(rows: &[SkippedRow]) -> Vec<(SkipReason, usize)> {
    rows.iter()
        .map(|row| row.reason)
        .counts()
        .into_iter()
        .sorted()
        .collect()
}
