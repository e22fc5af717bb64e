//! Error handling for cohort building and age matching.

pub mod util;

use std::io;
use std::path::PathBuf;

/// Errors that can occur while building cohorts or matching them
#[derive(Debug, thiserror::Error)]
pub enum CohortMatchError {
    /// Error opening or reading a file
    #[error("IO error for {}: {context}: {source}", .path.display())]
    IoError {
        /// File the operation was working on
        path: PathBuf,
        /// What was being attempted
        context: String,
        /// Underlying IO error
        #[source]
        source: io::Error,
    },

    /// Malformed CSV framing in the subject table
    #[error("CSV error: {0}")]
    CsvError(#[from] csv::Error),

    /// Malformed JSON configuration
    #[error("JSON error: {0}")]
    JsonError(#[from] serde_json::Error),

    /// Invalid configuration value
    #[error("Configuration error: {0}")]
    ConfigError(String),

    /// A cohort has no subjects, so no pairing exists
    #[error("Cohort '{cohort}' is empty; no pairing can be computed")]
    EmptyCohort {
        /// Name of the empty cohort
        cohort: String,
    },

    /// Age that is not a finite number
    #[error("Invalid age {age} for subject {subject} in cohort '{cohort}'")]
    InvalidAge {
        /// Cohort the subject belongs to
        cohort: String,
        /// Subject identifier
        subject: String,
        /// Offending value
        age: f64,
    },

    /// Identifier seen twice in one cohort while duplicates are rejected
    #[error("Duplicate subject {subject} in cohort '{cohort}' (line {line})")]
    DuplicateSubject {
        /// Cohort the subject belongs to
        cohort: String,
        /// Subject identifier
        subject: String,
        /// Input line of the repeated row
        line: u64,
    },

    /// Cost data that does not fill a rows x cols matrix
    #[error("Cost matrix of {rows}x{cols} cannot hold {values} values")]
    CostMatrixShape {
        /// Row count
        rows: usize,
        /// Column count
        cols: usize,
        /// Number of values supplied
        values: usize,
    },

    /// A named comparison could not be computed
    #[error("Comparison {comparison} could not be computed: {source}")]
    ComparisonFailed {
        /// Comparison label, e.g. "Controls-Abstainers"
        comparison: String,
        /// Underlying failure
        #[source]
        source: Box<CohortMatchError>,
    },
}

impl CohortMatchError {
    /// Create an IO error tied to a path
    pub fn io(path: impl Into<PathBuf>, context: impl Into<String>, source: io::Error) -> Self {
        Self::IoError {
            path: path.into(),
            context: context.into(),
            source,
        }
    }

    /// Wrap this error as the failure of a named comparison
    #[must_use]
    pub fn in_comparison(self, comparison: &str) -> Self {
        Self::ComparisonFailed {
            comparison: comparison.to_string(),
            source: Box::new(self),
        }
    }
}

/// Result type for cohort matching operations
pub type Result<T> = std::result::Result<T, CohortMatchError>;
