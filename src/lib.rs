//! Age matching of control subjects to abstainer and relapser cohorts.
//!
//! Reads a subject table into age-keyed cohorts and pairs the controls with
//! each case cohort so that the total absolute age difference is minimal.

pub mod algorithm;
pub mod config;
pub mod error;
pub mod models;
pub mod reader;
pub mod study;
pub mod utils;

// Re-export the most common types for easier use
pub use algorithm::cohort::{CohortBuild, CohortBuilder, SkipReason, SkippedRow};
pub use algorithm::matching::{BalanceMetric, MatchedPair, MatchingResult, match_cohorts};
pub use config::{CohortBuilderConfig, ColumnLayout, DuplicatePolicy, StudyConfig};
pub use error::{CohortMatchError, Result};
pub use models::{Cohort, RelapseStatus, Sex};
pub use study::{Comparison, StudyReport, run_comparisons, run_study};
