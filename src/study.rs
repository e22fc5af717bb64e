//! Study runner
//!
//! Builds the case cohorts from a subject table and matches the controls
//! against each of them in turn.

use std::path::Path;
use std::time::Instant;

use log::{info, warn};
use serde::Serialize;

use crate::algorithm::cohort::{CohortBuild, CohortBuilder, SkippedRow};
use crate::algorithm::matching::{
    BalanceMetric, DEFAULT_IMBALANCE_THRESHOLD, MatchingResult, match_cohorts,
};
use crate::config::StudyConfig;
use crate::error::Result;
use crate::models::Cohort;

/// Label of the controls versus abstainers comparison
pub const CONTROLS_ABSTAINERS: &str = "Controls-Abstainers";
/// Label of the controls versus relapsers comparison
pub const CONTROLS_RELAPSERS: &str = "Controls-Relapsers";

/// One completed comparison
#[derive(Debug, Clone, Serialize)]
pub struct Comparison {
    /// Comparison label
    pub label: String,
    /// Optimal pairing
    pub result: MatchingResult,
    /// Age balance of the matched pairs
    pub balance: BalanceMetric,
}

/// Outcome of a full study run
#[derive(Debug, Clone, Serialize)]
pub struct StudyReport {
    /// Comparisons in run order
    pub comparisons: Vec<Comparison>,
    /// Data rows read from the subject table
    pub rows_read: usize,
    /// Subjects in the abstainer cohort
    pub abstainer_count: usize,
    /// Subjects in the relapser cohort
    pub relapser_count: usize,
    /// Rows excluded from both case cohorts
    pub skipped: Vec<SkippedRow>,
    /// Identifiers that repeated within a cohort
    pub duplicates: Vec<String>,
}

/// Read the subject table at `input` and run both comparisons
pub fn run_study(input: &Path, config: &StudyConfig) -> Result<StudyReport> {
    let start = Instant::now();
    let build = CohortBuilder::new(config.builder.clone()).build_from_path(input)?;
    let report = run_comparisons(&config.controls, build)?;
    info!("Study completed in {:.2?}", start.elapsed());
    Ok(report)
}

/// Match the controls against the abstainers, then the relapsers
///
/// The first comparison that cannot be computed aborts the run with an
/// error naming that comparison.
pub fn run_comparisons(controls: &Cohort, build: CohortBuild) -> Result<StudyReport> {
    if !build.skipped.is_empty() {
        warn!(
            "{} of {} rows were excluded from the case cohorts",
            build.skipped.len(),
            build.rows_read
        );
    }

    let comparisons = [
        (CONTROLS_ABSTAINERS, &build.abstainers),
        (CONTROLS_RELAPSERS, &build.relapsers),
    ]
    .into_iter()
    .map(|(label, cases)| -> Result<Comparison> {
        let result = match_cohorts(controls, cases).map_err(|e| e.in_comparison(label))?;
        let balance = BalanceMetric::age(&result, DEFAULT_IMBALANCE_THRESHOLD);
        Ok(Comparison {
            label: label.to_string(),
            result,
            balance,
        })
    })
    .collect::<Result<Vec<_>>>()?;

    Ok(StudyReport {
        comparisons,
        rows_read: build.rows_read,
        abstainer_count: build.abstainers.len(),
        relapser_count: build.relapsers.len(),
        skipped: build.skipped,
        duplicates: build.duplicates,
    })
}
