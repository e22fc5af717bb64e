//! Optimal age matching between two cohorts
//!
//! Builds the absolute age difference matrix, solves the assignment problem
//! and maps the selected cells back to subject identifiers.

use std::time::Instant;

use log::{debug, info};

use crate::algorithm::matching::assignment;
use crate::algorithm::matching::cost::CostMatrix;
use crate::algorithm::matching::types::{MatchedPair, MatchingResult};
use crate::algorithm::matching::validation::validate_cohorts;
use crate::error::Result;
use crate::models::Cohort;

/// Pair subjects of `reference` with subjects of `target` minimizing total age difference
///
/// Produces `min(|reference|, |target|)` pairs in reference cohort order.
/// Fails with `EmptyCohort` when either cohort has no subjects.
pub fn match_cohorts(reference: &Cohort, target: &Cohort) -> Result<MatchingResult> {
    let start_time = Instant::now();

    validate_cohorts(reference, target)?;

    info!(
        "Matching {} {} with {} {}",
        reference.len(),
        reference.name(),
        target.len(),
        target.name()
    );

    let costs = CostMatrix::from_cohorts(reference, target)?;
    let cells = assignment::solve(&costs);

    let mut reference_used = vec![false; reference.len()];
    let mut target_used = vec![false; target.len()];
    let pairs: Vec<MatchedPair> = cells
        .iter()
        .map(|&(row, col)| {
            reference_used[row] = true;
            target_used[col] = true;
            MatchedPair {
                reference_id: reference.ids()[row].clone(),
                reference_age: reference.ages()[row],
                target_id: target.ids()[col].clone(),
                target_age: target.ages()[col],
                age_difference: costs.get(row, col),
            }
        })
        .collect();

    let total_difference = costs.total(&cells);
    let average_difference = total_difference / pairs.len() as f64;

    let unmatched = |cohort: &Cohort, used: &[bool]| -> Vec<String> {
        cohort
            .ids()
            .iter()
            .zip(used)
            .filter(|&(_, &taken)| !taken)
            .map(|(id, _)| id.clone())
            .collect()
    };
    let unmatched_reference = unmatched(reference, &reference_used);
    let unmatched_target = unmatched(target, &target_used);

    let elapsed = start_time.elapsed();
    debug!(
        "Unmatched: {} {}, {} {}",
        unmatched_reference.len(),
        reference.name(),
        unmatched_target.len(),
        target.name()
    );
    info!(
        "Matching complete: {} pairs, average age difference {:.4} in {:.2?}",
        pairs.len(),
        average_difference,
        elapsed
    );

    Ok(MatchingResult {
        reference_cohort: reference.name().to_string(),
        target_cohort: target.name().to_string(),
        pairs,
        total_difference,
        average_difference,
        unmatched_reference,
        unmatched_target,
        matching_time: elapsed,
    })
}
