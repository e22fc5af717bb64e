//! Validation functions for the matching algorithm
//!
//! This module contains functions for validating cohorts before matching.

use crate::error::{CohortMatchError, Result};
use crate::models::Cohort;

/// Check that both cohorts have at least one subject
pub fn validate_cohorts(reference: &Cohort, target: &Cohort) -> Result<()> {
    for cohort in [reference, target] {
        if cohort.is_empty() {
            return Err(CohortMatchError::EmptyCohort {
                cohort: cohort.name().to_string(),
            });
        }
    }
    Ok(())
}
