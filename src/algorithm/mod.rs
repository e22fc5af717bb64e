//! Algorithm implementations for the matching study
//!
//! Cohort building from the subject table and optimal age matching of
//! controls to the case cohorts.

pub mod cohort;
pub mod matching;
