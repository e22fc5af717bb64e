//! Optimal age matching between cohorts
//!
//! This module pairs subjects of a reference cohort (controls) with subjects
//! of a target cohort (abstainers or relapsers). It includes:
//!
//! 1. The absolute age difference cost matrix
//! 2. An exact rectangular Hungarian assignment solver
//! 3. Age balance assessment for the matched pairs
//!
//! Matching is one-to-one and covers the smaller cohort completely. The total
//! age difference is minimal over all such pairings, which a greedy nearest
//! age pass does not guarantee.

pub mod assignment;
pub mod balance;
pub mod cost;
pub mod matcher;
pub mod types;
pub mod validation;

// Re-export key types
pub use balance::{BalanceMetric, DEFAULT_IMBALANCE_THRESHOLD};
pub use cost::CostMatrix;
pub use matcher::match_cohorts;
pub use types::{MatchedPair, MatchingResult};
