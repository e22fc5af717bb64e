//! Type definitions for the matching algorithm

use std::time::Duration;

use serde::Serialize;

/// Pair of matched reference and target subjects
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MatchedPair {
    /// Reference subject (a control)
    pub reference_id: String,
    /// Reference subject age
    pub reference_age: f64,
    /// Target subject (an abstainer or relapser)
    pub target_id: String,
    /// Target subject age
    pub target_age: f64,
    /// Absolute age difference
    pub age_difference: f64,
}

/// Result of matching two cohorts
#[derive(Debug, Clone, Serialize)]
pub struct MatchingResult {
    /// Name of the reference cohort
    pub reference_cohort: String,
    /// Name of the target cohort
    pub target_cohort: String,
    /// Matched pairs in reference cohort order
    pub pairs: Vec<MatchedPair>,
    /// Sum of absolute age differences over all pairs
    pub total_difference: f64,
    /// Mean absolute age difference per pair
    pub average_difference: f64,
    /// Reference subjects left without a partner
    pub unmatched_reference: Vec<String>,
    /// Target subjects left without a partner
    pub unmatched_target: Vec<String>,
    /// Time taken for matching
    #[serde(skip)]
    pub matching_time: Duration,
}

impl MatchingResult {
    /// Number of matched pairs
    #[must_use]
    pub fn len(&self) -> usize {
        self.pairs.len()
    }

    /// Check if no pairs were produced
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.pairs.is_empty()
    }

    /// Pairs as `(reference id, target id)`
    pub fn id_pairs(&self) -> impl Iterator<Item = (&str, &str)> + '_ {
        self.pairs
            .iter()
            .map(|pair| (pair.reference_id.as_str(), pair.target_id.as_str()))
    }
}
