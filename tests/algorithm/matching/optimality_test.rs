//! Property tests for the optimal matcher

use std::collections::HashSet;

use cohort_match::algorithm::matching::{CostMatrix, assignment, match_cohorts};
use proptest::prelude::*;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::utils::{brute_force_min_total, cohort};

fn ages(max_len: usize) -> impl Strategy<Value = Vec<f64>> {
    // Tenths of a year keep ties likely and sums exact enough
    prop::collection::vec((180u32..900).prop_map(|tenths| f64::from(tenths) / 10.0), 1..=max_len)
}

proptest! {
    #[test]
    fn pair_count_is_smaller_cohort_size(a in ages(6), b in ages(6)) {
        let result = match_cohorts(&cohort("controls", "C", &a), &cohort("cases", "S", &b)).unwrap();
        prop_assert_eq!(result.len(), a.len().min(b.len()));
        prop_assert_eq!(
            result.unmatched_reference.len() + result.unmatched_target.len(),
            a.len().abs_diff(b.len())
        );
    }

    #[test]
    fn identifiers_used_at_most_once(a in ages(6), b in ages(6)) {
        let result = match_cohorts(&cohort("controls", "C", &a), &cohort("cases", "S", &b)).unwrap();
        let references: HashSet<_> = result.pairs.iter().map(|p| p.reference_id.as_str()).collect();
        let targets: HashSet<_> = result.pairs.iter().map(|p| p.target_id.as_str()).collect();
        prop_assert_eq!(references.len(), result.len());
        prop_assert_eq!(targets.len(), result.len());
    }

    #[test]
    fn total_matches_brute_force_optimum(a in ages(6), b in ages(6)) {
        let result = match_cohorts(&cohort("controls", "C", &a), &cohort("cases", "S", &b)).unwrap();
        let optimum = brute_force_min_total(&a, &b);
        prop_assert!((result.total_difference - optimum).abs() < 1e-9,
            "matcher total {} vs brute force {}", result.total_difference, optimum);
    }

    #[test]
    fn average_is_total_over_pairs(a in ages(6), b in ages(6)) {
        let result = match_cohorts(&cohort("controls", "C", &a), &cohort("cases", "S", &b)).unwrap();
        let summed: f64 = result.pairs.iter().map(|p| p.age_difference).sum();
        prop_assert!((summed - result.total_difference).abs() < 1e-9);
        prop_assert!((result.average_difference - summed / result.len() as f64).abs() < 1e-9);
    }

    #[test]
    fn pairs_follow_reference_order(a in ages(6), b in ages(6)) {
        let controls = cohort("controls", "C", &a);
        let result = match_cohorts(&controls, &cohort("cases", "S", &b)).unwrap();
        let positions: Vec<usize> = result
            .pairs
            .iter()
            .map(|p| controls.ids().iter().position(|id| *id == p.reference_id).unwrap())
            .collect();
        prop_assert!(positions.windows(2).all(|w| w[0] < w[1]));
    }
}

#[test]
fn test_scenario_two_by_two() {
    let controls = cohort("controls", "C", &[60.0, 70.0]);
    let abstainers = cohort("abstainers", "A", &[59.0, 72.0]);

    let result = match_cohorts(&controls, &abstainers).unwrap();
    let pairs: Vec<_> = result.id_pairs().collect();
    assert_eq!(pairs, [("C0", "A0"), ("C1", "A1")]);
    assert!((result.average_difference - 1.5).abs() < 1e-12);
}

#[test]
fn test_seeded_random_cohorts_against_brute_force() {
    let mut rng = StdRng::seed_from_u64(42);
    for _ in 0..50 {
        let m = rng.random_range(1..=6);
        let n = rng.random_range(1..=6);
        let a: Vec<f64> = (0..m).map(|_| rng.random_range(18.0..90.0)).collect();
        let b: Vec<f64> = (0..n).map(|_| rng.random_range(18.0..90.0)).collect();

        let costs = CostMatrix::from_cohorts(&cohort("a", "A", &a), &cohort("b", "B", &b)).unwrap();
        let cells = assignment::solve(&costs);
        assert_eq!(cells.len(), m.min(n));
        assert!((costs.total(&cells) - brute_force_min_total(&a, &b)).abs() < 1e-9);
    }
}
