//! Balance assessment for matched pairs
//!
//! Compares the age distribution of the matched target subjects (cases)
//! with that of their matched reference subjects (controls).

use std::fmt;

use serde::Serialize;

use crate::algorithm::matching::types::MatchingResult;

/// Standardized difference above which a covariate counts as imbalanced
pub const DEFAULT_IMBALANCE_THRESHOLD: f64 = 0.1;

/// Balance between matched cases and controls for a single covariate
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BalanceMetric {
    /// Name of the covariate
    pub name: String,

    /// Mean for the target (case) side
    pub case_mean: f64,

    /// Mean for the reference (control) side
    pub control_mean: f64,

    /// Sample standard deviation for cases
    pub case_std: f64,

    /// Sample standard deviation for controls
    pub control_std: f64,

    /// Standardized difference between case and control groups
    pub standardized_difference: f64,

    /// Whether |standardized difference| exceeds the threshold
    pub imbalanced: bool,
}

impl BalanceMetric {
    /// Age balance over the pairs of a matching result
    #[must_use]
    pub fn age(result: &MatchingResult, imbalance_threshold: f64) -> Self {
        let case_ages: Vec<f64> = result.pairs.iter().map(|pair| pair.target_age).collect();
        let control_ages: Vec<f64> = result.pairs.iter().map(|pair| pair.reference_age).collect();
        Self::from_values("age", &case_ages, &control_ages, imbalance_threshold)
    }

    /// Balance between two samples of a numeric covariate
    #[must_use]
    pub fn from_values(
        name: &str,
        cases: &[f64],
        controls: &[f64],
        imbalance_threshold: f64,
    ) -> Self {
        let (case_mean, case_std) = sample_summary(cases);
        let (control_mean, control_std) = sample_summary(controls);

        // Pooled SD; zero when neither group varies
        let pooled_std = ((case_std * case_std + control_std * control_std) / 2.0).sqrt();
        let standardized_difference = if pooled_std > 0.0 {
            (case_mean - control_mean) / pooled_std
        } else {
            0.0
        };

        Self {
            name: name.to_string(),
            case_mean,
            control_mean,
            case_std,
            control_std,
            standardized_difference,
            imbalanced: standardized_difference.abs() > imbalance_threshold,
        }
    }
}

impl fmt::Display for BalanceMetric {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}: case mean {:.2} (SD {:.2}), control mean {:.2} (SD {:.2}), std diff {:.4}{}",
            self.name,
            self.case_mean,
            self.case_std,
            self.control_mean,
            self.control_std,
            self.standardized_difference,
            if self.imbalanced { " [imbalanced]" } else { "" }
        )
    }
}

/// Mean and sample standard deviation; both zero for an empty sample
fn sample_summary(values: &[f64]) -> (f64, f64) {
    if values.is_empty() {
        return (0.0, 0.0);
    }
    let n = values.len() as f64;
    let mean = values.iter().sum::<f64>() / n;
    if values.len() == 1 {
        return (mean, 0.0);
    }
    let squares: f64 = values.iter().map(|&x| (x - mean) * (x - mean)).sum();
    (mean, (squares / (n - 1.0)).sqrt())
}
