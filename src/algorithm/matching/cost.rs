//! Cost matrix of absolute age differences

use crate::error::{CohortMatchError, Result};
use crate::models::Cohort;

/// Dense row-major cost matrix
#[derive(Debug, Clone, PartialEq)]
pub struct CostMatrix {
    rows: usize,
    cols: usize,
    data: Vec<f64>,
}

impl CostMatrix {
    /// Create a matrix from row-major data
    pub fn new(rows: usize, cols: usize, data: Vec<f64>) -> Result<Self> {
        if data.len() != rows * cols {
            return Err(CohortMatchError::CostMatrixShape {
                rows,
                cols,
                values: data.len(),
            });
        }
        Ok(Self { rows, cols, data })
    }

    /// `cost[i][j] = |reference[i] - target[j]|`, rows follow the reference cohort order
    pub fn from_cohorts(reference: &Cohort, target: &Cohort) -> Result<Self> {
        check_finite(reference)?;
        check_finite(target)?;

        let data = reference
            .ages()
            .iter()
            .flat_map(|&a| target.ages().iter().map(move |&b| (a - b).abs()))
            .collect();
        Self::new(reference.len(), target.len(), data)
    }

    /// Number of rows
    #[must_use]
    pub const fn rows(&self) -> usize {
        self.rows
    }

    /// Number of columns
    #[must_use]
    pub const fn cols(&self) -> usize {
        self.cols
    }

    /// Cost of cell `(row, col)`
    #[must_use]
    pub fn get(&self, row: usize, col: usize) -> f64 {
        self.data[row * self.cols + col]
    }

    /// Sum of the selected cells
    #[must_use]
    pub fn total(&self, cells: &[(usize, usize)]) -> f64 {
        cells.iter().map(|&(row, col)| self.get(row, col)).sum()
    }
}

fn check_finite(cohort: &Cohort) -> Result<()> {
    match cohort.iter().find(|(_, age)| !age.is_finite()) {
        Some((subject, age)) => Err(CohortMatchError::InvalidAge {
            cohort: cohort.name().to_string(),
            subject: subject.to_string(),
            age,
        }),
        None => Ok(()),
    }
}
