//! Hungarian assignment for rectangular cost matrices.
//!
//! Shortest augmenting path formulation with row and column potentials. The
//! matrix is solved with rows as the smaller side; a tall matrix is
//! transposed first. Every row of the smaller side is assigned exactly once.

use super::cost::CostMatrix;

/// Solve the linear assignment problem exactly
///
/// Returns `min(rows, cols)` `(row, col)` cells, sorted by row, with each row
/// and column used at most once and minimal total cost. All costs must be
/// finite.
#[must_use]
pub fn solve(costs: &CostMatrix) -> Vec<(usize, usize)> {
    let (rows, cols) = (costs.rows(), costs.cols());
    if rows == 0 || cols == 0 {
        return Vec::new();
    }

    let mut cells = if rows <= cols {
        solve_wide(rows, cols, |i, j| costs.get(i, j))
    } else {
        solve_wide(cols, rows, |i, j| costs.get(j, i))
            .into_iter()
            .map(|(col, row)| (row, col))
            .collect()
    };
    cells.sort_unstable_by_key(|&(row, _)| row);
    cells
}

/// Assignment for `n <= m`; indices inside are 1-based with 0 as the sentinel.
fn solve_wide<F>(n: usize, m: usize, cost: F) -> Vec<(usize, usize)>
where
    F: Fn(usize, usize) -> f64,
{
    let mut u = vec![0.0_f64; n + 1];
    let mut v = vec![0.0_f64; m + 1];
    // owner[j]: row currently assigned to column j
    let mut owner = vec![0_usize; m + 1];
    let mut way = vec![0_usize; m + 1];

    for row in 1..=n {
        owner[0] = row;
        let mut j0 = 0;
        let mut min_slack = vec![f64::INFINITY; m + 1];
        let mut used = vec![false; m + 1];

        loop {
            used[j0] = true;
            let i0 = owner[j0];
            let mut delta = f64::INFINITY;
            let mut j1 = 0;

            for j in 1..=m {
                if used[j] {
                    continue;
                }
                let slack = cost(i0 - 1, j - 1) - u[i0] - v[j];
                if slack < min_slack[j] {
                    min_slack[j] = slack;
                    way[j] = j0;
                }
                if min_slack[j] < delta {
                    delta = min_slack[j];
                    j1 = j;
                }
            }

            for j in 0..=m {
                if used[j] {
                    u[owner[j]] += delta;
                    v[j] -= delta;
                } else {
                    min_slack[j] -= delta;
                }
            }

            j0 = j1;
            if owner[j0] == 0 {
                break;
            }
        }

        // Flip the augmenting path back to the root
        while j0 != 0 {
            let j1 = way[j0];
            owner[j0] = owner[j1];
            j0 = j1;
        }
    }

    (1..=m)
        .filter(|&j| owner[j] != 0)
        .map(|j| (owner[j] - 1, j - 1))
        .collect()
}
