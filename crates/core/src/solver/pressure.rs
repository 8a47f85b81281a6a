//! Pressure projection by Gauss-Seidel relaxation with over-relaxation (SOR)
//!
//! Each sweep visits interior fluid cells in row-major order and removes the
//! cell's divergence by pushing an equal correction through every open face:
//!
//! ```text
//! div = (u[y][x+1] - u[y][x]) + (v[y+1][x] - v[y][x])
//! p   = -ω · div / s_total
//! u[y][x]   -= p · sx0     u[y][x+1] += p · sx1
//! v[y][x]   -= p · sy0     v[y+1][x] += p · sy1
//! ```
//!
//! Updates happen in place, so later cells in a sweep see the corrected faces
//! of earlier ones. There is no convergence check: the projector always runs
//! its full iteration budget, which keeps per-tick cost constant.

use crate::grid::GridState;
use rayon::prelude::*;

/// Iterative incompressibility solver.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PressureProjector {
    /// Number of full Gauss-Seidel sweeps per projection
    pub iterations: usize,
    /// Over-relaxation factor ω (1.0 = plain Gauss-Seidel)
    pub over_relaxation: f32,
}

impl Default for PressureProjector {
    fn default() -> Self {
        Self {
            iterations: 120,
            over_relaxation: 1.9,
        }
    }
}

impl PressureProjector {
    /// Create a projector with a fixed sweep count and SOR factor
    #[must_use]
    pub fn new(iterations: usize, over_relaxation: f32) -> Self {
        Self {
            iterations,
            over_relaxation,
        }
    }

    /// Run the full iteration budget on `grid`
    pub fn project(&self, grid: &mut GridState) {
        for _ in 0..self.iterations {
            self.sweep(grid);
        }
    }

    /// One in-place Gauss-Seidel sweep over the interior cells
    pub fn sweep(&self, grid: &mut GridState) {
        let nx = grid.nx();
        let ny = grid.ny();

        for y in 1..ny - 1 {
            for x in 1..nx - 1 {
                if !grid.is_fluid(x, y) {
                    continue;
                }

                let sx0 = grid.openness(x - 1, y);
                let sx1 = grid.openness(x + 1, y);
                let sy0 = grid.openness(x, y - 1);
                let sy1 = grid.openness(x, y + 1);
                let s_total = sx0 + sx1 + sy0 + sy1;

                // Enclosed by solids: nothing can flow in or out
                if s_total == 0.0 {
                    continue;
                }

                let div = cell_divergence(grid, x, y);
                let p = -self.over_relaxation * div / s_total;

                let u = &mut grid.u;
                u.set(x, y, u.get(x, y) - p * sx0);
                u.set(x + 1, y, u.get(x + 1, y) + p * sx1);

                let v = &mut grid.v;
                v.set(x, y, v.get(x, y) - p * sy0);
                v.set(x, y + 1, v.get(x, y + 1) + p * sy1);
            }
        }
    }
}

/// Net outflow of cell `(x, y)` through its four faces
#[inline]
#[must_use]
pub fn cell_divergence(grid: &GridState, x: usize, y: usize) -> f32 {
    (grid.u.get(x + 1, y) - grid.u.get(x, y)) + (grid.v.get(x, y + 1) - grid.v.get(x, y))
}

/// Sum of `|div|` over interior fluid cells
///
/// Row partial sums are computed in parallel and reduced in row order, so the
/// result does not depend on the thread count.
#[must_use]
pub fn total_divergence(grid: &GridState) -> f32 {
    let nx = grid.nx();
    let row_sums: Vec<f32> = (1..grid.ny() - 1)
        .into_par_iter()
        .map(|y| {
            (1..nx - 1)
                .filter(|&x| grid.is_fluid(x, y))
                .map(|x| cell_divergence(grid, x, y).abs())
                .sum::<f32>()
        })
        .collect();
    row_sums.iter().sum()
}
