//! Per-tick boundary conditions
//!
//! Projection and advection erode the inflow and obstacle state, so it is
//! reasserted at the start of every tick:
//!
//! 1. A band of smoke (density 1.0) at column `x = 1`, centred on row `nc / 2`.
//! 2. Inflow velocity `u = in_velocity` on column `x = 1` for every interior row.
//! 3. Obstacle rasterization: every interior cell whose centre lies inside an
//!    obstacle becomes solid with zero velocity and density; all other interior
//!    cells revert to fluid.
//!
//! Obstacle coverage is rebuilt from scratch each pass rather than tracked
//! incrementally, which costs O(cells · obstacles) per tick.

use crate::core_types::Vec2;
use crate::grid::{GridState, Obstacle, FLUID, SOLID};
use rayon::prelude::*;

/// Smoke value injected by the inflow band
pub const INFLOW_DENSITY: f32 = 1.0;

/// Inflow and obstacle boundary conditions.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BoundaryConditions {
    /// Horizontal velocity forced on the inflow column
    pub in_velocity: f32,
    /// Width of the smoke band as a fraction of the interior resolution
    pub relative_stream_width: f32,
}

impl Default for BoundaryConditions {
    fn default() -> Self {
        Self {
            in_velocity: 1.0,
            relative_stream_width: 0.2,
        }
    }
}

impl BoundaryConditions {
    /// Create boundary conditions with the given inflow speed and band width
    #[must_use]
    pub fn new(in_velocity: f32, relative_stream_width: f32) -> Self {
        Self {
            in_velocity,
            relative_stream_width,
        }
    }

    /// Inclusive row range of the smoke band for a grid with `cell_count` interior cells
    ///
    /// The band spans `round(nc · relative_stream_width) + 1` rows starting at
    /// `nc / 2 - width / 2`, clipped to the interior rows.
    #[must_use]
    pub fn stream_rows(&self, cell_count: usize) -> (usize, usize) {
        let width = (cell_count as f32 * self.relative_stream_width)
            .round()
            .max(0.0) as usize;
        let start = (cell_count / 2).saturating_sub(width / 2).max(1);
        let end = (start + width).min(cell_count);
        (start, end)
    }

    /// Reassert inflow and obstacle state on `grid`
    ///
    /// Returns the number of interior cells covered by obstacles.
    pub fn apply(&self, grid: &mut GridState, obstacles: &[Obstacle]) -> usize {
        self.apply_inflow(grid);
        rasterize_obstacles(grid, obstacles)
    }

    fn apply_inflow(&self, grid: &mut GridState) {
        let ny = grid.ny();
        let (start, end) = self.stream_rows(grid.cell_count());

        for y in start..=end {
            grid.density.set(1, y, INFLOW_DENSITY);
        }

        for y in 1..ny - 1 {
            grid.u.set(1, y, self.in_velocity);
        }
    }
}

/// Rebuild the obstacle part of the solid mask, clearing covered cells
fn rasterize_obstacles(grid: &mut GridState, obstacles: &[Obstacle]) -> usize {
    let nx = grid.nx();
    let ny = grid.ny();
    let h = grid.cell_size();

    let solid = &mut grid.solid.data;
    let u = &mut grid.u.data;
    let v = &mut grid.v.data;
    let density = &mut grid.density.data;

    solid
        .par_chunks_mut(nx)
        .zip(u.par_chunks_mut(nx))
        .zip(v.par_chunks_mut(nx))
        .zip(density.par_chunks_mut(nx))
        .enumerate()
        .skip(1)
        .take(ny - 2)
        .map(|(y, (((solid_row, u_row), v_row), density_row))| {
            let center_y = (y as f32 + 0.5) * h;
            let mut covered = 0;
            for x in 1..nx - 1 {
                let center = Vec2::new((x as f32 + 0.5) * h, center_y);
                if obstacles.iter().any(|obstacle| obstacle.contains(center)) {
                    solid_row[x] = SOLID;
                    u_row[x] = 0.0;
                    v_row[x] = 0.0;
                    density_row[x] = 0.0;
                    covered += 1;
                } else {
                    solid_row[x] = FLUID;
                }
            }
            covered
        })
        .sum()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_stream_rows_default() {
        let bc = BoundaryConditions::default();
        // round(10 * 0.2) = 2 -> rows 4..=6
        assert_eq!(bc.stream_rows(10), (4, 6));
        // round(100 * 0.2) = 20 -> rows 40..=60
        assert_eq!(bc.stream_rows(100), (40, 60));
    }

    #[test]
    fn test_stream_rows_stay_interior() {
        let bc = BoundaryConditions::new(1.0, 2.0);
        let (start, end) = bc.stream_rows(6);
        assert!(start >= 1);
        assert!(end <= 6);
    }

    #[test]
    fn test_inflow() {
        let mut grid = GridState::new(10, 0.1);
        let bc = BoundaryConditions::new(2.5, 0.2);
        bc.apply(&mut grid, &[]);

        for y in 0..grid.ny() {
            let expected_density = if (4..=6).contains(&y) { 1.0 } else { 0.0 };
            assert_eq!(grid.density.get(1, y), expected_density, "row {y}");

            let expected_u = if y == 0 || y == grid.ny() - 1 { 0.0 } else { 2.5 };
            assert_eq!(grid.u.get(1, y), expected_u, "row {y}");
        }
    }

    #[test]
    fn test_obstacle_clears_cells() {
        let mut grid = GridState::new(10, 0.1);
        grid.u.fill(1.0);
        grid.v.fill(1.0);
        grid.density.fill(1.0);

        // Centre of cell (5, 5) is (0.55, 0.55)
        let obstacle = Obstacle::new(Vec2::new(0.55, 0.55), 0.05);
        let covered = BoundaryConditions::default().apply(&mut grid, &[obstacle]);

        assert_eq!(covered, 1);
        assert!(!grid.is_fluid(5, 5));
        assert_eq!(grid.u.get(5, 5), 0.0);
        assert_eq!(grid.v.get(5, 5), 0.0);
        assert_eq!(grid.density.get(5, 5), 0.0);
        assert!(grid.is_fluid(6, 5));
        assert_eq!(grid.u.get(6, 5), 1.0);
    }

    #[test]
    fn test_overlapping_obstacles() {
        let mut grid = GridState::new(10, 0.1);
        let a = Obstacle::new(Vec2::new(0.55, 0.55), 0.15);
        let b = Obstacle::new(Vec2::new(0.65, 0.55), 0.15);

        let covered_both = BoundaryConditions::default().apply(&mut grid, &[a, b]);
        let mask_ab = grid.solid.clone();
        BoundaryConditions::default().apply(&mut grid, &[b, a]);

        assert_eq!(grid.solid, mask_ab);
        let covered_a = BoundaryConditions::default().apply(&mut grid, &[a]);
        assert!(covered_both > covered_a);
    }

    #[test]
    fn test_moved_obstacle_releases_cells() {
        let mut grid = GridState::new(10, 0.1);
        let bc = BoundaryConditions::default();
        let mut obstacle = Obstacle::new(Vec2::new(0.55, 0.55), 0.1);

        bc.apply(&mut grid, &[obstacle]);
        assert!(!grid.is_fluid(5, 5));

        obstacle.translate(Vec2::new(0.3, 0.0));
        bc.apply(&mut grid, &[obstacle]);
        assert!(grid.is_fluid(5, 5));
        assert!(!grid.is_fluid(8, 5));
    }

    #[test]
    fn test_walls_untouched() {
        let mut grid = GridState::new(10, 0.1);
        // Covers the whole domain
        let obstacle = Obstacle::new(Vec2::new(0.6, 0.6), 10.0);
        BoundaryConditions::default().apply(&mut grid, &[obstacle]);

        for x in 0..grid.nx() {
            assert!(!grid.is_fluid(x, 0));
            assert!(!grid.is_fluid(x, grid.ny() - 1));
        }
        for y in 1..grid.ny() - 1 {
            assert!(!grid.is_fluid(0, y));
            assert!(grid.is_fluid(grid.nx() - 1, y));
        }
    }
}
