//! Bilinear sampling of staggered fields
//!
//! Each field is stored on its own lattice (see [`Field::stagger`]). A sample
//! position is first clamped to `[h, n·h]` on both axes so lookups never leave
//! the stored lattice, then shifted by the field's stagger offset and blended
//! from the four surrounding lattice points.

use crate::grid::{Field, GridState};

/// Read-only bilinear sampler over a [`GridState`].
#[derive(Debug, Clone, Copy)]
pub struct FieldSampler<'a> {
    grid: &'a GridState,
}

impl<'a> FieldSampler<'a> {
    /// Create a sampler reading from `grid`
    #[must_use]
    pub fn new(grid: &'a GridState) -> Self {
        Self { grid }
    }

    /// Interpolated value of `field` at simulation-space position `(x, y)`
    #[must_use]
    pub fn sample(&self, x: f32, y: f32, field: Field) -> f32 {
        let grid = self.grid;
        let h = grid.cell_size();
        let nx = grid.nx();
        let ny = grid.ny();

        let x = x.clamp(h, nx as f32 * h);
        let y = y.clamp(h, ny as f32 * h);

        let (dx, dy) = field.offset(h);
        let (x0, x1, tx) = lattice_span(x - dx, h, nx);
        let (y0, y1, ty) = lattice_span(y - dy, h, ny);

        let sx = 1.0 - tx;
        let sy = 1.0 - ty;

        let values = grid.field(field);
        sx * sy * values.get(x0, y0)
            + tx * sy * values.get(x1, y0)
            + sx * ty * values.get(x0, y1)
            + tx * ty * values.get(x1, y1)
    }
}

/// Fractional indices within this many ulps of a whole number snap onto it
const SNAP_ULPS: f32 = 8.0;

/// Lower/upper lattice indices around `pos` and the fractional weight of the upper one
///
/// Positions that land on a stored lattice point up to rounding get `t = 0`,
/// so sampling there returns the stored value exactly for any cell size.
#[inline]
fn lattice_span(pos: f32, h: f32, n: usize) -> (usize, usize, f32) {
    let g = (pos / h).max(0.0);
    let nearest = g.round();
    let g = if (g - nearest).abs() <= SNAP_ULPS * f32::EPSILON * nearest.max(1.0) {
        nearest
    } else {
        g
    };

    let i0 = (g.floor() as usize).min(n - 1);
    let i1 = (i0 + 1).min(n - 1);
    let t = g - i0 as f32;
    (i0, i1, t)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn ramp_grid_with(cell_count: usize, h: f32) -> GridState {
        let mut grid = GridState::new(cell_count, h);
        for y in 0..grid.ny() {
            for x in 0..grid.nx() {
                grid.u.set(x, y, (x * 10 + y) as f32);
                grid.v.set(x, y, (x * 100 + y) as f32);
                grid.density.set(x, y, (x + y * 7) as f32 * 0.01);
            }
        }
        grid
    }

    fn ramp_grid() -> GridState {
        ramp_grid_with(8, 0.125)
    }

    fn assert_lattice_exact(grid: &GridState) {
        let sampler = FieldSampler::new(grid);
        for field in Field::ALL {
            for y in 1..grid.ny() - 1 {
                for x in 1..grid.nx() - 1 {
                    let p = grid.lattice_position(field, x, y);
                    assert_eq!(
                        sampler.sample(p.x, p.y, field),
                        grid.field(field).get(x, y),
                        "{field:?} at ({x}, {y}), h={}",
                        grid.cell_size()
                    );
                }
            }
        }
    }

    #[test]
    fn test_lattice_points_are_exact() {
        assert_lattice_exact(&ramp_grid());
    }

    #[test]
    fn test_lattice_points_are_exact_for_inexact_cell_sizes() {
        for cell_count in [10, 12, 24, 40] {
            let grid = ramp_grid_with(cell_count, 1.0 / cell_count as f32);
            assert_lattice_exact(&grid);
        }
    }

    #[test]
    fn test_lattice_span_snaps_rounding_noise() {
        let h = 0.1_f32;
        // 0.1 has no exact f32 representation
        let (i0, i1, t) = lattice_span(3.0 * h, h, 12);
        assert_eq!((i0, i1, t), (3, 4, 0.0));

        let (i0, _, t) = lattice_span(0.35, h, 12);
        assert_eq!(i0, 3);
        assert_relative_eq!(t, 0.5, epsilon = 1e-5);

        // Upper edge clamps onto the last lattice point
        let (i0, i1, t) = lattice_span(12.0 * h, h, 12);
        assert_eq!((i0, i1), (11, 11));
        assert_relative_eq!(t, 1.0, epsilon = 1e-5);
    }

    #[test]
    fn test_clamps_below_lower_bound() {
        let grid = ramp_grid();
        let sampler = FieldSampler::new(&grid);
        let h = grid.cell_size();

        for field in Field::ALL {
            assert_eq!(
                sampler.sample(-3.0, -1.0, field),
                sampler.sample(h, h, field)
            );
            assert_eq!(
                sampler.sample(-3.0, 0.6, field),
                sampler.sample(h, 0.6, field)
            );
        }
    }

    #[test]
    fn test_clamps_above_upper_bound() {
        let grid = ramp_grid();
        let sampler = FieldSampler::new(&grid);
        let upper = grid.nx() as f32 * grid.cell_size();

        for field in Field::ALL {
            assert_eq!(
                sampler.sample(50.0, 50.0, field),
                sampler.sample(upper, upper, field)
            );
        }
    }

    #[test]
    fn test_midpoint_blends_neighbours() {
        let grid = ramp_grid();
        let sampler = FieldSampler::new(&grid);
        let h = grid.cell_size();

        // Halfway between u[2][3] and u[2][4]
        let value = sampler.sample(3.5 * h, 2.5 * h, Field::U);
        let expected = 0.5 * (grid.u.get(3, 2) + grid.u.get(4, 2));
        assert_relative_eq!(value, expected, epsilon = 1e-5);

        // Centre of four density samples
        let value = sampler.sample(3.0 * h, 3.0 * h, Field::Density);
        let expected = 0.25
            * (grid.density.get(2, 2)
                + grid.density.get(3, 2)
                + grid.density.get(2, 3)
                + grid.density.get(3, 3));
        assert_relative_eq!(value, expected, epsilon = 1e-5);
    }

    #[test]
    fn test_constant_field_is_reproduced() {
        let mut grid = GridState::new(5, 0.2);
        grid.v.fill(1.5);
        let sampler = FieldSampler::new(&grid);
        for &(x, y) in &[(0.3, 0.7), (0.0, 0.0), (1.1, 0.25), (0.55, 1.39)] {
            assert_relative_eq!(sampler.sample(x, y, Field::V), 1.5, epsilon = 1e-5);
        }
    }
}
