//! Semi-Lagrangian advection of velocity and smoke
//!
//! Every stored sample is traced backwards along the velocity field for one
//! timestep and replaced by the old field's value at the departure point. The
//! new values are written into scratch buffers owned by the [`Advector`] and
//! swapped into the grid once the whole sweep is finished, so every lookup in a
//! sweep reads the unmodified field.

use super::sampler::FieldSampler;
use crate::grid::{Field, FieldData, GridState};
use rayon::prelude::*;

/// Semi-Lagrangian transport with double-buffered output.
#[derive(Debug, Clone)]
pub struct Advector {
    u_next: FieldData<f32>,
    v_next: FieldData<f32>,
    density_next: FieldData<f32>,
}

impl Advector {
    /// Allocate scratch buffers for a `nx` × `ny` grid
    #[must_use]
    pub fn new(nx: usize, ny: usize) -> Self {
        Self {
            u_next: FieldData::new(nx, ny),
            v_next: FieldData::new(nx, ny),
            density_next: FieldData::new(nx, ny),
        }
    }

    /// Scratch buffers sized for `grid`
    #[must_use]
    pub fn for_grid(grid: &GridState) -> Self {
        Self::new(grid.nx(), grid.ny())
    }

    /// Advect velocity, then density, by `dt`
    pub fn advect(&mut self, grid: &mut GridState, dt: f32) {
        self.advect_velocity(grid, dt);
        self.advect_smoke(grid, dt);
    }

    /// Transport both velocity components along themselves
    ///
    /// A u-face is advected only if the cells on both sides of it are fluid and
    /// it is not in the last row; a v-face only if the cells above and below are
    /// fluid and it is not in the last column. All other faces keep their
    /// current value.
    pub fn advect_velocity(&mut self, grid: &mut GridState, dt: f32) {
        self.u_next.copy_from(&grid.u);
        self.v_next.copy_from(&grid.v);

        let frozen: &GridState = grid;
        let sampler = FieldSampler::new(frozen);
        let nx = frozen.nx();
        let ny = frozen.ny();
        let (u, v) = (&frozen.u, &frozen.v);

        self.u_next
            .data
            .par_chunks_mut(nx)
            .zip(self.v_next.data.par_chunks_mut(nx))
            .enumerate()
            .skip(1)
            .for_each(|(y, (u_row, v_row))| {
                for x in 1..nx {
                    let fluid = frozen.is_fluid(x, y);

                    if fluid && frozen.is_fluid(x - 1, y) && y < ny - 1 {
                        let pos = frozen.lattice_position(Field::U, x, y);
                        let avg_v =
                            0.25 * (v.get(x, y) + v.get(x - 1, y) + v.get(x - 1, y + 1) + v.get(x, y + 1));
                        let prev_x = pos.x - u.get(x, y) * dt;
                        let prev_y = pos.y - avg_v * dt;
                        u_row[x] = sampler.sample(prev_x, prev_y, Field::U);
                    }

                    if fluid && frozen.is_fluid(x, y - 1) && x < nx - 1 {
                        let pos = frozen.lattice_position(Field::V, x, y);
                        let avg_u =
                            0.25 * (u.get(x, y - 1) + u.get(x + 1, y - 1) + u.get(x, y) + u.get(x + 1, y));
                        let prev_x = pos.x - avg_u * dt;
                        let prev_y = pos.y - v.get(x, y) * dt;
                        v_row[x] = sampler.sample(prev_x, prev_y, Field::V);
                    }
                }
            });

        std::mem::swap(&mut grid.u, &mut self.u_next);
        std::mem::swap(&mut grid.v, &mut self.v_next);
    }

    /// Transport density along the (already advected) velocity field
    ///
    /// Only interior fluid cells are updated; solid cells keep their value.
    pub fn advect_smoke(&mut self, grid: &mut GridState, dt: f32) {
        self.density_next.copy_from(&grid.density);

        let frozen: &GridState = grid;
        let sampler = FieldSampler::new(frozen);
        let nx = frozen.nx();
        let ny = frozen.ny();
        let (u, v) = (&frozen.u, &frozen.v);

        self.density_next
            .data
            .par_chunks_mut(nx)
            .enumerate()
            .skip(1)
            .take(ny - 2)
            .for_each(|(y, density_row)| {
                for x in 1..nx - 1 {
                    if !frozen.is_fluid(x, y) {
                        continue;
                    }

                    let pos = frozen.cell_center(x, y);
                    let u_mid = 0.5 * (u.get(x, y) + u.get(x + 1, y));
                    let v_mid = 0.5 * (v.get(x, y) + v.get(x, y + 1));
                    density_row[x] =
                        sampler.sample(pos.x - u_mid * dt, pos.y - v_mid * dt, Field::Density);
                }
            });

        std::mem::swap(&mut grid.density, &mut self.density_next);
    }
}
