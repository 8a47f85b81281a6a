//! Staggered (MAC) grid state
//!
//! The grid has `nc` interior cells per axis surrounded by a one-cell ring of
//! ghost/wall cells, so `nx = ny = nc + 2`. Velocities live on cell faces and
//! density on cell centres:
//!
//! ```text
//! u[y][x]       at (x·h,       (y+0.5)·h)   left face of cell (x, y)
//! v[y][x]       at ((x+0.5)·h, y·h)         top face of cell (x, y)
//! density[y][x] at ((x+0.5)·h, (y+0.5)·h)   cell centre
//! ```
//!
//! Rows grow downwards: `y + 1` is the cell below `y`.

use super::fields::{Field, FieldData};
use crate::core_types::Vec2;

/// Solid-mask value of a fluid cell
pub const FLUID: u8 = 1;
/// Solid-mask value of a wall or obstacle cell
pub const SOLID: u8 = 0;

/// All field buffers and the solid mask of the simulation.
///
/// Allocated once with fixed dimensions; never resized.
#[derive(Debug, Clone)]
pub struct GridState {
    nx: usize,
    ny: usize,
    h: f32,
    pub(crate) u: FieldData<f32>,
    pub(crate) v: FieldData<f32>,
    pub(crate) density: FieldData<f32>,
    pub(crate) solid: FieldData<u8>,
}

impl GridState {
    /// Side length `cell_count + 2` of the full grid, if its buffers are addressable
    #[must_use]
    pub fn checked_side(cell_count: usize) -> Option<usize> {
        let side = cell_count.checked_add(2)?;
        side.checked_mul(side).map(|_| side)
    }

    /// Allocate a grid with `cell_count` interior cells per axis and cell size `h`
    ///
    /// The grid is returned already initialized (see [`GridState::initialize`]).
    ///
    /// # Panics
    ///
    /// Panics if the grid size overflows `usize` (see [`GridState::checked_side`]).
    /// `Simulation` construction rejects such counts with an error instead.
    #[must_use]
    pub fn new(cell_count: usize, h: f32) -> Self {
        let Some(side) = Self::checked_side(cell_count) else {
            panic!("Grid dimensions overflow: cell_count={cell_count}");
        };
        let nx = side;
        let ny = side;
        let mut grid = Self {
            nx,
            ny,
            h,
            u: FieldData::new(nx, ny),
            v: FieldData::new(nx, ny),
            density: FieldData::new(nx, ny),
            solid: FieldData::new(nx, ny),
        };
        grid.initialize();
        grid
    }

    /// Reset all fields to zero and rebuild the wall ring of the solid mask
    ///
    /// Left, top and bottom ring cells are solid; the right column is left
    /// open as the outflow.
    pub fn initialize(&mut self) {
        self.u.fill(0.0);
        self.v.fill(0.0);
        self.density.fill(0.0);

        for y in 0..self.ny {
            for x in 0..self.nx {
                let wall = x == 0 || y == 0 || y == self.ny - 1;
                self.solid.set(x, y, if wall { SOLID } else { FLUID });
            }
        }
    }

    /// Grid width including the ghost ring
    #[inline]
    #[must_use]
    pub fn nx(&self) -> usize {
        self.nx
    }

    /// Grid height including the ghost ring
    #[inline]
    #[must_use]
    pub fn ny(&self) -> usize {
        self.ny
    }

    /// Interior resolution per axis
    #[must_use]
    pub fn cell_count(&self) -> usize {
        self.nx - 2
    }

    /// Cell spacing h
    #[inline]
    #[must_use]
    pub fn cell_size(&self) -> f32 {
        self.h
    }

    /// Buffer backing a sampled field
    #[inline]
    #[must_use]
    pub fn field(&self, field: Field) -> &FieldData<f32> {
        match field {
            Field::U => &self.u,
            Field::V => &self.v,
            Field::Density => &self.density,
        }
    }

    /// Horizontal velocity buffer
    #[must_use]
    pub fn u(&self) -> &FieldData<f32> {
        &self.u
    }

    /// Vertical velocity buffer
    #[must_use]
    pub fn v(&self) -> &FieldData<f32> {
        &self.v
    }

    /// Density buffer
    #[must_use]
    pub fn density(&self) -> &FieldData<f32> {
        &self.density
    }

    /// Solid mask (1 = fluid, 0 = solid)
    #[must_use]
    pub fn solid(&self) -> &FieldData<u8> {
        &self.solid
    }

    /// True if cell `(x, y)` is fluid
    #[inline]
    #[must_use]
    pub fn is_fluid(&self, x: usize, y: usize) -> bool {
        self.solid.get(x, y) == FLUID
    }

    /// Openness flag of cell `(x, y)` as a float weight (1.0 fluid, 0.0 solid)
    #[inline]
    #[must_use]
    pub fn openness(&self, x: usize, y: usize) -> f32 {
        f32::from(self.solid.get(x, y))
    }

    /// Simulation-space position of the lattice point `(x, y)` of `field`
    #[must_use]
    pub fn lattice_position(&self, field: Field, x: usize, y: usize) -> Vec2 {
        let (dx, dy) = field.offset(self.h);
        Vec2::new(x as f32 * self.h + dx, y as f32 * self.h + dy)
    }

    /// Simulation-space position of the centre of cell `(x, y)`
    #[inline]
    #[must_use]
    pub fn cell_center(&self, x: usize, y: usize) -> Vec2 {
        self.lattice_position(Field::Density, x, y)
    }
}
