//! Read-only access for renderers and other consumers

use super::TickDiagnostics;
use crate::grid::{Field, GridState, Obstacle};
use crate::solver::FieldSampler;

/// Borrowed, read-only view of a simulation's fields and obstacles.
///
/// Out-of-range reads return `None` instead of panicking.
#[derive(Debug, Clone, Copy)]
pub struct GridView<'a> {
    grid: &'a GridState,
    obstacles: &'a [Obstacle],
    diagnostics: Option<TickDiagnostics>,
}

impl<'a> GridView<'a> {
    pub(crate) fn new(
        grid: &'a GridState,
        obstacles: &'a [Obstacle],
        diagnostics: Option<TickDiagnostics>,
    ) -> Self {
        Self {
            grid,
            obstacles,
            diagnostics,
        }
    }

    /// Grid dimensions `(nx, ny)` including the ghost ring
    #[must_use]
    pub fn dimensions(&self) -> (usize, usize) {
        (self.grid.nx(), self.grid.ny())
    }

    /// Cell spacing h
    #[must_use]
    pub fn cell_size(&self) -> f32 {
        self.grid.cell_size()
    }

    /// Horizontal velocity at face `(x, y)`
    #[must_use]
    pub fn u(&self, x: usize, y: usize) -> Option<f32> {
        self.grid.u().try_get(x, y)
    }

    /// Vertical velocity at face `(x, y)`
    #[must_use]
    pub fn v(&self, x: usize, y: usize) -> Option<f32> {
        self.grid.v().try_get(x, y)
    }

    /// Smoke density of cell `(x, y)`
    #[must_use]
    pub fn density(&self, x: usize, y: usize) -> Option<f32> {
        self.grid.density().try_get(x, y)
    }

    /// Raw solid-mask value of cell `(x, y)` (1 = fluid, 0 = solid)
    #[must_use]
    pub fn solid_mask(&self, x: usize, y: usize) -> Option<u8> {
        self.grid.solid().try_get(x, y)
    }

    /// True if cell `(x, y)` is a wall or obstacle cell
    #[must_use]
    pub fn is_solid(&self, x: usize, y: usize) -> Option<bool> {
        self.solid_mask(x, y).map(|s| s == crate::grid::SOLID)
    }

    /// Bilinear sample of `field` at a simulation-space position
    #[must_use]
    pub fn sample(&self, x: f32, y: f32, field: Field) -> f32 {
        FieldSampler::new(self.grid).sample(x, y, field)
    }

    /// Whole buffer of `field` in row-major order
    #[must_use]
    pub fn field_slice(&self, field: Field) -> &'a [f32] {
        self.grid.field(field).as_slice()
    }

    /// Obstacles of the borrowed simulation
    #[must_use]
    pub fn obstacles(&self) -> &'a [Obstacle] {
        self.obstacles
    }

    /// Diagnostics of the most recent tick, if any
    #[must_use]
    pub fn last_diagnostics(&self) -> Option<TickDiagnostics> {
        self.diagnostics
    }
}
