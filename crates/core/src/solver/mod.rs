//! Numerical stages of the stable-fluids tick
//!
//! Each tick runs, in this order:
//!
//! 1. [`BoundaryConditions`] - reassert inflow and rasterize obstacles
//! 2. [`PressureProjector`] - relax the velocity field towards zero divergence
//! 3. [`Advector::advect_velocity`] - self-advect the velocity field
//! 4. [`Advector::advect_smoke`] - carry density along the new velocity
//!
//! Stages share no state besides the [`GridState`](crate::grid::GridState)
//! they mutate; [`FieldSampler`] is the read-only interpolation used by advection.

pub mod advection;
pub mod boundary;
pub mod pressure;
pub mod profiler;
pub mod sampler;

// Re-exports
pub use advection::Advector;
pub use boundary::{BoundaryConditions, INFLOW_DENSITY};
pub use pressure::{cell_divergence, total_divergence, PressureProjector};
pub use profiler::ProfilerScope;
pub use sampler::FieldSampler;
