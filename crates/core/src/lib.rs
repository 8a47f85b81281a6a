//! Smoke Simulation Core Library
//!
//! A 2D incompressible-flow solver in the "stable fluids" style on a fixed
//! staggered (MAC) grid. Velocity and smoke density are advanced one fixed
//! timestep per tick, with circular obstacles that can be dragged between ticks.
//!
//! ## Tick pipeline
//!
//! - Boundary pass: inflow smoke band, inflow velocity, obstacle rasterization
//! - Pressure projection: Gauss-Seidel relaxation with over-relaxation
//! - Semi-Lagrangian advection of velocity, then of density
//!
//! Rendering and input handling are left to the caller, which reads the fields
//! through [`GridView`].
//!
//! ## Example
//!
//! ```rust
//! use smoke_sim_core::{Obstacle, Simulation, SimulationConfig, Vec2};
//!
//! let config = SimulationConfig::default();
//! let mut sim = Simulation::with_obstacles(
//!     config,
//!     vec![Obstacle::default_for_domain(1.0)],
//! )
//! .expect("valid configuration");
//!
//! let diagnostics = sim.tick();
//! assert!(!diagnostics.is_unstable());
//!
//! sim.drag_obstacle(Vec2::new(0.5, 0.5), Vec2::new(0.1, 0.0));
//! sim.tick();
//! ```

// Core types and utilities
pub mod core_types;

// Field buffers, solid mask and obstacles
pub mod grid;

// Solver stages
pub mod solver;

// Orchestration
pub mod simulation;

// Re-export core types
pub use core_types::Vec2;
pub use grid::{Field, FieldData, GridState, Obstacle};
pub use simulation::{GridView, Simulation, SimulationConfig, SimulationError, TickDiagnostics};
pub use solver::{Advector, BoundaryConditions, FieldSampler, PressureProjector};
