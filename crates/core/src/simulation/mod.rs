//! Simulation orchestrator
//!
//! [`Simulation`] owns the grid, the obstacle list and the solver stages, and
//! sequences them once per [`Simulation::tick`]:
//!
//! ```text
//! boundary conditions -> pressure projection -> velocity advection -> density advection
//! ```
//!
//! The only mutation surface besides `tick` is obstacle placement
//! ([`Simulation::add_obstacle`], [`Simulation::drag_obstacle`]). Obstacle
//! changes are picked up by the boundary pass of the next tick.

mod config;
mod error;
mod view;

pub use config::SimulationConfig;
pub use error::SimulationError;
pub use view::GridView;

use crate::core_types::Vec2;
use crate::grid::{GridState, Obstacle};
use crate::solver::{
    total_divergence, Advector, BoundaryConditions, PressureProjector, ProfilerScope,
};
use tracing::{debug, info, warn};

/// Per-tick divergence report
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TickDiagnostics {
    /// Total absolute divergence after the boundary pass, before projection
    pub divergence_before: Option<f32>,
    /// Total absolute divergence right after projection
    pub divergence_after: Option<f32>,
    /// Interior cells covered by obstacles this tick
    pub obstacle_cells: usize,
    /// Divergence exceeded the configured threshold or was not finite
    pub unstable: bool,
}

impl TickDiagnostics {
    /// True if the tick showed signs of numerical blow-up
    #[must_use]
    pub fn is_unstable(&self) -> bool {
        self.unstable
    }
}

/// 2D stable-fluids smoke simulation on a fixed staggered grid.
///
/// Not reentrant: obstacle edits must happen between ticks.
#[derive(Debug, Clone)]
pub struct Simulation {
    config: SimulationConfig,
    grid: GridState,
    obstacles: Vec<Obstacle>,
    boundary: BoundaryConditions,
    projector: PressureProjector,
    advector: Advector,
    last_diagnostics: Option<TickDiagnostics>,
    tick_count: u64,
    elapsed_time: f64,
}

impl Simulation {
    /// Create a simulation without obstacles
    ///
    /// # Errors
    ///
    /// Returns an error if the grid configuration is invalid.
    pub fn new(config: SimulationConfig) -> Result<Self, SimulationError> {
        Self::with_obstacles(config, Vec::new())
    }

    /// Create a simulation with an initial set of obstacles
    ///
    /// The grid is initialized and one boundary pass is applied, so inflow and
    /// obstacle cells are visible before the first tick.
    ///
    /// # Errors
    ///
    /// Returns an error if the grid configuration is invalid.
    pub fn with_obstacles(
        config: SimulationConfig,
        obstacles: Vec<Obstacle>,
    ) -> Result<Self, SimulationError> {
        config.validate()?;

        let grid = GridState::new(config.cell_count, config.cell_size());
        let advector = Advector::for_grid(&grid);

        info!(
            "Smoke simulation initialized: {}x{} grid, h={:.4}, {} pressure iterations, omega={}",
            grid.nx(),
            grid.ny(),
            grid.cell_size(),
            config.pressure_iterations,
            config.over_relaxation
        );

        let mut sim = Self {
            boundary: config.boundary_conditions(),
            projector: config.pressure_projector(),
            config,
            grid,
            obstacles,
            advector,
            last_diagnostics: None,
            tick_count: 0,
            elapsed_time: 0.0,
        };
        sim.boundary.apply(&mut sim.grid, &sim.obstacles);
        Ok(sim)
    }

    /// Advance the simulation by one fixed timestep
    pub fn tick(&mut self) -> TickDiagnostics {
        let dt = self.config.time_step;

        let obstacle_cells = {
            let _scope = ProfilerScope::new("boundary");
            self.boundary.apply(&mut self.grid, &self.obstacles)
        };

        let divergence_before = self.measure_divergence();
        {
            let _scope = ProfilerScope::new("projection");
            self.projector.project(&mut self.grid);
        }
        let divergence_after = self.measure_divergence();

        {
            let _scope = ProfilerScope::new("advect_velocity");
            self.advector.advect_velocity(&mut self.grid, dt);
        }
        {
            let _scope = ProfilerScope::new("advect_smoke");
            self.advector.advect_smoke(&mut self.grid, dt);
        }

        let threshold = self.config.divergence_warning_threshold;
        let unstable = [divergence_before, divergence_after]
            .into_iter()
            .flatten()
            .any(|d| !d.is_finite() || d > threshold);

        if unstable {
            warn!(
                "Divergence above {} at tick {}: before={:?}, after={:?}; consider a smaller time step",
                threshold, self.tick_count, divergence_before, divergence_after
            );
        }

        debug!(
            "Tick {}: t={:.4}, obstacle cells={}, divergence before={:?} after={:?}",
            self.tick_count, self.elapsed_time, obstacle_cells, divergence_before, divergence_after
        );

        let diagnostics = TickDiagnostics {
            divergence_before,
            divergence_after,
            obstacle_cells,
            unstable,
        };

        self.tick_count += 1;
        self.elapsed_time += f64::from(dt);
        self.last_diagnostics = Some(diagnostics);
        diagnostics
    }

    /// Move every obstacle containing `point` by `displacement`
    ///
    /// The solid mask is updated on the next tick. Returns the number of
    /// obstacles moved.
    pub fn drag_obstacle(&mut self, point: Vec2, displacement: Vec2) -> usize {
        let mut moved = 0;
        for obstacle in &mut self.obstacles {
            if obstacle.contains(point) {
                obstacle.translate(displacement);
                moved += 1;
            }
        }

        if moved > 0 {
            debug!(
                "Dragged {} obstacle(s) from ({:.3}, {:.3}) by ({:.3}, {:.3})",
                moved, point.x, point.y, displacement.x, displacement.y
            );
        }
        moved
    }

    /// Append an obstacle; it is rasterized on the next tick
    pub fn add_obstacle(&mut self, obstacle: Obstacle) {
        self.obstacles.push(obstacle);
    }

    /// Change the Gauss-Seidel sweep count used by subsequent ticks
    pub fn set_pressure_iterations(&mut self, iterations: usize) {
        self.config.pressure_iterations = iterations;
        self.projector.iterations = iterations;
    }

    /// Clear all fields back to the initial state, keeping obstacles
    pub fn reset(&mut self) {
        self.grid.initialize();
        self.boundary.apply(&mut self.grid, &self.obstacles);
        self.last_diagnostics = None;
        self.tick_count = 0;
        self.elapsed_time = 0.0;
        info!("Smoke simulation reset");
    }

    /// Read-only view for rendering
    #[must_use]
    pub fn view(&self) -> GridView<'_> {
        GridView::new(&self.grid, &self.obstacles, self.last_diagnostics)
    }

    /// Underlying grid state
    #[must_use]
    pub fn grid(&self) -> &GridState {
        &self.grid
    }

    /// Current obstacles
    #[must_use]
    pub fn obstacles(&self) -> &[Obstacle] {
        &self.obstacles
    }

    /// Active configuration
    #[must_use]
    pub fn config(&self) -> &SimulationConfig {
        &self.config
    }

    /// Diagnostics of the most recent tick
    #[must_use]
    pub fn last_diagnostics(&self) -> Option<TickDiagnostics> {
        self.last_diagnostics
    }

    /// Number of ticks since construction or the last reset
    #[must_use]
    pub fn tick_count(&self) -> u64 {
        self.tick_count
    }

    /// Simulated time since construction or the last reset
    #[must_use]
    pub fn elapsed_time(&self) -> f64 {
        self.elapsed_time
    }

    fn measure_divergence(&self) -> Option<f32> {
        self.config
            .track_divergence
            .then(|| total_divergence(&self.grid))
    }
}
