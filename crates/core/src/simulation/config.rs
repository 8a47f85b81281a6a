//! Simulation configuration

use super::error::SimulationError;
use crate::grid::GridState;
use crate::solver::{BoundaryConditions, PressureProjector};
use serde::{Deserialize, Serialize};

/// Configuration for a [`Simulation`](super::Simulation)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SimulationConfig {
    /// Interior resolution per axis; the grid is `cell_count + 2` cells wide and tall
    pub cell_count: usize,

    /// Edge length of the square domain in simulation units
    pub domain_size: f32,

    /// Fixed timestep advanced by each tick
    pub time_step: f32,

    /// Horizontal inflow speed forced on the first interior column
    pub in_velocity: f32,

    /// Width of the injected smoke band as a fraction of `cell_count`
    pub relative_stream_width: f32,

    /// Gauss-Seidel sweeps per tick
    /// More sweeps give a less divergent field at linear extra cost.
    pub pressure_iterations: usize,

    /// Over-relaxation factor ω for the pressure solve
    /// 1.0 is plain Gauss-Seidel; values up to ~1.9 converge faster.
    pub over_relaxation: f32,

    /// Total absolute divergence above which a tick is reported as unstable
    pub divergence_warning_threshold: f32,

    /// Compute divergence before/after projection on every tick
    pub track_divergence: bool,
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self {
            cell_count: 10,
            domain_size: 1.0,
            time_step: 1.0 / 60.0,
            in_velocity: 1.0,
            relative_stream_width: 0.2,
            pressure_iterations: 120,
            over_relaxation: 1.9,
            divergence_warning_threshold: 1000.0,
            track_divergence: true,
        }
    }
}

impl SimulationConfig {
    /// Cell spacing h = `domain_size / cell_count`
    #[must_use]
    pub fn cell_size(&self) -> f32 {
        self.domain_size / self.cell_count as f32
    }

    /// Check the grid parameters
    ///
    /// # Errors
    ///
    /// Returns [`SimulationError::InvalidGridDimensions`] for a zero or unaddressable cell count and
    /// [`SimulationError::InvalidDomainSize`] for a non-positive or non-finite domain.
    pub fn validate(&self) -> Result<(), SimulationError> {
        if self.cell_count == 0 || GridState::checked_side(self.cell_count).is_none() {
            return Err(SimulationError::InvalidGridDimensions {
                cell_count: self.cell_count,
            });
        }
        if !self.domain_size.is_finite() || self.domain_size <= 0.0 {
            return Err(SimulationError::InvalidDomainSize {
                domain_size: self.domain_size,
            });
        }
        Ok(())
    }

    pub(crate) fn boundary_conditions(&self) -> BoundaryConditions {
        BoundaryConditions::new(self.in_velocity, self.relative_stream_width)
    }

    pub(crate) fn pressure_projector(&self) -> PressureProjector {
        PressureProjector::new(self.pressure_iterations, self.over_relaxation)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = SimulationConfig::default();
        assert_eq!(config.cell_count, 10);
        assert_eq!(config.pressure_iterations, 120);
        assert_eq!(config.over_relaxation, 1.9);
        assert_eq!(config.cell_size(), 0.1);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_zero_cells_rejected() {
        let config = SimulationConfig {
            cell_count: 0,
            ..Default::default()
        };
        assert_eq!(
            config.validate(),
            Err(SimulationError::InvalidGridDimensions { cell_count: 0 })
        );
    }

    #[test]
    fn test_overflowing_cells_rejected() {
        let config = SimulationConfig {
            cell_count: usize::MAX,
            ..Default::default()
        };
        assert_eq!(
            config.validate(),
            Err(SimulationError::InvalidGridDimensions {
                cell_count: usize::MAX
            })
        );
    }

    #[test]
    fn test_bad_domain_rejected() {
        for domain_size in [0.0, -1.0, f32::NAN, f32::INFINITY] {
            let config = SimulationConfig {
                domain_size,
                ..Default::default()
            };
            assert!(
                matches!(
                    config.validate(),
                    Err(SimulationError::InvalidDomainSize { .. })
                ),
                "domain_size={domain_size}"
            );
        }
    }

    #[test]
    fn test_stage_construction() {
        let config = SimulationConfig {
            in_velocity: 2.0,
            pressure_iterations: 40,
            ..Default::default()
        };
        assert_eq!(config.boundary_conditions().in_velocity, 2.0);
        assert_eq!(config.pressure_projector().iterations, 40);
    }
}
