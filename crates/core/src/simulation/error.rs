//! Simulation construction errors

/// Fatal configuration errors raised when building a simulation
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum SimulationError {
    /// The interior resolution must be at least one cell
    InvalidGridDimensions {
        /// Rejected cell count
        cell_count: usize,
    },
    /// The domain edge length must be finite and positive
    InvalidDomainSize {
        /// Rejected domain size
        domain_size: f32,
    },
}

impl std::fmt::Display for SimulationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SimulationError::InvalidGridDimensions { cell_count } => {
                write!(f, "Invalid grid dimensions: cell_count={cell_count}")
            }
            SimulationError::InvalidDomainSize { domain_size } => {
                write!(f, "Invalid domain size: {domain_size}")
            }
        }
    }
}

impl std::error::Error for SimulationError {}
