//! Vector type alias for 2D simulation-space points and displacements.

use nalgebra::Vector2;

/// 2D vector type for positions and displacements in simulation space.
///
/// This is a simple alias for `nalgebra::Vector2<f32>`, used for obstacle
/// centres, drag points and drag displacements.
pub type Vec2 = Vector2<f32>;
