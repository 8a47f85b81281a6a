//! Grid data: field buffers, solid mask and obstacles

pub mod fields;
pub mod obstacle;
pub mod state;

// Re-export main types
pub use fields::{Field, FieldData};
pub use obstacle::Obstacle;
pub use state::{GridState, FLUID, SOLID};
