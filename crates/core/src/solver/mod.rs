//! Heat diffusion solver
//!
//! [`DiffusionStepper`] advances the temperature of every present cell with an
//! explicit five-point scheme. Holes and grid edges are handled by
//! [`BoundarySampler`], which extrapolates from the nearest present axis
//! neighbour instead of imposing a fixed boundary temperature.
//!
//! # Example
//!
//! ```rust
//! use heat_sim_core::solver::{DiffusionStepper, SweepMode};
//! use heat_sim_core::{GridCoord, SparseGrid};
//!
//! let mut grid = SparseGrid::filled(4);
//! grid.set_temperature(GridCoord::new(1, 1), 100.0);
//!
//! let stepper = DiffusionStepper::new(6.0, None, SweepMode::DoubleBuffered);
//! stepper.step(&mut grid, 3);
//! assert!(grid.temperature(GridCoord::new(2, 1)).unwrap() > 0.0);
//! ```

mod diffusion;
mod sampler;

// Re-exports
pub use diffusion::{DiffusionStepper, SweepMode};
pub use sampler::{BoundarySampler, DEFAULT_BOUNDARY_DECAY};
