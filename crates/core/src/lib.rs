//! Heat Simulation Core Library
//!
//! Interactive 2-D heat diffusion on a bounded plate of cells. Each cell is
//! either broken out (absent) or present with a temperature and one of two
//! conductivity classes. Every frame the user may heat, cool, build or break
//! around the pointer, then the explicit heat equation is advanced a few
//! sub-steps and the plate is drawn as a colour map.
//!
//! ## Layout
//!
//! - [`core_types`]: coordinates, cells and materials
//! - [`grid`]: the sparse presence map that owns all cell state
//! - [`solver`]: boundary extrapolation and the finite-difference stepper
//! - [`tools`]: heat and material brushes plus the UI toggle state
//! - [`render`]: pixel mapping and cell colours for front-ends
//! - [`simulation`]: configuration and the per-frame driver

// Core types and utilities
pub mod core_types;

pub mod grid;
pub mod render;
pub mod simulation;
pub mod solver;
pub mod tools;

// Re-export core types
pub use core_types::{Cell, GridCoord, Material};

pub use grid::{GridError, GridStats, SparseGrid};
pub use render::{CellColor, CellRect, RenderCell, ScreenMapping};
pub use simulation::{ConfigError, HeatSimulation, PointerButton, PointerInput, SimulationConfig};
pub use solver::{BoundarySampler, DiffusionStepper, SweepMode};
pub use tools::{HeatBrush, MaterialBrush, ToolState};
