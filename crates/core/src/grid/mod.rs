//! Sparse cell storage

pub mod sparse_grid;

// Re-export main types
pub use sparse_grid::*;
