//! Boundary temperature extrapolation
//!
//! The five-point stencil needs a value at every axis neighbour of a present
//! cell, including neighbours that were broken out or lie past the grid edge.
//! Those holes read the temperature of their nearest present axis neighbour,
//! optionally attenuated toward zero.

use crate::core_types::GridCoord;
use crate::grid::SparseGrid;

/// Attenuation applied to extrapolated boundary values by default
pub const DEFAULT_BOUNDARY_DECAY: f32 = 0.992;

/// Resolves a temperature for any coordinate within one step of a present cell
#[derive(Debug, Clone, Copy)]
pub struct BoundarySampler<'a> {
    grid: &'a SparseGrid,
    decay: Option<f32>,
}

impl<'a> BoundarySampler<'a> {
    /// Create a sampler over `grid`
    ///
    /// `decay` scales values read through a neighbour; `None` copies them as-is.
    #[must_use]
    pub fn new(grid: &'a SparseGrid, decay: Option<f32>) -> Self {
        Self { grid, decay }
    }

    /// Temperature at `coord`
    ///
    /// Order: the cell itself, then +x, -x, +y, -y. Diagonals are never read.
    /// Returns `None` only when neither the cell nor any axis neighbour exists.
    #[inline]
    pub fn sample(&self, coord: GridCoord) -> Option<f32> {
        if let Some(t) = self.grid.temperature(coord) {
            return Some(t);
        }
        let factor = self.decay.unwrap_or(1.0);
        coord
            .axis_neighbors()
            .into_iter()
            .find_map(|n| self.grid.temperature(n))
            .map(|t| t * factor)
    }
}
