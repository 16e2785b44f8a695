//! Explicit finite-difference heat diffusion
//!
//! Each sweep advances every present cell by
//! ```text
//! T' = T + (∂²T/∂x² + ∂²T/∂y²) · (1 + 9·m)
//! ```
//! where the second derivatives use the five-point stencil
//! `(f(x - h) - 2f(x) + f(x + h)) / h²` and `m` is the material multiplier
//! (0 for low conductivity, 1 for high).
//!
//! Two sweep disciplines are available, see [`SweepMode`].

use super::sampler::BoundarySampler;
use crate::core_types::{Cell, GridCoord};
use crate::grid::SparseGrid;
use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use tracing::trace;

/// How new temperatures are committed during a sweep
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum SweepMode {
    /// Read every old value, then write every new value at the end of the sweep.
    ///
    /// A true simultaneous explicit step. Cells are computed in parallel.
    #[default]
    DoubleBuffered,
    /// Visit cells row-major (`ix` outer, `iy` inner) and write each result
    /// immediately.
    ///
    /// Cells visited later see already-updated neighbours (Gauss-Seidel-like
    /// coupling), which biases the direction of diffusion.
    InPlace,
}

/// Advances the temperature field by explicit sub-steps
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DiffusionStepper {
    cell_size: f32,
    boundary_decay: Option<f32>,
    mode: SweepMode,
}

impl DiffusionStepper {
    /// Create a stepper
    ///
    /// # Arguments
    ///
    /// * `cell_size` - Grid spacing `h`
    /// * `boundary_decay` - Attenuation for extrapolated hole values, `None` to disable
    /// * `mode` - Sweep discipline
    #[must_use]
    pub fn new(cell_size: f32, boundary_decay: Option<f32>, mode: SweepMode) -> Self {
        Self {
            cell_size,
            boundary_decay,
            mode,
        }
    }

    /// Grid spacing `h`
    pub fn cell_size(&self) -> f32 {
        self.cell_size
    }

    /// Sweep discipline in use
    pub fn mode(&self) -> SweepMode {
        self.mode
    }

    /// Discrete Laplacian `ddx + ddy` at a present cell, `None` if `coord` is absent
    pub fn laplacian_at(&self, grid: &SparseGrid, coord: GridCoord) -> Option<f32> {
        let here = grid.temperature(coord)?;
        let sampler = BoundarySampler::new(grid, self.boundary_decay);
        Some(self.laplacian(&sampler, coord, here))
    }

    /// Run `substeps` full sweeps
    pub fn step(&self, grid: &mut SparseGrid, substeps: u32) {
        for _ in 0..substeps {
            self.sweep(grid);
        }
    }

    /// Run a single sweep over all present cells
    pub fn sweep(&self, grid: &mut SparseGrid) {
        match self.mode {
            SweepMode::DoubleBuffered => self.sweep_double_buffered(grid),
            SweepMode::InPlace => self.sweep_in_place(grid),
        }
    }

    fn sweep_double_buffered(&self, grid: &mut SparseGrid) {
        let updates: Vec<(GridCoord, f32)> = {
            let sampler = BoundarySampler::new(grid, self.boundary_decay);
            grid.cells()
                .par_iter()
                .map(|(&coord, cell)| (coord, self.advance(&sampler, coord, cell)))
                .collect()
        };

        trace!("Committing {} buffered temperature updates", updates.len());
        for (coord, temperature) in updates {
            grid.set_temperature(coord, temperature);
        }
    }

    fn sweep_in_place(&self, grid: &mut SparseGrid) {
        let order: Vec<GridCoord> = grid.coords_row_major().collect();
        for coord in order {
            let Ok(cell) = grid.get(coord) else {
                continue;
            };
            let next = {
                let sampler = BoundarySampler::new(grid, self.boundary_decay);
                self.advance(&sampler, coord, &cell)
            };
            grid.set_temperature(coord, next);
        }
    }

    #[inline]
    fn advance(&self, sampler: &BoundarySampler<'_>, coord: GridCoord, cell: &Cell) -> f32 {
        let laplacian = self.laplacian(sampler, coord, cell.temperature);
        cell.temperature + laplacian * cell.material.diffusion_rate()
    }

    #[inline]
    fn laplacian(&self, sampler: &BoundarySampler<'_>, coord: GridCoord, here: f32) -> f32 {
        // The stencil centre is present, so every axis neighbour can at least
        // extrapolate from it; the fallback is never taken.
        let at = |dx: i32, dy: i32| sampler.sample(coord.offset(dx, dy)).unwrap_or(here);
        let h_sq = self.cell_size * self.cell_size;

        let ddx = (at(-1, 0) - 2.0 * here + at(1, 0)) / h_sq;
        let ddy = (at(0, -1) - 2.0 * here + at(0, 1)) / h_sq;
        ddx + ddy
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core_types::Material;
    use approx::assert_relative_eq;

    fn hot_center(size: i32, mode: SweepMode) -> (SparseGrid, DiffusionStepper) {
        let mut grid = SparseGrid::filled(size);
        grid.set_temperature(GridCoord::new(size / 2, size / 2), 100.0);
        (grid, DiffusionStepper::new(6.0, None, mode))
    }

    #[test]
    fn test_uniform_field_is_steady() {
        let mut grid = SparseGrid::filled(6);
        for coord in grid.coords_row_major().collect::<Vec<_>>() {
            grid.set_temperature(coord, 25.0);
        }
        let stepper = DiffusionStepper::new(1.0, None, SweepMode::DoubleBuffered);
        stepper.step(&mut grid, 5);
        for (_, cell) in grid.iter() {
            assert_relative_eq!(cell.temperature(), 25.0);
        }
    }

    #[test]
    fn test_hot_spot_spreads_to_axis_neighbors() {
        let (mut grid, stepper) = hot_center(9, SweepMode::DoubleBuffered);
        stepper.sweep(&mut grid);

        let center = GridCoord::new(4, 4);
        let expected_gain = 100.0 / 36.0;
        assert_relative_eq!(
            grid.temperature(center).unwrap(),
            100.0 - 4.0 * expected_gain,
            epsilon = 1e-4
        );
        for n in center.axis_neighbors() {
            assert_relative_eq!(grid.temperature(n).unwrap(), expected_gain, epsilon = 1e-5);
        }
        assert_eq!(grid.temperature(GridCoord::new(5, 5)), Some(0.0));
    }

    #[test]
    fn test_in_place_sweep_is_order_dependent() {
        let (mut buffered, buffered_stepper) = hot_center(9, SweepMode::DoubleBuffered);
        let (mut in_place, in_place_stepper) = hot_center(9, SweepMode::InPlace);
        buffered_stepper.sweep(&mut buffered);
        in_place_stepper.sweep(&mut in_place);

        // (5,4) is visited after the centre and sees its reduced temperature,
        // (3,4) is visited before it and sees the full 100
        let before = in_place.temperature(GridCoord::new(3, 4)).unwrap();
        let after = in_place.temperature(GridCoord::new(5, 4)).unwrap();
        assert!(after < before, "in-place sweep should bias toward earlier cells");

        let sym_a = buffered.temperature(GridCoord::new(3, 4)).unwrap();
        let sym_b = buffered.temperature(GridCoord::new(5, 4)).unwrap();
        assert_eq!(sym_a, sym_b);
    }

    #[test]
    fn test_in_place_sweep_visits_columns_outer() {
        // (0,0) is a hole; (0,1) reads it through (1,0), which a column-outer
        // sweep has not yet touched when it reaches (0,1)
        let mut grid = SparseGrid::filled(3);
        grid.remove(GridCoord::new(0, 0));
        grid.set_temperature(GridCoord::new(1, 0), 16.0);
        let stepper = DiffusionStepper::new(2.0, None, SweepMode::InPlace);
        assert_eq!(stepper.mode(), SweepMode::InPlace);
        stepper.sweep(&mut grid);

        let expected = [
            ((1, 0), 8.0),
            ((2, 0), 2.0),
            ((0, 1), 4.0),
            ((1, 1), 3.0),
            ((2, 1), 1.25),
            ((0, 2), 1.0),
            ((1, 2), 1.0),
            ((2, 2), 0.5625),
        ];
        for ((ix, iy), t) in expected {
            assert_eq!(grid.temperature(GridCoord::new(ix, iy)), Some(t), "at ({ix},{iy})");
        }
    }

    #[test]
    fn test_high_conductivity_scales_change_tenfold() {
        let center = GridCoord::new(1, 1);
        let run = |material: Material| {
            let mut grid = SparseGrid::filled(3);
            grid.remove(center);
            grid.insert(center, 0.0, material).unwrap();
            grid.set_temperature(GridCoord::new(2, 1), 1.0);
            let stepper = DiffusionStepper::new(1.0, None, SweepMode::DoubleBuffered);
            stepper.sweep(&mut grid);
            grid.temperature(center).unwrap()
        };
        let low = run(Material::Low);
        let high = run(Material::High);
        assert_relative_eq!(low, 1.0);
        assert_relative_eq!(high, 10.0 * low);
    }

    #[test]
    fn test_laplacian_at_absent_cell_is_none() {
        let mut grid = SparseGrid::filled(3);
        grid.remove(GridCoord::new(1, 1));
        let stepper = DiffusionStepper::new(1.0, None, SweepMode::InPlace);
        assert_eq!(stepper.laplacian_at(&grid, GridCoord::new(1, 1)), None);
    }

    #[test]
    fn test_zero_substeps_is_noop() {
        let (mut grid, stepper) = hot_center(5, SweepMode::DoubleBuffered);
        stepper.step(&mut grid, 0);
        assert_eq!(grid.temperature(GridCoord::new(2, 2)), Some(100.0));
    }
}
