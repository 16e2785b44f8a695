//! Sparse presence map from grid coordinates to cells
//!
//! The grid is the single source of truth for both temperature and structure:
//! a coordinate without a key is a broken-out hole, there is no separate
//! tombstone or hole mask.

use crate::core_types::{Cell, GridCoord, Material};
use rustc_hash::{FxBuildHasher, FxHashMap};
use std::fmt;

/// Errors raised by grid mutation and lookup
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GridError {
    /// Read of a cell that is not present
    NotPresent(GridCoord),
    /// Insert over a cell that already exists
    AlreadyPresent(GridCoord),
    /// Insert outside `[0, grid_size)²`
    OutOfBounds(GridCoord),
}

impl fmt::Display for GridError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GridError::NotPresent(c) => write!(f, "No cell present at {c}"),
            GridError::AlreadyPresent(c) => write!(f, "Cell already present at {c}"),
            GridError::OutOfBounds(c) => write!(f, "Coordinate {c} is outside the grid"),
        }
    }
}

impl std::error::Error for GridError {}

/// Aggregate figures over all present cells
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct GridStats {
    /// Number of present cells
    pub present_cells: usize,
    /// Sum of temperatures over present cells
    pub total_temperature: f32,
    /// Highest temperature of any present cell (0 when empty)
    pub max_temperature: f32,
}

/// Bounded sparse grid of cells
#[derive(Debug, Clone)]
pub struct SparseGrid {
    cells: FxHashMap<GridCoord, Cell>,
    size: i32,
}

impl SparseGrid {
    /// Create an empty grid of `size × size` addressable coordinates
    #[must_use]
    pub fn empty(size: i32) -> Self {
        Self {
            cells: FxHashMap::default(),
            size,
        }
    }

    /// Create a grid with every coordinate present at temperature 0, material `Low`
    #[must_use]
    pub fn filled(size: i32) -> Self {
        let capacity = (size.max(0) as usize).pow(2);
        let mut cells = FxHashMap::with_capacity_and_hasher(capacity, FxBuildHasher);
        for ix in 0..size {
            for iy in 0..size {
                cells.insert(GridCoord::new(ix, iy), Cell::new(0.0, Material::Low));
            }
        }
        Self { cells, size }
    }

    /// Number of coordinates along each axis
    pub fn size(&self) -> i32 {
        self.size
    }

    /// Number of present cells
    pub fn len(&self) -> usize {
        self.cells.len()
    }

    /// Whether every cell has been broken out
    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    /// Presence test
    #[inline]
    pub fn has(&self, coord: GridCoord) -> bool {
        self.cells.contains_key(&coord)
    }

    /// Read a present cell
    ///
    /// # Errors
    /// Returns [`GridError::NotPresent`] if the cell is absent
    pub fn get(&self, coord: GridCoord) -> Result<Cell, GridError> {
        self.cells
            .get(&coord)
            .copied()
            .ok_or(GridError::NotPresent(coord))
    }

    /// Temperature of a present cell, `None` when absent
    #[inline]
    pub fn temperature(&self, coord: GridCoord) -> Option<f32> {
        self.cells.get(&coord).map(|cell| cell.temperature)
    }

    /// Replace the temperature of a present cell, keeping its material
    ///
    /// No-op when the cell is absent.
    #[inline]
    pub fn set_temperature(&mut self, coord: GridCoord, value: f32) {
        if let Some(cell) = self.cells.get_mut(&coord) {
            cell.temperature = value;
        }
    }

    /// Create a new cell
    ///
    /// # Errors
    /// Returns [`GridError::OutOfBounds`] outside the grid and
    /// [`GridError::AlreadyPresent`] if a cell exists at `coord`
    pub fn insert(
        &mut self,
        coord: GridCoord,
        temperature: f32,
        material: Material,
    ) -> Result<(), GridError> {
        if !coord.in_bounds(self.size) {
            return Err(GridError::OutOfBounds(coord));
        }
        if self.has(coord) {
            return Err(GridError::AlreadyPresent(coord));
        }
        self.cells.insert(coord, Cell::new(temperature, material));
        Ok(())
    }

    /// Delete a cell and all its state; no-op when absent
    pub fn remove(&mut self, coord: GridCoord) {
        self.cells.remove(&coord);
    }

    /// Iterate present cells in unspecified order
    pub fn iter(&self) -> impl Iterator<Item = (GridCoord, &Cell)> + '_ {
        self.cells.iter().map(|(coord, cell)| (*coord, cell))
    }

    /// Present coordinates in row-major order (`ix` outer, `iy` inner)
    pub fn coords_row_major(&self) -> impl Iterator<Item = GridCoord> + '_ {
        let size = self.size;
        (0..size)
            .flat_map(move |ix| (0..size).map(move |iy| GridCoord::new(ix, iy)))
            .filter(|coord| self.has(*coord))
    }

    /// Summary statistics over present cells
    pub fn stats(&self) -> GridStats {
        self.cells.values().fold(
            GridStats {
                present_cells: self.cells.len(),
                ..GridStats::default()
            },
            |mut acc, cell| {
                acc.total_temperature += cell.temperature;
                acc.max_temperature = acc.max_temperature.max(cell.temperature);
                acc
            },
        )
    }

    pub(crate) fn cells(&self) -> &FxHashMap<GridCoord, Cell> {
        &self.cells
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_filled_grid_is_complete() {
        let grid = SparseGrid::filled(10);
        assert_eq!(grid.len(), 100);
        for (_, cell) in grid.iter() {
            assert_eq!(cell.temperature(), 0.0);
            assert_eq!(cell.material(), Material::Low);
        }
    }

    #[test]
    fn test_get_absent_is_not_present() {
        let grid = SparseGrid::empty(4);
        let coord = GridCoord::new(1, 1);
        assert_eq!(grid.get(coord), Err(GridError::NotPresent(coord)));
    }

    #[test]
    fn test_insert_rejects_duplicates_and_out_of_bounds() {
        let mut grid = SparseGrid::empty(4);
        let coord = GridCoord::new(2, 3);
        assert_eq!(grid.insert(coord, 5.0, Material::High), Ok(()));
        assert_eq!(
            grid.insert(coord, 0.0, Material::Low),
            Err(GridError::AlreadyPresent(coord))
        );
        // Existing cell is untouched by the failed insert
        assert_eq!(grid.get(coord), Ok(Cell::new(5.0, Material::High)));

        let outside = GridCoord::new(4, 0);
        assert_eq!(
            grid.insert(outside, 0.0, Material::Low),
            Err(GridError::OutOfBounds(outside))
        );
        assert!(!grid.has(outside));
    }

    #[test]
    fn test_set_temperature_preserves_material_and_skips_absent() {
        let mut grid = SparseGrid::empty(4);
        let here = GridCoord::new(0, 0);
        grid.insert(here, 0.0, Material::High).unwrap();
        grid.set_temperature(here, 42.0);
        assert_eq!(grid.get(here), Ok(Cell::new(42.0, Material::High)));

        let absent = GridCoord::new(1, 0);
        grid.set_temperature(absent, 42.0);
        assert!(!grid.has(absent));
    }

    #[test]
    fn test_remove_is_permanent_and_idempotent() {
        let mut grid = SparseGrid::filled(3);
        let coord = GridCoord::new(1, 1);
        grid.set_temperature(coord, 9.0);
        grid.remove(coord);
        grid.remove(coord);
        assert!(!grid.has(coord));
        assert_eq!(grid.len(), 8);

        // Recreated cells start fresh
        grid.insert(coord, 0.0, Material::Low).unwrap();
        assert_eq!(grid.temperature(coord), Some(0.0));
    }

    #[test]
    fn test_row_major_order_skips_holes() {
        let mut grid = SparseGrid::filled(2);
        grid.remove(GridCoord::new(0, 1));
        let order: Vec<_> = grid.coords_row_major().collect();
        assert_eq!(
            order,
            vec![
                GridCoord::new(0, 0),
                GridCoord::new(1, 0),
                GridCoord::new(1, 1),
            ]
        );
    }

    #[test]
    fn test_stats() {
        let mut grid = SparseGrid::filled(2);
        grid.set_temperature(GridCoord::new(0, 0), 3.0);
        grid.set_temperature(GridCoord::new(1, 1), 5.0);
        let stats = grid.stats();
        assert_eq!(stats.present_cells, 4);
        assert_eq!(stats.total_temperature, 8.0);
        assert_eq!(stats.max_temperature, 5.0);
    }
}
