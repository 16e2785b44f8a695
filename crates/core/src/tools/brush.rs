//! Heat and material brushes

use crate::core_types::{GridCoord, Material};
use crate::grid::SparseGrid;
use serde::{Deserialize, Serialize};
use tracing::trace;

/// Radially decaying heat source/sink
///
/// Every offset `(dx, dy)` in `[-r, r)²` around the centre receives
/// `±strength / (1 + dx² + dy²)`, clamped so the result is never negative.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct HeatBrush {
    /// Temperature shift at the centre cell
    pub strength: f32,
    /// Half-width of the square footprint
    pub radius: i32,
}

impl Default for HeatBrush {
    fn default() -> Self {
        Self {
            strength: 60.0,
            radius: 3,
        }
    }
}

impl HeatBrush {
    /// Shift applied at offset `(dx, dy)` when heating
    #[must_use]
    pub fn falloff(&self, dx: i32, dy: i32) -> f32 {
        self.strength / (1 + dx * dx + dy * dy) as f32
    }

    /// Heat (or cool) around `center`
    ///
    /// Absent cells are skipped. Returns the number of cells touched.
    pub fn apply(&self, grid: &mut SparseGrid, center: GridCoord, heating: bool) -> usize {
        let sign = if heating { 1.0 } else { -1.0 };
        let mut touched = 0;

        for dx in -self.radius..self.radius {
            for dy in -self.radius..self.radius {
                let coord = center.offset(dx, dy);
                if let Some(t) = grid.temperature(coord) {
                    let shift = sign * self.falloff(dx, dy);
                    grid.set_temperature(coord, (t + shift).max(0.0));
                    touched += 1;
                }
            }
        }

        trace!(
            "Heat brush at {} (heating={}) touched {} cells",
            center,
            heating,
            touched
        );
        touched
    }
}

/// Disk-shaped build/break brush
///
/// Covers offsets in `[-r, r)²` with `dx² + dy² < r²`. Breaking removes present
/// cells, building creates absent ones at temperature 0. An existing cell's
/// material is never changed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct MaterialBrush {
    /// Disk radius in cells
    pub radius: i32,
}

impl Default for MaterialBrush {
    fn default() -> Self {
        Self { radius: 4 }
    }
}

impl MaterialBrush {
    /// Build or break around `center`
    ///
    /// Returns the number of cells created or removed.
    pub fn apply(
        &self,
        grid: &mut SparseGrid,
        center: GridCoord,
        building: bool,
        material: Material,
    ) -> usize {
        let r = self.radius;
        let mut changed = 0;

        for dx in -r..r {
            for dy in -r..r {
                let coord = center.offset(dx, dy);
                if dx * dx + dy * dy >= r * r || !coord.in_bounds(grid.size()) {
                    continue;
                }

                if building {
                    if !grid.has(coord) && grid.insert(coord, 0.0, material).is_ok() {
                        changed += 1;
                    }
                } else if grid.has(coord) {
                    grid.remove(coord);
                    changed += 1;
                }
            }
        }

        trace!(
            "Material brush at {} (building={}, {}) changed {} cells",
            center,
            building,
            material,
            changed
        );
        changed
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_heat_brush_inverse_square_falloff() {
        let mut grid = SparseGrid::filled(20);
        let touched = HeatBrush::default().apply(&mut grid, GridCoord::new(10, 10), true);
        assert_eq!(touched, 36);

        assert_eq!(grid.temperature(GridCoord::new(10, 10)), Some(60.0));
        assert_eq!(grid.temperature(GridCoord::new(11, 10)), Some(30.0));
        assert_eq!(grid.temperature(GridCoord::new(9, 9)), Some(20.0));
        // Footprint is [-3, 3): +3 is outside, -3 is inside
        assert_eq!(grid.temperature(GridCoord::new(13, 10)), Some(0.0));
        assert_eq!(grid.temperature(GridCoord::new(7, 10)), Some(6.0));
    }

    #[test]
    fn test_cooling_clamps_at_zero() {
        let mut grid = SparseGrid::filled(20);
        let center = GridCoord::new(10, 10);
        grid.set_temperature(center, 15.0);
        HeatBrush::default().apply(&mut grid, center, false);
        assert_eq!(grid.temperature(center), Some(0.0));
        for (_, cell) in grid.iter() {
            assert!(cell.temperature() >= 0.0);
        }
    }

    #[test]
    fn test_heat_brush_skips_holes_and_edges() {
        let mut grid = SparseGrid::filled(5);
        grid.remove(GridCoord::new(1, 0));
        HeatBrush::default().apply(&mut grid, GridCoord::new(0, 0), true);
        assert!(!grid.has(GridCoord::new(1, 0)));
        assert!(!grid.has(GridCoord::new(-1, 0)));
        assert_eq!(grid.temperature(GridCoord::new(0, 0)), Some(60.0));
    }

    #[test]
    fn test_break_removes_disk() {
        let mut grid = SparseGrid::filled(20);
        let removed =
            MaterialBrush::default().apply(&mut grid, GridCoord::new(10, 10), false, Material::Low);
        assert!(removed > 0);
        assert_eq!(grid.len(), 400 - removed);
        assert!(!grid.has(GridCoord::new(10, 10)));
        assert!(!grid.has(GridCoord::new(7, 8)));
        // dx = -4, dy = 0 lies on the circle, not inside it
        assert!(grid.has(GridCoord::new(6, 10)));
        // Upper bound of the offset range is exclusive
        assert!(grid.has(GridCoord::new(14, 10)));
    }

    #[test]
    fn test_build_creates_cold_cells_with_selected_material() {
        let mut grid = SparseGrid::empty(20);
        let center = GridCoord::new(0, 0);
        let built = MaterialBrush::default().apply(&mut grid, center, true, Material::High);
        assert_eq!(built, grid.len());
        for (coord, cell) in grid.iter() {
            assert!(coord.in_bounds(20));
            assert_eq!(cell.temperature(), 0.0);
            assert_eq!(cell.material(), Material::High);
        }
    }

    #[test]
    fn test_build_never_changes_existing_material() {
        let mut grid = SparseGrid::filled(10);
        let center = GridCoord::new(5, 5);
        grid.set_temperature(center, 12.0);
        let built = MaterialBrush::default().apply(&mut grid, center, true, Material::High);
        assert_eq!(built, 0);
        assert_eq!(grid.get(center).map(|c| c.material()), Ok(Material::Low));
        assert_eq!(grid.temperature(center), Some(12.0));
    }
}
