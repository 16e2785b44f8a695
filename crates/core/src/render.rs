//! Screen-space view of the grid
//!
//! Maps pointer pixels to grid coordinates and present cells to coloured
//! rectangles. Drawing itself is left to the front-end.

use crate::core_types::{Cell, GridCoord};
use crate::grid::SparseGrid;
use nalgebra::Point2;
use serde::{Deserialize, Serialize};

/// Placement of the grid on screen
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ScreenMapping {
    /// Pixel position of the top-left corner of cell `(0, 0)`
    pub origin: Point2<f32>,
    /// Side length of one cell in pixels
    pub cell_size: f32,
}

impl ScreenMapping {
    /// Create a mapping from an origin and a cell size
    #[must_use]
    pub fn new(origin: Point2<f32>, cell_size: f32) -> Self {
        Self { origin, cell_size }
    }

    /// Grid coordinate under a pixel position
    ///
    /// The result may lie outside the grid; callers bounds-check.
    #[must_use]
    pub fn pixel_to_grid(&self, pixel: Point2<f32>) -> GridCoord {
        let local = (pixel - self.origin) / self.cell_size;
        GridCoord::new(local.x.floor() as i32, local.y.floor() as i32)
    }

    /// Screen rectangle covered by a cell
    #[must_use]
    pub fn cell_rect(&self, coord: GridCoord) -> CellRect {
        CellRect {
            x: self.origin.x + coord.ix as f32 * self.cell_size,
            y: self.origin.y + coord.iy as f32 * self.cell_size,
            size: self.cell_size,
        }
    }
}

/// Axis-aligned square in pixels
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CellRect {
    /// Left edge
    pub x: f32,
    /// Top edge
    pub y: f32,
    /// Width and height
    pub size: f32,
}

/// 8-bit RGB colour
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct CellColor {
    /// Red channel
    pub r: u8,
    /// Green channel
    pub g: u8,
    /// Blue channel
    pub b: u8,
}

impl CellColor {
    /// Colour of a cell: hot cells glow red-to-white, low conductivity cells
    /// carry a blue tint
    ///
    /// Channels are saturated to `[0, 255]` here; the model itself is unclamped.
    #[must_use]
    pub fn for_cell(cell: &Cell) -> Self {
        let t = cell.temperature();
        let tint = 100.0 * (1.0 - cell.material().multiplier());
        Self {
            r: saturate(t * 30.0),
            g: saturate(t * 0.3 * 30.0),
            b: saturate(t * 0.1 * 30.0 + tint),
        }
    }
}

#[inline]
fn saturate(channel: f32) -> u8 {
    channel.clamp(0.0, 255.0) as u8
}

/// One present cell ready to draw
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RenderCell {
    /// Grid coordinate
    pub coord: GridCoord,
    /// Raw cell state
    pub cell: Cell,
    /// Screen rectangle
    pub rect: CellRect,
    /// Fill colour
    pub color: CellColor,
}

/// Present cells in row-major order with their screen placement and colour
pub fn render_cells(grid: &SparseGrid, mapping: &ScreenMapping) -> Vec<RenderCell> {
    grid.coords_row_major()
        .filter_map(|coord| {
            let cell = grid.get(coord).ok()?;
            Some(RenderCell {
                coord,
                cell,
                rect: mapping.cell_rect(coord),
                color: CellColor::for_cell(&cell),
            })
        })
        .collect()
}
