//! Grid cell data model
//!
//! A cell is one addressable location on the plate. It either exists (with a
//! temperature and a conductivity class) or it has been broken out, in which
//! case it is simply absent from the grid.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Integer grid coordinate `(ix, iy)`
///
/// Signed so that pointer-derived coordinates left of or above the grid can be
/// represented and rejected by a bounds check instead of wrapping.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct GridCoord {
    /// Column index
    pub ix: i32,
    /// Row index
    pub iy: i32,
}

impl GridCoord {
    /// Create a coordinate from column and row indices
    #[must_use]
    pub const fn new(ix: i32, iy: i32) -> Self {
        Self { ix, iy }
    }

    /// Coordinate shifted by `(dx, dy)`, saturating at the `i32` range
    #[must_use]
    pub const fn offset(self, dx: i32, dy: i32) -> Self {
        Self {
            ix: self.ix.saturating_add(dx),
            iy: self.iy.saturating_add(dy),
        }
    }

    /// Whether this coordinate lies inside `[0, grid_size)²`
    #[must_use]
    pub const fn in_bounds(self, grid_size: i32) -> bool {
        self.ix >= 0 && self.ix < grid_size && self.iy >= 0 && self.iy < grid_size
    }

    /// The four axis neighbours in lookup order: +x, -x, +y, -y
    #[must_use]
    pub const fn axis_neighbors(self) -> [Self; 4] {
        [
            self.offset(1, 0),
            self.offset(-1, 0),
            self.offset(0, 1),
            self.offset(0, -1),
        ]
    }
}

impl From<(i32, i32)> for GridCoord {
    fn from((ix, iy): (i32, i32)) -> Self {
        Self::new(ix, iy)
    }
}

impl fmt::Display for GridCoord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.ix, self.iy)
    }
}

/// Thermal conductivity class of a cell
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum Material {
    /// Low conductivity, diffusion rate 1x
    #[default]
    Low,
    /// High conductivity, diffusion rate 10x
    High,
}

impl Material {
    /// Material multiplier: 0 for `Low`, 1 for `High`
    #[must_use]
    pub const fn multiplier(self) -> f32 {
        match self {
            Self::Low => 0.0,
            Self::High => 1.0,
        }
    }

    /// Diffusion rate scale `1 + multiplier * 9`
    #[must_use]
    pub fn diffusion_rate(self) -> f32 {
        1.0 + self.multiplier() * 9.0
    }

    /// The other conductivity class
    #[must_use]
    pub const fn toggled(self) -> Self {
        match self {
            Self::Low => Self::High,
            Self::High => Self::Low,
        }
    }
}

impl fmt::Display for Material {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Low => write!(f, "low conductivity"),
            Self::High => write!(f, "high conductivity"),
        }
    }
}

/// State of a present cell
///
/// Material is fixed for the lifetime of the cell; only temperature changes.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Cell {
    pub(crate) temperature: f32,
    pub(crate) material: Material,
}

impl Cell {
    /// Create a cell with the given temperature and material
    #[must_use]
    pub const fn new(temperature: f32, material: Material) -> Self {
        Self {
            temperature,
            material,
        }
    }

    /// Current temperature
    #[must_use]
    pub const fn temperature(&self) -> f32 {
        self.temperature
    }

    /// Conductivity class
    #[must_use]
    pub const fn material(&self) -> Material {
        self.material
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_diffusion_rates() {
        assert_eq!(Material::Low.diffusion_rate(), 1.0);
        assert_eq!(Material::High.diffusion_rate(), 10.0);
    }

    #[test]
    fn test_axis_neighbor_lookup_order() {
        let c = GridCoord::new(5, 5);
        assert_eq!(
            c.axis_neighbors(),
            [
                GridCoord::new(6, 5),
                GridCoord::new(4, 5),
                GridCoord::new(5, 6),
                GridCoord::new(5, 4),
            ]
        );
    }

    #[test]
    fn test_bounds() {
        assert!(GridCoord::new(0, 0).in_bounds(4));
        assert!(GridCoord::new(3, 3).in_bounds(4));
        assert!(!GridCoord::new(4, 0).in_bounds(4));
        assert!(!GridCoord::new(0, -1).in_bounds(4));
    }

    #[test]
    fn test_material_toggle() {
        assert_eq!(Material::Low.toggled(), Material::High);
        assert_eq!(Material::High.toggled().toggled(), Material::High);
    }
}
