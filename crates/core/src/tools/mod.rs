//! Interactive editing tools
//!
//! Pointer-driven edits applied to the grid once per frame while a button is
//! held: a heat brush on the primary button and a material brush on the
//! secondary button. Which way each brush acts is decided by [`ToolState`].

mod brush;

pub use brush::{HeatBrush, MaterialBrush};

use crate::core_types::Material;
use serde::{Deserialize, Serialize};

/// Persistent toggle state owned by the UI layer
///
/// The simulation only reads these fields; flipping them is up to the caller.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ToolState {
    /// Secondary button builds material when `true`, breaks it when `false`
    pub building: bool,
    /// Primary button heats when `true`, cools when `false`
    pub heating: bool,
    /// Material used for newly built cells
    pub material: Material,
}

impl Default for ToolState {
    fn default() -> Self {
        Self {
            building: false,
            heating: true,
            material: Material::Low,
        }
    }
}

impl ToolState {
    /// Switch between building and breaking
    pub fn toggle_building(&mut self) {
        self.building = !self.building;
    }

    /// Switch between heating and cooling
    pub fn toggle_heating(&mut self) {
        self.heating = !self.heating;
    }

    /// Switch the material used for building
    pub fn toggle_material(&mut self) {
        self.material = self.material.toggled();
    }
}
