//! Simulation configuration
//!
//! All tunable constants of the simulation in one serde-friendly struct.
//! Configurations can be stored as JSON; missing fields take their defaults.

use crate::render::ScreenMapping;
use crate::solver::{SweepMode, DEFAULT_BOUNDARY_DECAY};
use crate::tools::{HeatBrush, MaterialBrush};
use nalgebra::Point2;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// Largest accepted `grid_size`; a filled grid holds `grid_size²` cells
pub const MAX_GRID_SIZE: i32 = 4096;

/// Largest accepted brush radius
pub const MAX_BRUSH_RADIUS: i32 = 1024;

/// Configuration constants for a heat simulation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SimulationConfig {
    /// Number of cells along each axis
    pub grid_size: i32,
    /// Side length of the simulated plate in pixels
    pub viewport_size: f32,
    /// On-screen offset of the grid's top-left corner
    pub origin: Point2<f32>,
    /// Diffusion sub-steps per frame
    pub speed: u32,
    /// Sweep discipline
    pub sweep_mode: SweepMode,
    /// Attenuation for extrapolated hole values, `None` copies them unchanged
    pub boundary_decay: Option<f32>,
    /// Primary-button brush
    pub heat_brush: HeatBrush,
    /// Secondary-button brush
    pub material_brush: MaterialBrush,
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self {
            grid_size: 100,
            viewport_size: 600.0,
            origin: Point2::new(100.0, 100.0),
            speed: 3,
            sweep_mode: SweepMode::DoubleBuffered,
            boundary_decay: Some(DEFAULT_BOUNDARY_DECAY),
            heat_brush: HeatBrush::default(),
            material_brush: MaterialBrush::default(),
        }
    }
}

impl SimulationConfig {
    /// Grid spacing `h = viewport_size / grid_size`
    pub fn cell_size(&self) -> f32 {
        self.viewport_size / self.grid_size as f32
    }

    /// Pixel mapping for this grid
    pub fn screen_mapping(&self) -> ScreenMapping {
        ScreenMapping::new(self.origin, self.cell_size())
    }

    /// Check that all values are usable
    ///
    /// # Errors
    /// Returns [`ConfigError::Invalid`] naming the first offending field
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(1..=MAX_GRID_SIZE).contains(&self.grid_size) {
            return Err(ConfigError::Invalid(format!(
                "grid_size must be in 1..={MAX_GRID_SIZE}, got {}",
                self.grid_size
            )));
        }
        if !(self.viewport_size.is_finite() && self.viewport_size > 0.0) {
            return Err(ConfigError::Invalid(format!(
                "viewport_size must be positive, got {}",
                self.viewport_size
            )));
        }
        if let Some(decay) = self.boundary_decay {
            if !(decay > 0.0 && decay <= 1.0) {
                return Err(ConfigError::Invalid(format!(
                    "boundary_decay must be in (0, 1], got {decay}"
                )));
            }
        }
        for radius in [self.heat_brush.radius, self.material_brush.radius] {
            if !(0..=MAX_BRUSH_RADIUS).contains(&radius) {
                return Err(ConfigError::Invalid(format!(
                    "brush radius must be in 0..={MAX_BRUSH_RADIUS}, got {radius}"
                )));
            }
        }
        if !self.heat_brush.strength.is_finite() {
            return Err(ConfigError::Invalid(
                "heat brush strength must be finite".to_string(),
            ));
        }
        Ok(())
    }

    /// Load a configuration from a JSON file
    ///
    /// # Errors
    /// Returns error if the file cannot be read, parsed, or fails validation
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let contents =
            fs::read_to_string(path).map_err(|e| ConfigError::LoadFailed(e.to_string()))?;

        let config: Self = serde_json::from_str(&contents)
            .map_err(|e| ConfigError::ParseFailed(e.to_string()))?;

        config.validate()?;
        Ok(config)
    }

    /// Save the configuration as pretty-printed JSON
    ///
    /// # Errors
    /// Returns error if the configuration cannot be serialized or written
    pub fn save<P: AsRef<Path>>(&self, path: P) -> Result<(), ConfigError> {
        let contents = serde_json::to_string_pretty(self)
            .map_err(|e| ConfigError::SerializeFailed(e.to_string()))?;

        fs::write(path, contents).map_err(|e| ConfigError::SaveFailed(e.to_string()))?;

        Ok(())
    }
}

/// Configuration errors
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    /// Failed to read file
    LoadFailed(String),
    /// Failed to parse file contents
    ParseFailed(String),
    /// Failed to serialize configuration
    SerializeFailed(String),
    /// Failed to write file
    SaveFailed(String),
    /// A value is out of range
    Invalid(String),
}

impl std::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ConfigError::LoadFailed(msg) => write!(f, "Failed to load: {msg}"),
            ConfigError::ParseFailed(msg) => write!(f, "Failed to parse: {msg}"),
            ConfigError::SerializeFailed(msg) => write!(f, "Failed to serialize: {msg}"),
            ConfigError::SaveFailed(msg) => write!(f, "Failed to save: {msg}"),
            ConfigError::Invalid(msg) => write!(f, "Invalid configuration: {msg}"),
        }
    }
}

impl std::error::Error for ConfigError {}
