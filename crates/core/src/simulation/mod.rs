//! Frame-synchronous heat simulation
//!
//! One frame is: apply pointer edits, run `speed` diffusion sweeps, then let
//! the front-end read the grid to draw. Everything runs on the caller's thread
//! except the double-buffered sweep, which fans out over rayon and joins before
//! the next sub-step starts.

mod config;

pub use config::{ConfigError, SimulationConfig, MAX_BRUSH_RADIUS, MAX_GRID_SIZE};

use crate::core_types::{GridCoord, Material};
use crate::grid::{GridStats, SparseGrid};
use crate::render::{render_cells, RenderCell, ScreenMapping};
use crate::solver::DiffusionStepper;
use crate::tools::ToolState;
use nalgebra::Point2;
use tracing::{debug, info};

/// Which pointer button is held during a frame
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PointerButton {
    /// Nothing held
    #[default]
    None,
    /// Heat/cool
    Primary,
    /// Build/break
    Secondary,
}

/// Pointer state sampled once per frame
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PointerInput {
    /// Pointer position in pixels
    pub position: Point2<f32>,
    /// Button currently held
    pub button: PointerButton,
}

impl PointerInput {
    /// Pointer at `position` with nothing pressed
    #[must_use]
    pub fn idle(position: Point2<f32>) -> Self {
        Self {
            position,
            button: PointerButton::None,
        }
    }
}

/// Interactive 2-D heat diffusion simulation
pub struct HeatSimulation {
    grid: SparseGrid,
    config: SimulationConfig,
    stepper: DiffusionStepper,
    mapping: ScreenMapping,
    tools: ToolState,
    frame: u64,
}

impl HeatSimulation {
    /// Create a simulation with every cell present, cold and low conductivity
    ///
    /// # Errors
    /// Returns [`ConfigError::Invalid`] if the configuration fails validation
    pub fn new(config: SimulationConfig) -> Result<Self, ConfigError> {
        config.validate()?;

        let grid = SparseGrid::filled(config.grid_size);
        let stepper =
            DiffusionStepper::new(config.cell_size(), config.boundary_decay, config.sweep_mode);
        let mapping = config.screen_mapping();

        info!(
            "Heat simulation initialized: {}x{} grid, h={:.3}, speed={}, sweep={:?}, decay={:?}",
            config.grid_size,
            config.grid_size,
            config.cell_size(),
            config.speed,
            config.sweep_mode,
            config.boundary_decay
        );

        Ok(Self {
            grid,
            config,
            stepper,
            mapping,
            tools: ToolState::default(),
            frame: 0,
        })
    }

    /// Restore the initial grid, keeping configuration and tool toggles
    pub fn reset(&mut self) {
        info!("Resetting heat simulation after {} frames", self.frame);
        self.grid = SparseGrid::filled(self.config.grid_size);
        self.frame = 0;
    }

    /// Advance one frame: pointer edits, then `speed` diffusion sweeps
    pub fn frame(&mut self, pointer: &PointerInput) {
        self.apply_pointer(pointer);
        self.step_diffusion();
        self.frame += 1;

        debug!(
            "Frame {}: button={:?}, substeps={}, present_cells={}",
            self.frame,
            pointer.button,
            self.config.speed,
            self.grid.len()
        );
    }

    /// Apply the edit for whichever button is held
    pub fn apply_pointer(&mut self, pointer: &PointerInput) {
        let center = self.mapping.pixel_to_grid(pointer.position);
        match pointer.button {
            PointerButton::None => {}
            PointerButton::Primary => self.heat_at(center),
            PointerButton::Secondary => self.edit_material_at(center),
        }
    }

    /// Heat or cool around a grid coordinate according to the tool state
    pub fn heat_at(&mut self, center: GridCoord) {
        self.config
            .heat_brush
            .apply(&mut self.grid, center, self.tools.heating);
    }

    /// Build or break around a grid coordinate according to the tool state
    pub fn edit_material_at(&mut self, center: GridCoord) {
        self.config.material_brush.apply(
            &mut self.grid,
            center,
            self.tools.building,
            self.tools.material,
        );
    }

    /// Run the configured number of diffusion sub-steps
    pub fn step_diffusion(&mut self) {
        self.stepper.step(&mut self.grid, self.config.speed);
    }

    /// Present cells with screen placement and colour
    pub fn render_cells(&self) -> Vec<RenderCell> {
        render_cells(&self.grid, &self.mapping)
    }

    /// Read-only grid
    pub fn grid(&self) -> &SparseGrid {
        &self.grid
    }

    /// Mutable grid, for scripted scenarios
    pub fn grid_mut(&mut self) -> &mut SparseGrid {
        &mut self.grid
    }

    /// Tool toggles
    pub fn tools(&self) -> &ToolState {
        &self.tools
    }

    /// Mutable tool toggles
    pub fn tools_mut(&mut self) -> &mut ToolState {
        &mut self.tools
    }

    /// Active configuration
    pub fn config(&self) -> &SimulationConfig {
        &self.config
    }

    /// Pixel mapping of the grid
    pub fn screen_mapping(&self) -> &ScreenMapping {
        &self.mapping
    }

    /// Selected build material
    pub fn selected_material(&self) -> Material {
        self.tools.material
    }

    /// Summary of present cells
    pub fn stats(&self) -> GridStats {
        self.grid.stats()
    }

    /// Frames completed since creation or reset
    pub fn frame_count(&self) -> u64 {
        self.frame
    }
}
