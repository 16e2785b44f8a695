//! Interactive Heat Diffusion Demo
//!
//! A terminal front-end for the heat simulation. The plate is drawn as a colour
//! map, each cell two columns wide, and the mouse drives the brushes.
//!
//! # Usage
//!
//! ```bash
//! cargo run --package demo-interactive -- [config.json]
//! ```
//!
//! # Controls
//!
//! - Left drag - heat (or cool) under the pointer
//! - Right drag - break (or build) material under the pointer
//! - Toolbar buttons or `h` / `b` / `m` - toggle heat/cool, build/break, material
//! - `space` - pause diffusion (edits still apply)
//! - `r` - reset the plate
//! - `q` / `Esc` - quit
//!
//! Set `HEAT_DEMO_LOG=<path>` to write tracing output to a file; `RUST_LOG`
//! filters it as usual.

use heat_sim_core::{
    HeatSimulation, Material, PointerButton, PointerInput, RenderCell, SimulationConfig,
    ToolState,
};
use nalgebra::Point2;
use ratatui::{
    buffer::Buffer,
    crossterm::{
        event::{
            self, DisableMouseCapture, EnableMouseCapture, Event, KeyCode, KeyEventKind,
            MouseButton, MouseEvent, MouseEventKind,
        },
        execute,
    },
    layout::{Constraint, Direction, Layout, Position, Rect},
    style::{Color, Style},
    text::Line,
    widgets::{Block, Borders, Paragraph, Widget},
    DefaultTerminal, Frame,
};
use std::{
    io,
    sync::Mutex,
    time::{Duration, Instant},
};
use tracing::info;
use tracing_subscriber::EnvFilter;

/// Target frame interval (~30 fps)
const FRAME_INTERVAL: Duration = Duration::from_millis(33);

/// Default plate for a terminal: 48x48 cells, same cell spacing as the desktop layout
const DEFAULT_GRID_SIZE: i32 = 48;

fn main() -> io::Result<()> {
    init_logging()?;

    let config = match std::env::args().nth(1) {
        Some(path) => SimulationConfig::load(&path).map_err(io::Error::other)?,
        None => SimulationConfig {
            grid_size: DEFAULT_GRID_SIZE,
            viewport_size: 6.0 * DEFAULT_GRID_SIZE as f32,
            ..SimulationConfig::default()
        },
    };
    let sim = HeatSimulation::new(config).map_err(io::Error::other)?;

    let mut terminal = ratatui::try_init()?;
    execute!(io::stdout(), EnableMouseCapture)?;

    let result = App::new(sim).run(&mut terminal);

    execute!(io::stdout(), DisableMouseCapture)?;
    ratatui::restore();
    result
}

fn init_logging() -> io::Result<()> {
    let Some(path) = std::env::var_os("HEAT_DEMO_LOG") else {
        return Ok(());
    };
    let file = std::fs::File::create(path)?;
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .init();
    Ok(())
}

/// Toolbar actions, one per toggle
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ToolButton {
    HeatOrCool,
    BuildOrBreak,
    Conductivity,
}

impl ToolButton {
    const ALL: [ToolButton; 3] = [
        ToolButton::HeatOrCool,
        ToolButton::BuildOrBreak,
        ToolButton::Conductivity,
    ];

    fn label(self) -> &'static str {
        match self {
            ToolButton::HeatOrCool => "Heat or Cool",
            ToolButton::BuildOrBreak => "Build or Break",
            ToolButton::Conductivity => "High or Low Conductivity",
        }
    }

    fn is_on(self, tools: &ToolState) -> bool {
        match self {
            ToolButton::HeatOrCool => tools.heating,
            ToolButton::BuildOrBreak => tools.building,
            ToolButton::Conductivity => tools.material == Material::High,
        }
    }

    fn press(self, tools: &mut ToolState) {
        match self {
            ToolButton::HeatOrCool => tools.toggle_heating(),
            ToolButton::BuildOrBreak => tools.toggle_building(),
            ToolButton::Conductivity => tools.toggle_material(),
        }
    }

    fn color(self, tools: &ToolState) -> Color {
        if self.is_on(tools) {
            Color::Rgb(150, 255, 200)
        } else {
            Color::Rgb(255, 150, 200)
        }
    }
}

struct App {
    sim: HeatSimulation,
    pointer: PointerInput,
    paused: bool,
    quit: bool,
    plate_area: Rect,
    buttons: Vec<(ToolButton, Rect)>,
}

impl App {
    fn new(sim: HeatSimulation) -> Self {
        Self {
            sim,
            pointer: PointerInput::idle(Point2::origin()),
            paused: false,
            quit: false,
            plate_area: Rect::default(),
            buttons: Vec::new(),
        }
    }

    fn run(&mut self, terminal: &mut DefaultTerminal) -> io::Result<()> {
        info!("Interactive demo started");
        let mut last_frame = Instant::now();

        while !self.quit {
            terminal.draw(|frame| self.draw(frame))?;

            let timeout = FRAME_INTERVAL.saturating_sub(last_frame.elapsed());
            if event::poll(timeout)? {
                self.handle_event(event::read()?);
            }

            if last_frame.elapsed() >= FRAME_INTERVAL {
                if self.paused {
                    self.sim.apply_pointer(&self.pointer);
                } else {
                    self.sim.frame(&self.pointer);
                }
                last_frame = Instant::now();
            }
        }

        info!("Interactive demo finished after {} frames", self.sim.frame_count());
        Ok(())
    }

    fn handle_event(&mut self, event: Event) {
        match event {
            Event::Key(key) if key.kind == KeyEventKind::Press => match key.code {
                KeyCode::Char('q') | KeyCode::Esc => self.quit = true,
                KeyCode::Char('h') => self.sim.tools_mut().toggle_heating(),
                KeyCode::Char('b') => self.sim.tools_mut().toggle_building(),
                KeyCode::Char('m') => self.sim.tools_mut().toggle_material(),
                KeyCode::Char(' ') => self.paused = !self.paused,
                KeyCode::Char('r') => self.sim.reset(),
                _ => {}
            },
            Event::Mouse(mouse) => self.handle_mouse(mouse),
            _ => {}
        }
    }

    fn handle_mouse(&mut self, mouse: MouseEvent) {
        let position = self.terminal_to_pixel(mouse.column, mouse.row);
        match mouse.kind {
            MouseEventKind::Down(button) | MouseEventKind::Drag(button) => {
                // Presses over the toolbar or status line never reach the brushes
                let on_plate = self
                    .plate_area
                    .contains(Position::new(mouse.column, mouse.row));
                let button = match button {
                    MouseButton::Left if on_plate => PointerButton::Primary,
                    MouseButton::Right if on_plate => PointerButton::Secondary,
                    _ => PointerButton::None,
                };
                self.pointer = PointerInput { position, button };
            }
            MouseEventKind::Up(_) => {
                self.pointer = PointerInput::idle(position);
                let at = Position::new(mouse.column, mouse.row);
                if let Some((button, _)) = self.buttons.iter().find(|(_, rect)| rect.contains(at)) {
                    button.press(self.sim.tools_mut());
                }
            }
            MouseEventKind::Moved => self.pointer.position = position,
            _ => {}
        }
    }

    /// Terminal cell to simulation pixel space, aiming at the cell centre
    fn terminal_to_pixel(&self, column: u16, row: u16) -> Point2<f32> {
        let mapping = self.sim.screen_mapping();
        let column_width = mapping.cell_size / 2.0;
        let rel_col = i32::from(column) - i32::from(self.plate_area.x);
        let rel_row = i32::from(row) - i32::from(self.plate_area.y);
        Point2::new(
            mapping.origin.x + (rel_col as f32 + 0.5) * column_width,
            mapping.origin.y + (rel_row as f32 + 0.5) * mapping.cell_size,
        )
    }

    fn draw(&mut self, frame: &mut Frame<'_>) {
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(3),
                Constraint::Min(0),
                Constraint::Length(1),
            ])
            .split(frame.area());

        self.draw_toolbar(frame, chunks[0]);

        self.plate_area = chunks[1];
        let mapping = *self.sim.screen_mapping();
        frame.render_widget(
            PlateWidget {
                cells: self.sim.render_cells(),
                origin: mapping.origin,
                column_width: mapping.cell_size / 2.0,
                row_height: mapping.cell_size,
            },
            chunks[1],
        );

        let stats = self.sim.stats();
        let tools = self.sim.tools();
        let status = format!(
            " frame {} x{} | cells {} | total heat {:.1} | peak {:.1} | {} | {} | build: {}{}",
            self.sim.frame_count(),
            self.sim.config().speed,
            stats.present_cells,
            stats.total_temperature,
            stats.max_temperature,
            if tools.heating { "heating" } else { "cooling" },
            if tools.building { "building" } else { "breaking" },
            self.sim.selected_material(),
            if self.paused { " | PAUSED" } else { "" },
        );
        frame.render_widget(Paragraph::new(Line::from(status)), chunks[2]);
    }

    fn draw_toolbar(&mut self, frame: &mut Frame<'_>, area: Rect) {
        let widths: Vec<Constraint> = ToolButton::ALL
            .iter()
            .map(|b| Constraint::Length(b.label().len() as u16 + 4))
            .chain(std::iter::once(Constraint::Min(0)))
            .collect();
        let slots = Layout::default()
            .direction(Direction::Horizontal)
            .constraints(widths)
            .split(area);

        self.buttons.clear();
        let tools = *self.sim.tools();
        for (button, slot) in ToolButton::ALL.iter().zip(slots.iter()) {
            let style = Style::default().fg(Color::Black).bg(button.color(&tools));
            frame.render_widget(
                Paragraph::new(button.label())
                    .style(style)
                    .block(Block::default().borders(Borders::ALL).style(style)),
                *slot,
            );
            self.buttons.push((*button, *slot));
        }
    }
}

/// Draws present cells as two-column coloured blocks
struct PlateWidget {
    cells: Vec<RenderCell>,
    origin: Point2<f32>,
    column_width: f32,
    row_height: f32,
}

impl Widget for PlateWidget {
    fn render(self, area: Rect, buf: &mut Buffer) {
        for cell in &self.cells {
            let col = ((cell.rect.x - self.origin.x) / self.column_width).round() as i64;
            let row = ((cell.rect.y - self.origin.y) / self.row_height).round() as i64;
            let color = Color::Rgb(cell.color.r, cell.color.g, cell.color.b);

            for dx in 0..2 {
                let (Ok(x), Ok(y)) = (u16::try_from(col + dx), u16::try_from(row)) else {
                    continue;
                };
                if x >= area.width || y >= area.height {
                    continue;
                }
                if let Some(target) = buf.cell_mut(Position::new(area.x + x, area.y + y)) {
                    target.set_char(' ');
                    target.set_bg(color);
                }
            }
        }
    }
}
