// src/bin/coverflow-terminal.rs

use std::collections::VecDeque;
use std::fs::File;
use std::io;
use std::sync::Mutex;
use std::time::{Duration, Instant};

use anyhow::{Context, Result};
use clap::Parser;
use glam::Vec2;
use tracing::{error, info};

// Terminal specific imports
use crossterm::{
    event::{
        self, DisableMouseCapture, EnableMouseCapture, Event as CrosstermEvent, KeyCode, KeyEventKind, MouseButton,
        MouseEventKind,
    },
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::prelude::CrosstermBackend;

use coverflow_core::{CoverFlowConfig, ItemList};
use coverflow_ratatui::{Card, RatatuiRenderer, CELL_SIZE};
use coverflow_render::{InputEvent, Renderer};
use coverflow_runtime::CoverFlowController;

/// Pointer samples older than this do not count towards release velocity.
const VELOCITY_WINDOW: Duration = Duration::from_millis(100);

#[derive(Parser)]
#[command(name = "coverflow-terminal")]
#[command(about = "Interactive cover flow in the terminal")]
struct Args {
    /// Number of cards
    #[arg(long, default_value_t = 12)]
    items: usize,

    /// Number of visible cards (odd, at least 3)
    #[arg(long, default_value_t = 5)]
    visible_item: usize,

    /// Write logs to this file; the terminal itself is busy drawing
    #[arg(long)]
    log_file: Option<String>,

    /// Enable debug logging
    #[arg(short, long)]
    debug: bool,
}

/// Recent pointer positions of the drag in progress, in canvas pixels.
#[derive(Default)]
struct DragTracker {
    last: Option<Vec2>,
    samples: VecDeque<(Instant, Vec2)>,
}

impl DragTracker {
    fn begin(&mut self, position: Vec2) {
        self.samples.clear();
        self.last = Some(position);
        self.samples.push_back((Instant::now(), position));
    }

    /// Record a move and return the delta since the previous one.
    fn update(&mut self, position: Vec2) -> Option<Vec2> {
        let previous = self.last.replace(position)?;
        let now = Instant::now();
        self.samples.push_back((now, position));
        while self
            .samples
            .front()
            .is_some_and(|(at, _)| now.duration_since(*at) > VELOCITY_WINDOW)
        {
            self.samples.pop_front();
        }
        Some(position - previous)
    }

    /// Finish the drag and return its release velocity in pixels per second.
    fn end(&mut self) -> Option<Vec2> {
        self.last.take()?;
        let (first_at, first) = *self.samples.front()?;
        let (last_at, last) = *self.samples.back()?;
        self.samples.clear();

        let elapsed = last_at.duration_since(first_at).as_secs_f32();
        if elapsed <= f32::EPSILON {
            return Some(Vec2::ZERO);
        }
        Some((last - first) / elapsed)
    }
}

fn main() -> Result<()> {
    let args = Args::parse();
    init_logging(args.debug, args.log_file.as_deref())?;

    let mut config = CoverFlowConfig::default();
    config
        .set_visible_item_count(args.visible_item)
        .context("Invalid --visible-item")?;

    // --- Terminal and Renderer Initialization ---
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;

    let backend = CrosstermBackend::new(stdout);
    let renderer = RatatuiRenderer::initialize(backend)?;

    let mut controller = CoverFlowController::new(config);
    controller.set_item_source(ItemList::new((0..args.items).map(Card::numbered).collect()));

    info!("Starting terminal render loop... (Press 'q' to quit)");
    let result = run(renderer, &mut controller);

    // --- Cleanup ---
    disable_raw_mode()?;
    execute!(io::stdout(), LeaveAlternateScreen, DisableMouseCapture)?;
    info!("Terminal renderer shutdown complete.");
    result
}

fn run(
    mut renderer: RatatuiRenderer<CrosstermBackend<io::Stdout>>,
    controller: &mut CoverFlowController<ItemList<Card>>,
) -> Result<()> {
    let mut drag = DragTracker::default();
    let mut last_frame_time = Instant::now();

    'main_loop: loop {
        if event::poll(Duration::from_millis(16))? {
            match event::read()? {
                CrosstermEvent::Key(key) if key.kind == KeyEventKind::Press => match key.code {
                    KeyCode::Char('q') | KeyCode::Esc => {
                        info!("Exit requested.");
                        break 'main_loop;
                    }
                    KeyCode::Left => step(controller, -1),
                    KeyCode::Right => step(controller, 1),
                    KeyCode::Home => controller.scroll_to_index(0, true),
                    KeyCode::End => controller.scroll_to_index(isize::MAX, true),
                    _ => {}
                },
                CrosstermEvent::Mouse(mouse) => {
                    let position = Vec2::new(mouse.column as f32, mouse.row as f32) * CELL_SIZE;
                    match mouse.kind {
                        MouseEventKind::Down(MouseButton::Left) => {
                            drag.begin(position);
                            controller.handle_input(InputEvent::DragBegin { position });
                        }
                        MouseEventKind::Drag(MouseButton::Left) => {
                            if let Some(delta) = drag.update(position) {
                                controller.handle_input(InputEvent::DragMove { position, delta });
                            }
                        }
                        MouseEventKind::Up(MouseButton::Left) => {
                            if let Some(velocity) = drag.end() {
                                controller.handle_input(InputEvent::DragEnd { position, velocity });
                            }
                        }
                        MouseEventKind::ScrollDown => {
                            controller.handle_input(InputEvent::Scroll { delta: Vec2::new(0.0, CELL_SIZE.x) })
                        }
                        MouseEventKind::ScrollUp => {
                            controller.handle_input(InputEvent::Scroll { delta: Vec2::new(0.0, -CELL_SIZE.x) })
                        }
                        _ => {}
                    }
                }
                CrosstermEvent::Resize(width, height) => {
                    if let Err(e) = renderer.resize(Vec2::new(width as f32, height as f32)) {
                        error!("Failed to handle resize: {}", e);
                    }
                    controller.handle_input(InputEvent::Resize { size: renderer.viewport_size() });
                }
                _ => {}
            }
        }

        let delta_time = last_frame_time.elapsed();
        last_frame_time = Instant::now();
        if controller.update(delta_time) {
            let bounds = controller.bounds_for_viewport(renderer.viewport_size());
            if let Err(e) = controller.render(&mut renderer, bounds) {
                error!("Failed to render frame: {}", e);
                break;
            }
        }
    }

    Ok(())
}

fn step(controller: &mut CoverFlowController<ItemList<Card>>, direction: isize) {
    let current = controller.current_index().unwrap_or(0) as isize;
    controller.scroll_to_index(current + direction, true);
}

fn init_logging(debug: bool, log_file: Option<&str>) -> Result<()> {
    let Some(path) = log_file else {
        return Ok(());
    };
    let file = File::create(path).with_context(|| format!("Failed to create log file: {}", path))?;

    let level = if debug { tracing::Level::DEBUG } else { tracing::Level::INFO };
    let subscriber = tracing_subscriber::fmt()
        .with_max_level(level)
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .with_target(false)
        .compact()
        .finish();
    tracing::subscriber::set_global_default(subscriber).context("Failed to set tracing subscriber")
}
