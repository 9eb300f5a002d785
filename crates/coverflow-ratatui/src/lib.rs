use glam::{Vec2, Vec4};
use ratatui::{
    backend::Backend,
    layout::{Alignment, Rect},
    style::{Color, Style},
    widgets::{Block, Borders, Clear, Paragraph},
    Frame, Terminal,
};
use tracing::trace;

use coverflow_render::color;
use coverflow_render::{CommandRenderer, DrawCommand, RenderError, RenderResult, Renderer};

/// Pixel footprint of one terminal cell when no canvas size is given.
pub const CELL_SIZE: Vec2 = Vec2::new(8.0, 16.0);

/// What the terminal paints for one item: a filled, titled card.
#[derive(Debug, Clone, PartialEq)]
pub struct Card {
    pub title: String,
    pub color: Vec4,
}

impl Card {
    pub fn new(title: impl Into<String>, color: Vec4) -> Self {
        Self { title: title.into(), color }
    }

    /// Card titled with its index, colored from a fixed palette.
    pub fn numbered(index: usize) -> Self {
        const PALETTE: [u32; 6] = [0xE0524CFF, 0xF2A541FF, 0x5FB36AFF, 0x3D8FD1FF, 0x8E6CCFFF, 0x4DB6ACFF];
        Self::new(format!("#{index}"), color::from_hex(PALETTE[index % PALETTE.len()]))
    }
}

pub struct RatatuiRenderer<B: Backend> {
    pub terminal: Terminal<B>,
    /// Pixel canvas the layout runs in; scaled onto the terminal grid.
    source_size: Vec2,
}

pub struct RatatuiContext {
    clear_color: Vec4,
}

impl<B: Backend> RatatuiRenderer<B> {
    pub fn source_size(&self) -> Vec2 {
        self.source_size
    }

    pub fn set_source_size(&mut self, size: Vec2) {
        if size.x > 0.0 && size.y > 0.0 {
            self.source_size = size;
        }
    }
}

impl<B: Backend> Renderer for RatatuiRenderer<B> {
    type Surface = B;
    type Context = RatatuiContext;

    fn initialize(surface: Self::Surface) -> RenderResult<Self> {
        let terminal = Terminal::new(surface)
            .map_err(|e| RenderError::InitializationFailed(e.to_string()))?;
        let size = terminal
            .size()
            .map_err(|e| RenderError::InitializationFailed(e.to_string()))?;
        Ok(Self {
            terminal,
            source_size: Vec2::new(size.width as f32, size.height as f32) * CELL_SIZE,
        })
    }

    fn begin_frame(&mut self, clear_color: Vec4) -> RenderResult<Self::Context> {
        Ok(RatatuiContext { clear_color })
    }

    fn end_frame(&mut self, _context: Self::Context) -> RenderResult<()> {
        Ok(())
    }

    /// `new_size` is in terminal cells.
    fn resize(&mut self, new_size: Vec2) -> RenderResult<()> {
        self.terminal
            .resize(Rect::new(0, 0, new_size.x as u16, new_size.y as u16))
            .map_err(|e| RenderError::RenderFailed(format!("Terminal resize failed: {}", e)))?;
        self.set_source_size(new_size * CELL_SIZE);
        Ok(())
    }

    fn viewport_size(&self) -> Vec2 {
        self.source_size
    }
}

impl<B: Backend> CommandRenderer for RatatuiRenderer<B> {
    type Content = Card;

    fn execute_commands(
        &mut self,
        context: &mut Self::Context,
        commands: &[DrawCommand<Card>],
    ) -> RenderResult<()> {
        let source_size = self.source_size;
        let background = context.clear_color;
        trace!("Painting {} commands onto the terminal", commands.len());

        self.terminal
            .draw(|frame| render_commands_to_frame(commands, frame, source_size, background))
            .map_err(|e| RenderError::RenderFailed(e.to_string()))?;

        Ok(())
    }
}

fn render_commands_to_frame(commands: &[DrawCommand<Card>], frame: &mut Frame, canvas_size: Vec2, background: Vec4) {
    let terminal_area = frame.size();
    frame.render_widget(Clear, terminal_area);
    frame.render_widget(Block::default().style(Style::default().bg(to_ratatui_color(background))), terminal_area);

    for command in commands {
        let Some(area) = translate_rect(command.screen_rect(), canvas_size, terminal_area) else {
            continue;
        };

        match command {
            DrawCommand::DrawItem { content, alpha, .. } => {
                let fill = to_ratatui_color(color::blend_over(content.color, *alpha, background));
                let ink = to_ratatui_color(color::blend_over(color::WHITE, *alpha, background));

                let block = Block::default()
                    .borders(Borders::ALL)
                    .border_style(Style::default().fg(ink))
                    .style(Style::default().bg(fill));
                let inner = block.inner(area);
                frame.render_widget(Clear, area);
                frame.render_widget(block, area);

                if inner.height > 0 {
                    let title_row = Rect::new(inner.x, inner.y + inner.height / 2, inner.width, 1);
                    let title = Paragraph::new(content.title.as_str())
                        .style(Style::default().fg(ink).bg(fill))
                        .alignment(Alignment::Center);
                    frame.render_widget(title, title_row);
                }
            }
            DrawCommand::DrawReflection { content, alpha_gradient, .. } => {
                // One band per terminal row, fading away from the item.
                for row in 0..area.height {
                    let t = (row as f32 + 0.5) / area.height as f32;
                    let alpha = alpha_gradient.alpha_at(t);
                    let fill = to_ratatui_color(color::blend_over(content.color, alpha, background));
                    let band = Rect::new(area.x, area.y + row, area.width, 1);
                    frame.render_widget(Block::default().style(Style::default().bg(fill)), band);
                }
            }
        }
    }
}

/// Scale a canvas-pixel rect onto the terminal grid, clipped to `terminal_area`.
fn translate_rect(source: coverflow_core::Rect, canvas_size: Vec2, terminal_area: Rect) -> Option<Rect> {
    if canvas_size.x <= 0.0 || canvas_size.y <= 0.0 {
        return None;
    }

    let cols = terminal_area.width as f32 / canvas_size.x;
    let rows = terminal_area.height as f32 / canvas_size.y;

    let left = (source.left() * cols).floor().max(0.0);
    let top = (source.top() * rows).floor().max(0.0);
    let right = (source.right() * cols).ceil().min(terminal_area.width as f32);
    let bottom = (source.bottom() * rows).ceil().min(terminal_area.height as f32);
    if right <= left || bottom <= top {
        return None;
    }

    Some(Rect::new(
        terminal_area.x + left as u16,
        terminal_area.y + top as u16,
        (right - left) as u16,
        (bottom - top) as u16,
    ))
}

fn to_ratatui_color(color: Vec4) -> Color {
    if color.w < 0.1 {
        return Color::Reset;
    }
    let channel = |c: f32| (c.clamp(0.0, 1.0) * 255.0).round() as u8;
    Color::Rgb(channel(color.x), channel(color.y), channel(color.z))
}
