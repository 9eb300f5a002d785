// crates/coverflow-render/src/recording.rs
use glam::{Vec2, Vec4};

use crate::{CommandRenderer, DrawCommand, RenderError, RenderResult, Renderer};

/// Headless surface that keeps every frame's commands.
///
/// Used by the text debug output and by tests that need to inspect what a
/// frame would have painted.
#[derive(Debug)]
pub struct RecordingRenderer<H> {
    viewport: Vec2,
    frames: Vec<Vec<DrawCommand<H>>>,
    in_frame: bool,
}

#[derive(Debug, Default)]
pub struct RecordingContext {
    pub clear_color: Vec4,
}

impl<H> RecordingRenderer<H> {
    pub fn frames(&self) -> &[Vec<DrawCommand<H>>] {
        &self.frames
    }

    pub fn last_frame(&self) -> Option<&[DrawCommand<H>]> {
        self.frames.last().map(Vec::as_slice)
    }

    pub fn take_frames(&mut self) -> Vec<Vec<DrawCommand<H>>> {
        std::mem::take(&mut self.frames)
    }
}

impl<H> Renderer for RecordingRenderer<H> {
    type Surface = Vec2;
    type Context = RecordingContext;

    fn initialize(surface: Self::Surface) -> RenderResult<Self> {
        if surface.x < 0.0 || surface.y < 0.0 {
            return Err(RenderError::InitializationFailed(format!("negative viewport {:?}", surface)));
        }
        Ok(Self {
            viewport: surface,
            frames: Vec::new(),
            in_frame: false,
        })
    }

    fn begin_frame(&mut self, clear_color: Vec4) -> RenderResult<Self::Context> {
        if self.in_frame {
            return Err(RenderError::RenderFailed("begin_frame called twice".to_string()));
        }
        self.in_frame = true;
        self.frames.push(Vec::new());
        Ok(RecordingContext { clear_color })
    }

    fn end_frame(&mut self, _context: Self::Context) -> RenderResult<()> {
        self.in_frame = false;
        Ok(())
    }

    fn resize(&mut self, new_size: Vec2) -> RenderResult<()> {
        self.viewport = new_size;
        Ok(())
    }

    fn viewport_size(&self) -> Vec2 {
        self.viewport
    }
}

impl<H: Clone> CommandRenderer for RecordingRenderer<H> {
    type Content = H;

    fn execute_commands(
        &mut self,
        _context: &mut Self::Context,
        commands: &[DrawCommand<H>],
    ) -> RenderResult<()> {
        match self.frames.last_mut() {
            Some(frame) if self.in_frame => frame.extend_from_slice(commands),
            _ => return Err(RenderError::RenderFailed("execute_commands outside a frame".to_string())),
        }
        Ok(())
    }
}
