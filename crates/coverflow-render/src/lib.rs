// crates/coverflow-render/src/lib.rs

use coverflow_core::Rect;
use coverflow_layout::{AlphaGradient, ItemSlot, ReflectionSlot};
use glam::{Affine2, Vec2, Vec4};

pub mod events;
pub mod primitives;
pub mod recording;

pub use events::*;
pub use primitives::*;
pub use recording::*;

#[derive(Debug, thiserror::Error)]
pub enum RenderError {
    #[error("Renderer initialization failed: {0}")]
    InitializationFailed(String),
    #[error("Render operation failed: {0}")]
    RenderFailed(String),
}

pub type RenderResult<T> = std::result::Result<T, RenderError>;

bitflags::bitflags! {
    /// Paint settings a drawing surface should apply to a command.
    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    pub struct PaintFlags: u8 {
        const ANTI_ALIAS = 0b0000_0001;
        const FILTER_BITMAP = 0b0000_0010;
        /// The transform flips content vertically.
        const MIRRORED = 0b0000_0100;
    }
}

impl Default for PaintFlags {
    fn default() -> Self {
        PaintFlags::ANTI_ALIAS | PaintFlags::FILTER_BITMAP
    }
}

/// Core rendering trait that all drawing surfaces implement
pub trait Renderer {
    type Surface;
    type Context;

    /// Initialize the renderer with the given surface
    fn initialize(surface: Self::Surface) -> RenderResult<Self> where Self: Sized;

    /// Begin a new frame
    fn begin_frame(&mut self, clear_color: Vec4) -> RenderResult<Self::Context>;

    /// End the current frame and present it
    fn end_frame(&mut self, context: Self::Context) -> RenderResult<()>;

    /// Handle surface resize
    fn resize(&mut self, new_size: Vec2) -> RenderResult<()>;

    /// Get current viewport size
    fn viewport_size(&self) -> Vec2;
}

/// One paint operation of a cover flow frame.
///
/// `transform` maps content-local coordinates (origin at the content's
/// top-left, in unscaled content pixels) to screen pixels.
#[derive(Debug, Clone, PartialEq)]
pub enum DrawCommand<H> {
    DrawItem {
        content: H,
        source_index: usize,
        content_size: Vec2,
        transform: Affine2,
        alpha: u8,
        flags: PaintFlags,
    },
    DrawReflection {
        content: H,
        source_index: usize,
        /// Band of the content that is mirrored, in content coordinates.
        source_region: Rect,
        transform: Affine2,
        alpha_gradient: AlphaGradient,
        flags: PaintFlags,
    },
}

impl<H> DrawCommand<H> {
    pub fn item(content: H, slot: &ItemSlot) -> Self {
        DrawCommand::DrawItem {
            content,
            source_index: slot.source_index,
            content_size: slot.content_size,
            transform: item_transform(slot),
            alpha: slot.alpha,
            flags: PaintFlags::default(),
        }
    }

    pub fn reflection(content: H, slot: &ItemSlot, reflection: &ReflectionSlot) -> Self {
        DrawCommand::DrawReflection {
            content,
            source_index: reflection.source_index,
            source_region: reflection.source_region,
            transform: reflection_transform(slot, reflection),
            alpha_gradient: reflection.alpha_gradient,
            flags: PaintFlags::default() | PaintFlags::MIRRORED,
        }
    }

    pub fn content(&self) -> &H {
        match self {
            DrawCommand::DrawItem { content, .. } | DrawCommand::DrawReflection { content, .. } => content,
        }
    }

    pub fn source_index(&self) -> usize {
        match self {
            DrawCommand::DrawItem { source_index, .. } | DrawCommand::DrawReflection { source_index, .. } => {
                *source_index
            }
        }
    }

    pub fn transform(&self) -> Affine2 {
        match self {
            DrawCommand::DrawItem { transform, .. } | DrawCommand::DrawReflection { transform, .. } => *transform,
        }
    }

    pub fn is_reflection(&self) -> bool {
        matches!(self, DrawCommand::DrawReflection { .. })
    }

    /// Screen-space bounding box of what this command paints.
    pub fn screen_rect(&self) -> Rect {
        match self {
            DrawCommand::DrawItem { content_size, transform, .. } => {
                map_rect(transform, Rect::from_position_size(Vec2::ZERO, *content_size))
            }
            DrawCommand::DrawReflection { source_region, transform, .. } => map_rect(transform, *source_region),
        }
    }
}

/// Trait for surfaces that consume cover flow draw commands
pub trait CommandRenderer: Renderer {
    /// Content handle type the surface knows how to paint.
    type Content;

    /// Execute a frame's draw commands in order; later commands paint on top.
    fn execute_commands(
        &mut self,
        context: &mut Self::Context,
        commands: &[DrawCommand<Self::Content>],
    ) -> RenderResult<()>;
}
