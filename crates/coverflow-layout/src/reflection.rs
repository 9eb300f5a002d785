// crates/coverflow-layout/src/reflection.rs
use coverflow_core::{CoverFlowConfig, Rect};
use glam::Vec2;

use crate::ItemSlot;

/// Linear alpha ramp across a reflection, from the seam to the far edge.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AlphaGradient {
    /// Alpha at the edge touching the item.
    pub near: u8,
    /// Alpha at the edge furthest from the item.
    pub far: u8,
}

impl AlphaGradient {
    pub fn new(near: u8, far: u8) -> Self {
        Self { near, far }
    }

    /// Alpha at `t` in 0.0 (seam) ..= 1.0 (far edge).
    pub fn alpha_at(&self, t: f32) -> u8 {
        let t = t.clamp(0.0, 1.0);
        let near = self.near as f32;
        let far = self.far as f32;
        (near + (far - near) * t).round() as u8
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ReflectionSlot {
    pub source_index: usize,
    /// Band of the item's screen rect that gets mirrored.
    pub source_rect: Rect,
    /// The same band in content-local coordinates.
    pub source_region: Rect,
    /// Where the flipped band lands on screen.
    pub mirrored_rect: Rect,
    pub gap_offset: f32,
    pub alpha_gradient: AlphaGradient,
}

/// Mirror the bottom band of an item below it.
///
/// Returns `None` when reflections are disabled.
pub fn compute_reflection(slot: &ItemSlot, config: &CoverFlowConfig) -> Option<ReflectionSlot> {
    if !config.has_reflection() {
        return None;
    }

    let fraction = config.reflection_height_fraction();
    let gap = config.reflection_gap();
    let band_height = slot.rect.height() * fraction;

    let source_rect = Rect::new(
        slot.rect.left(),
        slot.rect.bottom() - band_height,
        slot.rect.width(),
        band_height,
    );
    let source_region = Rect::from_position_size(
        Vec2::new(0.0, slot.content_size.y * (1.0 - fraction)),
        Vec2::new(slot.content_size.x, slot.content_size.y * fraction),
    );
    let mirrored_rect = Rect::new(slot.rect.left(), slot.rect.bottom() + gap, slot.rect.width(), band_height);

    Some(ReflectionSlot {
        source_index: slot.source_index,
        source_rect,
        source_region,
        mirrored_rect,
        gap_offset: gap,
        alpha_gradient: AlphaGradient::new(slot.alpha, 0),
    })
}
