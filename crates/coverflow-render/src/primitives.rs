// crates/coverflow-render/src/primitives.rs
use coverflow_core::Rect;
use coverflow_layout::{ItemSlot, ReflectionSlot};
use glam::{Affine2, Mat2, Vec2};

/// Content-to-screen transform for an item: uniform scale, then translate.
pub fn item_transform(slot: &ItemSlot) -> Affine2 {
    Affine2::from_scale_angle_translation(Vec2::splat(slot.scale), 0.0, slot.rect.position)
}

/// Content-to-screen transform for a reflection.
///
/// The content's bottom edge lands on the top of the mirrored rect and the
/// band above it extends downwards, flipped.
pub fn reflection_transform(slot: &ItemSlot, reflection: &ReflectionSlot) -> Affine2 {
    let scale = slot.scale;
    let matrix = Mat2::from_cols(Vec2::new(scale, 0.0), Vec2::new(0.0, -scale));
    let translation = Vec2::new(
        reflection.mirrored_rect.left(),
        reflection.mirrored_rect.top() + slot.content_size.y * scale,
    );
    Affine2::from_mat2_translation(matrix, translation)
}

/// Axis-aligned bounds of `rect` after `transform`.
pub fn map_rect(transform: &Affine2, rect: Rect) -> Rect {
    let corners = [
        rect.position,
        Vec2::new(rect.right(), rect.top()),
        Vec2::new(rect.left(), rect.bottom()),
        rect.position + rect.size,
    ]
    .map(|corner| transform.transform_point2(corner));

    let min = corners.iter().fold(Vec2::splat(f32::INFINITY), |acc, p| acc.min(*p));
    let max = corners.iter().fold(Vec2::splat(f32::NEG_INFINITY), |acc, p| acc.max(*p));
    Rect::from_position_size(min, max - min)
}

/// Color utilities
pub mod color {
    use glam::Vec4;

    pub const BLACK: Vec4 = Vec4::new(0.0, 0.0, 0.0, 1.0);
    pub const WHITE: Vec4 = Vec4::new(1.0, 1.0, 1.0, 1.0);

    pub fn from_hex(hex: u32) -> Vec4 {
        let r = ((hex >> 24) & 0xFF) as f32 / 255.0;
        let g = ((hex >> 16) & 0xFF) as f32 / 255.0;
        let b = ((hex >> 8) & 0xFF) as f32 / 255.0;
        let a = (hex & 0xFF) as f32 / 255.0;
        Vec4::new(r, g, b, a)
    }

    pub fn from_rgb(r: u8, g: u8, b: u8) -> Vec4 {
        Vec4::new(r as f32 / 255.0, g as f32 / 255.0, b as f32 / 255.0, 1.0)
    }

    /// Composite `color` at `alpha` (0-255) over an opaque `background`.
    pub fn blend_over(color: Vec4, alpha: u8, background: Vec4) -> Vec4 {
        let a = color.w * alpha as f32 / 255.0;
        let rgb = color.truncate() * a + background.truncate() * (1.0 - a);
        rgb.extend(1.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use glam::Vec4;

    #[test]
    fn test_map_rect_normalises_flipped_axes() {
        let flip = Affine2::from_mat2_translation(Mat2::from_cols(Vec2::X, -Vec2::Y), Vec2::new(0.0, 50.0));
        let rect = map_rect(&flip, Rect::new(0.0, 10.0, 20.0, 30.0));
        assert_eq!(rect, Rect::new(0.0, 10.0, 20.0, 30.0));
    }

    #[test]
    fn test_blend_over() {
        let white = color::WHITE;
        assert_eq!(color::blend_over(white, 255, color::BLACK), Vec4::new(1.0, 1.0, 1.0, 1.0));
        assert_eq!(color::blend_over(white, 0, color::BLACK), Vec4::new(0.0, 0.0, 0.0, 1.0));
        assert_eq!(color::from_hex(0xFF0000FF), Vec4::new(1.0, 0.0, 0.0, 1.0));
    }
}
