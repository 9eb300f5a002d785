// crates/coverflow-layout/src/falloff.rs
//! Distance-from-centre falloff curves for scale and alpha.

use coverflow_core::{CoverFlowConfig, ScaleFalloff, OPAQUE_ALPHA};

/// Scale for an item `distance` slots away from the centre.
///
/// 1.0 at the centre, `min_scale` at the window edge and beyond.
pub fn scale_at(distance: f32, config: &CoverFlowConfig) -> f32 {
    let t = window_fraction(distance, config);
    let eased = match config.scale_falloff() {
        ScaleFalloff::Linear => t,
        ScaleFalloff::EaseOut => 1.0 - (1.0 - t) * (1.0 - t),
    };
    1.0 - (1.0 - config.min_scale()) * eased
}

/// Alpha for an item `distance` slots away from the centre.
pub fn alpha_at(distance: f32, config: &CoverFlowConfig) -> u8 {
    let half = config.half_visible_item_count() as f32;
    let distance = distance.abs().min(half);
    let alpha = OPAQUE_ALPHA as f32 - config.alpha_step() * distance;
    alpha
        .clamp(config.lowest_alpha() as f32, OPAQUE_ALPHA as f32)
        .round() as u8
}

fn window_fraction(distance: f32, config: &CoverFlowConfig) -> f32 {
    let half = config.half_visible_item_count() as f32;
    (distance.abs() / half).min(1.0)
}
