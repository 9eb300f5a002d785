// crates/coverflow-core/src/config.rs
use tracing::debug;

use crate::{CoverFlowError, Result};

pub const DEFAULT_VISIBLE_ITEM_COUNT: usize = 3;
pub const DEFAULT_LOWEST_ALPHA: u8 = 75;
pub const DEFAULT_REFLECTION_HEIGHT_FRACTION: f32 = 0.3;
/// Default reflection gap in density-independent pixels.
pub const DEFAULT_REFLECTION_GAP_DP: f32 = 10.0;
pub const DEFAULT_MIN_SCALE: f32 = 0.6;

pub const OPAQUE_ALPHA: u8 = 255;

/// Vertical anchor of the item row within the available height.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Gravity {
    #[default]
    Top,
    Bottom,
    Center,
}

impl Gravity {
    pub fn from_name(name: &str) -> Option<Self> {
        match name.trim().to_ascii_lowercase().as_str() {
            "top" => Some(Gravity::Top),
            "bottom" => Some(Gravity::Bottom),
            "center" => Some(Gravity::Center),
            _ => None,
        }
    }
}

/// How an item's base size is derived.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LayoutMode {
    /// Every item takes the slot width and the full item height.
    #[default]
    MatchParent,
    /// Items keep their intrinsic size, shrunk to fit the item height.
    WrapContent,
}

impl LayoutMode {
    pub fn from_name(name: &str) -> Option<Self> {
        match name.trim().to_ascii_lowercase().as_str() {
            "match_parent" => Some(LayoutMode::MatchParent),
            "wrap_content" => Some(LayoutMode::WrapContent),
            _ => None,
        }
    }
}

/// Shape of the scale curve between the centre and the window edge.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ScaleFalloff {
    #[default]
    Linear,
    /// Quadratic ease-out: neighbours shrink quickly, outer items level off.
    EaseOut,
}

/// Instance-wide cover flow configuration.
///
/// `half_visible_item_count` and `alpha_step` are derived. Every setter
/// validates first and leaves the configuration untouched on error.
#[derive(Debug, Clone, PartialEq)]
pub struct CoverFlowConfig {
    visible_item_count: usize,
    half_visible_item_count: usize,
    lowest_alpha: u8,
    alpha_step: f32,
    reflection_height_fraction: f32,
    reflection_gap: f32,
    gravity: Gravity,
    layout_mode: LayoutMode,
    min_scale: f32,
    scale_falloff: ScaleFalloff,
}

impl Default for CoverFlowConfig {
    fn default() -> Self {
        Self::with_density(1.0)
    }
}

impl CoverFlowConfig {
    /// Defaults with the reflection gap resolved at the given display density.
    pub fn with_density(density: f32) -> Self {
        let half = DEFAULT_VISIBLE_ITEM_COUNT / 2;
        Self {
            visible_item_count: DEFAULT_VISIBLE_ITEM_COUNT,
            half_visible_item_count: half,
            lowest_alpha: DEFAULT_LOWEST_ALPHA,
            alpha_step: alpha_step(DEFAULT_LOWEST_ALPHA, half),
            reflection_height_fraction: DEFAULT_REFLECTION_HEIGHT_FRACTION,
            reflection_gap: DEFAULT_REFLECTION_GAP_DP * density,
            gravity: Gravity::default(),
            layout_mode: LayoutMode::default(),
            min_scale: DEFAULT_MIN_SCALE,
            scale_falloff: ScaleFalloff::default(),
        }
    }

    pub fn visible_item_count(&self) -> usize {
        self.visible_item_count
    }

    pub fn half_visible_item_count(&self) -> usize {
        self.half_visible_item_count
    }

    pub fn lowest_alpha(&self) -> u8 {
        self.lowest_alpha
    }

    /// Alpha lost per unit of distance from the centre.
    pub fn alpha_step(&self) -> f32 {
        self.alpha_step
    }

    pub fn reflection_height_fraction(&self) -> f32 {
        self.reflection_height_fraction
    }

    pub fn reflection_gap(&self) -> f32 {
        self.reflection_gap
    }

    pub fn has_reflection(&self) -> bool {
        self.reflection_height_fraction > 0.0
    }

    pub fn gravity(&self) -> Gravity {
        self.gravity
    }

    pub fn layout_mode(&self) -> LayoutMode {
        self.layout_mode
    }

    pub fn min_scale(&self) -> f32 {
        self.min_scale
    }

    pub fn scale_falloff(&self) -> ScaleFalloff {
        self.scale_falloff
    }

    pub fn set_visible_item_count(&mut self, count: usize) -> Result<()> {
        if count < 3 || count % 2 == 0 {
            return Err(CoverFlowError::InvalidVisibleItemCount(count));
        }

        self.visible_item_count = count;
        self.half_visible_item_count = count / 2;
        self.alpha_step = alpha_step(self.lowest_alpha, self.half_visible_item_count);
        debug!(
            "visible_item_count={} half={} alpha_step={:.2}",
            self.visible_item_count, self.half_visible_item_count, self.alpha_step
        );
        Ok(())
    }

    pub fn set_lowest_alpha(&mut self, lowest_alpha: u8) {
        self.lowest_alpha = lowest_alpha;
        self.alpha_step = alpha_step(lowest_alpha, self.half_visible_item_count);
        debug!("lowest_alpha={} alpha_step={:.2}", lowest_alpha, self.alpha_step);
    }

    pub fn set_reflection_height_fraction(&mut self, fraction: f32) -> Result<()> {
        if !(0.0..=1.0).contains(&fraction) {
            return Err(CoverFlowError::InvalidReflectionHeight(fraction));
        }
        self.reflection_height_fraction = fraction;
        Ok(())
    }

    pub fn set_reflection_gap(&mut self, gap: f32) -> Result<()> {
        if !gap.is_finite() || gap < 0.0 {
            return Err(CoverFlowError::InvalidReflectionGap(gap));
        }
        self.reflection_gap = gap;
        Ok(())
    }

    pub fn set_gravity(&mut self, gravity: Gravity) {
        self.gravity = gravity;
    }

    pub fn set_layout_mode(&mut self, layout_mode: LayoutMode) {
        self.layout_mode = layout_mode;
    }

    pub fn set_min_scale(&mut self, min_scale: f32) -> Result<()> {
        if !(min_scale > 0.0 && min_scale <= 1.0) {
            return Err(CoverFlowError::InvalidMinScale(min_scale));
        }
        self.min_scale = min_scale;
        Ok(())
    }

    pub fn set_scale_falloff(&mut self, falloff: ScaleFalloff) {
        self.scale_falloff = falloff;
    }
}

fn alpha_step(lowest_alpha: u8, half_visible_item_count: usize) -> f32 {
    (OPAQUE_ALPHA - lowest_alpha) as f32 / half_visible_item_count as f32
}
