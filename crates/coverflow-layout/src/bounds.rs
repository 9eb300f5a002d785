// crates/coverflow-layout/src/bounds.rs
use coverflow_core::{CoverFlowConfig, Padding, Rect};

/// Container the cover flow is laid out in.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct LayoutBounds {
    pub container: Rect,
    pub padding: Padding,
}

impl LayoutBounds {
    pub fn new(width: f32, height: f32) -> Self {
        Self {
            container: Rect::new(0.0, 0.0, width, height),
            padding: Padding::default(),
        }
    }

    pub fn with_padding(mut self, padding: Padding) -> Self {
        self.padding = padding;
        self
    }

    /// The padded region items are placed in.
    pub fn available(&self) -> Rect {
        self.container.inset(self.padding)
    }

    pub fn available_height(&self) -> f32 {
        self.available().height()
    }

    /// Horizontal distance between neighbouring slot centres.
    pub fn slot_step(&self, config: &CoverFlowConfig) -> f32 {
        self.available().width() / config.visible_item_count() as f32
    }

    /// Height of a full-scale item once room for its reflection is taken.
    ///
    /// `height + height * fraction + gap` fills the available height.
    pub fn item_height(&self, config: &CoverFlowConfig) -> f32 {
        let available = self.available_height();
        if !config.has_reflection() {
            return available;
        }
        let height = (available - config.reflection_gap()) / (1.0 + config.reflection_height_fraction());
        height.max(0.0)
    }

    /// Vertical extent an item of `item_height` occupies with its reflection.
    pub fn block_height(&self, item_height: f32, config: &CoverFlowConfig) -> f32 {
        if config.has_reflection() {
            item_height * (1.0 + config.reflection_height_fraction()) + config.reflection_gap()
        } else {
            item_height
        }
    }
}
