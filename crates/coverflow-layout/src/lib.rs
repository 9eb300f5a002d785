// crates/coverflow-layout/src/lib.rs

use std::cmp::Ordering;
use std::fmt::Debug;

use coverflow_core::{CoverFlowConfig, Gravity, ItemMetrics, LayoutMode, Rect};
use glam::Vec2;
use tracing::{debug, trace};

pub mod bounds;
pub mod falloff;
pub mod reflection;

pub use bounds::*;
pub use falloff::*;
pub use reflection::*;

/// Placement of one visible item for a single frame.
#[derive(Debug, Clone, PartialEq)]
pub struct ItemSlot {
    pub source_index: usize,
    /// `source_index - offset`; negative on the left of the centre.
    pub center_distance: f32,
    /// Screen rect after scaling.
    pub rect: Rect,
    /// Unscaled content size the transform maps from.
    pub content_size: Vec2,
    pub scale: f32,
    pub alpha: u8,
    /// Position in the back-to-front paint sequence.
    pub draw_order: usize,
}

/// An item slot paired with its optional reflection.
#[derive(Debug, Clone, PartialEq)]
pub struct SlotEntry {
    pub item: ItemSlot,
    pub reflection: Option<ReflectionSlot>,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct LayoutResult {
    /// Back-to-front: farthest from the centre first.
    pub entries: Vec<SlotEntry>,
}

impl LayoutResult {
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn slots(&self) -> impl Iterator<Item = &ItemSlot> {
        self.entries.iter().map(|entry| &entry.item)
    }
}

pub trait LayoutEngine: Debug {
    /// Place every item of the visible window around `offset`.
    ///
    /// Slots come back in paint order, farthest from the centre first.
    fn compute_layout(
        &self,
        offset: f32,
        item_count: usize,
        bounds: &LayoutBounds,
        config: &CoverFlowConfig,
        metrics: &dyn ItemMetrics,
    ) -> Vec<ItemSlot>;

    /// Pixels of horizontal travel that move the offset by one item.
    fn slot_step(&self, bounds: &LayoutBounds, config: &CoverFlowConfig) -> f32 {
        bounds.slot_step(config)
    }

    fn compute_layout_with_reflections(
        &self,
        offset: f32,
        item_count: usize,
        bounds: &LayoutBounds,
        config: &CoverFlowConfig,
        metrics: &dyn ItemMetrics,
    ) -> LayoutResult {
        let entries = self
            .compute_layout(offset, item_count, bounds, config, metrics)
            .into_iter()
            .map(|item| {
                let reflection = compute_reflection(&item, config);
                SlotEntry { item, reflection }
            })
            .collect();
        LayoutResult { entries }
    }
}

#[derive(Debug, Default)]
pub struct CoverFlowLayoutEngine {
    debug: bool,
}

impl CoverFlowLayoutEngine {
    pub fn new() -> Self {
        Self { debug: false }
    }

    pub fn with_debug(mut self, debug: bool) -> Self {
        self.debug = debug;
        self
    }
}

impl LayoutEngine for CoverFlowLayoutEngine {
    fn compute_layout(
        &self,
        offset: f32,
        item_count: usize,
        bounds: &LayoutBounds,
        config: &CoverFlowConfig,
        metrics: &dyn ItemMetrics,
    ) -> Vec<ItemSlot> {
        if item_count == 0 || bounds.container.is_empty() || !offset.is_finite() {
            return Vec::new();
        }

        let available = bounds.available();
        let item_height = bounds.item_height(config);
        if available.is_empty() || item_height <= 0.0 {
            return Vec::new();
        }

        let half = config.half_visible_item_count() as i64;
        let last_index = item_count as i64 - 1;
        let mid = (offset + 0.5).floor() as i64;
        let first = mid.saturating_sub(half).max(0);
        let last = mid.saturating_add(half).min(last_index);
        if first > last {
            return Vec::new();
        }

        let row = Row {
            config,
            metrics,
            item_count,
            step: bounds.slot_step(config),
            item_height,
        };

        let mut slots: Vec<ItemSlot> = (first..=last)
            .map(|index| {
                let index = index as usize;
                let center_distance = index as f32 - offset;
                let scale = scale_at(center_distance, config);
                let alpha = alpha_at(center_distance, config);

                let content_size = row.content_size(index);
                let size = content_size * scale;
                let center_x = available.center().x + row.horizontal_position(index, offset);
                let block_height = bounds.block_height(size.y, config);
                let top = match config.gravity() {
                    Gravity::Top => available.top(),
                    Gravity::Bottom => available.bottom() - block_height,
                    Gravity::Center => available.top() + (available.height() - block_height) * 0.5,
                };

                ItemSlot {
                    source_index: index,
                    center_distance,
                    rect: Rect::new(center_x - size.x * 0.5, top, size.x, size.y),
                    content_size,
                    scale,
                    alpha,
                    draw_order: 0,
                }
            })
            .collect();

        slots.sort_by(|a, b| {
            b.center_distance
                .abs()
                .partial_cmp(&a.center_distance.abs())
                .unwrap_or(Ordering::Equal)
                .then(a.source_index.cmp(&b.source_index))
        });
        for (order, slot) in slots.iter_mut().enumerate() {
            slot.draw_order = order;
            trace!(
                "slot #{} item={} d={:.3} scale={:.3} alpha={} rect={:?}",
                order, slot.source_index, slot.center_distance, slot.scale, slot.alpha, slot.rect
            );
        }

        if self.debug {
            debug!(
                "Layout offset={:.3} mid={} window={}..={} of {} items -> {} slots",
                offset,
                mid,
                first,
                last,
                item_count,
                slots.len()
            );
        }

        slots
    }
}

/// Per-pass sizing shared by every slot in the window.
struct Row<'a> {
    config: &'a CoverFlowConfig,
    metrics: &'a dyn ItemMetrics,
    item_count: usize,
    step: f32,
    item_height: f32,
}

impl Row<'_> {
    fn content_size(&self, index: usize) -> Vec2 {
        let fallback = Vec2::new(self.step, self.item_height);
        if self.config.layout_mode() == LayoutMode::MatchParent || index >= self.item_count {
            return fallback;
        }

        match self.metrics.intrinsic_size(index) {
            Some(size) if size.x > 0.0 && size.y > 0.0 => {
                if size.y > self.item_height {
                    size * (self.item_height / size.y)
                } else {
                    size
                }
            }
            _ => fallback,
        }
    }

    fn width_at(&self, index: i64) -> f32 {
        if index < 0 || index as usize >= self.item_count {
            self.step
        } else {
            self.content_size(index as usize).x
        }
    }

    /// Distance between the centres of items `index` and `index + 1`.
    fn spacing_after(&self, index: i64) -> f32 {
        match self.config.layout_mode() {
            LayoutMode::MatchParent => self.step,
            LayoutMode::WrapContent => (self.width_at(index) + self.width_at(index + 1)) * 0.5,
        }
    }

    /// Signed horizontal offset of item `index` from the row centre.
    fn horizontal_position(&self, index: usize, offset: f32) -> f32 {
        let anchor = offset.floor() as i64;
        let fraction = offset - anchor as f32;
        let index = index as i64;

        let mut position = -fraction * self.spacing_after(anchor);
        match index.cmp(&anchor) {
            Ordering::Greater => {
                for k in anchor..index {
                    position += self.spacing_after(k);
                }
            }
            Ordering::Less => {
                for k in index..anchor {
                    position -= self.spacing_after(k);
                }
            }
            Ordering::Equal => {}
        }
        position
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use coverflow_core::{ItemList, NoIntrinsicSize, Padding};

    fn config(visible: usize) -> CoverFlowConfig {
        let mut config = CoverFlowConfig::default();
        config.set_visible_item_count(visible).unwrap();
        config
    }

    fn layout(offset: f32, item_count: usize, config: &CoverFlowConfig) -> Vec<ItemSlot> {
        let bounds = LayoutBounds::new(500.0, 260.0);
        CoverFlowLayoutEngine::new().compute_layout(offset, item_count, &bounds, config, &NoIntrinsicSize)
    }

    #[test]
    fn test_empty_source_yields_nothing() {
        let config = config(5);
        for offset in [-3.0, 0.0, 2.5, 100.0] {
            assert!(layout(offset, 0, &config).is_empty());
        }
    }

    #[test]
    fn test_zero_area_bounds_yield_nothing() {
        let config = config(3);
        let engine = CoverFlowLayoutEngine::new();
        for bounds in [
            LayoutBounds::new(0.0, 200.0),
            LayoutBounds::new(300.0, 0.0),
            LayoutBounds::new(100.0, 100.0).with_padding(Padding::uniform(60.0)),
        ] {
            assert!(engine.compute_layout(1.0, 5, &bounds, &config, &NoIntrinsicSize).is_empty());
        }
    }

    #[test]
    fn test_integer_offset_centres_item() {
        let config = config(5);
        let slots = layout(3.0, 10, &config);
        let centre = slots.last().unwrap();

        assert_eq!(centre.source_index, 3);
        assert_eq!(centre.center_distance, 0.0);
        assert_eq!(centre.scale, 1.0);
        assert_eq!(centre.alpha, 255);
        assert!((centre.rect.center().x - 250.0).abs() < 1e-3);
        assert_eq!(centre.draw_order, slots.len() - 1);
    }

    #[test]
    fn test_half_offset_window_and_alphas() {
        let mut config = config(5);
        config.set_lowest_alpha(75);
        let slots = layout(4.5, 10, &config);

        let mut indices: Vec<usize> = slots.iter().map(|s| s.source_index).collect();
        indices.sort();
        assert_eq!(indices, vec![3, 4, 5, 6, 7]);

        let alpha = |index: usize| slots.iter().find(|s| s.source_index == index).unwrap().alpha;
        assert_eq!(alpha(4), alpha(5));
        assert!(alpha(5) > alpha(6));
        assert!(alpha(4) > alpha(3));
        assert!(alpha(6) > alpha(7));
        assert_eq!(alpha(7), 75);
    }

    #[test]
    fn test_paint_order_is_far_to_near_with_stable_ties() {
        let config = config(5);
        let slots = layout(4.5, 10, &config);
        let order: Vec<usize> = slots.iter().map(|s| s.source_index).collect();
        assert_eq!(order, vec![7, 3, 6, 4, 5]);

        for pair in slots.windows(2) {
            assert!(pair[0].center_distance.abs() >= pair[1].center_distance.abs());
        }
        for (expected, slot) in slots.iter().enumerate() {
            assert_eq!(slot.draw_order, expected);
        }
    }

    #[test]
    fn test_window_is_clamped_to_item_range() {
        let config = config(7);
        for (offset, item_count) in [(0.0, 10), (-0.4, 10), (9.0, 10), (1.2, 2), (0.0, 1)] {
            let slots = layout(offset, item_count, &config);
            assert!(slots.len() <= config.visible_item_count());
            assert!(slots.iter().all(|s| s.source_index < item_count));
        }
        assert_eq!(layout(0.0, 10, &config).len(), 4);
        assert!(layout(50.0, 10, &config).is_empty());
    }

    #[test]
    fn test_extreme_offsets_yield_nothing() {
        let config = config(5);
        for offset in [1e30, -1e30, f32::MAX, f32::MIN] {
            assert!(layout(offset, 10, &config).is_empty());
        }
        assert_eq!(layout(-2.4, 10, &config).len(), 1);
    }

    #[test]
    fn test_fractional_offset_moves_continuously() {
        let config = config(3);
        let x_at = |offset: f32| {
            layout(offset, 5, &config)
                .into_iter()
                .find(|s| s.source_index == 2)
                .unwrap()
                .rect
                .center()
                .x
        };
        let a = x_at(1.9);
        let b = x_at(2.0);
        let c = x_at(2.1);
        assert!(a > b && b > c);
        assert!(((a - b) - (b - c)).abs() < 1e-2);
    }

    #[test]
    fn test_gravity_anchors_block() {
        let mut config = config(3);
        config.set_reflection_height_fraction(0.0).unwrap();
        let bounds = LayoutBounds::new(300.0, 200.0).with_padding(Padding::new(0.0, 10.0, 0.0, 20.0));
        let engine = CoverFlowLayoutEngine::new();

        let side = |config: &CoverFlowConfig| {
            engine
                .compute_layout(1.0, 3, &bounds, config, &NoIntrinsicSize)
                .into_iter()
                .find(|s| s.source_index == 0)
                .unwrap()
                .rect
        };

        let top = side(&config);
        assert_eq!(top.top(), 10.0);

        config.set_gravity(Gravity::Bottom);
        let bottom = side(&config);
        assert!((bottom.bottom() - 180.0).abs() < 1e-3);

        config.set_gravity(Gravity::Center);
        let center = side(&config);
        assert!((center.center().y - 95.0).abs() < 1e-3);
    }

    #[test]
    fn test_wrap_content_uses_intrinsic_sizes() {
        let mut config = config(3);
        config.set_layout_mode(LayoutMode::WrapContent);
        config.set_reflection_height_fraction(0.0).unwrap();
        let items = ItemList::with_sizes(vec![
            ("a", Vec2::new(40.0, 50.0)),
            ("b", Vec2::new(60.0, 400.0)),
            ("c", Vec2::new(80.0, 50.0)),
        ]);
        let bounds = LayoutBounds::new(300.0, 200.0);
        let slots = CoverFlowLayoutEngine::new().compute_layout(1.0, 3, &bounds, &config, &items);

        let slot = |index: usize| slots.iter().find(|s| s.source_index == index).unwrap();
        assert_eq!(slot(0).content_size, Vec2::new(40.0, 50.0));
        // Taller than the row: shrunk to fit.
        assert_eq!(slot(1).content_size, Vec2::new(30.0, 200.0));
        assert!((slot(1).rect.center().x - 150.0).abs() < 1e-3);
        assert!((slot(0).rect.center().x - (150.0 - 35.0)).abs() < 1e-3);
        assert!((slot(2).rect.center().x - (150.0 + 55.0)).abs() < 1e-3);
    }

    #[test]
    fn test_reflections_follow_slots() {
        let config = config(3);
        let bounds = LayoutBounds::new(300.0, 140.0);
        let result = CoverFlowLayoutEngine::new().compute_layout_with_reflections(1.0, 3, &bounds, &config, &NoIntrinsicSize);

        assert_eq!(result.len(), 3);
        for entry in &result.entries {
            let reflection = entry.reflection.as_ref().unwrap();
            assert_eq!(reflection.source_index, entry.item.source_index);
            assert!(reflection.mirrored_rect.top() >= entry.item.rect.bottom());
        }
    }
}
