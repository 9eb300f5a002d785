// crates/coverflow-runtime/src/lib.rs

use std::time::Duration;

use coverflow_core::{CoverFlowConfig, Gravity, ItemSource, LayoutMode, Result, ScaleFalloff};
use coverflow_layout::{CoverFlowLayoutEngine, LayoutBounds, LayoutEngine, LayoutResult};
use coverflow_render::{CommandRenderer, DrawCommand, InputEvent, RenderResult};
use glam::{Vec2, Vec4};
use tracing::{debug, warn};

pub mod deceleration;
pub mod scroll;

pub use deceleration::*;
pub use scroll::*;

/// Release speed (items per second) below which a drag settles instead of flinging.
pub const DEFAULT_MIN_FLING_VELOCITY: f32 = 1.5;

const CLEAR_COLOR: Vec4 = Vec4::new(0.0, 0.0, 0.0, 1.0);

/// Owns the scroll position and configuration of one cover flow and turns
/// them into draw passes.
///
/// Everything runs on the caller's thread: gestures mutate the scroll
/// state, `update` advances animations by the elapsed tick time, and
/// `on_draw_frame` lays out and emits the frame's commands.
#[derive(Debug)]
pub struct CoverFlowController<S: ItemSource> {
    config: CoverFlowConfig,
    source: Option<S>,
    item_count: usize,
    scroll: ScrollState,

    layout_engine: Box<dyn LayoutEngine>,
    deceleration: Box<dyn DecelerationModel>,
    min_fling_velocity: f32,

    bounds: LayoutBounds,
    needs_render: bool,
    frame_count: u64,
}

impl<S: ItemSource> CoverFlowController<S> {
    pub fn new(config: CoverFlowConfig) -> Self {
        Self {
            config,
            source: None,
            item_count: 0,
            scroll: ScrollState::new(),
            layout_engine: Box::new(CoverFlowLayoutEngine::new()),
            deceleration: Box::new(ExponentialDecay::default()),
            min_fling_velocity: DEFAULT_MIN_FLING_VELOCITY,
            bounds: LayoutBounds::default(),
            needs_render: true,
            frame_count: 0,
        }
    }

    pub fn with_layout_engine(mut self, layout_engine: Box<dyn LayoutEngine>) -> Self {
        self.layout_engine = layout_engine;
        self
    }

    pub fn with_deceleration(mut self, deceleration: Box<dyn DecelerationModel>) -> Self {
        self.deceleration = deceleration;
        self
    }

    pub fn with_min_fling_velocity(mut self, velocity: f32) -> Self {
        self.min_fling_velocity = velocity.abs();
        self
    }

    pub fn with_bounds(mut self, bounds: LayoutBounds) -> Self {
        self.bounds = bounds;
        self
    }

    // --- Accessors ---

    pub fn config(&self) -> &CoverFlowConfig {
        &self.config
    }

    pub fn source(&self) -> Option<&S> {
        self.source.as_ref()
    }

    pub fn item_count(&self) -> usize {
        self.item_count
    }

    pub fn offset(&self) -> f32 {
        self.scroll.offset
    }

    pub fn phase(&self) -> ScrollPhase {
        self.scroll.phase
    }

    pub fn bounds(&self) -> LayoutBounds {
        self.bounds
    }

    pub fn needs_render(&self) -> bool {
        self.needs_render
    }

    pub fn frame_count(&self) -> u64 {
        self.frame_count
    }

    /// Index of the item nearest the centre.
    pub fn current_index(&self) -> Option<usize> {
        if self.item_count == 0 {
            return None;
        }
        Some(round_half_up(self.scroll.offset) as usize)
    }

    // --- Configuration ---

    pub fn set_visible_item_count(&mut self, count: usize) -> Result<()> {
        self.config.set_visible_item_count(count)?;
        self.clamp_scroll();
        self.invalidate();
        Ok(())
    }

    pub fn set_lowest_alpha(&mut self, lowest_alpha: u8) {
        self.config.set_lowest_alpha(lowest_alpha);
        self.invalidate();
    }

    pub fn set_reflection_height_fraction(&mut self, fraction: f32) -> Result<()> {
        self.config.set_reflection_height_fraction(fraction)?;
        self.invalidate();
        Ok(())
    }

    pub fn set_reflection_gap(&mut self, gap: f32) -> Result<()> {
        self.config.set_reflection_gap(gap)?;
        self.invalidate();
        Ok(())
    }

    pub fn set_gravity(&mut self, gravity: Gravity) {
        self.config.set_gravity(gravity);
        self.invalidate();
    }

    pub fn set_layout_mode(&mut self, layout_mode: LayoutMode) {
        self.config.set_layout_mode(layout_mode);
        self.invalidate();
    }

    pub fn set_min_scale(&mut self, min_scale: f32) -> Result<()> {
        self.config.set_min_scale(min_scale)?;
        self.invalidate();
        Ok(())
    }

    pub fn set_scale_falloff(&mut self, falloff: ScaleFalloff) {
        self.config.set_scale_falloff(falloff);
        self.invalidate();
    }

    pub fn set_bounds(&mut self, bounds: LayoutBounds) {
        if self.bounds != bounds {
            self.bounds = bounds;
            self.invalidate();
        }
    }

    /// Replace the item source. The offset survives unless it no longer
    /// fits the new item range.
    pub fn set_item_source(&mut self, source: S) {
        self.item_count = source.item_count();
        self.source = Some(source);
        debug!("Item source replaced: {} items", self.item_count);
        self.clamp_scroll();
        self.invalidate();
    }

    // --- Scrolling ---

    /// Move the offset immediately. Stops any running animation.
    pub fn scroll_by(&mut self, delta: f32) {
        if self.scroll.phase.is_animating() {
            self.stop_animation();
        }
        self.set_offset(self.scroll.offset + delta);
    }

    /// Centre item `index`, clamped into the item range.
    pub fn scroll_to_index(&mut self, index: isize, animate: bool) {
        if self.item_count == 0 {
            debug!("scroll_to_index({}) ignored: no items", index);
            return;
        }

        let last = self.item_count as isize - 1;
        let clamped = index.clamp(0, last);
        if clamped != index {
            debug!("scroll_to_index({}) clamped to {}", index, clamped);
        }
        let target = clamped as f32;

        if !animate || self.scroll.offset == target {
            self.stop_animation();
            self.set_offset(target);
            return;
        }

        self.start_animation(target, ScrollPhase::Settling);
    }

    pub fn begin_drag(&mut self) {
        if self.scroll.phase == ScrollPhase::Dragging {
            return;
        }
        self.scroll.animation = None;
        self.transition(ScrollPhase::Dragging);
    }

    /// Drag by `delta` items. Ignored unless a drag is in progress.
    pub fn drag_by(&mut self, delta: f32) {
        if self.scroll.phase != ScrollPhase::Dragging {
            debug!("drag_by({:.3}) ignored in {:?}", delta, self.scroll.phase);
            return;
        }
        self.set_offset(self.scroll.offset + delta);
    }

    /// Release a drag with `velocity` in items per second.
    pub fn end_drag(&mut self, velocity: f32) {
        if self.scroll.phase != ScrollPhase::Dragging {
            debug!("end_drag ignored in {:?}", self.scroll.phase);
            return;
        }

        if velocity.is_finite() && velocity.abs() >= self.min_fling_velocity && self.item_count > 0 {
            let resting = self.scroll.offset + self.deceleration.distance(velocity);
            let target = round_half_up(resting).clamp(0.0, self.max_offset());
            debug!("Fling v={:.2} resting={:.3} target={}", velocity, resting, target);
            self.start_animation(target, ScrollPhase::Flinging);
        } else {
            let target = round_half_up(self.scroll.offset).clamp(0.0, self.max_offset());
            self.start_animation(target, ScrollPhase::Settling);
        }
    }

    /// Halt any drag or animation at the current offset.
    pub fn cancel(&mut self) {
        if self.scroll.phase == ScrollPhase::Idle {
            return;
        }
        self.stop_animation();
    }

    /// Advance animations by one external tick.
    ///
    /// Returns true when the next frame needs to be drawn.
    pub fn update(&mut self, elapsed: Duration) -> bool {
        if let Some(animation) = self.scroll.animation.as_mut() {
            let offset = animation.advance(elapsed, self.deceleration.as_ref());
            let finished = animation.is_finished();
            if offset != self.scroll.offset {
                self.scroll.offset = offset;
                self.needs_render = true;
            }
            if finished {
                self.scroll.animation = None;
                self.transition(ScrollPhase::Idle);
            }
        }
        self.needs_render
    }

    pub fn handle_input(&mut self, event: InputEvent) {
        let step = self.layout_engine.slot_step(&self.bounds, &self.config);
        let to_items = |pixels: f32| if step > 0.0 { pixels / step } else { 0.0 };

        match event {
            InputEvent::DragBegin { .. } => self.begin_drag(),
            InputEvent::DragMove { delta, .. } => self.drag_by(-to_items(delta.x)),
            InputEvent::DragEnd { velocity, .. } => self.end_drag(-to_items(velocity.x)),
            InputEvent::Scroll { delta } => {
                let dominant = if delta.x.abs() >= delta.y.abs() { delta.x } else { delta.y };
                self.scroll_by(to_items(dominant));
            }
            InputEvent::ScrollToIndex { index, animate } => self.scroll_to_index(index, animate),
            InputEvent::Cancel => self.cancel(),
            InputEvent::Resize { size } => {
                let mut bounds = self.bounds;
                bounds.container.size = size;
                self.set_bounds(bounds);
            }
        }
    }

    // --- Drawing ---

    /// Lay out the current frame without producing commands.
    pub fn layout(&self, bounds: &LayoutBounds) -> LayoutResult {
        let Some(source) = self.source.as_ref() else {
            return LayoutResult::default();
        };
        self.layout_engine.compute_layout_with_reflections(
            self.scroll.offset,
            self.item_count,
            bounds,
            &self.config,
            source,
        )
    }

    /// Lay out and emit the frame's draw commands, back to front.
    pub fn on_draw_frame(&mut self, bounds: LayoutBounds) -> Vec<DrawCommand<S::Handle>> {
        self.bounds = bounds;
        let result = self.layout(&bounds);
        let mut commands = Vec::with_capacity(result.len() * 2);

        if let Some(source) = self.source.as_ref() {
            for entry in &result.entries {
                let Some(content) = source.item_at(entry.item.source_index) else {
                    warn!("Item source has no item {}; skipping", entry.item.source_index);
                    continue;
                };
                if let Some(reflection) = &entry.reflection {
                    commands.push(DrawCommand::item(content.clone(), &entry.item));
                    commands.push(DrawCommand::reflection(content, &entry.item, reflection));
                } else {
                    commands.push(DrawCommand::item(content, &entry.item));
                }
            }
        }

        self.needs_render = false;
        self.frame_count += 1;
        commands
    }

    /// Draw one frame onto `renderer`.
    pub fn render<R>(&mut self, renderer: &mut R, bounds: LayoutBounds) -> RenderResult<()>
    where
        R: CommandRenderer<Content = S::Handle>,
    {
        let commands = self.on_draw_frame(bounds);
        let mut context = renderer.begin_frame(CLEAR_COLOR)?;
        // The frame is closed even when painting fails.
        let executed = renderer.execute_commands(&mut context, &commands);
        let ended = renderer.end_frame(context);
        executed.and(ended)
    }

    /// Bounds covering a renderer's whole viewport, keeping current padding.
    pub fn bounds_for_viewport(&self, viewport: Vec2) -> LayoutBounds {
        let mut bounds = self.bounds;
        bounds.container.position = Vec2::ZERO;
        bounds.container.size = viewport;
        bounds
    }

    // --- Internals ---

    fn max_offset(&self) -> f32 {
        self.item_count.saturating_sub(1) as f32
    }

    fn set_offset(&mut self, offset: f32) {
        let offset = offset.clamp(0.0, self.max_offset());
        if offset != self.scroll.offset {
            self.scroll.offset = offset;
            self.invalidate();
        }
    }

    fn clamp_scroll(&mut self) {
        let max_offset = self.max_offset();
        if self.scroll.clamp_to(max_offset) {
            debug!("Scroll clamped to offset {:.3} ({:?})", self.scroll.offset, self.scroll.phase);
        }
    }

    fn start_animation(&mut self, target: f32, phase: ScrollPhase) {
        if self.scroll.offset == target {
            self.scroll.animation = None;
            self.transition(ScrollPhase::Idle);
            return;
        }
        let animation = OffsetAnimation::toward(self.scroll.offset, target, self.deceleration.as_ref());
        debug!(
            "Animating {:.3} -> {} (v0={:.2})",
            self.scroll.offset,
            target,
            animation.initial_velocity()
        );
        self.scroll.animation = Some(animation);
        self.transition(phase);
        self.invalidate();
    }

    fn stop_animation(&mut self) {
        self.scroll.animation = None;
        self.transition(ScrollPhase::Idle);
    }

    fn transition(&mut self, phase: ScrollPhase) {
        if self.scroll.phase != phase {
            debug!("Scroll phase {:?} -> {:?} at {:.3}", self.scroll.phase, phase, self.scroll.offset);
            self.scroll.phase = phase;
        }
    }

    fn invalidate(&mut self) {
        self.needs_render = true;
    }
}

fn round_half_up(offset: f32) -> f32 {
    (offset + 0.5).floor()
}

#[cfg(test)]
mod tests {
    use super::*;
    use coverflow_core::{CoverFlowError, ItemList};
    use coverflow_render::{RecordingContext, RecordingRenderer, RenderError, Renderer};

    /// Recording surface whose next `execute_commands` can be made to fail.
    struct FlakyRenderer {
        inner: RecordingRenderer<String>,
        fail_next: bool,
    }

    impl Renderer for FlakyRenderer {
        type Surface = Vec2;
        type Context = RecordingContext;

        fn initialize(surface: Vec2) -> RenderResult<Self> {
            Ok(Self { inner: RecordingRenderer::initialize(surface)?, fail_next: false })
        }

        fn begin_frame(&mut self, clear_color: Vec4) -> RenderResult<RecordingContext> {
            self.inner.begin_frame(clear_color)
        }

        fn end_frame(&mut self, context: RecordingContext) -> RenderResult<()> {
            self.inner.end_frame(context)
        }

        fn resize(&mut self, new_size: Vec2) -> RenderResult<()> {
            self.inner.resize(new_size)
        }

        fn viewport_size(&self) -> Vec2 {
            self.inner.viewport_size()
        }
    }

    impl CommandRenderer for FlakyRenderer {
        type Content = String;

        fn execute_commands(
            &mut self,
            context: &mut RecordingContext,
            commands: &[DrawCommand<String>],
        ) -> RenderResult<()> {
            if std::mem::take(&mut self.fail_next) {
                return Err(RenderError::RenderFailed("surface lost".to_string()));
            }
            self.inner.execute_commands(context, commands)
        }
    }

    fn items(count: usize) -> ItemList<String> {
        ItemList::new((0..count).map(|i| format!("item-{i}")).collect())
    }

    fn controller(visible: usize, count: usize) -> CoverFlowController<ItemList<String>> {
        let mut config = CoverFlowConfig::default();
        config.set_visible_item_count(visible).unwrap();
        let mut controller = CoverFlowController::new(config).with_bounds(LayoutBounds::new(500.0, 260.0));
        controller.set_item_source(items(count));
        controller
    }

    fn run_until_idle(controller: &mut CoverFlowController<ItemList<String>>) {
        for _ in 0..1000 {
            controller.update(Duration::from_millis(16));
            if controller.phase() == ScrollPhase::Idle {
                return;
            }
        }
        panic!("animation did not finish");
    }

    #[test]
    fn test_invalid_visible_count_does_not_mutate() {
        let mut controller = controller(5, 10);
        controller.scroll_to_index(4, false);

        assert_eq!(
            controller.set_visible_item_count(4),
            Err(CoverFlowError::InvalidVisibleItemCount(4))
        );
        assert_eq!(controller.set_visible_item_count(1), Err(CoverFlowError::InvalidVisibleItemCount(1)));
        assert_eq!(controller.config().visible_item_count(), 5);
        assert_eq!(controller.offset(), 4.0);
    }

    #[test]
    fn test_scroll_to_index_then_draw_centres_item() {
        let mut controller = controller(5, 10);
        for (requested, expected) in [(3, 3), (-4, 0), (42, 9)] {
            controller.scroll_to_index(requested, false);
            let result = controller.layout(&controller.bounds());
            let centre = result.slots().last().unwrap();
            assert_eq!(centre.source_index, expected);
            assert_eq!(centre.center_distance, 0.0);
            assert_eq!(centre.alpha, 255);
            assert_eq!(centre.scale, 1.0);
        }
    }

    #[test]
    fn test_draw_frame_pairs_items_with_reflections() {
        let mut controller = controller(3, 10);
        controller.scroll_to_index(5, false);
        let commands = controller.on_draw_frame(LayoutBounds::new(300.0, 140.0));

        assert_eq!(commands.len(), 6);
        assert!(!commands[0].is_reflection());
        assert!(commands[1].is_reflection());
        assert_eq!(commands[0].source_index(), commands[1].source_index());
        assert_eq!(commands[4].source_index(), 5);
        assert_eq!(commands[4].content(), "item-5");
        assert!(!controller.needs_render());
        assert_eq!(controller.frame_count(), 1);
    }

    #[test]
    fn test_disabled_reflection_emits_items_only() {
        let mut controller = controller(5, 10);
        controller.set_reflection_height_fraction(0.0).unwrap();
        controller.scroll_to_index(2, false);
        let commands = controller.on_draw_frame(LayoutBounds::new(500.0, 200.0));
        assert_eq!(commands.len(), 5);
        assert!(commands.iter().all(|c| !c.is_reflection()));
    }

    #[test]
    fn test_empty_source_draws_nothing() {
        let mut controller: CoverFlowController<ItemList<String>> = CoverFlowController::new(CoverFlowConfig::default());
        assert!(controller.on_draw_frame(LayoutBounds::new(300.0, 200.0)).is_empty());

        controller.set_item_source(items(0));
        controller.scroll_to_index(3, true);
        assert_eq!(controller.phase(), ScrollPhase::Idle);
        assert!(controller.on_draw_frame(LayoutBounds::new(300.0, 200.0)).is_empty());
        assert_eq!(controller.current_index(), None);
    }

    #[test]
    fn test_source_swap_clamps_only_when_needed() {
        let mut controller = controller(3, 10);
        controller.scroll_to_index(4, false);

        controller.set_item_source(items(8));
        assert_eq!(controller.offset(), 4.0);

        controller.set_item_source(items(3));
        assert_eq!(controller.offset(), 2.0);

        controller.set_item_source(items(0));
        assert_eq!(controller.offset(), 0.0);
    }

    #[test]
    fn test_animated_scroll_settles_on_index() {
        let mut controller = controller(5, 10);
        controller.scroll_to_index(6, true);
        assert_eq!(controller.phase(), ScrollPhase::Settling);

        assert!(controller.update(Duration::from_millis(16)));
        let midway = controller.offset();
        assert!(midway > 0.0 && midway < 6.0);

        run_until_idle(&mut controller);
        assert_eq!(controller.offset(), 6.0);
    }

    #[test]
    fn test_slow_release_snaps_to_nearest() {
        let mut controller = controller(5, 10);
        controller.scroll_to_index(2, false);
        controller.begin_drag();
        controller.drag_by(0.6);
        assert_eq!(controller.phase(), ScrollPhase::Dragging);
        assert!((controller.offset() - 2.6).abs() < 1e-5);

        controller.end_drag(0.2);
        assert_eq!(controller.phase(), ScrollPhase::Settling);
        run_until_idle(&mut controller);
        assert_eq!(controller.offset(), 3.0);
    }

    #[test]
    fn test_release_on_integer_goes_straight_to_idle() {
        let mut controller = controller(5, 10);
        controller.begin_drag();
        controller.drag_by(2.0);
        controller.end_drag(0.0);
        assert_eq!(controller.phase(), ScrollPhase::Idle);
        assert_eq!(controller.offset(), 2.0);
    }

    #[test]
    fn test_fling_lands_on_an_index() {
        let mut controller = controller(5, 20);
        controller.scroll_to_index(2, false);
        controller.begin_drag();
        controller.drag_by(0.3);
        controller.end_drag(12.0);
        assert_eq!(controller.phase(), ScrollPhase::Flinging);

        run_until_idle(&mut controller);
        let offset = controller.offset();
        assert_eq!(offset, offset.round());
        assert!(offset > 3.0);
    }

    #[test]
    fn test_fling_is_clamped_to_last_item() {
        let mut controller = controller(3, 5);
        controller.scroll_to_index(3, false);
        controller.begin_drag();
        controller.end_drag(50.0);
        run_until_idle(&mut controller);
        assert_eq!(controller.offset(), 4.0);
    }

    #[test]
    fn test_cancel_stops_without_snapping() {
        let mut controller = controller(5, 10);
        controller.scroll_to_index(8, true);
        controller.update(Duration::from_millis(50));
        let offset = controller.offset();
        assert!(offset.fract() != 0.0);

        controller.cancel();
        assert_eq!(controller.phase(), ScrollPhase::Idle);
        controller.update(Duration::from_millis(50));
        assert_eq!(controller.offset(), offset);
    }

    #[test]
    fn test_drag_interrupts_settle() {
        let mut controller = controller(5, 10);
        controller.scroll_to_index(5, true);
        controller.update(Duration::from_millis(32));
        controller.begin_drag();
        assert_eq!(controller.phase(), ScrollPhase::Dragging);

        let offset = controller.offset();
        controller.update(Duration::from_millis(100));
        assert_eq!(controller.offset(), offset);
    }

    #[test]
    fn test_drag_interrupts_fling() {
        let mut controller = controller(5, 20);
        controller.begin_drag();
        controller.end_drag(15.0);
        assert_eq!(controller.phase(), ScrollPhase::Flinging);
        controller.update(Duration::from_millis(48));

        controller.begin_drag();
        assert_eq!(controller.phase(), ScrollPhase::Dragging);
        let offset = controller.offset();
        assert!(offset > 0.0);

        controller.update(Duration::from_millis(100));
        assert_eq!(controller.offset(), offset);
        assert_eq!(controller.phase(), ScrollPhase::Dragging);
    }

    #[test]
    fn test_extreme_release_velocity_stays_in_range() {
        let mut controller = controller(3, 5);
        controller.begin_drag();
        controller.end_drag(f32::MAX);
        assert_eq!(controller.phase(), ScrollPhase::Flinging);
        run_until_idle(&mut controller);
        assert_eq!(controller.offset(), 4.0);

        for velocity in [f32::INFINITY, f32::NEG_INFINITY, f32::NAN] {
            controller.begin_drag();
            controller.drag_by(-0.3);
            controller.end_drag(velocity);
            assert_eq!(controller.phase(), ScrollPhase::Settling);
            run_until_idle(&mut controller);
            assert_eq!(controller.offset(), 4.0);
        }
    }

    #[test]
    fn test_failed_paint_still_closes_frame() {
        let mut controller = controller(3, 4);
        let mut renderer = FlakyRenderer::initialize(Vec2::new(300.0, 140.0)).unwrap();
        let bounds = controller.bounds_for_viewport(renderer.viewport_size());

        renderer.fail_next = true;
        assert!(matches!(
            controller.render(&mut renderer, bounds),
            Err(RenderError::RenderFailed(_))
        ));

        controller.render(&mut renderer, bounds).unwrap();
        let frames = renderer.inner.frames();
        assert_eq!(frames.len(), 2);
        assert!(frames[0].is_empty());
        assert_eq!(frames[1].len(), 4);
    }

    #[test]
    fn test_drag_outside_gesture_is_ignored() {
        let mut controller = controller(5, 10);
        controller.drag_by(1.0);
        controller.end_drag(20.0);
        assert_eq!(controller.offset(), 0.0);
        assert_eq!(controller.phase(), ScrollPhase::Idle);
    }

    #[test]
    fn test_pixel_input_follows_finger() {
        let mut controller = controller(5, 10);
        controller.scroll_to_index(4, false);

        // 500px wide with 5 visible: 100px per item.
        controller.handle_input(InputEvent::DragBegin { position: Vec2::new(250.0, 50.0) });
        controller.handle_input(InputEvent::DragMove {
            position: Vec2::new(200.0, 50.0),
            delta: Vec2::new(-50.0, 0.0),
        });
        assert!((controller.offset() - 4.5).abs() < 1e-5);

        controller.handle_input(InputEvent::Cancel);
        assert_eq!(controller.phase(), ScrollPhase::Idle);

        controller.handle_input(InputEvent::Scroll { delta: Vec2::new(0.0, 150.0) });
        assert!((controller.offset() - 6.0).abs() < 1e-5);
    }

    #[test]
    fn test_render_records_frame() {
        let mut controller = controller(3, 4);
        let mut renderer = RecordingRenderer::<String>::initialize(Vec2::new(300.0, 140.0)).unwrap();
        let bounds = controller.bounds_for_viewport(renderer.viewport_size());
        controller.render(&mut renderer, bounds).unwrap();

        let frame = renderer.last_frame().unwrap();
        // Offset 0: items 0 and 1, each with a reflection.
        assert_eq!(frame.len(), 4);
        assert_eq!(frame.last().unwrap().source_index(), 0);
    }
}
