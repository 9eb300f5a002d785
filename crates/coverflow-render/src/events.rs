// crates/coverflow-render/src/events.rs
use glam::Vec2;

/// Pointer and programmatic input a host forwards to a cover flow.
///
/// Positions and deltas are in screen pixels, velocities in pixels per
/// second. Recognising these from raw device events is the host's job.
#[derive(Debug, Clone, PartialEq)]
pub enum InputEvent {
    DragBegin { position: Vec2 },
    DragMove { position: Vec2, delta: Vec2 },
    DragEnd { position: Vec2, velocity: Vec2 },
    /// Wheel or trackpad scroll, applied immediately.
    Scroll { delta: Vec2 },
    ScrollToIndex { index: isize, animate: bool },
    /// Stop any drag or animation where it is.
    Cancel,
    Resize { size: Vec2 },
}
