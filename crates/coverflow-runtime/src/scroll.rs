// crates/coverflow-runtime/src/scroll.rs
use std::time::Duration;

use crate::deceleration::DecelerationModel;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ScrollPhase {
    #[default]
    Idle,
    Dragging,
    Flinging,
    Settling,
}

impl ScrollPhase {
    pub fn is_animating(&self) -> bool {
        matches!(self, ScrollPhase::Flinging | ScrollPhase::Settling)
    }
}

/// Offset animation from `start` to an exact resting `target`.
#[derive(Debug, Clone, PartialEq)]
pub struct OffsetAnimation {
    start: f32,
    target: f32,
    initial_velocity: f32,
    elapsed: Duration,
    duration: Duration,
}

impl OffsetAnimation {
    pub fn toward(start: f32, target: f32, model: &dyn DecelerationModel) -> Self {
        let initial_velocity = model.velocity_for_distance(target - start);
        Self {
            start,
            target,
            initial_velocity,
            elapsed: Duration::ZERO,
            duration: model.duration(initial_velocity),
        }
    }

    pub fn target(&self) -> f32 {
        self.target
    }

    pub fn initial_velocity(&self) -> f32 {
        self.initial_velocity
    }

    pub fn is_finished(&self) -> bool {
        self.elapsed >= self.duration
    }

    /// Advance by `dt` and return the new offset. Lands exactly on the
    /// target once the model's duration has elapsed.
    pub fn advance(&mut self, dt: Duration, model: &dyn DecelerationModel) -> f32 {
        self.elapsed = self.elapsed.saturating_add(dt);
        if self.is_finished() {
            return self.target;
        }

        let travelled = model.displacement(self.initial_velocity, self.elapsed);
        let (low, high) = if self.start <= self.target {
            (self.start, self.target)
        } else {
            (self.target, self.start)
        };
        (self.start + travelled).clamp(low, high)
    }
}

/// Continuous scroll position and the phase driving it.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ScrollState {
    pub offset: f32,
    pub phase: ScrollPhase,
    pub animation: Option<OffsetAnimation>,
}

impl ScrollState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Keep the offset (and any animation target) inside `[0, max_offset]`.
    ///
    /// Returns true when something had to change.
    pub fn clamp_to(&mut self, max_offset: f32) -> bool {
        let mut changed = false;
        let clamped = self.offset.clamp(0.0, max_offset);
        if clamped != self.offset {
            self.offset = clamped;
            changed = true;
        }

        let target_out_of_range = self
            .animation
            .as_ref()
            .is_some_and(|animation| animation.target() < 0.0 || animation.target() > max_offset);
        if target_out_of_range {
            self.animation = None;
            self.phase = ScrollPhase::Idle;
            changed = true;
        }
        changed
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::deceleration::ExponentialDecay;

    #[test]
    fn test_animation_lands_exactly_on_target() {
        let model = ExponentialDecay::default();
        let mut animation = OffsetAnimation::toward(2.3, 5.0, &model);
        let mut offset = 2.3;
        let mut frames = 0;
        while !animation.is_finished() {
            let next = animation.advance(Duration::from_millis(16), &model);
            assert!(next >= offset);
            assert!(next <= 5.0);
            offset = next;
            frames += 1;
            assert!(frames < 1000);
        }
        assert_eq!(offset, 5.0);
    }

    #[test]
    fn test_backward_animation_stays_between_endpoints() {
        let model = ExponentialDecay::default();
        let mut animation = OffsetAnimation::toward(4.0, 1.0, &model);
        assert!(animation.initial_velocity() < 0.0);
        let offset = animation.advance(Duration::from_millis(100), &model);
        assert!(offset < 4.0 && offset > 1.0);
    }

    #[test]
    fn test_clamp_cancels_out_of_range_animation() {
        let model = ExponentialDecay::default();
        let mut state = ScrollState {
            offset: 6.5,
            phase: ScrollPhase::Settling,
            animation: Some(OffsetAnimation::toward(6.5, 7.0, &model)),
        };

        assert!(state.clamp_to(3.0));
        assert_eq!(state.offset, 3.0);
        assert_eq!(state.phase, ScrollPhase::Idle);
        assert!(state.animation.is_none());
        assert!(!state.clamp_to(3.0));
    }
}
