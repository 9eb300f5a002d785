// crates/coverflow-runtime/src/deceleration.rs
//! Deceleration models that turn a release velocity into offset motion.
//!
//! Velocities are in items per second and displacements in items, so a
//! model is independent of the on-screen slot width.

use std::fmt::Debug;
use std::time::Duration;

pub trait DecelerationModel: Debug {
    /// Offset travelled `elapsed` after starting at `initial_velocity`.
    fn displacement(&self, initial_velocity: f32, elapsed: Duration) -> f32;

    /// Velocity remaining after `elapsed`.
    fn velocity(&self, initial_velocity: f32, elapsed: Duration) -> f32;

    /// Total offset travelled before the motion ends.
    fn distance(&self, initial_velocity: f32) -> f32 {
        self.displacement(initial_velocity, self.duration(initial_velocity))
    }

    /// Initial velocity that comes to rest exactly `distance` away.
    fn velocity_for_distance(&self, distance: f32) -> f32;

    /// Time until the velocity drops below the model's stop threshold.
    fn duration(&self, initial_velocity: f32) -> Duration;
}

/// Friction proportional to velocity: `v(t) = v0 * e^(-k t)`.
///
/// Motion ends once `|v|` falls under `stop_velocity`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ExponentialDecay {
    pub friction: f32,
    pub stop_velocity: f32,
}

impl Default for ExponentialDecay {
    fn default() -> Self {
        Self {
            friction: 4.0,
            stop_velocity: 0.05,
        }
    }
}

impl ExponentialDecay {
    pub fn new(friction: f32, stop_velocity: f32) -> Self {
        Self {
            friction: friction.max(f32::EPSILON),
            stop_velocity: stop_velocity.max(f32::EPSILON),
        }
    }
}

impl DecelerationModel for ExponentialDecay {
    fn displacement(&self, initial_velocity: f32, elapsed: Duration) -> f32 {
        let decay = (-self.friction * elapsed.as_secs_f32()).exp();
        initial_velocity / self.friction * (1.0 - decay)
    }

    fn velocity(&self, initial_velocity: f32, elapsed: Duration) -> f32 {
        initial_velocity * (-self.friction * elapsed.as_secs_f32()).exp()
    }

    fn velocity_for_distance(&self, distance: f32) -> f32 {
        if distance == 0.0 {
            return 0.0;
        }
        // The stop threshold cuts off `stop_velocity / friction` of travel.
        distance * self.friction + self.stop_velocity.copysign(distance)
    }

    fn duration(&self, initial_velocity: f32) -> Duration {
        let speed = initial_velocity.abs();
        if speed <= self.stop_velocity {
            return Duration::ZERO;
        }
        Duration::try_from_secs_f32((speed / self.stop_velocity).ln() / self.friction).unwrap_or(Duration::MAX)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_velocity_decays_to_threshold() {
        let model = ExponentialDecay::default();
        let duration = model.duration(8.0);
        let remaining = model.velocity(8.0, duration);
        assert!((remaining - model.stop_velocity).abs() < 1e-3);
        assert!(model.velocity(8.0, duration / 2) < 8.0);
    }

    #[test]
    fn test_velocity_for_distance_lands_on_target() {
        let model = ExponentialDecay::default();
        for distance in [3.0_f32, -2.0, 0.25, -0.4] {
            let velocity = model.velocity_for_distance(distance);
            assert_eq!(velocity.signum(), distance.signum());
            assert!((model.distance(velocity) - distance).abs() < 1e-3);
        }
    }

    #[test]
    fn test_slow_motion_has_no_duration() {
        let model = ExponentialDecay::default();
        assert_eq!(model.duration(0.01), Duration::ZERO);
        assert_eq!(model.velocity_for_distance(0.0), 0.0);
        assert_eq!(model.distance(0.01), 0.0);
    }

    #[test]
    fn test_huge_velocity_has_bounded_motion() {
        let model = ExponentialDecay::default();
        assert_eq!(model.duration(f32::MAX), Duration::MAX);
        assert_eq!(model.duration(f32::INFINITY), Duration::MAX);
        assert!(model.distance(f32::MAX).is_finite());
        assert!(model.displacement(1e30, Duration::MAX).is_finite());
    }

    #[test]
    fn test_displacement_is_monotonic() {
        let model = ExponentialDecay::new(3.0, 0.1);
        let mut last = 0.0;
        for ms in (0..2000).step_by(50) {
            let x = model.displacement(5.0, Duration::from_millis(ms));
            assert!(x >= last);
            last = x;
        }
    }
}
