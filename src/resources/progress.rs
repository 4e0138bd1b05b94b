//! Forward progress state.
//!
//! Distance is integrated once per tick while the session is playing and
//! neither crash-frozen nor mid-turn. Speed is a piecewise function of
//! distance: every `milestone_interval` traveled adds `speed_step`, up to a
//! cap of two steps above the base.

use bevy_ecs::prelude::Resource;

/// Derived corridor speed for a traveled distance. Monotonic and saturating:
/// `clamp(base + floor(d / milestone) * step, base, base + 2*step)`.
pub fn speed_for_distance(distance: f32, base: f32, step: f32, milestone: f32) -> f32 {
    let milestones = (distance / milestone).floor();
    (base + milestones * step).clamp(base, base + 2.0 * step)
}

#[derive(Resource, Debug, Clone, Copy)]
pub struct Progress {
    /// Distance traveled this run, in world units. Never decreases.
    pub distance: f32,
    /// Whole meters last published to observers.
    pub meters: i32,
    /// Current corridor speed.
    pub speed: f32,
}

impl Progress {
    pub fn new(base_speed: f32) -> Self {
        Self {
            distance: 0.0,
            meters: 0,
            speed: base_speed,
        }
    }

    pub fn reset(&mut self, base_speed: f32) {
        *self = Self::new(base_speed);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPSILON: f32 = 1e-6;

    fn approx_eq(a: f32, b: f32) -> bool {
        (a - b).abs() < EPSILON
    }

    #[test]
    fn test_speed_at_zero_is_base() {
        assert!(approx_eq(speed_for_distance(0.0, 1.0, 0.25, 100.0), 1.0));
    }

    #[test]
    fn test_speed_below_first_milestone() {
        assert!(approx_eq(speed_for_distance(99.9, 1.0, 0.25, 100.0), 1.0));
    }

    #[test]
    fn test_speed_at_reference_distance_250() {
        // distance 250, milestone 100, base 1, step 0.25 => 1.5
        assert!(approx_eq(speed_for_distance(250.0, 1.0, 0.25, 100.0), 1.5));
    }

    #[test]
    fn test_speed_saturates_at_two_steps() {
        assert!(approx_eq(speed_for_distance(1e6, 1.0, 0.25, 100.0), 1.5));
    }

    #[test]
    fn test_speed_is_monotone_in_distance() {
        let mut last = 0.0;
        for d in 0..4000 {
            let s = speed_for_distance(d as f32, 1.0, 0.25, 100.0);
            assert!(s >= last, "speed decreased at d={}", d);
            last = s;
        }
    }
}
