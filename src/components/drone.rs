//! Player drone controller state.
//!
//! The drone chases a target offset inside a bounded lateral/vertical
//! envelope relative to the travel frame anchor. `can_move` gates the
//! position chase, `target_locked` gates input integration; both are cleared
//! during a turn maneuver and after a crash. A crash starts the
//! `crash_timer` countdown, after which the drone is destroyed and the run
//! ends.

use bevy_ecs::prelude::Component;
use glam::Vec3;

#[derive(Component, Debug, Clone, Copy)]
pub struct Drone {
    /// Current offset from the travel frame anchor (x lateral, y vertical).
    pub offset: Vec3,
    /// Input-integrated target offset the drone moves toward.
    pub target_offset: Vec3,
    /// False while turning or crashing: the position chase is suspended.
    pub can_move: bool,
    /// True while turning or crashing: raw input reads as zero.
    pub target_locked: bool,
    /// Banking angle in degrees, wrapped into [0, 360).
    pub bank_angle: f32,
    /// Remaining seconds of the crash freeze, when crashing.
    pub crash_timer: Option<f32>,
}

impl Drone {
    pub fn new() -> Self {
        Self {
            offset: Vec3::ZERO,
            target_offset: Vec3::ZERO,
            can_move: true,
            target_locked: false,
            bank_angle: 0.0,
            crash_timer: None,
        }
    }

    pub fn is_crashing(&self) -> bool {
        self.crash_timer.is_some()
    }

    /// Signed bank angle in (-180, 180], from the wrapped stored angle.
    pub fn signed_bank(&self) -> f32 {
        if self.bank_angle > 180.0 {
            self.bank_angle - 360.0
        } else {
            self.bank_angle
        }
    }
}

impl Default for Drone {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_drone_is_movable() {
        let d = Drone::new();
        assert!(d.can_move);
        assert!(!d.target_locked);
        assert!(!d.is_crashing());
    }

    #[test]
    fn test_signed_bank_wraps() {
        let mut d = Drone::new();
        d.bank_angle = 350.0;
        assert_eq!(d.signed_bank(), -10.0);
        d.bank_angle = 20.0;
        assert_eq!(d.signed_bank(), 20.0);
    }
}
