//! Corridor travel frame.
//!
//! The [`TravelFrame`] is the moving reference of the run: an anchor position
//! plus the forward and lateral axes of the corridor. Forward motion
//! (progress tick) pushes the anchor along `forward`; an intersection turn
//! rotates the whole frame about a pivot in small per-step increments, so
//! the world reorients around the drone instead of the drone yawing in world
//! space. At rest the heading is always one of the four cardinals; the final
//! maneuver step snaps it back exactly to kill float drift.

use bevy_ecs::prelude::Resource;
use glam::{Quat, Vec3};

#[derive(Resource, Debug, Clone, Copy)]
pub struct TravelFrame {
    /// Drone reference position (delivery-target anchor).
    pub anchor: Vec3,
    /// Direction of travel. Unit length, horizontal.
    pub forward: Vec3,
    /// Lateral axis, perpendicular to `forward`. Unit length, horizontal.
    pub right: Vec3,
    /// Heading in degrees, kept in [0, 360). 0 means +X.
    pub heading: f32,
}

impl Default for TravelFrame {
    fn default() -> Self {
        Self::new()
    }
}

impl TravelFrame {
    pub fn new() -> Self {
        Self {
            anchor: Vec3::ZERO,
            forward: Vec3::X,
            right: Vec3::Z,
            heading: 0.0,
        }
    }

    /// Reset to the origin, facing +X.
    pub fn reset(&mut self) {
        *self = Self::new();
    }

    /// World position of a frame-relative offset (x lateral, y vertical).
    pub fn world_offset(&self, offset: Vec3) -> Vec3 {
        self.anchor + self.right * offset.x + Vec3::Y * offset.y
    }

    /// Signed distance of `point` ahead of the anchor along `forward`.
    pub fn distance_ahead(&self, point: Vec3) -> f32 {
        (point - self.anchor).dot(self.forward)
    }

    /// One maneuver step: rotate the frame axes by `degrees` about the
    /// vertical axis and swing the anchor about `pivot` by the same angle.
    pub fn rotate_step(&mut self, degrees: f32, pivot: Vec3) {
        let q = Quat::from_rotation_y(degrees.to_radians());
        self.forward = (q * self.forward).normalize();
        self.right = (q * self.right).normalize();
        self.heading = (self.heading + degrees).rem_euclid(360.0);
        let arm = self.anchor - pivot;
        self.anchor = pivot + q * arm;
    }

    /// Snap the heading to the nearest cardinal and rebuild the axes exactly.
    pub fn snap_to_cardinal(&mut self) {
        let quadrant = ((self.heading / 90.0).round() as i32).rem_euclid(4);
        self.heading = quadrant as f32 * 90.0;
        let (forward, right) = match quadrant {
            0 => (Vec3::X, Vec3::Z),
            1 => (Vec3::NEG_Z, Vec3::X),
            2 => (Vec3::NEG_X, Vec3::NEG_Z),
            _ => (Vec3::Z, Vec3::NEG_X),
        };
        self.forward = forward;
        self.right = right;
    }
}
