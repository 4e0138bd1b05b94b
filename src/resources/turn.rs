//! Active turn maneuver task.
//!
//! A committed turn is a step-counted task advanced once per simulation
//! tick. Holding it in an `Option` makes a second concurrent maneuver
//! structurally impossible; cancellation (session abort) is dropping the
//! task.

use bevy_ecs::prelude::Resource;
use glam::Vec3;

#[derive(Debug, Clone, Copy)]
pub struct TurnTask {
    /// Remaining maneuver steps; the task completes when this reaches zero.
    pub steps_left: u32,
    /// Signed degrees applied to the travel frame each step.
    pub step_degrees: f32,
    /// Rotation pivot, above the intersection center.
    pub pivot: Vec3,
}

#[derive(Resource, Debug, Clone, Copy, Default)]
pub struct ActiveTurn(pub Option<TurnTask>);

impl ActiveTurn {
    pub fn is_turning(&self) -> bool {
        self.0.is_some()
    }

    /// Drop any in-flight maneuver without completing it.
    pub fn cancel(&mut self) {
        self.0 = None;
    }
}
