//! Control input state.
//!
//! Device polling is outside the simulation core; whatever front-end drives
//! the game (the autopilot in headless runs, tests, or a real input layer)
//! writes the two raw axes and the edge-triggered turn commands into this
//! resource each tick. Axes are expected in [-1, 1] before sensitivity is
//! applied.

use bevy_ecs::prelude::Resource;

#[derive(Resource, Debug, Clone, Copy, Default)]
pub struct InputState {
    /// Raw lateral axis, positive toward the frame's right.
    pub axis_x: f32,
    /// Raw vertical axis, positive up.
    pub axis_y: f32,
    /// Turn command edges, consumed by the turn system.
    pub turn_left: bool,
    pub turn_right: bool,
}

impl InputState {
    /// Clear the edge-triggered commands after they have been consumed.
    pub fn clear_commands(&mut self) {
        self.turn_left = false;
        self.turn_right = false;
    }

    pub fn reset(&mut self) {
        *self = Self::default();
    }
}
