//! Progress value feeds for observers (HUD, audio intensity).

use bevy_ecs::message::Message;

/// Whole meters traveled changed.
#[derive(Message, Debug, Clone, Copy)]
pub struct MetersUpdated {
    pub meters: i32,
}

/// Derived corridor speed changed (a milestone was crossed).
#[derive(Message, Debug, Clone, Copy)]
pub struct SpeedUpdated {
    pub speed: f32,
}
