//! Demo driver for headless runs.
//!
//! Writes the control input each tick instead of a device layer: a slow
//! sine wander over both axes keeps the drone moving through the envelope,
//! and when the GPS announces a direction at an eligible intersection the
//! autopilot issues the matching turn command.

use bevy_ecs::prelude::*;

use crate::components::drone::Drone;
use crate::components::intersection::{IntersectionRegion, TURN_LEFT, TURN_RIGHT};
use crate::components::worldposition::WorldPosition;
use crate::resources::gps::Gps;
use crate::resources::input::InputState;
use crate::resources::occupancy::TriggerOccupancy;
use crate::resources::worldtime::WorldTime;
use crate::systems::turn::can_turn;

#[derive(Resource, Debug, Clone, Copy)]
pub struct Autopilot {
    pub enabled: bool,
}

impl Default for Autopilot {
    fn default() -> Self {
        Self { enabled: true }
    }
}

pub fn autopilot_drive(
    autopilot: Res<Autopilot>,
    time: Res<WorldTime>,
    gps: Res<Gps>,
    occupancy: Res<TriggerOccupancy>,
    mut input: ResMut<InputState>,
    regions: Query<(&WorldPosition, &IntersectionRegion)>,
    drones: Query<(&Drone, &WorldPosition), Without<IntersectionRegion>>,
) {
    if !autopilot.enabled {
        return;
    }

    let t = time.elapsed;
    input.axis_x = (t * 0.7).sin() * 0.6;
    input.axis_y = (t * 0.45).cos() * 0.4;

    let Ok((drone, position)) = drones.single() else {
        return;
    };
    if drone.target_locked {
        input.axis_x = 0.0;
        input.axis_y = 0.0;
        return;
    }

    // Follow the guidance when a turn is actually on offer.
    if can_turn(&occupancy, &regions, position.pos) {
        match gps.direction {
            Some(TURN_LEFT) => input.turn_left = true,
            Some(TURN_RIGHT) => input.turn_right = true,
            _ => {}
        }
    }
}
