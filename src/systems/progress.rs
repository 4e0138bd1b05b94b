//! Forward progress integration.
//!
//! Advances distance by `speed * dt` along the travel frame forward axis,
//! pushes the anchor the same amount, recomputes the milestone speed, and
//! publishes meters/speed value feeds on change. Suspended while a turn
//! maneuver is in flight or the drone is crash-frozen; the pause state
//! freezes it through the zeroed time scale and the playing run condition.

use bevy_ecs::prelude::*;

use crate::components::drone::Drone;
use crate::events::progress::{MetersUpdated, SpeedUpdated};
use crate::resources::gameconfig::GameConfig;
use crate::resources::progress::{Progress, speed_for_distance};
use crate::resources::travelframe::TravelFrame;
use crate::resources::turn::ActiveTurn;
use crate::resources::worldsignals::WorldSignals;
use crate::resources::worldtime::WorldTime;

pub fn progress_tick(
    time: Res<WorldTime>,
    cfg: Res<GameConfig>,
    active_turn: Res<ActiveTurn>,
    drones: Query<&Drone>,
    mut frame: ResMut<TravelFrame>,
    mut progress: ResMut<Progress>,
    mut signals: ResMut<WorldSignals>,
    mut meters_writer: MessageWriter<MetersUpdated>,
    mut speed_writer: MessageWriter<SpeedUpdated>,
) {
    if time.delta <= 0.0 || active_turn.is_turning() {
        return;
    }
    // Crash freeze: the corridor stops with the drone.
    if drones.iter().any(|d| d.is_crashing()) {
        return;
    }

    let step = progress.speed * time.delta;
    progress.distance += step;
    frame.anchor = frame.anchor + frame.forward * step;

    let meters = progress.distance.floor() as i32;
    if meters != progress.meters {
        progress.meters = meters;
        signals.set_integer("meters", meters);
        meters_writer.write(MetersUpdated { meters });
    }

    let speed = speed_for_distance(
        progress.distance,
        cfg.base_speed,
        cfg.speed_step,
        cfg.milestone_interval,
    );
    if speed != progress.speed {
        progress.speed = speed;
        signals.set_scalar("speed", speed);
        speed_writer.write(SpeedUpdated { speed });
    }
}
