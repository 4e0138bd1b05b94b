//! Intersection coordination.
//!
//! Each intersection region offers exactly one turn per occupancy. Entering
//! the region during a delivery leg announces the guided exit direction;
//! leaving it without having turned that way ends the leg as a navigation
//! failure. A committed turn becomes a step-counted [`TurnTask`] advanced
//! once per tick: every step rotates the travel frame by a fixed small
//! angle about a pivot above the region, and the final step snaps the
//! heading back to a cardinal, recenters the anchor on the pivot, rebases
//! the generation cursor there, and releases the drone lock.

use bevy_ecs::observer::On;
use bevy_ecs::prelude::*;
use glam::Vec3;
use log::{debug, info};

use crate::components::drone::Drone;
use crate::components::intersection::{IntersectionRegion, TURN_LEFT, TURN_RIGHT};
use crate::components::worldposition::WorldPosition;
use crate::events::audio::AudioCmd;
use crate::events::collision::{TriggerEnterEvent, TriggerExitEvent};
use crate::events::delivery::{DeliverEndEvent, DeliverStartEvent, DeliveringUpdated};
use crate::events::guidance::{GpsUpdated, NavigationFailedEvent};
use crate::resources::delivery::DeliveryState;
use crate::resources::gameconfig::GameConfig;
use crate::resources::gps::Gps;
use crate::resources::input::InputState;
use crate::resources::occupancy::TriggerOccupancy;
use crate::resources::track::TrackState;
use crate::resources::travelframe::TravelFrame;
use crate::resources::turn::{ActiveTurn, TurnTask};
use crate::resources::worldtime::WorldTime;

/// True while exactly one occupied, unused region has the drone inside its
/// turn sub-volume.
pub fn can_turn(
    occupancy: &TriggerOccupancy,
    regions: &Query<(&WorldPosition, &IntersectionRegion)>,
    drone_pos: Vec3,
) -> bool {
    occupancy.inside.iter().any(|volume| {
        regions.get(*volume).is_ok_and(|(position, region)| {
            region.is_unused() && region.turn_zone.contains_point(position.pos, drone_pos)
        })
    })
}

/// Observer: announce the guided direction when the drone enters an
/// intersection during a delivery leg.
pub fn observe_region_enter(
    trigger: On<TriggerEnterEvent>,
    regions: Query<&IntersectionRegion>,
    delivery: Res<DeliveryState>,
    mut gps: ResMut<Gps>,
    mut gps_writer: MessageWriter<GpsUpdated>,
) {
    let Ok(region) = regions.get(trigger.event().volume) else {
        return;
    };
    if delivery.is_carrying() {
        gps.direction = Some(region.guided);
        gps_writer.write(GpsUpdated {
            direction: Some(region.guided),
        });
    }
}

/// Observer: clear guidance on exit and report a navigation failure when a
/// guided intersection was left without the commanded turn.
pub fn observe_region_exit(
    trigger: On<TriggerExitEvent>,
    mut commands: Commands,
    regions: Query<&IntersectionRegion>,
    mut delivery: ResMut<DeliveryState>,
    mut gps: ResMut<Gps>,
    mut gps_writer: MessageWriter<GpsUpdated>,
    mut delivering_writer: MessageWriter<DeliveringUpdated>,
    mut audio: MessageWriter<AudioCmd>,
) {
    let Ok(region) = regions.get(trigger.event().volume) else {
        return;
    };
    gps.clear();
    gps_writer.write(GpsUpdated { direction: None });

    if delivery.is_carrying() && region.used != region.guided {
        delivery.fail_delivery();
        delivering_writer.write(DeliveringUpdated { delivering: false });
        commands.trigger(NavigationFailedEvent {
            guided: region.guided,
            used: region.used,
        });
        commands.trigger(DeliverEndEvent { success: false });
        audio.write(AudioCmd::PlayFx {
            id: "deliver_failed".into(),
        });
        info!(
            "Navigation failure: guided {} but drone went {}",
            region.guided, region.used
        );
    }
}

/// Observer: a pickup inside an intersection announces guidance right away.
pub fn observe_deliver_start(
    _trigger: On<DeliverStartEvent>,
    occupancy: Res<TriggerOccupancy>,
    regions: Query<&IntersectionRegion>,
    mut gps: ResMut<Gps>,
    mut gps_writer: MessageWriter<GpsUpdated>,
) {
    for volume in occupancy.inside.iter() {
        if let Ok(region) = regions.get(*volume) {
            gps.direction = Some(region.guided);
            gps_writer.write(GpsUpdated {
                direction: Some(region.guided),
            });
            return;
        }
    }
}

/// Consume the turn command edges and commit a maneuver when legal.
///
/// A commit immediately marks the region used (so `can_turn` turns false),
/// locks the drone, and installs the step task. Illegal commands are
/// swallowed: `Turn` is a no-op when `can_turn` is false.
pub fn turn_command(
    mut input: ResMut<InputState>,
    cfg: Res<GameConfig>,
    occupancy: Res<TriggerOccupancy>,
    mut active: ResMut<ActiveTurn>,
    mut regions: Query<(&WorldPosition, &mut IntersectionRegion)>,
    mut drones: Query<(&mut Drone, &WorldPosition), Without<IntersectionRegion>>,
) {
    let direction = if input.turn_left {
        TURN_LEFT
    } else if input.turn_right {
        TURN_RIGHT
    } else {
        return;
    };
    input.clear_commands();

    // Mutual exclusion: a maneuver in flight can never be preempted.
    if active.is_turning() {
        return;
    }
    let Ok((mut drone, drone_pos)) = drones.single_mut() else {
        return;
    };
    // The crash freeze locks turning as well as movement.
    if !drone.can_move {
        return;
    }

    for volume in occupancy.inside.iter() {
        let Ok((position, mut region)) = regions.get_mut(*volume) else {
            continue;
        };
        if !region.is_unused() || !region.turn_zone.contains_point(position.pos, drone_pos.pos) {
            continue;
        }
        region.commit(direction);
        let pivot = position.pos + Vec3::Y * cfg.turn_pivot_height;
        // A left turn is a positive yaw about +Y.
        active.0 = Some(TurnTask {
            steps_left: cfg.turn_steps,
            step_degrees: -(direction as f32) * cfg.turn_step_degrees,
            pivot,
        });
        drone.can_move = false;
        drone.target_locked = true;
        debug!(
            "Turn committed ({}) at {:?}, {} steps",
            if direction == TURN_LEFT { "left" } else { "right" },
            position.pos,
            cfg.turn_steps
        );
        return;
    }
}

/// Advance the active maneuver by one step per tick.
pub fn turn_maneuver(
    time: Res<WorldTime>,
    mut active: ResMut<ActiveTurn>,
    mut frame: ResMut<TravelFrame>,
    mut track: ResMut<TrackState>,
    mut drones: Query<&mut Drone>,
) {
    if time.delta <= 0.0 {
        return;
    }
    let Some(mut task) = active.0 else {
        return;
    };

    frame.rotate_step(task.step_degrees, task.pivot);
    task.steps_left -= 1;

    if task.steps_left == 0 {
        frame.snap_to_cardinal();
        let ground = Vec3::new(task.pivot.x, frame.anchor.y, task.pivot.z);
        frame.anchor = ground;
        // Generation continues from the intersection along the new forward.
        track.rebase(ground);
        if let Ok(mut drone) = drones.single_mut()
            && !drone.is_crashing()
        {
            drone.can_move = true;
            drone.target_locked = false;
        }
        active.0 = None;
        debug!("Turn complete, heading {}", frame.heading);
    } else {
        active.0 = Some(task);
    }
}
