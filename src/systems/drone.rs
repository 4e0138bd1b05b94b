//! Drone envelope chase, banking and crash handling.
//!
//! The drone never translates forward itself; it chases a target offset
//! inside the clamped lateral/vertical envelope of the travel frame. Input
//! integrates into the target, the position chases the target at a rate tied
//! to the corridor speed, and the bank angle leans into lateral motion. A
//! solid collision starts the crash freeze: everything locks for the
//! configured delay, then the drone entity is destroyed.

use bevy_ecs::observer::On;
use bevy_ecs::prelude::*;
use log::{debug, info};

use crate::components::drone::Drone;
use crate::components::worldposition::WorldPosition;
use crate::events::audio::AudioCmd;
use crate::events::collision::CollisionEvent;
use crate::events::session::DroneCrashedEvent;
use crate::resources::gameconfig::GameConfig;
use crate::resources::progress::Progress;
use crate::resources::settings::PlayerSettings;
use crate::resources::travelframe::TravelFrame;
use crate::resources::worldtime::WorldTime;

pub fn drone_controller(
    time: Res<WorldTime>,
    cfg: Res<GameConfig>,
    settings: Res<PlayerSettings>,
    progress: Res<Progress>,
    frame: Res<TravelFrame>,
    input: Res<crate::resources::input::InputState>,
    mut drones: Query<(&mut Drone, &mut WorldPosition)>,
) {
    let dt = time.delta;
    if dt <= 0.0 {
        return;
    }
    let Ok((mut drone, mut position)) = drones.single_mut() else {
        return;
    };

    // Input integrates into the target; a lock reads the axes as zero.
    let (axis_x, axis_y) = if drone.target_locked {
        (0.0, 0.0)
    } else {
        (input.axis_x, input.axis_y)
    };
    drone.target_offset.x = (drone.target_offset.x + axis_x * settings.sensitivity * dt)
        .clamp(-cfg.lateral_limit, cfg.lateral_limit);
    drone.target_offset.y = (drone.target_offset.y + axis_y * settings.sensitivity * dt)
        .clamp(cfg.vertical_min, cfg.vertical_max);

    let before_x = drone.offset.x;
    if drone.can_move {
        // The chase tracks the corridor pace and never overshoots.
        let delta = drone.target_offset - drone.offset;
        let distance = delta.length();
        let max_step = progress.speed * dt;
        if distance <= max_step {
            drone.offset = drone.target_offset;
        } else {
            drone.offset += delta * (max_step / distance);
        }
    }

    // Bank into lateral motion, smoothed and clamped.
    let lateral_rate = (drone.offset.x - before_x) / dt;
    let target_bank = (-cfg.bank_gain * lateral_rate).clamp(-cfg.max_bank, cfg.max_bank);
    let current = drone.signed_bank();
    let step = (target_bank - current).clamp(-cfg.bank_rate * dt, cfg.bank_rate * dt);
    drone.bank_angle = (current + step).rem_euclid(360.0);

    position.pos = frame.world_offset(drone.offset);
}

/// Observer: a solid collision starts the crash freeze. Idempotent while the
/// timer runs; overlap events after the first change nothing.
pub fn observe_drone_collision(
    trigger: On<CollisionEvent>,
    cfg: Res<GameConfig>,
    mut drones: Query<&mut Drone>,
    mut audio: MessageWriter<AudioCmd>,
) {
    let Ok(mut drone) = drones.get_mut(trigger.event().drone) else {
        return;
    };
    if drone.is_crashing() {
        return;
    }
    drone.can_move = false;
    drone.target_locked = true;
    drone.crash_timer = Some(cfg.crash_delay);
    audio.write(AudioCmd::PlayFxAt {
        id: "crash".into(),
        position: trigger.event().point,
    });
    info!("Drone crashed at {:?}", trigger.event().point);
}

/// Tick the crash freeze down; destroy the drone when it elapses.
pub fn crash_countdown(
    mut commands: Commands,
    time: Res<WorldTime>,
    mut drones: Query<(Entity, &mut Drone)>,
) {
    for (entity, mut drone) in drones.iter_mut() {
        let Some(timer) = drone.crash_timer else {
            continue;
        };
        let remaining = timer - time.delta;
        if remaining <= 0.0 {
            debug!("Crash freeze elapsed, destroying drone");
            commands.entity(entity).despawn();
            commands.trigger(DroneCrashedEvent {});
        } else {
            drone.crash_timer = Some(remaining);
        }
    }
}
