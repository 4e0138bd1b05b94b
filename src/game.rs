//! Session flow: state hooks, run lifecycle, scoring.
//!
//! The high-level session is driven through [`NextGameState`] plus the hooks
//! registered in the [`SystemsStore`] under the well-known names the state
//! observer invokes (`"enter_title"`, `"enter_play"`, `"enter_pause"`,
//! `"exit_pause"`, `"enter_end"`). A run ends either through the crash
//! freeze elapsing (terminal [`GameOverEvent`] with the final score) or an
//! explicit abort (silent teardown, nothing reported).

use bevy_ecs::observer::On;
use bevy_ecs::prelude::*;
use glam::Vec3;
use log::{info, warn};

use crate::components::boxcollider::BoxCollider;
use crate::components::drone::Drone;
use crate::components::persistent::Persistent;
use crate::components::worldposition::WorldPosition;
use crate::events::audio::AudioCmd;
use crate::events::session::{
    DroneCrashedEvent, DroneSpawnedEvent, GameOverEvent, RunAbortedEvent, RunStartedEvent,
};
use crate::resources::delivery::DeliveryState;
use crate::resources::gameconfig::GameConfig;
use crate::resources::gamestate::{GameStates, NextGameState};
use crate::resources::gps::Gps;
use crate::resources::input::InputState;
use crate::resources::occupancy::TriggerOccupancy;
use crate::resources::progress::Progress;
use crate::resources::settings::PlayerSettings;
use crate::resources::track::TrackState;
use crate::resources::travelframe::TravelFrame;
use crate::resources::worldsignals::WorldSignals;
use crate::resources::worldtime::WorldTime;

/// Points per completed delivery, on top of one point per meter.
const DELIVERY_BONUS: i32 = 250;

pub fn compute_score(meters: i32, delivered: i32) -> i32 {
    meters + DELIVERY_BONUS * delivered
}

// -- state hooks ------------------------------------------------------------

pub fn enter_title(mut time: ResMut<WorldTime>, mut signals: ResMut<WorldSignals>) {
    time.time_scale = 0.0;
    signals.set_string("scene", "title");
}

/// Reset the whole run and spawn a fresh drone at the frame anchor.
#[allow(clippy::too_many_arguments)]
pub fn enter_play(
    mut commands: Commands,
    run_entities: Query<Entity, Without<Persistent>>,
    cfg: Res<GameConfig>,
    settings: Res<PlayerSettings>,
    mut time: ResMut<WorldTime>,
    mut progress: ResMut<Progress>,
    mut delivery: ResMut<DeliveryState>,
    mut frame: ResMut<TravelFrame>,
    mut track: ResMut<TrackState>,
    mut active_turn: ResMut<crate::resources::turn::ActiveTurn>,
    mut gps: ResMut<Gps>,
    mut occupancy: ResMut<TriggerOccupancy>,
    mut input: ResMut<InputState>,
    mut signals: ResMut<WorldSignals>,
    mut audio: MessageWriter<AudioCmd>,
) {
    for entity in run_entities.iter() {
        commands.entity(entity).despawn();
    }

    frame.reset();
    track.reset(frame.anchor);
    progress.reset(cfg.base_speed);
    delivery.reset();
    active_turn.cancel();
    gps.clear();
    occupancy.clear();
    input.reset();
    signals.set_string("scene", "run");
    signals.set_integer("meters", 0);
    signals.set_integer("delivered", 0);
    signals.set_integer("score", 0);
    signals.set_scalar("speed", cfg.base_speed);
    time.time_scale = 1.0;

    audio.write(AudioCmd::SetMasterVolume {
        volume: settings.volume,
    });
    audio.write(AudioCmd::SetAmbientLevel {
        level: cfg.base_speed / cfg.speed_cap(),
    });
    audio.write(AudioCmd::StartAmbient);
    audio.write(AudioCmd::StartDroneLoop);

    commands.spawn((
        Drone::new(),
        WorldPosition::at(frame.anchor),
        BoxCollider::new(0.6, 0.3, 0.6).with_offset(Vec3::new(-0.3, -0.15, -0.3)),
    ));
    commands.trigger(RunStartedEvent {});
    commands.trigger(DroneSpawnedEvent {});
    info!("Run started");
}

pub fn enter_pause(mut time: ResMut<WorldTime>, mut audio: MessageWriter<AudioCmd>) {
    time.time_scale = 0.0;
    audio.write(AudioCmd::HaltAmbient);
    audio.write(AudioCmd::HaltDroneLoop);
}

pub fn exit_pause(mut time: ResMut<WorldTime>, mut audio: MessageWriter<AudioCmd>) {
    time.time_scale = 1.0;
    audio.write(AudioCmd::ResumeAmbient);
    audio.write(AudioCmd::ResumeDroneLoop);
}

pub fn enter_end(
    mut time: ResMut<WorldTime>,
    mut signals: ResMut<WorldSignals>,
    mut audio: MessageWriter<AudioCmd>,
) {
    time.time_scale = 0.0;
    signals.set_string("scene", "end");
    audio.write(AudioCmd::StopAmbient);
    audio.write(AudioCmd::StopDroneLoop);
}

// -- run lifecycle observers ------------------------------------------------

/// Observer: the crash freeze elapsed and the drone is gone. Report the run
/// and move to the end state.
pub fn on_drone_crashed(
    _trigger: On<DroneCrashedEvent>,
    mut commands: Commands,
    progress: Res<Progress>,
    delivery: Res<DeliveryState>,
    mut next_state: ResMut<NextGameState>,
) {
    commands.trigger(GameOverEvent {
        meters: progress.meters,
        delivered: delivery.delivered(),
    });
    next_state.set(GameStates::End);
}

/// Observer: fold the final report into the score and the persisted best.
pub fn on_game_over(
    trigger: On<GameOverEvent>,
    mut settings: ResMut<PlayerSettings>,
    mut signals: ResMut<WorldSignals>,
) {
    let report = trigger.event();
    let score = compute_score(report.meters, report.delivered);
    signals.set_integer("score", score);
    signals.clear_flag("new_high_score");
    if settings.record_score(score) {
        signals.set_flag("new_high_score");
        info!("New high score: {}", score);
        if let Err(e) = settings.save() {
            warn!("Could not persist settings: {}", e);
        }
    }
    signals.set_integer("high_score", settings.high_score);
    info!(
        "Run over: {} m, {} delivered, score {}",
        report.meters, report.delivered, score
    );
}

/// Observer: explicit abort. Tear the run down without a terminal report;
/// in particular no [`GameOverEvent`], even mid crash freeze.
pub fn on_run_aborted(
    _trigger: On<RunAbortedEvent>,
    mut commands: Commands,
    drones: Query<Entity, With<Drone>>,
    mut active_turn: ResMut<crate::resources::turn::ActiveTurn>,
    mut gps: ResMut<Gps>,
    mut occupancy: ResMut<TriggerOccupancy>,
    mut audio: MessageWriter<AudioCmd>,
) {
    for entity in drones.iter() {
        commands.entity(entity).despawn();
    }
    active_turn.cancel();
    gps.clear();
    occupancy.clear();
    audio.write(AudioCmd::StopAmbient);
    audio.write(AudioCmd::StopDroneLoop);
    info!("Run aborted");
}

// -- direct control surface -------------------------------------------------

/// Request a new run. The actual reset happens in the `enter_play` hook once
/// the pending transition is applied.
pub fn start_run(world: &mut World) {
    world.resource_mut::<NextGameState>().set(GameStates::Playing);
}

/// Abort the current run silently and return to the title screen.
pub fn abort_run(world: &mut World) {
    world.trigger(RunAbortedEvent {});
    world
        .resource_mut::<NextGameState>()
        .set(GameStates::TitleScreen);
}

/// Abort whatever run is in flight and start a fresh one.
pub fn restart_run(world: &mut World) {
    world.trigger(RunAbortedEvent {});
    world.resource_mut::<NextGameState>().set(GameStates::Playing);
}

pub fn pause(world: &mut World) {
    world.resource_mut::<NextGameState>().set(GameStates::Paused);
}

pub fn resume(world: &mut World) {
    world.resource_mut::<NextGameState>().set(GameStates::Playing);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_score_counts_meters_and_deliveries() {
        assert_eq!(compute_score(0, 0), 0);
        assert_eq!(compute_score(137, 0), 137);
        assert_eq!(compute_score(137, 2), 637);
    }
}
