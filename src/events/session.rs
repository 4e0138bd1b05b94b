//! Run lifecycle events.

use bevy_ecs::prelude::Event;

/// A new run started (play command accepted, world reset).
#[derive(Event, Debug, Clone, Copy)]
pub struct RunStartedEvent {}

/// The drone entity for the current run was spawned and zeroed.
#[derive(Event, Debug, Clone, Copy)]
pub struct DroneSpawnedEvent {}

/// The crash freeze elapsed and the drone was destroyed. Terminal for the
/// run; superseded only by an abort during the freeze window.
#[derive(Event, Debug, Clone, Copy)]
pub struct DroneCrashedEvent {}

/// The run was aborted explicitly: silent teardown, no terminal report.
#[derive(Event, Debug, Clone, Copy)]
pub struct RunAbortedEvent {}

/// Final report of a finished run.
#[derive(Event, Debug, Clone, Copy)]
pub struct GameOverEvent {
    pub meters: i32,
    pub delivered: i32,
}
