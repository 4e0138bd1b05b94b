//! Guidance events.

use bevy_ecs::message::Message;
use bevy_ecs::prelude::Event;

/// The guided exit direction changed: `Some(-1|0|1)` when entering an
/// intersection during a delivery leg, `None` when leaving it or when no
/// leg is active.
#[derive(Message, Debug, Clone, Copy)]
pub struct GpsUpdated {
    pub direction: Option<i8>,
}

/// The drone exited a guided intersection without the commanded turn.
/// Ends the delivery leg unsuccessfully; distinct from a crash.
#[derive(Event, Debug, Clone, Copy)]
pub struct NavigationFailedEvent {
    /// What the GPS asked for.
    pub guided: i8,
    /// What the drone actually did.
    pub used: i8,
}
