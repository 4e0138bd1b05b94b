//! Collision and trigger events.
//!
//! The collision sweep emits [`CollisionEvent`] when the drone overlaps a
//! solid collider, and [`TriggerEnterEvent`] / [`TriggerExitEvent`] edges
//! when it enters or leaves a trigger volume. These four events are the
//! whole interface between the collision backend and the core: stations,
//! intersections and the crash path all react to them in observers without
//! depending on how overlaps are computed.

use bevy_ecs::prelude::*;
use glam::Vec3;

/// Event fired when the drone overlaps a solid (non-trigger) collider.
#[derive(Event, Debug, Clone, Copy)]
pub struct CollisionEvent {
    pub drone: Entity,
    pub other: Entity,
    /// Approximate contact point, for positioned feedback.
    pub point: Vec3,
}

/// Event fired on the frame the drone enters a trigger volume.
#[derive(Event, Debug, Clone, Copy)]
pub struct TriggerEnterEvent {
    pub volume: Entity,
}

/// Event fired on the frame the drone leaves a trigger volume.
///
/// Volumes despawned while occupied (a consumed station, a retired segment)
/// do not produce an exit event.
#[derive(Event, Debug, Clone, Copy)]
pub struct TriggerExitEvent {
    pub volume: Entity,
}
