//! Collision backend.
//!
//! One AABB sweep of the drone against every collider per tick. Solid
//! overlaps become [`CollisionEvent`]s; trigger overlaps are edge-detected
//! against the [`TriggerOccupancy`] set and become
//! [`TriggerEnterEvent`]/[`TriggerExitEvent`]s. The rest of the core only
//! ever sees these events, never the sweep itself.

use bevy_ecs::prelude::*;

use crate::components::boxcollider::BoxCollider;
use crate::components::drone::Drone;
use crate::components::worldposition::WorldPosition;
use crate::events::collision::{CollisionEvent, TriggerEnterEvent, TriggerExitEvent};
use crate::resources::occupancy::TriggerOccupancy;

pub fn collision_detector(
    mut commands: Commands,
    drones: Query<(Entity, &WorldPosition, &BoxCollider), With<Drone>>,
    volumes: Query<(Entity, &WorldPosition, &BoxCollider), Without<Drone>>,
    mut occupancy: ResMut<TriggerOccupancy>,
) {
    let Ok((drone_entity, drone_pos, drone_col)) = drones.single() else {
        occupancy.clear();
        return;
    };

    // Volumes consumed or retired while occupied drop out silently.
    occupancy.inside.retain(|e| volumes.contains(*e));

    for (volume, position, collider) in volumes.iter() {
        let overlapping = drone_col.overlaps(drone_pos.pos, collider, position.pos);
        if collider.is_trigger {
            let was_inside = occupancy.contains(volume);
            if overlapping && !was_inside {
                occupancy.inside.insert(volume);
                commands.trigger(TriggerEnterEvent { volume });
            } else if !overlapping && was_inside {
                occupancy.inside.remove(&volume);
                commands.trigger(TriggerExitEvent { volume });
            }
        } else if overlapping {
            let point = (drone_pos.pos + position.pos + collider.offset + collider.size * 0.5) * 0.5;
            commands.trigger(CollisionEvent {
                drone: drone_entity,
                other: volume,
                point,
            });
        }
    }
}
