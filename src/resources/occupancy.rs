//! Trigger volume occupancy.
//!
//! The collision sweep records which trigger volumes currently contain the
//! drone, so enter/exit edges can be detected and turn legality checked.
//! Volumes consumed or retired while occupied are dropped silently, without
//! an exit event.

use bevy_ecs::prelude::{Entity, Resource};
use rustc_hash::FxHashSet;

#[derive(Resource, Debug, Clone, Default)]
pub struct TriggerOccupancy {
    pub inside: FxHashSet<Entity>,
}

impl TriggerOccupancy {
    pub fn clear(&mut self) {
        self.inside.clear();
    }

    pub fn contains(&self, volume: Entity) -> bool {
        self.inside.contains(&volume)
    }
}
