//! Persistent entity marker component.
//!
//! Entities with the [`Persistent`] component will not be despawned when a
//! run is torn down. Use this for observers, registered hook systems, or any
//! entity that must survive between runs.

use bevy_ecs::prelude::Component;

/// Tag component used to mark entities that should persist across runs.
#[derive(Component, Clone, Debug)]
pub struct Persistent;
