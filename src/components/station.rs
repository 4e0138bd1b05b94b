//! Delivery station component.
//!
//! Stations are trigger volumes spawned by the track generator. A pickup
//! station starts a delivery leg, a drop-off station ends it. The station
//! entity is consumed (despawned) when its action is accepted by the
//! delivery arbiter.

use bevy_ecs::prelude::Component;

#[derive(Component, Debug, Clone, Copy)]
pub struct Station {
    /// Drop-off stations end a delivery; pickup stations start one.
    pub is_dropoff: bool,
}

impl Station {
    pub fn pickup() -> Self {
        Self { is_dropoff: false }
    }

    pub fn dropoff() -> Self {
        Self { is_dropoff: true }
    }
}
