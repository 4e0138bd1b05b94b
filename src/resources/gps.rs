//! Delivery guidance state.
//!
//! While a delivery leg is active, the occupied intersection announces its
//! guided exit direction here; `None` between intersections or while idle.

use bevy_ecs::prelude::Resource;

#[derive(Resource, Debug, Clone, Copy, Default)]
pub struct Gps {
    /// Guided exit direction: -1 left, 0 straight, 1 right.
    pub direction: Option<i8>,
}

impl Gps {
    pub fn clear(&mut self) {
        self.direction = None;
    }
}
