//! Delivery state arbiter.
//!
//! Tracks whether the drone carries a package and the number of completed
//! deliveries. Trigger glue calls [`DeliveryState::try_pickup`] /
//! [`DeliveryState::try_dropoff`] directly and acts on the returned flag
//! (consume the station, play feedback); the delivery events carry the
//! resulting facts only.

use bevy_ecs::prelude::Resource;

#[derive(Resource, Debug, Clone, Copy, Default)]
pub struct DeliveryState {
    carrying: bool,
    delivered: i32,
}

impl DeliveryState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn reset(&mut self) {
        *self = Self::default();
    }

    pub fn is_carrying(&self) -> bool {
        self.carrying
    }

    pub fn delivered(&self) -> i32 {
        self.delivered
    }

    /// Accept a package. Succeeds only while not carrying.
    pub fn try_pickup(&mut self) -> bool {
        if self.carrying {
            return false;
        }
        self.carrying = true;
        true
    }

    /// Complete a delivery. Succeeds only while carrying; increments the
    /// delivered count exactly once.
    pub fn try_dropoff(&mut self) -> bool {
        if !self.carrying {
            return false;
        }
        self.carrying = false;
        self.delivered += 1;
        true
    }

    /// End the current leg unsuccessfully (navigation failure). Returns
    /// whether a package was actually being carried.
    pub fn fail_delivery(&mut self) -> bool {
        if !self.carrying {
            return false;
        }
        self.carrying = false;
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pickup_only_while_idle() {
        let mut d = DeliveryState::new();
        assert!(d.try_pickup());
        assert!(d.is_carrying());
        assert!(!d.try_pickup());
    }

    #[test]
    fn test_dropoff_only_while_carrying() {
        let mut d = DeliveryState::new();
        assert!(!d.try_dropoff());
        assert_eq!(d.delivered(), 0);
        assert!(d.try_pickup());
        assert!(d.try_dropoff());
        assert_eq!(d.delivered(), 1);
        assert!(!d.try_dropoff());
        assert_eq!(d.delivered(), 1);
    }

    #[test]
    fn test_failed_leg_does_not_count() {
        let mut d = DeliveryState::new();
        assert!(d.try_pickup());
        assert!(d.fail_delivery());
        assert!(!d.is_carrying());
        assert_eq!(d.delivered(), 0);
        assert!(!d.fail_delivery());
    }
}
