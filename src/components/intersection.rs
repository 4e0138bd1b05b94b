//! Intersection region component.
//!
//! An intersection is a trigger volume offering exactly one turn opportunity
//! per occupancy. The narrower `turn_zone` sub-volume is where a turn command
//! is legal; `used` records whether and which way the drone turned during the
//! current pass. The guided exit direction is drawn at placement time and
//! announced over GPS while a delivery leg is active.

use bevy_ecs::prelude::Component;

use crate::components::boxcollider::BoxCollider;

/// Turn directions, encoded the same way in `guided` and `used`:
/// -1 = left, 0 = straight/none, 1 = right.
pub const TURN_LEFT: i8 = -1;
pub const TURN_NONE: i8 = 0;
pub const TURN_RIGHT: i8 = 1;

#[derive(Component, Debug, Clone, Copy)]
pub struct IntersectionRegion {
    /// Exit direction the GPS asks for while delivering.
    pub guided: i8,
    /// Tri-state: 0 unused, -1 turned left, 1 turned right.
    pub used: i8,
    /// Narrower sub-volume in which a turn command is legal.
    pub turn_zone: BoxCollider,
}

impl IntersectionRegion {
    pub fn new(guided: i8, turn_zone: BoxCollider) -> Self {
        debug_assert!((-1..=1).contains(&guided));
        Self {
            guided,
            used: TURN_NONE,
            turn_zone,
        }
    }

    pub fn is_unused(&self) -> bool {
        self.used == TURN_NONE
    }

    /// Mark the region as committed to a turn. Only valid while unused.
    pub fn commit(&mut self, direction: i8) {
        debug_assert!(self.is_unused());
        debug_assert!(direction == TURN_LEFT || direction == TURN_RIGHT);
        self.used = direction;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_region_starts_unused() {
        let r = IntersectionRegion::new(TURN_LEFT, BoxCollider::trigger(4.0, 4.0, 4.0));
        assert!(r.is_unused());
    }

    #[test]
    fn test_commit_records_direction() {
        let mut r = IntersectionRegion::new(TURN_NONE, BoxCollider::trigger(4.0, 4.0, 4.0));
        r.commit(TURN_RIGHT);
        assert!(!r.is_unused());
        assert_eq!(r.used, TURN_RIGHT);
    }
}
