//! Track segment tag component.
//!
//! Every world feature placed by the track generator carries a [`Segment`]
//! with its category. The generator exclusively owns the live set: segments
//! are spawned as the frontier advances and despawned once they fall behind
//! the drone by the retirement margin.

use bevy_ecs::prelude::Component;

/// Decorative/hazard side feature models.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DecorKind {
    /// Elevated advertisement panel at the corridor side.
    Billboard,
    /// Ground-mounted antenna mast.
    Antenna,
    /// Rooftop water tower, placed further out.
    WaterTower,
    /// Tall vertical bar hazard at the corridor side.
    VerticalBar,
    /// Bar spanning the corridor at height, flown under or over.
    HorizontalBar,
}

/// Category of a placed track feature.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SegmentKind {
    Road,
    Intersection,
    Station,
    Decoration(DecorKind),
}

#[derive(Component, Debug, Clone, Copy)]
pub struct Segment {
    pub kind: SegmentKind,
    /// Monotonically increasing placement counter, for logs and debugging.
    pub index: u64,
}

impl Segment {
    pub fn new(kind: SegmentKind, index: u64) -> Self {
        Self { kind, index }
    }
}
