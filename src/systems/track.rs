//! Track generation and retirement systems.
//!
//! `advance_track` keeps the generation cursor at least the configured
//! lookahead ahead of the travel anchor, spawning one entity bundle per
//! placed feature; `retire_track` despawns every segment that has fallen
//! more than the retirement margin behind the anchor. Both use the travel
//! frame orientation current at the time they run, so placement follows
//! turns already applied; while a maneuver is in flight the frame sweeps
//! through non-cardinal headings, so both systems hold still until the
//! heading has snapped back (the anchor is frozen too, mid-turn).

use bevy_ecs::prelude::*;
use glam::Vec3;
use log::debug;

use crate::components::boxcollider::BoxCollider;
use crate::components::intersection::IntersectionRegion;
use crate::components::segment::{DecorKind, Segment, SegmentKind};
use crate::components::station::Station;
use crate::components::worldposition::WorldPosition;
use crate::resources::delivery::DeliveryState;
use crate::resources::gameconfig::GameConfig;
use crate::resources::track::{FeatureKind, SideFeature, SlotKind, TrackState};
use crate::resources::travelframe::TravelFrame;
use crate::resources::turn::ActiveTurn;

/// Trigger volume of an intersection region, centered on the slot.
fn intersection_volume(cfg: &GameConfig) -> BoxCollider {
    let s = cfg.segment_length;
    BoxCollider::trigger(s, 8.0, s).with_offset(Vec3::new(-s * 0.5, -1.0, -s * 0.5))
}

/// Narrower sub-volume in which a turn command is legal.
fn turn_zone(cfg: &GameConfig) -> BoxCollider {
    let s = cfg.segment_length * 0.5;
    BoxCollider::trigger(s, 8.0, s).with_offset(Vec3::new(-s * 0.5, -1.0, -s * 0.5))
}

fn station_volume() -> BoxCollider {
    BoxCollider::trigger(2.0, 2.0, 2.0).with_offset(Vec3::splat(-1.0))
}

/// Solid collider for a decorative/hazard model.
fn decor_collider(kind: DecorKind, cfg: &GameConfig) -> BoxCollider {
    match kind {
        DecorKind::Billboard => {
            BoxCollider::new(0.5, 2.0, 3.0).with_offset(Vec3::new(-0.25, 0.0, -1.5))
        }
        DecorKind::Antenna => {
            BoxCollider::new(0.5, 6.0, 0.5).with_offset(Vec3::new(-0.25, 0.0, -0.25))
        }
        DecorKind::WaterTower => {
            BoxCollider::new(2.0, 3.0, 2.0).with_offset(Vec3::new(-1.0, 0.0, -1.0))
        }
        DecorKind::VerticalBar => {
            BoxCollider::new(0.4, 8.0, 0.4).with_offset(Vec3::new(-0.2, 0.0, -0.2))
        }
        DecorKind::HorizontalBar => {
            let span = cfg.lateral_limit * 2.0 + 2.0;
            BoxCollider::new(0.4, 0.4, span).with_offset(Vec3::new(-0.2, -0.2, -span * 0.5))
        }
    }
}

/// Ensure the corridor is generated at least `lookahead` ahead of the anchor.
///
/// No-op when the cursor is already ahead of the target; never blocks and
/// does amortized constant work per frame once the corridor is warm.
pub fn advance_track(
    mut commands: Commands,
    frame: Res<TravelFrame>,
    mut track: ResMut<TrackState>,
    cfg: Res<GameConfig>,
    delivery: Res<DeliveryState>,
    active_turn: Res<ActiveTurn>,
) {
    // Mid-maneuver the forward axis is not cardinal yet; generating now
    // would scatter slots along intermediate headings.
    if active_turn.is_turning() {
        return;
    }
    while frame.distance_ahead(track.cursor) < cfg.lookahead {
        let slot_pos = track.cursor + frame.forward * cfg.segment_length;
        track.cursor = slot_pos;
        let plan = track.decide_slot(delivery.is_carrying(), &cfg);
        let index = track.next_index;

        match plan.kind {
            SlotKind::Road => {
                commands.spawn((
                    Segment::new(SegmentKind::Road, index),
                    WorldPosition::at(slot_pos),
                ));
                if let Some(feature) = plan.feature {
                    spawn_side_feature(&mut commands, &frame, &cfg, slot_pos, index, feature);
                }
            }
            SlotKind::Intersection { guided } => {
                debug!("Placing intersection #{} (guided {})", index, guided);
                commands.spawn((
                    Segment::new(SegmentKind::Intersection, index),
                    WorldPosition::at(slot_pos),
                    intersection_volume(&cfg),
                    IntersectionRegion::new(guided, turn_zone(&cfg)),
                ));
            }
        }
    }
}

fn spawn_side_feature(
    commands: &mut Commands,
    frame: &TravelFrame,
    cfg: &GameConfig,
    slot_pos: Vec3,
    index: u64,
    feature: SideFeature,
) {
    // Left-side features mirror by a 180 degree yaw: the lateral offset
    // flips sign along the frame's right axis.
    let side = if feature.mirrored { -1.0 } else { 1.0 };
    let pos = slot_pos + frame.right * (feature.lateral * side) + Vec3::Y * feature.height;

    match feature.kind {
        FeatureKind::Station { dropoff } => {
            let station = if dropoff {
                Station::dropoff()
            } else {
                Station::pickup()
            };
            debug!(
                "Placing {} station #{}",
                if dropoff { "drop-off" } else { "pickup" },
                index
            );
            commands.spawn((
                Segment::new(SegmentKind::Station, index),
                WorldPosition::at(pos),
                station_volume(),
                station,
            ));
        }
        FeatureKind::Decor(kind) => {
            commands.spawn((
                Segment::new(SegmentKind::Decoration(kind), index),
                WorldPosition::at(pos),
                decor_collider(kind, cfg),
            ));
        }
    }
}

/// Despawn every segment that has fallen behind the anchor by more than the
/// retirement margin: `dot(forward, pos + margin*forward - anchor) <= 0`.
pub fn retire_track(
    mut commands: Commands,
    frame: Res<TravelFrame>,
    cfg: Res<GameConfig>,
    active_turn: Res<ActiveTurn>,
    segments: Query<(Entity, &WorldPosition), With<Segment>>,
) {
    // Projection against a rotating forward axis would reclaim segments
    // that are still part of the corridor; wait the maneuver out.
    if active_turn.is_turning() {
        return;
    }
    for (entity, position) in segments.iter() {
        let projected = position.pos + frame.forward * cfg.retire_margin - frame.anchor;
        if projected.dot(frame.forward) <= 0.0 {
            commands.entity(entity).despawn();
        }
    }
}
