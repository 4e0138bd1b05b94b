//! Track generation, retirement and turn maneuver integration tests.

use bevy_ecs::message::Messages;
use bevy_ecs::prelude::*;
use glam::Vec3;

use skycourier::components::drone::Drone;
use skycourier::components::intersection::{IntersectionRegion, TURN_LEFT};
use skycourier::components::segment::Segment;
use skycourier::components::worldposition::WorldPosition;
use skycourier::events::guidance::GpsUpdated;
use skycourier::events::progress::{MetersUpdated, SpeedUpdated};
use skycourier::resources::delivery::DeliveryState;
use skycourier::resources::gameconfig::GameConfig;
use skycourier::resources::gps::Gps;
use skycourier::resources::input::InputState;
use skycourier::resources::occupancy::TriggerOccupancy;
use skycourier::resources::progress::Progress;
use skycourier::resources::track::TrackState;
use skycourier::resources::travelframe::TravelFrame;
use skycourier::resources::turn::{ActiveTurn, TurnTask};
use skycourier::resources::worldsignals::WorldSignals;
use skycourier::resources::worldtime::WorldTime;
use skycourier::systems::progress::progress_tick;
use skycourier::systems::track::{advance_track, retire_track};
use skycourier::systems::turn::{turn_command, turn_maneuver};

const EPSILON: f32 = 1e-4;

fn approx_eq(a: f32, b: f32) -> bool {
    (a - b).abs() < EPSILON
}

fn make_world(delta: f32) -> World {
    let mut world = World::new();
    world.insert_resource(WorldTime {
        elapsed: 0.0,
        delta,
        time_scale: 1.0,
    });
    let cfg = GameConfig::new();
    world.insert_resource(Progress::new(cfg.base_speed));
    world.insert_resource(cfg);
    world.insert_resource(TravelFrame::new());
    world.insert_resource(TrackState::new(99));
    world.insert_resource(DeliveryState::new());
    world.insert_resource(TriggerOccupancy::default());
    world.insert_resource(Gps::default());
    world.insert_resource(ActiveTurn::default());
    world.insert_resource(InputState::default());
    world.insert_resource(WorldSignals::default());
    world.init_resource::<Messages<MetersUpdated>>();
    world.init_resource::<Messages<SpeedUpdated>>();
    world.init_resource::<Messages<GpsUpdated>>();
    world
}

fn tick_advance_track(world: &mut World) {
    let mut schedule = Schedule::default();
    schedule.add_systems(advance_track);
    schedule.run(world);
}

fn tick_retire_track(world: &mut World) {
    let mut schedule = Schedule::default();
    schedule.add_systems(retire_track);
    schedule.run(world);
}

fn tick_progress(world: &mut World) {
    let mut schedule = Schedule::default();
    schedule.add_systems(progress_tick);
    schedule.run(world);
}

fn tick_turn_command(world: &mut World) {
    let mut schedule = Schedule::default();
    schedule.add_systems(turn_command);
    schedule.run(world);
}

fn tick_turn_maneuver(world: &mut World) {
    let mut schedule = Schedule::default();
    schedule.add_systems(turn_maneuver);
    schedule.run(world);
}

fn segment_count(world: &mut World) -> usize {
    world.query::<&Segment>().iter(world).count()
}

#[test]
fn test_generation_fills_lookahead_then_idles() {
    let mut world = make_world(1.0 / 60.0);
    tick_advance_track(&mut world);
    let count = segment_count(&mut world);
    assert!(count > 0, "warmup should place segments");

    let lookahead = world.resource::<GameConfig>().lookahead;
    let track = world.resource::<TrackState>();
    let frame = world.resource::<TravelFrame>();
    assert!(frame.distance_ahead(track.cursor) >= lookahead);

    // With the anchor unmoved the generator must be a no-op.
    tick_advance_track(&mut world);
    assert_eq!(segment_count(&mut world), count);
}

#[test]
fn test_generation_follows_the_anchor() {
    let mut world = make_world(1.0 / 60.0);
    tick_advance_track(&mut world);
    let before = segment_count(&mut world);

    {
        let forward = world.resource::<TravelFrame>().forward;
        let mut frame = world.resource_mut::<TravelFrame>();
        frame.anchor += forward * 50.0;
    }
    tick_advance_track(&mut world);
    assert!(segment_count(&mut world) > before);
}

#[test]
fn test_retirement_despawns_only_behind_the_margin() {
    let mut world = make_world(1.0 / 60.0);
    let margin = world.resource::<GameConfig>().retire_margin;

    let behind = world
        .spawn((
            Segment::new(skycourier::components::segment::SegmentKind::Road, 1),
            WorldPosition::at(Vec3::new(-margin - 1.0, 0.0, 0.0)),
        ))
        .id();
    let ahead = world
        .spawn((
            Segment::new(skycourier::components::segment::SegmentKind::Road, 2),
            WorldPosition::at(Vec3::new(-margin + 1.0, 0.0, 0.0)),
        ))
        .id();

    tick_retire_track(&mut world);
    assert!(world.get_entity(behind).is_err());
    assert!(world.get_entity(ahead).is_ok());
}

#[test]
fn test_progress_advances_anchor_and_publishes_meters() {
    let mut world = make_world(0.5);
    world.spawn((Drone::new(), WorldPosition::at(Vec3::ZERO)));

    for _ in 0..4 {
        tick_progress(&mut world);
    }

    let progress = world.resource::<Progress>();
    assert!(approx_eq(progress.distance, 2.0));
    assert_eq!(progress.meters, 2);
    let frame = world.resource::<TravelFrame>();
    assert!(approx_eq(frame.anchor.x, 2.0));

    let meters: Vec<_> = world
        .resource_mut::<Messages<MetersUpdated>>()
        .drain()
        .collect();
    assert_eq!(meters.last().map(|m| m.meters), Some(2));
}

#[test]
fn test_progress_speed_steps_up_at_milestone() {
    let mut world = make_world(1.0);
    world.spawn((Drone::new(), WorldPosition::at(Vec3::ZERO)));

    // Cross the first milestone at base speed 1.0.
    for _ in 0..101 {
        tick_progress(&mut world);
    }
    let progress = world.resource::<Progress>();
    let cfg = world.resource::<GameConfig>();
    assert!(approx_eq(progress.speed, cfg.base_speed + cfg.speed_step));

    let speeds: Vec<_> = world
        .resource_mut::<Messages<SpeedUpdated>>()
        .drain()
        .collect();
    assert_eq!(speeds.len(), 1);

    // The signal board mirrors the new speed for observers.
    let board_speed = world.resource::<WorldSignals>().get_scalar("speed");
    assert!(board_speed.is_some_and(|s| approx_eq(s, 1.25)));
}

#[test]
fn test_progress_freezes_during_turn_and_crash() {
    let mut world = make_world(1.0);
    world.spawn((Drone::new(), WorldPosition::at(Vec3::ZERO)));
    world.resource_mut::<ActiveTurn>().0 = Some(TurnTask {
        steps_left: 10,
        step_degrees: 3.0,
        pivot: Vec3::ZERO,
    });
    tick_progress(&mut world);
    assert!(approx_eq(world.resource::<Progress>().distance, 0.0));

    world.resource_mut::<ActiveTurn>().cancel();
    {
        let mut drones = world.query::<&mut Drone>();
        drones.single_mut(&mut world).unwrap().crash_timer = Some(1.0);
    }
    tick_progress(&mut world);
    assert!(approx_eq(world.resource::<Progress>().distance, 0.0));
}

#[test]
fn test_track_holds_still_during_a_turn_maneuver() {
    let mut world = make_world(1.0 / 60.0);
    let mut drone = Drone::new();
    drone.can_move = false;
    drone.target_locked = true;
    world.spawn((drone, WorldPosition::at(Vec3::ZERO)));

    tick_advance_track(&mut world);
    let warm = segment_count(&mut world);
    let warm_index = world.resource::<TrackState>().next_index;

    let pivot = Vec3::new(10.0, 3.0, 0.0);
    world.resource_mut::<ActiveTurn>().0 = Some(TurnTask {
        steps_left: 30,
        step_degrees: 3.0,
        pivot,
    });

    // Run the generator and the reaper after every maneuver step, the way
    // the update schedule chains them. Neither may touch the corridor
    // while the heading is still sweeping.
    for step in 0..30 {
        tick_turn_maneuver(&mut world);
        let turning = world.resource::<ActiveTurn>().is_turning();
        tick_advance_track(&mut world);
        tick_retire_track(&mut world);
        if turning {
            assert_eq!(
                segment_count(&mut world),
                warm,
                "corridor changed mid-maneuver at step {}",
                step
            );
        }
    }

    // Heading snapped: generation resumes along the new forward axis.
    assert!(!world.resource::<ActiveTurn>().is_turning());
    assert!(segment_count(&mut world) > warm);
    let frame = world.resource::<TravelFrame>();
    assert!((frame.forward - Vec3::NEG_Z).length() < EPSILON);

    // Everything spawned after the turn sits on the rebased corridor.
    let mut segments = world.query::<(&Segment, &WorldPosition)>();
    for (segment, position) in segments.iter(&world) {
        if segment.index >= warm_index {
            assert!(
                (position.pos.x - pivot.x).abs() <= 5.0,
                "segment #{} strayed off the new corridor at {:?}",
                segment.index,
                position.pos
            );
        }
    }
}

#[test]
fn test_turn_command_is_a_no_op_without_an_eligible_region() {
    let mut world = make_world(1.0 / 60.0);
    world.spawn((Drone::new(), WorldPosition::at(Vec3::ZERO)));
    world.resource_mut::<InputState>().turn_left = true;

    tick_turn_command(&mut world);

    assert!(!world.resource::<ActiveTurn>().is_turning());
    // The command edge is consumed either way.
    assert!(!world.resource::<InputState>().turn_left);
}

#[test]
fn test_turn_command_commits_an_eligible_region_once() {
    let mut world = make_world(1.0 / 60.0);
    let cfg = world.resource::<GameConfig>().clone();
    world.spawn((Drone::new(), WorldPosition::at(Vec3::ZERO)));
    let zone = skycourier::components::boxcollider::BoxCollider::trigger(10.0, 8.0, 10.0)
        .with_offset(Vec3::new(-5.0, -1.0, -5.0));
    let region = world
        .spawn((
            WorldPosition::at(Vec3::ZERO),
            IntersectionRegion::new(TURN_LEFT, zone),
        ))
        .id();
    world.resource_mut::<TriggerOccupancy>().inside.insert(region);

    world.resource_mut::<InputState>().turn_left = true;
    tick_turn_command(&mut world);

    let active = *world.resource::<ActiveTurn>();
    let task = active.0.expect("turn should have been committed");
    assert_eq!(task.steps_left, cfg.turn_steps);
    assert!(approx_eq(task.pivot.y, cfg.turn_pivot_height));
    assert_eq!(world.get::<IntersectionRegion>(region).unwrap().used, TURN_LEFT);
    let drone = world.query::<&Drone>().single(&world).unwrap();
    assert!(!drone.can_move && drone.target_locked);

    // A used region never offers a second turn.
    world.resource_mut::<InputState>().turn_right = true;
    {
        let mut drones = world.query::<&mut Drone>();
        let mut d = drones.single_mut(&mut world).unwrap();
        d.can_move = true;
        d.target_locked = false;
    }
    world.resource_mut::<ActiveTurn>().cancel();
    tick_turn_command(&mut world);
    assert!(!world.resource::<ActiveTurn>().is_turning());
    assert_eq!(world.get::<IntersectionRegion>(region).unwrap().used, TURN_LEFT);
}

#[test]
fn test_turn_maneuver_quarter_turn_rebases_and_unlocks() {
    let mut world = make_world(1.0 / 60.0);
    let mut drone = Drone::new();
    drone.can_move = false;
    drone.target_locked = true;
    world.spawn((drone, WorldPosition::at(Vec3::ZERO)));

    let pivot = Vec3::new(10.0, 3.0, 0.0);
    world.resource_mut::<ActiveTurn>().0 = Some(TurnTask {
        steps_left: 30,
        step_degrees: 3.0,
        pivot,
    });

    for step in 0..30 {
        assert!(world.resource::<ActiveTurn>().is_turning(), "step {}", step);
        tick_turn_maneuver(&mut world);
    }

    assert!(!world.resource::<ActiveTurn>().is_turning());
    let frame = world.resource::<TravelFrame>();
    assert_eq!(frame.heading, 90.0);
    assert!((frame.forward - Vec3::NEG_Z).length() < EPSILON);
    assert!(approx_eq(frame.anchor.x, pivot.x));
    assert!(approx_eq(frame.anchor.z, pivot.z));
    let track = world.resource::<TrackState>();
    assert!(approx_eq(track.cursor.x, pivot.x));

    let d = world.query::<&Drone>().single(&world).unwrap();
    assert!(d.can_move && !d.target_locked);
}
