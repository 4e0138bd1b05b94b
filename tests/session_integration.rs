//! Delivery arbitration, guidance and crash lifecycle integration tests.

use bevy_ecs::message::Messages;
use bevy_ecs::observer::{Observer, On};
use bevy_ecs::prelude::*;
use glam::Vec3;

use skycourier::components::boxcollider::BoxCollider;
use skycourier::components::drone::Drone;
use skycourier::components::intersection::{IntersectionRegion, TURN_RIGHT};
use skycourier::components::station::Station;
use skycourier::components::worldposition::WorldPosition;
use skycourier::events::audio::AudioCmd;
use skycourier::events::collision::{CollisionEvent, TriggerEnterEvent, TriggerExitEvent};
use skycourier::events::delivery::{DeliverEndEvent, DeliveredUpdated, DeliveringUpdated};
use skycourier::events::guidance::{GpsUpdated, NavigationFailedEvent};
use skycourier::events::progress::SpeedUpdated;
use skycourier::events::session::{DroneCrashedEvent, GameOverEvent, RunAbortedEvent};
use skycourier::game::{on_drone_crashed, on_game_over, on_run_aborted};
use skycourier::resources::delivery::DeliveryState;
use skycourier::resources::gameconfig::GameConfig;
use skycourier::resources::gamestate::NextGameState;
use skycourier::resources::gps::Gps;
use skycourier::resources::occupancy::TriggerOccupancy;
use skycourier::resources::progress::Progress;
use skycourier::resources::settings::PlayerSettings;
use skycourier::resources::turn::ActiveTurn;
use skycourier::resources::worldsignals::WorldSignals;
use skycourier::resources::worldtime::WorldTime;
use skycourier::systems::audio::update_ambient_level;
use skycourier::systems::delivery::observe_station_enter;
use skycourier::systems::drone::{crash_countdown, observe_drone_collision};
use skycourier::systems::turn::{observe_region_enter, observe_region_exit};

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
    world.insert_resource(DeliveryState::new());
    world.insert_resource(Gps::default());
    world.insert_resource(TriggerOccupancy::default());
    world.insert_resource(ActiveTurn::default());
    world.insert_resource(WorldSignals::default());
    world.insert_resource(NextGameState::new());
    world.insert_resource(PlayerSettings::load(
        std::env::temp_dir().join("skycourier_session_test_settings.json"),
    ));
    world.init_resource::<Messages<AudioCmd>>();
    world.init_resource::<Messages<DeliveringUpdated>>();
    world.init_resource::<Messages<DeliveredUpdated>>();
    world.init_resource::<Messages<GpsUpdated>>();
    world
}

fn flag_deliver_end(
    trigger: On<DeliverEndEvent>,
    mut signals: ResMut<WorldSignals>,
) {
    signals.set_flag(if trigger.event().success {
        "deliver_end_success"
    } else {
        "deliver_end_failure"
    });
}

fn flag_nav_failed(_trigger: On<NavigationFailedEvent>, mut signals: ResMut<WorldSignals>) {
    signals.set_flag("nav_failed");
}

fn flag_game_over(_trigger: On<GameOverEvent>, mut signals: ResMut<WorldSignals>) {
    signals.set_flag("game_over");
}

fn spawn_station(world: &mut World, dropoff: bool) -> Entity {
    let station = if dropoff {
        Station::dropoff()
    } else {
        Station::pickup()
    };
    world
        .spawn((
            WorldPosition::at(Vec3::new(5.0, 1.0, 2.0)),
            BoxCollider::trigger(2.0, 2.0, 2.0),
            station,
        ))
        .id()
}

#[test]
fn test_pickup_consumes_station_and_publishes_once() {
    let mut world = make_world(1.0 / 60.0);
    world.spawn(Observer::new(observe_station_enter));
    world.flush();
    let station = spawn_station(&mut world, false);

    world.trigger(TriggerEnterEvent { volume: station });
    world.flush();

    assert!(world.resource::<DeliveryState>().is_carrying());
    assert!(world.get_entity(station).is_err(), "station is consumed");
    let updates: Vec<_> = world
        .resource_mut::<Messages<DeliveringUpdated>>()
        .drain()
        .collect();
    assert_eq!(updates.len(), 1);
    assert!(updates[0].delivering);
}

#[test]
fn test_dropoff_while_idle_is_refused() {
    let mut world = make_world(1.0 / 60.0);
    world.spawn(Observer::new(observe_station_enter));
    world.flush();
    let station = spawn_station(&mut world, true);

    world.trigger(TriggerEnterEvent { volume: station });
    world.flush();

    assert!(!world.resource::<DeliveryState>().is_carrying());
    assert_eq!(world.resource::<DeliveryState>().delivered(), 0);
    assert!(world.get_entity(station).is_ok(), "refused station stays");
    assert!(
        world
            .resource_mut::<Messages<DeliveringUpdated>>()
            .drain()
            .next()
            .is_none()
    );
}

#[test]
fn test_pickup_then_dropoff_completes_a_delivery() {
    let mut world = make_world(1.0 / 60.0);
    world.spawn(Observer::new(observe_station_enter));
    world.spawn(Observer::new(flag_deliver_end));
    world.flush();

    let pickup = spawn_station(&mut world, false);
    world.trigger(TriggerEnterEvent { volume: pickup });
    world.flush();
    let dropoff = spawn_station(&mut world, true);
    world.trigger(TriggerEnterEvent { volume: dropoff });
    world.flush();

    let delivery = world.resource::<DeliveryState>();
    assert!(!delivery.is_carrying());
    assert_eq!(delivery.delivered(), 1);
    assert!(world.resource::<WorldSignals>().has_flag("deliver_end_success"));
    let delivered: Vec<_> = world
        .resource_mut::<Messages<DeliveredUpdated>>()
        .drain()
        .collect();
    assert_eq!(delivered.last().map(|d| d.delivered), Some(1));
}

#[test]
fn test_gps_announces_only_while_carrying() {
    let mut world = make_world(1.0 / 60.0);
    world.spawn(Observer::new(observe_region_enter));
    world.flush();
    let region = world
        .spawn((
            WorldPosition::at(Vec3::ZERO),
            IntersectionRegion::new(TURN_RIGHT, BoxCollider::trigger(5.0, 8.0, 5.0)),
        ))
        .id();

    world.trigger(TriggerEnterEvent { volume: region });
    world.flush();
    assert_eq!(world.resource::<Gps>().direction, None);

    world.resource_mut::<DeliveryState>().try_pickup();
    world.trigger(TriggerEnterEvent { volume: region });
    world.flush();
    assert_eq!(world.resource::<Gps>().direction, Some(TURN_RIGHT));
}

#[test]
fn test_leaving_a_guided_region_the_wrong_way_fails_the_leg() {
    let mut world = make_world(1.0 / 60.0);
    world.spawn(Observer::new(observe_region_exit));
    world.spawn(Observer::new(flag_nav_failed));
    world.spawn(Observer::new(flag_deliver_end));
    world.flush();
    let region = world
        .spawn((
            WorldPosition::at(Vec3::ZERO),
            IntersectionRegion::new(TURN_RIGHT, BoxCollider::trigger(5.0, 8.0, 5.0)),
        ))
        .id();
    world.resource_mut::<DeliveryState>().try_pickup();
    world.resource_mut::<Gps>().direction = Some(TURN_RIGHT);

    // The drone flies straight through without turning.
    world.trigger(TriggerExitEvent { volume: region });
    world.flush();

    assert!(!world.resource::<DeliveryState>().is_carrying());
    assert_eq!(world.resource::<DeliveryState>().delivered(), 0);
    assert_eq!(world.resource::<Gps>().direction, None);
    let signals = world.resource::<WorldSignals>();
    assert!(signals.has_flag("nav_failed"));
    assert!(signals.has_flag("deliver_end_failure"));
}

#[test]
fn test_ambient_level_follows_the_speed_feed() {
    let mut world = make_world(1.0 / 60.0);
    world.init_resource::<Messages<SpeedUpdated>>();
    world
        .resource_mut::<Messages<SpeedUpdated>>()
        .write(SpeedUpdated { speed: 1.25 });

    let mut schedule = Schedule::default();
    schedule.add_systems(update_ambient_level);
    schedule.run(&mut world);

    let cap = world.resource::<GameConfig>().speed_cap();
    let level = world
        .resource_mut::<Messages<AudioCmd>>()
        .drain()
        .find_map(|cmd| match cmd {
            AudioCmd::SetAmbientLevel { level } => Some(level),
            _ => None,
        })
        .expect("a speed change should retune the ambient level");
    assert!((level - 1.25 / cap).abs() < 1e-4);
}

#[test]
fn test_crash_freeze_is_idempotent_and_ends_the_run() {
    let mut world = make_world(1.0);
    world.spawn(Observer::new(observe_drone_collision));
    world.spawn(Observer::new(on_drone_crashed));
    world.spawn(Observer::new(on_game_over));
    world.spawn(Observer::new(flag_game_over));
    world.flush();

    let drone = world
        .spawn((Drone::new(), WorldPosition::at(Vec3::ZERO), BoxCollider::new(0.6, 0.3, 0.6)))
        .id();
    let wall = world
        .spawn((WorldPosition::at(Vec3::X), BoxCollider::new(1.0, 1.0, 1.0)))
        .id();
    world.resource_mut::<Progress>().meters = 40;
    world.resource_mut::<DeliveryState>().try_pickup();
    world.resource_mut::<DeliveryState>().try_dropoff();

    let hit = CollisionEvent {
        drone,
        other: wall,
        point: Vec3::ZERO,
    };
    world.trigger(hit);
    world.trigger(hit); // second overlap report changes nothing
    world.flush();

    let crash_delay = world.resource::<GameConfig>().crash_delay;
    let d = *world.get::<Drone>(drone).unwrap();
    assert_eq!(d.crash_timer, Some(crash_delay));
    assert!(!d.can_move && d.target_locked);

    let mut schedule = Schedule::default();
    schedule.add_systems(crash_countdown);
    for _ in 0..4 {
        schedule.run(&mut world);
    }

    assert!(world.get_entity(drone).is_err(), "drone is destroyed");
    let signals = world.resource::<WorldSignals>();
    assert!(signals.has_flag("game_over"));
    // 40 meters plus one delivery at 250 points.
    assert_eq!(signals.get_integer("score"), Some(290));
}

#[test]
fn test_abort_during_the_freeze_reports_nothing() {
    let mut world = make_world(1.0);
    world.spawn(Observer::new(on_run_aborted));
    world.spawn(Observer::new(flag_game_over));
    world.flush();

    let drone = world.spawn((Drone::new(), WorldPosition::at(Vec3::ZERO))).id();
    {
        let mut d = world.get_mut::<Drone>(drone).unwrap();
        d.crash_timer = Some(2.0);
        d.can_move = false;
    }

    world.trigger(RunAbortedEvent {});
    world.flush();

    assert!(world.get_entity(drone).is_err(), "drone is torn down");
    assert!(!world.resource::<WorldSignals>().has_flag("game_over"));
}

#[test]
fn test_crash_event_reports_final_meters_and_deliveries() {
    let mut world = make_world(1.0);
    world.spawn(Observer::new(on_drone_crashed));
    world.spawn(Observer::new(on_game_over));
    world.flush();

    world.resource_mut::<Progress>().meters = 137;
    let mut delivery = world.resource_mut::<DeliveryState>();
    delivery.try_pickup();
    delivery.try_dropoff();
    delivery.try_pickup();
    delivery.try_dropoff();

    world.trigger(DroneCrashedEvent {});
    world.flush();

    let signals = world.resource::<WorldSignals>();
    assert_eq!(signals.get_integer("score"), Some(137 + 2 * 250));
    assert!(signals.get_integer("high_score").unwrap_or(0) >= 637);
}
