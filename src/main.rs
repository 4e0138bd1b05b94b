//! Sky Courier headless entry point.
//!
//! An endless drone delivery run built on:
//! - **bevy_ecs** for entity-component-system architecture
//! - a background audio thread bridged over crossbeam channels
//! - INI gameplay tuning and JSON player settings
//!
//! The executable drives the simulation core at a fixed step with the
//! autopilot standing in for a device input layer, which makes it a demo,
//! a soak test, and a profiling target at once.
//!
//! # Main Loop
//!
//! 1. Build the ECS world and resources (config, settings, audio thread)
//! 2. Register state hooks and observers
//! 3. Step the update schedule at a fixed dt until the run ends
//! 4. Report the final score and shut the audio thread down

use skycourier::components::persistent::Persistent;
use skycourier::events::delivery::{DeliveredUpdated, DeliveringUpdated};
use skycourier::events::gamestate::GameStateChangedEvent;
use skycourier::events::gamestate::observe_gamestate_change_event;
use skycourier::events::guidance::GpsUpdated;
use skycourier::events::progress::{MetersUpdated, SpeedUpdated};
use skycourier::game;
use skycourier::resources::audio::{setup_audio, shutdown_audio};
use skycourier::resources::delivery::DeliveryState;
use skycourier::resources::gameconfig::GameConfig;
use skycourier::resources::gamestate::{GameState, GameStates, NextGameState};
use skycourier::resources::gps::Gps;
use skycourier::resources::input::InputState;
use skycourier::resources::occupancy::TriggerOccupancy;
use skycourier::resources::progress::Progress;
use skycourier::resources::settings::PlayerSettings;
use skycourier::resources::systemsstore::SystemsStore;
use skycourier::resources::track::TrackState;
use skycourier::resources::travelframe::TravelFrame;
use skycourier::resources::turn::ActiveTurn;
use skycourier::resources::worldsignals::WorldSignals;
use skycourier::resources::worldtime::WorldTime;
use skycourier::systems::audio::{
    forward_audio_cmds, poll_audio_messages, update_ambient_level, update_bevy_audio_cmds,
    update_bevy_audio_messages,
};
use skycourier::systems::autopilot::{Autopilot, autopilot_drive};
use skycourier::systems::collision::collision_detector;
use skycourier::systems::delivery::observe_station_enter;
use skycourier::systems::drone::{crash_countdown, drone_controller, observe_drone_collision};
use skycourier::systems::gamestate::{check_pending_state, state_is_playing};
use skycourier::systems::hud::{hud_monitor, update_value_messages};
use skycourier::systems::progress::progress_tick;
use skycourier::systems::time::update_world_time;
use skycourier::systems::track::{advance_track, retire_track};
use skycourier::systems::turn::{
    observe_deliver_start, observe_region_enter, observe_region_exit, turn_command, turn_maneuver,
};
use bevy_ecs::message::Messages;
use bevy_ecs::observer::Observer;
use bevy_ecs::prelude::*;
use clap::Parser;
use std::path::PathBuf;

const FIXED_DT: f32 = 1.0 / 60.0;

/// Sky Courier
#[derive(Parser)]
#[command(version, about = "Endless drone delivery run, headless simulation")]
struct Cli {
    /// Path to the gameplay tuning file.
    #[arg(long, value_name = "PATH", default_value = "./config.ini")]
    config: PathBuf,

    /// Path to the player settings file.
    #[arg(long, value_name = "PATH", default_value = "./settings.json")]
    settings: PathBuf,

    /// Seed for the track generator.
    #[arg(long, default_value_t = 0xC0FFEE)]
    seed: u64,

    /// Simulated seconds to run before giving up on a crash.
    #[arg(long, default_value_t = 300.0)]
    max_seconds: f32,

    /// Disable the autopilot (the drone just coasts).
    #[arg(long)]
    no_autopilot: bool,
}

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let cli = Cli::parse();

    let mut config = GameConfig::with_path(&cli.config);
    if config.load_from_file().is_err() {
        // No tuning file yet: write the defaults so there is one to edit.
        if let Err(e) = config.save_to_file() {
            log::warn!("Could not write starter config: {}", e);
        }
    }
    let settings = PlayerSettings::load(&cli.settings);

    // --------------- ECS world + resources ---------------
    let mut world = World::new();
    world.insert_resource(WorldTime::default().with_time_scale(0.0));
    world.insert_resource(WorldSignals::default());
    world.insert_resource(TravelFrame::new());
    world.insert_resource(TrackState::new(cli.seed));
    world.insert_resource(Progress::new(config.base_speed));
    world.insert_resource(DeliveryState::new());
    world.insert_resource(ActiveTurn::default());
    world.insert_resource(Gps::default());
    world.insert_resource(TriggerOccupancy::default());
    world.insert_resource(InputState::default());
    world.insert_resource(Autopilot {
        enabled: !cli.no_autopilot,
    });
    world.insert_resource(config);
    world.insert_resource(settings);
    world.insert_resource(Messages::<MetersUpdated>::default());
    world.insert_resource(Messages::<SpeedUpdated>::default());
    world.insert_resource(Messages::<DeliveringUpdated>::default());
    world.insert_resource(Messages::<DeliveredUpdated>::default());
    world.insert_resource(Messages::<GpsUpdated>::default());

    // Init audio. It must go before the game setup.
    setup_audio(&mut world);

    world.insert_resource(GameState::new());
    world.insert_resource(NextGameState::new());

    world.spawn((Observer::new(observe_gamestate_change_event), Persistent));

    // Game state systems store.
    // NOTE: In bevy_ecs 0.18, registered systems are stored as entities.
    // They must be Persistent so they survive a run teardown.
    let mut systems_store = SystemsStore::new();

    let enter_title_id = world.register_system(game::enter_title);
    world.entity_mut(enter_title_id.entity()).insert(Persistent);
    systems_store.insert("enter_title", enter_title_id);

    let enter_play_id = world.register_system(game::enter_play);
    world.entity_mut(enter_play_id.entity()).insert(Persistent);
    systems_store.insert("enter_play", enter_play_id);

    let enter_pause_id = world.register_system(game::enter_pause);
    world.entity_mut(enter_pause_id.entity()).insert(Persistent);
    systems_store.insert("enter_pause", enter_pause_id);

    let exit_pause_id = world.register_system(game::exit_pause);
    world.entity_mut(exit_pause_id.entity()).insert(Persistent);
    systems_store.insert("exit_pause", exit_pause_id);

    let enter_end_id = world.register_system(game::enter_end);
    world.entity_mut(enter_end_id.entity()).insert(Persistent);
    systems_store.insert("enter_end", enter_end_id);

    world.insert_resource(systems_store);

    world.spawn((Observer::new(observe_region_enter), Persistent));
    world.spawn((Observer::new(observe_region_exit), Persistent));
    world.spawn((Observer::new(observe_deliver_start), Persistent));
    world.spawn((Observer::new(observe_station_enter), Persistent));
    world.spawn((Observer::new(observe_drone_collision), Persistent));
    world.spawn((Observer::new(game::on_drone_crashed), Persistent));
    world.spawn((Observer::new(game::on_game_over), Persistent));
    world.spawn((Observer::new(game::on_run_aborted), Persistent));
    // Observers must exist before any system triggers events.
    world.flush();

    // Title screen first, then straight into a run.
    world
        .resource_mut::<NextGameState>()
        .set(GameStates::TitleScreen);
    world.trigger(GameStateChangedEvent {});
    game::start_run(&mut world);

    // --------------- Update schedule ---------------
    let mut update = Schedule::default();
    update.add_systems(check_pending_state);
    update.add_systems(
        // audio systems must be together
        (
            update_bevy_audio_cmds,
            forward_audio_cmds,
            poll_audio_messages,
            update_bevy_audio_messages,
        )
            .chain(),
    );
    update.add_systems(autopilot_drive.run_if(state_is_playing));
    update.add_systems(
        (
            turn_command,
            turn_maneuver,
            progress_tick,
            advance_track,
            retire_track,
            drone_controller,
            collision_detector,
            crash_countdown,
        )
            .chain()
            .run_if(state_is_playing)
            .after(autopilot_drive),
    );
    update.add_systems(update_ambient_level.after(progress_tick).run_if(state_is_playing));
    update.add_systems(update_value_messages.after(collision_detector));
    update.add_systems(hud_monitor.after(update_value_messages));

    update
        .initialize(&mut world)
        .expect("Failed to initialize schedule");

    // --------------- Main loop ---------------
    let mut simulated = 0.0_f32;
    while !world.resource::<WorldSignals>().has_flag("quit_game") {
        update_world_time(&mut world, FIXED_DT);
        update.run(&mut world);
        world.clear_trackers();

        if world.resource::<GameState>().get() == &GameStates::End {
            break;
        }
        simulated += FIXED_DT;
        if simulated >= cli.max_seconds {
            log::info!("Simulation time limit reached, aborting run");
            game::abort_run(&mut world);
            world.trigger(GameStateChangedEvent {});
            break;
        }
    }

    let signals = world.resource::<WorldSignals>();
    log::info!(
        "Final score: {} (best {})",
        signals.get_integer("score").unwrap_or(0),
        signals.get_integer("high_score").unwrap_or(0)
    );
    shutdown_audio(&mut world);
}
