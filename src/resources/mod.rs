//! ECS resources of the simulation core.
//!
//! Submodules:
//! - [`audio`] – bridge to the background audio thread
//! - [`delivery`] – Idle/Carrying delivery arbiter
//! - [`gameconfig`] – INI-backed gameplay tuning
//! - [`gamestate`] – session state machine (title/playing/paused/end)
//! - [`gps`] – guided exit direction for the current delivery leg
//! - [`input`] – axis and turn-command input state
//! - [`occupancy`] – trigger volumes currently containing the drone
//! - [`progress`] – distance, meters, derived speed
//! - [`settings`] – persisted player settings (volume/sensitivity/high score)
//! - [`systemsstore`] – registry of named systems for state hooks
//! - [`track`] – generation cursor, cooldown, placement decisions
//! - [`travelframe`] – corridor anchor and orientation
//! - [`turn`] – active turn maneuver task
//! - [`worldsignals`] – global signal board
//! - [`worldtime`] – elapsed/delta clock with time scale

pub mod audio;
pub mod delivery;
pub mod gameconfig;
pub mod gamestate;
pub mod gps;
pub mod input;
pub mod occupancy;
pub mod progress;
pub mod settings;
pub mod systemsstore;
pub mod track;
pub mod travelframe;
pub mod turn;
pub mod worldsignals;
pub mod worldtime;
