//! ECS systems of the simulation core.
//!
//! Submodules:
//! - [`audio`] – audio thread and bridge systems
//! - [`autopilot`] – demo input driver for headless runs
//! - [`collision`] – AABB sweep emitting collision/trigger events
//! - [`delivery`] – station trigger arbitration
//! - [`drone`] – drone controller and crash countdown
//! - [`gamestate`] – pending state transitions and run conditions
//! - [`hud`] – log-line HUD draining the value feeds
//! - [`progress`] – distance/speed integration
//! - [`time`] – world clock update
//! - [`track`] – frontier generation and segment retirement
//! - [`turn`] – intersection occupancy, turn legality and maneuver

pub mod audio;
pub mod autopilot;
pub mod collision;
pub mod delivery;
pub mod drone;
pub mod gamestate;
pub mod hud;
pub mod progress;
pub mod time;
pub mod track;
pub mod turn;
