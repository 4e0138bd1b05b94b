//! Event types and observers used by the simulation core.
//!
//! This module groups the domain events exchanged across systems and the
//! corresponding observers that react to them. Triggered events carry
//! discrete facts (a collision happened, a delivery leg ended); messages
//! carry value feeds consumed by readers (HUD values, audio commands).
//!
//! Submodules:
//! - [`audio`] – commands and messages for the background audio thread
//! - [`collision`] – collision and trigger enter/exit notifications
//! - [`delivery`] – delivery leg start/end and HUD value feeds
//! - [`gamestate`] – state transition notifications for the session flow
//! - [`guidance`] – GPS direction updates and navigation failures
//! - [`progress`] – meters and speed value feeds
//! - [`session`] – run lifecycle events (start, abort, crash, game over)

pub mod audio;
pub mod collision;
pub mod delivery;
pub mod gamestate;
pub mod guidance;
pub mod progress;
pub mod session;
