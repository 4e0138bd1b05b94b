//! ECS components of the simulation core.
//!
//! Submodules:
//! - [`boxcollider`] – axis-aligned box colliders (solid and trigger volumes)
//! - [`drone`] – player drone controller state
//! - [`intersection`] – intersection regions offering one turn per pass
//! - [`persistent`] – marker for entities that survive a run teardown
//! - [`segment`] – placed track features (road, intersection, side features)
//! - [`station`] – delivery pickup/drop-off stations
//! - [`worldposition`] – world-space position

pub mod boxcollider;
pub mod drone;
pub mod intersection;
pub mod persistent;
pub mod segment;
pub mod station;
pub mod worldposition;
